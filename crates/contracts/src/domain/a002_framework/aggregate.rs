use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::domain::a001_widget::attribute::{Attribute, EntryAttributes};
use crate::domain::a001_widget::validation::validate_config;
use crate::domain::a001_widget::{Widget, WidgetRecord};
use crate::domain::common::list_item::{self, ListItem};
use crate::shared::form::FormErrors;

/// Analytical framework: an ordered list of widgets
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Framework {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub widgets: Vec<WidgetRecord>,
}

impl ListItem for WidgetRecord {
    fn item_key(&self) -> &str {
        &self.client_id
    }
    fn order(&self) -> i32 {
        self.order
    }
    fn set_order(&mut self, order: i32) {
        self.order = order;
    }
}

impl Framework {
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        serde_json::from_str(json).context("Failed to parse framework")
    }

    /// Widgets of known kinds, sorted by order
    pub fn widgets(&self) -> Vec<Widget> {
        list_item::sort_by_order(&self.widgets)
            .iter()
            .filter_map(|record| {
                let widget = record.resolve();
                if widget.is_none() {
                    log::debug!(
                        "framework {:?}: skipping widget {} of unknown kind {}",
                        self.id,
                        record.client_id,
                        record.widget_id
                    );
                }
                widget
            })
            .collect()
    }

    /// Records whose kind this build does not know
    pub fn unknown_widgets(&self) -> Vec<&WidgetRecord> {
        self.widgets.iter().filter(|r| r.kind().is_none()).collect()
    }

    pub fn widget_by_client_id(&self, client_id: &str) -> Option<Widget> {
        list_item::find_item(&self.widgets, client_id)?.resolve()
    }

    /// Replace the widget with the same client id, or append it
    pub fn upsert_widget(&mut self, widget: &Widget) {
        let mut record = widget.to_record();
        match list_item::find_item_mut(&mut self.widgets, &widget.client_id) {
            Some(existing) => {
                record.order = existing.order;
                *existing = record;
            }
            None => {
                record.order = self.widgets.len() as i32;
                self.widgets.push(record);
            }
        }
    }

    pub fn remove_widget(&mut self, client_id: &str) -> bool {
        list_item::remove_item(&mut self.widgets, client_id).is_some()
    }

    pub fn move_widget(&mut self, from: usize, to: usize) -> bool {
        self.widgets.sort_by_key(|w| w.order);
        list_item::move_item(&mut self.widgets, from, to)
    }

    /// Attributes recorded for widgets that are no longer in the framework
    pub fn orphan_attributes<'a>(&self, entry: &'a EntryAttributes) -> Vec<&'a Attribute> {
        entry.orphans(&self.widgets())
    }

    /// Whether the widget with `client_id` is shown for `entry`. A conditional
    /// widget is hidden while its rule fails or while its parent is hidden;
    /// a rule whose parent is gone hides nothing.
    pub fn is_widget_visible(&self, client_id: &str, entry: &EntryAttributes) -> bool {
        let widgets = self.widgets();
        match widgets.iter().find(|w| w.client_id == client_id) {
            Some(widget) => is_visible(widget, &widgets, entry, widgets.len()),
            None => true,
        }
    }

    /// Widgets shown for `entry`, in display order
    pub fn visible_widgets(&self, entry: &EntryAttributes) -> Vec<Widget> {
        let widgets = self.widgets();
        widgets
            .iter()
            .filter(|w| is_visible(w, &widgets, entry, widgets.len()))
            .cloned()
            .collect()
    }

    /// Widgets that `client_id` may take as a conditional parent: all but
    /// itself and the widgets already depending on it
    pub fn parent_candidates(&self, client_id: &str) -> Vec<Widget> {
        let widgets = self.widgets();
        widgets
            .iter()
            .filter(|w| w.client_id != client_id && !depends_on(w, client_id, &widgets, widgets.len()))
            .cloned()
            .collect()
    }

    /// Title plus every widget's configuration, keyed by widget client id
    pub fn validate(&self) -> FormErrors {
        let mut errors = FormErrors::new();
        errors.require_text("title", &self.title);
        let mut widgets = FormErrors::new();
        for widget in self.widgets() {
            widgets.add_nested(widget.client_id.clone(), validate_config(&widget));
        }
        errors.add_nested("widgets", widgets);
        errors
    }
}

fn is_visible(widget: &Widget, widgets: &[Widget], entry: &EntryAttributes, depth: usize) -> bool {
    let Some(conditional) = &widget.conditional else {
        return true;
    };
    let Some(parent) = conditional.find_parent(widgets) else {
        log::debug!(
            "widget {}: parent {} of its conditional is gone",
            widget.client_id,
            conditional.parent_client_id
        );
        return true;
    };
    if depth == 0 {
        log::warn!("widget {}: conditional parents form a cycle", widget.client_id);
        return true;
    }
    is_visible(parent, widgets, entry, depth - 1)
        && conditional.evaluate(parent, entry.value(parent).as_ref())
}

fn depends_on(widget: &Widget, ancestor: &str, widgets: &[Widget], depth: usize) -> bool {
    let Some(conditional) = &widget.conditional else {
        return false;
    };
    if conditional.parent_client_id == ancestor {
        return true;
    }
    match conditional.find_parent(widgets) {
        Some(parent) if depth > 0 => depends_on(parent, ancestor, widgets, depth - 1),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_widget::conditional::ConditionValue;
    use crate::domain::a001_widget::{ConditionOperator, Conditional, WidgetValue};
    use crate::enums::WidgetKind;

    const FRAMEWORK: &str = r#"{
        "id": "12",
        "title": "Flash update",
        "widgets": [
            {"clientId": "b", "key": "summary", "title": "Summary", "order": 1,
             "widgetId": "TEXT", "properties": {}},
            {"clientId": "a", "key": "sectors", "title": "Sectors", "order": 0,
             "widgetId": "MATRIX1D", "properties": {"rows": [
                {"key": "r1", "label": "Row 1", "order": 0,
                 "cells": [{"key": "c1", "label": "Cell 1", "order": 0}]}
             ]}},
            {"clientId": "c", "key": "future", "title": "Future", "order": 2,
             "widgetId": "HOLOGRAM"}
        ]
    }"#;

    #[test]
    fn test_widgets_are_sorted_and_unknown_skipped() {
        let framework = Framework::from_json(FRAMEWORK).unwrap();
        let widgets = framework.widgets();
        let ids: Vec<&str> = widgets.iter().map(|w| w.client_id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert_eq!(widgets[0].kind(), WidgetKind::Matrix1d);

        let unknown = framework.unknown_widgets();
        assert_eq!(unknown.len(), 1);
        assert_eq!(unknown[0].widget_id, "HOLOGRAM");
    }

    #[test]
    fn test_parse_error_has_context() {
        let err = Framework::from_json("{\"widgets\": 3}").unwrap_err();
        assert!(err.to_string().contains("Failed to parse framework"));
    }

    #[test]
    fn test_upsert_and_remove_keep_dense_order() {
        let mut framework = Framework::default();
        let mut first = Widget::new(WidgetKind::Text);
        first.title = "First".into();
        let second = Widget::new(WidgetKind::Number);
        framework.upsert_widget(&first);
        framework.upsert_widget(&second);

        first.title = "Renamed".into();
        framework.upsert_widget(&first);
        assert_eq!(framework.widgets.len(), 2);
        assert_eq!(framework.widgets[0].title, "Renamed");
        assert_eq!(framework.widgets[0].order, 0);

        assert!(framework.remove_widget(&first.client_id));
        assert_eq!(framework.widgets[0].order, 0);
        assert!(!framework.remove_widget("missing"));
    }

    #[test]
    fn test_validate_keys_widget_errors_by_client_id() {
        let mut framework = Framework::from_json(FRAMEWORK).unwrap();
        assert!(framework.validate().is_empty());
        framework.widgets[0].title.clear();
        let errors = framework.validate();
        assert!(errors.at(&["widgets", "b", "title"]).is_some());
    }

    fn text_rule(parent: &Widget, needle: &str) -> Conditional {
        let mut conditional = Conditional::new(parent);
        conditional.conditions[0].set_operator(ConditionOperator::TextContains);
        conditional.conditions[0].value = Some(ConditionValue::Text(needle.into()));
        conditional
    }

    #[test]
    fn test_conditional_widgets_follow_the_parent_value() {
        let mut framework = Framework::default();
        let mut parent = Widget::new(WidgetKind::Text);
        parent.title = "Event".into();
        let mut child = Widget::new(WidgetKind::Number);
        child.title = "Affected".into();
        child.conditional = Some(text_rule(&parent, "flood"));
        let mut grandchild = Widget::new(WidgetKind::Text);
        grandchild.title = "Details".into();
        let mut always = Conditional::new(&child);
        always.conditions[0].invert = true;
        always.conditions[0].set_operator(ConditionOperator::Empty);
        // "is not empty" on the child, which is still empty
        grandchild.conditional = Some(always);
        framework.upsert_widget(&parent);
        framework.upsert_widget(&child);
        framework.upsert_widget(&grandchild);

        let entry = EntryAttributes::default();
        assert!(framework.is_widget_visible(&parent.client_id, &entry));
        assert!(!framework.is_widget_visible(&child.client_id, &entry));

        let entry = entry.set_value(&parent, Some(WidgetValue::Text("Flood warning".into())));
        assert!(framework.is_widget_visible(&child.client_id, &entry));
        assert!(!framework.is_widget_visible(&grandchild.client_id, &entry));

        let entry = entry.set_value(&child, Some(WidgetValue::Number(12.0)));
        assert_eq!(framework.visible_widgets(&entry).len(), 3);

        // the child's value stays, but hiding the child hides the grandchild too
        let entry = entry.set_value(&parent, Some(WidgetValue::Text("Drought".into())));
        let visible = framework.visible_widgets(&entry);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].client_id, parent.client_id);
    }

    #[test]
    fn test_rule_with_removed_parent_hides_nothing() {
        let mut framework = Framework::default();
        let parent = Widget::new(WidgetKind::Text);
        let mut child = Widget::new(WidgetKind::Text);
        child.title = "Child".into();
        child.conditional = Some(text_rule(&parent, "x"));
        framework.upsert_widget(&child);
        assert!(framework.is_widget_visible(&child.client_id, &EntryAttributes::default()));
    }

    #[test]
    fn test_parent_candidates_exclude_dependents() {
        let mut framework = Framework::default();
        let root = Widget::new(WidgetKind::Text);
        let mut child = Widget::new(WidgetKind::Text);
        child.conditional = Some(text_rule(&root, "a"));
        let mut grandchild = Widget::new(WidgetKind::Text);
        grandchild.conditional = Some(text_rule(&child, "b"));
        let other = Widget::new(WidgetKind::Number);
        for widget in [&root, &child, &grandchild, &other] {
            framework.upsert_widget(widget);
        }

        let ids = |client_id: &str| -> Vec<String> {
            framework
                .parent_candidates(client_id)
                .into_iter()
                .map(|w| w.client_id)
                .collect()
        };
        assert_eq!(ids(&root.client_id), vec![other.client_id.clone()]);
        assert_eq!(
            ids(&grandchild.client_id),
            vec![root.client_id.clone(), child.client_id.clone(), other.client_id.clone()]
        );
        assert_eq!(ids(&other.client_id).len(), 3);
    }

    #[test]
    fn test_orphan_attributes() {
        let framework = Framework::from_json(FRAMEWORK).unwrap();
        let summary = framework.widget_by_client_id("b").unwrap();
        let entry = EntryAttributes::default()
            .set_value(&summary, Some(WidgetValue::Text("ok".into())));
        assert!(framework.orphan_attributes(&entry).is_empty());

        let mut smaller = framework.clone();
        smaller.remove_widget("b");
        assert_eq!(smaller.orphan_attributes(&entry).len(), 1);
    }
}
