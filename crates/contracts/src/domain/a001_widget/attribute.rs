//! Entry attributes: values entered against widgets of a framework

use serde::{Deserialize, Serialize};

use super::aggregate::Widget;
use super::value::WidgetValue;
use crate::domain::common::new_client_id;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Attribute {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub client_id: String,
    /// Identity of the widget the value belongs to
    pub widget: String,
    pub widget_type: String,
    /// `{"value": ...}`, or `None` when cleared
    pub data: Option<serde_json::Value>,
}

impl Attribute {
    pub fn new(widget: &Widget, value: Option<&WidgetValue>) -> Self {
        Self {
            id: None,
            client_id: new_client_id(),
            widget: widget.identity().to_string(),
            widget_type: widget.kind().code().to_string(),
            data: value.map(WidgetValue::to_data),
        }
    }

    pub fn belongs_to(&self, widget: &Widget) -> bool {
        self.widget == widget.identity() || self.widget == widget.client_id
    }

    /// Typed value for `widget`; `None` when the attribute is for another
    /// widget, was recorded for another kind, or its data does not parse.
    pub fn value_for(&self, widget: &Widget) -> Option<WidgetValue> {
        if !self.belongs_to(widget) || self.widget_type != widget.kind().code() {
            return None;
        }
        let data = self.data.as_ref()?;
        match WidgetValue::from_data(widget.kind(), data) {
            Ok(value) => Some(value),
            Err(e) => {
                log::warn!(
                    "attribute {} for widget {}: ignoring unreadable data: {}",
                    self.client_id,
                    self.widget,
                    e
                );
                None
            }
        }
    }
}

/// Attribute list of one entry
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryAttributes {
    pub attributes: Vec<Attribute>,
}

impl EntryAttributes {
    pub fn new(attributes: Vec<Attribute>) -> Self {
        Self { attributes }
    }

    pub fn get(&self, widget: &Widget) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.belongs_to(widget))
    }

    pub fn value(&self, widget: &Widget) -> Option<WidgetValue> {
        self.get(widget)?.value_for(widget)
    }

    /// New attribute list with `value` recorded for `widget`.
    ///
    /// `None` clears the data but keeps the attribute. A missing attribute
    /// is created with a fresh client id; other attributes are unchanged.
    pub fn set_value(&self, widget: &Widget, value: Option<WidgetValue>) -> Self {
        let mut attributes = self.attributes.clone();
        match attributes.iter_mut().find(|a| a.belongs_to(widget)) {
            Some(attribute) => {
                attribute.widget_type = widget.kind().code().to_string();
                attribute.data = value.as_ref().map(WidgetValue::to_data);
            }
            None => attributes.push(Attribute::new(widget, value.as_ref())),
        }
        Self { attributes }
    }

    /// Attributes whose widget is not in `widgets`
    pub fn orphans<'a>(&'a self, widgets: &[Widget]) -> Vec<&'a Attribute> {
        self.attributes
            .iter()
            .filter(|a| !widgets.iter().any(|w| a.belongs_to(w)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_widget::aggregate::WidgetRecord;
    use crate::domain::a001_widget::input::toggle_matrix1d_cell;
    use crate::enums::WidgetKind;
    use serde_json::json;

    fn matrix_widget() -> Widget {
        WidgetRecord {
            id: Some("41".into()),
            client_id: "w-matrix".into(),
            key: "matrix".into(),
            title: "Sectors".into(),
            widget_id: "MATRIX1D".into(),
            properties: Some(json!({"rows": [
                {"key": "r1", "label": "Row 1", "cells": [{"key": "c1", "label": "Cell 1"}]}
            ]})),
            ..Default::default()
        }
        .resolve()
        .unwrap()
    }

    #[test]
    fn test_matrix1d_click_flow() {
        let widget = matrix_widget();
        let entry = EntryAttributes::default();
        assert_eq!(entry.value(&widget), None);

        let first = toggle_matrix1d_cell(None, "r1", "c1");
        let entry = entry.set_value(&widget, Some(WidgetValue::Matrix1d(first)));
        assert_eq!(entry.attributes[0].data, Some(json!({"value": {"r1": {"c1": true}}})));

        let current = match entry.value(&widget) {
            Some(WidgetValue::Matrix1d(v)) => v,
            other => panic!("unexpected {:?}", other),
        };
        let second = toggle_matrix1d_cell(Some(&current), "r1", "c1");
        let entry = entry.set_value(&widget, Some(WidgetValue::Matrix1d(second)));
        assert_eq!(entry.attributes.len(), 1);
        assert_eq!(entry.attributes[0].data, Some(json!({"value": {"r1": {"c1": false}}})));
    }

    #[test]
    fn test_clear_keeps_attribute_identity() {
        let widget = Widget::new(WidgetKind::Text);
        let entry = EntryAttributes::default().set_value(&widget, Some(WidgetValue::Text("a".into())));
        let client_id = entry.attributes[0].client_id.clone();
        let cleared = entry.set_value(&widget, None);
        assert_eq!(cleared.attributes[0].client_id, client_id);
        assert_eq!(cleared.value(&widget), None);
    }

    #[test]
    fn test_mismatched_kind_reads_as_absent() {
        let widget = matrix_widget();
        let entry = EntryAttributes::new(vec![Attribute {
            client_id: "a1".into(),
            widget: "41".into(),
            widget_type: "TEXT".into(),
            data: Some(json!({"value": "hello"})),
            ..Default::default()
        }]);
        assert_eq!(entry.value(&widget), None);

        let entry = EntryAttributes::new(vec![Attribute {
            client_id: "a2".into(),
            widget: "41".into(),
            widget_type: "MATRIX1D".into(),
            data: Some(json!({"value": "not a grid"})),
            ..Default::default()
        }]);
        assert_eq!(entry.value(&widget), None);
    }

    #[test]
    fn test_orphans() {
        let widget = matrix_widget();
        let entry = EntryAttributes::new(vec![
            Attribute::new(&widget, None),
            Attribute {
                client_id: "gone".into(),
                widget: "deleted".into(),
                widget_type: "TEXT".into(),
                ..Default::default()
            },
        ]);
        let orphans = entry.orphans(std::slice::from_ref(&widget));
        assert_eq!(orphans.len(), 1);
        assert_eq!(orphans[0].client_id, "gone");
    }
}
