use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::possible::PossibleMapping;
use crate::domain::a001_widget::{Widget, WidgetProperties};
use crate::domain::common::new_client_id;
use crate::enums::WidgetKind;

#[derive(Debug, Error, PartialEq)]
pub enum MappingError {
    #[error("widget {0} has not been saved yet")]
    UnsavedWidget(String),
    #[error("{0} widgets cannot be mapped")]
    NotMappable(WidgetKind),
    #[error("{target:?} does not apply to {kind} widgets")]
    TargetMismatch { kind: WidgetKind, target: MappingTarget },
    #[error("no parent found for '{key}' in widget {widget}")]
    UnresolvedTarget { widget: String, key: String },
}

// ============================================================================
// Wire types
// ============================================================================

/// MATRIX2D association, tagged by `type`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Matrix2dAssociation {
    #[serde(rename_all = "camelCase")]
    Column { column_key: String },
    #[serde(rename_all = "camelCase")]
    SubColumn { column_key: String, sub_column_key: String },
    #[serde(rename_all = "camelCase")]
    SubRow { row_key: String, sub_row_key: String },
}

/// Sub-element a mapping points at
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Association {
    Matrix2d(Matrix2dAssociation),
    /// MATRIX1D cell; the cell key travels as `subRowKey`
    #[serde(rename_all = "camelCase")]
    Cell { row_key: String, sub_row_key: String },
    /// SCALE / SELECT / MULTISELECT option or ORGANIGRAM node
    #[serde(rename_all = "camelCase")]
    Option { option_key: String },
}

impl Association {
    pub fn target(&self) -> MappingTarget {
        match self {
            Association::Matrix2d(Matrix2dAssociation::Column { column_key }) => {
                MappingTarget::Column(column_key.clone())
            }
            Association::Matrix2d(Matrix2dAssociation::SubColumn { sub_column_key, .. }) => {
                MappingTarget::SubColumn(sub_column_key.clone())
            }
            Association::Matrix2d(Matrix2dAssociation::SubRow { sub_row_key, .. }) => {
                MappingTarget::SubRow(sub_row_key.clone())
            }
            Association::Cell { sub_row_key, .. } => MappingTarget::Cell(sub_row_key.clone()),
            Association::Option { option_key } => MappingTarget::Option(option_key.clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MappingItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub client_id: String,
    /// Prediction tag id; absent for GEO widget mappings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    /// Server id of the widget
    pub widget: String,
    pub widget_type: WidgetKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub association: Option<Association>,
}

impl MappingItem {
    pub fn is_categorical(&self) -> bool {
        self.widget_type != WidgetKind::Geo
    }

    fn points_at(&self, widget: &str, target: &MappingTarget) -> bool {
        self.widget == widget && self.association.as_ref().map(Association::target).as_ref() == Some(target)
    }
}

/// What the user clicked: the leaf key of a sub-element
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MappingTarget {
    Cell(String),
    Column(String),
    SubColumn(String),
    SubRow(String),
    Option(String),
}

impl MappingTarget {
    pub fn key(&self) -> &str {
        match self {
            MappingTarget::Cell(k)
            | MappingTarget::Column(k)
            | MappingTarget::SubColumn(k)
            | MappingTarget::SubRow(k)
            | MappingTarget::Option(k) => k,
        }
    }

    /// Full association for `widget`, looking up the parent row or column
    pub fn resolve(&self, widget: &Widget) -> Result<Association, MappingError> {
        let unresolved = || MappingError::UnresolvedTarget {
            widget: widget.identity().to_string(),
            key: self.key().to_string(),
        };
        let mismatch = || MappingError::TargetMismatch {
            kind: widget.kind(),
            target: self.clone(),
        };

        match (&widget.properties, self) {
            (WidgetProperties::Matrix1d(p), MappingTarget::Cell(cell)) => {
                let row = p.row_of_cell(cell).ok_or_else(unresolved)?;
                Ok(Association::Cell {
                    row_key: row.key.clone(),
                    sub_row_key: cell.clone(),
                })
            }
            (WidgetProperties::Matrix2d(p), MappingTarget::Column(column)) => {
                if !p.columns.iter().any(|c| &c.key == column) {
                    return Err(unresolved());
                }
                Ok(Association::Matrix2d(Matrix2dAssociation::Column {
                    column_key: column.clone(),
                }))
            }
            (WidgetProperties::Matrix2d(p), MappingTarget::SubColumn(sub_column)) => {
                let column = p.column_of_sub_column(sub_column).ok_or_else(unresolved)?;
                Ok(Association::Matrix2d(Matrix2dAssociation::SubColumn {
                    column_key: column.key.clone(),
                    sub_column_key: sub_column.clone(),
                }))
            }
            (WidgetProperties::Matrix2d(p), MappingTarget::SubRow(sub_row)) => {
                let row = p.row_of_sub_row(sub_row).ok_or_else(unresolved)?;
                Ok(Association::Matrix2d(Matrix2dAssociation::SubRow {
                    row_key: row.key.clone(),
                    sub_row_key: sub_row.clone(),
                }))
            }
            (
                WidgetProperties::Scale(_)
                | WidgetProperties::Select(_)
                | WidgetProperties::MultiSelect(_)
                | WidgetProperties::Organigram(_),
                MappingTarget::Option(key),
            ) => {
                let exists = match &widget.properties {
                    WidgetProperties::Scale(p) => p.options.iter().any(|o| &o.key == key),
                    WidgetProperties::Select(p) => p.options.iter().any(|o| &o.key == key),
                    WidgetProperties::MultiSelect(p) => p.options.iter().any(|o| &o.key == key),
                    WidgetProperties::Organigram(p) => {
                        p.options.as_ref().and_then(|root| root.find(key)).is_some()
                    }
                    _ => false,
                };
                if !exists {
                    return Err(unresolved());
                }
                Ok(Association::Option {
                    option_key: key.clone(),
                })
            }
            _ if !widget.kind().supports_tag_mapping() => Err(MappingError::NotMappable(widget.kind())),
            _ => Err(mismatch()),
        }
    }
}

// ============================================================================
// Mapping list
// ============================================================================

/// Flat list of mappings in insertion order
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MappingList {
    pub items: Vec<MappingItem>,
}

fn server_id(widget: &Widget) -> Result<&str, MappingError> {
    widget
        .id
        .as_deref()
        .ok_or_else(|| MappingError::UnsavedWidget(widget.client_id.clone()))
}

impl MappingList {
    pub fn new(items: Vec<MappingItem>) -> Self {
        Self { items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn position(&self, widget: &str, target: &MappingTarget, tag: &str) -> Option<usize> {
        self.items
            .iter()
            .position(|m| m.tag.as_deref() == Some(tag) && m.points_at(widget, target))
    }

    /// Map `tag` to `target` of `widget`. Returns `Ok(false)` when the same
    /// mapping already exists; the list is unchanged on error.
    pub fn add(&mut self, widget: &Widget, target: &MappingTarget, tag: &str) -> Result<bool, MappingError> {
        let widget_pk = server_id(widget)?;
        if self.position(widget_pk, target, tag).is_some() {
            return Ok(false);
        }
        let association = target.resolve(widget)?;
        self.items.push(MappingItem {
            id: None,
            client_id: new_client_id(),
            tag: Some(tag.to_string()),
            widget: widget_pk.to_string(),
            widget_type: widget.kind(),
            association: Some(association),
        });
        Ok(true)
    }

    /// Remove the first mapping matching (`widget`, `target`, `tag`)
    pub fn remove(&mut self, widget: &Widget, target: &MappingTarget, tag: &str) -> bool {
        let Some(widget_pk) = widget.id.as_deref() else {
            return false;
        };
        match self.position(widget_pk, target, tag) {
            Some(index) => {
                self.items.remove(index);
                true
            }
            None => false,
        }
    }

    /// Remove the mapping if present, add it otherwise. Returns whether the
    /// mapping exists afterwards.
    pub fn toggle(&mut self, widget: &Widget, target: &MappingTarget, tag: &str) -> Result<bool, MappingError> {
        if self.remove(widget, target, tag) {
            return Ok(false);
        }
        self.add(widget, target, tag)?;
        Ok(true)
    }

    pub fn is_mapped(&self, widget: &Widget, target: &MappingTarget, tag: &str) -> bool {
        widget
            .id
            .as_deref()
            .map(|pk| self.position(pk, target, tag).is_some())
            .unwrap_or(false)
    }

    /// Number of tags mapped to `target`
    pub fn mapped_count(&self, widget: &Widget, target: &MappingTarget) -> usize {
        let Some(pk) = widget.id.as_deref() else {
            return 0;
        };
        self.items.iter().filter(|m| m.points_at(pk, target)).count()
    }

    /// Number of mappings using `tag`
    pub fn tag_count(&self, tag: &str) -> usize {
        self.items.iter().filter(|m| m.tag.as_deref() == Some(tag)).count()
    }

    /// Drop all mappings of `widget_pk` and append `items`
    pub fn replace_for_widget(&mut self, widget_pk: &str, items: Vec<MappingItem>) {
        self.items.retain(|m| m.widget != widget_pk);
        self.items.extend(items);
    }

    /// GEO widgets are mapped as a whole. Returns whether the widget is
    /// mapped afterwards.
    pub fn toggle_geo_widget(&mut self, widget: &Widget) -> Result<bool, MappingError> {
        if widget.kind() != WidgetKind::Geo {
            return Err(MappingError::NotMappable(widget.kind()));
        }
        let widget_pk = server_id(widget)?;
        if self.items.iter().any(|m| m.widget == widget_pk) {
            self.items.retain(|m| m.widget != widget_pk);
            return Ok(false);
        }
        self.items.push(MappingItem {
            id: None,
            client_id: new_client_id(),
            tag: None,
            widget: widget_pk.to_string(),
            widget_type: WidgetKind::Geo,
            association: None,
        });
        Ok(true)
    }

    pub fn is_geo_widget_mapped(&self, widget_pk: &str) -> bool {
        self.items
            .iter()
            .any(|m| m.widget == widget_pk && m.widget_type == WidgetKind::Geo)
    }

    /// Share of `possible` sub-elements with at least one mapping, as a
    /// percentage rounded to two decimals
    pub fn coverage(&self, possible: &[PossibleMapping]) -> f64 {
        if possible.is_empty() {
            return 0.0;
        }
        let mapped = possible
            .iter()
            .filter(|p| {
                self.items.iter().any(|m| {
                    m.is_categorical() && m.widget == p.widget && m.association.as_ref() == Some(&p.association)
                })
            })
            .count();
        (mapped as f64 / possible.len() as f64 * 10000.0).round() / 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_widget::WidgetRecord;
    use crate::domain::a003_mapping::possible_mappings;
    use serde_json::json;

    fn widget(id: &str, kind: &str, properties: serde_json::Value) -> Widget {
        WidgetRecord {
            id: Some(id.into()),
            client_id: format!("client-{}", id),
            title: kind.into(),
            widget_id: kind.into(),
            properties: Some(properties),
            ..Default::default()
        }
        .resolve()
        .unwrap()
    }

    fn matrix1d() -> Widget {
        widget(
            "13",
            "MATRIX1D",
            json!({"rows": [
                {"key": "row-1", "label": "Row 1", "order": 1, "cells": [
                    {"key": "cell-1", "label": "Cell 1", "order": 1}
                ]},
                {"key": "row-2", "label": "Row 2", "order": 2, "cells": [
                    {"key": "cell-2", "label": "Cell 2", "order": 1}
                ]}
            ]}),
        )
    }

    fn matrix2d() -> Widget {
        widget(
            "12",
            "MATRIX2D",
            json!({
                "rows": [{"key": "row-1", "label": "Row 1", "order": 1,
                          "subRows": [{"key": "sub-row-1", "label": "Sub Row 1", "order": 1}]}],
                "columns": [{"key": "column-1", "label": "Column 1", "order": 1,
                             "subColumns": [{"key": "sub-col-1", "label": "Sub Col 1", "order": 1}]}]
            }),
        )
    }

    #[test]
    fn test_add_is_idempotent() {
        let w = matrix1d();
        let target = MappingTarget::Cell("cell-2".into());
        let mut list = MappingList::default();
        assert_eq!(list.add(&w, &target, "tag-1"), Ok(true));
        assert_eq!(list.add(&w, &target, "tag-1"), Ok(false));
        assert_eq!(list.len(), 1);
        assert_eq!(
            list.items[0].association,
            Some(Association::Cell {
                row_key: "row-2".into(),
                sub_row_key: "cell-2".into()
            })
        );
    }

    #[test]
    fn test_remove_missing_keeps_length() {
        let w = matrix1d();
        let mut list = MappingList::default();
        list.add(&w, &MappingTarget::Cell("cell-1".into()), "tag-1").unwrap();
        assert!(!list.remove(&w, &MappingTarget::Cell("cell-1".into()), "tag-2"));
        assert!(!list.remove(&w, &MappingTarget::Cell("cell-2".into()), "tag-1"));
        assert_eq!(list.len(), 1);
        assert!(list.remove(&w, &MappingTarget::Cell("cell-1".into()), "tag-1"));
        assert!(list.is_empty());
    }

    #[test]
    fn test_insertion_order_is_kept() {
        let w = matrix2d();
        let mut list = MappingList::default();
        list.add(&w, &MappingTarget::SubRow("sub-row-1".into()), "b").unwrap();
        list.add(&w, &MappingTarget::Column("column-1".into()), "a").unwrap();
        list.add(&w, &MappingTarget::SubColumn("sub-col-1".into()), "c").unwrap();
        let tags: Vec<&str> = list.items.iter().filter_map(|m| m.tag.as_deref()).collect();
        assert_eq!(tags, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_unresolvable_target_is_reported() {
        let w = matrix2d();
        let mut list = MappingList::default();
        let err = list
            .add(&w, &MappingTarget::SubRow("nowhere".into()), "tag-1")
            .unwrap_err();
        assert_eq!(
            err,
            MappingError::UnresolvedTarget {
                widget: "12".into(),
                key: "nowhere".into()
            }
        );
        assert!(list.is_empty());

        let err = list.add(&w, &MappingTarget::Cell("x".into()), "tag-1").unwrap_err();
        assert!(matches!(err, MappingError::TargetMismatch { .. }));
    }

    #[test]
    fn test_unsaved_and_unmappable_widgets() {
        let mut w = matrix1d();
        w.id = None;
        let mut list = MappingList::default();
        assert!(matches!(
            list.add(&w, &MappingTarget::Cell("cell-1".into()), "t"),
            Err(MappingError::UnsavedWidget(_))
        ));

        let text = widget("20", "TEXT", json!({}));
        assert_eq!(
            list.add(&text, &MappingTarget::Option("x".into()), "t"),
            Err(MappingError::NotMappable(WidgetKind::Text))
        );
    }

    #[test]
    fn test_toggle_and_counts() {
        let w = matrix2d();
        let column = MappingTarget::Column("column-1".into());
        let mut list = MappingList::default();
        assert_eq!(list.toggle(&w, &column, "a"), Ok(true));
        assert_eq!(list.toggle(&w, &column, "b"), Ok(true));
        assert!(list.is_mapped(&w, &column, "a"));
        assert_eq!(list.mapped_count(&w, &column), 2);
        assert_eq!(list.tag_count("a"), 1);
        assert_eq!(list.toggle(&w, &column, "a"), Ok(false));
        assert!(!list.is_mapped(&w, &column, "a"));
        assert_eq!(list.mapped_count(&w, &column), 1);
    }

    #[test]
    fn test_geo_widget_toggle() {
        let geo = widget("30", "GEO", json!({}));
        let mut list = MappingList::default();
        assert_eq!(list.toggle_geo_widget(&geo), Ok(true));
        assert!(list.is_geo_widget_mapped("30"));
        assert_eq!(list.toggle_geo_widget(&geo), Ok(false));
        assert!(list.is_empty());
    }

    #[test]
    fn test_replace_for_widget() {
        let w1 = matrix1d();
        let w2 = matrix2d();
        let mut list = MappingList::default();
        list.add(&w1, &MappingTarget::Cell("cell-1".into()), "a").unwrap();
        list.add(&w2, &MappingTarget::Column("column-1".into()), "a").unwrap();

        let mut other = MappingList::default();
        other.add(&w1, &MappingTarget::Cell("cell-2".into()), "b").unwrap();
        list.replace_for_widget("13", other.items);

        assert_eq!(list.len(), 2);
        assert_eq!(list.items[0].widget, "12");
        assert_eq!(list.items[1].tag.as_deref(), Some("b"));
    }

    #[test]
    fn test_coverage() {
        let w = matrix1d();
        let possible = possible_mappings(&w);
        let mut list = MappingList::default();
        assert_eq!(list.coverage(&possible), 0.0);
        list.add(&w, &MappingTarget::Cell("cell-1".into()), "a").unwrap();
        list.add(&w, &MappingTarget::Cell("cell-1".into()), "b").unwrap();
        assert_eq!(list.coverage(&possible), 50.0);
        assert_eq!(list.coverage(&[]), 0.0);
    }

    #[test]
    fn test_wire_format() {
        let raw = json!([
            {"clientId": "m1", "tag": "t1", "widget": "12", "widgetType": "MATRIX2D",
             "association": {"type": "SUB_COLUMN", "columnKey": "column-1", "subColumnKey": "sub-col-1"}},
            {"clientId": "m2", "tag": "t1", "widget": "13", "widgetType": "MATRIX1D",
             "association": {"rowKey": "row-1", "subRowKey": "cell-1"}},
            {"clientId": "m3", "tag": "t2", "widget": "14", "widgetType": "SCALE",
             "association": {"optionKey": "option-1"}},
            {"clientId": "m4", "widget": "30", "widgetType": "GEO"}
        ]);
        let list: MappingList = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(
            list.items[0].association,
            Some(Association::Matrix2d(Matrix2dAssociation::SubColumn {
                column_key: "column-1".into(),
                sub_column_key: "sub-col-1".into()
            }))
        );
        assert!(matches!(list.items[1].association, Some(Association::Cell { .. })));
        assert!(!list.items[3].is_categorical());
        assert_eq!(serde_json::to_value(&list).unwrap(), raw);
    }
}
