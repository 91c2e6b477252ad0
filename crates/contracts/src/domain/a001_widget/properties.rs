//! Kind-specific widget configuration (`properties`) and the edit operations
//! the editors perform on it.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::items::{
    ChoiceOption, Matrix1dCell, Matrix1dRow, Matrix2dColumn, Matrix2dRow, Matrix2dSubItem,
    OrganigramNode, ScaleOption,
};
use super::value::{DateRangeValue, TimeRangeValue};
use crate::domain::common::list_item::{find_item_mut, move_item, push_item, remove_item};
use crate::domain::common::ListItem;
use crate::enums::WidgetKind;
use crate::shared::lenient::or_default;

pub const MATRIX1D_ROWS_LIMIT: usize = 20;
pub const MATRIX1D_CELLS_LIMIT: usize = 30;
pub const MATRIX2D_ROWS_LIMIT: usize = 20;
pub const MATRIX2D_SUB_ROWS_LIMIT: usize = 30;
pub const MATRIX2D_COLUMNS_LIMIT: usize = 20;
pub const MATRIX2D_SUB_COLUMNS_LIMIT: usize = 30;
pub const SCALE_OPTIONS_LIMIT: usize = 20;
pub const CHOICE_OPTIONS_LIMIT: usize = 100;
pub const ORGANIGRAM_NODES_LIMIT: usize = 100;

// ============================================================================
// Numeric input
// ============================================================================

/// Numeric configuration field as entered by the user.
///
/// Text that is not a finite number is kept as `Raw` so validation can
/// reject it; it is never coerced into NaN or silently dropped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumericField {
    Number(f64),
    Raw(String),
}

impl NumericField {
    /// Interpret editor text. Blank text means "not set".
    pub fn from_input(text: &str) -> Option<Self> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return None;
        }
        match trimmed.parse::<f64>() {
            Ok(n) if n.is_finite() => Some(NumericField::Number(n)),
            _ => Some(NumericField::Raw(text.to_string())),
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            NumericField::Number(n) if n.is_finite() => Some(*n),
            _ => None,
        }
    }

    /// Text shown back in the editor
    pub fn to_input(&self) -> String {
        match self {
            NumericField::Number(n) => n.to_string(),
            NumericField::Raw(s) => s.clone(),
        }
    }
}

// ============================================================================
// Properties per kind
// ============================================================================

/// Properties of kinds whose only configuration is an optional default value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseProperties<T> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<T>,
}

impl<T> Default for BaseProperties<T> {
    fn default() -> Self {
        Self { default_value: None }
    }
}

pub type TextProperties = BaseProperties<String>;
pub type DateProperties = BaseProperties<String>;
pub type TimeProperties = BaseProperties<String>;
pub type DateRangeProperties = BaseProperties<DateRangeValue>;
pub type TimeRangeProperties = BaseProperties<TimeRangeValue>;
pub type GeoProperties = BaseProperties<Vec<String>>;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NumberProperties {
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "or_default")]
    pub min_value: Option<NumericField>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "or_default")]
    pub max_value: Option<NumericField>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "or_default")]
    pub default_value: Option<NumericField>,
}

impl NumberProperties {
    pub fn min(&self) -> Option<f64> {
        self.min_value.as_ref().and_then(NumericField::as_number)
    }

    pub fn max(&self) -> Option<f64> {
        self.max_value.as_ref().and_then(NumericField::as_number)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScaleProperties {
    /// Key of the default point. A single field, so at most one point is default.
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "or_default")]
    pub default_value: Option<String>,
    #[serde(deserialize_with = "or_default")]
    pub options: Vec<ScaleOption>,
}

impl ScaleProperties {
    pub fn add_option(&mut self) -> Option<String> {
        let option = ScaleOption::new();
        let key = option.key.clone();
        push_item(&mut self.options, option, SCALE_OPTIONS_LIMIT).then_some(key)
    }

    /// Remove a point; removing the default point clears the default
    pub fn remove_option(&mut self, key: &str) -> bool {
        if self.default_value.as_deref() == Some(key) {
            self.default_value = None;
        }
        remove_item(&mut self.options, key).is_some()
    }

    pub fn option_mut(&mut self, key: &str) -> Option<&mut ScaleOption> {
        find_item_mut(&mut self.options, key)
    }

    /// Make `key` the default point, replacing any previous default
    pub fn set_default(&mut self, key: &str) -> bool {
        if !self.options.iter().any(|o| o.key == key) {
            return false;
        }
        self.default_value = Some(key.to_string());
        true
    }

    pub fn clear_default(&mut self) {
        self.default_value = None;
    }

    pub fn is_default(&self, key: &str) -> bool {
        self.default_value.as_deref() == Some(key)
    }

    pub fn default_option(&self) -> Option<&ScaleOption> {
        let key = self.default_value.as_deref()?;
        self.options.iter().find(|o| o.key == key)
    }
}

/// SELECT and MULTISELECT share the option list; they differ in the default value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", bound(deserialize = "D: DeserializeOwned"))]
pub struct ChoiceProperties<D> {
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "or_default")]
    pub default_value: Option<D>,
    #[serde(default, deserialize_with = "or_default")]
    pub options: Vec<ChoiceOption>,
}

impl<D> Default for ChoiceProperties<D> {
    fn default() -> Self {
        Self {
            default_value: None,
            options: Vec::new(),
        }
    }
}

impl<D> ChoiceProperties<D> {
    pub fn add_option(&mut self) -> Option<String> {
        let option = ChoiceOption::new();
        let key = option.key.clone();
        push_item(&mut self.options, option, CHOICE_OPTIONS_LIMIT).then_some(key)
    }

    pub fn option_mut(&mut self, key: &str) -> Option<&mut ChoiceOption> {
        find_item_mut(&mut self.options, key)
    }

    pub fn move_option(&mut self, from: usize, to: usize) -> bool {
        move_item(&mut self.options, from, to)
    }
}

pub type SelectProperties = ChoiceProperties<String>;
pub type MultiSelectProperties = ChoiceProperties<Vec<String>>;

impl SelectProperties {
    pub fn remove_option(&mut self, key: &str) -> bool {
        if self.default_value.as_deref() == Some(key) {
            self.default_value = None;
        }
        remove_item(&mut self.options, key).is_some()
    }
}

impl MultiSelectProperties {
    pub fn remove_option(&mut self, key: &str) -> bool {
        if let Some(defaults) = self.default_value.as_mut() {
            defaults.retain(|k| k != key);
        }
        remove_item(&mut self.options, key).is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Matrix1dProperties {
    #[serde(deserialize_with = "or_default")]
    pub rows: Vec<Matrix1dRow>,
}

impl Matrix1dProperties {
    /// Append a row; returns its client id, or `None` at the limit
    pub fn add_row(&mut self) -> Option<String> {
        let row = Matrix1dRow::new();
        let id = row.client_id.clone();
        push_item(&mut self.rows, row, MATRIX1D_ROWS_LIMIT).then_some(id)
    }

    pub fn remove_row(&mut self, row: &str) -> bool {
        remove_item(&mut self.rows, row).is_some()
    }

    pub fn move_row(&mut self, from: usize, to: usize) -> bool {
        move_item(&mut self.rows, from, to)
    }

    pub fn row_mut(&mut self, row: &str) -> Option<&mut Matrix1dRow> {
        find_item_mut(&mut self.rows, row)
    }

    pub fn add_cell(&mut self, row: &str) -> Option<String> {
        let row = self.row_mut(row)?;
        let cell = Matrix1dCell::new();
        let id = cell.client_id.clone();
        push_item(&mut row.cells, cell, MATRIX1D_CELLS_LIMIT).then_some(id)
    }

    pub fn remove_cell(&mut self, row: &str, cell: &str) -> bool {
        match self.row_mut(row) {
            Some(row) => remove_item(&mut row.cells, cell).is_some(),
            None => false,
        }
    }

    pub fn cell_mut(&mut self, row: &str, cell: &str) -> Option<&mut Matrix1dCell> {
        find_item_mut(&mut self.row_mut(row)?.cells, cell)
    }

    /// Row owning the cell with semantic key `cell_key`
    pub fn row_of_cell(&self, cell_key: &str) -> Option<&Matrix1dRow> {
        self.rows
            .iter()
            .find(|row| row.cells.iter().any(|cell| cell.key == cell_key))
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Matrix2dProperties {
    #[serde(deserialize_with = "or_default")]
    pub rows: Vec<Matrix2dRow>,
    #[serde(deserialize_with = "or_default")]
    pub columns: Vec<Matrix2dColumn>,
}

impl Matrix2dProperties {
    pub fn add_row(&mut self) -> Option<String> {
        let row = Matrix2dRow::new();
        let id = row.client_id.clone();
        push_item(&mut self.rows, row, MATRIX2D_ROWS_LIMIT).then_some(id)
    }

    pub fn remove_row(&mut self, row: &str) -> bool {
        remove_item(&mut self.rows, row).is_some()
    }

    pub fn row_mut(&mut self, row: &str) -> Option<&mut Matrix2dRow> {
        find_item_mut(&mut self.rows, row)
    }

    pub fn add_sub_row(&mut self, row: &str) -> Option<String> {
        let row = self.row_mut(row)?;
        let sub_row = Matrix2dSubItem::new();
        let id = sub_row.client_id.clone();
        push_item(&mut row.sub_rows, sub_row, MATRIX2D_SUB_ROWS_LIMIT).then_some(id)
    }

    pub fn remove_sub_row(&mut self, row: &str, sub_row: &str) -> bool {
        match self.row_mut(row) {
            Some(row) => remove_item(&mut row.sub_rows, sub_row).is_some(),
            None => false,
        }
    }

    pub fn add_column(&mut self) -> Option<String> {
        let column = Matrix2dColumn::new();
        let id = column.client_id.clone();
        push_item(&mut self.columns, column, MATRIX2D_COLUMNS_LIMIT).then_some(id)
    }

    pub fn remove_column(&mut self, column: &str) -> bool {
        remove_item(&mut self.columns, column).is_some()
    }

    pub fn column_mut(&mut self, column: &str) -> Option<&mut Matrix2dColumn> {
        find_item_mut(&mut self.columns, column)
    }

    pub fn add_sub_column(&mut self, column: &str) -> Option<String> {
        let column = self.column_mut(column)?;
        let sub_column = Matrix2dSubItem::new();
        let id = sub_column.client_id.clone();
        push_item(&mut column.sub_columns, sub_column, MATRIX2D_SUB_COLUMNS_LIMIT).then_some(id)
    }

    pub fn remove_sub_column(&mut self, column: &str, sub_column: &str) -> bool {
        match self.column_mut(column) {
            Some(column) => remove_item(&mut column.sub_columns, sub_column).is_some(),
            None => false,
        }
    }

    pub fn row_of_sub_row(&self, sub_row_key: &str) -> Option<&Matrix2dRow> {
        self.rows
            .iter()
            .find(|row| row.sub_rows.iter().any(|s| s.key == sub_row_key))
    }

    pub fn column_of_sub_column(&self, sub_column_key: &str) -> Option<&Matrix2dColumn> {
        self.columns
            .iter()
            .find(|column| column.sub_columns.iter().any(|s| s.key == sub_column_key))
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OrganigramProperties {
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "or_default")]
    pub default_value: Option<Vec<String>>,
    /// Root of the organigram tree
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "or_default")]
    pub options: Option<OrganigramNode>,
}

impl OrganigramProperties {
    pub fn root_mut(&mut self) -> &mut OrganigramNode {
        self.options.get_or_insert_with(|| {
            let mut root = OrganigramNode::new();
            root.order = 0;
            root
        })
    }

    pub fn node_count(&self) -> usize {
        self.options.as_ref().map(OrganigramNode::node_count).unwrap_or(0)
    }

    /// Add a child under the node with key `parent`
    pub fn add_child(&mut self, parent: &str) -> Option<String> {
        if self.node_count() >= ORGANIGRAM_NODES_LIMIT {
            return None;
        }
        let parent = self.options.as_mut()?.find_mut(parent)?;
        let child = OrganigramNode::new();
        let key = child.key.clone();
        push_item(&mut parent.children, child, ORGANIGRAM_NODES_LIMIT).then_some(key)
    }

    /// Remove the node with key `key` and its subtree; removing the root clears the tree
    pub fn remove_node(&mut self, key: &str) -> bool {
        let Some(root) = self.options.as_mut() else {
            return false;
        };
        if root.key == key {
            self.options = None;
            return true;
        }
        remove_descendant(root, key)
    }
}

fn remove_descendant(node: &mut OrganigramNode, key: &str) -> bool {
    if let Some(index) = node.children.iter().position(|c| c.key == key) {
        let item_key = node.children[index].item_key().to_string();
        remove_item(&mut node.children, &item_key);
        return true;
    }
    node.children.iter_mut().any(|c| remove_descendant(c, key))
}

// ============================================================================
// Closed sum over kinds
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum WidgetProperties {
    Text(TextProperties),
    Number(NumberProperties),
    Date(DateProperties),
    Time(TimeProperties),
    DateRange(DateRangeProperties),
    TimeRange(TimeRangeProperties),
    Scale(ScaleProperties),
    Select(SelectProperties),
    MultiSelect(MultiSelectProperties),
    Matrix1d(Matrix1dProperties),
    Matrix2d(Matrix2dProperties),
    Organigram(OrganigramProperties),
    Geo(GeoProperties),
}

impl WidgetProperties {
    pub fn kind(&self) -> WidgetKind {
        match self {
            WidgetProperties::Text(_) => WidgetKind::Text,
            WidgetProperties::Number(_) => WidgetKind::Number,
            WidgetProperties::Date(_) => WidgetKind::Date,
            WidgetProperties::Time(_) => WidgetKind::Time,
            WidgetProperties::DateRange(_) => WidgetKind::DateRange,
            WidgetProperties::TimeRange(_) => WidgetKind::TimeRange,
            WidgetProperties::Scale(_) => WidgetKind::Scale,
            WidgetProperties::Select(_) => WidgetKind::Select,
            WidgetProperties::MultiSelect(_) => WidgetKind::MultiSelect,
            WidgetProperties::Matrix1d(_) => WidgetKind::Matrix1d,
            WidgetProperties::Matrix2d(_) => WidgetKind::Matrix2d,
            WidgetProperties::Organigram(_) => WidgetKind::Organigram,
            WidgetProperties::Geo(_) => WidgetKind::Geo,
        }
    }

    /// Empty configuration of a kind
    pub fn default_for(kind: WidgetKind) -> Self {
        match kind {
            WidgetKind::Text => WidgetProperties::Text(Default::default()),
            WidgetKind::Number => WidgetProperties::Number(Default::default()),
            WidgetKind::Date => WidgetProperties::Date(Default::default()),
            WidgetKind::Time => WidgetProperties::Time(Default::default()),
            WidgetKind::DateRange => WidgetProperties::DateRange(Default::default()),
            WidgetKind::TimeRange => WidgetProperties::TimeRange(Default::default()),
            WidgetKind::Scale => WidgetProperties::Scale(Default::default()),
            WidgetKind::Select => WidgetProperties::Select(Default::default()),
            WidgetKind::MultiSelect => WidgetProperties::MultiSelect(Default::default()),
            WidgetKind::Matrix1d => WidgetProperties::Matrix1d(Default::default()),
            WidgetKind::Matrix2d => WidgetProperties::Matrix2d(Default::default()),
            WidgetKind::Organigram => WidgetProperties::Organigram(Default::default()),
            WidgetKind::Geo => WidgetProperties::Geo(Default::default()),
        }
    }

    /// Parse the wire `properties` object of a kind. Missing or `null`
    /// properties give the empty configuration. Malformed fields inside the
    /// object fall back one by one; anything other than an object is an error.
    pub fn from_json(
        kind: WidgetKind,
        json: Option<&serde_json::Value>,
    ) -> Result<Self, serde_json::Error> {
        let json = match json {
            None | Some(serde_json::Value::Null) => return Ok(Self::default_for(kind)),
            Some(json @ serde_json::Value::Object(_)) => json.clone(),
            Some(other) => {
                return Err(serde::de::Error::custom(format!(
                    "expected properties object, got {}",
                    other
                )))
            }
        };
        Ok(match kind {
            WidgetKind::Text => WidgetProperties::Text(serde_json::from_value(json)?),
            WidgetKind::Number => WidgetProperties::Number(serde_json::from_value(json)?),
            WidgetKind::Date => WidgetProperties::Date(serde_json::from_value(json)?),
            WidgetKind::Time => WidgetProperties::Time(serde_json::from_value(json)?),
            WidgetKind::DateRange => WidgetProperties::DateRange(serde_json::from_value(json)?),
            WidgetKind::TimeRange => WidgetProperties::TimeRange(serde_json::from_value(json)?),
            WidgetKind::Scale => WidgetProperties::Scale(serde_json::from_value(json)?),
            WidgetKind::Select => WidgetProperties::Select(serde_json::from_value(json)?),
            WidgetKind::MultiSelect => WidgetProperties::MultiSelect(serde_json::from_value(json)?),
            WidgetKind::Matrix1d => WidgetProperties::Matrix1d(serde_json::from_value(json)?),
            WidgetKind::Matrix2d => WidgetProperties::Matrix2d(serde_json::from_value(json)?),
            WidgetKind::Organigram => WidgetProperties::Organigram(serde_json::from_value(json)?),
            WidgetKind::Geo => WidgetProperties::Geo(serde_json::from_value(json)?),
        })
    }

    pub fn to_json(&self) -> serde_json::Value {
        let json = match self {
            WidgetProperties::Text(p) => serde_json::to_value(p),
            WidgetProperties::Number(p) => serde_json::to_value(p),
            WidgetProperties::Date(p) => serde_json::to_value(p),
            WidgetProperties::Time(p) => serde_json::to_value(p),
            WidgetProperties::DateRange(p) => serde_json::to_value(p),
            WidgetProperties::TimeRange(p) => serde_json::to_value(p),
            WidgetProperties::Scale(p) => serde_json::to_value(p),
            WidgetProperties::Select(p) => serde_json::to_value(p),
            WidgetProperties::MultiSelect(p) => serde_json::to_value(p),
            WidgetProperties::Matrix1d(p) => serde_json::to_value(p),
            WidgetProperties::Matrix2d(p) => serde_json::to_value(p),
            WidgetProperties::Organigram(p) => serde_json::to_value(p),
            WidgetProperties::Geo(p) => serde_json::to_value(p),
        };
        json.unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::common::list_item::is_dense;
    use serde_json::json;

    #[test]
    fn test_numeric_field_keeps_raw_text() {
        assert_eq!(NumericField::from_input(""), None);
        assert_eq!(NumericField::from_input(" 12.5 "), Some(NumericField::Number(12.5)));
        assert_eq!(
            NumericField::from_input("12a"),
            Some(NumericField::Raw("12a".into()))
        );
        assert_eq!(
            NumericField::from_input("NaN"),
            Some(NumericField::Raw("NaN".into()))
        );
    }

    #[test]
    fn test_matrix1d_rows_stay_dense_after_removal() {
        let mut props = Matrix1dProperties::default();
        let ids: Vec<String> = (0..4).filter_map(|_| props.add_row()).collect();
        assert_eq!(ids.len(), 4);
        assert!(props.remove_row(&ids[1]));
        assert!(is_dense(&props.rows));
        assert_eq!(props.rows.len(), 3);

        let cell_ids: Vec<String> = (0..3).filter_map(|_| props.add_cell(&ids[0])).collect();
        assert!(props.remove_cell(&ids[0], &cell_ids[0]));
        assert!(is_dense(&props.rows[0].cells));
    }

    #[test]
    fn test_matrix1d_row_limit() {
        let mut props = Matrix1dProperties::default();
        for _ in 0..MATRIX1D_ROWS_LIMIT {
            assert!(props.add_row().is_some());
        }
        assert!(props.add_row().is_none());
        assert_eq!(props.rows.len(), MATRIX1D_ROWS_LIMIT);
    }

    #[test]
    fn test_scale_default_is_exclusive() {
        let mut props = ScaleProperties::default();
        let p1 = props.add_option().unwrap();
        let p2 = props.add_option().unwrap();
        let p3 = props.add_option().unwrap();

        assert!(props.set_default(&p1));
        assert!(props.set_default(&p2));
        let defaults: Vec<_> = props.options.iter().filter(|o| props.is_default(&o.key)).collect();
        assert_eq!(defaults.len(), 1);
        assert_eq!(defaults[0].key, p2);
        assert!(!props.is_default(&p3));

        assert!(!props.set_default("missing"));
        assert_eq!(props.default_value.as_deref(), Some(p2.as_str()));
    }

    #[test]
    fn test_removing_default_scale_point_clears_default() {
        let mut props = ScaleProperties::default();
        let p1 = props.add_option().unwrap();
        props.set_default(&p1);
        assert!(props.remove_option(&p1));
        assert!(props.default_value.is_none());
    }

    #[test]
    fn test_organigram_tree_edit() {
        let mut props = OrganigramProperties::default();
        let root_key = props.root_mut().key.clone();
        let child = props.add_child(&root_key).unwrap();
        let grandchild = props.add_child(&child).unwrap();
        assert_eq!(props.node_count(), 3);
        assert!(props.remove_node(&child));
        assert_eq!(props.node_count(), 1);
        assert!(!props.remove_node(&grandchild));
        assert!(props.remove_node(&root_key));
        assert!(props.options.is_none());
    }

    #[test]
    fn test_missing_properties_default_to_empty() {
        let props = WidgetProperties::from_json(WidgetKind::Matrix1d, None).unwrap();
        assert_eq!(props, WidgetProperties::Matrix1d(Matrix1dProperties::default()));

        let props =
            WidgetProperties::from_json(WidgetKind::Scale, Some(&serde_json::Value::Null)).unwrap();
        assert_eq!(props.kind(), WidgetKind::Scale);
    }

    #[test]
    fn test_partial_properties_parse() {
        let json = json!({"rows": [{"key": "r1", "label": "Row 1"}]});
        let props = WidgetProperties::from_json(WidgetKind::Matrix1d, Some(&json)).unwrap();
        match props {
            WidgetProperties::Matrix1d(p) => {
                assert_eq!(p.rows[0].label, "Row 1");
                assert!(p.rows[0].cells.is_empty());
                assert_eq!(p.rows[0].item_key(), "r1");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_null_nested_fields_keep_the_rest_of_the_config() {
        let json = json!({
            "rows": [
                {"clientId": "r1", "key": "r1", "label": "Row 1", "color": "#fff",
                 "cells": [{"clientId": "c1", "key": "c1", "label": "Cell"}]},
                {"clientId": "r2", "key": "r2", "label": null, "color": null, "cells": null}
            ]
        });
        let props = WidgetProperties::from_json(WidgetKind::Matrix1d, Some(&json)).unwrap();
        let WidgetProperties::Matrix1d(p) = props else {
            panic!("expected matrix1d");
        };
        assert_eq!(p.rows.len(), 2);
        assert_eq!(p.rows[0].cells[0].label, "Cell");
        assert_eq!(p.rows[1].key, "r2");
        assert_eq!(p.rows[1].label, "");
        assert_eq!(p.rows[1].color, "");
        assert!(p.rows[1].cells.is_empty());
    }

    #[test]
    fn test_null_organigram_children_keep_the_tree() {
        let json = json!({
            "options": {
                "clientId": "root", "key": "root", "label": "Org",
                "children": [{"clientId": "n1", "key": "n1", "label": "Unit", "children": null}]
            }
        });
        let props = WidgetProperties::from_json(WidgetKind::Organigram, Some(&json)).unwrap();
        let WidgetProperties::Organigram(p) = props else {
            panic!("expected organigram");
        };
        assert_eq!(p.node_count(), 2);
        assert!(p.options.as_ref().and_then(|root| root.find("n1")).is_some());
    }

    #[test]
    fn test_mistyped_field_defaults_alone() {
        let json = json!({
            "defaultValue": 42,
            "options": [{"key": "a", "label": "A", "order": null}]
        });
        let props = WidgetProperties::from_json(WidgetKind::Select, Some(&json)).unwrap();
        let WidgetProperties::Select(p) = props else {
            panic!("expected select");
        };
        assert!(p.default_value.is_none());
        assert_eq!(p.options.len(), 1);
        assert_eq!(p.options[0].order, 0);
    }

    #[test]
    fn test_non_object_properties_are_rejected() {
        let json = json!([1, 2]);
        assert!(WidgetProperties::from_json(WidgetKind::Matrix1d, Some(&json)).is_err());
    }

    #[test]
    fn test_number_properties_wire_shape() {
        let json = json!({"minValue": 1, "maxValue": "abc"});
        let props: NumberProperties = serde_json::from_value(json).unwrap();
        assert_eq!(props.min(), Some(1.0));
        assert_eq!(props.max(), None);
        assert_eq!(props.max_value, Some(NumericField::Raw("abc".into())));
    }
}
