//! Sub-elements of widget configurations (options, rows, cells, nodes)

use serde::{Deserialize, Serialize};

use crate::domain::common::{new_client_id, new_item_key, ListItem};
use crate::shared::lenient::or_default;

// ============================================================================
// Options
// ============================================================================

/// Option of a SELECT / MULTISELECT widget
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChoiceOption {
    #[serde(deserialize_with = "or_default")]
    pub key: String,
    #[serde(deserialize_with = "or_default")]
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "or_default")]
    pub tooltip: Option<String>,
    #[serde(deserialize_with = "or_default")]
    pub order: i32,
}

impl ChoiceOption {
    pub fn new() -> Self {
        Self {
            key: new_item_key(),
            order: -1,
            ..Default::default()
        }
    }
}

/// Point of a SCALE widget
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScaleOption {
    #[serde(deserialize_with = "or_default")]
    pub key: String,
    #[serde(deserialize_with = "or_default")]
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "or_default")]
    pub tooltip: Option<String>,
    #[serde(deserialize_with = "or_default")]
    pub order: i32,
    #[serde(deserialize_with = "or_default")]
    pub color: String,
}

impl ScaleOption {
    pub fn new() -> Self {
        Self {
            key: new_item_key(),
            order: -1,
            ..Default::default()
        }
    }
}

// ============================================================================
// Matrix 1D
// ============================================================================

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Matrix1dCell {
    #[serde(deserialize_with = "or_default")]
    pub client_id: String,
    #[serde(deserialize_with = "or_default")]
    pub key: String,
    #[serde(deserialize_with = "or_default")]
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "or_default")]
    pub tooltip: Option<String>,
    #[serde(deserialize_with = "or_default")]
    pub order: i32,
}

impl Matrix1dCell {
    pub fn new() -> Self {
        Self {
            client_id: new_client_id(),
            key: new_item_key(),
            order: -1,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Matrix1dRow {
    #[serde(deserialize_with = "or_default")]
    pub client_id: String,
    #[serde(deserialize_with = "or_default")]
    pub key: String,
    #[serde(deserialize_with = "or_default")]
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "or_default")]
    pub tooltip: Option<String>,
    #[serde(deserialize_with = "or_default")]
    pub order: i32,
    #[serde(deserialize_with = "or_default")]
    pub color: String,
    #[serde(deserialize_with = "or_default")]
    pub cells: Vec<Matrix1dCell>,
}

impl Matrix1dRow {
    pub fn new() -> Self {
        Self {
            client_id: new_client_id(),
            key: new_item_key(),
            order: -1,
            ..Default::default()
        }
    }
}

// ============================================================================
// Matrix 2D
// ============================================================================

/// Sub-row or sub-column of a MATRIX2D widget
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Matrix2dSubItem {
    #[serde(deserialize_with = "or_default")]
    pub client_id: String,
    #[serde(deserialize_with = "or_default")]
    pub key: String,
    #[serde(deserialize_with = "or_default")]
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "or_default")]
    pub tooltip: Option<String>,
    #[serde(deserialize_with = "or_default")]
    pub order: i32,
}

impl Matrix2dSubItem {
    pub fn new() -> Self {
        Self {
            client_id: new_client_id(),
            key: new_item_key(),
            order: -1,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Matrix2dRow {
    #[serde(deserialize_with = "or_default")]
    pub client_id: String,
    #[serde(deserialize_with = "or_default")]
    pub key: String,
    #[serde(deserialize_with = "or_default")]
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "or_default")]
    pub tooltip: Option<String>,
    #[serde(deserialize_with = "or_default")]
    pub order: i32,
    #[serde(deserialize_with = "or_default")]
    pub color: String,
    #[serde(deserialize_with = "or_default")]
    pub sub_rows: Vec<Matrix2dSubItem>,
}

impl Matrix2dRow {
    pub fn new() -> Self {
        Self {
            client_id: new_client_id(),
            key: new_item_key(),
            order: -1,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Matrix2dColumn {
    #[serde(deserialize_with = "or_default")]
    pub client_id: String,
    #[serde(deserialize_with = "or_default")]
    pub key: String,
    #[serde(deserialize_with = "or_default")]
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "or_default")]
    pub tooltip: Option<String>,
    #[serde(deserialize_with = "or_default")]
    pub order: i32,
    #[serde(deserialize_with = "or_default")]
    pub sub_columns: Vec<Matrix2dSubItem>,
}

impl Matrix2dColumn {
    pub fn new() -> Self {
        Self {
            client_id: new_client_id(),
            key: new_item_key(),
            order: -1,
            ..Default::default()
        }
    }
}

// ============================================================================
// Organigram
// ============================================================================

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OrganigramNode {
    #[serde(deserialize_with = "or_default")]
    pub client_id: String,
    #[serde(deserialize_with = "or_default")]
    pub key: String,
    #[serde(deserialize_with = "or_default")]
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "or_default")]
    pub tooltip: Option<String>,
    #[serde(deserialize_with = "or_default")]
    pub order: i32,
    #[serde(deserialize_with = "or_default")]
    pub children: Vec<OrganigramNode>,
}

impl OrganigramNode {
    pub fn new() -> Self {
        Self {
            client_id: new_client_id(),
            key: new_item_key(),
            order: -1,
            ..Default::default()
        }
    }

    /// Number of nodes in this subtree, including self
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(|c| c.node_count()).sum::<usize>()
    }

    pub fn find(&self, key: &str) -> Option<&OrganigramNode> {
        if self.key == key {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(key))
    }

    pub fn find_mut(&mut self, key: &str) -> Option<&mut OrganigramNode> {
        if self.key == key {
            return Some(self);
        }
        self.children.iter_mut().find_map(|c| c.find_mut(key))
    }

    /// Depth-first walk yielding each node with the labels of its ancestors
    pub fn walk<'a>(&'a self, path: &mut Vec<&'a str>, visit: &mut dyn FnMut(&'a OrganigramNode, &[&'a str])) {
        path.push(self.label.as_str());
        visit(self, path);
        for child in &self.children {
            child.walk(path, visit);
        }
        path.pop();
    }
}

// ============================================================================
// ListItem implementations
// ============================================================================

macro_rules! keyed_by_key {
    ($($ty:ty),*) => {
        $(
            impl ListItem for $ty {
                fn item_key(&self) -> &str {
                    &self.key
                }
                fn order(&self) -> i32 {
                    self.order
                }
                fn set_order(&mut self, order: i32) {
                    self.order = order;
                }
            }
        )*
    };
}

// Matrix items carry a client id; records from older servers may only have a key.
macro_rules! keyed_by_client_id {
    ($($ty:ty),*) => {
        $(
            impl ListItem for $ty {
                fn item_key(&self) -> &str {
                    if self.client_id.is_empty() {
                        &self.key
                    } else {
                        &self.client_id
                    }
                }
                fn order(&self) -> i32 {
                    self.order
                }
                fn set_order(&mut self, order: i32) {
                    self.order = order;
                }
            }
        )*
    };
}

keyed_by_key!(ChoiceOption, ScaleOption);
keyed_by_client_id!(Matrix1dCell, Matrix1dRow, Matrix2dSubItem, Matrix2dRow, Matrix2dColumn, OrganigramNode);
