use super::aggregate::{Association, Matrix2dAssociation, MappingTarget};
use crate::domain::a001_widget::{Widget, WidgetProperties};
use crate::domain::common::list_item::sort_by_order;
use crate::enums::WidgetKind;

/// A sub-element of a saved widget that a tag could be mapped to
#[derive(Debug, Clone, PartialEq)]
pub struct PossibleMapping {
    pub label: String,
    pub widget: String,
    pub widget_type: WidgetKind,
    pub association: Association,
}

impl PossibleMapping {
    pub fn target(&self) -> MappingTarget {
        self.association.target()
    }
}

/// Every mappable sub-element of `widget`, in display order.
///
/// MATRIX2D lists columns, then sub-columns, then sub-rows. Organigram
/// labels are the `/`-joined path from the root. Unsaved widgets and
/// kinds without sub-elements give an empty list.
pub fn possible_mappings(widget: &Widget) -> Vec<PossibleMapping> {
    let Some(widget_pk) = widget.id.as_deref() else {
        return Vec::new();
    };
    let entry = |label: &str, association: Association| PossibleMapping {
        label: label.to_string(),
        widget: widget_pk.to_string(),
        widget_type: widget.kind(),
        association,
    };

    match &widget.properties {
        WidgetProperties::Matrix1d(p) => sort_by_order(&p.rows)
            .iter()
            .flat_map(|row| {
                sort_by_order(&row.cells).into_iter().map(move |cell| {
                    entry(
                        &cell.label,
                        Association::Cell {
                            row_key: row.key.clone(),
                            sub_row_key: cell.key.clone(),
                        },
                    )
                })
            })
            .collect(),
        WidgetProperties::Matrix2d(p) => {
            let columns = sort_by_order(&p.columns);
            let mut mappings: Vec<PossibleMapping> = columns
                .iter()
                .map(|column| {
                    entry(
                        &column.label,
                        Association::Matrix2d(Matrix2dAssociation::Column {
                            column_key: column.key.clone(),
                        }),
                    )
                })
                .collect();
            for column in &columns {
                for sub_column in sort_by_order(&column.sub_columns) {
                    mappings.push(entry(
                        &sub_column.label,
                        Association::Matrix2d(Matrix2dAssociation::SubColumn {
                            column_key: column.key.clone(),
                            sub_column_key: sub_column.key.clone(),
                        }),
                    ));
                }
            }
            for row in sort_by_order(&p.rows) {
                for sub_row in sort_by_order(&row.sub_rows) {
                    mappings.push(entry(
                        &sub_row.label,
                        Association::Matrix2d(Matrix2dAssociation::SubRow {
                            row_key: row.key.clone(),
                            sub_row_key: sub_row.key.clone(),
                        }),
                    ));
                }
            }
            mappings
        }
        WidgetProperties::Scale(p) => option_mappings(sort_by_order(&p.options).iter().map(|o| (&o.key, &o.label)), entry),
        WidgetProperties::Select(p) => option_mappings(sort_by_order(&p.options).iter().map(|o| (&o.key, &o.label)), entry),
        WidgetProperties::MultiSelect(p) => {
            option_mappings(sort_by_order(&p.options).iter().map(|o| (&o.key, &o.label)), entry)
        }
        WidgetProperties::Organigram(p) => {
            let mut mappings = Vec::new();
            if let Some(root) = &p.options {
                let mut sorted = root.clone();
                sort_tree(&mut sorted);
                sorted.walk(&mut Vec::new(), &mut |node, path| {
                    mappings.push(entry(
                        &path.join("/"),
                        Association::Option {
                            option_key: node.key.clone(),
                        },
                    ));
                });
            }
            mappings
        }
        _ => Vec::new(),
    }
}

fn option_mappings<'a>(
    options: impl Iterator<Item = (&'a String, &'a String)>,
    entry: impl Fn(&str, Association) -> PossibleMapping,
) -> Vec<PossibleMapping> {
    options
        .map(|(key, label)| entry(label, Association::Option { option_key: key.clone() }))
        .collect()
}

fn sort_tree(node: &mut crate::domain::a001_widget::items::OrganigramNode) {
    node.children.sort_by_key(|c| c.order);
    for child in &mut node.children {
        sort_tree(child);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_widget::WidgetRecord;
    use serde_json::json;

    fn widget(id: &str, kind: &str, properties: serde_json::Value) -> Widget {
        WidgetRecord {
            id: Some(id.into()),
            client_id: format!("sample-{}", id),
            title: kind.into(),
            widget_id: kind.into(),
            properties: Some(properties),
            ..Default::default()
        }
        .resolve()
        .unwrap()
    }

    fn labels(mappings: &[PossibleMapping]) -> Vec<&str> {
        mappings.iter().map(|m| m.label.as_str()).collect()
    }

    #[test]
    fn test_matrix2d_possible_mappings() {
        let w = widget(
            "12",
            "MATRIX2D",
            json!({
                "columns": [
                    {"order": 1, "key": "column-1", "label": "Column 1", "subColumns": [
                        {"order": 1, "key": "sub-col-1", "label": "Sub Col 1"},
                        {"order": 2, "key": "sub-col-2", "label": "Sub Col 2"}
                    ]},
                    {"order": 2, "key": "column-2", "label": "Column 2", "subColumns": []}
                ],
                "rows": [
                    {"order": 1, "color": "red", "key": "row-1", "label": "Row 1", "subRows": [
                        {"key": "sub-row-1-1", "label": "Sub Row 1 1", "order": 1},
                        {"key": "sub-row-1-2", "label": "Sub Row 1 2", "order": 2}
                    ]},
                    {"order": 2, "color": "red", "key": "row-2", "label": "Row 2", "subRows": [
                        {"key": "sub-row-2-1", "label": "Sub Row 2 1", "order": 1}
                    ]}
                ]
            }),
        );
        let mappings = possible_mappings(&w);
        assert_eq!(
            labels(&mappings),
            vec!["Column 1", "Column 2", "Sub Col 1", "Sub Col 2", "Sub Row 1 1", "Sub Row 1 2", "Sub Row 2 1"]
        );
        assert_eq!(
            mappings[3].association,
            Association::Matrix2d(Matrix2dAssociation::SubColumn {
                column_key: "column-1".into(),
                sub_column_key: "sub-col-2".into(),
            })
        );
        assert_eq!(
            mappings[6].association,
            Association::Matrix2d(Matrix2dAssociation::SubRow {
                row_key: "row-2".into(),
                sub_row_key: "sub-row-2-1".into(),
            })
        );
        assert!(mappings.iter().all(|m| m.widget == "12" && m.widget_type == WidgetKind::Matrix2d));
    }

    #[test]
    fn test_matrix1d_possible_mappings() {
        let w = widget(
            "13",
            "MATRIX1D",
            json!({"rows": [
                {"key": "row-1", "label": "Row 1", "order": 1, "color": "#b0b0b0", "cells": [
                    {"key": "sub-row-1-1", "label": "Sub Row 1 1", "order": 1}
                ]},
                {"key": "row-2", "label": "row-2", "order": 2, "color": "#ff0000", "cells": [
                    {"key": "sub-row-2-1", "label": "Sub Row 2 1", "order": 1},
                    {"key": "sub-row-2-2", "label": "Sub Row 2 2", "order": 2}
                ]}
            ]}),
        );
        let mappings = possible_mappings(&w);
        assert_eq!(labels(&mappings), vec!["Sub Row 1 1", "Sub Row 2 1", "Sub Row 2 2"]);
        assert_eq!(
            mappings[2].association,
            Association::Cell {
                row_key: "row-2".into(),
                sub_row_key: "sub-row-2-2".into()
            }
        );
        assert_eq!(mappings[2].target(), MappingTarget::Cell("sub-row-2-2".into()));
    }

    #[test]
    fn test_scale_possible_mappings() {
        let w = widget(
            "14",
            "SCALE",
            json!({"options": [
                {"key": "option-2", "label": "Option 2", "order": 2, "color": "#123123"},
                {"key": "option-1", "label": "Option 1", "order": 1, "color": "#f0f0f0"}
            ]}),
        );
        let mappings = possible_mappings(&w);
        assert_eq!(labels(&mappings), vec!["Option 1", "Option 2"]);
        assert_eq!(
            mappings[0].association,
            Association::Option {
                option_key: "option-1".into()
            }
        );
    }

    #[test]
    fn test_organigram_possible_mappings() {
        let w = widget(
            "15",
            "ORGANIGRAM",
            json!({"options": {"key": "parent-0", "label": "Parent 0", "order": 1, "children": [
                {"key": "child-0-1", "label": "Child 0 1", "order": 1, "children": [
                    {"key": "child-1-1", "label": "Child 1 1", "order": 1, "children": []},
                    {"key": "child-1-2", "label": "Child 1 2", "order": 2, "children": []}
                ]},
                {"key": "child-0-2", "label": "Child 0 2", "order": 2, "children": []}
            ]}}),
        );
        let mappings = possible_mappings(&w);
        assert_eq!(
            labels(&mappings),
            vec![
                "Parent 0",
                "Parent 0/Child 0 1",
                "Parent 0/Child 0 1/Child 1 1",
                "Parent 0/Child 0 1/Child 1 2",
                "Parent 0/Child 0 2",
            ]
        );
        assert_eq!(mappings[2].target(), MappingTarget::Option("child-1-1".into()));
    }

    #[test]
    fn test_no_mappings_for_unsaved_or_plain_widgets() {
        let mut w = widget("16", "SELECT", json!({"options": [{"key": "a", "label": "A"}]}));
        assert_eq!(possible_mappings(&w).len(), 1);
        w.id = None;
        assert!(possible_mappings(&w).is_empty());
        assert!(possible_mappings(&widget("17", "TEXT", json!({}))).is_empty());
    }
}
