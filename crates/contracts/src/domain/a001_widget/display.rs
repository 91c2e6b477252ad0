//! Read-only rendering of a value: raw keys resolved to configured labels

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::aggregate::Widget;
use super::items::OrganigramNode;
use super::properties::WidgetProperties;
use super::value::WidgetValue;
use crate::domain::common::list_item::sort_by_order;

/// Geo area option as returned by the geo lookup
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GeoArea {
    pub id: String,
    pub title: String,
    pub admin_level_title: Option<String>,
    pub region_title: Option<String>,
}

impl GeoArea {
    pub fn display_label(&self) -> String {
        match &self.admin_level_title {
            Some(level) if !level.is_empty() => format!("{} ({})", self.title, level),
            _ => self.title.clone(),
        }
    }
}

/// Geo areas by id, supplied by the owning screen
pub type GeoAreaLookup = BTreeMap<String, GeoArea>;

/// One labelled group of a grid value
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayGroup {
    pub label: String,
    pub color: Option<String>,
    pub items: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DisplayValue {
    Empty,
    Text(String),
    Range { start: String, end: String },
    Scale { label: String, color: String },
    Labels(Vec<String>),
    Groups(Vec<DisplayGroup>),
}

/// Resolve `value` for display. Keys that no longer exist in the widget's
/// configuration are shown as-is; a value of another kind shows as empty.
pub fn display_value(widget: &Widget, value: Option<&WidgetValue>, geo: &GeoAreaLookup) -> DisplayValue {
    let Some(value) = value else {
        return DisplayValue::Empty;
    };
    match (&widget.properties, value) {
        (_, WidgetValue::Text(v) | WidgetValue::Date(v) | WidgetValue::Time(v))
            if value.kind() == widget.kind() =>
        {
            DisplayValue::Text(v.clone())
        }
        (WidgetProperties::Number(_), WidgetValue::Number(n)) => DisplayValue::Text(format_number(*n)),
        (WidgetProperties::DateRange(_), WidgetValue::DateRange(r)) => DisplayValue::Range {
            start: r.start_date.clone(),
            end: r.end_date.clone(),
        },
        (WidgetProperties::TimeRange(_), WidgetValue::TimeRange(r)) => DisplayValue::Range {
            start: r.start_time.clone(),
            end: r.end_time.clone(),
        },
        (WidgetProperties::Scale(p), WidgetValue::Scale(key)) => {
            match p.options.iter().find(|o| &o.key == key) {
                Some(option) => DisplayValue::Scale {
                    label: option.label.clone(),
                    color: option.color.clone(),
                },
                None => DisplayValue::Text(key.clone()),
            }
        }
        (WidgetProperties::Select(p), WidgetValue::Select(key)) => DisplayValue::Text(
            p.options
                .iter()
                .find(|o| &o.key == key)
                .map(|o| o.label.clone())
                .unwrap_or_else(|| key.clone()),
        ),
        (WidgetProperties::MultiSelect(p), WidgetValue::MultiSelect(keys)) => {
            let labels = sort_by_order(&p.options)
                .into_iter()
                .filter(|o| keys.contains(&o.key))
                .map(|o| o.label)
                .chain(
                    keys.iter()
                        .filter(|k| !p.options.iter().any(|o| &&o.key == k))
                        .cloned(),
                )
                .collect();
            DisplayValue::Labels(labels)
        }
        (WidgetProperties::Organigram(p), WidgetValue::Organigram(keys)) => {
            DisplayValue::Labels(keys.iter().map(|k| organigram_label(p.options.as_ref(), k)).collect())
        }
        (WidgetProperties::Geo(_), WidgetValue::Geo(ids)) => DisplayValue::Labels(
            ids.iter()
                .map(|id| geo.get(id).map(GeoArea::display_label).unwrap_or_else(|| id.clone()))
                .collect(),
        ),
        (WidgetProperties::Matrix1d(p), WidgetValue::Matrix1d(rows)) => {
            let groups = sort_by_order(&p.rows)
                .into_iter()
                .filter_map(|row| {
                    let selected = rows.get(&row.key)?;
                    let items: Vec<String> = sort_by_order(&row.cells)
                        .into_iter()
                        .filter(|cell| selected.get(&cell.key).copied().unwrap_or(false))
                        .map(|cell| cell.label)
                        .collect();
                    (!items.is_empty()).then(|| DisplayGroup {
                        label: row.label.clone(),
                        color: Some(row.color.clone()).filter(|c| !c.is_empty()),
                        items,
                    })
                })
                .collect();
            DisplayValue::Groups(groups)
        }
        (WidgetProperties::Matrix2d(p), WidgetValue::Matrix2d(rows)) => {
            let mut groups = Vec::new();
            for row in sort_by_order(&p.rows) {
                let Some(sub_rows) = rows.get(&row.key) else {
                    continue;
                };
                for sub_row in sort_by_order(&row.sub_rows) {
                    let Some(columns) = sub_rows.get(&sub_row.key) else {
                        continue;
                    };
                    let mut items = Vec::new();
                    for column in sort_by_order(&p.columns) {
                        let Some(selected) = columns.get(&column.key) else {
                            continue;
                        };
                        let sub_labels: Vec<String> = sort_by_order(&column.sub_columns)
                            .into_iter()
                            .filter(|s| selected.contains(&s.key))
                            .map(|s| s.label)
                            .collect();
                        if sub_labels.is_empty() {
                            items.push(column.label.clone());
                        } else {
                            items.push(format!("{}: {}", column.label, sub_labels.join(", ")));
                        }
                    }
                    if !items.is_empty() {
                        groups.push(DisplayGroup {
                            label: format!("{} / {}", row.label, sub_row.label),
                            color: Some(row.color.clone()).filter(|c| !c.is_empty()),
                            items,
                        });
                    }
                }
            }
            DisplayValue::Groups(groups)
        }
        _ => DisplayValue::Empty,
    }
}

fn organigram_label(root: Option<&OrganigramNode>, key: &str) -> String {
    let mut found = None;
    if let Some(root) = root {
        root.walk(&mut Vec::new(), &mut |node, path| {
            if found.is_none() && node.key == key {
                found = Some(path.join(" / "));
            }
        });
    }
    found.unwrap_or_else(|| key.to_string())
}

fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_widget::aggregate::WidgetRecord;
    use crate::domain::a001_widget::input::toggle_matrix1d_cell;
    use serde_json::json;

    fn widget(kind: &str, properties: serde_json::Value) -> Widget {
        WidgetRecord {
            client_id: "w1".into(),
            title: "W".into(),
            widget_id: kind.into(),
            properties: Some(properties),
            ..Default::default()
        }
        .resolve()
        .unwrap()
    }

    #[test]
    fn test_matrix1d_shows_selected_cell_labels() {
        let w = widget(
            "MATRIX1D",
            json!({"rows": [
                {"key": "r1", "label": "Row 1", "order": 0, "color": "#ff0000",
                 "cells": [{"key": "c1", "label": "Cell 1", "order": 0},
                           {"key": "c2", "label": "Cell 2", "order": 1}]},
                {"key": "r2", "label": "Row 2", "order": 1, "cells": []}
            ]}),
        );
        let value = toggle_matrix1d_cell(None, "r1", "c2");
        let shown = display_value(&w, Some(&WidgetValue::Matrix1d(value)), &GeoAreaLookup::new());
        assert_eq!(
            shown,
            DisplayValue::Groups(vec![DisplayGroup {
                label: "Row 1".into(),
                color: Some("#ff0000".into()),
                items: vec!["Cell 2".into()],
            }])
        );
    }

    #[test]
    fn test_unknown_keys_are_shown_raw() {
        let w = widget("SELECT", json!({"options": [{"key": "a", "label": "Alpha", "order": 0}]}));
        assert_eq!(
            display_value(&w, Some(&WidgetValue::Select("a".into())), &GeoAreaLookup::new()),
            DisplayValue::Text("Alpha".into())
        );
        assert_eq!(
            display_value(&w, Some(&WidgetValue::Select("gone".into())), &GeoAreaLookup::new()),
            DisplayValue::Text("gone".into())
        );
    }

    #[test]
    fn test_mismatched_value_is_empty() {
        let w = widget("NUMBER", json!({}));
        assert_eq!(
            display_value(&w, Some(&WidgetValue::Text("12".into())), &GeoAreaLookup::new()),
            DisplayValue::Empty
        );
        assert_eq!(
            display_value(&w, Some(&WidgetValue::Number(12.0)), &GeoAreaLookup::new()),
            DisplayValue::Text("12".into())
        );
    }

    #[test]
    fn test_organigram_and_geo_labels() {
        let w = widget(
            "ORGANIGRAM",
            json!({"options": {"key": "root", "label": "UN", "order": 0, "children": [
                {"key": "who", "label": "WHO", "order": 0, "children": []}
            ]}}),
        );
        assert_eq!(
            display_value(&w, Some(&WidgetValue::Organigram(vec!["who".into()])), &GeoAreaLookup::new()),
            DisplayValue::Labels(vec!["UN / WHO".into()])
        );

        let w = widget("GEO", json!({}));
        let mut geo = GeoAreaLookup::new();
        geo.insert(
            "12".into(),
            GeoArea {
                id: "12".into(),
                title: "Kathmandu".into(),
                admin_level_title: Some("District".into()),
                region_title: None,
            },
        );
        assert_eq!(
            display_value(&w, Some(&WidgetValue::Geo(vec!["12".into(), "99".into()])), &geo),
            DisplayValue::Labels(vec!["Kathmandu (District)".into(), "99".into()])
        );
    }
}
