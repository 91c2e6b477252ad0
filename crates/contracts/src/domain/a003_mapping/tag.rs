//! Prediction tags offered by the assisted-tagging service

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::aggregate::{MappingItem, MappingList};
use super::possible::PossibleMapping;
use crate::domain::common::new_client_id;

pub const DEFAULT_TAG_GROUP: &str = "Miscellaneous";

/// Minimum label similarity for an automatic match
pub const AUTO_MATCH_THRESHOLD: f64 = 0.7;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PredictionTag {
    pub id: String,
    pub name: String,
    pub group: Option<String>,
    pub is_category: bool,
    pub hide_in_analysis_framework_mapping: bool,
}

impl PredictionTag {
    pub fn group_name(&self) -> &str {
        self.group.as_deref().unwrap_or(DEFAULT_TAG_GROUP)
    }
}

/// Tags that can be mapped to widget elements
pub fn mappable_tags(tags: &[PredictionTag]) -> Vec<PredictionTag> {
    tags.iter()
        .filter(|t| !t.is_category && !t.hide_in_analysis_framework_mapping)
        .cloned()
        .collect()
}

pub fn group_tags(tags: &[PredictionTag]) -> BTreeMap<String, Vec<PredictionTag>> {
    let mut groups: BTreeMap<String, Vec<PredictionTag>> = BTreeMap::new();
    for tag in tags {
        groups.entry(tag.group_name().to_string()).or_default().push(tag.clone());
    }
    groups
}

/// Dice coefficient over character bigrams, ignoring whitespace and case
pub fn label_similarity(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().filter(|c| !c.is_whitespace()).flat_map(char::to_lowercase).collect();
    let b: Vec<char> = b.chars().filter(|c| !c.is_whitespace()).flat_map(char::to_lowercase).collect();
    if a == b {
        return 1.0;
    }
    if a.len() < 2 || b.len() < 2 {
        return 0.0;
    }

    let mut bigrams: BTreeMap<(char, char), usize> = BTreeMap::new();
    for pair in a.windows(2) {
        *bigrams.entry((pair[0], pair[1])).or_default() += 1;
    }
    let mut shared = 0;
    for pair in b.windows(2) {
        if let Some(count) = bigrams.get_mut(&(pair[0], pair[1])) {
            if *count > 0 {
                *count -= 1;
                shared += 1;
            }
        }
    }
    (2 * shared) as f64 / (a.len() + b.len() - 2) as f64
}

/// Mappings for every (element, tag) pair whose labels are similar enough.
/// Replaces whatever was mapped before.
pub fn auto_match(possible: &[PossibleMapping], tags: &[PredictionTag]) -> MappingList {
    let items = possible
        .iter()
        .flat_map(|p| {
            tags.iter()
                .filter(move |tag| label_similarity(&p.label, &tag.name) > AUTO_MATCH_THRESHOLD)
                .map(move |tag| MappingItem {
                    id: None,
                    client_id: new_client_id(),
                    tag: Some(tag.id.clone()),
                    widget: p.widget.clone(),
                    widget_type: p.widget_type,
                    association: Some(p.association.clone()),
                })
        })
        .collect();
    MappingList::new(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a003_mapping::aggregate::Association;
    use crate::enums::WidgetKind;

    fn tag(id: &str, name: &str) -> PredictionTag {
        PredictionTag {
            id: id.into(),
            name: name.into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_label_similarity() {
        assert_eq!(label_similarity("Health", "health"), 1.0);
        assert_eq!(label_similarity("Food Security", "foodsecurity"), 1.0);
        assert_eq!(label_similarity("a", "b"), 0.0);
        assert!(label_similarity("Protection", "Protections") > AUTO_MATCH_THRESHOLD);
        assert!(label_similarity("Shelter", "Education") < AUTO_MATCH_THRESHOLD);
    }

    #[test]
    fn test_auto_match() {
        let possible = vec![
            PossibleMapping {
                label: "Health".into(),
                widget: "12".into(),
                widget_type: WidgetKind::Scale,
                association: Association::Option {
                    option_key: "health".into(),
                },
            },
            PossibleMapping {
                label: "Logistics".into(),
                widget: "12".into(),
                widget_type: WidgetKind::Scale,
                association: Association::Option {
                    option_key: "logistics".into(),
                },
            },
        ];
        let list = auto_match(&possible, &[tag("t1", "health"), tag("t2", "WASH")]);
        assert_eq!(list.len(), 1);
        assert_eq!(list.items[0].tag.as_deref(), Some("t1"));
        assert_eq!(list.coverage(&possible), 50.0);
    }

    #[test]
    fn test_tag_filtering_and_groups() {
        let mut category = tag("c", "Sectors");
        category.is_category = true;
        let mut hidden = tag("h", "Hidden");
        hidden.hide_in_analysis_framework_mapping = true;
        let mut grouped = tag("g", "Health");
        grouped.group = Some("Sectors".into());

        let tags = mappable_tags(&[category, hidden, grouped, tag("m", "Other")]);
        assert_eq!(tags.len(), 2);
        let groups = group_tags(&tags);
        assert_eq!(groups["Sectors"][0].id, "g");
        assert_eq!(groups[DEFAULT_TAG_GROUP][0].id, "m");
    }
}
