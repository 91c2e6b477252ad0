use super::model;
use contracts::domain::a001_widget::Widget;
use contracts::domain::a003_mapping::{
    auto_match, possible_mappings, MappingList, MappingTarget, PossibleMapping, PredictionTag,
};
use contracts::domain::a003_mapping::tag::{group_tags, mappable_tags};
use contracts::enums::WidgetKind;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::collections::BTreeMap;

/// Every mappable sub-element of the given widgets
pub fn all_possible(widgets: &[Widget]) -> Vec<PossibleMapping> {
    widgets.iter().flat_map(possible_mappings).collect()
}

/// Auto-matched categorical mappings plus the GEO widget mappings already present
pub fn rematch(current: &MappingList, possible: &[PossibleMapping], tags: &[PredictionTag]) -> MappingList {
    let mut next = auto_match(possible, &mappable_tags(tags));
    next.items
        .extend(current.items.iter().filter(|m| !m.is_categorical()).cloned());
    next
}

#[derive(Clone, Copy)]
pub struct TaggingViewModel {
    pub tags: RwSignal<Vec<PredictionTag>>,
    pub mappings: RwSignal<MappingList>,
    pub selected_tag: RwSignal<Option<String>>,
    pub error: RwSignal<Option<String>>,
    pub dirty: RwSignal<bool>,
    pub saving: RwSignal<bool>,
}

impl TaggingViewModel {
    pub fn new() -> Self {
        Self {
            tags: RwSignal::new(Vec::new()),
            mappings: RwSignal::new(MappingList::default()),
            selected_tag: RwSignal::new(None),
            error: RwSignal::new(None),
            dirty: RwSignal::new(false),
            saving: RwSignal::new(false),
        }
    }

    pub fn load(&self, framework_id: String) {
        let this = *self;
        spawn_local(async move {
            match model::fetch_prediction_tags().await {
                Ok(tags) => this.tags.set(tags),
                Err(e) => this.error.set(Some(format!("Failed to load tags: {}", e))),
            }
            match model::fetch_mappings(&framework_id).await {
                Ok(mappings) => {
                    log::debug!("Loaded {} mapping(s) for framework {}", mappings.len(), framework_id);
                    this.mappings.set(mappings);
                    this.dirty.set(false);
                }
                Err(e) => this.error.set(Some(format!("Failed to load mappings: {}", e))),
            }
        });
    }

    /// Mappable tags grouped by group name
    pub fn tag_groups(&self) -> BTreeMap<String, Vec<PredictionTag>> {
        self.tags.with(|tags| group_tags(&mappable_tags(tags)))
    }

    pub fn select_tag(&self, tag: String) {
        self.selected_tag.update(|selected| {
            *selected = if selected.as_deref() == Some(tag.as_str()) {
                None
            } else {
                Some(tag)
            };
        });
    }

    /// Toggle the selected tag on a sub-element
    pub fn toggle_command(&self, widget: &Widget, target: &MappingTarget) {
        let Some(tag) = self.selected_tag.get_untracked() else {
            self.error.set(Some("Select a tag first".to_string()));
            return;
        };
        let result = self.mappings.try_update(|m| m.toggle(widget, target, &tag));
        match result {
            Some(Ok(_)) => {
                self.error.set(None);
                self.dirty.set(true);
            }
            Some(Err(e)) => {
                log::error!("Mapping {:?} of widget {} failed: {}", target, widget.identity(), e);
                self.error.set(Some(e.to_string()));
            }
            None => {}
        }
    }

    pub fn toggle_geo_command(&self, widget: &Widget) {
        match self.mappings.try_update(|m| m.toggle_geo_widget(widget)) {
            Some(Ok(_)) => self.dirty.set(true),
            Some(Err(e)) => {
                log::error!("Geo mapping of widget {} failed: {}", widget.identity(), e);
                self.error.set(Some(e.to_string()));
            }
            None => {}
        }
    }

    pub fn auto_match_command(&self, widgets: &[Widget]) {
        let possible = all_possible(widgets);
        let next = self
            .tags
            .with_untracked(|tags| self.mappings.with_untracked(|m| rematch(m, &possible, tags)));
        log::info!("Auto-match produced {} mapping(s)", next.len());
        self.mappings.set(next);
        self.dirty.set(true);
    }

    pub fn coverage(&self, widgets: &[Widget]) -> f64 {
        let possible = all_possible(widgets);
        self.mappings.with(|m| m.coverage(&possible))
    }

    pub fn save_command(&self, framework_id: Option<String>) {
        let Some(id) = framework_id else {
            self.error.set(Some("Save the framework before mapping tags".to_string()));
            return;
        };
        let mappings = self.mappings.get_untracked();
        let this = *self;
        self.saving.set(true);
        spawn_local(async move {
            match model::save_mappings(&id, &mappings).await {
                Ok(saved) => {
                    this.mappings.set(saved);
                    this.dirty.set(false);
                    this.error.set(None);
                }
                Err(e) => this.error.set(Some(format!("Failed to save mappings: {}", e))),
            }
            this.saving.set(false);
        });
    }
}

/// Widgets shown in the panel: saved widgets that take tags, plus GEO widgets
pub fn mappable_widgets(widgets: Vec<Widget>) -> Vec<Widget> {
    widgets
        .into_iter()
        .filter(|w| w.id.is_some() && (w.kind().supports_tag_mapping() || w.kind() == WidgetKind::Geo))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a001_widget::WidgetProperties;

    fn select_widget(id: &str) -> Widget {
        let mut widget = Widget::new(WidgetKind::Select);
        widget.id = Some(id.into());
        widget.title = "Sector".into();
        if let WidgetProperties::Select(p) = &mut widget.properties {
            let key = p.add_option().unwrap();
            p.option_mut(&key).unwrap().label = "Health".into();
        }
        widget
    }

    fn geo_widget(id: &str) -> Widget {
        let mut widget = Widget::new(WidgetKind::Geo);
        widget.id = Some(id.into());
        widget
    }

    fn tag(id: &str, name: &str) -> PredictionTag {
        PredictionTag {
            id: id.into(),
            name: name.into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_rematch_keeps_geo_mappings() {
        let select = select_widget("1");
        let geo = geo_widget("2");
        let mut current = MappingList::default();
        current.toggle_geo_widget(&geo).unwrap();

        let possible = all_possible(&[select.clone(), geo]);
        let next = rematch(&current, &possible, &[tag("t1", "health"), tag("t2", "shelter")]);

        assert_eq!(next.len(), 2);
        assert!(next.is_geo_widget_mapped("2"));
        assert_eq!(next.tag_count("t1"), 1);
        assert_eq!(next.tag_count("t2"), 0);
    }

    #[test]
    fn test_hidden_tags_are_not_auto_matched() {
        let select = select_widget("1");
        let possible = all_possible(&[select]);
        let hidden = PredictionTag {
            hide_in_analysis_framework_mapping: true,
            ..tag("t1", "Health")
        };
        let next = rematch(&MappingList::default(), &possible, &[hidden]);
        assert!(next.is_empty());
    }

    #[test]
    fn test_unsaved_and_plain_widgets_are_not_offered() {
        let mut unsaved = select_widget("1");
        unsaved.id = None;
        let text = {
            let mut w = Widget::new(WidgetKind::Text);
            w.id = Some("3".into());
            w
        };
        let offered = mappable_widgets(vec![unsaved, text, geo_widget("2"), select_widget("4")]);
        let ids: Vec<_> = offered.iter().filter_map(|w| w.id.as_deref()).collect();
        assert_eq!(ids, vec!["2", "4"]);
    }
}
