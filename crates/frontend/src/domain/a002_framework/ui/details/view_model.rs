use super::geo_options::GeoOptionsService;
use super::model;
use contracts::domain::a001_widget::{EntryAttributes, Widget, WidgetRecord, WidgetValue};
use contracts::domain::a002_framework::Framework;
use contracts::domain::common::list_item::sort_by_order;
use contracts::enums::WidgetKind;
use leptos::prelude::*;
use leptos::task::spawn_local;

/// ViewModel of the framework page
#[derive(Clone, Copy)]
pub struct FrameworkDetailsViewModel {
    pub framework: RwSignal<Framework>,
    pub entry: RwSignal<EntryAttributes>,
    /// Client id of the widget whose editor is open
    pub editing: RwSignal<Option<String>>,
    /// Latest draft reported by the open editor
    pub draft: RwSignal<Option<Widget>>,
    /// Widget added in this session and not yet saved
    fresh: RwSignal<Option<String>>,
    pub new_kind: RwSignal<String>,
    pub error: RwSignal<Option<String>>,
    pub loading: RwSignal<bool>,
    pub saving: RwSignal<bool>,
    pub entry_dirty: RwSignal<bool>,
    pub read_only: RwSignal<bool>,
    pub geo: GeoOptionsService,
}

impl FrameworkDetailsViewModel {
    pub fn new() -> Self {
        Self {
            framework: RwSignal::new(Framework::default()),
            entry: RwSignal::new(EntryAttributes::default()),
            editing: RwSignal::new(None),
            draft: RwSignal::new(None),
            fresh: RwSignal::new(None),
            new_kind: RwSignal::new(WidgetKind::Text.code().to_string()),
            error: RwSignal::new(None),
            loading: RwSignal::new(false),
            saving: RwSignal::new(false),
            entry_dirty: RwSignal::new(false),
            read_only: RwSignal::new(false),
            geo: GeoOptionsService::new(),
        }
    }

    /// Load the framework and its preview entry
    pub fn load(&self, id: String) {
        let this = *self;
        self.loading.set(true);
        spawn_local(async move {
            let result = model::fetch_framework(&id).await;
            this.loading.set(false);
            match result {
                Ok(framework) => {
                    let has_geo = framework.widgets().iter().any(|w| w.kind() == WidgetKind::Geo);
                    log::info!(
                        "Loaded framework {} with {} widget(s)",
                        id,
                        framework.widgets.len()
                    );
                    this.framework.set(framework);
                    if has_geo {
                        this.geo.load_initial();
                    }
                }
                Err(e) => {
                    this.error.set(Some(format!("Failed to load framework: {}", e)));
                    return;
                }
            }
            match model::fetch_entry(&id).await {
                Ok(entry) => {
                    this.entry.set(entry);
                    this.entry_dirty.set(false);
                }
                Err(e) => log::warn!("No preview entry for framework {}: {}", id, e),
            }
        });
    }

    /// Stored widget records in display order
    pub fn records(&self) -> Vec<WidgetRecord> {
        self.framework.with(|f| sort_by_order(&f.widgets))
    }

    pub fn unknown_count(&self) -> usize {
        self.framework.with(|f| f.unknown_widgets().len())
    }

    pub fn record(&self, client_id: &str) -> Option<WidgetRecord> {
        self.framework
            .with_untracked(|f| f.widgets.iter().find(|r| r.client_id == client_id).cloned())
    }

    /// Widgets the editor of `client_id` may offer as a conditional parent
    pub fn parent_candidates(&self, client_id: &str) -> Vec<Widget> {
        self.framework.with_untracked(|f| f.parent_candidates(client_id))
    }

    /// Whether a conditional widget is shown for the current entry
    pub fn is_visible(&self, client_id: &str) -> bool {
        self.framework
            .with(|f| self.entry.with(|e| f.is_widget_visible(client_id, e)))
    }

    pub fn orphan_count(&self) -> usize {
        self.framework
            .with(|f| self.entry.with(|e| f.orphan_attributes(e).len()))
    }

    fn persist(&self, next: Framework, on_saved: impl FnOnce() + 'static) {
        let errors = next.validate();
        if !errors.is_empty() {
            let message = errors.first_message().unwrap_or_default();
            log::warn!("Framework not saved: {}", message);
            self.error.set(Some(format!("Framework is invalid: {}", message)));
            return;
        }
        let this = *self;
        self.saving.set(true);
        spawn_local(async move {
            match model::save_framework(&next).await {
                Ok(saved) => {
                    this.framework.set(saved);
                    this.error.set(None);
                    on_saved();
                }
                Err(e) => {
                    log::error!("Failed to save framework: {}", e);
                    this.error.set(Some(format!("Failed to save framework: {}", e)));
                }
            }
            this.saving.set(false);
        });
    }

    pub fn add_widget_command(&self) {
        let Some(kind) = WidgetKind::from_code(&self.new_kind.get_untracked()) else {
            return;
        };
        let widget = Widget::new(kind);
        let client_id = widget.client_id.clone();
        self.framework.update(|f| f.upsert_widget(&widget));
        self.fresh.set(Some(client_id.clone()));
        self.draft.set(Some(widget));
        self.editing.set(Some(client_id));
    }

    pub fn edit_command(&self, client_id: String) {
        if let Some(open) = self.editing.get_untracked() {
            if open != client_id {
                self.cancel_command();
            }
        }
        self.draft.set(None);
        self.editing.set(Some(client_id));
    }

    pub fn widget_changed(&self, widget: Widget) {
        self.draft.set(Some(widget));
    }

    /// Persist a validated widget; the editor stays open if the request fails
    pub fn widget_saved(&self, widget: Widget) {
        let mut next = self.framework.get_untracked();
        next.upsert_widget(&widget);
        let this = *self;
        self.persist(next, move || {
            this.fresh.set(None);
            this.draft.set(None);
            this.editing.set(None);
        });
    }

    pub fn cancel_command(&self) {
        if let Some(fresh) = self.fresh.get_untracked() {
            self.framework.update(|f| {
                f.remove_widget(&fresh);
            });
            self.fresh.set(None);
        }
        self.draft.set(None);
        self.editing.set(None);
    }

    pub fn remove_command(&self, client_id: String) {
        let mut next = self.framework.get_untracked();
        if next.remove_widget(&client_id) {
            self.persist(next, || {});
        }
    }

    pub fn move_command(&self, client_id: String, delta: isize) {
        let mut next = self.framework.get_untracked();
        let order = sort_by_order(&next.widgets);
        let Some(from) = order.iter().position(|r| r.client_id == client_id) else {
            return;
        };
        let to = from as isize + delta;
        if to < 0 {
            return;
        }
        if next.move_widget(from, to as usize) {
            self.persist(next, || {});
        }
    }

    /// Tracked value of a widget in the preview entry
    pub fn value_signal(&self, widget: Widget) -> Signal<Option<WidgetValue>, LocalStorage> {
        let entry = self.entry;
        Signal::derive_local(move || entry.with(|e| e.value(&widget)))
    }

    /// `(value, name)` from an input; `name` is the widget's client id
    pub fn value_changed(&self, value: Option<WidgetValue>, name: String) {
        let Some(widget) = self.framework.with_untracked(|f| f.widget_by_client_id(&name)) else {
            log::warn!("Value change for unknown widget {}", name);
            return;
        };
        self.entry.update(|e| *e = e.set_value(&widget, value));
        self.entry_dirty.set(true);
    }

    pub fn save_entry_command(&self) {
        let Some(id) = self.framework.with_untracked(|f| f.id.clone()) else {
            self.error.set(Some("Save the framework before entering values".to_string()));
            return;
        };
        let entry = self.entry.get_untracked();
        let this = *self;
        self.saving.set(true);
        spawn_local(async move {
            match model::save_entry(&id, &entry).await {
                Ok(saved) => {
                    this.entry.set(saved);
                    this.entry_dirty.set(false);
                    this.error.set(None);
                }
                Err(e) => this.error.set(Some(format!("Failed to save entry: {}", e))),
            }
            this.saving.set(false);
        });
    }
}
