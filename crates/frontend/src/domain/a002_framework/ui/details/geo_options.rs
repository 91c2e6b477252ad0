use super::model;
use crate::domain::a001_widget::ui::GeoOptions;
use contracts::domain::a001_widget::{GeoArea, GeoAreaLookup};
use contracts::shared::paging::{OptionsTicket, PagedOptions, DEFAULT_PAGE_SIZE};
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

const SEARCH_DEBOUNCE_MS: u32 = 300;

/// Remember every area seen so selected ids keep their labels after a new search
fn remember(lookup: &mut GeoAreaLookup, areas: &[GeoArea]) {
    for area in areas {
        lookup.insert(area.id.clone(), area.clone());
    }
}

/// Blank search text means "no filter"
fn search_term(text: &str) -> Option<String> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Paged geo area lookup shared by all GEO inputs of a page
#[derive(Clone, Copy)]
pub struct GeoOptionsService {
    state: RwSignal<PagedOptions<GeoArea>>,
    lookup: RwSignal<GeoAreaLookup>,
    keystroke: RwSignal<u64>,
}

impl GeoOptionsService {
    pub fn new() -> Self {
        Self {
            state: RwSignal::new(PagedOptions::new(DEFAULT_PAGE_SIZE)),
            lookup: RwSignal::new(GeoAreaLookup::new()),
            keystroke: RwSignal::new(0),
        }
    }

    fn issue(&self, ticket: OptionsTicket) {
        let state = self.state;
        let lookup = self.lookup;
        spawn_local(async move {
            match model::fetch_geo_areas(&ticket.query).await {
                Ok(page) => {
                    lookup.update(|l| remember(l, &page.results));
                    state.update(|s| {
                        if !s.receive(&ticket, page) {
                            log::debug!("Dropped stale geo areas page {}", ticket.query.page);
                        }
                    });
                }
                Err(e) => {
                    log::error!("Failed to load geo areas: {}", e);
                    state.update(|s| s.fail(&ticket));
                }
            }
        });
    }

    /// First page without a filter
    pub fn load_initial(&self) {
        if let Some(ticket) = self.state.try_update(|s| s.search(None)) {
            self.issue(ticket);
        }
    }

    /// Debounced search; only the last keystroke in a burst issues a request
    pub fn search(&self, text: String) {
        let this = *self;
        let stamp = self.keystroke.get_untracked() + 1;
        self.keystroke.set(stamp);
        spawn_local(async move {
            TimeoutFuture::new(SEARCH_DEBOUNCE_MS).await;
            if this.keystroke.get_untracked() != stamp {
                return;
            }
            let term = search_term(&text);
            if this.state.with_untracked(|s| s.repeats(term.as_deref())) {
                return;
            }
            if let Some(ticket) = this.state.try_update(|s| s.search(term)) {
                this.issue(ticket);
            }
        });
    }

    pub fn load_more(&self) {
        if let Some(ticket) = self.state.try_update(|s| s.load_more()).flatten() {
            self.issue(ticket);
        }
    }

    pub fn options(&self) -> GeoOptions {
        let this = *self;
        GeoOptions {
            lookup: self.lookup.into(),
            results: Signal::derive(move || this.state.with(|s| s.items().to_vec())),
            has_more: Signal::derive(move || this.state.with(|s| s.has_more())),
            pending: Signal::derive(move || this.state.with(|s| s.is_pending())),
            on_search: Callback::new(move |text: String| this.search(text)),
            on_load_more: Callback::new(move |_| this.load_more()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn area(id: &str, title: &str) -> GeoArea {
        GeoArea {
            id: id.into(),
            title: title.into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_remembered_areas_survive_a_new_search() {
        let mut lookup = GeoAreaLookup::new();
        remember(&mut lookup, &[area("1", "Kathmandu"), area("2", "Pokhara")]);
        remember(&mut lookup, &[area("3", "Lalitpur")]);
        assert_eq!(lookup.len(), 3);
        assert_eq!(lookup["1"].title, "Kathmandu");
    }

    #[test]
    fn test_later_copy_of_an_area_wins() {
        let mut lookup = GeoAreaLookup::new();
        remember(&mut lookup, &[area("1", "Old")]);
        remember(&mut lookup, &[area("1", "New")]);
        assert_eq!(lookup["1"].title, "New");
    }

    #[test]
    fn test_blank_search_is_no_filter() {
        assert_eq!(search_term("   "), None);
        assert_eq!(search_term(" kath "), Some("kath".to_string()));
    }
}
