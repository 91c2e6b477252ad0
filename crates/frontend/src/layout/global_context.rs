use contracts::domain::a001_widget::WidgetMode;
use leptos::prelude::*;
use serde::{Deserialize, Serialize};
use web_sys::window;

/// Query-string state: `?framework=12&mode=edit`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UrlState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub framework: Option<String>,
    #[serde(default)]
    pub mode: WidgetMode,
}

impl UrlState {
    pub fn parse(search: &str) -> Self {
        serde_qs::from_str(search.trim_start_matches('?')).unwrap_or_else(|e| {
            log::warn!("Ignoring malformed query string {:?}: {}", search, e);
            Self::default()
        })
    }

    pub fn to_query(&self) -> String {
        match serde_qs::to_string(self) {
            Ok(qs) => format!("?{}", qs),
            Err(e) => {
                log::error!("Failed to serialize url state: {}", e);
                String::new()
            }
        }
    }
}

#[derive(Clone, Copy)]
pub struct AppGlobalContext {
    pub framework_id: RwSignal<Option<String>>,
    pub mode: RwSignal<WidgetMode>,
    pub right_open: RwSignal<bool>,
}

impl AppGlobalContext {
    pub fn new() -> Self {
        Self {
            framework_id: RwSignal::new(None),
            mode: RwSignal::new(WidgetMode::View),
            right_open: RwSignal::new(true),
        }
    }

    pub fn toggle_right(&self) {
        self.right_open.update(|open| *open = !*open);
    }

    pub fn toggle_mode(&self) {
        self.mode.update(|mode| {
            *mode = match mode {
                WidgetMode::Edit => WidgetMode::View,
                WidgetMode::View => WidgetMode::Edit,
            }
        });
    }

    /// Reads the initial state from the URL and keeps the URL in sync afterwards.
    pub fn init_url_sync(&self) {
        let search = window()
            .and_then(|w| w.location().search().ok())
            .unwrap_or_default();
        let state = UrlState::parse(&search);
        self.framework_id.set(state.framework);
        self.mode.set(state.mode);

        let this = *self;
        Effect::new(move |_| {
            let new_url = UrlState {
                framework: this.framework_id.get(),
                mode: this.mode.get(),
            }
            .to_query();

            let current_search = window()
                .and_then(|w| w.location().search().ok())
                .unwrap_or_default();

            if current_search != new_url {
                if let Some(w) = window() {
                    if let Ok(history) = w.history() {
                        let _ = history.replace_state_with_url(
                            &wasm_bindgen::JsValue::NULL,
                            "",
                            Some(&new_url),
                        );
                    }
                }
            }
        });
    }
}

impl Default for AppGlobalContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_framework_and_mode() {
        let state = UrlState::parse("?framework=12&mode=edit");
        assert_eq!(state.framework.as_deref(), Some("12"));
        assert_eq!(state.mode, WidgetMode::Edit);
    }

    #[test]
    fn test_mode_defaults_to_view() {
        let state = UrlState::parse("");
        assert_eq!(state.framework, None);
        assert_eq!(state.mode, WidgetMode::View);
    }

    #[test]
    fn test_malformed_mode_falls_back_to_default() {
        assert_eq!(UrlState::parse("?mode=sideways"), UrlState::default());
    }
}
