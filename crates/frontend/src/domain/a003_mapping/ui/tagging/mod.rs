//! Tag mapping panel: links prediction tags to widget sub-elements
//!
//! - model.rs: API calls (tags, mappings)
//! - view_model.rs: selected tag, toggles, auto-match, coverage
//! - view.rs: the panel

mod model;
mod view;
mod view_model;

pub use view::TaggingPanel;
pub use view_model::TaggingViewModel;
