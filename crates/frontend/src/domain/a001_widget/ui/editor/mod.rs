//! Widget editor UI
//!
//! - view_model.rs: editing session, error lookup and commands
//! - view.rs: common fields and the per-kind section
//! - sections/: property editors per kind

mod sections;
mod view;
mod view_model;

pub use view::WidgetEditor;
pub use view_model::WidgetEditorViewModel;
