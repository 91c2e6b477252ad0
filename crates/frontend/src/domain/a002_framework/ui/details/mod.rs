//! Framework details page
//!
//! - model.rs: API calls (framework, entry preview, geo areas)
//! - view_model.rs: page state, widget editing and entry values
//! - geo_options.rs: paged geo area search behind GEO inputs
//! - view.rs: the page

mod geo_options;
mod model;
mod view;
mod view_model;

pub use view::FrameworkDetails;
pub use view_model::FrameworkDetailsViewModel;
