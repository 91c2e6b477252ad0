//! Widget value inputs
//!
//! Every input reports `(value, name)`; `None` clears the value.

mod basic;
mod choice;
mod display;
mod geo;
mod matrix;
mod organigram;
mod view;

pub use display::ReadOnlyValue;
pub use geo::GeoOptions;
pub use view::WidgetInput;
