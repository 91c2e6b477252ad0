pub mod editor;
pub mod input;
pub mod slot;

pub use editor::WidgetEditor;
pub use input::{GeoOptions, ReadOnlyValue, WidgetInput};
pub use slot::WidgetSlot;
