pub mod widget_kind;
pub mod widget_width;

pub use widget_kind::WidgetKind;
pub use widget_width::WidgetWidth;
