//! Widget aggregate: configuration, values and their state transitions
//!
//! - aggregate.rs: wire record and typed widget
//! - properties.rs / items.rs: per-kind configuration
//! - value.rs: per-kind values
//! - validation.rs: config and value schemas
//! - editor.rs / input.rs / display.rs: editor session, input transitions, read-only labels
//! - dispatch.rs: (kind, mode) to component family
//! - conditional.rs: visibility rules on a parent widget's value
//! - attribute.rs: entry attributes bound to widgets

pub mod aggregate;
pub mod attribute;
pub mod conditional;
pub mod dispatch;
pub mod display;
pub mod editor;
pub mod input;
pub mod items;
pub mod properties;
pub mod validation;
pub mod value;

pub use aggregate::{Widget, WidgetError, WidgetRecord};
pub use attribute::{Attribute, EntryAttributes};
pub use conditional::{Condition, ConditionOperator, Conditional, Conjunction};
pub use dispatch::{dispatch, WidgetMode, WidgetSurface};
pub use display::{display_value, DisplayGroup, DisplayValue, GeoArea, GeoAreaLookup};
pub use editor::EditorSession;
pub use properties::WidgetProperties;
pub use validation::{validate_config, validate_value};
pub use value::WidgetValue;
