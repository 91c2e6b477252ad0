//! Prediction-tag mappings for assisted tagging
//!
//! - aggregate.rs: mapping rows and the mapping list operations
//! - possible.rs: every mappable sub-element of a widget
//! - tag.rs: prediction tags and label matching

pub mod aggregate;
pub mod possible;
pub mod tag;

pub use aggregate::{Association, MappingError, MappingItem, MappingList, MappingTarget};
pub use possible::{possible_mappings, PossibleMapping};
pub use tag::{auto_match, PredictionTag};
