//! Form-state primitives shared by editors and inputs
//!
//! - errors.rs: structured validation errors (field / non-field / nested)
//! - lens.rs: typed keys into a state tree with copy-and-replace updates

mod errors;
mod lens;

pub use errors::{FieldError, FormErrors};
pub use lens::Lens;
