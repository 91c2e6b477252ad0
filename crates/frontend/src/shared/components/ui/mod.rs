pub mod badge;
pub mod button;
pub mod checkbox;
pub mod input;
pub mod select;

pub use badge::Badge;
pub use button::Button;
pub use checkbox::Checkbox;
pub use input::{FieldError, Input};
pub use select::Select;
