pub mod cow;
pub mod form;
pub mod lenient;
pub mod paging;
