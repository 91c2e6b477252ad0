pub mod aggregate;

pub use aggregate::Framework;
