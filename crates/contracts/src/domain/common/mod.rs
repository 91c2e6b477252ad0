//! Common types and helpers for all domain modules

pub mod client_id;
pub mod list_item;

pub use client_id::{new_client_id, new_item_key};
pub use list_item::ListItem;
