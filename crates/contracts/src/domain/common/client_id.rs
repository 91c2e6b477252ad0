use uuid::Uuid;

/// Client-generated stable identity for widgets, list items and attributes
pub fn new_client_id() -> String {
    Uuid::new_v4().to_string()
}

/// Semantic key for a new sub-element (row, cell, option, ...)
pub fn new_item_key() -> String {
    format!("auto-{}", Uuid::new_v4().simple())
}
