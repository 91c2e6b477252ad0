//! Field-level defaulting for loosely typed API payloads

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};

/// Deserialize a field, turning `null` or a value of the wrong shape into
/// `T::default()`. Only the field is lost, not the object around it.
pub fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(T::default());
    }
    match serde_json::from_value(value) {
        Ok(parsed) => Ok(parsed),
        Err(e) => {
            log::warn!("ignoring malformed field: {}", e);
            Ok(T::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Default, Deserialize)]
    #[serde(default)]
    struct Row {
        #[serde(deserialize_with = "or_default")]
        label: String,
        #[serde(deserialize_with = "or_default")]
        order: i32,
        #[serde(deserialize_with = "or_default")]
        tags: Vec<String>,
    }

    #[test]
    fn test_null_and_mistyped_fields_default() {
        let row: Row = serde_json::from_value(json!({
            "label": null,
            "order": "three",
            "tags": ["a"]
        }))
        .unwrap();
        assert_eq!(row.label, "");
        assert_eq!(row.order, 0);
        assert_eq!(row.tags, vec!["a".to_string()]);
    }

    #[test]
    fn test_missing_field_uses_container_default() {
        let row: Row = serde_json::from_value(json!({"label": "x"})).unwrap();
        assert_eq!(row.label, "x");
        assert!(row.tags.is_empty());
    }
}
