use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Error attached to a single field: either a message or the errors of a nested object/array
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldError {
    Message(String),
    Nested(FormErrors),
}

/// Validation result of an object (or array) in a form.
///
/// `non_field` holds messages that belong to the object as a whole
/// (cross-field invariants, "at least one row is required"), `fields`
/// holds per-field errors. Array members are keyed by the member key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormErrors {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub non_field: Vec<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub fields: BTreeMap<String, FieldError>,
}

impl FormErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.non_field.is_empty() && self.fields.is_empty()
    }

    pub fn add_non_field(&mut self, message: impl Into<String>) {
        self.non_field.push(message.into());
    }

    /// Record a message for `name`. The first message for a field wins.
    pub fn add_field(&mut self, name: impl Into<String>, message: impl Into<String>) {
        self.fields
            .entry(name.into())
            .or_insert_with(|| FieldError::Message(message.into()));
    }

    /// Attach errors of a nested object; empty errors are not recorded.
    pub fn add_nested(&mut self, name: impl Into<String>, nested: FormErrors) {
        if !nested.is_empty() {
            self.fields.insert(name.into(), FieldError::Nested(nested));
        }
    }

    /// Record a "required" message when `value` is blank
    pub fn require_text(&mut self, name: &str, value: &str) {
        if value.trim().is_empty() {
            self.add_field(name, "This field is required.");
        }
    }

    pub fn field(&self, name: &str) -> Option<&FieldError> {
        self.fields.get(name)
    }

    pub fn message(&self, name: &str) -> Option<&str> {
        match self.fields.get(name) {
            Some(FieldError::Message(m)) => Some(m.as_str()),
            _ => None,
        }
    }

    pub fn nested(&self, name: &str) -> Option<&FormErrors> {
        match self.fields.get(name) {
            Some(FieldError::Nested(n)) => Some(n),
            _ => None,
        }
    }

    /// Walk a path of field names / member keys
    pub fn at(&self, path: &[&str]) -> Option<&FieldError> {
        let (last, parents) = path.split_last()?;
        let mut current = self;
        for name in parents {
            current = current.nested(name)?;
        }
        current.field(last)
    }

    /// Number of leaf messages in the tree
    pub fn count(&self) -> usize {
        self.non_field.len()
            + self
                .fields
                .values()
                .map(|f| match f {
                    FieldError::Message(_) => 1,
                    FieldError::Nested(n) => n.count(),
                })
                .sum::<usize>()
    }

    /// First message in the tree, used for a compact summary line
    pub fn first_message(&self) -> Option<String> {
        if let Some(m) = self.non_field.first() {
            return Some(m.clone());
        }
        self.fields.iter().find_map(|(name, f)| match f {
            FieldError::Message(m) => Some(format!("{}: {}", name, m)),
            FieldError::Nested(n) => n.first_message().map(|m| format!("{} / {}", name, m)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_nested_is_not_recorded() {
        let mut errors = FormErrors::new();
        errors.add_nested("properties", FormErrors::new());
        assert!(errors.is_empty());
    }

    #[test]
    fn test_path_lookup_and_count() {
        let mut cell = FormErrors::new();
        cell.add_field("label", "This field is required.");
        let mut cells = FormErrors::new();
        cells.add_non_field("At least one cell is required.");
        cells.add_nested("c1", cell);
        let mut errors = FormErrors::new();
        errors.add_nested("cells", cells);
        errors.add_field("title", "This field is required.");

        assert!(matches!(
            errors.at(&["cells", "c1", "label"]),
            Some(FieldError::Message(_))
        ));
        assert_eq!(errors.count(), 3);
        assert!(errors.at(&["cells", "c2", "label"]).is_none());
    }

    #[test]
    fn test_first_message_wins() {
        let mut errors = FormErrors::new();
        errors.add_field("title", "first");
        errors.add_field("title", "second");
        assert_eq!(errors.message("title"), Some("first"));
    }
}
