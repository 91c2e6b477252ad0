use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::conditional::Conditional;
use super::properties::WidgetProperties;
use crate::domain::common::{new_client_id, new_item_key};
use crate::enums::{WidgetKind, WidgetWidth};
use crate::shared::form::Lens;
use crate::shared::lenient::or_default;

#[derive(Debug, Error, PartialEq)]
pub enum WidgetError {
    #[error("unknown widget kind '{0}'")]
    UnknownKind(String),
}

// ============================================================================
// Wire record
// ============================================================================

/// Widget as delivered by / sent to the API.
///
/// `widget_id` stays a plain string so that kinds added on the server do not
/// break loading a framework; they resolve to `None` instead.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WidgetRecord {
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "or_default")]
    pub id: Option<String>,
    #[serde(deserialize_with = "or_default")]
    pub client_id: String,
    #[serde(deserialize_with = "or_default")]
    pub key: String,
    #[serde(deserialize_with = "or_default")]
    pub title: String,
    #[serde(deserialize_with = "or_default")]
    pub order: i32,
    #[serde(deserialize_with = "or_default")]
    pub width: WidgetWidth,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "or_default")]
    pub version: Option<i32>,
    #[serde(deserialize_with = "or_default")]
    pub widget_id: String,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "or_default")]
    pub properties: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "or_default")]
    pub conditional: Option<Conditional>,
}

impl WidgetRecord {
    pub fn kind(&self) -> Option<WidgetKind> {
        WidgetKind::from_code(&self.widget_id)
    }

    /// Typed widget, or `None` for an unknown kind.
    ///
    /// Malformed fields default one by one; a `properties` value that is not
    /// an object is replaced by the kind's empty configuration.
    pub fn resolve(&self) -> Option<Widget> {
        let kind = self.kind()?;
        let properties = match WidgetProperties::from_json(kind, self.properties.as_ref()) {
            Ok(properties) => properties,
            Err(e) => {
                log::warn!(
                    "widget {} ({}): malformed properties, using defaults: {}",
                    self.client_id,
                    self.widget_id,
                    e
                );
                WidgetProperties::default_for(kind)
            }
        };
        Some(Widget {
            id: self.id.clone(),
            client_id: self.client_id.clone(),
            key: self.key.clone(),
            title: self.title.clone(),
            order: self.order,
            width: self.width,
            version: self.version,
            properties,
            conditional: self.conditional.clone(),
        })
    }
}

// ============================================================================
// Typed widget
// ============================================================================

/// One configurable field of an analytical framework
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "WidgetRecord", into = "WidgetRecord")]
pub struct Widget {
    /// Server identity, absent until persisted
    pub id: Option<String>,
    /// Client identity, always present
    pub client_id: String,
    /// Semantic key that survives framework edits
    pub key: String,
    pub title: String,
    pub order: i32,
    pub width: WidgetWidth,
    pub version: Option<i32>,
    pub properties: WidgetProperties,
    /// Shown only while the parent widget's value satisfies this rule
    pub conditional: Option<Conditional>,
}

impl Widget {
    /// New, unsaved widget of `kind` with fresh client id and key
    pub fn new(kind: WidgetKind) -> Self {
        Self {
            id: None,
            client_id: new_client_id(),
            key: new_item_key(),
            title: String::new(),
            order: -1,
            width: WidgetWidth::default(),
            version: None,
            properties: WidgetProperties::default_for(kind),
            conditional: None,
        }
    }

    pub fn kind(&self) -> WidgetKind {
        self.properties.kind()
    }

    /// Server id when persisted, otherwise the client id
    pub fn identity(&self) -> &str {
        self.id.as_deref().unwrap_or(&self.client_id)
    }

    pub fn to_record(&self) -> WidgetRecord {
        WidgetRecord {
            id: self.id.clone(),
            client_id: self.client_id.clone(),
            key: self.key.clone(),
            title: self.title.clone(),
            order: self.order,
            width: self.width,
            version: self.version,
            widget_id: self.kind().code().to_string(),
            properties: Some(self.properties.to_json()),
            conditional: self.conditional.clone(),
        }
    }

    pub fn title_lens() -> Lens<Widget, String> {
        Lens::new(|w: &Widget| &w.title, |w: &mut Widget| &mut w.title)
    }

    pub fn width_lens() -> Lens<Widget, WidgetWidth> {
        Lens::new(|w: &Widget| &w.width, |w: &mut Widget| &mut w.width)
    }

    pub fn properties_lens() -> Lens<Widget, WidgetProperties> {
        Lens::new(|w: &Widget| &w.properties, |w: &mut Widget| &mut w.properties)
    }

    pub fn conditional_lens() -> Lens<Widget, Option<Conditional>> {
        Lens::new(|w: &Widget| &w.conditional, |w: &mut Widget| &mut w.conditional)
    }
}

impl TryFrom<WidgetRecord> for Widget {
    type Error = WidgetError;

    fn try_from(record: WidgetRecord) -> Result<Self, Self::Error> {
        record
            .resolve()
            .ok_or_else(|| WidgetError::UnknownKind(record.widget_id.clone()))
    }
}

impl From<Widget> for WidgetRecord {
    fn from(widget: Widget) -> Self {
        widget.to_record()
    }
}
