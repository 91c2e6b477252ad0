use serde::{Deserialize, Serialize};

/// Layout width of a widget on the framework canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WidgetWidth {
    #[default]
    Full,
    Half,
}

impl WidgetWidth {
    pub fn code(&self) -> &'static str {
        match self {
            WidgetWidth::Full => "FULL",
            WidgetWidth::Half => "HALF",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "FULL" => Some(WidgetWidth::Full),
            "HALF" => Some(WidgetWidth::Half),
            _ => None,
        }
    }
}
