use serde::{Deserialize, Serialize};

/// Closed set of analytical-framework widget kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum WidgetKind {
    #[serde(rename = "TEXT")]
    Text,
    #[serde(rename = "NUMBER")]
    Number,
    #[serde(rename = "DATE")]
    Date,
    #[serde(rename = "TIME")]
    Time,
    #[serde(rename = "DATE_RANGE")]
    DateRange,
    #[serde(rename = "TIME_RANGE")]
    TimeRange,
    #[serde(rename = "SCALE")]
    Scale,
    #[serde(rename = "SELECT")]
    Select,
    #[serde(rename = "MULTISELECT")]
    MultiSelect,
    #[serde(rename = "MATRIX1D")]
    Matrix1d,
    #[serde(rename = "MATRIX2D")]
    Matrix2d,
    #[serde(rename = "ORGANIGRAM")]
    Organigram,
    #[serde(rename = "GEO")]
    Geo,
}

impl WidgetKind {
    /// Wire code (`widgetId`)
    pub fn code(&self) -> &'static str {
        match self {
            WidgetKind::Text => "TEXT",
            WidgetKind::Number => "NUMBER",
            WidgetKind::Date => "DATE",
            WidgetKind::Time => "TIME",
            WidgetKind::DateRange => "DATE_RANGE",
            WidgetKind::TimeRange => "TIME_RANGE",
            WidgetKind::Scale => "SCALE",
            WidgetKind::Select => "SELECT",
            WidgetKind::MultiSelect => "MULTISELECT",
            WidgetKind::Matrix1d => "MATRIX1D",
            WidgetKind::Matrix2d => "MATRIX2D",
            WidgetKind::Organigram => "ORGANIGRAM",
            WidgetKind::Geo => "GEO",
        }
    }

    /// Human readable name
    pub fn display_name(&self) -> &'static str {
        match self {
            WidgetKind::Text => "Text",
            WidgetKind::Number => "Number",
            WidgetKind::Date => "Date",
            WidgetKind::Time => "Time",
            WidgetKind::DateRange => "Date Range",
            WidgetKind::TimeRange => "Time Range",
            WidgetKind::Scale => "Scale",
            WidgetKind::Select => "Single Select",
            WidgetKind::MultiSelect => "Multi Select",
            WidgetKind::Matrix1d => "Matrix 1D",
            WidgetKind::Matrix2d => "Matrix 2D",
            WidgetKind::Organigram => "Organigram",
            WidgetKind::Geo => "Geo Location",
        }
    }

    pub fn all() -> Vec<WidgetKind> {
        vec![
            WidgetKind::Text,
            WidgetKind::Number,
            WidgetKind::Date,
            WidgetKind::Time,
            WidgetKind::DateRange,
            WidgetKind::TimeRange,
            WidgetKind::Scale,
            WidgetKind::Select,
            WidgetKind::MultiSelect,
            WidgetKind::Matrix1d,
            WidgetKind::Matrix2d,
            WidgetKind::Organigram,
            WidgetKind::Geo,
        ]
    }

    /// Parse a wire code. Unknown codes (kinds added by the server later) give `None`.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "TEXT" => Some(WidgetKind::Text),
            "NUMBER" => Some(WidgetKind::Number),
            "DATE" => Some(WidgetKind::Date),
            "TIME" => Some(WidgetKind::Time),
            "DATE_RANGE" => Some(WidgetKind::DateRange),
            "TIME_RANGE" => Some(WidgetKind::TimeRange),
            "SCALE" => Some(WidgetKind::Scale),
            "SELECT" => Some(WidgetKind::Select),
            "MULTISELECT" => Some(WidgetKind::MultiSelect),
            "MATRIX1D" => Some(WidgetKind::Matrix1d),
            "MATRIX2D" => Some(WidgetKind::Matrix2d),
            "ORGANIGRAM" => Some(WidgetKind::Organigram),
            "GEO" => Some(WidgetKind::Geo),
            _ => None,
        }
    }

    /// Kinds whose sub-elements can carry prediction-tag mappings
    pub fn supports_tag_mapping(&self) -> bool {
        matches!(
            self,
            WidgetKind::Scale
                | WidgetKind::Select
                | WidgetKind::MultiSelect
                | WidgetKind::Matrix1d
                | WidgetKind::Matrix2d
                | WidgetKind::Organigram
        )
    }
}

impl std::fmt::Display for WidgetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_round_trip() {
        for kind in WidgetKind::all() {
            assert_eq!(WidgetKind::from_code(kind.code()), Some(kind));
        }
        assert_eq!(WidgetKind::all().len(), 13);
    }

    #[test]
    fn test_unknown_code() {
        assert_eq!(WidgetKind::from_code("UNKNOWN_KIND"), None);
        assert_eq!(WidgetKind::from_code("matrix1d"), None);
    }

    #[test]
    fn test_serde_uses_wire_code() {
        let json = serde_json::to_string(&WidgetKind::MultiSelect).unwrap();
        assert_eq!(json, "\"MULTISELECT\"");
        let kind: WidgetKind = serde_json::from_str("\"DATE_RANGE\"").unwrap();
        assert_eq!(kind, WidgetKind::DateRange);
    }
}
