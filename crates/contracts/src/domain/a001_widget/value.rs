//! Runtime values entered against a widget (entry attribute data)

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::enums::WidgetKind;
use crate::shared::cow::SharedMap;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DateRangeValue {
    pub start_date: String,
    pub end_date: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TimeRangeValue {
    pub start_time: String,
    pub end_time: String,
}

/// cell key -> selected
pub type Matrix1dRowValue = BTreeMap<String, bool>;
/// row key -> row selection
pub type Matrix1dValue = SharedMap<Matrix1dRowValue>;

/// column key -> selected sub-column keys
pub type Matrix2dColumnValue = BTreeMap<String, Vec<String>>;
/// sub-row key -> column selection
pub type Matrix2dRowValue = SharedMap<Matrix2dColumnValue>;
/// row key -> sub-row selection
pub type Matrix2dValue = SharedMap<Matrix2dRowValue>;

/// Typed value of one widget
#[derive(Debug, Clone, PartialEq)]
pub enum WidgetValue {
    Text(String),
    Number(f64),
    Date(String),
    Time(String),
    DateRange(DateRangeValue),
    TimeRange(TimeRangeValue),
    Scale(String),
    Select(String),
    MultiSelect(Vec<String>),
    Matrix1d(Matrix1dValue),
    Matrix2d(Matrix2dValue),
    Organigram(Vec<String>),
    Geo(Vec<String>),
}

/// Wire wrapper: attribute data is `{"value": ...}`
#[derive(Serialize, Deserialize)]
struct DataEnvelope<T> {
    value: T,
}

impl WidgetValue {
    pub fn kind(&self) -> WidgetKind {
        match self {
            WidgetValue::Text(_) => WidgetKind::Text,
            WidgetValue::Number(_) => WidgetKind::Number,
            WidgetValue::Date(_) => WidgetKind::Date,
            WidgetValue::Time(_) => WidgetKind::Time,
            WidgetValue::DateRange(_) => WidgetKind::DateRange,
            WidgetValue::TimeRange(_) => WidgetKind::TimeRange,
            WidgetValue::Scale(_) => WidgetKind::Scale,
            WidgetValue::Select(_) => WidgetKind::Select,
            WidgetValue::MultiSelect(_) => WidgetKind::MultiSelect,
            WidgetValue::Matrix1d(_) => WidgetKind::Matrix1d,
            WidgetValue::Matrix2d(_) => WidgetKind::Matrix2d,
            WidgetValue::Organigram(_) => WidgetKind::Organigram,
            WidgetValue::Geo(_) => WidgetKind::Geo,
        }
    }

    /// Parse `{"value": ...}` attribute data for a kind
    pub fn from_data(kind: WidgetKind, data: &serde_json::Value) -> Result<Self, serde_json::Error> {
        fn unwrap<T: serde::de::DeserializeOwned>(
            data: &serde_json::Value,
        ) -> Result<T, serde_json::Error> {
            serde_json::from_value::<DataEnvelope<T>>(data.clone()).map(|d| d.value)
        }

        Ok(match kind {
            WidgetKind::Text => WidgetValue::Text(unwrap(data)?),
            WidgetKind::Number => WidgetValue::Number(unwrap(data)?),
            WidgetKind::Date => WidgetValue::Date(unwrap(data)?),
            WidgetKind::Time => WidgetValue::Time(unwrap(data)?),
            WidgetKind::DateRange => WidgetValue::DateRange(unwrap(data)?),
            WidgetKind::TimeRange => WidgetValue::TimeRange(unwrap(data)?),
            WidgetKind::Scale => WidgetValue::Scale(unwrap(data)?),
            WidgetKind::Select => WidgetValue::Select(unwrap(data)?),
            WidgetKind::MultiSelect => WidgetValue::MultiSelect(unwrap(data)?),
            WidgetKind::Matrix1d => WidgetValue::Matrix1d(unwrap(data)?),
            WidgetKind::Matrix2d => WidgetValue::Matrix2d(unwrap(data)?),
            WidgetKind::Organigram => WidgetValue::Organigram(unwrap(data)?),
            WidgetKind::Geo => WidgetValue::Geo(unwrap(data)?),
        })
    }

    /// Serialize to `{"value": ...}` attribute data
    pub fn to_data(&self) -> serde_json::Value {
        fn wrap<T: Serialize>(value: &T) -> serde_json::Value {
            serde_json::to_value(DataEnvelope { value }).unwrap_or_default()
        }

        match self {
            WidgetValue::Text(v) | WidgetValue::Date(v) | WidgetValue::Time(v) => wrap(v),
            WidgetValue::Scale(v) | WidgetValue::Select(v) => wrap(v),
            WidgetValue::Number(v) => wrap(v),
            WidgetValue::DateRange(v) => wrap(v),
            WidgetValue::TimeRange(v) => wrap(v),
            WidgetValue::MultiSelect(v) | WidgetValue::Organigram(v) | WidgetValue::Geo(v) => {
                wrap(v)
            }
            WidgetValue::Matrix1d(v) => wrap(v),
            WidgetValue::Matrix2d(v) => wrap(v),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_matrix1d_data_parses_into_shared_rows() {
        let data = json!({"value": {"r1": {"c1": true, "c2": false}}});
        let value = WidgetValue::from_data(WidgetKind::Matrix1d, &data).unwrap();
        match &value {
            WidgetValue::Matrix1d(rows) => {
                assert_eq!(rows["r1"].get("c1"), Some(&true));
                assert_eq!(rows["r1"].get("c2"), Some(&false));
            }
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(value.to_data(), data);
    }

    #[test]
    fn test_matrix2d_data_shape() {
        let data = json!({"value": {"row-1": {"sub-row-1": {"column-1": ["sub-col-1"]}}}});
        let value = WidgetValue::from_data(WidgetKind::Matrix2d, &data).unwrap();
        match value {
            WidgetValue::Matrix2d(rows) => {
                assert_eq!(rows["row-1"]["sub-row-1"]["column-1"], vec!["sub-col-1".to_string()]);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_shape_mismatch_is_an_error() {
        let data = json!({"value": "not a number"});
        assert!(WidgetValue::from_data(WidgetKind::Number, &data).is_err());
        assert!(WidgetValue::from_data(WidgetKind::Text, &json!({})).is_err());
    }

    #[test]
    fn test_range_value_wire_shape() {
        let value = WidgetValue::DateRange(DateRangeValue {
            start_date: "2021-01-01".into(),
            end_date: "2021-02-01".into(),
        });
        assert_eq!(
            value.to_data(),
            json!({"value": {"startDate": "2021-01-01", "endDate": "2021-02-01"}})
        );
    }
}
