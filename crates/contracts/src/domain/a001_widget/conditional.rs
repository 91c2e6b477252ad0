//! Conditional widgets: a widget is shown only while the value of its
//! parent widget satisfies a list of conditions.

use serde::{Deserialize, Serialize};

use super::aggregate::Widget;
use super::items::OrganigramNode;
use super::properties::WidgetProperties;
use super::validation::{parse_date, parse_time, INVALID_DATE, INVALID_TIME, REQUIRED};
use super::value::WidgetValue;
use crate::domain::common::list_item::{self, ListItem};
use crate::domain::common::{new_client_id, new_item_key};
use crate::enums::WidgetKind;
use crate::shared::form::FormErrors;
use crate::shared::lenient::or_default;

pub const CONDITIONS_LIMIT: usize = 10;

// ============================================================================
// Operators
// ============================================================================

/// How a condition is joined with the one after it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Conjunction {
    #[default]
    And,
    Or,
    Xor,
}

impl Conjunction {
    pub fn all() -> [Conjunction; 3] {
        [Conjunction::And, Conjunction::Or, Conjunction::Xor]
    }

    pub fn code(&self) -> &'static str {
        match self {
            Conjunction::And => "AND",
            Conjunction::Or => "OR",
            Conjunction::Xor => "XOR",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::all().into_iter().find(|c| c.code() == code)
    }

    pub fn combine(&self, left: bool, right: bool) -> bool {
        match self {
            Conjunction::And => left && right,
            Conjunction::Or => left || right,
            Conjunction::Xor => left != right,
        }
    }
}

/// Whether every listed key or at least one must be selected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Modifier {
    Every,
    #[default]
    Some,
}

impl Modifier {
    pub fn code(&self) -> &'static str {
        match self {
            Modifier::Every => "every",
            Modifier::Some => "some",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "every" => Some(Modifier::Every),
            "some" => Some(Modifier::Some),
            _ => None,
        }
    }

    fn matches(&self, keys: &[String], selected: impl Fn(&str) -> bool) -> bool {
        match self {
            Modifier::Every => !keys.is_empty() && keys.iter().all(|k| selected(k)),
            Modifier::Some => keys.iter().any(|k| selected(k)),
        }
    }
}

/// Shape of the operand a condition operator needs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperandShape {
    None,
    Number,
    Text,
    Date,
    Time,
    /// One key out of the parent's options
    Key,
    /// A list of keys out of the parent's options
    Keys,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConditionOperator {
    #[default]
    Empty,
    NumberGreaterThan,
    NumberLessThan,
    NumberEqualTo,
    TextStartsWith,
    TextEndsWith,
    TextContains,
    SingleSelectionSelected,
    MultiSelectionSelected,
    OrganigramSelected,
    OrganigramDescendentSelected,
    ScaleSelected,
    ScaleMoreThan,
    ScaleLessThan,
    DateAfter,
    DateBefore,
    DateEqualTo,
    TimeAfter,
    TimeBefore,
    TimeEqualTo,
    DateRangeAfter,
    DateRangeBefore,
    DateRangeIncludes,
    TimeRangeAfter,
    TimeRangeBefore,
    TimeRangeIncludes,
    Matrix1dCellsSelected,
    Matrix1dRowsSelected,
    Matrix2dColumnsSelected,
    Matrix2dRowsSelected,
    Matrix2dSubColumnsSelected,
    Matrix2dSubRowsSelected,
}

impl ConditionOperator {
    /// Operators offered for a parent widget of `kind`, `Empty` last
    pub fn for_kind(kind: WidgetKind) -> Vec<ConditionOperator> {
        use ConditionOperator::*;
        let specific: &[ConditionOperator] = match kind {
            WidgetKind::Number => &[NumberGreaterThan, NumberLessThan, NumberEqualTo],
            WidgetKind::Text => &[TextStartsWith, TextEndsWith, TextContains],
            WidgetKind::Select => &[SingleSelectionSelected],
            WidgetKind::MultiSelect => &[MultiSelectionSelected],
            WidgetKind::Organigram => &[OrganigramSelected, OrganigramDescendentSelected],
            WidgetKind::Scale => &[ScaleSelected, ScaleMoreThan, ScaleLessThan],
            WidgetKind::Date => &[DateAfter, DateBefore, DateEqualTo],
            WidgetKind::Time => &[TimeAfter, TimeBefore, TimeEqualTo],
            WidgetKind::DateRange => &[DateRangeAfter, DateRangeBefore, DateRangeIncludes],
            WidgetKind::TimeRange => &[TimeRangeAfter, TimeRangeBefore, TimeRangeIncludes],
            WidgetKind::Matrix1d => &[Matrix1dRowsSelected, Matrix1dCellsSelected],
            WidgetKind::Matrix2d => &[
                Matrix2dRowsSelected,
                Matrix2dSubRowsSelected,
                Matrix2dColumnsSelected,
                Matrix2dSubColumnsSelected,
            ],
            WidgetKind::Geo => &[],
        };
        let mut operators = specific.to_vec();
        operators.push(Empty);
        operators
    }

    pub fn applies_to(&self, kind: WidgetKind) -> bool {
        Self::for_kind(kind).contains(self)
    }

    pub fn code(&self) -> &'static str {
        use ConditionOperator::*;
        match self {
            Empty => "empty",
            NumberGreaterThan => "number-greater-than",
            NumberLessThan => "number-less-than",
            NumberEqualTo => "number-equal-to",
            TextStartsWith => "text-starts-with",
            TextEndsWith => "text-ends-with",
            TextContains => "text-contains",
            SingleSelectionSelected => "single-selection-selected",
            MultiSelectionSelected => "multi-selection-selected",
            OrganigramSelected => "organigram-selected",
            OrganigramDescendentSelected => "organigram-descendent-selected",
            ScaleSelected => "scale-selected",
            ScaleMoreThan => "scale-more-than",
            ScaleLessThan => "scale-less-than",
            DateAfter => "date-after",
            DateBefore => "date-before",
            DateEqualTo => "date-equal-to",
            TimeAfter => "time-after",
            TimeBefore => "time-before",
            TimeEqualTo => "time-equal-to",
            DateRangeAfter => "date-range-after",
            DateRangeBefore => "date-range-before",
            DateRangeIncludes => "date-range-includes",
            TimeRangeAfter => "time-range-after",
            TimeRangeBefore => "time-range-before",
            TimeRangeIncludes => "time-range-includes",
            Matrix1dCellsSelected => "matrix1d-cells-selected",
            Matrix1dRowsSelected => "matrix1d-rows-selected",
            Matrix2dColumnsSelected => "matrix2d-columns-selected",
            Matrix2dRowsSelected => "matrix2d-rows-selected",
            Matrix2dSubColumnsSelected => "matrix2d-sub-columns-selected",
            Matrix2dSubRowsSelected => "matrix2d-sub-rows-selected",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        WidgetKind::all()
            .into_iter()
            .flat_map(Self::for_kind)
            .find(|op| op.code() == code)
    }

    /// Label shown in the operator picker; `inverted` gives the negated wording
    pub fn label(&self, inverted: bool) -> &'static str {
        use ConditionOperator::*;
        let (plain, negated) = match self {
            Empty => ("Is empty", "Is not empty"),
            NumberGreaterThan => ("Is greater than", "Is not greater than"),
            NumberLessThan => ("Is less than", "Is not less than"),
            NumberEqualTo => ("Is equal to", "Is not equal to"),
            TextStartsWith => ("Starts with", "Does not start with"),
            TextEndsWith => ("Ends with", "Does not end with"),
            TextContains => ("Contains", "Does not contain"),
            SingleSelectionSelected | MultiSelectionSelected | ScaleSelected => {
                ("Is selected", "Is not selected")
            }
            OrganigramSelected => ("Is node selected", "Is node not selected"),
            OrganigramDescendentSelected => {
                ("Is node or descendant selected", "Is neither node nor descendant selected")
            }
            ScaleMoreThan => ("Is at least", "Is below"),
            ScaleLessThan => ("Is at most", "Is above"),
            DateAfter | TimeAfter | DateRangeAfter | TimeRangeAfter => ("Is after", "Is not after"),
            DateBefore | TimeBefore | DateRangeBefore | TimeRangeBefore => {
                ("Is before", "Is not before")
            }
            DateEqualTo | TimeEqualTo => ("Is equal to", "Is not equal to"),
            DateRangeIncludes | TimeRangeIncludes => ("Includes", "Does not include"),
            Matrix1dCellsSelected => ("Is cell selected", "Is cell not selected"),
            Matrix1dRowsSelected | Matrix2dRowsSelected => ("Is row selected", "Is row not selected"),
            Matrix2dColumnsSelected => ("Is column selected", "Is column not selected"),
            Matrix2dSubColumnsSelected => ("Is sub column selected", "Is sub column not selected"),
            Matrix2dSubRowsSelected => ("Is sub row selected", "Is sub row not selected"),
        };
        if inverted {
            negated
        } else {
            plain
        }
    }

    pub fn operand(&self) -> OperandShape {
        use ConditionOperator::*;
        match self {
            Empty => OperandShape::None,
            NumberGreaterThan | NumberLessThan | NumberEqualTo => OperandShape::Number,
            TextStartsWith | TextEndsWith | TextContains => OperandShape::Text,
            DateAfter | DateBefore | DateEqualTo | DateRangeAfter | DateRangeBefore
            | DateRangeIncludes => OperandShape::Date,
            TimeAfter | TimeBefore | TimeEqualTo | TimeRangeAfter | TimeRangeBefore
            | TimeRangeIncludes => OperandShape::Time,
            ScaleMoreThan | ScaleLessThan => OperandShape::Key,
            SingleSelectionSelected
            | MultiSelectionSelected
            | OrganigramSelected
            | OrganigramDescendentSelected
            | ScaleSelected
            | Matrix1dCellsSelected
            | Matrix1dRowsSelected
            | Matrix2dColumnsSelected
            | Matrix2dRowsSelected
            | Matrix2dSubColumnsSelected
            | Matrix2dSubRowsSelected => OperandShape::Keys,
        }
    }

    /// Operators whose key list is read with an every/some modifier
    pub fn has_modifier(&self) -> bool {
        use ConditionOperator::*;
        matches!(
            self,
            MultiSelectionSelected
                | OrganigramSelected
                | OrganigramDescendentSelected
                | Matrix1dCellsSelected
                | Matrix1dRowsSelected
                | Matrix2dColumnsSelected
                | Matrix2dRowsSelected
                | Matrix2dSubColumnsSelected
                | Matrix2dSubRowsSelected
        )
    }
}

// ============================================================================
// Conditions
// ============================================================================

/// Operand of a condition as stored on the wire
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConditionValue {
    Number(f64),
    Text(String),
    Keys(Vec<String>),
}

impl ConditionValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            ConditionValue::Number(n) if n.is_finite() => Some(*n),
            ConditionValue::Text(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ConditionValue::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_keys(&self) -> &[String] {
        match self {
            ConditionValue::Keys(keys) => keys,
            _ => &[],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Condition {
    #[serde(deserialize_with = "or_default")]
    pub key: String,
    #[serde(deserialize_with = "or_default")]
    pub order: i32,
    #[serde(deserialize_with = "or_default")]
    pub conjunction_operator: Conjunction,
    #[serde(deserialize_with = "or_default")]
    pub invert: bool,
    #[serde(deserialize_with = "or_default")]
    pub operator: ConditionOperator,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "or_default")]
    pub operator_modifier: Option<Modifier>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "or_default")]
    pub value: Option<ConditionValue>,
}

impl ListItem for Condition {
    fn item_key(&self) -> &str {
        &self.key
    }
    fn order(&self) -> i32 {
        self.order
    }
    fn set_order(&mut self, order: i32) {
        self.order = order;
    }
}

impl Condition {
    /// New "is empty" condition joined with AND
    pub fn new() -> Self {
        Self {
            key: new_item_key(),
            order: -1,
            ..Default::default()
        }
    }

    /// Switch the operator; the operand and modifier of the old one are dropped
    pub fn set_operator(&mut self, operator: ConditionOperator) {
        if self.operator == operator {
            return;
        }
        self.operator = operator;
        self.value = None;
        self.operator_modifier = operator.has_modifier().then_some(Modifier::Some);
    }

    fn keys(&self) -> &[String] {
        self.value.as_ref().map(ConditionValue::as_keys).unwrap_or(&[])
    }

    fn text(&self) -> Option<&str> {
        self.value.as_ref().and_then(ConditionValue::as_text)
    }

    fn modifier(&self) -> Modifier {
        self.operator_modifier.unwrap_or_default()
    }

    /// Result of this condition alone, `invert` applied
    pub fn holds(&self, parent: &Widget, value: Option<&WidgetValue>) -> bool {
        self.test(parent, value) != self.invert
    }

    fn test(&self, parent: &Widget, value: Option<&WidgetValue>) -> bool {
        use ConditionOperator::*;

        if self.operator == Empty {
            return is_empty_value(value);
        }
        let Some(value) = value else {
            return false;
        };

        match (self.operator, value) {
            (NumberGreaterThan | NumberLessThan | NumberEqualTo, WidgetValue::Number(n)) => {
                let Some(target) = self.value.as_ref().and_then(ConditionValue::as_number) else {
                    return false;
                };
                match self.operator {
                    NumberGreaterThan => *n > target,
                    NumberLessThan => *n < target,
                    _ => *n == target,
                }
            }
            (TextStartsWith | TextEndsWith | TextContains, WidgetValue::Text(text)) => {
                let Some(needle) = self.text().filter(|t| !t.is_empty()) else {
                    return false;
                };
                let (text, needle) = (text.to_lowercase(), needle.to_lowercase());
                match self.operator {
                    TextStartsWith => text.starts_with(&needle),
                    TextEndsWith => text.ends_with(&needle),
                    _ => text.contains(&needle),
                }
            }
            (SingleSelectionSelected, WidgetValue::Select(key))
            | (ScaleSelected, WidgetValue::Scale(key)) => self.keys().contains(key),
            (MultiSelectionSelected, WidgetValue::MultiSelect(keys))
            | (OrganigramSelected, WidgetValue::Organigram(keys)) => {
                self.modifier().matches(self.keys(), |k| keys.iter().any(|s| s == k))
            }
            (OrganigramDescendentSelected, WidgetValue::Organigram(keys)) => {
                let root = match &parent.properties {
                    WidgetProperties::Organigram(p) => p.options.as_ref(),
                    _ => None,
                };
                self.modifier().matches(self.keys(), |k| {
                    root.and_then(|r| r.find(k))
                        .map(|node| subtree_has(node, keys))
                        .unwrap_or(false)
                })
            }
            (ScaleMoreThan | ScaleLessThan, WidgetValue::Scale(key)) => {
                let rank = |k: &str| scale_rank(parent, k);
                match (rank(key.as_str()), self.text().and_then(rank)) {
                    (Some(selected), Some(target)) if self.operator == ScaleMoreThan => {
                        selected >= target
                    }
                    (Some(selected), Some(target)) => selected <= target,
                    _ => false,
                }
            }
            (DateAfter | DateBefore | DateEqualTo, WidgetValue::Date(date)) => {
                match (parse_date(date), self.text().and_then(parse_date)) {
                    (Some(d), Some(t)) => compare(self.operator, d, t),
                    _ => false,
                }
            }
            (TimeAfter | TimeBefore | TimeEqualTo, WidgetValue::Time(time)) => {
                match (parse_time(time), self.text().and_then(parse_time)) {
                    (Some(d), Some(t)) => compare(self.operator, d, t),
                    _ => false,
                }
            }
            (DateRangeAfter | DateRangeBefore | DateRangeIncludes, WidgetValue::DateRange(range)) => {
                let target = self.text().and_then(parse_date);
                let (start, end) = (parse_date(&range.start_date), parse_date(&range.end_date));
                match (start, end, target) {
                    (Some(start), Some(end), Some(t)) => in_range(self.operator, start, end, t),
                    _ => false,
                }
            }
            (TimeRangeAfter | TimeRangeBefore | TimeRangeIncludes, WidgetValue::TimeRange(range)) => {
                let target = self.text().and_then(parse_time);
                let (start, end) = (parse_time(&range.start_time), parse_time(&range.end_time));
                match (start, end, target) {
                    (Some(start), Some(end), Some(t)) => in_range(self.operator, start, end, t),
                    _ => false,
                }
            }
            (Matrix1dRowsSelected, WidgetValue::Matrix1d(rows)) => {
                self.modifier().matches(self.keys(), |k| {
                    rows.get(k).map(|cells| cells.values().any(|on| *on)).unwrap_or(false)
                })
            }
            (Matrix1dCellsSelected, WidgetValue::Matrix1d(rows)) => {
                self.modifier().matches(self.keys(), |k| {
                    rows.values().any(|cells| cells.get(k).copied().unwrap_or(false))
                })
            }
            (Matrix2dRowsSelected, WidgetValue::Matrix2d(rows)) => {
                self.modifier().matches(self.keys(), |k| {
                    rows.get(k)
                        .map(|sub_rows| sub_rows.values().any(|columns| !columns.is_empty()))
                        .unwrap_or(false)
                })
            }
            (Matrix2dSubRowsSelected, WidgetValue::Matrix2d(rows)) => {
                self.modifier().matches(self.keys(), |k| {
                    rows.values().any(|sub_rows| {
                        sub_rows.get(k).map(|columns| !columns.is_empty()).unwrap_or(false)
                    })
                })
            }
            (Matrix2dColumnsSelected, WidgetValue::Matrix2d(rows)) => {
                self.modifier().matches(self.keys(), |k| {
                    rows.values()
                        .flat_map(|sub_rows| sub_rows.values())
                        .any(|columns| columns.contains_key(k))
                })
            }
            (Matrix2dSubColumnsSelected, WidgetValue::Matrix2d(rows)) => {
                self.modifier().matches(self.keys(), |k| {
                    rows.values()
                        .flat_map(|sub_rows| sub_rows.values())
                        .flat_map(|columns| columns.values())
                        .any(|sub_columns| sub_columns.iter().any(|s| s == k))
                })
            }
            _ => false,
        }
    }
}

fn compare<T: PartialOrd>(operator: ConditionOperator, value: T, target: T) -> bool {
    use ConditionOperator::*;
    match operator {
        DateAfter | TimeAfter => value > target,
        DateBefore | TimeBefore => value < target,
        _ => value == target,
    }
}

fn in_range<T: PartialOrd>(operator: ConditionOperator, start: T, end: T, target: T) -> bool {
    use ConditionOperator::*;
    match operator {
        DateRangeAfter | TimeRangeAfter => start > target,
        DateRangeBefore | TimeRangeBefore => end < target,
        _ => start <= target && target <= end,
    }
}

fn subtree_has(node: &OrganigramNode, selected: &[String]) -> bool {
    selected.iter().any(|s| *s == node.key) || node.children.iter().any(|c| subtree_has(c, selected))
}

/// Position of a scale point in display order
fn scale_rank(parent: &Widget, key: &str) -> Option<usize> {
    match &parent.properties {
        WidgetProperties::Scale(p) => list_item::sort_by_order(&p.options)
            .iter()
            .position(|o| o.key == key),
        _ => None,
    }
}

/// A missing value, blank text, an empty selection or a grid without any selected cell
pub fn is_empty_value(value: Option<&WidgetValue>) -> bool {
    let Some(value) = value else {
        return true;
    };
    match value {
        WidgetValue::Text(s)
        | WidgetValue::Date(s)
        | WidgetValue::Time(s)
        | WidgetValue::Scale(s)
        | WidgetValue::Select(s) => s.trim().is_empty(),
        WidgetValue::Number(n) => !n.is_finite(),
        WidgetValue::DateRange(r) => r.start_date.trim().is_empty() && r.end_date.trim().is_empty(),
        WidgetValue::TimeRange(r) => r.start_time.trim().is_empty() && r.end_time.trim().is_empty(),
        WidgetValue::MultiSelect(keys) | WidgetValue::Organigram(keys) | WidgetValue::Geo(keys) => {
            keys.is_empty()
        }
        WidgetValue::Matrix1d(rows) => !rows.values().any(|cells| cells.values().any(|on| *on)),
        WidgetValue::Matrix2d(rows) => !rows
            .values()
            .flat_map(|sub_rows| sub_rows.values())
            .any(|columns| !columns.is_empty()),
    }
}

/// Fold conditions in display order. Each condition's conjunction joins it
/// with the next one; an empty list holds.
pub fn evaluate(conditions: &[Condition], parent: &Widget, value: Option<&WidgetValue>) -> bool {
    let conditions = list_item::sort_by_order(conditions);
    let mut iter = conditions.iter();
    let Some(first) = iter.next() else {
        return true;
    };
    let mut result = first.holds(parent, value);
    let mut conjunction = first.conjunction_operator;
    for condition in iter {
        result = conjunction.combine(result, condition.holds(parent, value));
        conjunction = condition.conjunction_operator;
    }
    result
}

// ============================================================================
// Conditional
// ============================================================================

/// Visibility rule of a widget, bound to one parent widget
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Conditional {
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "or_default")]
    pub id: Option<String>,
    #[serde(deserialize_with = "or_default")]
    pub client_id: String,
    #[serde(deserialize_with = "or_default")]
    pub parent_client_id: String,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "or_default")]
    pub parent_id: Option<String>,
    /// Kind code of the parent widget
    #[serde(deserialize_with = "or_default")]
    pub parent_widget_id: String,
    #[serde(deserialize_with = "or_default")]
    pub conditions: Vec<Condition>,
}

impl Conditional {
    /// Rule on `parent` with a single "is empty" condition
    pub fn new(parent: &Widget) -> Self {
        let mut conditional = Self {
            id: None,
            client_id: new_client_id(),
            parent_client_id: parent.client_id.clone(),
            parent_id: parent.id.clone(),
            parent_widget_id: parent.kind().code().to_string(),
            conditions: Vec::new(),
        };
        list_item::push_item(&mut conditional.conditions, Condition::new(), CONDITIONS_LIMIT);
        conditional
    }

    pub fn parent_kind(&self) -> Option<WidgetKind> {
        WidgetKind::from_code(&self.parent_widget_id)
    }

    pub fn is_parent(&self, widget: &Widget) -> bool {
        widget.client_id == self.parent_client_id
            || (self.parent_id.is_some() && widget.id == self.parent_id)
    }

    pub fn find_parent<'a>(&self, widgets: &'a [Widget]) -> Option<&'a Widget> {
        widgets.iter().find(|w| self.is_parent(w))
    }

    /// Whether the dependent widget is shown for the parent's current value.
    /// A parent whose kind changed since the rule was written does not hide anything.
    pub fn evaluate(&self, parent: &Widget, value: Option<&WidgetValue>) -> bool {
        if self.parent_kind() != Some(parent.kind()) {
            log::warn!(
                "conditional {}: parent {} is {} but the rule expects {}",
                self.client_id,
                parent.client_id,
                parent.kind().code(),
                self.parent_widget_id
            );
            return true;
        }
        evaluate(&self.conditions, parent, value)
    }

    /// Append a condition; `conjunction` joins the current last condition to it
    pub fn add_condition(&mut self, conjunction: Conjunction) -> Option<String> {
        if self.conditions.len() >= CONDITIONS_LIMIT {
            return None;
        }
        self.conditions.sort_by_key(|c| c.order);
        if let Some(last) = self.conditions.last_mut() {
            last.conjunction_operator = conjunction;
        }
        let condition = Condition::new();
        let key = condition.key.clone();
        list_item::push_item(&mut self.conditions, condition, CONDITIONS_LIMIT).then_some(key)
    }

    /// Remove a condition; the last remaining one stays
    pub fn remove_condition(&mut self, key: &str) -> bool {
        if self.conditions.len() <= 1 {
            return false;
        }
        list_item::remove_item(&mut self.conditions, key).is_some()
    }

    pub fn move_condition(&mut self, from: usize, to: usize) -> bool {
        self.conditions.sort_by_key(|c| c.order);
        list_item::move_item(&mut self.conditions, from, to)
    }

    pub fn condition_mut(&mut self, key: &str) -> Option<&mut Condition> {
        list_item::find_item_mut(&mut self.conditions, key)
    }
}

/// Options a key-list operand can pick from, as (key, label)
pub fn condition_choices(operator: ConditionOperator, parent: &Widget) -> Vec<(String, String)> {
    use ConditionOperator::*;
    let pairs = |items: Vec<(&str, &str)>| {
        items
            .into_iter()
            .map(|(k, l)| (k.to_string(), l.to_string()))
            .collect::<Vec<_>>()
    };
    match (operator, &parent.properties) {
        (SingleSelectionSelected, WidgetProperties::Select(p)) => {
            pairs(p.options.iter().map(|o| (o.key.as_str(), o.label.as_str())).collect())
        }
        (MultiSelectionSelected, WidgetProperties::MultiSelect(p)) => {
            pairs(p.options.iter().map(|o| (o.key.as_str(), o.label.as_str())).collect())
        }
        (ScaleSelected | ScaleMoreThan | ScaleLessThan, WidgetProperties::Scale(p)) => {
            list_item::sort_by_order(&p.options)
                .into_iter()
                .map(|o| (o.key, o.label))
                .collect()
        }
        (OrganigramSelected | OrganigramDescendentSelected, WidgetProperties::Organigram(p)) => {
            let mut choices = Vec::new();
            if let Some(root) = &p.options {
                root.walk(&mut Vec::new(), &mut |node, path| {
                    choices.push((node.key.clone(), path.join(" / ")));
                });
            }
            choices
        }
        (Matrix1dRowsSelected, WidgetProperties::Matrix1d(p)) => {
            pairs(p.rows.iter().map(|r| (r.key.as_str(), r.label.as_str())).collect())
        }
        (Matrix1dCellsSelected, WidgetProperties::Matrix1d(p)) => p
            .rows
            .iter()
            .flat_map(|r| r.cells.iter().map(move |c| (c.key.clone(), format!("{} / {}", r.label, c.label))))
            .collect(),
        (Matrix2dRowsSelected, WidgetProperties::Matrix2d(p)) => {
            pairs(p.rows.iter().map(|r| (r.key.as_str(), r.label.as_str())).collect())
        }
        (Matrix2dSubRowsSelected, WidgetProperties::Matrix2d(p)) => p
            .rows
            .iter()
            .flat_map(|r| r.sub_rows.iter().map(move |s| (s.key.clone(), format!("{} / {}", r.label, s.label))))
            .collect(),
        (Matrix2dColumnsSelected, WidgetProperties::Matrix2d(p)) => {
            pairs(p.columns.iter().map(|c| (c.key.as_str(), c.label.as_str())).collect())
        }
        (Matrix2dSubColumnsSelected, WidgetProperties::Matrix2d(p)) => p
            .columns
            .iter()
            .flat_map(|c| c.sub_columns.iter().map(move |s| (s.key.clone(), format!("{} / {}", c.label, s.label))))
            .collect(),
        _ => Vec::new(),
    }
}

// ============================================================================
// Validation
// ============================================================================

pub const CONDITION_REQUIRED: &str = "At least one condition is required.";
pub const OPERATOR_NOT_APPLICABLE: &str = "Operator does not apply to the parent widget.";

/// Errors of a conditional, with condition errors keyed by condition key
pub fn validate_conditional(conditional: &Conditional) -> FormErrors {
    let mut errors = FormErrors::new();
    errors.require_text("parentClientId", &conditional.parent_client_id);
    let kind = conditional.parent_kind();
    if kind.is_none() {
        errors.add_field("parentWidgetId", REQUIRED);
    }
    if conditional.conditions.is_empty() {
        errors.add_non_field(CONDITION_REQUIRED);
    }
    if conditional.conditions.len() > CONDITIONS_LIMIT {
        errors.add_non_field(format!("At most {} conditions are allowed.", CONDITIONS_LIMIT));
    }

    let mut conditions = FormErrors::new();
    for condition in &conditional.conditions {
        let mut member = FormErrors::new();
        if let Some(kind) = kind {
            if !condition.operator.applies_to(kind) {
                member.add_field("operator", OPERATOR_NOT_APPLICABLE);
            }
        }
        if condition.operator.has_modifier() && condition.operator_modifier.is_none() {
            member.add_field("operatorModifier", REQUIRED);
        }
        let value = condition.value.as_ref();
        let message = match condition.operator.operand() {
            OperandShape::None => None,
            OperandShape::Number => value
                .and_then(ConditionValue::as_number)
                .is_none()
                .then_some("Value must be a number."),
            OperandShape::Text | OperandShape::Key => value
                .and_then(ConditionValue::as_text)
                .filter(|t| !t.trim().is_empty())
                .is_none()
                .then_some(REQUIRED),
            OperandShape::Date => value
                .and_then(ConditionValue::as_text)
                .and_then(parse_date)
                .is_none()
                .then_some(INVALID_DATE),
            OperandShape::Time => value
                .and_then(ConditionValue::as_text)
                .and_then(parse_time)
                .is_none()
                .then_some(INVALID_TIME),
            OperandShape::Keys => value
                .map(|v| v.as_keys().is_empty())
                .unwrap_or(true)
                .then_some(REQUIRED),
        };
        if let Some(message) = message {
            member.add_field("value", message);
        }
        conditions.add_nested(condition.key.clone(), member);
    }
    errors.add_nested("conditions", conditions);
    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_widget::input::toggle_matrix1d_cell;
    use crate::domain::a001_widget::properties::{Matrix1dProperties, OrganigramProperties, ScaleProperties};
    use serde_json::json;

    fn condition(operator: ConditionOperator, value: Option<ConditionValue>) -> Condition {
        let mut c = Condition::new();
        c.set_operator(operator);
        c.value = value;
        c
    }

    fn keys(keys: &[&str]) -> Option<ConditionValue> {
        Some(ConditionValue::Keys(keys.iter().map(|k| k.to_string()).collect()))
    }

    fn text(s: &str) -> Option<ConditionValue> {
        Some(ConditionValue::Text(s.to_string()))
    }

    fn joined(mut conditions: Vec<Condition>, conjunctions: &[Conjunction]) -> Vec<Condition> {
        for (i, c) in conditions.iter_mut().enumerate() {
            c.order = i as i32;
            if let Some(conj) = conjunctions.get(i) {
                c.conjunction_operator = *conj;
            }
        }
        conditions
    }

    #[test]
    fn test_wire_shape() {
        let json = json!({
            "key": "c1",
            "order": 0,
            "conjunctionOperator": "XOR",
            "invert": true,
            "operator": "matrix2d-sub-columns-selected",
            "operatorModifier": "every",
            "value": ["sc1", "sc2"]
        });
        let parsed: Condition = serde_json::from_value(json.clone()).unwrap();
        assert_eq!(parsed.operator, ConditionOperator::Matrix2dSubColumnsSelected);
        assert_eq!(parsed.operator_modifier, Some(Modifier::Every));
        assert_eq!(parsed.conjunction_operator, Conjunction::Xor);
        assert_eq!(serde_json::to_value(&parsed).unwrap(), json);
        assert_eq!(
            ConditionOperator::from_code("matrix1d-cells-selected"),
            Some(ConditionOperator::Matrix1dCellsSelected)
        );
    }

    #[test]
    fn test_number_operators() {
        let parent = Widget::new(WidgetKind::Number);
        let value = WidgetValue::Number(5.0);
        let gt = condition(ConditionOperator::NumberGreaterThan, Some(ConditionValue::Number(3.0)));
        let lt = condition(ConditionOperator::NumberLessThan, Some(ConditionValue::Number(3.0)));
        let eq = condition(ConditionOperator::NumberEqualTo, Some(ConditionValue::Number(5.0)));
        assert!(gt.holds(&parent, Some(&value)));
        assert!(!lt.holds(&parent, Some(&value)));
        assert!(eq.holds(&parent, Some(&value)));
        assert!(!gt.holds(&parent, None));
    }

    #[test]
    fn test_text_contains_ignores_case_and_invert_negates() {
        let parent = Widget::new(WidgetKind::Text);
        let value = WidgetValue::Text("Flood in the North".into());
        let mut contains = condition(ConditionOperator::TextContains, text("north"));
        assert!(contains.holds(&parent, Some(&value)));
        contains.invert = true;
        assert!(!contains.holds(&parent, Some(&value)));
        assert!(condition(ConditionOperator::TextStartsWith, text("flood")).holds(&parent, Some(&value)));
        assert!(!condition(ConditionOperator::TextEndsWith, text("south")).holds(&parent, Some(&value)));
    }

    #[test]
    fn test_empty_operator() {
        let parent = Widget::new(WidgetKind::MultiSelect);
        let empty = condition(ConditionOperator::Empty, None);
        assert!(empty.holds(&parent, None));
        assert!(empty.holds(&parent, Some(&WidgetValue::MultiSelect(vec![]))));
        assert!(!empty.holds(&parent, Some(&WidgetValue::MultiSelect(vec!["a".into()]))));
    }

    #[test]
    fn test_every_and_some_modifiers() {
        let parent = Widget::new(WidgetKind::MultiSelect);
        let value = WidgetValue::MultiSelect(vec!["a".into(), "b".into()]);
        let mut c = condition(ConditionOperator::MultiSelectionSelected, keys(&["a", "c"]));
        assert!(c.holds(&parent, Some(&value)));
        c.operator_modifier = Some(Modifier::Every);
        assert!(!c.holds(&parent, Some(&value)));
        c.value = keys(&["a", "b"]);
        assert!(c.holds(&parent, Some(&value)));
        c.value = keys(&[]);
        assert!(!c.holds(&parent, Some(&value)));
    }

    #[test]
    fn test_matrix1d_rows_and_cells() {
        let mut parent = Widget::new(WidgetKind::Matrix1d);
        parent.properties = WidgetProperties::Matrix1d(Matrix1dProperties::default());
        let value = WidgetValue::Matrix1d(toggle_matrix1d_cell(None, "r1", "c1"));
        assert!(condition(ConditionOperator::Matrix1dRowsSelected, keys(&["r1"])).holds(&parent, Some(&value)));
        assert!(!condition(ConditionOperator::Matrix1dRowsSelected, keys(&["r2"])).holds(&parent, Some(&value)));
        assert!(condition(ConditionOperator::Matrix1dCellsSelected, keys(&["c1"])).holds(&parent, Some(&value)));

        // a cell toggled back off no longer counts
        let WidgetValue::Matrix1d(rows) = &value else { unreachable!() };
        let off = WidgetValue::Matrix1d(toggle_matrix1d_cell(Some(rows), "r1", "c1"));
        assert!(!condition(ConditionOperator::Matrix1dRowsSelected, keys(&["r1"])).holds(&parent, Some(&off)));
    }

    #[test]
    fn test_matrix2d_selection_levels() {
        let parent = Widget::new(WidgetKind::Matrix2d);
        let value = WidgetValue::from_data(
            WidgetKind::Matrix2d,
            &json!({"value": {"r1": {"sr1": {"col1": ["sc1"]}, "sr2": {}}}}),
        )
        .unwrap();
        let holds = |op, k: &[&str]| condition(op, keys(k)).holds(&parent, Some(&value));
        assert!(holds(ConditionOperator::Matrix2dRowsSelected, &["r1"]));
        assert!(holds(ConditionOperator::Matrix2dSubRowsSelected, &["sr1"]));
        assert!(!holds(ConditionOperator::Matrix2dSubRowsSelected, &["sr2"]));
        assert!(holds(ConditionOperator::Matrix2dColumnsSelected, &["col1"]));
        assert!(holds(ConditionOperator::Matrix2dSubColumnsSelected, &["sc1"]));
        assert!(!holds(ConditionOperator::Matrix2dSubColumnsSelected, &["sc2"]));
    }

    #[test]
    fn test_scale_at_least_uses_point_order() {
        let mut props = ScaleProperties::default();
        let low = props.add_option().unwrap();
        let mid = props.add_option().unwrap();
        let high = props.add_option().unwrap();
        let mut parent = Widget::new(WidgetKind::Scale);
        parent.properties = WidgetProperties::Scale(props);

        let value = WidgetValue::Scale(mid.clone());
        assert!(condition(ConditionOperator::ScaleMoreThan, text(&low)).holds(&parent, Some(&value)));
        assert!(condition(ConditionOperator::ScaleMoreThan, text(&mid)).holds(&parent, Some(&value)));
        assert!(!condition(ConditionOperator::ScaleMoreThan, text(&high)).holds(&parent, Some(&value)));
        assert!(condition(ConditionOperator::ScaleLessThan, text(&high)).holds(&parent, Some(&value)));
    }

    #[test]
    fn test_organigram_descendant() {
        let mut props = OrganigramProperties::default();
        let root = props.root_mut().key.clone();
        let unit = props.add_child(&root).unwrap();
        let team = props.add_child(&unit).unwrap();
        let mut parent = Widget::new(WidgetKind::Organigram);
        parent.properties = WidgetProperties::Organigram(props);

        let value = WidgetValue::Organigram(vec![team.clone()]);
        let descendant = condition(ConditionOperator::OrganigramDescendentSelected, keys(&[unit.as_str()]));
        let selected = condition(ConditionOperator::OrganigramSelected, keys(&[unit.as_str()]));
        assert!(descendant.holds(&parent, Some(&value)));
        assert!(!selected.holds(&parent, Some(&value)));
        assert_eq!(condition_choices(ConditionOperator::OrganigramSelected, &parent).len(), 3);
    }

    #[test]
    fn test_date_range_operators() {
        let parent = Widget::new(WidgetKind::DateRange);
        let value = WidgetValue::from_data(
            WidgetKind::DateRange,
            &json!({"value": {"startDate": "2021-03-01", "endDate": "2021-03-31"}}),
        )
        .unwrap();
        let holds = |op, d: &str| condition(op, text(d)).holds(&parent, Some(&value));
        assert!(holds(ConditionOperator::DateRangeIncludes, "2021-03-15"));
        assert!(!holds(ConditionOperator::DateRangeIncludes, "2021-04-01"));
        assert!(holds(ConditionOperator::DateRangeAfter, "2021-02-28"));
        assert!(holds(ConditionOperator::DateRangeBefore, "2021-04-01"));
        assert!(!holds(ConditionOperator::DateRangeBefore, "not a date"));
    }

    #[test]
    fn test_conjunctions_fold_in_order() {
        let parent = Widget::new(WidgetKind::Number);
        let value = WidgetValue::Number(5.0);
        let yes = || condition(ConditionOperator::NumberGreaterThan, Some(ConditionValue::Number(1.0)));
        let no = || condition(ConditionOperator::NumberLessThan, Some(ConditionValue::Number(1.0)));

        let and = joined(vec![yes(), no()], &[Conjunction::And]);
        assert!(!evaluate(&and, &parent, Some(&value)));
        let or = joined(vec![no(), yes()], &[Conjunction::Or]);
        assert!(evaluate(&or, &parent, Some(&value)));
        let xor = joined(vec![yes(), yes()], &[Conjunction::Xor]);
        assert!(!evaluate(&xor, &parent, Some(&value)));
        // (yes XOR no) AND no
        let chain = joined(vec![yes(), no(), no()], &[Conjunction::Xor, Conjunction::And]);
        assert!(!evaluate(&chain, &parent, Some(&value)));
        assert!(evaluate(&[], &parent, Some(&value)));
    }

    #[test]
    fn test_rule_on_a_parent_of_another_kind_hides_nothing() {
        let text_parent = Widget::new(WidgetKind::Text);
        let mut conditional = Conditional::new(&text_parent);
        conditional.conditions[0].set_operator(ConditionOperator::TextContains);
        conditional.conditions[0].value = text("x");
        assert!(!conditional.evaluate(&text_parent, None));

        let mut changed = text_parent.clone();
        changed.properties = WidgetProperties::default_for(WidgetKind::Number);
        assert!(conditional.evaluate(&changed, None));
    }

    #[test]
    fn test_condition_list_editing() {
        let parent = Widget::new(WidgetKind::Select);
        let mut conditional = Conditional::new(&parent);
        let first = conditional.conditions[0].key.clone();
        assert!(!conditional.remove_condition(&first));

        let second = conditional.add_condition(Conjunction::Or).unwrap();
        assert_eq!(conditional.conditions[0].conjunction_operator, Conjunction::Or);
        assert!(conditional.remove_condition(&first));
        assert_eq!(conditional.conditions[0].key, second);
        assert_eq!(conditional.conditions[0].order, 0);

        while conditional.add_condition(Conjunction::And).is_some() {}
        assert_eq!(conditional.conditions.len(), CONDITIONS_LIMIT);
    }

    #[test]
    fn test_set_operator_resets_operand() {
        let mut c = condition(ConditionOperator::TextContains, text("abc"));
        c.set_operator(ConditionOperator::Matrix1dRowsSelected);
        assert!(c.value.is_none());
        assert_eq!(c.operator_modifier, Some(Modifier::Some));
        c.set_operator(ConditionOperator::Empty);
        assert!(c.operator_modifier.is_none());
    }

    #[test]
    fn test_validation() {
        let parent = Widget::new(WidgetKind::Select);
        let mut conditional = Conditional::new(&parent);
        assert!(validate_conditional(&conditional).is_empty());

        let key = conditional.conditions[0].key.clone();
        conditional.conditions[0].set_operator(ConditionOperator::SingleSelectionSelected);
        let errors = validate_conditional(&conditional);
        assert_eq!(
            errors.at(&["conditions", &key, "value"]),
            Some(&crate::shared::form::FieldError::Message(REQUIRED.into()))
        );

        conditional.conditions[0].set_operator(ConditionOperator::NumberGreaterThan);
        let errors = validate_conditional(&conditional);
        assert!(errors.at(&["conditions", &key, "operator"]).is_some());

        conditional.conditions.clear();
        assert_eq!(validate_conditional(&conditional).non_field, vec![CONDITION_REQUIRED.to_string()]);
    }
}
