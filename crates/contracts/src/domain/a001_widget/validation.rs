//! Validation schemas per widget kind
//!
//! `validate_config` checks a (possibly partial) widget configuration,
//! `validate_value` checks an entered value against its widget. Both return
//! structured `FormErrors`; nothing here fails with `Err`.

use chrono::{NaiveDate, NaiveTime};

use super::aggregate::Widget;
use super::conditional::validate_conditional;
use super::items::{ChoiceOption, Matrix1dRow, Matrix2dColumn, Matrix2dRow, OrganigramNode, ScaleOption};
use super::properties::{
    BaseProperties, Matrix1dProperties, Matrix2dProperties, NumberProperties, NumericField,
    OrganigramProperties, ScaleProperties,
};
use super::value::{DateRangeValue, TimeRangeValue, WidgetValue};
use crate::domain::common::ListItem;
use crate::shared::form::FormErrors;

pub const REQUIRED: &str = "This field is required.";
pub const NOT_A_NUMBER: &str = "Value must be a number.";
pub const MIN_NOT_LESS_THAN_MAX: &str = "Min value must be less than max value.";
pub const INVALID_DATE: &str = "Value must be a valid date (YYYY-MM-DD).";
pub const INVALID_TIME: &str = "Value must be a valid time (HH:MM).";
pub const INVALID_COLOR: &str = "Color must be a hex color like #ff0000.";
pub const KIND_MISMATCH: &str = "Value does not match the widget type.";

// ============================================================================
// Configuration
// ============================================================================

pub fn validate_config(widget: &Widget) -> FormErrors {
    use super::properties::WidgetProperties as P;

    let mut errors = FormErrors::new();
    errors.require_text("title", &widget.title);

    let mut properties = FormErrors::new();
    match &widget.properties {
        P::Text(_) | P::Geo(_) => {}
        P::Date(p) => validate_default(&mut properties, p, |v| check_date(v)),
        P::Time(p) => validate_default(&mut properties, p, |v| check_time(v)),
        P::DateRange(p) => validate_default(&mut properties, p, check_date_range),
        P::TimeRange(p) => validate_default(&mut properties, p, check_time_range),
        P::Number(p) => {
            if let Some(message) = validate_number(&mut properties, p) {
                errors.add_non_field(message);
            }
        }
        P::Scale(p) => validate_scale(&mut properties, p),
        P::Select(p) => validate_choices(&mut properties, &p.options),
        P::MultiSelect(p) => validate_choices(&mut properties, &p.options),
        P::Matrix1d(p) => validate_matrix1d(&mut properties, p),
        P::Matrix2d(p) => validate_matrix2d(&mut properties, p),
        P::Organigram(p) => validate_organigram(&mut properties, p),
    }
    errors.add_nested("properties", properties);
    if let Some(conditional) = &widget.conditional {
        errors.add_nested("conditional", validate_conditional(conditional));
    }
    errors
}

fn validate_default<T>(
    errors: &mut FormErrors,
    props: &BaseProperties<T>,
    check: impl Fn(&T) -> Option<&'static str>,
) {
    if let Some(message) = props.default_value.as_ref().and_then(check) {
        errors.add_field("defaultValue", message);
    }
}

/// Field errors go into `errors`; the returned message is the form-level
/// min/max ordering error.
fn validate_number(errors: &mut FormErrors, props: &NumberProperties) -> Option<&'static str> {
    for (name, field) in [
        ("minValue", &props.min_value),
        ("maxValue", &props.max_value),
        ("defaultValue", &props.default_value),
    ] {
        if matches!(field, Some(NumericField::Raw(_))) {
            errors.add_field(name, NOT_A_NUMBER);
        }
    }

    let default = props.default_value.as_ref().and_then(NumericField::as_number);
    if let (Some(default), Some(min)) = (default, props.min()) {
        if default < min {
            errors.add_field("defaultValue", format!("Value must be at least {}.", min));
        }
    }
    if let (Some(default), Some(max)) = (default, props.max()) {
        if default > max {
            errors.add_field("defaultValue", format!("Value must be at most {}.", max));
        }
    }

    match (props.min(), props.max()) {
        (Some(min), Some(max)) if min >= max => Some(MIN_NOT_LESS_THAN_MAX),
        _ => None,
    }
}

fn validate_scale(errors: &mut FormErrors, props: &ScaleProperties) {
    let mut options = FormErrors::new();
    if props.options.is_empty() {
        options.add_non_field("At least one option is required.");
    }
    for option in &props.options {
        options.add_nested(option.item_key(), validate_scale_option(option));
    }
    errors.add_nested("options", options);

    match props.default_value.as_deref() {
        None => errors.add_field("defaultValue", REQUIRED),
        Some(key) if props.default_option().is_none() => {
            errors.add_field("defaultValue", format!("Default option '{}' does not exist.", key));
        }
        Some(_) => {}
    }
}

fn validate_scale_option(option: &ScaleOption) -> FormErrors {
    let mut errors = FormErrors::new();
    errors.require_text("label", &option.label);
    if !option.color.is_empty() && !is_valid_color(&option.color) {
        errors.add_field("color", INVALID_COLOR);
    }
    errors
}

fn validate_choices(errors: &mut FormErrors, options: &[ChoiceOption]) {
    let mut nested = FormErrors::new();
    if options.is_empty() {
        nested.add_non_field("At least one option is required.");
    }
    for option in options {
        let mut option_errors = FormErrors::new();
        option_errors.require_text("label", &option.label);
        nested.add_nested(option.item_key(), option_errors);
    }
    errors.add_nested("options", nested);
}

fn validate_matrix1d(errors: &mut FormErrors, props: &Matrix1dProperties) {
    let mut rows = FormErrors::new();
    if props.rows.is_empty() {
        rows.add_non_field("At least one row is required.");
    }
    for row in &props.rows {
        rows.add_nested(row.item_key(), validate_matrix1d_row(row));
    }
    errors.add_nested("rows", rows);
}

fn validate_matrix1d_row(row: &Matrix1dRow) -> FormErrors {
    let mut errors = FormErrors::new();
    errors.require_text("label", &row.label);
    if !row.color.is_empty() && !is_valid_color(&row.color) {
        errors.add_field("color", INVALID_COLOR);
    }
    let mut cells = FormErrors::new();
    if row.cells.is_empty() {
        cells.add_non_field("At least one cell is required.");
    }
    for cell in &row.cells {
        let mut cell_errors = FormErrors::new();
        cell_errors.require_text("label", &cell.label);
        cells.add_nested(cell.item_key(), cell_errors);
    }
    errors.add_nested("cells", cells);
    errors
}

fn validate_matrix2d(errors: &mut FormErrors, props: &Matrix2dProperties) {
    let mut rows = FormErrors::new();
    if props.rows.is_empty() {
        rows.add_non_field("At least one row is required.");
    }
    for row in &props.rows {
        rows.add_nested(row.item_key(), validate_matrix2d_row(row));
    }
    errors.add_nested("rows", rows);

    let mut columns = FormErrors::new();
    if props.columns.is_empty() {
        columns.add_non_field("At least one column is required.");
    }
    for column in &props.columns {
        columns.add_nested(column.item_key(), validate_matrix2d_column(column));
    }
    errors.add_nested("columns", columns);
}

fn validate_matrix2d_row(row: &Matrix2dRow) -> FormErrors {
    let mut errors = FormErrors::new();
    errors.require_text("label", &row.label);
    if !row.color.is_empty() && !is_valid_color(&row.color) {
        errors.add_field("color", INVALID_COLOR);
    }
    let mut sub_rows = FormErrors::new();
    if row.sub_rows.is_empty() {
        sub_rows.add_non_field("At least one sub row is required.");
    }
    for sub_row in &row.sub_rows {
        let mut e = FormErrors::new();
        e.require_text("label", &sub_row.label);
        sub_rows.add_nested(sub_row.item_key(), e);
    }
    errors.add_nested("subRows", sub_rows);
    errors
}

fn validate_matrix2d_column(column: &Matrix2dColumn) -> FormErrors {
    let mut errors = FormErrors::new();
    errors.require_text("label", &column.label);
    let mut sub_columns = FormErrors::new();
    for sub_column in &column.sub_columns {
        let mut e = FormErrors::new();
        e.require_text("label", &sub_column.label);
        sub_columns.add_nested(sub_column.item_key(), e);
    }
    errors.add_nested("subColumns", sub_columns);
    errors
}

fn validate_organigram(errors: &mut FormErrors, props: &OrganigramProperties) {
    match &props.options {
        None => errors.add_field("options", REQUIRED),
        Some(root) => errors.add_nested("options", validate_organigram_node(root)),
    }
}

fn validate_organigram_node(node: &OrganigramNode) -> FormErrors {
    let mut errors = FormErrors::new();
    errors.require_text("label", &node.label);
    let mut children = FormErrors::new();
    for child in &node.children {
        children.add_nested(child.item_key(), validate_organigram_node(child));
    }
    errors.add_nested("children", children);
    errors
}

// ============================================================================
// Values
// ============================================================================

/// Validate an entered value against its widget.
///
/// Selection kinds do not check that the chosen keys still exist in the
/// widget's options: options may be stale while they are being reloaded.
pub fn validate_value(value: Option<&WidgetValue>, widget: &Widget) -> FormErrors {
    use super::properties::WidgetProperties as P;

    let mut errors = FormErrors::new();
    let Some(value) = value else {
        return errors;
    };
    if value.kind() != widget.kind() {
        errors.add_non_field(KIND_MISMATCH);
        return errors;
    }

    let message = match (value, &widget.properties) {
        (WidgetValue::Number(n), P::Number(p)) => check_number_range(*n, p),
        (WidgetValue::Date(d), _) => check_date(d),
        (WidgetValue::Time(t), _) => check_time(t),
        (WidgetValue::DateRange(r), _) => check_date_range(r),
        (WidgetValue::TimeRange(r), _) => check_time_range(r),
        _ => None,
    };
    if let Some(message) = message {
        errors.add_field("value", message);
    }
    errors
}

fn check_number_range(n: f64, props: &NumberProperties) -> Option<&'static str> {
    if !n.is_finite() {
        return Some(NOT_A_NUMBER);
    }
    if props.min().map(|min| n < min).unwrap_or(false) {
        return Some("Value is less than the minimum.");
    }
    if props.max().map(|max| n > max).unwrap_or(false) {
        return Some("Value is greater than the maximum.");
    }
    None
}

// ============================================================================
// Checks
// ============================================================================

pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

pub fn parse_time(value: &str) -> Option<NaiveTime> {
    let value = value.trim();
    NaiveTime::parse_from_str(value, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M"))
        .ok()
}

fn check_date(value: &str) -> Option<&'static str> {
    parse_date(value).is_none().then_some(INVALID_DATE)
}

fn check_time(value: &str) -> Option<&'static str> {
    parse_time(value).is_none().then_some(INVALID_TIME)
}

fn check_date_range(range: &DateRangeValue) -> Option<&'static str> {
    let start = parse_date(&range.start_date);
    let end = parse_date(&range.end_date);
    match (start, end) {
        (Some(start), Some(end)) if start > end => Some("Start date must not be after end date."),
        (Some(_), Some(_)) => None,
        _ => Some(INVALID_DATE),
    }
}

fn check_time_range(range: &TimeRangeValue) -> Option<&'static str> {
    let start = parse_time(&range.start_time);
    let end = parse_time(&range.end_time);
    match (start, end) {
        (Some(start), Some(end)) if start > end => Some("Start time must not be after end time."),
        (Some(_), Some(_)) => None,
        _ => Some(INVALID_TIME),
    }
}

/// `#rgb` or `#rrggbb`
pub fn is_valid_color(value: &str) -> bool {
    let Some(hex) = value.strip_prefix('#') else {
        return false;
    };
    (hex.len() == 3 || hex.len() == 6) && hex.chars().all(|c| c.is_ascii_hexdigit())
}
