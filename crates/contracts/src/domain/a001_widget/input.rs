//! Value transitions behind widget inputs
//!
//! Every function builds a new value and leaves its argument untouched.
//! Matrix values share all rows (and sub-rows) the change does not touch.

use std::collections::BTreeMap;

use super::value::{Matrix1dValue, Matrix2dColumnValue, Matrix2dRowValue, Matrix2dValue};
use crate::shared::cow::update_at;

/// Flip one MATRIX1D cell. A cell that was never set becomes `true`; a set
/// cell flips and stays in the map.
pub fn toggle_matrix1d_cell(value: Option<&Matrix1dValue>, row: &str, cell: &str) -> Matrix1dValue {
    let empty = Matrix1dValue::new();
    let value = value.unwrap_or(&empty);
    update_at(value, row, |previous| {
        let mut next = previous.cloned().unwrap_or_default();
        let selected = next.get(cell).copied().unwrap_or(false);
        next.insert(cell.to_string(), !selected);
        Some(next)
    })
}

/// `true` when the cell is selected in `value`
pub fn is_matrix1d_cell_selected(value: Option<&Matrix1dValue>, row: &str, cell: &str) -> bool {
    value
        .and_then(|rows| rows.get(row))
        .and_then(|cells| cells.get(cell))
        .copied()
        .unwrap_or(false)
}

fn update_sub_row(
    value: Option<&Matrix2dValue>,
    row: &str,
    sub_row: &str,
    f: impl FnOnce(&mut Matrix2dColumnValue),
) -> Matrix2dValue {
    let empty = Matrix2dValue::new();
    let value = value.unwrap_or(&empty);
    update_at(value, row, |previous| {
        let empty_row = Matrix2dRowValue::new();
        let row_value = previous.unwrap_or(&empty_row);
        Some(update_at(row_value, sub_row, |columns| {
            let mut next = columns.cloned().unwrap_or_default();
            f(&mut next);
            Some(next)
        }))
    })
}

/// Select (`on`) or deselect a MATRIX2D column for a sub-row. Selecting
/// keeps already chosen sub-columns; deselecting drops the column.
pub fn set_matrix2d_column(
    value: Option<&Matrix2dValue>,
    row: &str,
    sub_row: &str,
    column: &str,
    on: bool,
) -> Matrix2dValue {
    update_sub_row(value, row, sub_row, |columns| {
        if on {
            columns.entry(column.to_string()).or_default();
        } else {
            columns.remove(column);
        }
    })
}

/// Flip a sub-column in the selection of (`row`, `sub_row`, `column`).
/// The column becomes selected if it was not.
pub fn toggle_matrix2d_sub_column(
    value: Option<&Matrix2dValue>,
    row: &str,
    sub_row: &str,
    column: &str,
    sub_column: &str,
) -> Matrix2dValue {
    update_sub_row(value, row, sub_row, |columns| {
        let selected = columns.entry(column.to_string()).or_default();
        *selected = toggle_key(Some(selected.as_slice()), sub_column);
    })
}

pub fn matrix2d_selection<'a>(
    value: Option<&'a Matrix2dValue>,
    row: &str,
    sub_row: &str,
) -> Option<&'a BTreeMap<String, Vec<String>>> {
    value
        .and_then(|rows| rows.get(row))
        .and_then(|sub_rows| sub_rows.get(sub_row))
        .map(|columns| &**columns)
}

/// Add `key` to a key set, or remove it when present. Order of the
/// remaining keys is kept.
pub fn toggle_key(keys: Option<&[String]>, key: &str) -> Vec<String> {
    let keys = keys.unwrap_or_default();
    if keys.iter().any(|k| k == key) {
        keys.iter().filter(|k| *k != key).cloned().collect()
    } else {
        let mut next = keys.to_vec();
        next.push(key.to_string());
        next
    }
}

/// Text field content as a value: blank text clears the value
pub fn text_value(text: &str) -> Option<String> {
    if text.trim().is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

/// Number field content as a value: blank or non-numeric text clears it
pub fn number_value(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    fn row(cells: &[(&str, bool)]) -> Rc<BTreeMap<String, bool>> {
        Rc::new(cells.iter().map(|(k, v)| (k.to_string(), *v)).collect())
    }

    #[test]
    fn test_matrix1d_toggle_shares_untouched_rows() {
        let mut value = Matrix1dValue::new();
        value.insert("row1".into(), row(&[("cellA", true)]));
        value.insert("row2".into(), row(&[("cellC", true)]));

        let next = toggle_matrix1d_cell(Some(&value), "row1", "cellB");

        assert_eq!(*next["row1"], *row(&[("cellA", true), ("cellB", true)]));
        assert!(!Rc::ptr_eq(&next["row1"], &value["row1"]));
        assert!(Rc::ptr_eq(&next["row2"], &value["row2"]));
        // previous value is untouched
        assert_eq!(value["row1"].len(), 1);
    }

    #[test]
    fn test_matrix1d_toggle_off_keeps_false() {
        let once = toggle_matrix1d_cell(None, "r1", "c1");
        assert_eq!(*once["r1"], *row(&[("c1", true)]));
        let twice = toggle_matrix1d_cell(Some(&once), "r1", "c1");
        assert_eq!(*twice["r1"], *row(&[("c1", false)]));
        assert!(!is_matrix1d_cell_selected(Some(&twice), "r1", "c1"));
    }

    #[test]
    fn test_matrix2d_column_on_off() {
        let value = set_matrix2d_column(None, "r1", "sr1", "col1", true);
        let selection = matrix2d_selection(Some(&value), "r1", "sr1").unwrap();
        assert_eq!(selection.get("col1"), Some(&vec![]));

        let value = toggle_matrix2d_sub_column(Some(&value), "r1", "sr1", "col1", "sc1");
        let selection = matrix2d_selection(Some(&value), "r1", "sr1").unwrap();
        assert_eq!(selection.get("col1"), Some(&vec!["sc1".to_string()]));

        // switching on again keeps the chosen sub-columns
        let value = set_matrix2d_column(Some(&value), "r1", "sr1", "col1", true);
        let selection = matrix2d_selection(Some(&value), "r1", "sr1").unwrap();
        assert_eq!(selection.get("col1"), Some(&vec!["sc1".to_string()]));

        let value = set_matrix2d_column(Some(&value), "r1", "sr1", "col1", false);
        let selection = matrix2d_selection(Some(&value), "r1", "sr1").unwrap();
        assert!(selection.is_empty());
    }

    #[test]
    fn test_matrix2d_shares_sibling_sub_rows() {
        let value = set_matrix2d_column(None, "r1", "sr1", "col1", true);
        let value = set_matrix2d_column(Some(&value), "r1", "sr2", "col1", true);
        let value = set_matrix2d_column(Some(&value), "r2", "sr3", "col1", true);

        let next = toggle_matrix2d_sub_column(Some(&value), "r1", "sr1", "col1", "sc1");
        assert!(Rc::ptr_eq(&next["r2"], &value["r2"]));
        assert!(Rc::ptr_eq(&next["r1"]["sr2"], &value["r1"]["sr2"]));
        assert!(!Rc::ptr_eq(&next["r1"]["sr1"], &value["r1"]["sr1"]));
    }

    #[test]
    fn test_toggle_key() {
        let keys = toggle_key(None, "a");
        assert_eq!(keys, vec!["a".to_string()]);
        let keys = toggle_key(Some(&["a".to_string(), "b".to_string()]), "a");
        assert_eq!(keys, vec!["b".to_string()]);
    }

    #[test]
    fn test_blank_text_clears() {
        assert_eq!(text_value("  "), None);
        assert_eq!(text_value("x"), Some("x".into()));
        assert_eq!(number_value(""), None);
        assert_eq!(number_value("abc"), None);
        assert_eq!(number_value("4.5"), Some(4.5));
    }
}
