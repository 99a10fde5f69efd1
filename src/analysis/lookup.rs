use crate::error::ExplorerError;
use crate::models::{Cell, Table};

/// Indices of every row whose `column` cell equals `value`, in table order.
///
/// Rows too short to have the column never match.
pub fn find_rows_by_predicate(table: &Table, column: usize, value: &str) -> Vec<usize> {
    table
        .iter()
        .enumerate()
        .filter(|(_, row)| row.get(column).is_some_and(|cell| cell.matches(value)))
        .map(|(index, _)| index)
        .collect()
}

/// Index of the single row whose `key_column` cell equals `key`.
///
/// Zero matches is `NotFound`. Duplicate keys are always `Ambiguous`; the
/// first match is never picked silently.
pub fn find_row_by_key(table: &Table, key_column: usize, key: &str) -> Result<usize, ExplorerError> {
    let matches = find_rows_by_predicate(table, key_column, key);
    match matches.as_slice() {
        [index] => Ok(*index),
        [] => Err(ExplorerError::NotFound(format!("'{key}'"))),
        _ => Err(ExplorerError::Ambiguous {
            key: key.to_string(),
            matches: matches.len(),
        }),
    }
}

/// Column whose header cell equals the label `"{year}{suffix}"`.
pub fn find_year_column(header: &[Cell], year: i32, suffix: &str) -> Result<usize, ExplorerError> {
    let label = format!("{year}{suffix}");
    header
        .iter()
        .position(|cell| cell.matches(&label))
        .ok_or_else(|| ExplorerError::NotFound(format!("year {year} (no column '{label}')")))
}

/// Every `(year, column)` pair whose header cell is a year label, in column order.
pub fn year_columns(header: &[Cell], suffix: &str) -> Vec<(i32, usize)> {
    header
        .iter()
        .enumerate()
        .filter_map(|(column, cell)| parse_year_label(cell, suffix).map(|year| (year, column)))
        .collect()
}

fn parse_year_label(cell: &Cell, suffix: &str) -> Option<i32> {
    match cell {
        Cell::Text(label) => label.strip_suffix(suffix)?.trim().parse().ok(),
        // A bare year header was coerced to a number by the reader
        Cell::Number(n) if suffix.trim().is_empty() && n.fract() == 0.0 => Some(*n as i32),
        Cell::Number(_) => None,
    }
}

/// Distinct text values of a column, in first-occurrence order.
pub fn distinct_values(table: &Table, column: usize) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for value in table.iter().filter_map(|row| row.get(column).and_then(Cell::as_text)) {
        if !seen.iter().any(|s| s == value) {
            seen.push(value.to_string());
        }
    }
    seen
}
