use serde::{Deserialize, Serialize};

use super::Cell;
use crate::error::ExplorerError;

/// One row of a table. Rows are not required to share a width.
pub type Row = Vec<Cell>;

/// A row-oriented table loaded from a delimited file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Table {
    /// Rows in file order
    pub rows: Vec<Row>,
}

impl Table {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_rows(rows: Vec<Row>) -> Self {
        Self { rows }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    /// First row, which holds the column labels when the header was kept.
    pub fn header(&self) -> Option<&Row> {
        self.rows.first()
    }

    pub fn cell(&self, row: usize, column: usize) -> Option<&Cell> {
        self.rows.get(row).and_then(|r| r.get(column))
    }

    /// Text content of a cell, or `None` if it is missing or numeric.
    pub fn text_at(&self, row: usize, column: usize) -> Option<&str> {
        self.cell(row, column).and_then(Cell::as_text)
    }

    /// Numeric content of a cell.
    ///
    /// A missing cell is `NotFound`; a text cell is `TypeMismatch`.
    pub fn number_at(&self, row: usize, column: usize) -> Result<f64, ExplorerError> {
        match self.cell(row, column) {
            Some(Cell::Number(v)) => Ok(*v),
            Some(Cell::Text(s)) => Err(ExplorerError::TypeMismatch {
                row,
                column,
                found: s.clone(),
            }),
            None => Err(ExplorerError::NotFound(format!(
                "row {row} has no column {column}"
            ))),
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Row> {
        self.rows.iter()
    }
}

impl FromIterator<Row> for Table {
    fn from_iter<I: IntoIterator<Item = Row>>(iter: I) -> Self {
        Self {
            rows: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Table {
    type Item = &'a Row;
    type IntoIter = std::slice::Iter<'a, Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
