use serde::{Deserialize, Serialize};

/// A single table cell, typed at parse time.
///
/// Typing is decided per cell, not per column, so a column may hold a mix
/// of numbers and text when the source file does.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    Number(f64),
    Text(String),
}

impl Cell {
    /// Coerce a raw field: anything that parses as `f64` (ignoring surrounding
    /// whitespace) becomes a number, everything else is kept verbatim.
    pub fn parse(field: &str) -> Self {
        match field.trim().parse::<f64>() {
            Ok(v) => Cell::Number(v),
            Err(_) => Cell::Text(field.to_string()),
        }
    }

    /// The numeric value, if this is a number cell.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Cell::Number(v) => Some(*v),
            Cell::Text(_) => None,
        }
    }

    /// The text value, if this is a text cell.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Text(s) => Some(s),
            Cell::Number(_) => None,
        }
    }

    /// Exact match against a search term.
    ///
    /// Text compares case-sensitively and byte-for-byte. A number cell matches
    /// when the term coerces to the same number, so a header coerced to
    /// `2020.0` still matches the label `"2020"`.
    pub fn matches(&self, value: &str) -> bool {
        match self {
            Cell::Text(s) => s == value,
            Cell::Number(n) => matches!(Cell::parse(value), Cell::Number(v) if v == *n),
        }
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Cell::Number(v) => write!(f, "{v}"),
            Cell::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<f64> for Cell {
    fn from(v: f64) -> Self {
        Cell::Number(v)
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Cell::Text(s.to_string())
    }
}

impl From<String> for Cell {
    fn from(s: String) -> Self {
        Cell::Text(s)
    }
}
