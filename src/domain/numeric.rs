//! Numeric cell cleaning.
//!
//! Market and statistics exports write large numbers with thousands
//! separators ("1,234.5"). Cells arrive either already numeric or as text.

use crate::domain::error::TradelabError;

/// A single table cell before numeric conversion.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Number(f64),
    Text(String),
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Cell::Text(s.to_string())
    }
}

impl From<f64> for Cell {
    fn from(v: f64) -> Self {
        Cell::Number(v)
    }
}

/// Convert a cell to `f64`. Numbers pass through unchanged; text has every
/// `,` removed before parsing.
pub fn clean_numeric(cell: &Cell) -> Result<f64, TradelabError> {
    match cell {
        Cell::Number(v) => Ok(*v),
        Cell::Text(s) => parse_numeric(s),
    }
}

/// Strip thousands separators from `text` and parse the remainder.
pub fn parse_numeric(text: &str) -> Result<f64, TradelabError> {
    let stripped: String = text.chars().filter(|&c| c != ',').collect();
    stripped
        .trim()
        .parse::<f64>()
        .map_err(|e| TradelabError::NumericFormat {
            value: text.to_string(),
            reason: e.to_string(),
        })
}
