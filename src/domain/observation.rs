//! Per-period simulator input.

use std::fmt;
use std::str::FromStr;

use crate::domain::error::TradelabError;

/// Predicted market direction for a period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

impl FromStr for Direction {
    type Err = TradelabError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "up" | "1" | "true" => Ok(Direction::Up),
            "down" | "0" | "false" => Ok(Direction::Down),
            _ => Err(TradelabError::InvalidPrediction {
                value: s.to_string(),
            }),
        }
    }
}

impl From<bool> for Direction {
    fn from(up: bool) -> Self {
        if up { Direction::Up } else { Direction::Down }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Up => write!(f, "up"),
            Direction::Down => write!(f, "down"),
        }
    }
}

/// One trading period: open and close prices plus the externally supplied
/// prediction for that period.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub label: String,
    pub open: f64,
    pub close: f64,
    pub prediction: Direction,
}

impl Observation {
    pub fn new(label: impl Into<String>, open: f64, close: f64, prediction: Direction) -> Self {
        Observation {
            label: label.into(),
            open,
            close,
            prediction,
        }
    }
}
