//! Technical indicators over plain price sequences.
//!
//! - `IndicatorType`: indicator identity + parameters
//! - `IndicatorSeries`: one output value per input price
//! - `rolling_mean`: trailing mean that never leaves the warmup undefined

pub mod rsi;

use std::fmt;

use crate::domain::error::TradelabError;

pub const DEFAULT_RSI_PERIOD: usize = 14;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndicatorType {
    Rsi(usize),
}

#[derive(Debug, Clone)]
pub struct IndicatorSeries {
    pub indicator_type: IndicatorType,
    pub values: Vec<f64>,
}

impl fmt::Display for IndicatorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndicatorType::Rsi(period) => write!(f, "RSI({})", period),
        }
    }
}

/// Trailing mean over `window` values. The first `window - 1` outputs average
/// whatever values are available so far, so no output is undefined.
pub fn rolling_mean(values: &[f64], window: usize) -> Vec<f64> {
    (0..values.len())
        .map(|i| {
            let start = (i + 1).saturating_sub(window);
            let slice = &values[start..=i];
            slice.iter().sum::<f64>() / slice.len() as f64
        })
        .collect()
}

pub(crate) fn check_period(name: &str, period: usize) -> Result<(), TradelabError> {
    if period == 0 {
        return Err(TradelabError::InvalidParameter {
            name: name.to_string(),
            reason: "window must be at least 1".into(),
        });
    }
    Ok(())
}
