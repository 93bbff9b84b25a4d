//! RSI (Relative Strength Index).
//!
//! Uses simple trailing means of gains and losses:
//! - delta[0] = 0, delta[i] = price[i] - price[i-1]
//! - gain = max(delta, 0), loss = max(-delta, 0)
//! - avg_gain/avg_loss: mean over the last `period` values, or over all
//!   values seen so far during warmup
//!
//! Formula: RSI = 100 - (100 / (1 + avg_gain / avg_loss))
//!
//! Degenerate windows are left to IEEE arithmetic: avg_loss == 0 with gains
//! gives 100, and a window with neither gains nor losses gives NaN.

use crate::domain::error::TradelabError;
use crate::domain::indicator::{check_period, rolling_mean, IndicatorSeries, IndicatorType};

pub fn calculate_rsi(prices: &[f64], period: usize) -> Result<IndicatorSeries, TradelabError> {
    check_period("rsi_period", period)?;

    let mut gains = Vec::with_capacity(prices.len());
    let mut losses = Vec::with_capacity(prices.len());
    for i in 0..prices.len() {
        let change = if i == 0 { 0.0 } else { prices[i] - prices[i - 1] };
        gains.push(if change > 0.0 { change } else { 0.0 });
        losses.push(if change < 0.0 { -change } else { 0.0 });
    }

    let avg_gains = rolling_mean(&gains, period);
    let avg_losses = rolling_mean(&losses, period);

    let values = avg_gains
        .iter()
        .zip(&avg_losses)
        .map(|(&g, &l)| 100.0 - (100.0 / (1.0 + g / l)))
        .collect();

    Ok(IndicatorSeries {
        indicator_type: IndicatorType::Rsi(period),
        values,
    })
}
