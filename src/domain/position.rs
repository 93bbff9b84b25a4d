//! Cash and share position threaded through a simulation.

/// `investment` is a signed running cash balance: buys draw it down and may
/// take it below zero. `shares` is the number of whole units held.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionState {
    pub investment: f64,
    pub shares: u64,
}

impl PositionState {
    pub fn new(investment: f64) -> Self {
        PositionState {
            investment,
            shares: 0,
        }
    }

    pub fn has_shares(&self) -> bool {
        self.shares > 0
    }

    pub fn market_value(&self, price: f64) -> f64 {
        self.shares as f64 * price
    }

    /// Cash plus held shares marked at `price`.
    pub fn net_value(&self, price: f64) -> f64 {
        self.investment + self.market_value(price)
    }
}
