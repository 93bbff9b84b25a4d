//! Order execution against a [`PositionState`].
//!
//! Every fill is charged a flat per-trade fee. Fills happen at exactly the
//! requested price; there is no slippage model.

use std::fmt;

use super::position::PositionState;

pub const DEFAULT_FEE_PER_TRADE: f64 = 10.0;

/// Configuration for execution costs.
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutionConfig {
    pub fee_per_trade: f64,
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        ExecutionConfig {
            fee_per_trade: DEFAULT_FEE_PER_TRADE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Buy,
    Sell,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Buy => write!(f, "buy"),
            Side::Sell => write!(f, "sell"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quantity {
    /// A fixed share count. Strategies only size buys this way.
    Units(u64),
    /// Every share currently held.
    All,
    /// As many whole shares as the current investment covers at the order
    /// price, fee excluded.
    Affordable,
}

/// An order planned by a strategy, executed in sequence within one period.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Order {
    pub side: Side,
    pub quantity: Quantity,
    pub price: f64,
}

impl Order {
    pub fn buy(quantity: Quantity, price: f64) -> Self {
        Order {
            side: Side::Buy,
            quantity,
            price,
        }
    }

    pub fn sell_all(price: f64) -> Self {
        Order {
            side: Side::Sell,
            quantity: Quantity::All,
            price,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fill {
    pub side: Side,
    pub quantity: u64,
    pub price: f64,
    pub fee: f64,
}

impl Fill {
    /// Signed cash impact of the fill, fee included.
    pub fn cash_flow(&self) -> f64 {
        let gross = self.quantity as f64 * self.price;
        match self.side {
            Side::Buy => -(gross + self.fee),
            Side::Sell => gross - self.fee,
        }
    }
}

/// floor(investment / price), or 0 when either is not positive.
pub fn affordable_quantity(investment: f64, price: f64) -> u64 {
    if investment <= 0.0 || price <= 0.0 || !price.is_finite() {
        return 0;
    }
    (investment / price).floor() as u64
}

/// Execute one order. Returns `None` when the order resolves to zero shares
/// (nothing held to sell, or nothing affordable to buy); no fee is charged
/// in that case.
pub fn execute(position: &mut PositionState, order: &Order, config: &ExecutionConfig) -> Option<Fill> {
    let quantity = match order.quantity {
        Quantity::Units(n) => n,
        Quantity::All => position.shares,
        Quantity::Affordable => affordable_quantity(position.investment, order.price),
    };
    if quantity == 0 {
        return None;
    }

    let fill = Fill {
        side: order.side,
        quantity,
        price: order.price,
        fee: config.fee_per_trade,
    };

    position.investment += fill.cash_flow();
    match fill.side {
        Side::Buy => position.shares += quantity,
        Side::Sell => position.shares -= quantity,
    }

    Some(fill)
}
