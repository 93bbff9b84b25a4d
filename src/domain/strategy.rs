//! Trading policies selectable by configuration.
//!
//! Each profile turns one observation, the current position and the cost
//! basis of held shares into an ordered list of orders for the period.

use std::fmt;
use std::str::FromStr;

use crate::domain::error::TradelabError;
use crate::domain::execution::{Order, Quantity};
use crate::domain::ledger::CostBasis;
use crate::domain::observation::{Direction, Observation};
use crate::domain::position::PositionState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyProfile {
    /// Buy one unit at the open on every predicted down period; sell the
    /// whole position at the close on a predicted up period when the cost
    /// basis is below the close.
    FixedUnitDca,
    /// Up: rotate any position out at the open, buy as many units as the
    /// investment covers at the open, and sell them again at the close if
    /// the close is above the purchase price. Down: exit at the open.
    LumpSumRotation,
    /// Like `FixedUnitDca` but sells on every predicted up period, ignoring
    /// the cost basis.
    SimpleThreshold,
}

impl StrategyProfile {
    pub const ALL: [StrategyProfile; 3] = [
        StrategyProfile::FixedUnitDca,
        StrategyProfile::LumpSumRotation,
        StrategyProfile::SimpleThreshold,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            StrategyProfile::FixedUnitDca => "fixed_unit_dca",
            StrategyProfile::LumpSumRotation => "lump_sum_rotation",
            StrategyProfile::SimpleThreshold => "simple_threshold",
        }
    }

    /// Orders for one period, executed in the returned order.
    pub fn plan(&self, obs: &Observation, position: &PositionState, basis: CostBasis) -> Vec<Order> {
        match self {
            StrategyProfile::FixedUnitDca => {
                if obs.prediction == Direction::Up
                    && position.has_shares()
                    && basis.is_below(obs.close)
                {
                    vec![Order::sell_all(obs.close)]
                } else if obs.prediction == Direction::Down {
                    vec![Order::buy(Quantity::Units(1), obs.open)]
                } else {
                    vec![]
                }
            }
            StrategyProfile::SimpleThreshold => match obs.prediction {
                Direction::Up if position.has_shares() => vec![Order::sell_all(obs.close)],
                Direction::Up => vec![],
                Direction::Down => vec![Order::buy(Quantity::Units(1), obs.open)],
            },
            StrategyProfile::LumpSumRotation => {
                let mut orders = Vec::new();
                if position.has_shares() {
                    orders.push(Order::sell_all(obs.open));
                }
                if obs.prediction == Direction::Up {
                    orders.push(Order::buy(Quantity::Affordable, obs.open));
                    if obs.close > obs.open {
                        orders.push(Order::sell_all(obs.close));
                    }
                }
                orders
            }
        }
    }
}

impl FromStr for StrategyProfile {
    type Err = TradelabError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "fixed_unit_dca" | "dca" | "trade" => Ok(StrategyProfile::FixedUnitDca),
            "lump_sum_rotation" | "lump_sum" | "trade_purchase" => {
                Ok(StrategyProfile::LumpSumRotation)
            }
            "simple_threshold" | "threshold" | "trade_dca" => Ok(StrategyProfile::SimpleThreshold),
            _ => Err(TradelabError::ConfigInvalid {
                section: "simulation".into(),
                key: "profile".into(),
                reason: format!(
                    "unknown profile {:?} (expected one of {})",
                    s,
                    StrategyProfile::ALL
                        .iter()
                        .map(|p| p.name())
                        .collect::<Vec<_>>()
                        .join(", ")
                ),
            }),
        }
    }
}

impl fmt::Display for StrategyProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
