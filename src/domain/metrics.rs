//! Summary statistics for a finished simulation.

use super::execution::Side;
use super::simulator::{Action, SimulationResult};

#[derive(Debug, Clone, PartialEq)]
pub struct SimulationSummary {
    pub periods: usize,
    pub buy_steps: usize,
    pub sell_steps: usize,
    pub hold_steps: usize,
    pub buy_fills: usize,
    pub sell_fills: usize,
    pub fees_paid: f64,
    pub final_investment: f64,
    pub final_shares: u64,
    pub market_value: f64,
    pub net_value: f64,
    pub total_return: f64,
}

impl SimulationSummary {
    /// Held shares are marked at `last_close`.
    pub fn compute(result: &SimulationResult, initial_investment: f64, last_close: f64) -> Self {
        let mut buy_steps = 0usize;
        let mut sell_steps = 0usize;
        let mut hold_steps = 0usize;
        let mut buy_fills = 0usize;
        let mut sell_fills = 0usize;
        let mut fees_paid = 0.0_f64;

        for step in &result.steps {
            match step.action {
                Action::Buy => buy_steps += 1,
                Action::Sell => sell_steps += 1,
                Action::Hold => hold_steps += 1,
            }
            for fill in &step.fills {
                match fill.side {
                    Side::Buy => buy_fills += 1,
                    Side::Sell => sell_fills += 1,
                }
                fees_paid += fill.fee;
            }
        }

        let position = &result.final_state.position;
        let market_value = if position.has_shares() {
            position.market_value(last_close)
        } else {
            0.0
        };
        let net_value = position.investment + market_value;

        let total_return = if initial_investment > 0.0 {
            (net_value - initial_investment) / initial_investment
        } else {
            0.0
        };

        SimulationSummary {
            periods: result.steps.len(),
            buy_steps,
            sell_steps,
            hold_steps,
            buy_fills,
            sell_fills,
            fees_paid,
            final_investment: position.investment,
            final_shares: position.shares,
            market_value,
            net_value,
            total_return,
        }
    }
}
