//! Step-wise trading simulation.
//!
//! The simulator holds no state of its own. The caller owns a
//! [`SimulationState`] and passes it to [`TradingSimulator::step`] once per
//! observation, strictly in chronological order. Each step:
//!
//! 1. looks up the cost basis of the buy run ending at the last recorded
//!    period (`SaleBlocked` when the ledger is empty),
//! 2. asks the configured [`StrategyProfile`] for the period's orders,
//! 3. executes them in sequence,
//! 4. appends one ledger entry: the buy price if a buy filled, else 0.

use std::fmt;
use tracing::{debug, info};

use crate::domain::execution::{execute, ExecutionConfig, Fill, Side};
use crate::domain::ledger::{CostBasis, Ledger, LedgerEntry};
use crate::domain::observation::Observation;
use crate::domain::position::PositionState;
use crate::domain::strategy::StrategyProfile;

pub const DEFAULT_INITIAL_INVESTMENT: f64 = 1_000.0;

#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    pub profile: StrategyProfile,
    pub initial_investment: f64,
    pub fee_per_trade: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            profile: StrategyProfile::FixedUnitDca,
            initial_investment: DEFAULT_INITIAL_INVESTMENT,
            fee_per_trade: ExecutionConfig::default().fee_per_trade,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Buy,
    Sell,
    Hold,
}

impl From<Side> for Action {
    fn from(side: Side) -> Self {
        match side {
            Side::Buy => Action::Buy,
            Side::Sell => Action::Sell,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Buy => write!(f, "buy"),
            Action::Sell => write!(f, "sell"),
            Action::Hold => write!(f, "hold"),
        }
    }
}

/// Caller-owned state threaded through every step.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationState {
    pub position: PositionState,
    pub ledger: Ledger,
}

impl SimulationState {
    pub fn new(initial_investment: f64) -> Self {
        SimulationState {
            position: PositionState::new(initial_investment),
            ledger: Ledger::new(),
        }
    }
}

/// Outcome of one step. `action` is the side of the last fill, or `Hold`
/// when nothing filled; `cost_basis` is the basis consulted for the
/// decision.
#[derive(Debug, Clone, PartialEq)]
pub struct StepRecord {
    pub label: String,
    pub investment: f64,
    pub shares: u64,
    pub action: Action,
    pub cost_basis: CostBasis,
    pub fills: Vec<Fill>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SimulationResult {
    pub steps: Vec<StepRecord>,
    pub final_state: SimulationState,
}

#[derive(Debug, Clone)]
pub struct TradingSimulator {
    profile: StrategyProfile,
    execution: ExecutionConfig,
}

impl TradingSimulator {
    pub fn new(profile: StrategyProfile, execution: ExecutionConfig) -> Self {
        TradingSimulator { profile, execution }
    }

    pub fn from_config(config: &SimulationConfig) -> Self {
        TradingSimulator::new(
            config.profile,
            ExecutionConfig {
                fee_per_trade: config.fee_per_trade,
            },
        )
    }

    pub fn profile(&self) -> StrategyProfile {
        self.profile
    }

    /// Cost basis of the shares acquired in the run ending at the last
    /// recorded period.
    pub fn cost_basis(&self, state: &SimulationState) -> CostBasis {
        match state.ledger.last_index() {
            Some(idx) => state.ledger.average_cost(idx),
            None => CostBasis::SaleBlocked,
        }
    }

    pub fn step(&self, state: &mut SimulationState, obs: &Observation) -> StepRecord {
        let basis = self.cost_basis(state);
        let orders = self.profile.plan(obs, &state.position, basis);

        let fills: Vec<Fill> = orders
            .iter()
            .filter_map(|order| execute(&mut state.position, order, &self.execution))
            .collect();

        let bought_at = fills
            .iter()
            .rev()
            .find(|f| f.side == Side::Buy)
            .map(|f| f.price);
        state.ledger.record(match bought_at {
            Some(price) => LedgerEntry::purchase(price),
            None => LedgerEntry::no_purchase(),
        });

        let action = fills
            .last()
            .map(|f| Action::from(f.side))
            .unwrap_or(Action::Hold);

        debug!(
            period = %obs.label,
            prediction = %obs.prediction,
            %action,
            investment = state.position.investment,
            shares = state.position.shares,
            "step"
        );

        StepRecord {
            label: obs.label.clone(),
            investment: state.position.investment,
            shares: state.position.shares,
            action,
            cost_basis: basis,
            fills,
        }
    }

    pub fn run(&self, initial_investment: f64, observations: &[Observation]) -> SimulationResult {
        let mut state = SimulationState::new(initial_investment);
        let steps: Vec<StepRecord> = observations
            .iter()
            .map(|obs| self.step(&mut state, obs))
            .collect();

        info!(
            profile = %self.profile,
            periods = steps.len(),
            investment = state.position.investment,
            shares = state.position.shares,
            "simulation finished"
        );

        SimulationResult {
            steps,
            final_state: state,
        }
    }
}
