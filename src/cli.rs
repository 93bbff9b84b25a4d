//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{error, info};

use crate::adapters::csv_adapter::CsvAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::domain::config_validation::{
    validate_indicator_config, validate_simulation_config, INDICATOR_SECTION, SIMULATION_SECTION,
};
use crate::domain::error::TradelabError;
use crate::domain::indicator::rsi::calculate_rsi;
use crate::domain::indicator::DEFAULT_RSI_PERIOD;
use crate::domain::ledger::CostBasis;
use crate::domain::loader::{
    self, CLOSE_COLUMN, DATE_COLUMN, OPEN_COLUMN, PREDICTION_COLUMN, PRICE_COLUMN,
};
use crate::domain::metrics::SimulationSummary;
use crate::domain::observation::Observation;
use crate::domain::simulator::{SimulationConfig, StepRecord, TradingSimulator};
use crate::domain::strategy::StrategyProfile;
use crate::domain::table::RawTable;
use crate::ports::config_port::ConfigPort;
use crate::ports::table_port::TablePort;

#[derive(Parser, Debug)]
#[command(name = "tradelab", about = "Market data loading, RSI and strategy simulation")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Simulate a strategy over Date/Open/Close/Prediction rows
    Simulate {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(short, long)]
        input: PathBuf,
        /// Overrides [simulation] profile
        #[arg(short, long)]
        profile: Option<String>,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Compute RSI over the Price column of a Date/Price table, oldest row first
    Rsi {
        #[arg(short, long)]
        input: PathBuf,
        #[arg(long)]
        period: Option<usize>,
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Extract the Price column of a Date/Price table under a new name
    Feature {
        #[arg(short, long)]
        input: PathBuf,
        #[arg(short, long)]
        name: String,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Turn a features-as-rows statistics table into month-end rows
    Transpose {
        #[arg(short, long)]
        input: PathBuf,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Validate a configuration file
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    let result = match cli.command {
        Command::Simulate {
            config,
            input,
            profile,
            output,
        } => run_simulate(&config, &input, profile.as_deref(), output.as_deref()),
        Command::Rsi {
            input,
            period,
            config,
            output,
        } => run_rsi(&input, period, config.as_deref(), output.as_deref()),
        Command::Feature {
            input,
            name,
            output,
        } => run_feature(&input, &name, output.as_deref()),
        Command::Transpose { input, output } => run_transpose(&input, output.as_deref()),
        Command::Validate { config } => run_validate(&config),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "command failed");
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

pub fn load_config(path: &Path) -> Result<FileConfigAdapter, TradelabError> {
    info!(path = %path.display(), "loading config");
    FileConfigAdapter::from_file(path)
}

pub fn build_simulation_config(adapter: &dyn ConfigPort) -> Result<SimulationConfig, TradelabError> {
    let defaults = SimulationConfig::default();
    let profile = match adapter.get_string(SIMULATION_SECTION, "profile") {
        Some(name) => name.parse::<StrategyProfile>()?,
        None => defaults.profile,
    };

    Ok(SimulationConfig {
        profile,
        initial_investment: adapter.get_double(
            SIMULATION_SECTION,
            "initial_investment",
            defaults.initial_investment,
        ),
        fee_per_trade: adapter.get_double(SIMULATION_SECTION, "fee_per_trade", defaults.fee_per_trade),
    })
}

pub fn build_rsi_period(adapter: &dyn ConfigPort) -> Result<usize, TradelabError> {
    let period = adapter.get_int(INDICATOR_SECTION, "rsi_period", DEFAULT_RSI_PERIOD as i64);
    usize::try_from(period)
        .ok()
        .filter(|&p| p >= 1)
        .ok_or_else(|| TradelabError::ConfigInvalid {
            section: INDICATOR_SECTION.into(),
            key: "rsi_period".into(),
            reason: "rsi_period must be at least 1".into(),
        })
}

/// One CSV row per step; `AvgCost` is `blocked` when no buy run ends at the
/// previous period.
pub fn steps_table(observations: &[Observation], steps: &[StepRecord]) -> RawTable {
    let headers = [
        DATE_COLUMN,
        OPEN_COLUMN,
        CLOSE_COLUMN,
        PREDICTION_COLUMN,
        "Investment",
        "Shares",
        "Action",
        "AvgCost",
    ]
    .iter()
    .map(|h| h.to_string())
    .collect();

    let rows = observations
        .iter()
        .zip(steps)
        .map(|(obs, step)| {
            let avg_cost = match step.cost_basis {
                CostBasis::Resolved(price) => price.to_string(),
                CostBasis::SaleBlocked => "blocked".to_string(),
            };
            vec![
                step.label.clone(),
                obs.open.to_string(),
                obs.close.to_string(),
                obs.prediction.to_string(),
                step.investment.to_string(),
                step.shares.to_string(),
                step.action.to_string(),
                avg_cost,
            ]
        })
        .collect();

    RawTable::new(headers, rows)
}

fn emit_table(adapter: &CsvAdapter, table: &RawTable, output: Option<&Path>) -> Result<(), TradelabError> {
    match output {
        Some(path) => {
            adapter.write_table(table, path)?;
            eprintln!("Wrote {} rows to {}", table.rows.len(), path.display());
            Ok(())
        }
        None => adapter.write_to(table, io::stdout().lock()),
    }
}

fn format_value(value: f64) -> String {
    if value.is_nan() {
        String::new()
    } else {
        value.to_string()
    }
}

fn run_simulate(
    config_path: &Path,
    input: &Path,
    profile_override: Option<&str>,
    output: Option<&Path>,
) -> Result<(), TradelabError> {
    eprintln!("Loading config from {}", config_path.display());
    let adapter = load_config(config_path)?;
    validate_simulation_config(&adapter)?;

    let mut sim_config = build_simulation_config(&adapter)?;
    if let Some(name) = profile_override {
        sim_config.profile = name.parse()?;
    }

    let csv = CsvAdapter::default();
    let observations = loader::load_observations(&csv.read_table(input)?)?;
    info!(
        profile = %sim_config.profile,
        periods = observations.len(),
        "running simulation"
    );

    let simulator = TradingSimulator::from_config(&sim_config);
    let result = simulator.run(sim_config.initial_investment, &observations);

    emit_table(&csv, &steps_table(&observations, &result.steps), output)?;

    let last_close = observations.last().map(|o| o.close).unwrap_or(0.0);
    let summary = SimulationSummary::compute(&result, sim_config.initial_investment, last_close);

    eprintln!("\n=== Simulation: {} ===", sim_config.profile);
    eprintln!("Periods:            {}", summary.periods);
    eprintln!(
        "Steps (buy/sell/hold): {}/{}/{}",
        summary.buy_steps, summary.sell_steps, summary.hold_steps
    );
    eprintln!(
        "Fills (buy/sell):   {}/{}",
        summary.buy_fills, summary.sell_fills
    );
    eprintln!("Fees paid:          {:.2}", summary.fees_paid);
    eprintln!("Final investment:   {:.2}", summary.final_investment);
    eprintln!("Shares held:        {}", summary.final_shares);
    eprintln!("Market value:       {:.2}", summary.market_value);
    eprintln!("Net value:          {:.2}", summary.net_value);
    eprintln!("Total return:       {:.2}%", summary.total_return * 100.0);
    Ok(())
}

fn run_rsi(
    input: &Path,
    period_override: Option<usize>,
    config_path: Option<&Path>,
    output: Option<&Path>,
) -> Result<(), TradelabError> {
    let period = match (period_override, config_path) {
        (Some(p), _) => p,
        (None, Some(path)) => {
            let adapter = load_config(path)?;
            validate_indicator_config(&adapter)?;
            build_rsi_period(&adapter)?
        }
        (None, None) => DEFAULT_RSI_PERIOD,
    };

    let csv = CsvAdapter::default();
    let series =
        loader::select_feature(&csv.read_table(input)?, PRICE_COLUMN)?.to_price_series()?;
    let prices = series.prices();
    let rsi = calculate_rsi(&prices, period)?;
    info!(indicator = %rsi.indicator_type, rows = series.len(), "computed indicator");

    let headers = vec![
        DATE_COLUMN.to_string(),
        PRICE_COLUMN.to_string(),
        rsi.indicator_type.to_string(),
    ];
    let rows = series
        .dates()
        .iter()
        .zip(&prices)
        .zip(&rsi.values)
        .map(|((date, price), &value)| {
            vec![
                date.format("%Y-%m-%d").to_string(),
                price.to_string(),
                format_value(value),
            ]
        })
        .collect();

    emit_table(&csv, &RawTable::new(headers, rows), output)
}

fn run_feature(input: &Path, name: &str, output: Option<&Path>) -> Result<(), TradelabError> {
    let csv = CsvAdapter::default();
    let feature = loader::select_feature(&csv.read_table(input)?, name)?;

    let headers = vec![DATE_COLUMN.to_string(), feature.name.clone()];
    let rows = feature
        .points
        .iter()
        .map(|p| vec![p.date.clone(), p.value.to_string()])
        .collect();

    emit_table(&csv, &RawTable::new(headers, rows), output)
}

fn run_transpose(input: &Path, output: Option<&Path>) -> Result<(), TradelabError> {
    let csv = CsvAdapter::default();
    let table = loader::transpose_table(&csv.read_table(input)?)?;
    eprintln!(
        "Transposed {} features over {} periods",
        table.columns.len(),
        table.dates.len()
    );
    emit_table(&csv, &table.to_column_oriented(), output)
}

fn run_validate(config_path: &Path) -> Result<(), TradelabError> {
    eprintln!("Validating config: {}", config_path.display());
    let adapter = load_config(config_path)?;
    validate_simulation_config(&adapter)?;
    validate_indicator_config(&adapter)?;

    let sim_config = build_simulation_config(&adapter)?;
    let period = build_rsi_period(&adapter)?;

    eprintln!("\nSimulation:");
    eprintln!("  profile:            {}", sim_config.profile);
    eprintln!("  initial_investment: {}", sim_config.initial_investment);
    eprintln!("  fee_per_trade:      {}", sim_config.fee_per_trade);
    eprintln!("\nIndicator:");
    eprintln!("  rsi_period:         {}", period);
    eprintln!("\nConfiguration is valid");
    Ok(())
}
