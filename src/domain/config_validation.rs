//! Configuration validation.
//!
//! Every key is optional; a present key must hold a usable value. Checks run
//! on the raw text so that a malformed number is reported instead of
//! silently falling back to the default.

use crate::domain::error::TradelabError;
use crate::domain::strategy::StrategyProfile;
use crate::ports::config_port::ConfigPort;

pub const SIMULATION_SECTION: &str = "simulation";
pub const INDICATOR_SECTION: &str = "indicator";

pub fn validate_simulation_config(config: &dyn ConfigPort) -> Result<(), TradelabError> {
    validate_profile(config)?;
    validate_initial_investment(config)?;
    validate_fee(config)?;
    Ok(())
}

pub fn validate_indicator_config(config: &dyn ConfigPort) -> Result<(), TradelabError> {
    validate_rsi_period(config)
}

fn invalid(section: &str, key: &str, reason: impl Into<String>) -> TradelabError {
    TradelabError::ConfigInvalid {
        section: section.to_string(),
        key: key.to_string(),
        reason: reason.into(),
    }
}

fn read_number(config: &dyn ConfigPort, section: &str, key: &str) -> Result<Option<f64>, TradelabError> {
    match config.get_string(section, key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(|_| invalid(section, key, format!("{raw:?} is not a number"))),
    }
}

fn validate_profile(config: &dyn ConfigPort) -> Result<(), TradelabError> {
    if let Some(name) = config.get_string(SIMULATION_SECTION, "profile") {
        name.parse::<StrategyProfile>()?;
    }
    Ok(())
}

fn validate_initial_investment(config: &dyn ConfigPort) -> Result<(), TradelabError> {
    if let Some(value) = read_number(config, SIMULATION_SECTION, "initial_investment")? {
        if !value.is_finite() || value <= 0.0 {
            return Err(invalid(
                SIMULATION_SECTION,
                "initial_investment",
                "initial_investment must be positive",
            ));
        }
    }
    Ok(())
}

fn validate_fee(config: &dyn ConfigPort) -> Result<(), TradelabError> {
    if let Some(value) = read_number(config, SIMULATION_SECTION, "fee_per_trade")? {
        if !value.is_finite() || value < 0.0 {
            return Err(invalid(
                SIMULATION_SECTION,
                "fee_per_trade",
                "fee_per_trade must be non-negative",
            ));
        }
    }
    Ok(())
}

fn validate_rsi_period(config: &dyn ConfigPort) -> Result<(), TradelabError> {
    if let Some(raw) = config.get_string(INDICATOR_SECTION, "rsi_period") {
        match raw.trim().parse::<i64>() {
            Ok(n) if n >= 1 => {}
            Ok(_) => {
                return Err(invalid(
                    INDICATOR_SECTION,
                    "rsi_period",
                    "rsi_period must be at least 1",
                ))
            }
            Err(_) => {
                return Err(invalid(
                    INDICATOR_SECTION,
                    "rsi_period",
                    format!("{raw:?} is not an integer"),
                ))
            }
        }
    }
    Ok(())
}
