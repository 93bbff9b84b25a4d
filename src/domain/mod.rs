//! Core domain types and logic.

pub mod error;
pub mod numeric;
pub mod date_parser;
pub mod table;
pub mod price_series;
pub mod observation;
pub mod loader;
pub mod indicator;
pub mod ledger;
pub mod position;
pub mod execution;
pub mod strategy;
pub mod simulator;
pub mod metrics;
pub mod config_validation;
