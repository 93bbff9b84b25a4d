#![allow(dead_code)]

use chrono::NaiveDate;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;
use tradelab::domain::observation::{Direction, Observation};

/// Four periods: buy, sell above basis, buy after a flat period, sell.
pub const OBSERVATIONS_CSV: &str = "Date,Open,Close,Prediction\n\
2024-01-01,50,52,down\n\
2024-01-02,55,60,up\n\
2024-01-03,58,57,0\n\
2024-01-04,60,61,1\n";

pub const MARKET_CSV: &str = "Date,Price,Open,High,Low,Vol.,Change %\n\
01/05/2024,1,1,1,1,1.0B,0.00%\n\
01/04/2024,2,2,2,2,1.0B,0.00%\n\
01/03/2024,3,3,3,3,1.0B,0.00%\n\
01/02/2024,2,2,2,2,1.0B,0.00%\n";

pub const STATSCAN_CSV: &str = "Reference period,Jan-23,Feb-23,Mar-23\n\
All-items,153.9,154.5,155.3\n\
Food,\"1,180.2\",\"1,181.0\",\"1,190.4\"\n";

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn obs(label: &str, open: f64, close: f64, up: bool) -> Observation {
    Observation::new(label, open, close, Direction::from(up))
}

pub fn sample_observations() -> Vec<Observation> {
    vec![
        obs("2024-01-01", 50.0, 52.0, false),
        obs("2024-01-02", 55.0, 60.0, true),
        obs("2024-01-03", 58.0, 57.0, false),
        obs("2024-01-04", 60.0, 61.0, true),
    ]
}

pub fn write_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}
