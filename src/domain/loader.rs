//! Table loading modes: column-select, transpose, and simulator input.
//!
//! All functions take an already-read [`RawTable`]; file access goes through
//! [`crate::ports::table_port::TablePort`].

use chrono::NaiveDate;
use std::collections::HashSet;
use tracing::debug;

use crate::domain::date_parser::{month_end, parse_date, parse_market_date};
use crate::domain::error::TradelabError;
use crate::domain::numeric::parse_numeric;
use crate::domain::observation::{Direction, Observation};
use crate::domain::price_series::{PricePoint, PriceSeries};
use crate::domain::table::RawTable;

pub const DATE_COLUMN: &str = "Date";
pub const PRICE_COLUMN: &str = "Price";
pub const OPEN_COLUMN: &str = "Open";
pub const CLOSE_COLUMN: &str = "Close";
pub const PREDICTION_COLUMN: &str = "Prediction";

#[derive(Debug, Clone, PartialEq)]
pub struct FeaturePoint {
    pub date: String,
    pub value: f64,
}

/// A single named feature with the source file's date labels.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureSeries {
    pub name: String,
    pub points: Vec<FeaturePoint>,
}

impl FeatureSeries {
    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.value).collect()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Parse the date labels and order the values oldest first. Market
    /// exports list the newest row first.
    pub fn to_price_series(&self) -> Result<PriceSeries, TradelabError> {
        let points = self
            .points
            .iter()
            .map(|p| -> Result<PricePoint, TradelabError> {
                Ok(PricePoint {
                    date: parse_market_date(&p.date)?,
                    price: p.value,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        PriceSeries::from_unordered(points)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FeatureColumn {
    pub name: String,
    pub values: Vec<f64>,
}

/// Column-oriented table indexed by month-end date.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureTable {
    pub dates: Vec<NaiveDate>,
    pub columns: Vec<FeatureColumn>,
}

impl FeatureTable {
    pub fn column(&self, name: &str) -> Option<&FeatureColumn> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn feature_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Pair one feature column with the date index.
    pub fn series(&self, name: &str) -> Result<PriceSeries, TradelabError> {
        let column = self.column(name).ok_or_else(|| TradelabError::MissingColumn {
            column: name.to_string(),
        })?;
        let points = self
            .dates
            .iter()
            .zip(&column.values)
            .map(|(&date, &price)| PricePoint { date, price })
            .collect();
        PriceSeries::new(points)
    }

    /// Column-oriented rendering: `Date` followed by one column per feature.
    pub fn to_column_oriented(&self) -> RawTable {
        let headers = std::iter::once(DATE_COLUMN.to_string())
            .chain(self.columns.iter().map(|c| c.name.clone()))
            .collect();
        let rows = self
            .dates
            .iter()
            .enumerate()
            .map(|(i, date)| {
                std::iter::once(date.format("%Y-%m-%d").to_string())
                    .chain(self.columns.iter().map(|c| c.values[i].to_string()))
                    .collect()
            })
            .collect();
        RawTable::new(headers, rows)
    }

    /// Inverse of [`transpose_table`]: one row per feature, dates as headers.
    pub fn to_row_oriented(&self, label_header: &str) -> RawTable {
        self.to_column_oriented()
            .transpose()
            .with_first_header(label_header)
    }
}

/// Column-select mode: keep `Date` and `Price`, rename `Price` to
/// `feature_name`.
pub fn select_feature(table: &RawTable, feature_name: &str) -> Result<FeatureSeries, TradelabError> {
    let date_idx = require_column(table, DATE_COLUMN)?;
    let price_idx = require_column(table, PRICE_COLUMN)?;

    let mut points = Vec::with_capacity(table.rows.len());
    for (row_no, row) in table.rows.iter().enumerate() {
        let date = cell(row, date_idx, row_no, DATE_COLUMN)?;
        let value = parse_numeric(cell(row, price_idx, row_no, PRICE_COLUMN)?)?;
        points.push(FeaturePoint {
            date: date.trim().to_string(),
            value,
        });
    }

    debug!(feature = feature_name, rows = points.len(), "selected feature column");
    Ok(FeatureSeries {
        name: feature_name.to_string(),
        points,
    })
}

/// Transpose mode for row-oriented statistics tables.
///
/// The first header cell labels the feature-name column; the remaining
/// headers are date tokens. Each row is one feature.
pub fn transpose_table(table: &RawTable) -> Result<FeatureTable, TradelabError> {
    validate_row_oriented(table)?;

    let transposed = table.transpose();

    let mut dates = Vec::with_capacity(transposed.rows.len());
    for row in &transposed.rows {
        dates.push(month_end(parse_date(&row[0])?));
    }

    let mut columns = Vec::with_capacity(transposed.headers.len() - 1);
    for (col, name) in transposed.headers.iter().enumerate().skip(1) {
        let values = transposed
            .rows
            .iter()
            .map(|row| parse_numeric(&row[col]))
            .collect::<Result<Vec<f64>, _>>()?;
        columns.push(FeatureColumn {
            name: name.trim().to_string(),
            values,
        });
    }

    debug!(
        periods = dates.len(),
        features = columns.len(),
        "transposed row-oriented table"
    );
    Ok(FeatureTable { dates, columns })
}

/// Simulator input: `Date`, `Open`, `Close`, `Prediction` columns.
pub fn load_observations(table: &RawTable) -> Result<Vec<Observation>, TradelabError> {
    let date_idx = require_column(table, DATE_COLUMN)?;
    let open_idx = require_column(table, OPEN_COLUMN)?;
    let close_idx = require_column(table, CLOSE_COLUMN)?;
    let prediction_idx = require_column(table, PREDICTION_COLUMN)?;

    table
        .rows
        .iter()
        .enumerate()
        .map(|(row_no, row)| -> Result<Observation, TradelabError> {
            Ok(Observation {
                label: cell(row, date_idx, row_no, DATE_COLUMN)?.trim().to_string(),
                open: parse_price(cell(row, open_idx, row_no, OPEN_COLUMN)?)?,
                close: parse_price(cell(row, close_idx, row_no, CLOSE_COLUMN)?)?,
                prediction: cell(row, prediction_idx, row_no, PREDICTION_COLUMN)?
                    .parse::<Direction>()?,
            })
        })
        .collect()
}

/// NaN or infinite prices would poison the running investment.
fn parse_price(text: &str) -> Result<f64, TradelabError> {
    let value = parse_numeric(text)?;
    if !value.is_finite() {
        return Err(TradelabError::NumericFormat {
            value: text.to_string(),
            reason: "price must be a finite number".into(),
        });
    }
    Ok(value)
}

fn require_column(table: &RawTable, name: &str) -> Result<usize, TradelabError> {
    table
        .column_index(name)
        .ok_or_else(|| TradelabError::MissingColumn {
            column: name.to_string(),
        })
}

fn cell<'a>(
    row: &'a [String],
    idx: usize,
    row_no: usize,
    column: &str,
) -> Result<&'a str, TradelabError> {
    row.get(idx)
        .map(String::as_str)
        .ok_or_else(|| TradelabError::Schema {
            reason: format!("row {} has no {} cell", row_no + 1, column),
        })
}

fn validate_row_oriented(table: &RawTable) -> Result<(), TradelabError> {
    if table.width() < 2 {
        return Err(TradelabError::Schema {
            reason: "expected a label column followed by at least one date column".into(),
        });
    }
    if table.is_empty() {
        return Err(TradelabError::Schema {
            reason: "expected at least one feature row".into(),
        });
    }

    let mut seen = HashSet::new();
    for (row_no, row) in table.rows.iter().enumerate() {
        if row.len() != table.width() {
            return Err(TradelabError::Schema {
                reason: format!(
                    "row {} has {} cells, header has {}",
                    row_no + 1,
                    row.len(),
                    table.width()
                ),
            });
        }
        let name = row[0].trim();
        if name.is_empty() {
            return Err(TradelabError::Schema {
                reason: format!("row {} has an empty feature name", row_no + 1),
            });
        }
        if name == DATE_COLUMN {
            return Err(TradelabError::Schema {
                reason: format!("feature name {} collides with the date column", DATE_COLUMN),
            });
        }
        if !seen.insert(name) {
            return Err(TradelabError::Schema {
                reason: format!("duplicate feature name {}", name),
            });
        }
    }
    Ok(())
}
