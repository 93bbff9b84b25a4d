//! Date-indexed price series.

use chrono::NaiveDate;

use crate::domain::error::TradelabError;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub price: f64,
}

/// Ordered `(date, price)` pairs, strictly increasing by date.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSeries {
    points: Vec<PricePoint>,
}

impl PriceSeries {
    pub fn new(points: Vec<PricePoint>) -> Result<Self, TradelabError> {
        if let Some(pair) = points.windows(2).find(|w| w[1].date <= w[0].date) {
            return Err(TradelabError::UnorderedSeries {
                reason: format!("{} is not after {}", pair[1].date, pair[0].date),
            });
        }
        Ok(PriceSeries { points })
    }

    /// Sort `points` by date first; only duplicate dates are rejected.
    pub fn from_unordered(mut points: Vec<PricePoint>) -> Result<Self, TradelabError> {
        points.sort_by_key(|p| p.date);
        PriceSeries::new(points)
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn prices(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.price).collect()
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.points.iter().map(|p| p.date).collect()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
