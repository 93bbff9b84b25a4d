//! Date token parsing for economic tables.
//!
//! Three formats are tried in order:
//! - `YY-Mon` (`23-Jun`)
//! - `Mon-YY` (`Jun-23`)
//! - `YYYY-MM-DD` (`2023-06-30`)
//!
//! Market price exports use `MM/DD/YYYY` instead; [`parse_market_date`]
//! accepts that as a fourth, last-resort format.
//!
//! Month-only formats resolve to the first day of the month. Two-digit years
//! pivot at 69: `00..=68` map to 2000-2068, `69..=99` to 1969-1999.

use chrono::{Datelike, NaiveDate};

use crate::domain::error::TradelabError;

const MONTH_ABBREVIATIONS: [&str; 12] = [
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];

const TWO_DIGIT_YEAR_PIVOT: u32 = 69;

const MARKET_DATE_FORMAT: &str = "%m/%d/%Y";

pub fn parse_date(token: &str) -> Result<NaiveDate, TradelabError> {
    let token = token.trim();
    parse_year_month(token)
        .or_else(|| parse_month_year(token))
        .or_else(|| NaiveDate::parse_from_str(token, "%Y-%m-%d").ok())
        .ok_or_else(|| TradelabError::DateFormat {
            token: token.to_string(),
        })
}

/// [`parse_date`], falling back to `MM/DD/YYYY` (`06/28/2024`). The error
/// still names the original token.
pub fn parse_market_date(token: &str) -> Result<NaiveDate, TradelabError> {
    parse_date(token).or_else(|err| {
        NaiveDate::parse_from_str(token.trim(), MARKET_DATE_FORMAT).map_err(|_| err)
    })
}

/// Last calendar day of `date`'s month.
pub fn month_end(date: NaiveDate) -> NaiveDate {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|first| first.pred_opt())
        .unwrap_or(date)
}

fn parse_year_month(token: &str) -> Option<NaiveDate> {
    let (year, month) = token.split_once('-')?;
    first_of_month(two_digit_year(year)?, month_number(month)?)
}

fn parse_month_year(token: &str) -> Option<NaiveDate> {
    let (month, year) = token.split_once('-')?;
    first_of_month(two_digit_year(year)?, month_number(month)?)
}

fn two_digit_year(s: &str) -> Option<i32> {
    if s.len() != 2 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let yy: u32 = s.parse().ok()?;
    let century = if yy < TWO_DIGIT_YEAR_PIVOT { 2000 } else { 1900 };
    Some((century + yy) as i32)
}

fn month_number(s: &str) -> Option<u32> {
    MONTH_ABBREVIATIONS
        .iter()
        .position(|m| m.eq_ignore_ascii_case(s))
        .map(|i| i as u32 + 1)
}

fn first_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, 1)
}
