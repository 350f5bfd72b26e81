//! Date parsing and range-boundary helpers

use chrono::{Datelike, NaiveDate};

use crate::{QueryError, QueryResult};

/// Date format used throughout the dataset and the query inputs
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a `YYYY-MM-DD` date string
pub fn parse_date(input: &str) -> QueryResult<NaiveDate> {
    NaiveDate::parse_from_str(input, DATE_FORMAT).map_err(|_| QueryError::InvalidDate {
        input: input.to_string(),
    })
}

/// Exact calendar-year subtraction.
///
/// Feb 29 has no counterpart in a non-leap target year and clamps to Feb 28.
pub fn one_year_before(date: NaiveDate) -> NaiveDate {
    match date.with_year(date.year() - 1) {
        Some(shifted) => shifted,
        None => NaiveDate::from_ymd_opt(date.year() - 1, 2, 28).unwrap_or(date),
    }
}
