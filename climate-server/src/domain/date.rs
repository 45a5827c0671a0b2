//! Observation date helpers.
//!
//! Dates are stored as ISO `yyyy-mm-dd` text, so range filters are plain
//! string comparisons. These helpers cover the places where a real calendar
//! date is needed: the one-year window and optional path validation.

use chrono::{Days, NaiveDate};

/// Format used for every stored and requested date.
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Length of the trailing observation window.
pub const WINDOW_DAYS: u64 = 365;

/// Error returned when a string is not a `yyyy-mm-dd` calendar date.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid date {value:?}: expected yyyy-mm-dd")]
pub struct InvalidDate {
    pub value: String,
}

/// Parse a strict `yyyy-mm-dd` date.
///
/// Chrono accepts unpadded fields (`2017-1-5`), which would not compare
/// correctly against stored text, so the length is checked as well.
///
/// # Examples
///
/// ```
/// use climate_server::domain::parse_iso_date;
///
/// let date = parse_iso_date("2017-08-23").unwrap();
/// assert_eq!(date.to_string(), "2017-08-23");
///
/// assert!(parse_iso_date("2017-8-23").is_err());
/// assert!(parse_iso_date("yesterday").is_err());
/// ```
pub fn parse_iso_date(s: &str) -> Result<NaiveDate, InvalidDate> {
    let invalid = || InvalidDate {
        value: s.to_string(),
    };

    if s.len() != 10 {
        return Err(invalid());
    }

    NaiveDate::parse_from_str(s, ISO_DATE_FORMAT).map_err(|_| invalid())
}

/// Render a date the way it is stored.
pub fn format_iso_date(date: NaiveDate) -> String {
    date.format(ISO_DATE_FORMAT).to_string()
}

/// First day of the trailing year that ends on `reference`.
pub fn one_year_before(reference: NaiveDate) -> NaiveDate {
    reference
        .checked_sub_days(Days::new(WINDOW_DAYS))
        .unwrap_or(NaiveDate::MIN)
}
