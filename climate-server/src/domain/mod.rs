//! Domain types for the climate API.
//!
//! Table records, query projections and the date rules the queries rely on.

mod date;
mod record;

pub use date::{
    ISO_DATE_FORMAT, InvalidDate, WINDOW_DAYS, format_iso_date, one_year_before, parse_iso_date,
};
pub use record::{
    Measurement, PrecipitationReading, Station, TemperatureReading, TemperatureSummary,
};
