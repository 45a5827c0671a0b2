//! Row types for the climate database.
//!
//! `Measurement` and `Station` mirror the two tables. The remaining types
//! are the projections the queries actually select.

/// One observation from the `measurement` table.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Measurement {
    pub station: String,
    pub date: String,
    pub prcp: Option<f64>,
    pub tobs: f64,
}

/// A weather station from the `station` table.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Station {
    pub station: String,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub elevation: f64,
}

/// `(date, prcp)` projection of a measurement.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct PrecipitationReading {
    pub date: String,
    pub prcp: Option<f64>,
}

/// `(date, tobs)` projection of a measurement.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct TemperatureReading {
    pub date: String,
    pub tobs: f64,
}

/// Min/avg/max of `tobs` over a filtered set of measurements.
///
/// All three are `None` when no rows matched.
#[derive(Debug, Clone, Copy, PartialEq, Default, sqlx::FromRow)]
pub struct TemperatureSummary {
    pub minimum: Option<f64>,
    pub average: Option<f64>,
    pub maximum: Option<f64>,
}

impl TemperatureSummary {
    /// Whether the aggregate covered no rows.
    pub fn is_empty(&self) -> bool {
        self.minimum.is_none() && self.average.is_none() && self.maximum.is_none()
    }
}
