//! Response bodies and the conversions from query rows.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::domain::{PrecipitationReading, TemperatureReading, TemperatureSummary};

/// Precipitation keyed by date.
///
/// One entry per date: when several stations report the same date, the
/// reading that comes last in query order wins.
pub type PrecipitationResponse = BTreeMap<String, Option<f64>>;

/// A temperature observation of the most active station.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemperatureObservation {
    #[serde(rename = "Date")]
    pub date: String,

    #[serde(rename = "Temperature")]
    pub temperature: f64,
}

/// Aggregate temperature statistics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TemperatureStats {
    #[serde(rename = "Min Temperature")]
    pub min: Option<f64>,

    #[serde(rename = "Avg Temperature")]
    pub avg: Option<f64>,

    #[serde(rename = "Max Temperature")]
    pub max: Option<f64>,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

// Conversion implementations

/// Collapse readings into a date → precipitation map.
pub fn precipitation_by_date(
    readings: impl IntoIterator<Item = PrecipitationReading>,
) -> PrecipitationResponse {
    readings.into_iter().map(|r| (r.date, r.prcp)).collect()
}

impl From<TemperatureReading> for TemperatureObservation {
    fn from(reading: TemperatureReading) -> Self {
        Self {
            date: reading.date,
            temperature: reading.tobs,
        }
    }
}

impl From<TemperatureSummary> for TemperatureStats {
    fn from(summary: TemperatureSummary) -> Self {
        Self {
            min: summary.minimum,
            avg: summary.average,
            max: summary.maximum,
        }
    }
}

impl TemperatureStats {
    /// The stats routes always answer with a one-element array.
    pub fn singleton(summary: TemperatureSummary) -> Vec<Self> {
        vec![summary.into()]
    }
}


#[cfg(test)]
mod proptests {
    use std::collections::HashMap;

    use super::*;
    use proptest::prelude::*;

    fn readings() -> impl Strategy<Value = Vec<(u8, Option<u16>)>> {
        proptest::collection::vec((1u8..=10, proptest::option::of(0u16..500)), 0..40)
    }

    proptest! {
        /// Every date maps to the last reading seen for it
        #[test]
        fn last_reading_wins(rows in readings()) {
            let mut expected = HashMap::new();
            let input: Vec<PrecipitationReading> = rows
                .iter()
                .map(|(day, prcp)| {
                    let date = format!("2017-01-{day:02}");
                    let prcp = prcp.map(|p| f64::from(p) / 100.0);
                    expected.insert(date.clone(), prcp);
                    PrecipitationReading { date, prcp }
                })
                .collect();

            let map = precipitation_by_date(input);
            prop_assert_eq!(map.len(), expected.len());
            for (date, prcp) in &expected {
                prop_assert_eq!(map.get(date), Some(prcp));
            }
        }
    }
}
