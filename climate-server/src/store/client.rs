//! Read-only SQLite client for the climate database.
//!
//! Every query method acquires its own pooled connection and returns it to
//! the pool when the method returns, on success and error alike.

use std::path::PathBuf;
use std::time::Duration;

use chrono::NaiveDate;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::debug;

use crate::domain::{
    PrecipitationReading, TemperatureReading, TemperatureSummary, format_iso_date,
    parse_iso_date,
};

use super::error::StoreError;

/// Default database location, relative to the working directory.
const DEFAULT_DATABASE_PATH: &str = "Resources/hawaii.sqlite";

/// Default maximum pooled connections.
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

const PRECIPITATION_SINCE: &str =
    "SELECT date, CAST(prcp AS REAL) AS prcp FROM measurement WHERE date >= ?1";

const STATION_IDS: &str = "SELECT DISTINCT station FROM station";

// Ties on row count go to the smallest station id.
const MOST_ACTIVE_STATION: &str = "SELECT station, COUNT(*) AS observations \
     FROM measurement \
     GROUP BY station \
     ORDER BY observations DESC, station ASC \
     LIMIT 1";

const STATION_TEMPERATURES_SINCE: &str = "SELECT date, CAST(tobs AS REAL) AS tobs \
     FROM measurement \
     WHERE station = ?1 AND date >= ?2";

const TEMPERATURE_STATS_FROM: &str = "SELECT MIN(CAST(tobs AS REAL)) AS minimum, \
     AVG(tobs) AS average, \
     MAX(CAST(tobs AS REAL)) AS maximum \
     FROM measurement \
     WHERE date >= ?1";

const TEMPERATURE_STATS_RANGE: &str = "SELECT MIN(CAST(tobs AS REAL)) AS minimum, \
     AVG(tobs) AS average, \
     MAX(CAST(tobs AS REAL)) AS maximum \
     FROM measurement \
     WHERE date >= ?1 AND date <= ?2";

const LATEST_DATE: &str = "SELECT MAX(date) FROM measurement";

/// Configuration for the climate store.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Path to the SQLite database file
    pub path: PathBuf,
    /// Maximum pooled connections
    pub max_connections: u32,
    /// How long a request waits for a free connection, in seconds
    pub acquire_timeout_secs: u64,
}

impl StoreConfig {
    /// Create a config for the database at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            acquire_timeout_secs: 30,
        }
    }

    /// Set the maximum number of pooled connections.
    pub fn with_max_connections(mut self, n: u32) -> Self {
        self.max_connections = n;
        self
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::new(DEFAULT_DATABASE_PATH)
    }
}

/// Query engine over the `measurement` and `station` tables.
///
/// Cloning is cheap; clones share the same pool.
#[derive(Debug, Clone)]
pub struct ClimateStore {
    pool: SqlitePool,
}

impl ClimateStore {
    /// Open the database read-only.
    ///
    /// Fails if the file does not exist; the schema is never created here.
    pub async fn open(config: &StoreConfig) -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::new()
            .filename(&config.path)
            .read_only(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
            .connect_with(options)
            .await?;

        Ok(Self { pool })
    }

    /// All `(date, prcp)` readings dated on or after `cutoff`.
    pub async fn precipitation_since(
        &self,
        cutoff: NaiveDate,
    ) -> Result<Vec<PrecipitationReading>, StoreError> {
        let mut conn = self.pool.acquire().await?;

        let rows = sqlx::query_as::<_, PrecipitationReading>(PRECIPITATION_SINCE)
            .bind(format_iso_date(cutoff))
            .fetch_all(&mut *conn)
            .await?;

        debug!(%cutoff, rows = rows.len(), "fetched precipitation");
        Ok(rows)
    }

    /// Distinct station identifiers from the station table.
    pub async fn station_ids(&self) -> Result<Vec<String>, StoreError> {
        let mut conn = self.pool.acquire().await?;

        let ids: Vec<String> = sqlx::query_scalar(STATION_IDS)
            .fetch_all(&mut *conn)
            .await?;

        debug!(stations = ids.len(), "fetched station ids");
        Ok(ids)
    }

    /// The station with the most measurement rows.
    pub async fn most_active_station(&self) -> Result<String, StoreError> {
        let mut conn = self.pool.acquire().await?;
        most_active_station_on(&mut *conn).await
    }

    /// Temperature readings of the most active station dated on or after `cutoff`.
    ///
    /// Both lookups run on one connection.
    pub async fn temperature_observations_for_most_active_station(
        &self,
        cutoff: NaiveDate,
    ) -> Result<Vec<TemperatureReading>, StoreError> {
        let mut conn = self.pool.acquire().await?;

        let station = most_active_station_on(&mut *conn).await?;
        let rows = sqlx::query_as::<_, TemperatureReading>(STATION_TEMPERATURES_SINCE)
            .bind(&station)
            .bind(format_iso_date(cutoff))
            .fetch_all(&mut *conn)
            .await?;

        debug!(%station, %cutoff, rows = rows.len(), "fetched temperature observations");
        Ok(rows)
    }

    /// Min/avg/max temperature over readings dated on or after `start`.
    ///
    /// `start` is compared as text. Input that matches nothing, malformed
    /// or not, gives an empty summary.
    pub async fn temperature_stats_from(
        &self,
        start: &str,
    ) -> Result<TemperatureSummary, StoreError> {
        let mut conn = self.pool.acquire().await?;

        let summary = sqlx::query_as::<_, TemperatureSummary>(TEMPERATURE_STATS_FROM)
            .bind(start)
            .fetch_one(&mut *conn)
            .await?;

        debug!(start, empty = summary.is_empty(), "computed temperature stats");
        Ok(summary)
    }

    /// Min/avg/max temperature over readings in `start..=end`.
    ///
    /// `start > end` gives an empty summary.
    pub async fn temperature_stats_range(
        &self,
        start: &str,
        end: &str,
    ) -> Result<TemperatureSummary, StoreError> {
        let mut conn = self.pool.acquire().await?;

        let summary = sqlx::query_as::<_, TemperatureSummary>(TEMPERATURE_STATS_RANGE)
            .bind(start)
            .bind(end)
            .fetch_one(&mut *conn)
            .await?;

        debug!(
            start,
            end,
            empty = summary.is_empty(),
            "computed temperature stats for range"
        );
        Ok(summary)
    }

    /// The most recent measurement date, or `None` for an empty table.
    pub async fn latest_date(&self) -> Result<Option<NaiveDate>, StoreError> {
        let mut conn = self.pool.acquire().await?;

        let latest: Option<String> = sqlx::query_scalar(LATEST_DATE)
            .fetch_one(&mut *conn)
            .await?;

        latest
            .map(|value| {
                parse_iso_date(&value).map_err(|_| StoreError::InvalidStoredDate { value })
            })
            .transpose()
    }
}

async fn most_active_station_on(conn: &mut sqlx::SqliteConnection) -> Result<String, StoreError> {
    let row: Option<(String, i64)> = sqlx::query_as(MOST_ACTIVE_STATION)
        .fetch_optional(&mut *conn)
        .await?;

    let (station, observations) = row.ok_or(StoreError::NoActiveStation)?;
    debug!(%station, observations, "resolved most active station");
    Ok(station)
}
