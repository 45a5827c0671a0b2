//! Shared fixtures: a throwaway SQLite file with the climate schema.

#![allow(dead_code)]

use std::path::PathBuf;

use axum::Router;
use climate_server::config::QueryConfig;
use climate_server::domain::{Measurement, Station};
use climate_server::store::{ClimateStore, StoreConfig};
use climate_server::web::{AppState, create_router};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use tempfile::TempDir;

const SCHEMA: &[&str] = &[
    "CREATE TABLE station (
        id INTEGER PRIMARY KEY,
        station TEXT,
        name TEXT,
        latitude FLOAT,
        longitude FLOAT,
        elevation FLOAT
    )",
    "CREATE TABLE measurement (
        id INTEGER PRIMARY KEY,
        station TEXT,
        date TEXT,
        prcp FLOAT,
        tobs FLOAT
    )",
];

/// A populated database file that lives as long as the fixture.
pub struct Fixture {
    _dir: TempDir,
    pub path: PathBuf,
}

impl Fixture {
    /// Write `stations` and `measurements` to a fresh database file.
    pub async fn new(stations: &[Station], measurements: &[Measurement]) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("climate.sqlite");

        let options = SqliteConnectOptions::new()
            .filename(&path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Delete);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .unwrap();

        for statement in SCHEMA {
            sqlx::query(statement).execute(&pool).await.unwrap();
        }

        for s in stations {
            sqlx::query(
                "INSERT INTO station (station, name, latitude, longitude, elevation) \
                 VALUES (?1, ?2, ?3, ?4, ?5)",
            )
            .bind(&s.station)
            .bind(&s.name)
            .bind(s.latitude)
            .bind(s.longitude)
            .bind(s.elevation)
            .execute(&pool)
            .await
            .unwrap();
        }

        for m in measurements {
            sqlx::query(
                "INSERT INTO measurement (station, date, prcp, tobs) VALUES (?1, ?2, ?3, ?4)",
            )
            .bind(&m.station)
            .bind(&m.date)
            .bind(m.prcp)
            .bind(m.tobs)
            .execute(&pool)
            .await
            .unwrap();
        }

        pool.close().await;

        Self { _dir: dir, path }
    }

    /// Fixture with no rows in either table.
    pub async fn empty() -> Self {
        Self::new(&[], &[]).await
    }

    /// Open the fixture read-only through the store.
    pub async fn store(&self) -> ClimateStore {
        ClimateStore::open(&StoreConfig::new(&self.path))
            .await
            .unwrap()
    }

    /// Build the full router over the fixture.
    pub async fn app(&self, config: QueryConfig) -> Router {
        create_router(AppState::new(self.store().await, config))
    }
}

pub fn station(id: &str) -> Station {
    Station {
        station: id.to_string(),
        name: format!("{id} weather station"),
        latitude: 21.3,
        longitude: -157.8,
        elevation: 3.0,
    }
}

pub fn measurement(station: &str, date: &str, prcp: Option<f64>, tobs: f64) -> Measurement {
    Measurement {
        station: station.to_string(),
        date: date.to_string(),
        prcp,
        tobs,
    }
}

/// `USC1` has five readings over 2017-01-01..05, `USC2` has two.
pub fn busy_and_quiet_stations() -> (Vec<Station>, Vec<Measurement>) {
    let stations = vec![station("USC1"), station("USC2")];
    let mut measurements: Vec<Measurement> = (1..=5)
        .map(|day| {
            measurement(
                "USC1",
                &format!("2017-01-0{day}"),
                Some(0.1 * f64::from(day)),
                f64::from(60 + day),
            )
        })
        .collect();
    measurements.push(measurement("USC2", "2017-01-01", None, 55.0));
    measurements.push(measurement("USC2", "2017-01-02", Some(1.5), 56.0));
    (stations, measurements)
}

/// One station with tobs 60, 65, 70 on 2017-01-01..03 and 80 on 2017-01-04.
pub fn three_day_temperatures() -> (Vec<Station>, Vec<Measurement>) {
    let stations = vec![station("USC1")];
    let measurements = vec![
        measurement("USC1", "2017-01-01", Some(0.0), 60.0),
        measurement("USC1", "2017-01-02", Some(0.2), 65.0),
        measurement("USC1", "2017-01-03", None, 70.0),
        measurement("USC1", "2017-01-04", Some(0.4), 80.0),
    ];
    (stations, measurements)
}
