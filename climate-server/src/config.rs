//! Server configuration.
//!
//! Everything is read from `CLIMATE_*` environment variables; unset
//! variables fall back to the defaults below.

use std::net::SocketAddr;

use chrono::NaiveDate;

use crate::domain::{InvalidDate, one_year_before, parse_iso_date};
use crate::store::StoreConfig;

/// Last date present in the published dataset.
pub const DATASET_LAST_DATE: NaiveDate = match NaiveDate::from_ymd_opt(2017, 8, 23) {
    Some(date) => date,
    None => panic!("invalid dataset date"),
};

const DEFAULT_BIND_ADDR: ([u8; 4], u16) = ([127, 0, 0, 1], 5000);

/// Errors from reading configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A variable was set to a value that could not be parsed
    #[error("invalid value {value:?} for {name}: {reason}")]
    InvalidValue {
        name: &'static str,
        value: String,
        reason: String,
    },
}

/// Which date the one-year observation window ends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceDate {
    /// A fixed date.
    Fixed(NaiveDate),
    /// The most recent measurement date, looked up per request.
    Latest,
}

impl ReferenceDate {
    /// Window start for a fixed reference, `None` when it must be looked up.
    pub fn fixed_window_start(&self) -> Option<NaiveDate> {
        match self {
            ReferenceDate::Fixed(date) => Some(one_year_before(*date)),
            ReferenceDate::Latest => None,
        }
    }

    fn parse(s: &str) -> Result<Self, InvalidDate> {
        if s.eq_ignore_ascii_case("latest") {
            return Ok(ReferenceDate::Latest);
        }
        parse_iso_date(s).map(ReferenceDate::Fixed)
    }
}

impl Default for ReferenceDate {
    fn default() -> Self {
        ReferenceDate::Fixed(DATASET_LAST_DATE)
    }
}

/// How date path parameters are checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateParamPolicy {
    /// Pass parameters through; malformed dates match no rows.
    #[default]
    Lenient,
    /// Reject anything that is not `yyyy-mm-dd`.
    Strict,
}

impl DateParamPolicy {
    /// Check a raw path parameter against the policy.
    pub fn check(&self, raw: &str) -> Result<(), InvalidDate> {
        match self {
            DateParamPolicy::Lenient => Ok(()),
            DateParamPolicy::Strict => parse_iso_date(raw).map(|_| ()),
        }
    }
}

/// Query behavior shared by the route handlers.
#[derive(Debug, Clone, Default)]
pub struct QueryConfig {
    /// End of the precipitation and tobs window
    pub reference: ReferenceDate,
    /// Validation of date path parameters
    pub date_params: DateParamPolicy,
}

impl QueryConfig {
    /// Set the reference date.
    pub fn with_reference(mut self, reference: ReferenceDate) -> Self {
        self.reference = reference;
        self
    }

    /// Set the date parameter policy.
    pub fn with_date_params(mut self, policy: DateParamPolicy) -> Self {
        self.date_params = policy;
        self
    }
}

/// Complete server configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Address the HTTP server listens on
    pub bind_addr: SocketAddr,
    /// Database settings
    pub store: StoreConfig,
    /// Query settings
    pub query: QueryConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(DEFAULT_BIND_ADDR),
            store: StoreConfig::default(),
            query: QueryConfig::default(),
        }
    }
}

impl AppConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read configuration through `lookup`, which maps a variable name to its value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(value) = lookup("CLIMATE_BIND_ADDR") {
            config.bind_addr = value
                .parse::<SocketAddr>()
                .map_err(|e| invalid("CLIMATE_BIND_ADDR", &value, e))?;
        }

        if let Some(value) = lookup("CLIMATE_DATABASE") {
            config.store.path = value.into();
        }

        if let Some(value) = lookup("CLIMATE_MAX_CONNECTIONS") {
            let n: u32 = value
                .parse()
                .map_err(|e| invalid("CLIMATE_MAX_CONNECTIONS", &value, e))?;
            if n == 0 {
                return Err(invalid("CLIMATE_MAX_CONNECTIONS", &value, "must be at least 1"));
            }
            config.store = config.store.with_max_connections(n);
        }

        if let Some(value) = lookup("CLIMATE_REFERENCE_DATE") {
            let reference = ReferenceDate::parse(&value)
                .map_err(|e| invalid("CLIMATE_REFERENCE_DATE", &value, e))?;
            config.query = config.query.with_reference(reference);
        }

        if let Some(value) = lookup("CLIMATE_STRICT_DATES") {
            let strict: bool = value
                .parse()
                .map_err(|e| invalid("CLIMATE_STRICT_DATES", &value, e))?;
            let policy = if strict {
                DateParamPolicy::Strict
            } else {
                DateParamPolicy::Lenient
            };
            config.query = config.query.with_date_params(policy);
        }

        Ok(config)
    }
}

fn invalid(name: &'static str, value: &str, reason: impl ToString) -> ConfigError {
    ConfigError::InvalidValue {
        name,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}
