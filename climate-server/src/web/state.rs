//! Application state for the web layer.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::config::{QueryConfig, ReferenceDate};
use crate::domain::one_year_before;
use crate::store::{ClimateStore, StoreError};

/// Shared application state.
///
/// Contains all the services needed to handle requests.
#[derive(Clone)]
pub struct AppState {
    /// Climate database query engine
    pub store: Arc<ClimateStore>,

    /// Query behavior
    pub config: Arc<QueryConfig>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(store: ClimateStore, config: QueryConfig) -> Self {
        Self {
            store: Arc::new(store),
            config: Arc::new(config),
        }
    }

    /// First date of the one-year observation window.
    ///
    /// `None` when the reference is the latest measurement and there are none.
    pub async fn window_start(&self) -> Result<Option<NaiveDate>, StoreError> {
        match self.config.reference {
            ReferenceDate::Fixed(_) => Ok(self.config.reference.fixed_window_start()),
            ReferenceDate::Latest => Ok(self.store.latest_date().await?.map(one_year_before)),
        }
    }
}
