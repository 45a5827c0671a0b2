//! Climate store error types.

/// Errors from querying the climate database.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Opening the database or running a query failed
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The measurement table has no rows, so no station is most active
    #[error("no active station: the measurement table is empty")]
    NoActiveStation,

    /// A date read back from the database is not `yyyy-mm-dd`
    #[error("stored date {value:?} is not yyyy-mm-dd")]
    InvalidStoredDate { value: String },
}
