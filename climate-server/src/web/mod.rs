//! Web layer for the climate API.
//!
//! Provides the index page and the JSON endpoints over the climate store.

mod dto;
mod routes;
mod state;
pub mod templates;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
pub use templates::*;
