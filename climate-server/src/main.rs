use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use climate_server::config::AppConfig;
use climate_server::store::ClimateStore;
use climate_server::web::{AppState, ROUTES, create_router};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("{e}");
            std::process::exit(2);
        }
    };

    // Open the database (fail fast if it is missing)
    info!(path = %config.store.path.display(), "opening climate database");
    let store = ClimateStore::open(&config.store)
        .await
        .expect("Failed to open climate database");

    info!(
        reference = ?config.query.reference,
        date_params = ?config.query.date_params,
        "query settings"
    );

    let state = AppState::new(store, config.query);
    let app = create_router(state);

    let addr = config.bind_addr;
    info!("Climate API listening on http://{addr}");
    for route in ROUTES {
        info!("  GET  {route}");
    }

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listen address");
    axum::serve(listener, app).await.expect("Server error");
}
