/**
 * Server Initialization
 *
 * Builds the application state from configuration and wires the router.
 *
 * # Initialization Process
 *
 * 1. Select the store: PostgreSQL when `DATABASE_URL` is set (migrations run
 *    before serving), otherwise the in-memory store
 * 2. Create the token service and password hasher from configuration
 * 3. Create the router with all routes and middleware
 *
 * A configured but unreachable database is a start-up failure; there is no
 * fallback to the in-memory store.
 */

use axum::Router;
use std::sync::Arc;

use crate::backend::routes::router::create_router;
use crate::backend::server::config::AppConfig;
use crate::backend::server::state::AppState;
use crate::backend::store::{PgStore, StoreError};

/// Build the state for `config`, connecting to the database if configured
pub async fn create_state(config: AppConfig) -> Result<AppState, StoreError> {
    match config.database_url.clone() {
        Some(url) => {
            let store = Arc::new(PgStore::connect(&url).await?);
            tracing::info!("Using PostgreSQL store");
            Ok(AppState::new(config, store.clone(), store))
        }
        None => {
            tracing::warn!("DATABASE_URL not set. Using the in-memory store; data is lost on restart.");
            Ok(AppState::in_memory(config))
        }
    }
}

/// Create and configure the Axum application
pub async fn create_app(config: AppConfig) -> Result<Router<()>, StoreError> {
    tracing::info!("Initializing dream journal backend server");
    let state = create_state(config).await?;
    let app = create_router(state);
    tracing::info!("Router configured");
    Ok(app)
}
