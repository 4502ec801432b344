/**
 * Router Configuration
 *
 * Combines the API routes with the cross-cutting layers:
 *
 * 1. API routes (public and authenticated)
 * 2. JSON 404 fallback
 * 3. Request tracing (`TraceLayer`)
 * 4. Permissive CORS for the browser client served from another origin
 */

use axum::{http::Uri, Router};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::backend::error::BackendError;
use crate::backend::routes::api_routes::configure_api_routes;
use crate::backend::server::state::AppState;

async fn fallback(uri: Uri) -> BackendError {
    tracing::debug!("No route for {}", uri);
    BackendError::not_found("Route not found")
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState) -> Router<()> {
    let router = configure_api_routes(Router::new(), &app_state);

    router
        .fallback(fallback)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(app_state)
}
