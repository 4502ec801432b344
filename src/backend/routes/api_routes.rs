/**
 * API Route Handlers
 *
 * # Routes
 *
 * ## Public
 * - `GET  /api/health` - Liveness check
 * - `POST /api/auth/register` - User registration
 * - `POST /api/auth/login` - User login
 * - `GET  /api/dreams/feed` - Public feed
 *
 * ## Authenticated
 * - `GET    /api/auth/me` - Current user
 * - `POST   /api/dreams` - Create a dream
 * - `GET    /api/dreams/user/{user_id}` - Dreams of one owner
 * - `GET    /api/dreams/{id}` - One dream
 * - `PUT    /api/dreams/{id}` - Replace a dream (owner only)
 * - `DELETE /api/dreams/{id}` - Delete a dream (owner only)
 * - `POST   /api/dreams/{id}/like` - Toggle like
 * - `POST   /api/dreams/{id}/comments` - Append a comment
 * - `GET    /api/users/{id}` - Profile
 * - `PUT    /api/users/profile` - Update own profile
 * - `GET    /api/users/search/{query}` - Search users
 */

use axum::{
    middleware,
    routing::{get, post, put},
    Json, Router,
};
use serde_json::{json, Value};

use crate::backend::auth::{get_me, login, register};
use crate::backend::dreams;
use crate::backend::middleware::auth_middleware;
use crate::backend::server::state::AppState;
use crate::backend::users;

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Routes reachable without a token
fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login))
        .route("/api/dreams/feed", get(dreams::get_feed))
}

/// Routes behind `auth_middleware`
fn protected_routes(app_state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/api/auth/me", get(get_me))
        .route("/api/dreams", post(dreams::create_dream))
        .route("/api/dreams/user/{user_id}", get(dreams::get_user_dreams))
        .route(
            "/api/dreams/{id}",
            get(dreams::get_dream)
                .put(dreams::update_dream)
                .delete(dreams::delete_dream),
        )
        .route("/api/dreams/{id}/like", post(dreams::toggle_like))
        .route("/api/dreams/{id}/comments", post(dreams::add_comment))
        .route("/api/users/profile", put(users::update_profile))
        .route("/api/users/search/{query}", get(users::search_users))
        .route("/api/users/{id}", get(users::get_user))
        .route_layer(middleware::from_fn_with_state(app_state.clone(), auth_middleware))
}

/// Configure API routes
///
/// `route_layer` keeps the auth middleware off unmatched paths, so unknown
/// URLs still answer 404 rather than 401.
pub fn configure_api_routes(router: Router<AppState>, app_state: &AppState) -> Router<AppState> {
    router
        .merge(public_routes())
        .merge(protected_routes(app_state))
}
