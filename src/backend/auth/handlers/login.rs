/**
 * Login Handler
 *
 * POST /api/auth/login
 *
 * An unknown email and a wrong password give the same 401 "Invalid
 * credentials" after the same bcrypt work.
 */

use axum::{
    extract::{rejection::JsonRejection, State},
    response::Json,
};

use crate::backend::auth::handlers::types::{AuthResponse, LoginRequest};
use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;

pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<AuthResponse>, BackendError> {
    let Json(request) = payload?;
    let (Some(email), Some(password)) = (request.email, request.password) else {
        return Err(BackendError::bad_request("Email and password are required"));
    };
    tracing::info!("Login request for: {}", email.trim());

    let Some(credentials) = state.users.find_credentials(&email).await? else {
        tracing::warn!("User not found: {}", email.trim());
        state.passwords.verify_absent(&password);
        return Err(BackendError::invalid_credentials());
    };

    if !state.passwords.verify(&password, &credentials.password_hash) {
        tracing::warn!("Invalid password for user: {}", credentials.user.id);
        return Err(BackendError::invalid_credentials());
    }

    let token = state.tokens.issue(credentials.user.id)?;

    tracing::info!("User logged in successfully: {}", credentials.user.id);
    Ok(Json(AuthResponse {
        token,
        user: credentials.user,
    }))
}
