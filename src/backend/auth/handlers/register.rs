/**
 * Register Handler
 *
 * POST /api/auth/register
 *
 * # Registration Process
 *
 * 1. Validate name, email, password (and `confirmPassword` when sent)
 * 2. Hash the password with bcrypt
 * 3. Create the user; the store rejects an email taken in any casing
 * 4. Issue a token and return it with the profile
 */

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::Json,
};

use crate::backend::auth::handlers::types::AuthResponse;
use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;
use crate::backend::store::NewUser;
use crate::shared::RegistrationDraft;

/// Register handler
///
/// # Errors
///
/// * `400 Bad Request` - invalid field, or "Email already registered"
/// * `500 Internal Server Error` - hashing, token or store failure
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegistrationDraft>, JsonRejection>,
) -> Result<(StatusCode, Json<AuthResponse>), BackendError> {
    let Json(draft) = payload?;
    let registration = draft.validate()?;
    tracing::info!("Registration request for: {}", registration.email);

    let password_hash = state.passwords.hash(&registration.password)?;
    let avatar_url = registration
        .avatar_url
        .unwrap_or_else(|| state.config.default_avatar_url.clone());

    let user = state
        .users
        .create_user(NewUser {
            name: registration.name,
            email: registration.email,
            password_hash,
            avatar_url,
        })
        .await
        .inspect_err(|e| tracing::warn!("Registration failed: {}", e))?;

    let token = state.tokens.issue(user.id)?;

    tracing::info!("User registered successfully: {} ({})", user.name, user.id);
    Ok((StatusCode::CREATED, Json(AuthResponse { token, user })))
}
