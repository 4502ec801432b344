/**
 * Get Current User Handler
 *
 * GET /api/auth/me, behind the auth middleware. Returns the profile of the
 * token's user.
 */

use axum::{extract::State, response::Json};

use crate::backend::error::BackendError;
use crate::backend::middleware::AuthUser;
use crate::backend::server::state::AppState;
use crate::shared::User;

pub async fn get_me(
    State(state): State<AppState>,
    AuthUser(auth): AuthUser,
) -> Result<Json<User>, BackendError> {
    let user = state
        .users
        .find_user(auth.user_id)
        .await?
        .ok_or_else(|| {
            tracing::warn!("User not found: {}", auth.user_id);
            BackendError::not_found("User not found")
        })?;
    Ok(Json(user))
}
