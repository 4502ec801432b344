//! User HTTP Handlers

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::backend::error::BackendError;
use crate::backend::middleware::AuthUser;
use crate::backend::store::UserStore;
use crate::shared::{ProfileDraft, User, UserSummary};

/// GET /api/users/{id}
pub async fn get_user(
    State(users): State<Arc<dyn UserStore>>,
    AuthUser(_auth): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<User>, BackendError> {
    let not_found = || BackendError::not_found("User not found");
    let id = Uuid::parse_str(&id).map_err(|_| not_found())?;

    let user = users.find_user(id).await?.ok_or_else(not_found)?;
    Ok(Json(user))
}

/// PUT /api/users/profile
///
/// Partial update of the caller's own profile; omitted fields are kept.
pub async fn update_profile(
    State(users): State<Arc<dyn UserStore>>,
    AuthUser(auth): AuthUser,
    payload: Result<Json<ProfileDraft>, JsonRejection>,
) -> Result<Json<User>, BackendError> {
    let Json(draft) = payload?;
    let update = draft.validate()?;

    let user = users
        .update_profile(auth.user_id, update)
        .await?
        .ok_or_else(|| BackendError::not_found("User not found"))?;
    tracing::info!("Profile updated for {}", user.id);
    Ok(Json(user))
}

/// GET /api/users/search/{query}
///
/// Case-insensitive substring match on name and email, at most 20 results,
/// returning only id, name and avatar.
pub async fn search_users(
    State(users): State<Arc<dyn UserStore>>,
    AuthUser(_auth): AuthUser,
    Path(query): Path<String>,
) -> Result<Json<Vec<UserSummary>>, BackendError> {
    let query = query.trim();
    if query.is_empty() {
        return Ok(Json(Vec::new()));
    }
    Ok(Json(users.search_users(query).await?))
}
