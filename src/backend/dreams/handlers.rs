//! Dream HTTP Handlers
//!
//! Update and delete are scoped by (id, owner): a dream that belongs to
//! someone else answers exactly like one that does not exist.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use super::params::{FeedParams, OwnerListing, OwnerParams};
use crate::backend::error::BackendError;
use crate::backend::middleware::{AuthUser, MaybeAuthUser};
use crate::backend::store::DreamStore;
use crate::shared::{CommentDraft, Dream, DreamDraft};

const DREAM_NOT_FOUND: &str = "Dream not found";

/// Body of a successful delete
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeleteResponse {
    pub message: String,
}

/// Path ids that are not UUIDs cannot name anything
fn parse_id(raw: &str, not_found: &'static str) -> Result<Uuid, BackendError> {
    Uuid::parse_str(raw).map_err(|_| BackendError::not_found(not_found))
}

fn redact_all(dreams: Vec<Dream>, viewer: Option<Uuid>) -> Vec<Dream> {
    dreams.into_iter().map(|d| d.redacted_for(viewer)).collect()
}

/// GET /api/dreams/feed
pub async fn get_feed(
    State(dreams): State<Arc<dyn DreamStore>>,
    viewer: MaybeAuthUser,
    params: Result<Query<FeedParams>, QueryRejection>,
) -> Result<Json<Vec<Dream>>, BackendError> {
    let Query(params) = params?;
    let query = params.into_query()?;
    tracing::debug!("Feed request: {:?}", query);

    let found = dreams.public_feed(&query).await?;
    Ok(Json(redact_all(found, viewer.user_id())))
}

/// GET /api/dreams/user/{user_id}
pub async fn get_user_dreams(
    State(dreams): State<Arc<dyn DreamStore>>,
    AuthUser(auth): AuthUser,
    Path(user_id): Path<String>,
    params: Result<Query<OwnerParams>, QueryRejection>,
) -> Result<Json<Vec<Dream>>, BackendError> {
    let Query(params) = params?;
    let owner_id = parse_id(&user_id, "User not found")?;

    let found = match params.listing_for(owner_id, auth.user_id)? {
        OwnerListing::Level(level) => dreams.dreams_by_owner(owner_id, level).await?,
        OwnerListing::Empty => Vec::new(),
    };
    Ok(Json(redact_all(found, Some(auth.user_id))))
}

/// GET /api/dreams/{id}
///
/// Private dreams are only visible to their owner.
pub async fn get_dream(
    State(dreams): State<Arc<dyn DreamStore>>,
    AuthUser(auth): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<Dream>, BackendError> {
    let id = parse_id(&id, DREAM_NOT_FOUND)?;
    let viewer = Some(auth.user_id);

    let dream = dreams
        .find_dream(id)
        .await?
        .filter(|d| d.is_visible_to(viewer))
        .ok_or_else(|| BackendError::not_found(DREAM_NOT_FOUND))?;
    Ok(Json(dream.redacted_for(viewer)))
}

/// POST /api/dreams
pub async fn create_dream(
    State(dreams): State<Arc<dyn DreamStore>>,
    AuthUser(auth): AuthUser,
    payload: Result<Json<DreamDraft>, JsonRejection>,
) -> Result<(StatusCode, Json<Dream>), BackendError> {
    let Json(draft) = payload?;
    let new_dream = draft.validate()?;

    let dream = dreams.create_dream(auth.user_id, new_dream).await?;
    tracing::info!("Dream {} created by {}", dream.id, auth.user_id);
    Ok((StatusCode::CREATED, Json(dream)))
}

/// PUT /api/dreams/{id}
///
/// Full replacement of title, content, privacy, tags, mood and mentions.
pub async fn update_dream(
    State(dreams): State<Arc<dyn DreamStore>>,
    AuthUser(auth): AuthUser,
    Path(id): Path<String>,
    payload: Result<Json<DreamDraft>, JsonRejection>,
) -> Result<Json<Dream>, BackendError> {
    let id = parse_id(&id, DREAM_NOT_FOUND)?;
    let Json(draft) = payload?;
    let new_dream = draft.validate()?;

    let dream = dreams
        .update_dream(id, auth.user_id, new_dream)
        .await?
        .ok_or_else(|| {
            tracing::warn!("Update of dream {} by {} matched nothing", id, auth.user_id);
            BackendError::not_found(DREAM_NOT_FOUND)
        })?;
    Ok(Json(dream))
}

/// DELETE /api/dreams/{id}
pub async fn delete_dream(
    State(dreams): State<Arc<dyn DreamStore>>,
    AuthUser(auth): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>, BackendError> {
    let id = parse_id(&id, DREAM_NOT_FOUND)?;

    if !dreams.delete_dream(id, auth.user_id).await? {
        tracing::warn!("Delete of dream {} by {} matched nothing", id, auth.user_id);
        return Err(BackendError::not_found(DREAM_NOT_FOUND));
    }

    tracing::info!("Dream {} deleted by {}", id, auth.user_id);
    Ok(Json(DeleteResponse {
        message: "Dream deleted successfully".to_string(),
    }))
}

/// POST /api/dreams/{id}/like
///
/// Toggles: likes when absent, unlikes when present. Privacy is not checked.
pub async fn toggle_like(
    State(dreams): State<Arc<dyn DreamStore>>,
    AuthUser(auth): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<Dream>, BackendError> {
    let id = parse_id(&id, DREAM_NOT_FOUND)?;

    let dream = dreams
        .toggle_like(id, auth.user_id)
        .await?
        .ok_or_else(|| BackendError::not_found(DREAM_NOT_FOUND))?;
    Ok(Json(dream.redacted_for(Some(auth.user_id))))
}

/// POST /api/dreams/{id}/comments
///
/// Mention ids are stored as given, without checking the users exist.
pub async fn add_comment(
    State(dreams): State<Arc<dyn DreamStore>>,
    AuthUser(auth): AuthUser,
    Path(id): Path<String>,
    payload: Result<Json<CommentDraft>, JsonRejection>,
) -> Result<(StatusCode, Json<Dream>), BackendError> {
    let id = parse_id(&id, DREAM_NOT_FOUND)?;
    let Json(draft) = payload?;
    let comment = draft.validate()?;

    let dream = dreams
        .add_comment(id, auth.user_id, comment)
        .await?
        .ok_or_else(|| BackendError::not_found(DREAM_NOT_FOUND))?;
    Ok((StatusCode::CREATED, Json(dream.redacted_for(Some(auth.user_id)))))
}
