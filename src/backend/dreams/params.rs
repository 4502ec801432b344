//! Query parameters for dream listings

use serde::Deserialize;
use uuid::Uuid;

use crate::backend::error::BackendError;
use crate::backend::store::FeedQuery;
use crate::shared::{Mood, PrivacyLevel};

fn non_blank(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

/// `GET /api/dreams/feed?page=&limit=&tag=&mood=&q=`
#[derive(Debug, Default, Deserialize)]
pub struct FeedParams {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub tag: Option<String>,
    pub mood: Option<String>,
    /// Free-text search on title and content
    pub q: Option<String>,
}

impl FeedParams {
    /// Page below 1 becomes 1, limit is clamped to `1..=MAX_LIMIT`
    pub fn into_query(self) -> Result<FeedQuery, BackendError> {
        let page = self.page.unwrap_or(1).clamp(1, i64::from(u32::MAX));
        let limit = self
            .limit
            .unwrap_or(i64::from(FeedQuery::DEFAULT_LIMIT))
            .clamp(1, i64::from(FeedQuery::MAX_LIMIT));
        let mood = non_blank(self.mood).map(|m| m.parse::<Mood>()).transpose()?;

        Ok(FeedQuery {
            page: u32::try_from(page).unwrap_or(u32::MAX),
            limit: u32::try_from(limit).unwrap_or(FeedQuery::MAX_LIMIT),
            tag: non_blank(self.tag),
            mood,
            search: non_blank(self.q),
        })
    }
}

/// `GET /api/dreams/user/{user_id}?privacyLevel=`
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerParams {
    pub privacy_level: Option<String>,
}

/// Which dreams of `owner_id` a viewer may list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OwnerListing {
    Level(Option<PrivacyLevel>),
    /// Nothing the viewer is allowed to see matches
    Empty,
}

impl OwnerParams {
    /// The owner sees everything; anyone else sees only `public` dreams
    pub fn listing_for(self, owner_id: Uuid, viewer: Uuid) -> Result<OwnerListing, BackendError> {
        let level = non_blank(self.privacy_level)
            .map(|l| l.parse::<PrivacyLevel>())
            .transpose()?;

        if viewer == owner_id {
            return Ok(OwnerListing::Level(level));
        }
        match level {
            None | Some(PrivacyLevel::Public) => Ok(OwnerListing::Level(Some(PrivacyLevel::Public))),
            Some(_) => Ok(OwnerListing::Empty),
        }
    }
}
