//! Dream Data Structures
//!
//! Dreams are journal entries with a privacy level, a mood, free-form tags,
//! likes (a set of user ids) and an append-only list of comments.
//!
//! This module also holds the pure validation layer for dream and comment
//! payloads, so the same rules apply whichever store backs the server.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::shared::error::SharedError;
use crate::shared::mention::mention_ids;
use crate::shared::user::UserSummary;

/// Minimum dream content length
pub const MIN_CONTENT_LENGTH: usize = 10;

/// Visibility policy of a dream
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum PrivacyLevel {
    /// Listed in the feed, owner shown
    Public,
    /// Owner only
    #[default]
    Private,
    /// Listed in the feed, owner hidden
    Anonymous,
}

impl PrivacyLevel {
    pub const ALL: [PrivacyLevel; 3] = [Self::Public, Self::Private, Self::Anonymous];

    pub fn as_str(&self) -> &'static str {
        match self {
            PrivacyLevel::Public => "public",
            PrivacyLevel::Private => "private",
            PrivacyLevel::Anonymous => "anonymous",
        }
    }

    /// Whether dreams at this level appear in the public feed
    pub fn is_listed(&self) -> bool {
        matches!(self, PrivacyLevel::Public | PrivacyLevel::Anonymous)
    }
}

impl FromStr for PrivacyLevel {
    type Err = SharedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|level| level.as_str() == s)
            .ok_or_else(|| {
                SharedError::validation(
                    "privacyLevel",
                    "Privacy level must be one of: public, private, anonymous",
                )
            })
    }
}

impl fmt::Display for PrivacyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Mood attached to every dream
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Happy,
    Sad,
    Scary,
    Confusing,
    Exciting,
    Peaceful,
    Anxious,
    Mysterious,
}

impl Mood {
    pub const ALL: [Mood; 8] = [
        Self::Happy,
        Self::Sad,
        Self::Scary,
        Self::Confusing,
        Self::Exciting,
        Self::Peaceful,
        Self::Anxious,
        Self::Mysterious,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::Happy => "happy",
            Mood::Sad => "sad",
            Mood::Scary => "scary",
            Mood::Confusing => "confusing",
            Mood::Exciting => "exciting",
            Mood::Peaceful => "peaceful",
            Mood::Anxious => "anxious",
            Mood::Mysterious => "mysterious",
        }
    }
}

impl FromStr for Mood {
    type Err = SharedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|mood| mood.as_str() == s)
            .ok_or_else(|| {
                SharedError::validation(
                    "mood",
                    "Mood must be one of: happy, sad, scary, confusing, exciting, peaceful, anxious, mysterious",
                )
            })
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A comment embedded in a dream
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: Uuid,
    pub content: String,
    pub author: UserSummary,
    pub created_at: DateTime<Utc>,
    pub mentions: Vec<Uuid>,
}

/// A dream as returned by the API
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Dream {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    /// Owner id, kept server-side for authorization; never serialized
    #[serde(skip_serializing, default)]
    pub owner_id: Uuid,
    /// Owner identity, `None` once redacted for an anonymous dream
    pub owner: Option<UserSummary>,
    pub privacy_level: PrivacyLevel,
    pub tags: Vec<String>,
    pub mood: Mood,
    /// User ids that liked the dream, each at most once
    pub likes: Vec<Uuid>,
    pub comments: Vec<Comment>,
    pub mentions: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Dream {
    /// Whether `viewer` may read this dream at all
    pub fn is_visible_to(&self, viewer: Option<Uuid>) -> bool {
        self.privacy_level.is_listed() || viewer == Some(self.owner_id)
    }

    /// Strip the owner identity of an anonymous dream unless `viewer` owns it
    ///
    /// The owner disappears from `owner`, from `likes` and from the authors of
    /// their own comments. Other users keep their identity.
    pub fn redacted_for(mut self, viewer: Option<Uuid>) -> Self {
        if self.privacy_level != PrivacyLevel::Anonymous || viewer == Some(self.owner_id) {
            return self;
        }
        let owner_id = self.owner_id;
        self.owner = None;
        self.likes.retain(|id| *id != owner_id);
        for comment in self.comments.iter_mut().filter(|c| c.author.id == owner_id) {
            comment.author = UserSummary::anonymous();
        }
        self
    }
}

/// Flip membership of `user_id` in a like list
///
/// Returns `true` when the user is now present. Applying it twice restores
/// the original list exactly.
pub fn toggle_membership(likes: &mut Vec<Uuid>, user_id: Uuid) -> bool {
    match likes.iter().position(|id| *id == user_id) {
        Some(index) => {
            likes.remove(index);
            false
        }
        None => {
            likes.push(user_id);
            true
        }
    }
}

/// Trim tags, drop empty ones and keep the first of any duplicates
pub fn normalize_tags(tags: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags {
        let tag = tag.trim();
        if !tag.is_empty() && !out.iter().any(|t| t == tag) {
            out.push(tag.to_string());
        }
    }
    out
}

fn dedup_ids(ids: Vec<Uuid>) -> Vec<Uuid> {
    let mut out = Vec::with_capacity(ids.len());
    for id in ids {
        if !out.contains(&id) {
            out.push(id);
        }
    }
    out
}

/// Dream payload for create and full update
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct DreamDraft {
    pub title: Option<String>,
    pub content: Option<String>,
    pub privacy_level: Option<String>,
    pub tags: Option<Vec<String>>,
    pub mood: Option<String>,
    /// Mentioned user ids; extracted from `content` when omitted
    pub mentions: Option<Vec<Uuid>>,
}

/// A dream that passed validation, ready for a store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDream {
    pub title: String,
    pub content: String,
    pub privacy_level: PrivacyLevel,
    pub tags: Vec<String>,
    pub mood: Mood,
    pub mentions: Vec<Uuid>,
}

impl DreamDraft {
    /// Apply the dream rules
    ///
    /// - title: required, non-empty after trim
    /// - content: required, at least 10 characters
    /// - mood: required, one of the fixed moods
    /// - privacyLevel: one of the fixed levels, `private` when omitted
    pub fn validate(self) -> Result<NewDream, SharedError> {
        let title = self
            .title
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .ok_or_else(|| SharedError::validation("title", "Title is required"))?;

        let content = self
            .content
            .ok_or_else(|| SharedError::validation("content", "Content is required"))?;
        if content.chars().count() < MIN_CONTENT_LENGTH {
            return Err(SharedError::validation(
                "content",
                format!("Content must be at least {} characters", MIN_CONTENT_LENGTH),
            ));
        }

        let mood = self
            .mood
            .ok_or_else(|| SharedError::validation("mood", "Mood is required"))?
            .parse::<Mood>()?;

        let privacy_level = match self.privacy_level {
            Some(level) => level.parse::<PrivacyLevel>()?,
            None => PrivacyLevel::default(),
        };

        let mentions = match self.mentions {
            Some(ids) => dedup_ids(ids),
            None => mention_ids(&content),
        };

        Ok(NewDream {
            title,
            content,
            privacy_level,
            tags: normalize_tags(self.tags.unwrap_or_default()),
            mood,
            mentions,
        })
    }
}

/// Comment payload
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CommentDraft {
    pub content: Option<String>,
    /// Mentioned user ids, passed through as given; extracted when omitted
    pub mentions: Option<Vec<Uuid>>,
}

/// A comment that passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComment {
    pub content: String,
    pub mentions: Vec<Uuid>,
}

impl CommentDraft {
    pub fn validate(self) -> Result<NewComment, SharedError> {
        let content = self
            .content
            .filter(|c| !c.trim().is_empty())
            .ok_or_else(|| SharedError::validation("content", "Comment content is required"))?;
        let mentions = match self.mentions {
            Some(ids) => dedup_ids(ids),
            None => mention_ids(&content),
        };
        Ok(NewComment { content, mentions })
    }
}
