//! Store Module
//!
//! Persistence behind two async traits, one per collection:
//!
//! - **`UserStore`** - credentials and public profiles
//! - **`DreamStore`** - dreams with their likes and embedded comments
//!
//! Two implementations exist:
//!
//! - **`postgres::PgStore`** - PostgreSQL through sqlx, used when
//!   `DATABASE_URL` is configured
//! - **`memory::MemoryStore`** - process-local maps, used without a database
//!   and by the test-suite
//!
//! # Consistency
//!
//! Creating or deleting a dream and adjusting the owner's `dreamCount` is a
//! single atomic operation in both implementations (a transaction, or one
//! write lock). Like toggles and comment appends are atomic per dream.
//! Nothing here retries; a failed write is reported once.

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::shared::{Dream, Mood, NewComment, NewDream, PrivacyLevel, ProfileUpdate, User, UserSummary};

/// In-memory implementation
pub mod memory;

/// PostgreSQL implementation
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Maximum number of users returned by a search
pub const USER_SEARCH_LIMIT: usize = 20;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("email already registered")]
    DuplicateEmail,
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("migration failed: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// A user about to be inserted; the password is already hashed
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub avatar_url: String,
}

/// A user together with its password hash, for login only
#[derive(Debug, Clone)]
pub struct Credentials {
    pub user: User,
    pub password_hash: String,
}

/// Public feed query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedQuery {
    /// 1-based page number
    pub page: u32,
    pub limit: u32,
    /// Exact tag match
    pub tag: Option<String>,
    /// Exact mood match
    pub mood: Option<Mood>,
    /// Words that must each appear in the title, content or tags
    pub search: Option<String>,
}

impl FeedQuery {
    pub const DEFAULT_LIMIT: u32 = 10;
    pub const MAX_LIMIT: u32 = 50;

    pub fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.limit)
    }

    /// Lowercased search words; each one is a case-insensitive substring test
    pub fn search_words(&self) -> Vec<String> {
        self.search
            .as_deref()
            .map(|s| s.split_whitespace().map(str::to_lowercase).collect())
            .unwrap_or_default()
    }
}

impl Default for FeedQuery {
    fn default() -> Self {
        Self {
            page: 1,
            limit: Self::DEFAULT_LIMIT,
            tag: None,
            mood: None,
            search: None,
        }
    }
}

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a user; fails with `DuplicateEmail` when the email is taken
    /// in any casing
    async fn create_user(&self, user: NewUser) -> Result<User, StoreError>;

    async fn find_user(&self, id: Uuid) -> Result<Option<User>, StoreError>;

    /// Case-insensitive lookup by email, with the password hash
    async fn find_credentials(&self, email: &str) -> Result<Option<Credentials>, StoreError>;

    /// Apply a partial profile edit; `None` when the user does not exist
    async fn update_profile(&self, id: Uuid, update: ProfileUpdate) -> Result<Option<User>, StoreError>;

    /// Case-insensitive substring search on name and email
    async fn search_users(&self, query: &str) -> Result<Vec<UserSummary>, StoreError>;
}

#[async_trait]
pub trait DreamStore: Send + Sync {
    /// Insert a dream and increment the owner's dream count
    async fn create_dream(&self, owner_id: Uuid, dream: NewDream) -> Result<Dream, StoreError>;

    async fn find_dream(&self, id: Uuid) -> Result<Option<Dream>, StoreError>;

    /// Replace every mutable field of a dream owned by `owner_id`
    ///
    /// `None` when the dream does not exist or belongs to someone else.
    async fn update_dream(&self, id: Uuid, owner_id: Uuid, dream: NewDream) -> Result<Option<Dream>, StoreError>;

    /// Delete a dream owned by `owner_id` and decrement the dream count
    ///
    /// `false` when the dream does not exist or belongs to someone else.
    async fn delete_dream(&self, id: Uuid, owner_id: Uuid) -> Result<bool, StoreError>;

    /// Add `user_id` to the likes, or remove it when already present
    async fn toggle_like(&self, id: Uuid, user_id: Uuid) -> Result<Option<Dream>, StoreError>;

    /// Append a comment
    async fn add_comment(&self, id: Uuid, author_id: Uuid, comment: NewComment) -> Result<Option<Dream>, StoreError>;

    /// Public and anonymous dreams, newest first, one page
    async fn public_feed(&self, query: &FeedQuery) -> Result<Vec<Dream>, StoreError>;

    /// All dreams of an owner, newest first, optionally of one privacy level
    async fn dreams_by_owner(&self, owner_id: Uuid, privacy: Option<PrivacyLevel>) -> Result<Vec<Dream>, StoreError>;
}
