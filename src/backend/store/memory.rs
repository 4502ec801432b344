/**
 * In-Memory Store
 *
 * Both collections live in one `RwLock`, so a dream write and the matching
 * dream-count update are applied together. Data is lost on restart; this
 * store serves development without a database and the test-suite.
 */

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::backend::store::{
    Credentials, DreamStore, FeedQuery, NewUser, StoreError, UserStore, USER_SEARCH_LIMIT,
};
use crate::shared::dream::toggle_membership;
use crate::shared::user::normalize_email;
use crate::shared::{
    Comment, Dream, Mood, NewComment, NewDream, PrivacyLevel, ProfileUpdate, User, UserSummary,
};

#[derive(Debug, Clone)]
struct StoredUser {
    user: User,
    password_hash: String,
}

#[derive(Debug, Clone)]
struct StoredComment {
    id: Uuid,
    author_id: Uuid,
    content: String,
    mentions: Vec<Uuid>,
    created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
struct StoredDream {
    id: Uuid,
    owner_id: Uuid,
    title: String,
    content: String,
    privacy_level: PrivacyLevel,
    tags: Vec<String>,
    mood: Mood,
    likes: Vec<Uuid>,
    mentions: Vec<Uuid>,
    comments: Vec<StoredComment>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    /// Insertion order, breaks `created_at` ties
    seq: u64,
}

#[derive(Debug, Default)]
struct Inner {
    users: HashMap<Uuid, StoredUser>,
    dreams: HashMap<Uuid, StoredDream>,
    next_seq: u64,
}

impl Inner {
    fn summary(&self, user_id: Uuid) -> UserSummary {
        match self.users.get(&user_id) {
            Some(stored) => stored.user.summary(),
            None => UserSummary {
                id: user_id,
                name: String::new(),
                avatar_url: String::new(),
            },
        }
    }

    fn render(&self, dream: &StoredDream) -> Dream {
        Dream {
            id: dream.id,
            title: dream.title.clone(),
            content: dream.content.clone(),
            owner_id: dream.owner_id,
            owner: Some(self.summary(dream.owner_id)),
            privacy_level: dream.privacy_level,
            tags: dream.tags.clone(),
            mood: dream.mood,
            likes: dream.likes.clone(),
            comments: dream
                .comments
                .iter()
                .map(|c| Comment {
                    id: c.id,
                    content: c.content.clone(),
                    author: self.summary(c.author_id),
                    created_at: c.created_at,
                    mentions: c.mentions.clone(),
                })
                .collect(),
            mentions: dream.mentions.clone(),
            created_at: dream.created_at,
            updated_at: dream.updated_at,
        }
    }

    /// Newest first
    fn sorted<'a>(&'a self, mut dreams: Vec<&'a StoredDream>) -> Vec<Dream> {
        dreams.sort_by(|a, b| (b.created_at, b.seq).cmp(&(a.created_at, a.seq)));
        dreams.into_iter().map(|d| self.render(d)).collect()
    }

    fn adjust_dream_count(&mut self, user_id: Uuid, delta: i64) {
        if let Some(stored) = self.users.get_mut(&user_id) {
            stored.user.dream_count = (stored.user.dream_count + delta).max(0);
        }
    }
}

fn matches_search(dream: &StoredDream, words: &[String]) -> bool {
    let haystack = format!("{} {} {}", dream.title, dream.content, dream.tags.join(" ")).to_lowercase();
    words.iter().all(|word| haystack.contains(word.as_str()))
}

/// Process-local store
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn create_user(&self, new_user: NewUser) -> Result<User, StoreError> {
        let email = normalize_email(&new_user.email);
        let mut inner = self.inner.write().await;
        if inner.users.values().any(|stored| stored.user.email == email) {
            return Err(StoreError::DuplicateEmail);
        }

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            name: new_user.name,
            email,
            bio: String::new(),
            location: String::new(),
            website: String::new(),
            avatar_url: new_user.avatar_url,
            dream_count: 0,
            followers_count: 0,
            following_count: 0,
            joined_at: now,
            updated_at: now,
        };
        inner.users.insert(
            user.id,
            StoredUser {
                user: user.clone(),
                password_hash: new_user.password_hash,
            },
        );
        Ok(user)
    }

    async fn find_user(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.users.get(&id).map(|stored| stored.user.clone()))
    }

    async fn find_credentials(&self, email: &str) -> Result<Option<Credentials>, StoreError> {
        let email = normalize_email(email);
        let inner = self.inner.read().await;
        Ok(inner
            .users
            .values()
            .find(|stored| stored.user.email == email)
            .map(|stored| Credentials {
                user: stored.user.clone(),
                password_hash: stored.password_hash.clone(),
            }))
    }

    async fn update_profile(&self, id: Uuid, update: ProfileUpdate) -> Result<Option<User>, StoreError> {
        let mut inner = self.inner.write().await;
        Ok(inner.users.get_mut(&id).map(|stored| {
            update.apply_to(&mut stored.user);
            stored.user.updated_at = Utc::now();
            stored.user.clone()
        }))
    }

    async fn search_users(&self, query: &str) -> Result<Vec<UserSummary>, StoreError> {
        let needle = query.to_lowercase();
        let inner = self.inner.read().await;
        let mut found: Vec<&User> = inner
            .users
            .values()
            .map(|stored| &stored.user)
            .filter(|user| {
                user.name.to_lowercase().contains(&needle) || user.email.contains(&needle)
            })
            .collect();
        found.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(found
            .into_iter()
            .take(USER_SEARCH_LIMIT)
            .map(User::summary)
            .collect())
    }
}

#[async_trait]
impl DreamStore for MemoryStore {
    async fn create_dream(&self, owner_id: Uuid, dream: NewDream) -> Result<Dream, StoreError> {
        let mut inner = self.inner.write().await;
        let now = Utc::now();
        let seq = inner.next_seq;
        inner.next_seq += 1;

        let stored = StoredDream {
            id: Uuid::new_v4(),
            owner_id,
            title: dream.title,
            content: dream.content,
            privacy_level: dream.privacy_level,
            tags: dream.tags,
            mood: dream.mood,
            likes: Vec::new(),
            mentions: dream.mentions,
            comments: Vec::new(),
            created_at: now,
            updated_at: now,
            seq,
        };
        inner.adjust_dream_count(owner_id, 1);
        let rendered = inner.render(&stored);
        inner.dreams.insert(stored.id, stored);
        Ok(rendered)
    }

    async fn find_dream(&self, id: Uuid) -> Result<Option<Dream>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.dreams.get(&id).map(|d| inner.render(d)))
    }

    async fn update_dream(&self, id: Uuid, owner_id: Uuid, dream: NewDream) -> Result<Option<Dream>, StoreError> {
        let mut inner = self.inner.write().await;
        let Some(stored) = inner.dreams.get_mut(&id).filter(|d| d.owner_id == owner_id) else {
            return Ok(None);
        };
        stored.title = dream.title;
        stored.content = dream.content;
        stored.privacy_level = dream.privacy_level;
        stored.tags = dream.tags;
        stored.mood = dream.mood;
        stored.mentions = dream.mentions;
        stored.updated_at = Utc::now();

        let stored = stored.clone();
        Ok(Some(inner.render(&stored)))
    }

    async fn delete_dream(&self, id: Uuid, owner_id: Uuid) -> Result<bool, StoreError> {
        let mut inner = self.inner.write().await;
        let owned = inner
            .dreams
            .get(&id)
            .is_some_and(|d| d.owner_id == owner_id);
        if !owned {
            return Ok(false);
        }
        inner.dreams.remove(&id);
        inner.adjust_dream_count(owner_id, -1);
        Ok(true)
    }

    async fn toggle_like(&self, id: Uuid, user_id: Uuid) -> Result<Option<Dream>, StoreError> {
        let mut inner = self.inner.write().await;
        let Some(stored) = inner.dreams.get_mut(&id) else {
            return Ok(None);
        };
        toggle_membership(&mut stored.likes, user_id);
        stored.updated_at = Utc::now();

        let stored = stored.clone();
        Ok(Some(inner.render(&stored)))
    }

    async fn add_comment(&self, id: Uuid, author_id: Uuid, comment: NewComment) -> Result<Option<Dream>, StoreError> {
        let mut inner = self.inner.write().await;
        let Some(stored) = inner.dreams.get_mut(&id) else {
            return Ok(None);
        };
        let now = Utc::now();
        stored.comments.push(StoredComment {
            id: Uuid::new_v4(),
            author_id,
            content: comment.content,
            mentions: comment.mentions,
            created_at: now,
        });
        stored.updated_at = now;

        let stored = stored.clone();
        Ok(Some(inner.render(&stored)))
    }

    async fn public_feed(&self, query: &FeedQuery) -> Result<Vec<Dream>, StoreError> {
        let words = query.search_words();
        let inner = self.inner.read().await;
        let candidates = inner
            .dreams
            .values()
            .filter(|d| d.privacy_level.is_listed())
            .filter(|d| query.tag.as_ref().map_or(true, |tag| d.tags.contains(tag)))
            .filter(|d| query.mood.map_or(true, |mood| d.mood == mood))
            .filter(|d| matches_search(d, &words))
            .collect();

        let offset = usize::try_from(query.offset()).unwrap_or(usize::MAX);
        Ok(inner
            .sorted(candidates)
            .into_iter()
            .skip(offset)
            .take(query.limit as usize)
            .collect())
    }

    async fn dreams_by_owner(&self, owner_id: Uuid, privacy: Option<PrivacyLevel>) -> Result<Vec<Dream>, StoreError> {
        let inner = self.inner.read().await;
        let candidates = inner
            .dreams
            .values()
            .filter(|d| d.owner_id == owner_id)
            .filter(|d| privacy.map_or(true, |level| d.privacy_level == level))
            .collect();
        Ok(inner.sorted(candidates))
    }
}
