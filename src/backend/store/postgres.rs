//! PostgreSQL store
//!
//! Dreams keep `tags`, `likes` and `mentions` as arrays; comments live in
//! `dream_comments` and are ordered by their serial `seq`. Rows are mapped
//! by hand so the schema can evolve without compile-time query checking.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::postgres::{PgPool, PgRow};
use sqlx::Row;
use std::collections::HashMap;
use uuid::Uuid;

use crate::backend::store::{
    Credentials, DreamStore, FeedQuery, NewUser, StoreError, UserStore, USER_SEARCH_LIMIT,
};
use crate::shared::user::normalize_email;
use crate::shared::{
    Comment, Dream, Mood, NewComment, NewDream, PrivacyLevel, ProfileUpdate, User, UserSummary,
};

const USER_COLUMNS: &str = "id, name, email, bio, location, website, avatar_url, \
     dream_count, followers_count, following_count, joined_at, updated_at";

const DREAM_SELECT: &str = "SELECT d.id, d.owner_id, d.title, d.content, d.privacy_level, \
     d.tags, d.mood, d.likes, d.mentions, d.created_at, d.updated_at, \
     u.name AS owner_name, u.avatar_url AS owner_avatar_url \
     FROM dreams d JOIN users u ON u.id = d.owner_id";

/// Escape `%`, `_` and `\` so they match literally in a LIKE pattern
fn like_pattern(query: &str) -> String {
    let mut escaped = String::with_capacity(query.len() + 2);
    escaped.push('%');
    for c in query.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

fn user_from_row(row: &PgRow) -> Result<User, sqlx::Error> {
    Ok(User {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        email: row.try_get("email")?,
        bio: row.try_get("bio")?,
        location: row.try_get("location")?,
        website: row.try_get("website")?,
        avatar_url: row.try_get("avatar_url")?,
        dream_count: row.try_get("dream_count")?,
        followers_count: row.try_get("followers_count")?,
        following_count: row.try_get("following_count")?,
        joined_at: row.try_get("joined_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

fn decode_column<T: std::str::FromStr>(row: &PgRow, column: &str) -> Result<T, sqlx::Error>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let raw: String = row.try_get(column)?;
    raw.parse::<T>().map_err(|e| sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(e),
    })
}

/// A dream row without its comments
fn dream_from_row(row: &PgRow) -> Result<Dream, sqlx::Error> {
    let owner_id: Uuid = row.try_get("owner_id")?;
    Ok(Dream {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        content: row.try_get("content")?,
        owner_id,
        owner: Some(UserSummary {
            id: owner_id,
            name: row.try_get("owner_name")?,
            avatar_url: row.try_get("owner_avatar_url")?,
        }),
        privacy_level: decode_column::<PrivacyLevel>(row, "privacy_level")?,
        tags: row.try_get("tags")?,
        mood: decode_column::<Mood>(row, "mood")?,
        likes: row.try_get("likes")?,
        comments: Vec::new(),
        mentions: row.try_get("mentions")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect and bring the schema up to date
    pub async fn connect(database_url: &str) -> Result<Self, StoreError> {
        tracing::info!("Connecting to database...");
        let pool = PgPool::connect(database_url).await?;
        tracing::info!("Running database migrations...");
        sqlx::migrate!().run(&pool).await?;
        tracing::info!("Database migrations completed successfully");
        Ok(Self::new(pool))
    }

    /// Map dream rows and attach their comments in one extra query
    async fn with_comments(&self, rows: Vec<PgRow>) -> Result<Vec<Dream>, StoreError> {
        let mut dreams = rows
            .iter()
            .map(dream_from_row)
            .collect::<Result<Vec<_>, _>>()?;
        if dreams.is_empty() {
            return Ok(dreams);
        }

        let ids: Vec<Uuid> = dreams.iter().map(|d| d.id).collect();
        let comment_rows = sqlx::query(
            r#"
            SELECT c.id, c.dream_id, c.author_id, c.content, c.mentions, c.created_at,
                   u.name AS author_name, u.avatar_url AS author_avatar_url
            FROM dream_comments c
            JOIN users u ON u.id = c.author_id
            WHERE c.dream_id = ANY($1)
            ORDER BY c.seq
            "#,
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await?;

        let mut by_dream: HashMap<Uuid, Vec<Comment>> = HashMap::new();
        for row in comment_rows {
            let dream_id: Uuid = row.try_get("dream_id")?;
            let author_id: Uuid = row.try_get("author_id")?;
            by_dream.entry(dream_id).or_default().push(Comment {
                id: row.try_get("id")?,
                content: row.try_get("content")?,
                author: UserSummary {
                    id: author_id,
                    name: row.try_get("author_name")?,
                    avatar_url: row.try_get("author_avatar_url")?,
                },
                created_at: row.try_get("created_at")?,
                mentions: row.try_get("mentions")?,
            });
        }

        for dream in &mut dreams {
            if let Some(comments) = by_dream.remove(&dream.id) {
                dream.comments = comments;
            }
        }
        Ok(dreams)
    }
}

#[async_trait]
impl UserStore for PgStore {
    async fn create_user(&self, user: NewUser) -> Result<User, StoreError> {
        let query = format!(
            "INSERT INTO users (id, name, email, password_hash, avatar_url, joined_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $6) RETURNING {}",
            USER_COLUMNS
        );
        let result = sqlx::query(&query)
            .bind(Uuid::new_v4())
            .bind(&user.name)
            .bind(normalize_email(&user.email))
            .bind(&user.password_hash)
            .bind(&user.avatar_url)
            .bind(Utc::now())
            .fetch_one(&self.pool)
            .await;

        match result {
            Ok(row) => Ok(user_from_row(&row)?),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                Err(StoreError::DuplicateEmail)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn find_user(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        let query = format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS);
        let row = sqlx::query(&query).bind(id).fetch_optional(&self.pool).await?;
        Ok(row.as_ref().map(user_from_row).transpose()?)
    }

    async fn find_credentials(&self, email: &str) -> Result<Option<Credentials>, StoreError> {
        let query = format!(
            "SELECT {}, password_hash FROM users WHERE LOWER(email) = $1",
            USER_COLUMNS
        );
        let row = sqlx::query(&query)
            .bind(normalize_email(email))
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => Ok(Some(Credentials {
                user: user_from_row(&row)?,
                password_hash: row.try_get("password_hash")?,
            })),
            None => Ok(None),
        }
    }

    async fn update_profile(&self, id: Uuid, update: ProfileUpdate) -> Result<Option<User>, StoreError> {
        let query = format!(
            "UPDATE users SET \
                name = COALESCE($2, name), \
                bio = COALESCE($3, bio), \
                location = COALESCE($4, location), \
                website = COALESCE($5, website), \
                avatar_url = COALESCE($6, avatar_url), \
                updated_at = $7 \
             WHERE id = $1 RETURNING {}",
            USER_COLUMNS
        );
        let row = sqlx::query(&query)
            .bind(id)
            .bind(update.name)
            .bind(update.bio)
            .bind(update.location)
            .bind(update.website)
            .bind(update.avatar_url)
            .bind(Utc::now())
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.as_ref().map(user_from_row).transpose()?)
    }

    async fn search_users(&self, query: &str) -> Result<Vec<UserSummary>, StoreError> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, avatar_url
            FROM users
            WHERE name ILIKE $1 ESCAPE '\' OR email ILIKE $1 ESCAPE '\'
            ORDER BY name, id
            LIMIT $2
            "#,
        )
        .bind(like_pattern(query))
        .bind(USER_SEARCH_LIMIT as i64)
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|row| -> Result<UserSummary, StoreError> {
                Ok(UserSummary {
                    id: row.try_get("id")?,
                    name: row.try_get("name")?,
                    avatar_url: row.try_get("avatar_url")?,
                })
            })
            .collect()
    }
}

#[async_trait]
impl DreamStore for PgStore {
    async fn create_dream(&self, owner_id: Uuid, dream: NewDream) -> Result<Dream, StoreError> {
        let id = Uuid::new_v4();
        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO dreams (id, owner_id, title, content, privacy_level, tags, mood, mentions, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $9)
            "#,
        )
        .bind(id)
        .bind(owner_id)
        .bind(&dream.title)
        .bind(&dream.content)
        .bind(dream.privacy_level.as_str())
        .bind(&dream.tags)
        .bind(dream.mood.as_str())
        .bind(&dream.mentions)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        let owner = sqlx::query(
            "UPDATE users SET dream_count = dream_count + 1 WHERE id = $1 RETURNING name, avatar_url",
        )
        .bind(owner_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(Dream {
            id,
            title: dream.title,
            content: dream.content,
            owner_id,
            owner: Some(UserSummary {
                id: owner_id,
                name: owner.try_get("name")?,
                avatar_url: owner.try_get("avatar_url")?,
            }),
            privacy_level: dream.privacy_level,
            tags: dream.tags,
            mood: dream.mood,
            likes: Vec::new(),
            comments: Vec::new(),
            mentions: dream.mentions,
            created_at: now,
            updated_at: now,
        })
    }

    async fn find_dream(&self, id: Uuid) -> Result<Option<Dream>, StoreError> {
        let query = format!("{} WHERE d.id = $1", DREAM_SELECT);
        let rows = sqlx::query(&query).bind(id).fetch_all(&self.pool).await?;
        Ok(self.with_comments(rows).await?.into_iter().next())
    }

    async fn update_dream(&self, id: Uuid, owner_id: Uuid, dream: NewDream) -> Result<Option<Dream>, StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE dreams
            SET title = $3, content = $4, privacy_level = $5, tags = $6, mood = $7, mentions = $8, updated_at = $9
            WHERE id = $1 AND owner_id = $2
            "#,
        )
        .bind(id)
        .bind(owner_id)
        .bind(&dream.title)
        .bind(&dream.content)
        .bind(dream.privacy_level.as_str())
        .bind(&dream.tags)
        .bind(dream.mood.as_str())
        .bind(&dream.mentions)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.find_dream(id).await
    }

    async fn delete_dream(&self, id: Uuid, owner_id: Uuid) -> Result<bool, StoreError> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query("DELETE FROM dreams WHERE id = $1 AND owner_id = $2")
            .bind(id)
            .bind(owner_id)
            .execute(&mut *tx)
            .await?;
        if result.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(false);
        }

        sqlx::query("UPDATE users SET dream_count = GREATEST(dream_count - 1, 0) WHERE id = $1")
            .bind(owner_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(true)
    }

    async fn toggle_like(&self, id: Uuid, user_id: Uuid) -> Result<Option<Dream>, StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE dreams
            SET likes = CASE
                    WHEN $2 = ANY(likes) THEN array_remove(likes, $2)
                    ELSE array_append(likes, $2)
                END,
                updated_at = $3
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(user_id)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.find_dream(id).await
    }

    async fn add_comment(&self, id: Uuid, author_id: Uuid, comment: NewComment) -> Result<Option<Dream>, StoreError> {
        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        let touched = sqlx::query("UPDATE dreams SET updated_at = $2 WHERE id = $1")
            .bind(id)
            .bind(now)
            .execute(&mut *tx)
            .await?;
        if touched.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(None);
        }

        sqlx::query(
            r#"
            INSERT INTO dream_comments (id, dream_id, author_id, content, mentions, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(id)
        .bind(author_id)
        .bind(&comment.content)
        .bind(&comment.mentions)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        self.find_dream(id).await
    }

    async fn public_feed(&self, query: &FeedQuery) -> Result<Vec<Dream>, StoreError> {
        let sql = format!(
            "{} \
             WHERE d.privacy_level IN ('public', 'anonymous') \
               AND ($1::text IS NULL OR $1 = ANY(d.tags)) \
               AND ($2::text IS NULL OR d.mood = $2) \
               AND (d.title || ' ' || d.content || ' ' || array_to_string(d.tags, ' ')) \
                    ILIKE ALL($3::text[]) \
             ORDER BY d.created_at DESC, d.id DESC \
             LIMIT $4 OFFSET $5",
            DREAM_SELECT
        );
        let patterns: Vec<String> = query.search_words().iter().map(|w| like_pattern(w)).collect();
        let rows = sqlx::query(&sql)
            .bind(query.tag.as_deref())
            .bind(query.mood.map(|m| m.as_str()))
            .bind(patterns)
            .bind(i64::from(query.limit))
            .bind(i64::try_from(query.offset()).unwrap_or(i64::MAX))
            .fetch_all(&self.pool)
            .await?;
        self.with_comments(rows).await
    }

    async fn dreams_by_owner(&self, owner_id: Uuid, privacy: Option<PrivacyLevel>) -> Result<Vec<Dream>, StoreError> {
        let sql = format!(
            "{} \
             WHERE d.owner_id = $1 AND ($2::text IS NULL OR d.privacy_level = $2) \
             ORDER BY d.created_at DESC, d.id DESC",
            DREAM_SELECT
        );
        let rows = sqlx::query(&sql)
            .bind(owner_id)
            .bind(privacy.map(|p| p.as_str()))
            .fetch_all(&self.pool)
            .await?;
        self.with_comments(rows).await
    }
}
