/**
 * Server Configuration
 *
 * Settings are read once at start-up from the environment (after `.env` is
 * loaded) or assembled with `AppConfigBuilder`, then shared read-only.
 *
 * # Environment
 *
 * | Variable             | Default                |
 * |----------------------|------------------------|
 * | `PORT`               | 5000                   |
 * | `DATABASE_URL`       | unset, in-memory store |
 * | `JWT_SECRET`         | required               |
 * | `JWT_ISSUER`         | `dreamjournal`         |
 * | `TOKEN_TTL_HOURS`    | 720                    |
 * | `BCRYPT_COST`        | 10                     |
 * | `DEFAULT_AVATAR_URL` | dicebear fun-emoji     |
 */

use chrono::Duration;
use thiserror::Error;

pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_ISSUER: &str = "dreamjournal";
pub const DEFAULT_TOKEN_TTL_HOURS: i64 = 720;
pub const DEFAULT_BCRYPT_COST: u32 = 10;
pub const DEFAULT_AVATAR_URL: &str =
    "https://api.dicebear.com/8.x/fun-emoji/svg?eyes=plain&mouth=smileTeeth&backgroundColor=a0c4ff";

/// Configuration errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing value: {0}")]
    MissingValue(&'static str),
    #[error("invalid value for {key}: {message}")]
    InvalidValue { key: &'static str, message: String },
}

/// Process-wide server configuration
#[derive(Clone)]
pub struct AppConfig {
    pub port: u16,
    /// `None` selects the in-memory store
    pub database_url: Option<String>,
    pub jwt_secret: String,
    pub jwt_issuer: String,
    pub token_ttl: Duration,
    pub bcrypt_cost: u32,
    pub default_avatar_url: String,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("port", &self.port)
            .field("database_url", &self.database_url.as_ref().map(|_| "<set>"))
            .field("jwt_secret", &"<redacted>")
            .field("jwt_issuer", &self.jwt_issuer)
            .field("token_ttl", &self.token_ttl)
            .field("bcrypt_cost", &self.bcrypt_cost)
            .field("default_avatar_url", &self.default_avatar_url)
            .finish()
    }
}

impl AppConfig {
    /// Create a new AppConfigBuilder
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    /// Load from process environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load through an arbitrary key lookup; blank values count as unset
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let mut builder = Self::builder();

        if let Some(port) = get("PORT") {
            builder = builder.port(parse_number("PORT", &port)?);
        }
        if let Some(url) = get("DATABASE_URL") {
            builder = builder.database_url(url);
        }
        if let Some(secret) = get("JWT_SECRET") {
            builder = builder.jwt_secret(secret);
        }
        if let Some(issuer) = get("JWT_ISSUER") {
            builder = builder.jwt_issuer(issuer);
        }
        if let Some(hours) = get("TOKEN_TTL_HOURS") {
            builder = builder.token_ttl_hours(parse_number("TOKEN_TTL_HOURS", &hours)?);
        }
        if let Some(cost) = get("BCRYPT_COST") {
            builder = builder.bcrypt_cost(parse_number("BCRYPT_COST", &cost)?);
        }
        if let Some(avatar) = get("DEFAULT_AVATAR_URL") {
            builder = builder.default_avatar_url(avatar);
        }

        builder.build()
    }
}

fn parse_number<T: std::str::FromStr>(key: &'static str, raw: &str) -> Result<T, ConfigError> {
    raw.parse::<T>().map_err(|_| ConfigError::InvalidValue {
        key,
        message: format!("'{}' is not a valid number", raw),
    })
}

/// Builder for AppConfig
#[derive(Debug, Default)]
pub struct AppConfigBuilder {
    port: Option<u16>,
    database_url: Option<String>,
    jwt_secret: Option<String>,
    jwt_issuer: Option<String>,
    token_ttl_hours: Option<i64>,
    bcrypt_cost: Option<u32>,
    default_avatar_url: Option<String>,
}

impl AppConfigBuilder {
    pub fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    pub fn database_url(mut self, url: impl Into<String>) -> Self {
        self.database_url = Some(url.into());
        self
    }

    pub fn jwt_secret(mut self, secret: impl Into<String>) -> Self {
        self.jwt_secret = Some(secret.into());
        self
    }

    pub fn jwt_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.jwt_issuer = Some(issuer.into());
        self
    }

    pub fn token_ttl_hours(mut self, hours: i64) -> Self {
        self.token_ttl_hours = Some(hours);
        self
    }

    pub fn bcrypt_cost(mut self, cost: u32) -> Self {
        self.bcrypt_cost = Some(cost);
        self
    }

    pub fn default_avatar_url(mut self, url: impl Into<String>) -> Self {
        self.default_avatar_url = Some(url.into());
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<AppConfig, ConfigError> {
        let jwt_secret = self
            .jwt_secret
            .filter(|s| !s.is_empty())
            .ok_or(ConfigError::MissingValue("JWT_SECRET"))?;

        let bcrypt_cost = self.bcrypt_cost.unwrap_or(DEFAULT_BCRYPT_COST);
        if !(4..=31).contains(&bcrypt_cost) {
            return Err(ConfigError::InvalidValue {
                key: "BCRYPT_COST",
                message: format!("{} is outside 4..=31", bcrypt_cost),
            });
        }

        let ttl_hours = self.token_ttl_hours.unwrap_or(DEFAULT_TOKEN_TTL_HOURS);
        if ttl_hours <= 0 {
            return Err(ConfigError::InvalidValue {
                key: "TOKEN_TTL_HOURS",
                message: "must be positive".to_string(),
            });
        }

        Ok(AppConfig {
            port: self.port.unwrap_or(DEFAULT_PORT),
            database_url: self.database_url,
            jwt_secret,
            jwt_issuer: self.jwt_issuer.unwrap_or_else(|| DEFAULT_ISSUER.to_string()),
            token_ttl: Duration::hours(ttl_hours),
            bcrypt_cost,
            default_avatar_url: self
                .default_avatar_url
                .unwrap_or_else(|| DEFAULT_AVATAR_URL.to_string()),
        })
    }
}
