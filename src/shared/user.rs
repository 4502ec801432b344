//! User Data Structures
//!
//! Public user profile types and the validation rules for registration and
//! profile edits. Nothing in here knows about storage; the backend feeds the
//! validated values to whichever store is configured.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::error::SharedError;

/// Display name standing in for the owner of an anonymous dream
pub const ANONYMOUS_NAME: &str = "Anonymous";
/// Minimum length of a display name, after trimming
pub const MIN_NAME_LENGTH: usize = 2;
/// Minimum password length, before hashing
pub const MIN_PASSWORD_LENGTH: usize = 8;
/// Maximum bio length
pub const MAX_BIO_LENGTH: usize = 160;
/// Maximum location length
pub const MAX_LOCATION_LENGTH: usize = 100;

/// A user profile as returned by the API
///
/// Never carries the password hash.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub bio: String,
    pub location: String,
    pub website: String,
    pub avatar_url: String,
    /// Number of dreams currently owned by this user
    pub dream_count: i64,
    pub followers_count: i64,
    pub following_count: i64,
    pub joined_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Minimal projection used for joins and search results
    pub fn summary(&self) -> UserSummary {
        UserSummary {
            id: self.id,
            name: self.name.clone(),
            avatar_url: self.avatar_url.clone(),
        }
    }
}

/// Minimal user projection (no email, no counters)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: Uuid,
    pub name: String,
    pub avatar_url: String,
}

impl UserSummary {
    /// Placeholder author shown instead of the owner of an anonymous dream
    pub fn anonymous() -> Self {
        Self {
            id: Uuid::nil(),
            name: ANONYMOUS_NAME.to_string(),
            avatar_url: String::new(),
        }
    }
}

/// Normalize an email for storage and lookup (trimmed, lowercase)
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn required(value: Option<String>, field: &str, label: &str) -> Result<String, SharedError> {
    value.ok_or_else(|| SharedError::validation(field, format!("{} is required", label)))
}

fn validate_name(name: &str) -> Result<String, SharedError> {
    let name = name.trim();
    if name.chars().count() < MIN_NAME_LENGTH {
        return Err(SharedError::validation(
            "name",
            format!("Name must be at least {} characters", MIN_NAME_LENGTH),
        ));
    }
    Ok(name.to_string())
}

fn validate_email(email: &str) -> Result<String, SharedError> {
    let email = normalize_email(email);
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() && !domain.contains('@') => {
            Ok(email)
        }
        _ => Err(SharedError::validation("email", "Invalid email format")),
    }
}

fn validate_max(value: &str, field: &str, label: &str, max: usize) -> Result<String, SharedError> {
    let value = value.trim();
    if value.chars().count() > max {
        return Err(SharedError::validation(
            field,
            format!("{} must be at most {} characters", label, max),
        ));
    }
    Ok(value.to_string())
}

/// Registration payload as received from a client
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RegistrationDraft {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    /// Optional echo of the password from a sign-up form
    pub confirm_password: Option<String>,
    pub avatar_url: Option<String>,
}

/// A registration that passed validation
///
/// `password` is still plaintext here; it must go through the password
/// hasher before reaching a store.
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
    pub avatar_url: Option<String>,
}

impl std::fmt::Debug for Registration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registration")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("avatar_url", &self.avatar_url)
            .finish()
    }
}

impl RegistrationDraft {
    /// Apply the registration rules
    ///
    /// - name: trimmed, at least 2 characters
    /// - email: trimmed, lowercased, `local@domain`
    /// - password: at least 8 characters, must match `confirmPassword` when given
    pub fn validate(self) -> Result<Registration, SharedError> {
        let name = validate_name(&required(self.name, "name", "Name")?)?;
        let email = validate_email(&required(self.email, "email", "Email")?)?;
        let password = required(self.password, "password", "Password")?;

        if password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(SharedError::validation(
                "password",
                format!("Password must be at least {} characters", MIN_PASSWORD_LENGTH),
            ));
        }
        if let Some(confirm) = self.confirm_password {
            if confirm != password {
                return Err(SharedError::validation("confirmPassword", "Passwords do not match"));
            }
        }

        let avatar_url = self
            .avatar_url
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty());

        Ok(Registration {
            name,
            email,
            password,
            avatar_url,
        })
    }
}

/// Profile edit payload as received from a client
///
/// Omitted fields keep their stored value.
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ProfileDraft {
    pub name: Option<String>,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub website: Option<String>,
    pub avatar_url: Option<String>,
}

/// A validated profile edit
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub website: Option<String>,
    pub avatar_url: Option<String>,
}

impl ProfileDraft {
    pub fn validate(self) -> Result<ProfileUpdate, SharedError> {
        Ok(ProfileUpdate {
            name: self.name.as_deref().map(validate_name).transpose()?,
            bio: self
                .bio
                .as_deref()
                .map(|bio| validate_max(bio, "bio", "Bio", MAX_BIO_LENGTH))
                .transpose()?,
            location: self
                .location
                .as_deref()
                .map(|loc| validate_max(loc, "location", "Location", MAX_LOCATION_LENGTH))
                .transpose()?,
            website: self.website.map(|w| w.trim().to_string()),
            avatar_url: self
                .avatar_url
                .map(|url| url.trim().to_string())
                .filter(|url| !url.is_empty()),
        })
    }
}

impl ProfileUpdate {
    /// Apply this edit to a profile in place
    pub fn apply_to(&self, user: &mut User) {
        if let Some(name) = &self.name {
            user.name = name.clone();
        }
        if let Some(bio) = &self.bio {
            user.bio = bio.clone();
        }
        if let Some(location) = &self.location {
            user.location = location.clone();
        }
        if let Some(website) = &self.website {
            user.website = website.clone();
        }
        if let Some(avatar_url) = &self.avatar_url {
            user.avatar_url = avatar_url.clone();
        }
    }
}
