/**
 * Backend Error Types
 *
 * This module defines the error taxonomy of the HTTP layer. Every failure
 * inside a handler ends up as one of these variants, which in turn maps to
 * exactly one status code.
 *
 * # Error Categories
 *
 * - `Validation` - missing or malformed input (400)
 * - `Unauthorized` - bad credentials, missing/invalid/expired token (401)
 * - `NotFound` - absent resource, or one the caller does not own (404)
 * - `Conflict` - duplicate email on registration (400)
 * - `Internal` - store or crypto failure (500, details only logged)
 */

use thiserror::Error;
use axum::http::StatusCode;
use crate::shared::SharedError;
use crate::backend::store::StoreError;
use crate::backend::auth::sessions::TokenError;
use crate::backend::auth::password::PasswordError;

/// Backend-specific error types
///
/// # Usage
///
/// ```rust
/// use dreamjournal::backend::error::BackendError;
///
/// let err = BackendError::not_found("Dream not found");
/// assert_eq!(err.status_code().as_u16(), 404);
/// ```
#[derive(Debug, Error)]
pub enum BackendError {
    /// Input rejected before reaching a store
    #[error("{message}")]
    Validation {
        /// Offending field, when known
        field: Option<String>,
        message: String,
    },

    /// Authentication failed
    ///
    /// The message is the one shown to the client; it never says whether the
    /// email or the password was wrong.
    #[error("{message}")]
    Unauthorized { message: String },

    /// Missing resource, or one scoped to another owner
    #[error("{message}")]
    NotFound { message: String },

    /// Uniqueness violation
    #[error("{message}")]
    Conflict { message: String },

    /// Anything the client cannot act on
    ///
    /// `message` is logged, never sent.
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl BackendError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: Some(field.into()),
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::Validation {
            field: None,
            message: message.into(),
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
        }
    }

    /// The single message used for any login failure
    pub fn invalid_credentials() -> Self {
        Self::unauthorized("Invalid credentials")
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Get the HTTP status code for this error
    ///
    /// Duplicate registrations answer 400, not 409.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Conflict { .. } => StatusCode::BAD_REQUEST,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message that is safe to send to the client
    pub fn public_message(&self) -> String {
        match self {
            Self::Internal { .. } => "Something went wrong".to_string(),
            other => other.to_string(),
        }
    }

    pub fn field(&self) -> Option<&str> {
        match self {
            Self::Validation { field, .. } => field.as_deref(),
            _ => None,
        }
    }
}

impl From<SharedError> for BackendError {
    fn from(err: SharedError) -> Self {
        let SharedError::ValidationError { field, message } = err;
        Self::Validation {
            field: Some(field),
            message,
        }
    }
}

impl From<StoreError> for BackendError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateEmail => Self::conflict("Email already registered"),
            other => {
                tracing::error!("Store error: {:?}", other);
                Self::internal(other.to_string())
            }
        }
    }
}

impl From<TokenError> for BackendError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Expired | TokenError::InvalidToken => {
                tracing::debug!("Rejected token: {}", err);
                Self::unauthorized("Invalid or expired token")
            }
            TokenError::Signing(e) => {
                tracing::error!("Failed to sign token: {:?}", e);
                Self::internal("token signing failed")
            }
        }
    }
}

impl From<PasswordError> for BackendError {
    fn from(err: PasswordError) -> Self {
        tracing::error!("Password hashing failed: {:?}", err);
        Self::internal("password hashing failed")
    }
}
