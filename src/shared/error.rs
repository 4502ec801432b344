//! Shared Error Types
//!
//! This module defines error types that are shared between the server and any
//! Rust client of the API. They describe failures that do not depend on where
//! the code runs: malformed payloads and rejected field values.
//!
//! # Error Categories
//!
//! - `ValidationError` - A field failed a domain rule (length, enum, required)
//!
//! # Usage
//!
//! ```rust
//! use dreamjournal::shared::error::SharedError;
//!
//! let error = SharedError::validation("content", "Content must be at least 10 characters");
//! assert_eq!(error.field(), "content");
//! ```
use thiserror::Error;

/// Shared error types that can occur on both sides of the API
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SharedError {
    /// Data validation error
    #[error("{message}")]
    ValidationError {
        /// The field that failed validation
        field: String,
        /// Human-readable error message
        message: String,
    },
}

impl SharedError {
    /// Create a new validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }

    /// The offending field
    pub fn field(&self) -> &str {
        let Self::ValidationError { field, .. } = self;
        field
    }
}
