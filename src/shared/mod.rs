//! Shared Module
//!
//! This module contains types and data structures that are shared between
//! the server and any Rust client of the REST API. These types define the
//! JSON wire format (camelCase field names) and the validation rules that
//! apply to incoming payloads.
//!
//! # Overview
//!
//! The shared module provides platform-agnostic code: nothing here touches
//! the network, the database or the clock beyond `chrono` timestamps, so it
//! can be unit-tested in isolation.

/// User profile types and registration/profile validation
pub mod user;

/// Dream and comment types, validation and like toggling
pub mod dream;

/// `@[name](id)` mention markup
pub mod mention;

/// Client-side dream filtering
pub mod filter;

/// Shared error types
pub mod error;

/// Re-export commonly used types for convenience
pub use dream::{Comment, CommentDraft, Dream, DreamDraft, Mood, NewComment, NewDream, PrivacyLevel};
pub use error::SharedError;
pub use filter::DreamFilter;
pub use user::{ProfileDraft, ProfileUpdate, Registration, RegistrationDraft, User, UserSummary};
