//! Dream Journal - Main Library
//!
//! Backend for a social dream journal: users register, record private,
//! public or anonymous dreams with a mood and tags, like and comment on
//! each other's dreams with @-mentions, and browse a filtered public feed.
//!
//! # Module Structure
//!
//! - **`shared`** - Types shared between server and any Rust client
//!   - Users, dreams, comments, privacy levels and moods
//!   - Pure validation of every request payload
//!   - Mention parsing and client-side dream filtering
//!   - Error types
//!
//! - **`backend`** - Server-side code (only compiled with `ssr` feature)
//!   - Axum HTTP server and REST routes under `/api`
//!   - bcrypt passwords and JWT bearer tokens
//!   - PostgreSQL or in-memory persistence
//!
//! # Feature Flags
//!
//! - **`ssr`** (default) - enables the backend modules and the server binary
//!
//! # Usage
//!
//! ```rust,no_run
//! use dreamjournal::backend::server::{create_app, AppConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::builder().jwt_secret("change-me").build()?;
//! let app = create_app(config).await?;
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:5000").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

/// Shared types and data structures
pub mod shared;

/// Backend server-side code
#[cfg(feature = "ssr")]
pub mod backend;
