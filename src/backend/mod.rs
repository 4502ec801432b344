//! Backend Module
//!
//! All server-side code for the dream journal: an Axum HTTP server over a
//! credential store and a dream store.
//!
//! This module is only compiled when the `ssr` feature is enabled.
//!
//! # Architecture
//!
//! - **`server`** - Configuration, application state, initialization
//! - **`routes`** - HTTP route configuration and router assembly
//! - **`auth`** - Password hashing, tokens, register/login/me handlers
//! - **`dreams`** - Feed, listing and dream mutation handlers
//! - **`users`** - Profile and user search handlers
//! - **`store`** - `UserStore`/`DreamStore` traits with PostgreSQL and
//!   in-memory implementations
//! - **`middleware`** - Bearer-token authentication
//! - **`error`** - `BackendError` and its JSON response
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs          - Module exports and documentation
//! ├── main.rs         - Server binary
//! ├── server/         - Server initialization and state
//! ├── routes/         - Route configuration
//! ├── auth/           - Authentication
//! ├── dreams/         - Dream handlers
//! ├── users/          - User handlers
//! ├── store/          - Persistence
//! ├── middleware/     - Request middleware
//! └── error/          - Error types
//! ```
//!
//! # Request Flow
//!
//! Client → router (trace, CORS) → auth middleware on protected routes →
//! handler (validation in `shared`) → store → JSON response.
//!
//! Handlers return `Result<_, BackendError>`; every failure becomes a JSON
//! error body with the matching status code.

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Backend error types
pub mod error;

/// Authentication
pub mod auth;

/// Middleware for request processing
pub mod middleware;

/// Persistence
pub mod store;

/// Dream endpoints
pub mod dreams;

/// User endpoints
pub mod users;

pub use error::BackendError;
pub use server::{create_app, AppConfig, AppState};
