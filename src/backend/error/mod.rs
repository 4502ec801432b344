//! Backend Error Module
//!
//! This module defines the error type returned by every HTTP handler and its
//! conversion into a JSON response.
//!
//! # Architecture
//!
//! - **`types`** - `BackendError` and the `From` impls that map store, token,
//!   password and validation failures onto it
//! - **`conversion`** - `IntoResponse` and JSON-rejection handling
//!
//! # Module Structure
//!
//! ```text
//! error/
//! ├── mod.rs        - Module exports and documentation
//! ├── types.rs      - Error type definitions
//! └── conversion.rs - Error conversion implementations
//! ```
//!
//! Nothing below the handler boundary produces an unhandled fault: handlers
//! return `Result<_, BackendError>` and the conversion decides what the
//! client sees.

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

// Re-export commonly used types
pub use types::BackendError;
