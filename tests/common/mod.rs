//! Common test utilities and helpers
//!
//! - Test server over the in-memory store
//! - Authentication helpers (register and log in users)
//! - Custom assertion macros

#[cfg(feature = "ssr")]
pub mod auth_helpers;

#[cfg(feature = "ssr")]
pub use auth_helpers::*;
#[cfg(feature = "ssr")]
pub use server::*;
