//! Routes Module
//!
//! - **`router`** - Main router creation with tracing, CORS and fallback
//! - **`api_routes`** - `/api` endpoints, split into public and
//!   authenticated groups

/// Main router creation
pub mod router;

/// API route configuration
pub mod api_routes;

pub use router::create_router;
