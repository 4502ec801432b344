//! Dreams Module
//!
//! HTTP handlers for dream entries: the public feed, per-owner listings,
//! create/update/delete by the owner, and like/comment by any signed-in user.
//!
//! - **`params`** - query-string types and their normalisation
//! - **`handlers`** - the route handlers
//!
//! Anonymous dreams lose their `owner` before leaving the server unless the
//! viewer owns them.

pub mod handlers;
pub mod params;

pub use handlers::*;
