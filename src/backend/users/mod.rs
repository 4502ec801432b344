//! Users Module
//!
//! Profile reads, own-profile edits and user search for mentions.

pub mod handlers;

pub use handlers::*;
