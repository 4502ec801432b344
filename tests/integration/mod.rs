//! Integration tests
//!
//! HTTP-level tests of every endpoint through the real router

pub mod api;
