//! API integration tests
//!
//! Integration tests for all API endpoints

mod dreams_test;
mod users_test;
