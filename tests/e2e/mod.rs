//! End-to-end flows
//!
//! Whole user journeys through the API, one server per test

mod journal_flow;
