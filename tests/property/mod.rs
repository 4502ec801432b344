//! Property-based tests
//!
//! Uses proptest to check the pure rules in `shared` over generated inputs

mod mention_proptest;
