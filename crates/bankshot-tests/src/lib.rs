//! Property and scenario test suite for the Bankshot payout engine.
//!
//! Integration tests live under `tests/`; every payout invariant is checked
//! against the public API only.

pub mod helpers;
