//! Shared test helpers for `nimbus-core` integration tests.

pub mod identity;
