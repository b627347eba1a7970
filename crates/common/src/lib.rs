//! Modular common utilities shared across Nimbus crates.
//!
//! Currently this is the time tier: a wall-clock abstraction that lets
//! session expiry logic run against either the system clock or a mock clock
//! in tests, plus human-readable duration formatting.

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::complexity, clippy::suspicious)]

pub mod time;

// Re-export commonly used types and traits for convenience
pub use time::{format_duration, Clock, MockClock, SystemClock};
