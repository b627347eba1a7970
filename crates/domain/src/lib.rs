//! # Nimbus Domain
//!
//! Domain types shared by every Nimbus crate.
//!
//! This crate contains:
//! - Credentials and the identity service wire format
//! - Domain error type and `Result` alias
//! - Configuration structures
//! - Domain constants (endpoints, header names, timestamp formats)
//!
//! ## Architecture
//! - No dependencies on other Nimbus crates
//! - Only external dependencies allowed
//! - Pure data structures, no I/O

pub mod config;
pub mod constants;
pub mod errors;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
