//! # Nimbus Infrastructure
//!
//! Infrastructure implementations of core ports.
//!
//! This crate contains:
//! - The reqwest-backed HTTP client and [`Transport`](nimbus_core::Transport)
//! - The REST client that runs the middleware chain
//! - The identity service client and gateway wiring
//! - Typed JSON service clients
//! - Configuration loading from environment and files
//!
//! ## Architecture
//! - Implements traits defined in `nimbus-core`
//! - Contains all "impure" code (network and filesystem I/O)

pub mod config;
pub mod errors;
pub mod http;
pub mod identity;
pub mod rest;
pub mod service;

// Re-export commonly used items
pub use errors::InfraError;
pub use http::{HttpClient, HttpClientBuilder};
pub use identity::{connect, connect_with_config, KeystoneClient, KeystoneGateway};
pub use rest::{ReqwestTransport, RestClient};
pub use service::ServiceClient;
