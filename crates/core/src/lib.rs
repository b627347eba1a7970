//! # Nimbus Core
//!
//! Request model and authentication logic - no infrastructure dependencies.
//!
//! This crate contains:
//! - The logical REST request/response model and the middleware/transport
//!   ports every client is assembled from
//! - The token-caching authentication gateway
//! - The identity provider port the gateway authenticates through
//!
//! ## Architecture Principles
//! - Only depends on `nimbus-common` and `nimbus-domain`
//! - No sockets, TLS or HTTP client code
//! - All external dependencies via traits

pub mod auth;
pub mod rest;

pub use auth::{
    parse_expiry, AuthGateway, GatewayConfig, IdentityProvider, Session, TokenOnly,
};
pub use rest::{RequestBody, RequestMiddleware, RestRequest, RestResponse, Transport};
