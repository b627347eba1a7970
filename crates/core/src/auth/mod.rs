//! Token-caching authentication.
//!
//! [`AuthGateway`] owns the cached [`Session`], refreshes it through an
//! [`IdentityProvider`] when it nears expiry and stamps outgoing requests
//! with the token and tenant prefix.

pub mod expiry;
pub mod gateway;
pub mod middleware;
pub mod ports;
pub mod session;

pub use expiry::parse_expiry;
pub use gateway::{AuthGateway, GatewayConfig};
pub use middleware::TokenOnly;
pub use ports::IdentityProvider;
pub use session::Session;
