//! Identity service client and gateway wiring

pub mod client;

use std::sync::Arc;

use nimbus_core::{AuthGateway, GatewayConfig};
use nimbus_domain::{Config, Credential, Result};

pub use client::KeystoneClient;

use crate::http::HttpClient;

/// Gateway authenticating against the identity service over HTTP.
pub type KeystoneGateway = AuthGateway<KeystoneClient>;

/// Gateway for `credential` against `identity_url` with default settings.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be built.
pub fn connect(credential: Credential, identity_url: &str) -> Result<Arc<KeystoneGateway>> {
    let http = HttpClient::builder().build()?;
    let provider = KeystoneClient::new(identity_url, &http);
    Ok(Arc::new(AuthGateway::new(provider, credential, GatewayConfig::default())))
}

/// Gateway built from a loaded [`Config`].
///
/// # Errors
///
/// Returns a config error for an out-of-range refresh skew, a credential
/// error when the configured secrets are incomplete, or an error if the HTTP
/// client cannot be built.
pub fn connect_with_config(config: &Config) -> Result<Arc<KeystoneGateway>> {
    let gateway_config = GatewayConfig::try_from(&config.auth)?;
    let credential = config.identity.credential()?;
    let http = HttpClient::from_config(&config.http)?;
    let provider = KeystoneClient::new(config.identity.resolved_endpoint(), &http);
    Ok(Arc::new(AuthGateway::new(provider, credential, gateway_config)))
}
