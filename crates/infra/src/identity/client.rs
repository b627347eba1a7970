//! Identity service client.

use std::sync::Arc;

use async_trait::async_trait;
use http::StatusCode;
use nimbus_core::{IdentityProvider, RestRequest, Transport};
use nimbus_domain::constants::TOKENS_PATH;
use nimbus_domain::{AccessBody, Credential, Result};
use tracing::{debug, instrument};

use crate::http::HttpClient;
use crate::rest::RestClient;

/// Talks to `POST {identity_url}/tokens`.
///
/// Sends exactly one request per call; retries are left to whoever owns the
/// session.
#[derive(Clone)]
pub struct KeystoneClient {
    rest: RestClient,
}

impl KeystoneClient {
    pub fn new(identity_url: impl Into<String>, http: &HttpClient) -> Self {
        Self { rest: RestClient::with_http(identity_url, http.single_attempt()) }
    }

    /// Client over a custom transport.
    pub fn with_transport(identity_url: impl Into<String>, transport: Arc<dyn Transport>) -> Self {
        Self { rest: RestClient::new(identity_url, transport) }
    }
}

#[async_trait]
impl IdentityProvider for KeystoneClient {
    #[instrument(skip_all, fields(secret = credential.secret().kind()))]
    async fn authenticate(&self, credential: &Credential) -> Result<AccessBody> {
        let request = RestRequest::post(TOKENS_PATH)
            .with_json(&credential.auth_request())?
            .expect_status([StatusCode::OK]);

        let response = self.rest.perform_request(request).await?;
        let access: AccessBody = response.deserialize_body()?;

        debug!(
            identity_url = %self.rest.base_url(),
            tenant_id = access.tenant_id(),
            "identity service issued token"
        );
        Ok(access)
    }
}
