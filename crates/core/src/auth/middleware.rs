//! Token-only request stamping for services whose catalog URL already
//! contains the tenant.

use std::sync::Arc;

use async_trait::async_trait;
use http::header::HeaderName;
use nimbus_common::time::Clock;
use nimbus_domain::constants::AUTH_TOKEN_HEADER;
use nimbus_domain::Result;

use super::gateway::{token_header, AuthGateway};
use super::ports::IdentityProvider;
use crate::rest::{RequestMiddleware, RestRequest};

/// Adds the gateway's token header and leaves the path alone.
pub struct TokenOnly<P, C> {
    gateway: Arc<AuthGateway<P, C>>,
}

impl<P, C> TokenOnly<P, C> {
    pub fn new(gateway: Arc<AuthGateway<P, C>>) -> Self {
        Self { gateway }
    }
}

impl<P, C> Clone for TokenOnly<P, C> {
    fn clone(&self) -> Self {
        Self { gateway: Arc::clone(&self.gateway) }
    }
}

#[async_trait]
impl<P: IdentityProvider, C: Clock> RequestMiddleware for TokenOnly<P, C> {
    async fn handle_request(&self, mut request: RestRequest) -> Result<RestRequest> {
        let token = self.gateway.fresh_token().await?;
        request.headers.insert(HeaderName::from_static(AUTH_TOKEN_HEADER), token_header(&token)?);
        Ok(request)
    }
}
