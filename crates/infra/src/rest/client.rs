//! REST client: middleware chain in front of a transport.

use std::sync::Arc;

use http::header::{HeaderValue, ACCEPT, CONTENT_TYPE};
use nimbus_core::{RequestMiddleware, RestRequest, RestResponse, Transport};
use nimbus_domain::constants::JSON_CONTENT_TYPE;
use nimbus_domain::{NimbusError, Result};
use tracing::{debug, instrument};

use super::transport::ReqwestTransport;
use crate::http::HttpClient;

/// Runs each request through its middlewares in order and hands the result
/// to the transport.
#[derive(Clone)]
pub struct RestClient {
    base_url: String,
    middlewares: Vec<Arc<dyn RequestMiddleware>>,
    transport: Arc<dyn Transport>,
}

impl RestClient {
    pub fn new(base_url: impl Into<String>, transport: Arc<dyn Transport>) -> Self {
        Self { base_url: base_url.into(), middlewares: Vec::new(), transport }
    }

    /// Client sending through reqwest.
    pub fn with_http(base_url: impl Into<String>, http: HttpClient) -> Self {
        Self::new(base_url, Arc::new(ReqwestTransport::new(http)))
    }

    /// Append a middleware; middlewares run in insertion order.
    #[must_use]
    pub fn with_middleware(mut self, middleware: Arc<dyn RequestMiddleware>) -> Self {
        self.middlewares.push(middleware);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Apply middlewares, default headers and the expected status check.
    ///
    /// # Errors
    ///
    /// The first middleware error (nothing is sent), any transport error, or
    /// [`NimbusError::UnexpectedStatus`] when the status is not one of the
    /// request's expected codes.
    #[instrument(skip(self, request), fields(method = %request.method, path = %request.path))]
    pub async fn perform_request(&self, mut request: RestRequest) -> Result<RestResponse> {
        for middleware in &self.middlewares {
            request = middleware.handle_request(request).await?;
        }

        if !request.headers.contains_key(ACCEPT) {
            request.headers.insert(ACCEPT, HeaderValue::from_static(JSON_CONTENT_TYPE));
        }
        if let Some(body) = &request.body {
            let content_type = HeaderValue::from_str(body.content_type()).map_err(|_| {
                NimbusError::InvalidInput(format!("invalid content type {:?}", body.content_type()))
            })?;
            request.headers.insert(CONTENT_TYPE, content_type);
        }

        let expected = request.expected_status.clone();
        let response = self.transport.perform(&self.base_url, request).await?;

        if !expected.is_empty() && !expected.contains(&response.status) {
            debug!(status = %response.status, "unexpected response status");
            return Err(NimbusError::UnexpectedStatus {
                status: response.status.as_u16(),
                body: response.text(),
            });
        }

        Ok(response)
    }
}
