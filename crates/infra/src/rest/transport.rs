//! [`Transport`] implementation over [`HttpClient`].

use async_trait::async_trait;
use nimbus_core::{RestRequest, RestResponse, Transport};
use nimbus_domain::{NimbusError, Result};
use url::Url;

use crate::errors::InfraError;
use crate::http::HttpClient;

/// Sends requests with reqwest, joining `base_url` and the request path.
#[derive(Clone)]
pub struct ReqwestTransport {
    http: HttpClient,
}

impl ReqwestTransport {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn perform(&self, base_url: &str, request: RestRequest) -> Result<RestResponse> {
        let url = join_url(base_url, &request.path)?;

        let mut builder = self.http.request(request.method, url).headers(request.headers);
        if let Some(body) = &request.body {
            builder = builder.body(body.to_bytes()?);
        }

        let response = self.http.send(builder).await?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await.map_err(|e| NimbusError::from(InfraError::from(e)))?;

        Ok(RestResponse::new(status, headers, body))
    }
}

/// `base_url` without trailing slashes, followed by `path` verbatim.
pub(crate) fn join_url(base_url: &str, path: &str) -> Result<Url> {
    let joined = format!("{}{}", base_url.trim_end_matches('/'), path);
    Url::parse(&joined).map_err(|e| InfraError::from(e).into())
}
