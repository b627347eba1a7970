//! Authenticated JSON service client
//!
//! Thin typed layer over [`RestClient`]: every call goes through the gateway
//! (or [`TokenOnly`]) and decodes JSON responses.

use std::sync::Arc;

use http::{Method, StatusCode};
use nimbus_common::time::Clock;
use nimbus_core::{AuthGateway, IdentityProvider, RestRequest, RestResponse, TokenOnly};
use nimbus_domain::{NimbusError, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, instrument};

use crate::http::HttpClient;
use crate::rest::RestClient;

const GET_OK: [StatusCode; 1] = [StatusCode::OK];
const WRITE_OK: [StatusCode; 3] = [StatusCode::OK, StatusCode::CREATED, StatusCode::ACCEPTED];
const PUT_OK: [StatusCode; 4] =
    [StatusCode::OK, StatusCode::CREATED, StatusCode::ACCEPTED, StatusCode::NO_CONTENT];
const DELETE_OK: [StatusCode; 3] = [StatusCode::OK, StatusCode::ACCEPTED, StatusCode::NO_CONTENT];

/// JSON client for one service base URL.
#[derive(Clone)]
pub struct ServiceClient {
    rest: RestClient,
}

impl ServiceClient {
    pub fn new(rest: RestClient) -> Self {
        Self { rest }
    }

    /// Client whose paths are prefixed with the tenant id by the gateway,
    /// e.g. `https://monitoring.api.rackspacecloud.com/v1.0`.
    pub fn tenant_scoped<P, C>(
        base_url: impl Into<String>,
        gateway: Arc<AuthGateway<P, C>>,
        http: HttpClient,
    ) -> Self
    where
        P: IdentityProvider + 'static,
        C: Clock + 'static,
    {
        Self::new(RestClient::with_http(base_url, http).with_middleware(gateway))
    }

    /// Client for a URL that already embeds the tenant; only the token
    /// header is added.
    pub fn token_only<P, C>(
        base_url: impl Into<String>,
        gateway: Arc<AuthGateway<P, C>>,
        http: HttpClient,
    ) -> Self
    where
        P: IdentityProvider + 'static,
        C: Clock + 'static,
    {
        let middleware = Arc::new(TokenOnly::new(gateway));
        Self::new(RestClient::with_http(base_url, http).with_middleware(middleware))
    }

    /// Client for the catalog's public endpoint of `service_type` in `region`.
    ///
    /// # Errors
    ///
    /// Authentication failures, or [`NimbusError::InvalidInput`] if the
    /// catalog has no such endpoint.
    pub async fn from_catalog<P, C>(
        gateway: Arc<AuthGateway<P, C>>,
        service_type: &str,
        region: &str,
        http: HttpClient,
    ) -> Result<Self>
    where
        P: IdentityProvider + 'static,
        C: Clock + 'static,
    {
        gateway.authenticate().await?;
        let endpoint = gateway.endpoint(service_type, region).await?.ok_or_else(|| {
            NimbusError::InvalidInput(format!(
                "service catalog has no {service_type} endpoint in region {region}"
            ))
        })?;

        debug!(service_type, region, url = %endpoint.public_url, "resolved catalog endpoint");
        Ok(Self::token_only(endpoint.public_url, gateway, http))
    }

    pub fn base_url(&self) -> &str {
        self.rest.base_url()
    }

    /// Send a request as-is and return the raw response.
    ///
    /// # Errors
    ///
    /// Authentication, transport or expected-status failures.
    pub async fn send(&self, request: RestRequest) -> Result<RestResponse> {
        self.rest.perform_request(request).await
    }

    /// # Errors
    ///
    /// Non-200 statuses, transport failures and undecodable bodies.
    #[instrument(skip(self), fields(path = %path))]
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self.send(RestRequest::get(path).expect_status(GET_OK)).await?;
        decode(&response)
    }

    /// # Errors
    ///
    /// Statuses other than 200/201/202, transport failures and undecodable
    /// bodies.
    #[instrument(skip(self, body), fields(path = %path))]
    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let request = RestRequest::post(path).with_json(body)?.expect_status(WRITE_OK);
        decode(&self.send(request).await?)
    }

    /// # Errors
    ///
    /// Statuses other than 200/201/202/204, transport failures and
    /// undecodable bodies.
    #[instrument(skip(self, body), fields(path = %path))]
    pub async fn put<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let request = RestRequest::put(path).with_json(body)?.expect_status(PUT_OK);
        decode(&self.send(request).await?)
    }

    /// # Errors
    ///
    /// Statuses other than 200/202/204 and transport failures.
    #[instrument(skip(self), fields(path = %path))]
    pub async fn delete(&self, path: &str) -> Result<()> {
        self.send(RestRequest::new(Method::DELETE, path).expect_status(DELETE_OK)).await?;
        Ok(())
    }
}

/// Decode a JSON body; empty and 204/205 bodies decode from `null`.
fn decode<T: DeserializeOwned>(response: &RestResponse) -> Result<T> {
    let empty = response.body.is_empty()
        || response.status == StatusCode::NO_CONTENT
        || response.status == StatusCode::RESET_CONTENT;

    if empty {
        return serde_json::from_value(serde_json::Value::Null).map_err(|_| {
            NimbusError::Parse(format!(
                "empty response ({}) cannot be decoded into the requested type",
                response.status.as_u16()
            ))
        });
    }

    response.deserialize_body()
}
