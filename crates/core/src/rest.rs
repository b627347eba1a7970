//! Logical REST request/response model and the ports a client is built from.
//!
//! A [`RestRequest`] carries a path relative to some base URL. Middlewares
//! rewrite it in order, then a [`Transport`] puts it on the wire and hands
//! back a [`RestResponse`].

use async_trait::async_trait;
use bytes::Bytes;
use http::header::{HeaderName, HeaderValue, CONTENT_TYPE};
use http::{HeaderMap, Method, StatusCode};
use nimbus_domain::constants::JSON_CONTENT_TYPE;
use nimbus_domain::{NimbusError, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Request payload, encoded when the request is sent.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Json(serde_json::Value),
}

impl RequestBody {
    /// Capture any serializable value as a JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`NimbusError::Parse`] if the value cannot be represented as JSON.
    pub fn json<T: Serialize + ?Sized>(value: &T) -> Result<Self> {
        serde_json::to_value(value)
            .map(Self::Json)
            .map_err(|e| NimbusError::Parse(format!("failed to encode request body: {e}")))
    }

    #[must_use]
    pub fn content_type(&self) -> &str {
        match self {
            Self::Json(_) => JSON_CONTENT_TYPE,
        }
    }

    /// Wire bytes of the body.
    ///
    /// # Errors
    ///
    /// Returns [`NimbusError::Parse`] if JSON encoding fails.
    pub fn to_bytes(&self) -> Result<Bytes> {
        match self {
            Self::Json(value) => serde_json::to_vec(value)
                .map(Bytes::from)
                .map_err(|e| NimbusError::Parse(format!("failed to encode request body: {e}"))),
        }
    }
}

/// A request relative to a client's base URL.
#[derive(Debug, Clone)]
pub struct RestRequest {
    pub method: Method,
    /// Path relative to the base URL, starting with `/`.
    pub path: String,
    pub headers: HeaderMap,
    pub body: Option<RequestBody>,
    /// When non-empty, any other status is reported as an error.
    pub expected_status: Vec<StatusCode>,
}

impl RestRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            headers: HeaderMap::new(),
            body: None,
            expected_status: Vec::new(),
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Attach a JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`NimbusError::Parse`] if the value cannot be represented as JSON.
    pub fn with_json<T: Serialize + ?Sized>(mut self, value: &T) -> Result<Self> {
        self.body = Some(RequestBody::json(value)?);
        Ok(self)
    }

    /// Add a header, replacing any previous value under the same name.
    ///
    /// # Errors
    ///
    /// Returns [`NimbusError::InvalidInput`] for an invalid name or value.
    pub fn with_header(mut self, name: &str, value: &str) -> Result<Self> {
        let name = HeaderName::try_from(name)
            .map_err(|e| NimbusError::InvalidInput(format!("invalid header name {name:?}: {e}")))?;
        let value = HeaderValue::from_str(value)
            .map_err(|e| NimbusError::InvalidInput(format!("invalid value for {name}: {e}")))?;
        self.headers.insert(name, value);
        Ok(self)
    }

    #[must_use]
    pub fn expect_status(mut self, codes: impl IntoIterator<Item = StatusCode>) -> Self {
        self.expected_status.extend(codes);
        self
    }

    /// Whether `status` satisfies the expected status list.
    #[must_use]
    pub fn accepts(&self, status: StatusCode) -> bool {
        self.expected_status.is_empty() || self.expected_status.contains(&status)
    }
}

/// A completed HTTP exchange.
#[derive(Debug, Clone)]
pub struct RestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl RestResponse {
    pub fn new(status: StatusCode, headers: HeaderMap, body: impl Into<Bytes>) -> Self {
        Self { status, headers, body: body.into() }
    }

    /// Media type without parameters, e.g. `application/json`.
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.headers
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.split(';').next())
            .map(str::trim)
    }

    #[must_use]
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Decode a JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`NimbusError::Parse`] when the content type is not
    /// `application/json` or the body does not decode into `T`.
    pub fn deserialize_body<T: DeserializeOwned>(&self) -> Result<T> {
        match self.content_type() {
            Some(media) if media.eq_ignore_ascii_case(JSON_CONTENT_TYPE) => {}
            other => {
                return Err(NimbusError::Parse(format!(
                    "unsupported content type: {}",
                    other.unwrap_or("<none>")
                )))
            }
        }

        serde_json::from_slice(&self.body)
            .map_err(|e| NimbusError::Parse(format!("invalid JSON response body: {e}")))
    }
}

/// Rewrites a request before it is sent. The first error aborts the call.
#[async_trait]
pub trait RequestMiddleware: Send + Sync {
    async fn handle_request(&self, request: RestRequest) -> Result<RestRequest>;
}

/// Puts a request on the wire.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn perform(&self, base_url: &str, request: RestRequest) -> Result<RestResponse>;
}

#[async_trait]
impl<M: RequestMiddleware + ?Sized> RequestMiddleware for std::sync::Arc<M> {
    async fn handle_request(&self, request: RestRequest) -> Result<RestRequest> {
        (**self).handle_request(request).await
    }
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for std::sync::Arc<T> {
    async fn perform(&self, base_url: &str, request: RestRequest) -> Result<RestResponse> {
        (**self).perform(base_url, request).await
    }
}
