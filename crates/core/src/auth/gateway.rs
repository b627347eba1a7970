//! Authenticating request gateway.
//!
//! Every request passes through [`AuthGateway::intercept`]. The gateway keeps
//! at most one [`Session`], refreshes it when `now + skew` reaches the token
//! expiry and never lets two refreshes overlap: the session lock is held for
//! the whole check/authenticate/install sequence, so callers that arrive while
//! a refresh is in flight wait for it and reuse its result.
//!
//! Failures go back to the caller unlogged and leave the cached session as it
//! was.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use http::header::{HeaderName, HeaderValue};
use nimbus_common::time::{Clock, SystemClock};
use nimbus_domain::constants::{
    AUTH_TOKEN_HEADER, DEFAULT_REFRESH_SKEW_SECS, OFFSET_EXPIRY_FORMAT, ZULU_EXPIRY_FORMAT,
};
use nimbus_domain::{
    AuthConfig, CatalogEntry, Credential, EntryEndpoint, NimbusError, Result, Role,
};
use tokio::sync::Mutex;
use tracing::debug;

use super::ports::IdentityProvider;
use super::session::Session;
use crate::rest::{RequestMiddleware, RestRequest};

/// Refresh policy handed to the gateway at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    /// Refresh this long before the reported expiry.
    pub refresh_skew: Duration,
    /// Expiry formats, tried in order.
    pub expiry_formats: Vec<String>,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            refresh_skew: Duration::seconds(DEFAULT_REFRESH_SKEW_SECS),
            expiry_formats: vec![OFFSET_EXPIRY_FORMAT.to_string(), ZULU_EXPIRY_FORMAT.to_string()],
        }
    }
}

impl TryFrom<&AuthConfig> for GatewayConfig {
    type Error = NimbusError;

    fn try_from(config: &AuthConfig) -> Result<Self> {
        config.validate()?;
        let refresh_skew = Duration::try_seconds(config.refresh_skew_seconds).ok_or_else(|| {
            NimbusError::Config(format!(
                "refresh_skew_seconds out of range: {}",
                config.refresh_skew_seconds
            ))
        })?;

        Ok(Self { refresh_skew, expiry_formats: config.expiry_formats.clone() })
    }
}

struct GatewayState {
    credential: Credential,
    session: Option<Session>,
    /// Set by the first successful authentication; locks the credential.
    authenticated_once: bool,
}

/// Token-caching middleware in front of a transport.
pub struct AuthGateway<P, C = SystemClock> {
    provider: P,
    clock: C,
    config: GatewayConfig,
    state: Mutex<GatewayState>,
}

impl<P: IdentityProvider> AuthGateway<P> {
    pub fn new(provider: P, credential: Credential, config: GatewayConfig) -> Self {
        Self::with_clock(provider, credential, config, SystemClock)
    }
}

impl<P: IdentityProvider, C: Clock> AuthGateway<P, C> {
    pub fn with_clock(
        provider: P,
        credential: Credential,
        config: GatewayConfig,
        clock: C,
    ) -> Self {
        Self {
            provider,
            clock,
            config,
            state: Mutex::new(GatewayState {
                credential,
                session: None,
                authenticated_once: false,
            }),
        }
    }

    /// Refresh if needed, then add the token header and prefix the path with
    /// `/<tenant id>`.
    ///
    /// # Errors
    ///
    /// Any refresh failure; the request is returned only on success.
    pub async fn intercept(&self, mut request: RestRequest) -> Result<RestRequest> {
        let (token, tenant_id) = self
            .with_fresh_session(|session| (session.token.clone(), session.tenant_id.clone()))
            .await?;

        request.headers.insert(HeaderName::from_static(AUTH_TOKEN_HEADER), token_header(&token)?);
        request.path = format!("/{tenant_id}{}", request.path);
        Ok(request)
    }

    /// Refresh if needed and return the current token.
    ///
    /// # Errors
    ///
    /// Any refresh failure.
    pub async fn fresh_token(&self) -> Result<String> {
        self.with_fresh_session(|session| session.token.clone()).await
    }

    /// Refresh if needed without sending anything.
    ///
    /// # Errors
    ///
    /// Any refresh failure.
    pub async fn authenticate(&self) -> Result<()> {
        self.with_fresh_session(|_| ()).await
    }

    pub async fn is_authenticated(&self) -> bool {
        self.state.lock().await.session.is_some()
    }

    /// Drop the cached session; the next call re-authenticates.
    pub async fn invalidate(&self) {
        self.state.lock().await.session = None;
    }

    /// Swap the credential. Only allowed before the first successful
    /// authentication.
    ///
    /// # Errors
    ///
    /// Returns [`NimbusError::CredentialLocked`] once a session was issued.
    pub async fn replace_credential(&self, credential: Credential) -> Result<()> {
        let mut state = self.state.lock().await;
        if state.authenticated_once {
            return Err(NimbusError::CredentialLocked);
        }
        state.credential = credential;
        Ok(())
    }

    pub async fn username(&self) -> String {
        self.state.lock().await.credential.username().to_string()
    }

    // Session accessors. None of these refresh.

    pub async fn session(&self) -> Result<Session> {
        self.read_session(Session::clone).await
    }

    pub async fn token(&self) -> Result<String> {
        self.read_session(|s| s.token.clone()).await
    }

    pub async fn tenant_id(&self) -> Result<String> {
        self.read_session(|s| s.tenant_id.clone()).await
    }

    pub async fn tenant_name(&self) -> Result<Option<String>> {
        self.read_session(|s| s.tenant_name.clone()).await
    }

    pub async fn expires_at(&self) -> Result<DateTime<Utc>> {
        self.read_session(|s| s.expires_at).await
    }

    pub async fn service_catalog(&self) -> Result<Vec<CatalogEntry>> {
        self.read_session(|s| s.access.access.service_catalog.clone()).await
    }

    pub async fn roles(&self) -> Result<Vec<Role>> {
        self.read_session(|s| s.access.access.user.roles.clone()).await
    }

    pub async fn default_region(&self) -> Result<String> {
        self.read_session(|s| s.access.access.user.default_region.clone()).await
    }

    /// Public endpoint of `service_type` in `region`, if the catalog has one.
    pub async fn endpoint(
        &self,
        service_type: &str,
        region: &str,
    ) -> Result<Option<EntryEndpoint>> {
        self.read_session(|s| s.access.endpoint(service_type, region).cloned()).await
    }

    async fn read_session<T>(&self, read: impl FnOnce(&Session) -> T) -> Result<T> {
        let state = self.state.lock().await;
        state.session.as_ref().map(read).ok_or(NimbusError::NotAuthenticated)
    }

    async fn with_fresh_session<T>(&self, read: impl FnOnce(&Session) -> T) -> Result<T> {
        let mut state = self.state.lock().await;

        let now = self.clock.now();
        let stale = state
            .session
            .as_ref()
            .map_or(true, |session| session.is_stale(now, self.config.refresh_skew));

        if stale {
            state.credential.validate()?;
            let access = self.provider.authenticate(&state.credential).await?;
            let session = Session::from_access(access, &self.config.expiry_formats)?;

            debug!(
                tenant_id = %session.tenant_id,
                expires_at = %session.expires_at,
                "identity session refreshed"
            );

            state.session = Some(session);
            state.authenticated_once = true;
        }

        state.session.as_ref().map(read).ok_or(NimbusError::NotAuthenticated)
    }
}

#[async_trait]
impl<P: IdentityProvider, C: Clock> RequestMiddleware for AuthGateway<P, C> {
    async fn handle_request(&self, request: RestRequest) -> Result<RestRequest> {
        self.intercept(request).await
    }
}

pub(crate) fn token_header(token: &str) -> Result<HeaderValue> {
    let mut value = HeaderValue::from_str(token)
        .map_err(|_| NimbusError::InvalidInput("token is not a valid header value".to_string()))?;
    value.set_sensitive(true);
    Ok(value)
}
