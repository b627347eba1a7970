//! Configuration management

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_HTTP_TIMEOUT_SECS, DEFAULT_REFRESH_SKEW_SECS, MAX_REFRESH_SKEW_SECS,
    OFFSET_EXPIRY_FORMAT, UK_IDENTITY_ENDPOINT, UK_REGION, US_IDENTITY_ENDPOINT,
    ZULU_EXPIRY_FORMAT,
};
use crate::errors::{NimbusError, Result};
use crate::types::Credential;

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub identity: IdentityConfig,
    pub auth: AuthConfig,
    pub http: HttpConfig,
}

impl Config {
    /// Check values that deserialize fine but cannot be used.
    ///
    /// # Errors
    ///
    /// Returns [`NimbusError::Config`] for an out-of-range refresh skew.
    pub fn validate(&self) -> Result<()> {
        self.auth.validate()
    }
}

/// Identity service account and endpoint selection
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IdentityConfig {
    /// Explicit identity base URL; overrides the region-derived default.
    pub endpoint: Option<String>,
    pub region: Option<String>,
    pub username: String,
    #[serde(skip_serializing)]
    pub password: Option<String>,
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
}

impl IdentityConfig {
    /// Identity base URL: explicit endpoint, else UK for `LON`, else US.
    #[must_use]
    pub fn resolved_endpoint(&self) -> String {
        if let Some(endpoint) = self.endpoint.as_deref().filter(|e| !e.trim().is_empty()) {
            return endpoint.trim_end_matches('/').to_string();
        }

        match self.region.as_deref() {
            Some(region) if region.eq_ignore_ascii_case(UK_REGION) => UK_IDENTITY_ENDPOINT,
            _ => US_IDENTITY_ENDPOINT,
        }
        .to_string()
    }

    /// Build the credential; fails when neither or both secrets are set.
    pub fn credential(&self) -> Result<Credential> {
        Credential::from_parts(&self.username, self.password.as_deref(), self.api_key.as_deref())
    }
}

impl fmt::Debug for IdentityConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IdentityConfig")
            .field("endpoint", &self.endpoint)
            .field("region", &self.region)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Token refresh policy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    pub refresh_skew_seconds: i64,
    /// chrono format strings tried in order when parsing token expiry.
    pub expiry_formats: Vec<String>,
}

impl AuthConfig {
    /// # Errors
    ///
    /// Returns [`NimbusError::Config`] unless
    /// `0 <= refresh_skew_seconds <= MAX_REFRESH_SKEW_SECS`.
    pub fn validate(&self) -> Result<()> {
        if (0..=MAX_REFRESH_SKEW_SECS).contains(&self.refresh_skew_seconds) {
            Ok(())
        } else {
            Err(NimbusError::Config(format!(
                "refresh_skew_seconds must be between 0 and {MAX_REFRESH_SKEW_SECS}, got {}",
                self.refresh_skew_seconds
            )))
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            refresh_skew_seconds: DEFAULT_REFRESH_SKEW_SECS,
            expiry_formats: vec![OFFSET_EXPIRY_FORMAT.to_string(), ZULU_EXPIRY_FORMAT.to_string()],
        }
    }
}

/// HTTP transport settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub timeout_seconds: u64,
    pub max_attempts: usize,
    pub user_agent: Option<String>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self { timeout_seconds: DEFAULT_HTTP_TIMEOUT_SECS, max_attempts: 1, user_agent: None }
    }
}
