//! Account credentials and the identity request body built from them.

use std::fmt;

use serde::Serialize;

use crate::errors::{NimbusError, Result};

/// The single secret a credential carries.
#[derive(Clone, PartialEq, Eq)]
pub enum Secret {
    Password(String),
    ApiKey(String),
}

impl Secret {
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Password(_) => "password",
            Self::ApiKey(_) => "api_key",
        }
    }

    fn is_blank(&self) -> bool {
        match self {
            Self::Password(value) | Self::ApiKey(value) => value.is_empty(),
        }
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Secret::{}(<redacted>)", self.kind())
    }
}

/// Username plus exactly one secret.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    username: String,
    secret: Secret,
}

impl Credential {
    pub fn password(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self { username: username.into(), secret: Secret::Password(password.into()) }
    }

    pub fn api_key(username: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self { username: username.into(), secret: Secret::ApiKey(api_key.into()) }
    }

    /// Build a credential from optional parts, treating empty strings as absent.
    ///
    /// # Errors
    ///
    /// Returns [`NimbusError::Credential`] when the username is empty or when
    /// not exactly one of `password` and `api_key` is present.
    pub fn from_parts(
        username: &str,
        password: Option<&str>,
        api_key: Option<&str>,
    ) -> Result<Self> {
        if username.trim().is_empty() {
            return Err(NimbusError::Credential("username is required".to_string()));
        }

        let password = password.filter(|p| !p.is_empty());
        let api_key = api_key.filter(|k| !k.is_empty());

        match (password, api_key) {
            (Some(password), None) => Ok(Self::password(username, password)),
            (None, Some(api_key)) => Ok(Self::api_key(username, api_key)),
            (None, None) => Err(NimbusError::Credential(
                "no password or API key supplied".to_string(),
            )),
            (Some(_), Some(_)) => Err(NimbusError::Credential(
                "supply exactly one of password and API key".to_string(),
            )),
        }
    }

    /// Check the credential can be sent to the identity service.
    ///
    /// # Errors
    ///
    /// Returns [`NimbusError::Credential`] for an empty username or secret.
    pub fn validate(&self) -> Result<()> {
        if self.username.trim().is_empty() {
            return Err(NimbusError::Credential("username is required".to_string()));
        }
        if self.secret.is_blank() {
            return Err(NimbusError::Credential(format!("{} is empty", self.secret.kind())));
        }
        Ok(())
    }

    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    #[must_use]
    pub fn secret(&self) -> &Secret {
        &self.secret
    }

    /// Body for `POST /tokens`.
    #[must_use]
    pub fn auth_request(&self) -> AuthRequest<'_> {
        let username = self.username.as_str();
        let auth = match &self.secret {
            Secret::Password(password) => AuthPayload::Password { username, password },
            Secret::ApiKey(api_key) => AuthPayload::ApiKey { username, api_key },
        };
        AuthRequest { auth }
    }
}

/// `{"auth": {...}}` envelope sent to the identity service.
#[derive(Serialize)]
pub struct AuthRequest<'a> {
    auth: AuthPayload<'a>,
}

#[derive(Serialize)]
enum AuthPayload<'a> {
    #[serde(rename = "passwordCredentials")]
    Password { username: &'a str, password: &'a str },
    #[serde(rename = "RAX-KSKEY:apiKeyCredentials")]
    ApiKey {
        username: &'a str,
        #[serde(rename = "apiKey")]
        api_key: &'a str,
    },
}
