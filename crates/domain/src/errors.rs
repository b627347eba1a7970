//! Error types used throughout the workspace

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for Nimbus
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum NimbusError {
    /// Neither (or both) of password and API key were supplied.
    #[error("Credential error: {0}")]
    Credential(String),

    #[error("Credentials cannot be replaced after the first successful authentication")]
    CredentialLocked,

    #[error("Network error: {0}")]
    Network(String),

    /// The server answered with a status code the caller did not expect.
    #[error("Unexpected HTTP status code: {status}")]
    UnexpectedStatus { status: u16, body: String },

    /// Response body was not valid JSON or had an unsupported content type.
    #[error("Parse error: {0}")]
    Parse(String),

    /// The identity service reported an expiry in none of the known formats.
    #[error("Cannot parse token expiration: {0}")]
    ExpiryParse(String),

    #[error("Not authenticated")]
    NotAuthenticated,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for Nimbus operations
pub type Result<T> = std::result::Result<T, NimbusError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expiry_error_message_is_distinct() {
        let err = NimbusError::ExpiryParse("not-a-date".to_string());
        assert_eq!(err.to_string(), "Cannot parse token expiration: not-a-date");
    }

    #[test]
    fn test_unexpected_status_message_omits_body() {
        let err = NimbusError::UnexpectedStatus { status: 401, body: "denied".into() };
        assert_eq!(err.to_string(), "Unexpected HTTP status code: 401");
    }

    #[test]
    fn test_error_serializes_tagged() {
        let json = serde_json::to_value(NimbusError::Network("refused".into())).unwrap();
        assert_eq!(json, serde_json::json!({ "type": "Network", "message": "refused" }));

        let back: NimbusError = serde_json::from_value(json).unwrap();
        assert_eq!(back, NimbusError::Network("refused".into()));
    }
}
