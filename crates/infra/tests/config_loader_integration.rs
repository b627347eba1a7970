//! Integration tests for configuration loader
//!
//! Tests the end-to-end behavior of loading configuration from files.

use std::io::Write;

use nimbus_domain::constants::{UK_IDENTITY_ENDPOINT, US_IDENTITY_ENDPOINT};
use nimbus_domain::Secret;
use nimbus_infra::config;
use tempfile::NamedTempFile;

fn write_with_extension(contents: &str, extension: &str) -> std::path::PathBuf {
    let mut temp_file = NamedTempFile::new().expect("Failed to create temp file");
    temp_file.write_all(contents.as_bytes()).expect("Failed to write to temp file");

    let path = temp_file.path().with_extension(extension);
    std::fs::copy(temp_file.path(), &path).expect("Failed to copy file");
    path
}

#[test]
fn test_load_config_from_json_file() {
    let path = write_with_extension(
        r#"{
            "identity": {
                "username": "joe_user",
                "api_key": "0123abcd",
                "region": "LON"
            },
            "auth": {
                "refresh_skew_seconds": 600,
                "expiry_formats": ["%Y-%m-%dT%H:%M:%S%.3fZ"]
            },
            "http": { "timeout_seconds": 15, "max_attempts": 4, "user_agent": "ops-tool/1.0" }
        }"#,
        "json",
    );

    let config = config::load_from_file(Some(path.clone())).expect("JSON config");

    assert_eq!(config.identity.resolved_endpoint(), UK_IDENTITY_ENDPOINT);
    let credential = config.identity.credential().expect("credential");
    assert_eq!(credential.secret(), &Secret::ApiKey("0123abcd".to_string()));
    assert_eq!(config.auth.refresh_skew_seconds, 600);
    assert_eq!(config.auth.expiry_formats, vec!["%Y-%m-%dT%H:%M:%S%.3fZ".to_string()]);
    assert_eq!(config.http.user_agent.as_deref(), Some("ops-tool/1.0"));

    std::fs::remove_file(path).ok();
}

#[test]
fn test_load_config_from_toml_file() {
    let path = write_with_extension(
        r#"
[identity]
username = "joe_user"
password = "secret"
"#,
        "toml",
    );

    let config = config::load_from_file(Some(path.clone())).expect("TOML config");

    assert_eq!(config.identity.resolved_endpoint(), US_IDENTITY_ENDPOINT);
    assert_eq!(config.auth.refresh_skew_seconds, 300);
    assert_eq!(config.http.max_attempts, 1);

    std::fs::remove_file(path).ok();
}

#[test]
fn test_config_with_both_secrets_is_rejected_at_credential_time() {
    let path = write_with_extension(
        r#"
[identity]
username = "joe_user"
password = "secret"
api_key = "0123abcd"
"#,
        "toml",
    );

    let config = config::load_from_file(Some(path.clone())).expect("TOML config");
    assert!(config.identity.credential().is_err());

    std::fs::remove_file(path).ok();
}
