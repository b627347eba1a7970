//! Configuration loader
//!
//! Loads application configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If `NIMBUS_USERNAME` is missing or a value is invalid, falls back to a
//!    file
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! - `NIMBUS_USERNAME`: Account name (required)
//! - `NIMBUS_PASSWORD`: Account password
//! - `NIMBUS_API_KEY`: Account API key
//! - `NIMBUS_IDENTITY_URL`: Identity service base URL override
//! - `NIMBUS_REGION`: Account region (`LON` selects the UK identity service)
//! - `NIMBUS_REFRESH_SKEW_SECS`: Refresh margin before token expiry
//! - `NIMBUS_HTTP_TIMEOUT_SECS`: Per-request timeout
//! - `NIMBUS_HTTP_MAX_ATTEMPTS`: Attempts for non-identity requests
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./nimbus.{json,toml}` and `./config.{json,toml}` (current directory)
//! 2. `../nimbus.{json,toml}` and `../../nimbus.{json,toml}`
//! 3. The same names next to the executable

use std::path::{Path, PathBuf};
use std::str::FromStr;

use nimbus_domain::{Config, NimbusError, Result};

const CONFIG_FILE_NAMES: [&str; 4] = ["nimbus.json", "nimbus.toml", "config.json", "config.toml"];
const PARENT_FILE_NAMES: [&str; 4] =
    ["../nimbus.json", "../nimbus.toml", "../../nimbus.json", "../../nimbus.toml"];

/// Load configuration with automatic fallback strategy
///
/// First attempts to load from environment variables. If the required
/// username is missing, falls back to loading from a config file.
///
/// # Errors
/// Returns `NimbusError::Config` if:
/// - Configuration cannot be loaded from either source
/// - File format is invalid
pub fn load() -> Result<Config> {
    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = %e, "Failed to load from environment, trying file");
            load_from_file(None)
        }
    }
}

/// Load configuration from environment variables
///
/// Only `NIMBUS_USERNAME` is required; everything else falls back to the
/// defaults of [`Config`].
///
/// # Errors
/// Returns `NimbusError::Config` if the username is missing, a numeric
/// variable does not parse or the refresh skew is out of range.
pub fn load_from_env() -> Result<Config> {
    let mut config = Config::default();

    config.identity.username = env_var("NIMBUS_USERNAME")?;
    config.identity.password = env_opt("NIMBUS_PASSWORD");
    config.identity.api_key = env_opt("NIMBUS_API_KEY");
    config.identity.endpoint = env_opt("NIMBUS_IDENTITY_URL");
    config.identity.region = env_opt("NIMBUS_REGION");

    if let Some(skew) = env_parse("NIMBUS_REFRESH_SKEW_SECS")? {
        config.auth.refresh_skew_seconds = skew;
    }
    if let Some(timeout) = env_parse("NIMBUS_HTTP_TIMEOUT_SECS")? {
        config.http.timeout_seconds = timeout;
    }
    if let Some(attempts) = env_parse("NIMBUS_HTTP_MAX_ATTEMPTS")? {
        config.http.max_attempts = attempts;
    }

    config.validate()?;
    Ok(config)
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `NimbusError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
/// - A value is out of range
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(NimbusError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            NimbusError::Config("No config file found in any of the standard locations".to_string())
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| NimbusError::Config(format!("Failed to read config file: {e}")))?;

    let config = parse_config(&contents, &config_path)?;
    config.validate()?;
    Ok(config)
}

/// Parse configuration, detecting the format by file extension.
fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| NimbusError::Config(format!("Invalid TOML format: {e}"))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| NimbusError::Config(format!("Invalid JSON format: {e}"))),
        _ => Err(NimbusError::Config(format!("Unsupported config format: {extension}"))),
    }
}

/// Probe the standard locations for a configuration file
///
/// Returns the first existing candidate, or `None`.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut candidates = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        candidates.extend(CONFIG_FILE_NAMES.iter().map(|name| cwd.join(name)));
        candidates.extend(PARENT_FILE_NAMES.iter().map(|name| cwd.join(name)));
    }

    let exe_dir = std::env::current_exe().ok().and_then(|p| p.parent().map(Path::to_path_buf));
    if let Some(exe_dir) = exe_dir {
        candidates.extend(CONFIG_FILE_NAMES.iter().map(|name| exe_dir.join(name)));
    }

    candidates.into_iter().find(|path| path.is_file())
}

/// Get required environment variable
fn env_var(key: &str) -> Result<String> {
    env_opt(key)
        .ok_or_else(|| NimbusError::Config(format!("Missing required environment variable: {key}")))
}

/// Non-empty environment variable, if set.
fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.trim().is_empty())
}

/// Parse an optional environment variable.
fn env_parse<T>(key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    env_opt(key)
        .map(|raw| {
            raw.trim()
                .parse::<T>()
                .map_err(|e| NimbusError::Config(format!("Invalid value for {key}: {e}")))
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::Mutex;

    use nimbus_domain::constants::UK_IDENTITY_ENDPOINT;
    use once_cell::sync::Lazy;
    use tempfile::NamedTempFile;

    use super::*;

    static ENV_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

    const ALL_VARS: [&str; 8] = [
        "NIMBUS_USERNAME",
        "NIMBUS_PASSWORD",
        "NIMBUS_API_KEY",
        "NIMBUS_IDENTITY_URL",
        "NIMBUS_REGION",
        "NIMBUS_REFRESH_SKEW_SECS",
        "NIMBUS_HTTP_TIMEOUT_SECS",
        "NIMBUS_HTTP_MAX_ATTEMPTS",
    ];

    fn clear_env() {
        for key in ALL_VARS {
            std::env::remove_var(key);
        }
    }

    fn write_temp(contents: &str, extension: &str) -> PathBuf {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(contents.as_bytes()).unwrap();
        let path = temp_file.path().with_extension(extension);
        std::fs::copy(temp_file.path(), &path).unwrap();
        path
    }

    #[test]
    fn test_load_from_env_all_vars_set() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        std::env::set_var("NIMBUS_USERNAME", "joe_user");
        std::env::set_var("NIMBUS_API_KEY", "0123abcd");
        std::env::set_var("NIMBUS_REGION", "LON");
        std::env::set_var("NIMBUS_REFRESH_SKEW_SECS", "120");
        std::env::set_var("NIMBUS_HTTP_TIMEOUT_SECS", "10");
        std::env::set_var("NIMBUS_HTTP_MAX_ATTEMPTS", "3");

        let result = load_from_env();
        clear_env();

        let config = result.expect("config from env");
        assert_eq!(config.identity.username, "joe_user");
        assert_eq!(config.identity.api_key.as_deref(), Some("0123abcd"));
        assert_eq!(config.identity.password, None);
        assert_eq!(config.identity.resolved_endpoint(), UK_IDENTITY_ENDPOINT);
        assert_eq!(config.auth.refresh_skew_seconds, 120);
        assert_eq!(config.http.timeout_seconds, 10);
        assert_eq!(config.http.max_attempts, 3);
    }

    #[test]
    fn test_load_from_env_missing_username() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        let err = load_from_env().unwrap_err();
        assert!(matches!(err, NimbusError::Config(msg) if msg.contains("NIMBUS_USERNAME")));
    }

    #[test]
    fn test_load_from_env_invalid_number() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        std::env::set_var("NIMBUS_USERNAME", "joe_user");
        std::env::set_var("NIMBUS_HTTP_TIMEOUT_SECS", "soon");

        let result = load_from_env();
        clear_env();

        assert!(matches!(
            result,
            Err(NimbusError::Config(msg)) if msg.contains("NIMBUS_HTTP_TIMEOUT_SECS")
        ));
    }

    #[test]
    fn test_load_from_env_rejects_out_of_range_skew() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");

        for raw in ["9000000000000", "-5"] {
            clear_env();
            std::env::set_var("NIMBUS_USERNAME", "joe_user");
            std::env::set_var("NIMBUS_REFRESH_SKEW_SECS", raw);

            let result = load_from_env();
            clear_env();

            assert!(
                matches!(&result, Err(NimbusError::Config(msg)) if msg.contains("refresh_skew")),
                "{raw}: {result:?}"
            );
        }
    }

    #[test]
    fn test_load_from_file_rejects_negative_skew() {
        let path = write_temp(
            r#"{
                "identity": { "username": "joe_user" },
                "auth": { "refresh_skew_seconds": -60 }
            }"#,
            "json",
        );

        let err = load_from_file(Some(path.clone())).unwrap_err();
        assert!(matches!(err, NimbusError::Config(msg) if msg.contains("refresh_skew")));

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_load_from_file_json() {
        let path = write_temp(
            r#"{
                "identity": { "username": "joe_user", "password": "secret", "region": "DFW" },
                "auth": { "refresh_skew_seconds": 60 }
            }"#,
            "json",
        );

        let config = load_from_file(Some(path.clone())).expect("config from JSON");
        assert_eq!(config.identity.username, "joe_user");
        assert_eq!(config.identity.password.as_deref(), Some("secret"));
        assert_eq!(config.auth.refresh_skew_seconds, 60);
        assert_eq!(config.auth.expiry_formats.len(), 2);

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_load_from_file_toml() {
        let path = write_temp(
            r#"
[identity]
username = "joe_user"
api_key = "0123abcd"
endpoint = "http://127.0.0.1:5000/v2.0"

[http]
timeout_seconds = 5
max_attempts = 2
"#,
            "toml",
        );

        let config = load_from_file(Some(path.clone())).expect("config from TOML");
        assert_eq!(config.identity.resolved_endpoint(), "http://127.0.0.1:5000/v2.0");
        assert_eq!(config.http.timeout_seconds, 5);
        assert_eq!(config.http.max_attempts, 2);
        assert!(config.identity.credential().is_ok());

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_load_from_file_not_found() {
        let err = load_from_file(Some(PathBuf::from("/nonexistent/nimbus.json"))).unwrap_err();
        assert!(matches!(err, NimbusError::Config(_)));
    }

    #[test]
    fn test_load_from_file_invalid_json() {
        let path = write_temp(r#"{ "identity": "#, "json");

        let err = load_from_file(Some(path.clone())).unwrap_err();
        assert!(matches!(err, NimbusError::Config(msg) if msg.starts_with("Invalid JSON")));

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_parse_config_unsupported_format() {
        let result = parse_config("identity: {}", &PathBuf::from("nimbus.yaml"));
        assert!(matches!(result, Err(NimbusError::Config(msg)) if msg.contains("yaml")));
    }
}
