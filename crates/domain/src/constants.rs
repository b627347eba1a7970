//! Domain constants
//!
//! Endpoints, header names and wire formats of the identity service.

/// Identity service for accounts homed in the US (and the default).
pub const US_IDENTITY_ENDPOINT: &str = "https://identity.api.rackspacecloud.com/v2.0";
/// Identity service for accounts homed in the UK.
pub const UK_IDENTITY_ENDPOINT: &str = "https://lon.identity.api.rackspacecloud.com/v2.0";
/// Region whose accounts authenticate against [`UK_IDENTITY_ENDPOINT`].
pub const UK_REGION: &str = "LON";

/// Path of the token issuing resource, relative to the identity endpoint.
pub const TOKENS_PATH: &str = "/tokens";
/// Header carrying the token on every authenticated request (`X-Auth-Token`).
///
/// Lowercase so it can build an `http::HeaderName` in const context.
pub const AUTH_TOKEN_HEADER: &str = "x-auth-token";
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Refresh this long before the token's reported expiry.
pub const DEFAULT_REFRESH_SKEW_SECS: i64 = 300;
/// Largest accepted refresh skew. Tokens are issued for at most a day.
pub const MAX_REFRESH_SKEW_SECS: i64 = 86_400;

/// Expiry with a numeric UTC offset, e.g. `2012-04-13T13:15:00.000-05:00`.
pub const OFFSET_EXPIRY_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f%:z";
/// Expiry with a literal zulu suffix, e.g. `2012-04-13T13:15:00.000Z`.
pub const ZULU_EXPIRY_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_USER_AGENT: &str = concat!("nimbus/", env!("CARGO_PKG_VERSION"));
