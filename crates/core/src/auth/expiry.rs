//! Token expiry timestamp parsing

use chrono::{DateTime, NaiveDateTime, Utc};
use nimbus_domain::{NimbusError, Result};

/// Parse an expiry timestamp, trying each chrono format in order.
///
/// A format that carries an offset (`%z`, `%:z`) is honoured; a format without
/// one is read as UTC.
///
/// # Errors
///
/// Returns [`NimbusError::ExpiryParse`] when no format matches.
pub fn parse_expiry<S: AsRef<str>>(value: &str, formats: &[S]) -> Result<DateTime<Utc>> {
    formats
        .iter()
        .find_map(|format| parse_with(value, format.as_ref()))
        .ok_or_else(|| NimbusError::ExpiryParse(value.to_string()))
}

fn parse_with(value: &str, format: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_str(value, format) {
        return Some(parsed.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(value, format).ok().map(|naive| naive.and_utc())
}
