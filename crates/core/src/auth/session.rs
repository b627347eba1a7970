//! Cached result of a successful authentication

use chrono::{DateTime, Duration, Utc};
use nimbus_domain::{AccessBody, Result};

use super::expiry::parse_expiry;

/// Token, tenant and expiry issued by the identity service, plus the
/// catalog and user record returned alongside them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    /// Empty when the service did not report a tenant.
    pub tenant_id: String,
    pub tenant_name: Option<String>,
    pub expires_at: DateTime<Utc>,
    pub access: AccessBody,
}

impl Session {
    /// Build a session from an identity response.
    ///
    /// # Errors
    ///
    /// Returns `ExpiryParse` if the expiry matches none of `formats`.
    pub fn from_access<S: AsRef<str>>(access: AccessBody, formats: &[S]) -> Result<Self> {
        let expires_at = parse_expiry(&access.access.token.expires, formats)?;
        let tenant = access.access.token.tenant.as_ref();

        Ok(Self {
            token: access.access.token.id.clone(),
            tenant_id: tenant.map(|t| t.id.clone()).unwrap_or_default(),
            tenant_name: tenant.map(|t| t.name.clone()).filter(|name| !name.is_empty()),
            expires_at,
            access,
        })
    }

    /// True once `now + skew` reaches the expiry. A sum past the end of the
    /// calendar counts as stale.
    #[must_use]
    pub fn is_stale(&self, now: DateTime<Utc>, skew: Duration) -> bool {
        now.checked_add_signed(skew).map_or(true, |deadline| deadline >= self.expires_at)
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use nimbus_domain::constants::{OFFSET_EXPIRY_FORMAT, ZULU_EXPIRY_FORMAT};
    use nimbus_domain::{Access, Tenant, Token, User};

    use super::*;

    fn access(expires: &str, tenant: Option<Tenant>) -> AccessBody {
        AccessBody {
            access: Access {
                token: Token {
                    id: "aaaaa-bbbbb-ccccc-dddd".into(),
                    expires: expires.into(),
                    tenant,
                },
                service_catalog: Vec::new(),
                user: User::default(),
            },
        }
    }

    #[test]
    fn test_from_access_extracts_tenant() {
        let tenant = Tenant { id: "12345".into(), name: "Opaque Name Here".into() };
        let session = Session::from_access(
            access("2012-04-13T13:15:00.000-05:00", Some(tenant)),
            &[OFFSET_EXPIRY_FORMAT, ZULU_EXPIRY_FORMAT],
        )
        .unwrap();

        assert_eq!(session.token, "aaaaa-bbbbb-ccccc-dddd");
        assert_eq!(session.tenant_id, "12345");
        assert_eq!(session.tenant_name.as_deref(), Some("Opaque Name Here"));
        assert_eq!(session.expires_at, Utc.with_ymd_and_hms(2012, 4, 13, 18, 15, 0).unwrap());
    }

    #[test]
    fn test_missing_tenant_is_empty() {
        let session =
            Session::from_access(access("2012-04-13T13:15:00.000Z", None), &[ZULU_EXPIRY_FORMAT])
                .unwrap();
        assert_eq!(session.tenant_id, "");
        assert_eq!(session.tenant_name, None);
    }

    #[test]
    fn test_staleness_boundary_is_inclusive() {
        let session =
            Session::from_access(access("2012-04-13T13:15:00.000Z", None), &[ZULU_EXPIRY_FORMAT])
                .unwrap();
        let skew = Duration::minutes(5);

        let just_before = Utc.with_ymd_and_hms(2012, 4, 13, 13, 9, 59).unwrap();
        let boundary = Utc.with_ymd_and_hms(2012, 4, 13, 13, 10, 0).unwrap();

        assert!(!session.is_stale(just_before, skew));
        assert!(session.is_stale(boundary, skew));
    }

    #[test]
    fn test_overflowing_skew_is_stale() {
        let session =
            Session::from_access(access("2012-04-13T13:15:00.000Z", None), &[ZULU_EXPIRY_FORMAT])
                .unwrap();
        let now = Utc.with_ymd_and_hms(2012, 4, 13, 12, 0, 0).unwrap();

        assert!(session.is_stale(now, Duration::days(100_000_000)));
        assert!(session.is_stale(DateTime::<Utc>::MAX_UTC, Duration::seconds(1)));
    }
}
