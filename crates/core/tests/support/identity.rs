//! Scripted identity provider.
//!
//! Counts authentication calls, can be switched into a failing mode and can
//! simulate a slow identity service so concurrent callers pile up behind an
//! in-flight refresh.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration as StdDuration;

use async_trait::async_trait;
use chrono::{Duration, TimeZone, Utc};
use nimbus_common::time::{Clock, MockClock};
use nimbus_core::IdentityProvider;
use nimbus_domain::{
    Access, AccessBody, Credential, NimbusError, Result, Tenant, Token, User,
};

pub const TENANT_ID: &str = "12345";

/// Start of every scripted timeline: 2012-04-13T12:00:00Z.
pub fn epoch() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2012, 4, 13, 12, 0, 0).unwrap()
}

enum Expiry {
    Fixed(String),
    /// `clock.now() + lifetime`, rendered in the zulu format.
    Rolling { clock: MockClock, lifetime: Duration },
}

pub struct ScriptedProvider {
    calls: AtomicUsize,
    failing: AtomicBool,
    delay: Option<StdDuration>,
    expiry: Expiry,
}

impl ScriptedProvider {
    pub fn rolling(clock: MockClock, lifetime: Duration) -> Self {
        Self::with_expiry(Expiry::Rolling { clock, lifetime })
    }

    pub fn fixed(expires: &str) -> Self {
        Self::with_expiry(Expiry::Fixed(expires.to_string()))
    }

    fn with_expiry(expiry: Expiry) -> Self {
        Self { calls: AtomicUsize::new(0), failing: AtomicBool::new(false), delay: None, expiry }
    }

    pub fn with_delay(mut self, delay: StdDuration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl IdentityProvider for ScriptedProvider {
    async fn authenticate(&self, credential: &Credential) -> Result<AccessBody> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        if self.failing.load(Ordering::SeqCst) {
            return Err(NimbusError::Network("connection refused".to_string()));
        }

        let expires = match &self.expiry {
            Expiry::Fixed(expires) => expires.clone(),
            Expiry::Rolling { clock, lifetime } => {
                (clock.now() + *lifetime).format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
            }
        };

        Ok(AccessBody {
            access: Access {
                token: Token {
                    id: format!("token-{n}"),
                    expires,
                    tenant: Some(Tenant {
                        id: TENANT_ID.to_string(),
                        name: format!("{} tenant", credential.username()),
                    }),
                },
                service_catalog: Vec::new(),
                user: User::default(),
            },
        })
    }
}
