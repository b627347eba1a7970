//! Port interfaces for authentication
//!
//! These traits define the boundary between the gateway and whatever talks
//! to the identity service.

use async_trait::async_trait;
use nimbus_domain::{AccessBody, Credential, Result};

/// Exchanges a credential for a token at the identity service.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Authenticate once; implementations must not retry.
    async fn authenticate(&self, credential: &Credential) -> Result<AccessBody>;
}

#[async_trait]
impl<P: IdentityProvider + ?Sized> IdentityProvider for std::sync::Arc<P> {
    async fn authenticate(&self, credential: &Credential) -> Result<AccessBody> {
        (**self).authenticate(credential).await
    }
}
