//! Domain types

pub mod credential;
pub mod identity;

pub use credential::{AuthRequest, Credential, Secret};
pub use identity::{
    Access, AccessBody, CatalogEntry, EntryEndpoint, Role, Tenant, Token, User,
};
