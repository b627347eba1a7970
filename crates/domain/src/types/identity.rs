//! Identity service response model.
//!
//! Every field the service may omit carries a serde default so a sparse
//! response still decodes; only `access.token.id` and `access.token.expires`
//! are required.

use serde::{Deserialize, Serialize};

/// Top-level `{"access": {...}}` envelope returned by `POST /tokens`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessBody {
    pub access: Access,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Access {
    pub token: Token,
    #[serde(default)]
    pub service_catalog: Vec<CatalogEntry>,
    #[serde(default)]
    pub user: User,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub id: String,
    /// Raw expiry timestamp as reported by the service.
    pub expires: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant: Option<Tenant>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tenant {
    pub id: String,
    pub name: String,
}

/// One service in the catalog, e.g. `cloudServersOpenStack` of type `compute`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogEntry {
    pub name: String,
    #[serde(rename = "type")]
    pub service_type: String,
    pub endpoints: Vec<EntryEndpoint>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EntryEndpoint {
    pub region: String,
    pub tenant_id: String,
    #[serde(rename = "publicURL")]
    pub public_url: String,
    #[serde(rename = "internalURL", skip_serializing_if = "Option::is_none")]
    pub internal_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version_info: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version_list: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    pub id: String,
    pub name: String,
    #[serde(rename = "RAX-AUTH:defaultRegion")]
    pub default_region: String,
    pub roles: Vec<Role>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Role {
    pub id: String,
    pub name: String,
    pub description: String,
}

impl AccessBody {
    /// Tenant id of the issued token, empty when the service omitted it.
    #[must_use]
    pub fn tenant_id(&self) -> &str {
        self.access.token.tenant.as_ref().map_or("", |t| t.id.as_str())
    }

    /// Find a catalog endpoint by service type and (case-insensitive) region.
    #[must_use]
    pub fn endpoint(&self, service_type: &str, region: &str) -> Option<&EntryEndpoint> {
        self.access
            .service_catalog
            .iter()
            .filter(|entry| entry.service_type == service_type)
            .flat_map(|entry| entry.endpoints.iter())
            .find(|endpoint| endpoint.region.eq_ignore_ascii_case(region))
    }
}
