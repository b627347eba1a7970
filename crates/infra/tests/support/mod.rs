//! Shared fixtures for identity/service wiremock tests.

use chrono::{Duration, Utc};
use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TOKEN: &str = "aaaaa-bbbbb-ccccc-dddd";
pub const TENANT_ID: &str = "12345";

/// Token response valid for an hour, with a compute catalog pointing at
/// `compute_base` (tenant already embedded).
pub fn access_body(compute_base: &str) -> Value {
    let expires = (Utc::now() + Duration::hours(1)).format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string();

    json!({
        "access": {
            "token": {
                "id": TOKEN,
                "expires": expires,
                "tenant": { "id": TENANT_ID, "name": "Opaque Name Here" }
            },
            "serviceCatalog": [{
                "name": "cloudServersOpenStack",
                "type": "compute",
                "endpoints": [{
                    "region": "ORD",
                    "tenantId": TENANT_ID,
                    "publicURL": format!("{compute_base}/v2/{TENANT_ID}"),
                    "versionId": "2"
                }]
            }],
            "user": {
                "id": "161418",
                "name": "demoauthor",
                "RAX-AUTH:defaultRegion": "ORD",
                "roles": [{
                    "id": "3",
                    "name": "identity:user-admin",
                    "description": "User Admin Role."
                }]
            }
        }
    })
}

/// Identity server answering `POST /v2.0/tokens` and expecting `calls` hits.
pub async fn identity_server(compute_base: &str, calls: u64) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2.0/tokens"))
        .respond_with(ResponseTemplate::new(200).set_body_json(access_body(compute_base)))
        .expect(calls)
        .mount(&server)
        .await;
    server
}

pub fn identity_url(server: &MockServer) -> String {
    format!("{}/v2.0", server.uri())
}
