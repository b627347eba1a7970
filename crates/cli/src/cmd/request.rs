//! `nimbus request`: send an authenticated request.

use anyhow::{Context, Result};
use http::Method;
use nimbus_core::RestRequest;
use nimbus_domain::Config;
use nimbus_infra::{connect_with_config, HttpClient, ServiceClient};

/// Arguments of the `request` subcommand.
#[derive(Debug, Clone)]
pub struct RequestArgs {
    /// HTTP method, any case.
    pub method: String,
    /// Path relative to the base URL.
    pub path: String,
    /// Service base URL.
    pub base_url: String,
    /// JSON body.
    pub data: Option<String>,
    /// Send the token without the tenant path prefix.
    pub catalog_endpoint: bool,
}

/// Build the logical request described by `args`.
///
/// # Errors
///
/// Returns an error for an unknown method or a body that is not JSON.
pub fn build_request(args: &RequestArgs) -> Result<RestRequest> {
    let method = Method::from_bytes(args.method.to_ascii_uppercase().as_bytes())
        .with_context(|| format!("invalid HTTP method {:?}", args.method))?;

    let request = RestRequest::new(method, args.path.clone());
    match &args.data {
        Some(raw) => {
            let body: serde_json::Value =
                serde_json::from_str(raw).context("--data is not valid JSON")?;
            Ok(request.with_json(&body)?)
        }
        None => Ok(request),
    }
}

/// Send the request and print status and body.
pub async fn run(config: &Config, args: RequestArgs) -> Result<()> {
    let request = build_request(&args)?;
    let gateway = connect_with_config(config)?;
    let http = HttpClient::from_config(&config.http)?;

    let client = if args.catalog_endpoint {
        ServiceClient::token_only(args.base_url, gateway, http)
    } else {
        ServiceClient::tenant_scoped(args.base_url, gateway, http)
    };

    let response = client.send(request).await?;
    println!("{}", response.status);

    match response.deserialize_body::<serde_json::Value>() {
        Ok(json) => println!("{}", serde_json::to_string_pretty(&json)?),
        Err(_) if !response.body.is_empty() => println!("{}", response.text()),
        Err(_) => {}
    }
    Ok(())
}
