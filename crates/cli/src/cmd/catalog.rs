//! `nimbus catalog`: list service catalog endpoints.

use anyhow::Result;
use nimbus_domain::{CatalogEntry, Config};
use nimbus_infra::connect_with_config;

/// Print `type name region url` for each matching endpoint.
pub async fn run(config: &Config, service_type: Option<&str>, region: Option<&str>) -> Result<()> {
    let gateway = connect_with_config(config)?;
    gateway.authenticate().await?;

    let catalog = gateway.service_catalog().await?;
    let rows = matching_rows(&catalog, service_type, region);
    if rows.is_empty() {
        println!("No matching endpoints.");
        return Ok(());
    }
    for row in rows {
        println!("{row}");
    }
    Ok(())
}

/// Render matching endpoints, one line each.
pub fn matching_rows(
    catalog: &[CatalogEntry],
    service_type: Option<&str>,
    region: Option<&str>,
) -> Vec<String> {
    catalog
        .iter()
        .filter(|entry| service_type.map_or(true, |t| entry.service_type == t))
        .flat_map(|entry| {
            entry
                .endpoints
                .iter()
                .filter(|endpoint| region.map_or(true, |r| endpoint.region.eq_ignore_ascii_case(r)))
                .map(move |endpoint| {
                    format!(
                        "{:<16} {:<24} {:<5} {}",
                        entry.service_type, entry.name, endpoint.region, endpoint.public_url
                    )
                })
        })
        .collect()
}
