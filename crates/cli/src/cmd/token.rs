//! `nimbus token`: authenticate and describe the session.

use anyhow::Result;
use chrono::Utc;
use nimbus_common::format_duration;
use nimbus_domain::Config;
use nimbus_infra::connect_with_config;

/// Authenticate and print tenant and expiry.
pub async fn run(config: &Config, show_token: bool) -> Result<()> {
    let gateway = connect_with_config(config)?;
    gateway.authenticate().await?;

    let session = gateway.session().await?;
    let remaining = (session.expires_at - Utc::now()).to_std().unwrap_or_default();

    println!("user:       {}", gateway.username().await);
    println!("tenant id:  {}", session.tenant_id);
    if let Some(name) = &session.tenant_name {
        println!("tenant:     {name}");
    }
    println!("expires at: {} (in {})", session.expires_at.to_rfc3339(), format_duration(remaining));
    if show_token {
        println!("token:      {}", session.token);
    }
    Ok(())
}
