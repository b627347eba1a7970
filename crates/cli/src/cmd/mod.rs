//! CLI argument parsing and subcommand dispatch.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use nimbus_domain::Config;
use nimbus_infra::config;

pub mod catalog;
pub mod request;
pub mod token;

/// Authenticated client for cloud REST APIs.
#[derive(Parser, Debug)]
#[command(name = "nimbus", about = "Authenticated client for cloud REST APIs", version)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,

    /// Configuration file (JSON or TOML). Without it the environment is read
    /// first, then the standard file locations.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log filter directives, e.g. `debug` or `nimbus_infra=trace`.
    #[arg(long, global = true)]
    pub log_level: Option<String>,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Authenticate and show the issued session.
    Token {
        /// Also print the token itself.
        #[arg(long)]
        show_token: bool,
    },
    /// List service catalog endpoints.
    Catalog {
        /// Only entries of this catalog type, e.g. `compute`.
        #[arg(long)]
        service_type: Option<String>,
        /// Only endpoints in this region.
        #[arg(long)]
        region: Option<String>,
    },
    /// Send an authenticated request and print the response.
    Request {
        /// HTTP method.
        method: String,
        /// Path relative to the base URL.
        path: String,
        /// Service base URL.
        #[arg(long)]
        base_url: String,
        /// JSON request body.
        #[arg(long)]
        data: Option<String>,
        /// The base URL already contains the tenant; send the token only.
        #[arg(long)]
        catalog_endpoint: bool,
    },
}

impl Cli {
    /// Resolve configuration from `--config` or the default sources.
    ///
    /// # Errors
    ///
    /// Returns an error if no source yields a configuration.
    pub fn load_config(&self) -> Result<Config> {
        let loaded = match &self.config {
            Some(path) => config::load_from_file(Some(path.clone())),
            None => config::load(),
        };
        loaded.context("failed to load configuration")
    }

    /// Run the selected subcommand.
    ///
    /// # Errors
    ///
    /// Propagates configuration, authentication and request failures.
    pub async fn run(self) -> Result<()> {
        let config = self.load_config()?;
        tracing::debug!(
            identity = ?config.identity,
            endpoint = %config.identity.resolved_endpoint(),
            "configuration resolved"
        );

        match self.command {
            Command::Token { show_token } => token::run(&config, show_token).await,
            Command::Catalog { service_type, region } => {
                catalog::run(&config, service_type.as_deref(), region.as_deref()).await
            }
            Command::Request { method, path, base_url, data, catalog_endpoint } => {
                let args = request::RequestArgs {
                    method,
                    path,
                    base_url,
                    data,
                    catalog_endpoint,
                };
                request::run(&config, args).await
            }
        }
    }
}
