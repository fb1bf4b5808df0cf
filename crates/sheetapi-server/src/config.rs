//! Server configuration and logging setup

use std::net::SocketAddr;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Command-line and environment configuration for the server
#[derive(Debug, Clone, Parser)]
#[command(name = "sheetapi")]
#[command(author, version, about = "HTTP service for sparse spreadsheets")]
pub struct Config {
    /// Address to listen on
    #[arg(long, env = "SHEETAPI_BIND", default_value = "127.0.0.1:8000")]
    pub bind: SocketAddr,

    /// Log filter (overridden by RUST_LOG when set)
    #[arg(long, env = "SHEETAPI_LOG", default_value = "info")]
    pub log_level: String,
}

impl Config {
    /// Install the global tracing subscriber
    pub fn init_logging(&self) -> Result<()> {
        let filter = match EnvFilter::try_from_default_env() {
            Ok(filter) => filter,
            Err(_) => EnvFilter::try_new(&self.log_level)
                .with_context(|| format!("Invalid log filter '{}'", self.log_level))?,
        };

        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .try_init()
            .map_err(|e| anyhow::anyhow!("Failed to install logger: {e}"))
    }
}
