//! Console configuration
//!
//! Loaded from environment variables (a local `.env` is honored). The
//! private key is optional: read commands work without one.

use std::env;
use std::fmt;

use eyre::{eyre, Result, WrapErr};
use serde::Deserialize;

/// Main configuration for the console
#[derive(Clone, Deserialize)]
pub struct Config {
    pub rpc_url: String,
    pub chain_id: u64,
    /// Required for write commands only.
    pub private_key: Option<String>,
    /// Overrides the registry entry for `chain_id` (e.g. a local anvil
    /// deployment).
    pub factory_address: Option<String>,
    #[serde(default = "default_confirmations")]
    pub confirmations: u64,
    #[serde(default = "default_poll_interval")]
    pub poll_interval_ms: u64,
}

/// Custom Debug that redacts private_key to prevent accidental log leakage.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("rpc_url", &self.rpc_url)
            .field("chain_id", &self.chain_id)
            .field(
                "private_key",
                &self.private_key.as_ref().map(|_| "<redacted>"),
            )
            .field("factory_address", &self.factory_address)
            .field("confirmations", &self.confirmations)
            .field("poll_interval_ms", &self.poll_interval_ms)
            .finish()
    }
}

fn default_confirmations() -> u64 {
    1
}

fn default_poll_interval() -> u64 {
    1000
}

impl Config {
    /// Load configuration from the environment, reading `.env` first if one
    /// is present.
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Self {
            rpc_url: env::var("RPC_URL")
                .map_err(|_| eyre!("RPC_URL environment variable is required"))?,
            chain_id: env::var("CHAIN_ID")
                .map_err(|_| eyre!("CHAIN_ID environment variable is required"))?
                .parse()
                .wrap_err("CHAIN_ID must be a valid u64")?,
            private_key: env::var("PRIVATE_KEY").ok(),
            factory_address: env::var("FACTORY_ADDRESS").ok(),
            confirmations: match env::var("CONFIRMATIONS") {
                Ok(raw) => raw.parse().wrap_err("CONFIRMATIONS must be a valid u64")?,
                Err(_) => default_confirmations(),
            },
            poll_interval_ms: match env::var("POLL_INTERVAL_MS") {
                Ok(raw) => raw
                    .parse()
                    .wrap_err("POLL_INTERVAL_MS must be a valid u64")?,
                Err(_) => default_poll_interval(),
            },
        })
    }
}
