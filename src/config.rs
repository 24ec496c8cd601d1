//! Configuration management
//! Load settings from .env file

use anyhow::{Context, Result};

// Re-export BotConfig for external access
pub use crate::types::BotConfig;
use alloy::primitives::Address;
use std::str::FromStr;

pub fn load_config() -> Result<BotConfig> {
    dotenv::dotenv().ok();
    load_from_env()
}

/// Load a chain-specific .env file (e.g. `.env.polygon`) before reading
/// the environment.
pub fn load_config_from_file(env_file: &str) -> Result<BotConfig> {
    dotenv::from_filename(env_file)
        .with_context(|| format!("Failed to load env file: {}", env_file))?;
    load_from_env()
}

fn load_from_env() -> Result<BotConfig> {
    Ok(BotConfig {
        rpc_url: std::env::var("RPC_URL").context("RPC_URL not set")?,
        chain_id: std::env::var("CHAIN_ID")
            .context("CHAIN_ID not set")?
            .parse()
            .context("CHAIN_ID is not a number")?,
        private_key: std::env::var("PRIVATE_KEY").context("PRIVATE_KEY not set")?,

        augustus_registry: parse_address_var("AUGUSTUS_REGISTRY")?,
        price_oracle: parse_address_var("PRICE_ORACLE")?,

        // Optional: when set, routers are validated offline against this
        // JSON file instead of the on-chain registry.
        router_allowlist_file: std::env::var("ROUTER_ALLOWLIST_FILE").ok(),

        max_slippage_bps: std::env::var("MAX_SLIPPAGE_BPS")
            .context("MAX_SLIPPAGE_BPS not set")?
            .parse()
            .context("MAX_SLIPPAGE_BPS is not a number")?,
    })
}

fn parse_address_var(name: &str) -> Result<Address> {
    let raw = std::env::var(name).with_context(|| format!("{} not set", name))?;
    Address::from_str(raw.trim()).with_context(|| format!("{} is not a valid address: {}", name, raw))
}
