//! Static Router Allowlist
//!
//! Validates router (Augustus) addresses against a JSON config without
//! touching the chain. Strict by construction: anything not listed as an
//! active deployment for the configured chain is rejected.
//!
//! Config file: config/routers_allowlist.json

use crate::engine::RouterRegistry;
use alloy::primitives::Address;
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::str::FromStr;
use tracing::{debug, info};

// ---------------------------------------------------------------------------
// JSON structures
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct RouterAllowlist {
    pub version: String,
    pub last_updated: String,
    pub routers: Vec<AllowlistRouter>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AllowlistRouter {
    pub address: String,
    /// Router family/version, e.g. "AugustusV5" or "AugustusV6.2"
    pub version: String,
    pub chain_id: u64,
    /// "active" routers are accepted; anything else ("deprecated",
    /// "compromised", ...) is rejected.
    pub status: String,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub added: Option<String>,
}

// ---------------------------------------------------------------------------
// Precomputed lookup set (built once at load time)
// ---------------------------------------------------------------------------

/// Fast-lookup wrapper built from the JSON config, scoped to one chain.
pub struct RouterAllowlistFilter {
    active: HashSet<Address>,
    chain_id: u64,
    /// Raw config (retained for logging / debug)
    pub raw: RouterAllowlist,
}

impl RouterAllowlistFilter {
    /// Load from a JSON file path. Returns an error if the file is missing
    /// or unparseable — there is no permissive fallback for a component
    /// that gates where funds may be routed.
    pub fn load(path: &str, chain_id: u64) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read router allowlist: {}", path))?;

        let raw: RouterAllowlist = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse router allowlist JSON: {}", path))?;

        Self::from_config(raw, chain_id)
    }

    /// Build from an already-parsed config.
    pub fn from_config(raw: RouterAllowlist, chain_id: u64) -> Result<Self> {
        let mut active = HashSet::new();
        for router in &raw.routers {
            if router.chain_id != chain_id || router.status != "active" {
                debug!(
                    "Allowlist: skipping {} ({}, chain {}, status {})",
                    router.address, router.version, router.chain_id, router.status
                );
                continue;
            }
            let address = Address::from_str(router.address.trim())
                .with_context(|| format!("Invalid router address in allowlist: {}", router.address))?;
            active.insert(address);
        }

        info!(
            "Router allowlist loaded: {} active routers for chain {} ({} listed total)",
            active.len(),
            chain_id,
            raw.routers.len(),
        );

        Ok(Self {
            active,
            chain_id,
            raw,
        })
    }

    /// Is this router an active, known-good deployment on our chain?
    pub fn is_allowed(&self, router: &Address) -> bool {
        self.active.contains(router)
    }

    /// Number of active routers.
    pub fn active_router_count(&self) -> usize {
        self.active.len()
    }

    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }
}

#[async_trait]
impl RouterRegistry for RouterAllowlistFilter {
    async fn is_known_router(&self, router: Address) -> Result<bool> {
        Ok(self.is_allowed(&router))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
