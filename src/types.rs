//! Core data structures for the swap execution engine.

use alloy::primitives::{Address, U256};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Trade direction for a router entry point.
///
/// `Sell` = exact-input (the source amount is fixed, the output floats).
/// `Buy` = exact-output (the destination amount is fixed, the input floats).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TradeSide {
    Sell,
    Buy,
}

impl fmt::Display for TradeSide {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TradeSide::Sell => write!(f, "sell"),
            TradeSide::Buy => write!(f, "buy"),
        }
    }
}

/// One swap to execute through an external aggregator router.
///
/// Constructed fresh per call and consumed entirely by one execution.
/// Reusing a request across calls risks embedding a stale amount into
/// reused calldata, which is exactly what the patch step defends against.
#[derive(Debug, Clone)]
pub struct SwapRequest {
    /// Router (Augustus) address the calldata targets.
    pub router: Address,
    /// Pre-built ABI calldata for one of the router's swap entry points.
    pub calldata: Vec<u8>,
    /// Asset being sold.
    pub source_asset: Address,
    /// Asset being bought.
    pub dest_asset: Address,
    /// Exact amount of `source_asset` to sell. Must be non-zero.
    pub source_amount: U256,
    /// Minimum acceptable amount of `dest_asset`.
    pub min_dest_amount: U256,
    /// Byte offset of the amount word to overwrite inside `calldata`,
    /// if the quote requested call-time re-embedding of the amount.
    pub patch_offset: Option<u32>,
}

/// Balance of one asset captured immediately before or after the router
/// call. Transient only — used to compute a delta, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BalanceSnapshot {
    pub asset: Address,
    pub amount: U256,
}

impl BalanceSnapshot {
    pub fn new(asset: Address, amount: U256) -> Self {
        Self { asset, amount }
    }
}

/// Outcome of a fully verified swap. Produced only when every invariant
/// held; a failed execution produces no result at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwapResult {
    /// Destination-asset delta actually delivered by the router.
    pub amount_received: U256,
}

/// Engine configuration (from env)
#[derive(Debug, Clone)]
pub struct BotConfig {
    // Network
    pub rpc_url: String,
    pub chain_id: u64,

    // Wallet
    pub private_key: String,

    // Collaborator contracts
    pub augustus_registry: Address,
    pub price_oracle: Address,

    /// Optional offline router allowlist (JSON). When set, it replaces the
    /// on-chain registry lookup.
    pub router_allowlist_file: Option<String>,

    /// Maximum accepted deviation from the oracle-implied rate,
    /// in basis points (100 = 1%).
    pub max_slippage_bps: u32,
}
