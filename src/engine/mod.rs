//! Swap execution engine
//!
//! The executor orchestrates one swap through an untrusted aggregator
//! router; the traits here are its seams to the external collaborators.
//! Production implementations live in `onchain.rs` (alloy provider) and
//! `registry.rs` (offline allowlist); tests substitute mocks.

pub mod bounds;
pub mod executor;

pub use bounds::{expected_min_out, MAX_BPS};
pub use executor::SwapExecutor;

use crate::error::RouterRevert;
use alloy::primitives::{Address, U256};
use anyhow::Result;
use async_trait::async_trait;

/// Registry of known-good router deployments. The sole gate against
/// routing funds through an attacker-supplied contract.
#[async_trait]
pub trait RouterRegistry: Send + Sync {
    async fn is_known_router(&self, router: Address) -> Result<bool>;
}

/// Per-asset decimals and price. Prices must share one quote currency and
/// one scale (the scale cancels in the src/dst ratio).
#[async_trait]
pub trait PriceOracle: Send + Sync {
    async fn decimals_of(&self, asset: Address) -> Result<u8>;
    async fn price_of(&self, asset: Address) -> Result<U256>;
}

/// The engine's view of the caller's funds: balances, router allowances,
/// and the router invocation itself.
///
/// `call_router` failure carries the raw revert payload; everything past
/// the router call treats the router as fully untrusted.
#[async_trait]
pub trait SettlementAccount: Send + Sync {
    async fn balance_of(&self, asset: Address) -> Result<U256>;
    async fn approve(&self, asset: Address, spender: Address, amount: U256) -> Result<()>;
    async fn call_router(&self, router: Address, calldata: &[u8]) -> Result<(), RouterRevert>;
}
