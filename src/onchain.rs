//! On-chain collaborator implementations
//!
//! Provider-backed implementations of the engine's three seams:
//! - `AugustusRegistryClient`: ParaSwap's on-chain AugustusRegistry
//! - `OnchainPriceOracle`: Aave-style price oracle getter with a
//!   decimals cache (decimals are immutable, one RPC call per asset ever)
//! - `WalletSettlement`: balances, allowances and the router invocation
//!   through a wallet-filled provider
//!
//! `call_router` runs an `eth_call` preflight before spending gas: a
//! router that would revert reverts in the preflight with its payload
//! intact, which a mined-and-failed transaction would not give us.

use crate::contracts::{IAugustusRegistry, IPriceOracleGetter, IERC20};
use crate::engine::{PriceOracle, RouterRegistry, SettlementAccount};
use crate::error::RouterRevert;
use alloy::primitives::{Address, Bytes, U256};
use alloy::providers::Provider;
use alloy::rpc::types::{TransactionInput, TransactionRequest};
use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

// ── Augustus registry ────────────────────────────────────────────────

/// Router validation against the on-chain AugustusRegistry.
pub struct AugustusRegistryClient<P> {
    provider: Arc<P>,
    registry: Address,
}

impl<P: Provider + 'static> AugustusRegistryClient<P> {
    pub fn new(provider: Arc<P>, registry: Address) -> Self {
        Self { provider, registry }
    }
}

#[async_trait]
impl<P: Provider + 'static> RouterRegistry for AugustusRegistryClient<P> {
    async fn is_known_router(&self, router: Address) -> Result<bool> {
        let contract = IAugustusRegistry::new(self.registry, self.provider.clone());
        let valid = contract
            .isValidAugustus(router)
            .call()
            .await
            .with_context(|| format!("isValidAugustus({}) failed", router))?;
        debug!("Registry check: router {} valid={}", router, valid);
        Ok(valid)
    }
}

// ── Price oracle ─────────────────────────────────────────────────────

/// Aave-style oracle getter plus per-asset ERC20 decimals.
///
/// All prices come from one oracle contract, so they share a quote
/// currency and scale.
pub struct OnchainPriceOracle<P> {
    provider: Arc<P>,
    oracle: Address,
    /// Decimals never change for a deployed token.
    decimals_cache: DashMap<Address, u8>,
}

impl<P: Provider + 'static> OnchainPriceOracle<P> {
    pub fn new(provider: Arc<P>, oracle: Address) -> Self {
        Self {
            provider,
            oracle,
            decimals_cache: DashMap::new(),
        }
    }
}

#[async_trait]
impl<P: Provider + 'static> PriceOracle for OnchainPriceOracle<P> {
    async fn decimals_of(&self, asset: Address) -> Result<u8> {
        if let Some(cached) = self.decimals_cache.get(&asset) {
            return Ok(*cached);
        }
        let token = IERC20::new(asset, self.provider.clone());
        let decimals = token
            .decimals()
            .call()
            .await
            .with_context(|| format!("decimals() failed for {}", asset))?;
        debug!("Cached decimals for {}: {}", asset, decimals);
        self.decimals_cache.insert(asset, decimals);
        Ok(decimals)
    }

    async fn price_of(&self, asset: Address) -> Result<U256> {
        let oracle = IPriceOracleGetter::new(self.oracle, self.provider.clone());
        let price = oracle
            .getAssetPrice(asset)
            .call()
            .await
            .with_context(|| format!("getAssetPrice({}) failed", asset))?;
        Ok(price)
    }
}

// ── Wallet settlement ────────────────────────────────────────────────

/// The engine's funds, held by `owner` behind a wallet-filled provider.
pub struct WalletSettlement<P> {
    provider: Arc<P>,
    owner: Address,
}

impl<P: Provider + 'static> WalletSettlement<P> {
    pub fn new(provider: Arc<P>, owner: Address) -> Self {
        Self { provider, owner }
    }

    pub fn owner(&self) -> Address {
        self.owner
    }

    fn router_tx(&self, router: Address, calldata: &[u8]) -> TransactionRequest {
        TransactionRequest::default()
            .from(self.owner)
            .to(router)
            .input(TransactionInput::new(Bytes::copy_from_slice(calldata)))
    }
}

#[async_trait]
impl<P: Provider + 'static> SettlementAccount for WalletSettlement<P> {
    async fn balance_of(&self, asset: Address) -> Result<U256> {
        let token = IERC20::new(asset, self.provider.clone());
        let balance = token
            .balanceOf(self.owner)
            .call()
            .await
            .with_context(|| format!("balanceOf({}) failed for token {}", self.owner, asset))?;
        Ok(balance)
    }

    async fn approve(&self, asset: Address, spender: Address, amount: U256) -> Result<()> {
        let token = IERC20::new(asset, self.provider.clone());

        // Skip the transaction when the allowance already matches (common
        // for the zeroing step after a router that consumed it all).
        let current = token
            .allowance(self.owner, spender)
            .call()
            .await
            .with_context(|| format!("allowance({}, {}) failed", self.owner, spender))?;
        if current == amount {
            debug!(
                "Allowance for spender {} already {}, skipping approve",
                spender, amount
            );
            return Ok(());
        }

        let receipt = token
            .approve(spender, amount)
            .from(self.owner)
            .send()
            .await
            .with_context(|| format!("approve({}, {}) send failed", spender, amount))?
            .get_receipt()
            .await
            .context("approve receipt fetch failed")?;
        if !receipt.status() {
            return Err(anyhow!(
                "approve({}, {}) reverted in tx {:?}",
                spender,
                amount,
                receipt.transaction_hash
            ));
        }
        debug!(
            "Approved {} for spender {} on token {} (tx {:?})",
            amount, spender, asset, receipt.transaction_hash
        );
        Ok(())
    }

    async fn call_router(&self, router: Address, calldata: &[u8]) -> Result<(), RouterRevert> {
        let tx = self.router_tx(router, calldata);

        // Preflight. A reverting router fails here with its payload, and
        // we never pay gas for it.
        if let Err(e) = self.provider.call(tx.clone()).await {
            let reason = e
                .as_error_resp()
                .and_then(|payload| payload.as_revert_data())
                .unwrap_or_else(|| Bytes::copy_from_slice(e.to_string().as_bytes()));
            warn!(
                "Router {} preflight reverted ({} bytes of revert data)",
                router,
                reason.len()
            );
            return Err(RouterRevert { reason });
        }

        let pending = self.provider.send_transaction(tx).await.map_err(|e| {
            RouterRevert {
                reason: Bytes::copy_from_slice(e.to_string().as_bytes()),
            }
        })?;
        let receipt = pending.get_receipt().await.map_err(|e| RouterRevert {
            reason: Bytes::copy_from_slice(e.to_string().as_bytes()),
        })?;

        // Receipts carry no revert payload, only a status bit.
        if !receipt.status() {
            warn!(
                "Router call mined but reverted: tx {:?}",
                receipt.transaction_hash
            );
            return Err(RouterRevert {
                reason: Bytes::new(),
            });
        }

        info!(
            "Router call confirmed: router={} tx={:?} gas_used={}",
            router, receipt.transaction_hash, receipt.gas_used
        );
        Ok(())
    }
}
