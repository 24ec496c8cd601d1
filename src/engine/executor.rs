//! Swap Executor
//!
//! Drives one swap through an untrusted aggregator router:
//! Validating → Bounding → Patched (optional) → Calling → Verifying →
//! Settled | Aborted.
//!
//! The request is a sequential, uninterruptible critical section; the only
//! point where control leaves this code is the router invocation, and both
//! exposed couplings (balances and the allowance) are fully determined
//! before that call. Any path that granted an allowance zeroes it before
//! returning, success or failure. No retries — a failed call is terminal
//! for the request.

use crate::calldata::patch_amount;
use crate::engine::bounds::expected_min_out;
use crate::engine::{PriceOracle, RouterRegistry, SettlementAccount};
use crate::error::SwapError;
use crate::types::{BalanceSnapshot, SwapRequest, SwapResult};
use alloy::primitives::U256;
use futures::try_join;
use tracing::{debug, info, warn};

pub struct SwapExecutor<R, O, S> {
    registry: R,
    oracle: O,
    account: S,
    max_slippage_bps: u32,
}

impl<R, O, S> SwapExecutor<R, O, S>
where
    R: RouterRegistry,
    O: PriceOracle,
    S: SettlementAccount,
{
    pub fn new(registry: R, oracle: O, account: S, max_slippage_bps: u32) -> Self {
        Self {
            registry,
            oracle,
            account,
            max_slippage_bps,
        }
    }

    /// Execute one swap request end to end.
    ///
    /// Consumes the request: calldata may be patched in place and must not
    /// be reused across calls.
    pub async fn execute(&self, mut request: SwapRequest) -> Result<SwapResult, SwapError> {
        // ── Validating ───────────────────────────────────────────────
        if request.source_amount.is_zero() {
            return Err(SwapError::ZeroSourceAmount);
        }
        let known = self
            .registry
            .is_known_router(request.router)
            .await
            .map_err(SwapError::Registry)?;
        if !known {
            return Err(SwapError::InvalidRouter(request.router));
        }

        // ── Bounding ─────────────────────────────────────────────────
        let (source_decimals, dest_decimals, source_price, dest_price) = try_join!(
            self.oracle.decimals_of(request.source_asset),
            self.oracle.decimals_of(request.dest_asset),
            self.oracle.price_of(request.source_asset),
            self.oracle.price_of(request.dest_asset),
        )
        .map_err(SwapError::Oracle)?;

        let bound = expected_min_out(
            request.source_amount,
            source_price,
            dest_price,
            source_decimals,
            dest_decimals,
            self.max_slippage_bps,
            request.dest_asset,
        )?;
        if request.min_dest_amount < bound {
            return Err(SwapError::MinAmountExceedsMaxSlippage {
                min_dest_amount: request.min_dest_amount,
                expected_min_out: bound,
            });
        }
        debug!(
            min_dest_amount = %request.min_dest_amount,
            oracle_bound = %bound,
            "slippage bound satisfied"
        );

        // ── Patched (optional) ───────────────────────────────────────
        // A quote may have been priced against a slightly different amount;
        // re-embedding the authoritative amount at call time closes the
        // stale-quote window.
        if let Some(offset) = request.patch_offset {
            patch_amount(&mut request.calldata, offset, request.source_amount)?;
            debug!(offset, amount = %request.source_amount, "patched amount into calldata");
        }

        // ── Calling ──────────────────────────────────────────────────
        let (source_before, dest_before) = self
            .snapshot_balances(&request)
            .await
            .map_err(SwapError::Settlement)?;
        if source_before.amount < request.source_amount {
            return Err(SwapError::InsufficientBalanceBeforeSwap {
                balance: source_before.amount,
                required: request.source_amount,
            });
        }

        // One-time allowance, exactly the source amount.
        self.account
            .approve(request.source_asset, request.router, request.source_amount)
            .await
            .map_err(SwapError::Settlement)?;

        let call_result = self
            .account
            .call_router(request.router, &request.calldata)
            .await;

        // ── Verifying ────────────────────────────────────────────────
        // The allowance is zeroed before anything is judged, so no error
        // path can leave the router approved.
        self.account
            .approve(request.source_asset, request.router, U256::ZERO)
            .await
            .map_err(SwapError::Settlement)?;

        if let Err(revert) = call_result {
            warn!(router = %request.router, "router call failed, aborting");
            return Err(SwapError::RouterCallFailed(revert));
        }

        let (source_after, dest_after) = self
            .snapshot_balances(&request)
            .await
            .map_err(SwapError::Settlement)?;

        // Exact debit: a router that charges fees from the source side
        // (or pulls less than it claims) fails here.
        let expected_source_after = source_before.amount - request.source_amount;
        if source_after.amount != expected_source_after {
            return Err(SwapError::WrongBalanceAfterSwap {
                expected: expected_source_after,
                actual: source_after.amount,
            });
        }

        let received = dest_after.amount.saturating_sub(dest_before.amount);
        if received < request.min_dest_amount {
            return Err(SwapError::InsufficientAmountReceived {
                received,
                min_dest_amount: request.min_dest_amount,
            });
        }

        // ── Settled ──────────────────────────────────────────────────
        info!(
            source_asset = %request.source_asset,
            dest_asset = %request.dest_asset,
            source_amount = %request.source_amount,
            amount_received = %received,
            "swap settled"
        );
        Ok(SwapResult {
            amount_received: received,
        })
    }

    async fn snapshot_balances(
        &self,
        request: &SwapRequest,
    ) -> anyhow::Result<(BalanceSnapshot, BalanceSnapshot)> {
        let (source, dest) = try_join!(
            self.account.balance_of(request.source_asset),
            self.account.balance_of(request.dest_asset),
        )?;
        Ok((
            BalanceSnapshot::new(request.source_asset, source),
            BalanceSnapshot::new(request.dest_asset, dest),
        ))
    }
}
