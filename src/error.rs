//! Typed failure taxonomy for the swap engine.
//!
//! Every variant is terminal for the current request — nothing here is
//! retried internally. `RouterCallFailed` carries the router's revert
//! payload untouched so the ultimate caller can diagnose third-party
//! failures.

use crate::types::TradeSide;
use alloy::hex;
use alloy::primitives::{Address, Bytes, U256};
use thiserror::Error;

/// Raw failure surfaced by the untrusted router call.
///
/// `reason` is the revert payload exactly as returned by the node (or, for
/// transport-level failures, the error message bytes). It is never decoded
/// or rewritten on the way up.
#[derive(Debug, Clone, Error)]
#[error("router call failed ({} bytes of revert data)", reason.len())]
pub struct RouterRevert {
    pub reason: Bytes,
}

/// Engine failure taxonomy. All terminal; every path that granted an
/// allowance zeroes it before one of these is returned.
#[derive(Debug, Error)]
pub enum SwapError {
    #[error("source amount must be non-zero")]
    ZeroSourceAmount,

    #[error("router {0} is not a known Augustus deployment")]
    InvalidRouter(Address),

    #[error("no amount offset for selector 0x{} on the {side} side", hex::encode(.selector))]
    UnrecognizedSelector { selector: [u8; 4], side: TradeSide },

    #[error("patch offset {offset} out of range for {len}-byte calldata")]
    OffsetOutOfRange { offset: u32, len: usize },

    #[error("slippage {0} bps is not below 10000")]
    SlippageOutOfRange(u32),

    #[error("oracle returned a zero price for {0}")]
    ZeroOraclePrice(Address),

    #[error("min amount {min_dest_amount} is below the oracle-implied bound {expected_min_out}")]
    MinAmountExceedsMaxSlippage {
        min_dest_amount: U256,
        expected_min_out: U256,
    },

    #[error("source balance {balance} is below the requested amount {required}")]
    InsufficientBalanceBeforeSwap { balance: U256, required: U256 },

    #[error(transparent)]
    RouterCallFailed(#[from] RouterRevert),

    #[error("source balance after swap is {actual}, expected exact debit to {expected}")]
    WrongBalanceAfterSwap { expected: U256, actual: U256 },

    #[error("received {received}, below the minimum {min_dest_amount}")]
    InsufficientAmountReceived {
        received: U256,
        min_dest_amount: U256,
    },

    #[error("arithmetic overflow computing the slippage bound")]
    ArithmeticOverflow,

    // Collaborator transport failures, kept distinct from invariant
    // violations so callers can separate "the chain said no" from
    // "we could not ask the chain".
    #[error("router registry lookup failed: {0:#}")]
    Registry(#[source] anyhow::Error),

    #[error("price oracle query failed: {0:#}")]
    Oracle(#[source] anyhow::Error),

    #[error("settlement account access failed: {0:#}")]
    Settlement(#[source] anyhow::Error),
}
