//! Oracle-implied minimum output bound.
//!
//! All integer arithmetic: the numerator is fully formed before a single
//! truncating division, so rounding is always conservative (never rounds
//! the bound up).

use crate::error::SwapError;
use alloy::primitives::{Address, U256, U512};

/// Basis-point denominator; slippage is expressed in bps (100 = 1%).
pub const MAX_BPS: u32 = 10_000;

/// Minimum acceptable output for selling `source_amount`, given both
/// oracle prices (shared quote currency and scale) and asset decimals:
///
/// ```text
/// source_amount * source_price * 10^dest_decimals * (MAX_BPS - slippage)
/// -----------------------------------------------------------------------
///            dest_price * 10^source_decimals * MAX_BPS
/// ```
pub fn expected_min_out(
    source_amount: U256,
    source_price: U256,
    dest_price: U256,
    source_decimals: u8,
    dest_decimals: u8,
    max_slippage_bps: u32,
    dest_asset: Address,
) -> Result<U256, SwapError> {
    if max_slippage_bps >= MAX_BPS {
        return Err(SwapError::SlippageOutOfRange(max_slippage_bps));
    }
    if dest_price.is_zero() {
        return Err(SwapError::ZeroOraclePrice(dest_asset));
    }

    let numerator = widen(source_amount)
        .checked_mul(widen(source_price))
        .and_then(|n| n.checked_mul(pow10(dest_decimals)?))
        .and_then(|n| n.checked_mul(U512::from(MAX_BPS - max_slippage_bps)))
        .ok_or(SwapError::ArithmeticOverflow)?;

    let denominator = widen(dest_price)
        .checked_mul(pow10(source_decimals).ok_or(SwapError::ArithmeticOverflow)?)
        .and_then(|d| d.checked_mul(U512::from(MAX_BPS)))
        .ok_or(SwapError::ArithmeticOverflow)?;

    narrow(numerator / denominator).ok_or(SwapError::ArithmeticOverflow)
}

fn widen(value: U256) -> U512 {
    U512::from_be_slice(&value.to_be_bytes::<32>())
}

fn narrow(value: U512) -> Option<U256> {
    let bytes = value.to_be_bytes::<64>();
    if bytes[..32].iter().any(|&b| b != 0) {
        return None;
    }
    Some(U256::from_be_slice(&bytes[32..]))
}

fn pow10(decimals: u8) -> Option<U512> {
    U512::from(10u64).checked_pow(U512::from(decimals))
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::Address;

    fn bound(
        amount: u64,
        src_price: u64,
        dst_price: u64,
        src_dec: u8,
        dst_dec: u8,
        bps: u32,
    ) -> Result<U256, SwapError> {
        expected_min_out(
            U256::from(amount),
            U256::from(src_price),
            U256::from(dst_price),
            src_dec,
            dst_dec,
            bps,
            Address::ZERO,
        )
    }

    #[test]
    fn documented_example_yields_1980() {
        // p_src=100, p_dst=50, decimals 18/18, amount=1000, slippage 1%.
        assert_eq!(bound(1000, 100, 50, 18, 18, 100).unwrap(), U256::from(1980u64));
    }

    #[test]
    fn decimal_rescaling_applies() {
        // 6-decimal source into an 18-decimal destination at equal prices:
        // the bound scales up by 10^12 before the slippage haircut.
        let expected = U256::from(1_000_000u64)
            * U256::from(10u64).pow(U256::from(12u64))
            * U256::from(9_950u64)
            / U256::from(10_000u64);
        assert_eq!(bound(1_000_000, 1, 1, 6, 18, 50).unwrap(), expected);
    }

    #[test]
    fn division_truncates_once_at_the_end() {
        // 3 * 10 * 9900 / (7 * 10000) = 297000 / 70000 = 4 (trunc).
        // Dividing early (3*10/7 = 4, then *0.99) would give 3.
        assert_eq!(bound(3, 10, 7, 0, 0, 100).unwrap(), U256::from(4u64));
    }

    #[test]
    fn zero_slippage_is_the_raw_oracle_rate() {
        assert_eq!(bound(1000, 100, 50, 18, 18, 0).unwrap(), U256::from(2000u64));
    }

    #[test]
    fn slippage_at_or_above_100_percent_is_rejected() {
        assert!(matches!(
            bound(1000, 1, 1, 18, 18, 10_000),
            Err(SwapError::SlippageOutOfRange(10_000))
        ));
    }

    #[test]
    fn zero_dest_price_is_rejected() {
        assert!(matches!(
            bound(1000, 100, 0, 18, 18, 100),
            Err(SwapError::ZeroOraclePrice(_))
        ));
    }

    #[test]
    fn u512_headroom_handles_max_amounts() {
        // Worst realistic case: full U256 amount at a huge price still fits
        // the 512-bit numerator as long as the result narrows back down.
        let out = expected_min_out(
            U256::from(10u64).pow(U256::from(30u64)),
            U256::from(10u64).pow(U256::from(18u64)),
            U256::from(10u64).pow(U256::from(18u64)),
            18,
            18,
            100,
            Address::ZERO,
        )
        .unwrap();
        let expected = U256::from(10u64).pow(U256::from(30u64)) * U256::from(9_900u64)
            / U256::from(10_000u64);
        assert_eq!(out, expected);
    }

    #[test]
    fn result_wider_than_u256_overflows() {
        // Price ratio of 10^60 pushes the quotient past 256 bits.
        let err = expected_min_out(
            U256::from(10u64).pow(U256::from(60u64)),
            U256::from(10u64).pow(U256::from(60u64)),
            U256::from(1u64),
            0,
            0,
            0,
            Address::ZERO,
        )
        .unwrap_err();
        assert!(matches!(err, SwapError::ArithmeticOverflow));
    }
}
