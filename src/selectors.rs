//! Amount Offset Table
//!
//! Maps a router function selector plus trade side to the byte offset of
//! the 32-byte word holding the tradable amount inside the ABI calldata —
//! the word the executor overwrites with the trusted amount at call time.
//!
//! Every offset is `4 + 32 * word_index`, where `word_index` is the
//! zero-based position of the amount word in the encoded parameter tuple.
//! For functions taking a dynamic struct, the head holds an offset pointer
//! per dynamic argument, so the struct's fields start after the last head
//! word; the per-entry comments spell out the count. New router versions
//! get their entries derived the same way from their ABI signatures.
//!
//! Selectors are taken from the `sol!` declarations in `contracts.rs`, so
//! each constant here is the compile-time selector of the documented
//! signature rather than a hand-copied literal.
//!
//! `swapExactAmountInOutOnMakerPSM` is deliberately unresolvable on both
//! sides: it is only reachable through the generic V6 entry points, and its
//! dual-amount layout makes a single patch offset ambiguous.

use crate::contracts::{IAugustusSwapperV5 as V5, IAugustusSwapperV6 as V6};
use crate::error::SwapError;
use crate::types::TradeSide;
use alloy::hex;
use alloy::sol_types::SolCall;
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Byte offset of the `argument_index`-th 32-byte word in calldata,
/// past the 4-byte selector.
pub const fn word_offset(argument_index: u32) -> u32 {
    4 + 32 * argument_index
}

/// One row of the amount offset table.
#[derive(Debug, Clone, Copy)]
pub struct SelectorOffsetEntry {
    pub selector: [u8; 4],
    pub side: TradeSide,
    pub offset: u32,
}

const fn sell(selector: [u8; 4], argument_index: u32) -> SelectorOffsetEntry {
    SelectorOffsetEntry {
        selector,
        side: TradeSide::Sell,
        offset: word_offset(argument_index),
    }
}

const fn buy(selector: [u8; 4], argument_index: u32) -> SelectorOffsetEntry {
    SelectorOffsetEntry {
        selector,
        side: TradeSide::Buy,
        offset: word_offset(argument_index),
    }
}

/// The full table. Word indices are derived from the signatures in
/// `contracts.rs`; the tests below re-derive a sample of them by ABI-encoding
/// real calls and locating the amount word.
pub static OFFSET_TABLE: &[SelectorOffsetEntry] = &[
    // ── Augustus V5: direct single-hop swaps ─────────────────────────
    // swapOnUniswap(amountIn, amountOutMin, path): amountIn is word 0.
    sell(V5::swapOnUniswapCall::SELECTOR, 0),
    // swapOnUniswapFork(factory, initCode, amountIn, amountOutMin, path): word 2.
    sell(V5::swapOnUniswapForkCall::SELECTOR, 2),
    // swapOnUniswapV2Fork(tokenIn, amountIn, amountOutMin, weth, pools): word 1.
    sell(V5::swapOnUniswapV2ForkCall::SELECTOR, 1),
    // buyOnUniswap(amountInMax, amountOut, path): the buy side patches the
    // exact-output amount, word 1.
    buy(V5::buyOnUniswapCall::SELECTOR, 1),
    // buyOnUniswapFork(factory, initCode, amountInMax, amountOut, path): word 3.
    buy(V5::buyOnUniswapForkCall::SELECTOR, 3),
    // buyOnUniswapV2Fork(tokenIn, amountInMax, amountOut, weth, pools): word 2.
    buy(V5::buyOnUniswapV2ForkCall::SELECTOR, 2),
    // ── Augustus V5: simple swaps ────────────────────────────────────
    // simpleSwap(SimpleData): dynamic struct, 1 pointer word, then
    // fromToken, toToken, fromAmount → word 3.
    sell(V5::simpleSwapCall::SELECTOR, 3),
    // simpleBuy(SimpleData): same layout, toAmount → word 4.
    buy(V5::simpleBuyCall::SELECTOR, 4),
    // ── Augustus V5: multi-hop ("multi"/"mega") swaps ────────────────
    // multiSwap(SellData): pointer word, fromToken, fromAmount → word 2.
    sell(V5::multiSwapCall::SELECTOR, 2),
    // megaSwap(MegaSwapSellData): same prefix as SellData → word 2.
    sell(V5::megaSwapCall::SELECTOR, 2),
    // ── Augustus V5: per-venue direct swaps ──────────────────────────
    // directUniV3Swap(DirectUniV3): pointer word, fromToken, toToken,
    // exchange, path pointer, fromAmount → word 5.
    sell(V5::directUniV3SwapCall::SELECTOR, 5),
    // directCurveV1Swap(DirectCurveV1): pointer word, fromToken, toToken,
    // exchange, fromAmount → word 4.
    sell(V5::directCurveV1SwapCall::SELECTOR, 4),
    // directBalancerV2GivenInSwap(DirectBalancerV2): pointer word,
    // fromToken, toToken, fromAmount → word 3.
    sell(V5::directBalancerV2GivenInSwapCall::SELECTOR, 3),
    // directBalancerV2GivenOutSwap(DirectBalancerV2): toAmount → word 4.
    buy(V5::directBalancerV2GivenOutSwapCall::SELECTOR, 4),
    // ── Augustus V6: generic swaps ───────────────────────────────────
    // swapExactAmountIn(executor, GenericData, partnerAndFee, permit,
    // executorData): GenericData is all-static and therefore inlined —
    // executor, srcToken, destToken, fromAmount → word 3.
    sell(V6::swapExactAmountInCall::SELECTOR, 3),
    // swapExactAmountOut(...): toAmount → word 4.
    buy(V6::swapExactAmountOutCall::SELECTOR, 4),
    // ── Augustus V6: per-venue direct swaps ──────────────────────────
    // swapExactAmountInOnUniswapV2(UniswapV2Data, partnerAndFee, permit):
    // UniswapV2Data is dynamic (pools), so the head is 3 words
    // (struct pointer, partnerAndFee, permit pointer); the struct tail
    // follows with srcToken, destToken, fromAmount → word 5.
    sell(V6::swapExactAmountInOnUniswapV2Call::SELECTOR, 5),
    // swapExactAmountOutOnUniswapV2: toAmount → word 6.
    buy(V6::swapExactAmountOutOnUniswapV2Call::SELECTOR, 6),
    // swapExactAmountInOnUniswapV3: same layout as the V2 variant.
    sell(V6::swapExactAmountInOnUniswapV3Call::SELECTOR, 5),
    buy(V6::swapExactAmountOutOnUniswapV3Call::SELECTOR, 6),
    // swapExactAmountInOnBalancerV2(BalancerV2Data, partnerAndFee, permit,
    // data): BalancerV2Data is all-static and inlined — fromAmount is word 0.
    sell(V6::swapExactAmountInOnBalancerV2Call::SELECTOR, 0),
    // swapExactAmountOutOnBalancerV2: toAmount → word 1.
    buy(V6::swapExactAmountOutOnBalancerV2Call::SELECTOR, 1),
];

static OFFSET_MAP: Lazy<HashMap<([u8; 4], TradeSide), u32>> = Lazy::new(|| {
    let mut map = HashMap::with_capacity(OFFSET_TABLE.len());
    for entry in OFFSET_TABLE {
        let prev = map.insert((entry.selector, entry.side), entry.offset);
        assert!(
            prev.is_none(),
            "duplicate offset table entry: 0x{} {}",
            hex::encode(entry.selector),
            entry.side
        );
    }
    map
});

/// Resolve the amount offset for a (selector, side) pair.
///
/// An unknown pair is a hard failure, never a default: patching an
/// unverified offset could rewrite an arbitrary word of router calldata.
pub fn resolve_offset(selector: [u8; 4], side: TradeSide) -> Result<u32, SwapError> {
    OFFSET_MAP
        .get(&(selector, side))
        .copied()
        .ok_or(SwapError::UnrecognizedSelector { selector, side })
}

/// Leading 4 bytes of a calldata buffer, if present.
pub fn selector_of(calldata: &[u8]) -> Option<[u8; 4]> {
    calldata.get(..4)?.try_into().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calldata::read_amount;
    use alloy::primitives::{address, Address, Bytes, FixedBytes, U256};

    const TOKEN_A: Address = address!("7ceB23fD6bC0adD59E62ac25578270cFf1b9f619");
    const TOKEN_B: Address = address!("2791Bca1f2de4661ED88A30C99A7a9449Aa84174");

    fn assert_amount_at_offset(calldata: &[u8], side: TradeSide, amount: U256) {
        let selector = selector_of(calldata).unwrap();
        let offset = resolve_offset(selector, side).unwrap();
        assert_eq!(read_amount(calldata, offset).unwrap(), amount);
    }

    #[test]
    fn table_has_no_duplicates() {
        // Building the map asserts uniqueness per (selector, side).
        assert_eq!(OFFSET_MAP.len(), OFFSET_TABLE.len());
    }

    #[test]
    fn every_entry_resolves_to_its_documented_offset() {
        for entry in OFFSET_TABLE {
            assert_eq!(
                resolve_offset(entry.selector, entry.side).unwrap(),
                entry.offset
            );
        }
    }

    #[test]
    fn offsets_clear_the_selector_and_align_to_words() {
        for entry in OFFSET_TABLE {
            assert!(entry.offset >= 4);
            assert_eq!((entry.offset - 4) % 32, 0);
        }
    }

    #[test]
    fn unknown_selector_fails() {
        let err = resolve_offset([0xde, 0xad, 0xbe, 0xef], TradeSide::Sell).unwrap_err();
        assert!(matches!(err, SwapError::UnrecognizedSelector { .. }));
    }

    #[test]
    fn maker_psm_combined_swap_is_unresolvable_on_both_sides() {
        let selector = V6::swapExactAmountInOutOnMakerPSMCall::SELECTOR;
        for side in [TradeSide::Sell, TradeSide::Buy] {
            let err = resolve_offset(selector, side).unwrap_err();
            assert!(matches!(err, SwapError::UnrecognizedSelector { .. }));
        }
    }

    #[test]
    fn sell_side_wrong_direction_fails() {
        // buyOnUniswap has no sell entry and swapOnUniswap no buy entry.
        assert!(resolve_offset(V5::buyOnUniswapCall::SELECTOR, TradeSide::Sell).is_err());
        assert!(resolve_offset(V5::swapOnUniswapCall::SELECTOR, TradeSide::Buy).is_err());
    }

    // The remaining tests re-derive table offsets from real ABI encodings:
    // encode a call with a marker amount, then check the marker sits exactly
    // at the resolved offset.

    #[test]
    fn swap_on_uniswap_offset_matches_encoding() {
        let amount = U256::from(123_456u64);
        let call = V5::swapOnUniswapCall {
            amountIn: amount,
            amountOutMin: U256::from(1u64),
            path: vec![TOKEN_A, TOKEN_B],
        };
        assert_amount_at_offset(&call.abi_encode(), TradeSide::Sell, amount);
    }

    #[test]
    fn swap_on_uniswap_fork_offset_matches_encoding() {
        let amount = U256::from(777u64);
        let call = V5::swapOnUniswapForkCall {
            factory: TOKEN_A,
            initCode: FixedBytes::ZERO,
            amountIn: amount,
            amountOutMin: U256::from(1u64),
            path: vec![TOKEN_A, TOKEN_B],
        };
        assert_amount_at_offset(&call.abi_encode(), TradeSide::Sell, amount);
    }

    #[test]
    fn buy_on_uniswap_offset_matches_encoding() {
        let amount_out = U256::from(42_000u64);
        let call = V5::buyOnUniswapCall {
            amountInMax: U256::from(99_999u64),
            amountOut: amount_out,
            path: vec![TOKEN_A, TOKEN_B],
        };
        assert_amount_at_offset(&call.abi_encode(), TradeSide::Buy, amount_out);
    }

    fn sample_simple_data(from_amount: U256, to_amount: U256) -> V5::SimpleData {
        V5::SimpleData {
            fromToken: TOKEN_A,
            toToken: TOKEN_B,
            fromAmount: from_amount,
            toAmount: to_amount,
            expectedAmount: to_amount,
            callees: vec![TOKEN_B],
            exchangeData: Bytes::from_static(b"\x01\x02\x03"),
            startIndexes: vec![U256::ZERO],
            values: vec![U256::ZERO],
            beneficiary: TOKEN_A,
            partner: Address::ZERO,
            feePercent: U256::ZERO,
            permit: Bytes::new(),
            deadline: U256::from(1_900_000_000u64),
            uuid: FixedBytes::ZERO,
        }
    }

    #[test]
    fn simple_swap_offset_matches_encoding() {
        let amount = U256::from(5_000_000u64);
        let call = V5::simpleSwapCall {
            data: sample_simple_data(amount, U256::from(1u64)),
        };
        assert_amount_at_offset(&call.abi_encode(), TradeSide::Sell, amount);
    }

    #[test]
    fn simple_buy_offset_matches_encoding() {
        let to_amount = U256::from(31_337u64);
        let call = V5::simpleBuyCall {
            data: sample_simple_data(U256::from(1u64), to_amount),
        };
        assert_amount_at_offset(&call.abi_encode(), TradeSide::Buy, to_amount);
    }

    #[test]
    fn multi_swap_offset_matches_encoding() {
        let amount = U256::from(888u64);
        let call = V5::multiSwapCall {
            data: V5::SellData {
                fromToken: TOKEN_A,
                fromAmount: amount,
                toAmount: U256::from(1u64),
                expectedAmount: U256::from(1u64),
                beneficiary: TOKEN_A,
                route: Bytes::from_static(b"\xaa\xbb"),
                partner: Address::ZERO,
                feePercent: U256::ZERO,
                permit: Bytes::new(),
                deadline: U256::ZERO,
                uuid: FixedBytes::ZERO,
            },
        };
        assert_amount_at_offset(&call.abi_encode(), TradeSide::Sell, amount);
    }

    #[test]
    fn direct_uni_v3_offset_matches_encoding() {
        let amount = U256::from(1_234_567u64);
        let call = V5::directUniV3SwapCall {
            data: V5::DirectUniV3 {
                fromToken: TOKEN_A,
                toToken: TOKEN_B,
                exchange: TOKEN_B,
                path: Bytes::from_static(b"\x00\x01"),
                fromAmount: amount,
                toAmount: U256::from(1u64),
                expectedAmount: U256::from(1u64),
                feePercent: U256::ZERO,
                deadline: U256::ZERO,
                beneficiary: TOKEN_A,
                isApproved: true,
                permit: Bytes::new(),
                uuid: FixedBytes::ZERO,
            },
        };
        assert_amount_at_offset(&call.abi_encode(), TradeSide::Sell, amount);
    }

    fn sample_generic_data(from_amount: U256, to_amount: U256) -> V6::GenericData {
        V6::GenericData {
            srcToken: TOKEN_A,
            destToken: TOKEN_B,
            fromAmount: from_amount,
            toAmount: to_amount,
            quotedAmount: to_amount,
            metadata: FixedBytes::ZERO,
            beneficiary: TOKEN_A,
        }
    }

    #[test]
    fn v6_generic_swap_offsets_match_encoding() {
        let from_amount = U256::from(10u64);
        let to_amount = U256::from(20u64);
        let sell_call = V6::swapExactAmountInCall {
            executor: TOKEN_B,
            swapData: sample_generic_data(from_amount, to_amount),
            partnerAndFee: U256::ZERO,
            permit: Bytes::new(),
            executorData: Bytes::from_static(b"\xff"),
        };
        assert_amount_at_offset(&sell_call.abi_encode(), TradeSide::Sell, from_amount);

        let buy_call = V6::swapExactAmountOutCall {
            executor: TOKEN_B,
            swapData: sample_generic_data(from_amount, to_amount),
            partnerAndFee: U256::ZERO,
            permit: Bytes::new(),
            executorData: Bytes::from_static(b"\xff"),
        };
        assert_amount_at_offset(&buy_call.abi_encode(), TradeSide::Buy, to_amount);
    }

    #[test]
    fn v6_uniswap_v2_offsets_match_encoding() {
        let from_amount = U256::from(55u64);
        let to_amount = U256::from(66u64);
        let data = V6::UniswapV2Data {
            srcToken: TOKEN_A,
            destToken: TOKEN_B,
            fromAmount: from_amount,
            toAmount: to_amount,
            quotedAmount: to_amount,
            metadata: FixedBytes::ZERO,
            beneficiary: TOKEN_A,
            pools: Bytes::from_static(b"\x01"),
        };
        let sell_call = V6::swapExactAmountInOnUniswapV2Call {
            uniData: data.clone(),
            partnerAndFee: U256::ZERO,
            permit: Bytes::new(),
        };
        assert_amount_at_offset(&sell_call.abi_encode(), TradeSide::Sell, from_amount);

        let buy_call = V6::swapExactAmountOutOnUniswapV2Call {
            uniData: data,
            partnerAndFee: U256::ZERO,
            permit: Bytes::new(),
        };
        assert_amount_at_offset(&buy_call.abi_encode(), TradeSide::Buy, to_amount);
    }

    #[test]
    fn v6_balancer_offsets_match_encoding() {
        let from_amount = U256::from(7u64);
        let to_amount = U256::from(8u64);
        let data = V6::BalancerV2Data {
            fromAmount: from_amount,
            toAmount: to_amount,
            quotedAmount: to_amount,
            metadata: FixedBytes::ZERO,
            beneficiaryAndApproveFlag: U256::ZERO,
        };
        let sell_call = V6::swapExactAmountInOnBalancerV2Call {
            balancerData: data.clone(),
            partnerAndFee: U256::ZERO,
            permit: Bytes::new(),
            data: Bytes::from_static(b"\x02"),
        };
        assert_amount_at_offset(&sell_call.abi_encode(), TradeSide::Sell, from_amount);

        let buy_call = V6::swapExactAmountOutOnBalancerV2Call {
            balancerData: data,
            partnerAndFee: U256::ZERO,
            permit: Bytes::new(),
            data: Bytes::from_static(b"\x02"),
        };
        assert_amount_at_offset(&buy_call.abi_encode(), TradeSide::Buy, to_amount);
    }
}
