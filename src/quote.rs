//! Quote Provider plumbing: payload wire format, deterministic cache key,
//! and an in-memory TTL cache.
//!
//! The HTTP fetch against the pricing service stays outside this crate;
//! what lives here is everything that must be deterministic for the
//! executor to trust a quote: the fixed-field-order payload encoding and
//! the request hash the cache is keyed by. Identical inputs must always
//! produce byte-identical payload bytes and an identical key.

use crate::error::SwapError;
use crate::selectors::{resolve_offset, selector_of};
use crate::types::{SwapRequest, TradeSide};
use alloy::primitives::{keccak256, Address, Bytes, B256, U256};
use alloy::sol;
use alloy::sol_types::SolValue;
use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;

sol! {
    /// Wire format consumed by the swap executor. `offset == 0` is the
    /// sentinel for "do not patch" (offset 0 would overwrite the selector
    /// and is never a legal patch target).
    struct SwapPayload {
        address augustus;
        bytes swapCalldata;
        uint256 srcAmount;
        uint256 destAmount;
        uint256 offset;
    }
}

/// Decoded quote payload, with the patch sentinel resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuotePayload {
    pub router: Address,
    pub calldata: Vec<u8>,
    pub src_amount: U256,
    pub dest_amount: U256,
    pub patch_offset: Option<u32>,
}

impl QuotePayload {
    /// ABI-encode into the fixed-field-order wire format.
    pub fn encode(&self) -> Vec<u8> {
        let payload = SwapPayload {
            augustus: self.router,
            swapCalldata: Bytes::copy_from_slice(&self.calldata),
            srcAmount: self.src_amount,
            destAmount: self.dest_amount,
            offset: self
                .patch_offset
                .map(U256::from)
                .unwrap_or(U256::ZERO),
        };
        payload.abi_encode()
    }

    /// Decode the wire format back into a payload.
    pub fn decode(data: &[u8]) -> Result<Self> {
        let payload = SwapPayload::abi_decode(data).context("Failed to decode swap payload")?;
        let patch_offset = if payload.offset.is_zero() {
            None
        } else {
            Some(
                u32::try_from(payload.offset)
                    .context("Patch offset in payload exceeds u32")?,
            )
        };
        Ok(Self {
            router: payload.augustus,
            calldata: payload.swapCalldata.to_vec(),
            src_amount: payload.srcAmount,
            dest_amount: payload.destAmount,
            patch_offset,
        })
    }

    /// Derive and set the patch offset from the amount offset table, using
    /// the calldata's own selector. Fails for selectors the table does not
    /// cover; calldata too short to carry a selector is rejected as an
    /// unpatchable buffer.
    pub fn derive_patch_offset(&mut self, side: TradeSide) -> Result<u32, SwapError> {
        let selector = selector_of(&self.calldata).ok_or(SwapError::OffsetOutOfRange {
            offset: 0,
            len: self.calldata.len(),
        })?;
        let offset = resolve_offset(selector, side)?;
        self.patch_offset = Some(offset);
        Ok(offset)
    }

    /// Turn the payload into an executable request.
    ///
    /// `min_dest_amount` defaults to the quoted destination amount when the
    /// caller does not tighten it.
    pub fn into_swap_request(
        self,
        source_asset: Address,
        dest_asset: Address,
        min_dest_amount: Option<U256>,
    ) -> Result<SwapRequest, SwapError> {
        if self.src_amount.is_zero() {
            return Err(SwapError::ZeroSourceAmount);
        }
        Ok(SwapRequest {
            router: self.router,
            min_dest_amount: min_dest_amount.unwrap_or(self.dest_amount),
            calldata: self.calldata,
            source_asset,
            dest_asset,
            source_amount: self.src_amount,
            patch_offset: self.patch_offset,
        })
    }
}

/// Everything that identifies one quote request. Two requests with equal
/// params are the same request and must hit the same cache entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteParams {
    pub chain_id: u64,
    pub src_asset: Address,
    pub dest_asset: Address,
    pub amount: U256,
    pub user: Address,
    pub side: TradeSide,
    pub slippage_bps: u32,
    /// Quote for the user's full balance instead of `amount`.
    pub fetch_max: bool,
    pub src_decimals: u8,
    pub dest_decimals: u8,
}

impl QuoteParams {
    /// Deterministic cache key: keccak256 over the fixed-order ABI encoding
    /// of every parameter.
    pub fn cache_key(&self) -> B256 {
        let side: u16 = match self.side {
            TradeSide::Sell => 0,
            TradeSide::Buy => 1,
        };
        let encoded = (
            self.chain_id,
            self.src_asset,
            self.dest_asset,
            self.amount,
            self.user,
            side,
            self.slippage_bps,
            self.fetch_max,
            u16::from(self.src_decimals),
            u16::from(self.dest_decimals),
        )
            .abi_encode();
        keccak256(encoded)
    }
}

struct CachedQuote {
    payload: Vec<u8>,
    cached_at: DateTime<Utc>,
}

/// In-memory quote cache with TTL expiry, keyed by `QuoteParams::cache_key`.
pub struct QuoteCache {
    entries: DashMap<B256, CachedQuote>,
    ttl: Duration,
}

impl QuoteCache {
    pub fn new(ttl_secs: i64) -> Self {
        Self {
            entries: DashMap::new(),
            ttl: Duration::seconds(ttl_secs),
        }
    }

    /// Fetch a cached payload if it is still fresh. Expired entries are
    /// evicted on access.
    pub fn get(&self, params: &QuoteParams) -> Option<Vec<u8>> {
        let key = params.cache_key();
        if let Some(entry) = self.entries.get(&key) {
            if Utc::now() - entry.cached_at <= self.ttl {
                return Some(entry.payload.clone());
            }
        }
        self.entries.remove(&key);
        None
    }

    pub fn insert(&self, params: &QuoteParams, payload: Vec<u8>) {
        self.entries.insert(
            params.cache_key(),
            CachedQuote {
                payload,
                cached_at: Utc::now(),
            },
        );
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::address;

    const ROUTER: Address = address!("def171fe48cf0115b1d80b88dc8eab59176fee57");
    const SRC: Address = address!("7ceB23fD6bC0adD59E62ac25578270cFf1b9f619");
    const DST: Address = address!("2791Bca1f2de4661ED88A30C99A7a9449Aa84174");
    const USER: Address = address!("00000000000000000000000000000000000000aa");

    fn payload(patch_offset: Option<u32>) -> QuotePayload {
        QuotePayload {
            router: ROUTER,
            calldata: vec![0x54, 0x84, 0x0d, 0x1a, 0x00, 0x01, 0x02],
            src_amount: U256::from(1000u64),
            dest_amount: U256::from(1985u64),
            patch_offset,
        }
    }

    fn params() -> QuoteParams {
        QuoteParams {
            chain_id: 137,
            src_asset: SRC,
            dest_asset: DST,
            amount: U256::from(1000u64),
            user: USER,
            side: TradeSide::Sell,
            slippage_bps: 100,
            fetch_max: false,
            src_decimals: 18,
            dest_decimals: 6,
        }
    }

    #[test]
    fn payload_round_trips() {
        for offset in [None, Some(4u32), Some(164)] {
            let original = payload(offset);
            let decoded = QuotePayload::decode(&original.encode()).unwrap();
            assert_eq!(decoded, original);
        }
    }

    #[test]
    fn encoding_is_byte_identical_for_identical_inputs() {
        assert_eq!(payload(Some(68)).encode(), payload(Some(68)).encode());
    }

    #[test]
    fn zero_offset_decodes_as_no_patch() {
        let decoded = QuotePayload::decode(&payload(None).encode()).unwrap();
        assert_eq!(decoded.patch_offset, None);
    }

    #[test]
    fn into_swap_request_defaults_min_to_quoted_dest() {
        let req = payload(Some(4))
            .into_swap_request(SRC, DST, None)
            .unwrap();
        assert_eq!(req.min_dest_amount, U256::from(1985u64));
        assert_eq!(req.patch_offset, Some(4));
        assert_eq!(req.source_amount, U256::from(1000u64));
    }

    #[test]
    fn into_swap_request_rejects_zero_amount() {
        let mut p = payload(None);
        p.src_amount = U256::ZERO;
        assert!(matches!(
            p.into_swap_request(SRC, DST, None),
            Err(SwapError::ZeroSourceAmount)
        ));
    }

    #[test]
    fn derive_patch_offset_uses_the_table() {
        use crate::contracts::IAugustusSwapperV5 as V5;
        use alloy::sol_types::SolCall;

        let mut p = payload(None);
        p.calldata = V5::swapOnUniswapCall {
            amountIn: U256::from(1u64),
            amountOutMin: U256::from(1u64),
            path: vec![SRC, DST],
        }
        .abi_encode();
        // swapOnUniswap: amountIn is the first word, offset 4.
        assert_eq!(p.derive_patch_offset(TradeSide::Sell).unwrap(), 4);
        assert_eq!(p.patch_offset, Some(4));
        // No buy entry for this selector.
        assert!(matches!(
            p.derive_patch_offset(TradeSide::Buy),
            Err(SwapError::UnrecognizedSelector { .. })
        ));
    }

    #[test]
    fn derive_patch_offset_rejects_truncated_calldata() {
        let mut p = payload(None);
        p.calldata = vec![0x54, 0x84];
        assert!(matches!(
            p.derive_patch_offset(TradeSide::Sell),
            Err(SwapError::OffsetOutOfRange { offset: 0, len: 2 })
        ));
    }

    #[test]
    fn cache_key_is_idempotent() {
        assert_eq!(params().cache_key(), params().cache_key());
    }

    #[test]
    fn cache_key_separates_every_parameter() {
        let base = params().cache_key();
        let mut p = params();
        p.side = TradeSide::Buy;
        assert_ne!(p.cache_key(), base);
        let mut p = params();
        p.slippage_bps = 101;
        assert_ne!(p.cache_key(), base);
        let mut p = params();
        p.fetch_max = true;
        assert_ne!(p.cache_key(), base);
        let mut p = params();
        p.chain_id = 1;
        assert_ne!(p.cache_key(), base);
        let mut p = params();
        p.dest_decimals = 18;
        assert_ne!(p.cache_key(), base);
    }

    #[test]
    fn cache_returns_identical_bytes_for_identical_requests() {
        let cache = QuoteCache::new(60);
        let bytes = payload(Some(4)).encode();
        cache.insert(&params(), bytes.clone());
        assert_eq!(cache.get(&params()).unwrap(), bytes);
        assert_eq!(cache.get(&params()).unwrap(), bytes);
    }

    #[test]
    fn expired_entries_are_evicted() {
        let cache = QuoteCache::new(-1);
        cache.insert(&params(), payload(None).encode());
        assert!(cache.get(&params()).is_none());
        assert!(cache.is_empty());
    }
}
