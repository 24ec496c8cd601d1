//! Calldata Patcher
//!
//! Rewrites a single 32-byte amount word inside an ABI calldata buffer
//! without changing the buffer length. The offset bounds are checked here:
//! a write may never touch the 4-byte selector and never reach past the
//! end of the buffer.

use crate::error::SwapError;
use alloy::primitives::U256;

/// Length of the leading function selector.
pub const SELECTOR_LEN: usize = 4;

/// Length of one ABI word.
pub const WORD_LEN: usize = 32;

/// Overwrite the 32-byte word at `offset` with `new_amount` (big-endian).
///
/// The executor owns the buffer exclusively for the duration of the call,
/// so in-place mutation is safe.
pub fn patch_amount(calldata: &mut [u8], offset: u32, new_amount: U256) -> Result<(), SwapError> {
    check_offset(calldata.len(), offset)?;
    let start = offset as usize;
    calldata[start..start + WORD_LEN].copy_from_slice(&new_amount.to_be_bytes::<WORD_LEN>());
    Ok(())
}

/// Read the 32-byte word at `offset` back as an amount.
pub fn read_amount(calldata: &[u8], offset: u32) -> Result<U256, SwapError> {
    check_offset(calldata.len(), offset)?;
    let start = offset as usize;
    Ok(U256::from_be_slice(&calldata[start..start + WORD_LEN]))
}

fn check_offset(len: usize, offset: u32) -> Result<(), SwapError> {
    let start = offset as usize;
    let in_range = start >= SELECTOR_LEN
        && start
            .checked_add(WORD_LEN)
            .is_some_and(|end| end <= len);
    if in_range {
        Ok(())
    } else {
        Err(SwapError::OffsetOutOfRange { offset, len })
    }
}
