//! Bounds checked readers over a pubdata buffer.

use crate::DecodingError;

use alloy_primitives::{bytes::Buf, Address, B256};

/// The length of an address in bytes.
pub const ADDRESS_BYTES: usize = 20;

/// The length of a hash in bytes.
pub const HASH_BYTES: usize = 32;

/// Returns the `len` bytes of `buf` starting at `offset`.
///
/// Fails with [`DecodingError::OutOfRange`] if `offset + len > buf.len()`.
pub fn read_bytes(buf: &[u8], offset: usize, len: usize) -> Result<&[u8], DecodingError> {
    let end = offset.checked_add(len).filter(|end| *end <= buf.len()).ok_or(
        DecodingError::OutOfRange {
            offset,
            required: len,
            available: buf.len().saturating_sub(offset),
        },
    )?;
    Ok(&buf[offset..end])
}

/// Reads a big-endian unsigned integer of `width_bits` bits from `buf` at `offset`.
///
/// The width must be a non zero multiple of 8, at most 128. Fails with
/// [`DecodingError::OutOfRange`] if the integer does not fit in the buffer.
pub fn read_uint(buf: &[u8], offset: usize, width_bits: u32) -> Result<u128, DecodingError> {
    if width_bits == 0 || width_bits % 8 != 0 || width_bits > u128::BITS {
        return Err(DecodingError::InvalidWidth(width_bits))
    }
    let bytes = read_bytes(buf, offset, (width_bits / 8) as usize)?;
    Ok(bytes.iter().fold(0u128, |acc, byte| (acc << 8) | u128::from(*byte)))
}

/// Reads an [`Address`] from the front of the buffer and advances it.
pub(crate) fn address_from_buf(buf: &mut &[u8]) -> Address {
    let address = Address::from_slice(&buf[..ADDRESS_BYTES]);
    buf.advance(ADDRESS_BYTES);
    address
}

/// Reads a [`B256`] from the front of the buffer and advances it.
pub(crate) fn b256_from_buf(buf: &mut &[u8]) -> B256 {
    let hash = B256::from_slice(&buf[..HASH_BYTES]);
    buf.advance(HASH_BYTES);
    hash
}
