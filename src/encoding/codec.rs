//! Fixed-width big-endian helpers shared by the signature and MultiSend codecs
//!
//! All readers take the whole buffer plus an integer offset and check bounds
//! before slicing, so callers never hold unchecked sub-slices.

use alloy::primitives::{Address, B256, U256};

/// Size of a single `r ‖ s ‖ v` signature slot
pub const SIGNATURE_LENGTH: usize = 65;

/// Size of an ABI word
pub const WORD: usize = 32;

/// Left-pads an address to a 32-byte word
pub fn address_word(address: Address) -> [u8; 32] {
    let mut word = [0u8; 32];
    word[12..].copy_from_slice(address.as_slice());
    word
}

/// Encodes a length or offset as a 32-byte big-endian word
pub fn usize_word(value: usize) -> [u8; 32] {
    U256::from(value).to_be_bytes::<32>()
}

/// Interprets the low 20 bytes of a word as an address
///
/// The upper 12 bytes are ignored even when non-zero, matching how Solidity
/// truncates `uint256` to `address`.
pub fn word_to_address(word: &B256) -> Address {
    Address::from_slice(&word[12..])
}

/// Returns `start..start + len` if it lies within a buffer of `buf_len` bytes
pub fn checked_range(buf_len: usize, start: usize, len: usize) -> Option<std::ops::Range<usize>> {
    let end = start.checked_add(len)?;
    (end <= buf_len).then_some(start..end)
}

/// Reads the 32-byte word at `offset`
pub fn read_word(buf: &[u8], offset: usize) -> Option<B256> {
    let range = checked_range(buf.len(), offset, WORD)?;
    Some(B256::from_slice(&buf[range]))
}

/// Reads the 32-byte word at `offset` as an unsigned integer
pub fn read_u256(buf: &[u8], offset: usize) -> Option<U256> {
    read_word(buf, offset).map(|word| U256::from_be_bytes(word.0))
}

/// Narrows a word-sized integer to `usize`, failing on overflow
pub fn u256_to_usize(value: U256) -> Option<usize> {
    usize::try_from(value).ok()
}

/// Splits a 65-byte signature into `(r, s, v)`
pub fn signature_split(signature: &[u8; SIGNATURE_LENGTH]) -> (B256, B256, u8) {
    let r = B256::from_slice(&signature[..32]);
    let s = B256::from_slice(&signature[32..64]);
    (r, s, signature[64])
}

/// Joins `(r, s, v)` into the 65-byte layout the Safe contract reads
pub fn signature_to_bytes(r: B256, s: B256, v: u8) -> [u8; SIGNATURE_LENGTH] {
    let mut out = [0u8; SIGNATURE_LENGTH];
    out[..32].copy_from_slice(r.as_slice());
    out[32..64].copy_from_slice(s.as_slice());
    out[64] = v;
    out
}

/// Rounds `len` up to the next multiple of 32
pub fn ceil32(len: usize) -> Option<usize> {
    len.checked_add(WORD - 1).map(|n| n / WORD * WORD)
}
