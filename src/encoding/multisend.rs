//! MultiSend transaction encoding and decoding
//!
//! The MultiSend contract expects transactions to be encoded in a packed format:
//! - operation: 1 byte (0 = Call, 1 = DelegateCall)
//! - to: 20 bytes
//! - value: 32 bytes
//! - data length: 32 bytes
//! - data: variable length
//!
//! Batches built for the first MultiSend deployment used a 32-byte aligned
//! layout instead (every field ABI-encoded as a word, data padded). That
//! layout is not self-describing, so decoding tries the packed layout first
//! and falls back to the legacy one.

use alloy::primitives::{Address, Bytes, U256};
use alloy::sol_types::SolCall;
use tracing::trace;

use super::codec::{
    address_word, ceil32, checked_range, read_word, u256_to_usize, usize_word,
    word_to_address, WORD,
};
use crate::contracts::IMultiSend;
use crate::error::{Error, Result};
use crate::types::{MultiSendCall, Operation, SafeCall};

/// Fixed header size of a packed transaction: operation + to + value + data length
const PACKED_HEADER_LEN: usize = 1 + 20 + 32 + 32;

/// Fixed header size of a legacy transaction: operation, to, value, data offset, data length
const LEGACY_HEADER_LEN: usize = 5 * WORD;

/// Encodes a single transaction for MultiSend packed format
///
/// Format: operation (1 byte) | to (20 bytes) | value (32 bytes) | data length (32 bytes) | data
pub fn encode_transaction(call: &impl SafeCall) -> Vec<u8> {
    let data = call.data();

    let mut encoded = Vec::with_capacity(PACKED_HEADER_LEN + data.len());
    encoded.push(call.operation().as_u8());
    encoded.extend_from_slice(call.to().as_slice());
    encoded.extend_from_slice(&call.value().to_be_bytes::<32>());
    encoded.extend_from_slice(&usize_word(data.len()));
    encoded.extend_from_slice(&data);

    encoded
}

/// Encodes a single transaction in the legacy 32-byte aligned layout
///
/// Format: operation (32) | to (32) | value (32) | data offset (32) | data length (32) | data (padded)
///
/// Only useful for producing payloads for historic MultiSend deployments;
/// [`encode_multisend_data`] always emits the packed layout.
pub fn encode_legacy_transaction(call: &impl SafeCall) -> Vec<u8> {
    let data = call.data();
    let padded_len = data.len().div_ceil(WORD) * WORD;

    let mut encoded = Vec::with_capacity(LEGACY_HEADER_LEN + padded_len);
    encoded.extend_from_slice(&usize_word(call.operation().as_u8() as usize));
    encoded.extend_from_slice(&address_word(call.to()));
    encoded.extend_from_slice(&call.value().to_be_bytes::<32>());
    // offset of `data` within the (operation, to, value, data) tuple
    encoded.extend_from_slice(&usize_word(4 * WORD));
    encoded.extend_from_slice(&usize_word(data.len()));
    encoded.extend_from_slice(&data);
    encoded.resize(LEGACY_HEADER_LEN + padded_len, 0);

    encoded
}

/// Encodes multiple transactions for MultiSend
pub fn encode_multisend_data(calls: &[impl SafeCall]) -> Bytes {
    let mut encoded = Vec::new();

    for call in calls {
        encoded.extend(encode_transaction(call));
    }

    Bytes::from(encoded)
}

/// Encodes `multiSend(bytes)` calldata for a batch
pub fn encode_multisend_calldata(calls: &[impl SafeCall]) -> Bytes {
    let call = IMultiSend::multiSendCall {
        transactions: encode_multisend_data(calls),
    };
    Bytes::from(call.abi_encode())
}

/// Binary layout of a MultiSend entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MultiSendLayout {
    /// Packed layout used by every MultiSend since v1.1.0
    Current,
    /// 32-byte aligned layout of the first MultiSend deployment
    Legacy,
}

impl MultiSendLayout {
    /// Decodes the first transaction in `encoded`
    ///
    /// Returns the call and the number of bytes it occupies, i.e. where the
    /// next transaction starts. Bytes after that point are not inspected.
    pub fn decode_one(self, encoded: &[u8]) -> Result<(MultiSendCall, usize)> {
        match self {
            MultiSendLayout::Current => decode_packed(encoded),
            MultiSendLayout::Legacy => decode_legacy(encoded),
        }
    }
}

fn decode_error(position: usize, reason: impl Into<String>) -> Error {
    Error::MultiSendDecode {
        position,
        reason: reason.into(),
    }
}

fn parse_operation(value: U256, position: usize) -> Result<Operation> {
    u8::try_from(value)
        .ok()
        .and_then(Operation::from_u8)
        .ok_or_else(|| decode_error(position, format!("invalid operation {value}")))
}

/// Reads `data_length` bytes at `start`, failing when the buffer holds fewer
fn read_data(encoded: &[u8], start: usize, data_length: U256) -> Result<Bytes> {
    let available = encoded.len().saturating_sub(start);
    let range = u256_to_usize(data_length)
        .and_then(|len| checked_range(encoded.len(), start, len))
        .ok_or_else(|| {
            decode_error(
                start,
                format!("data length {data_length} is different from len(data) {available}"),
            )
        })?;
    Ok(Bytes::copy_from_slice(&encoded[range]))
}

fn decode_packed(encoded: &[u8]) -> Result<(MultiSendCall, usize)> {
    if encoded.len() < PACKED_HEADER_LEN {
        return Err(decode_error(
            0,
            format!("{} bytes is shorter than a packed header", encoded.len()),
        ));
    }

    let operation = parse_operation(U256::from(encoded[0]), 0)?;
    let to = Address::from_slice(&encoded[1..21]);
    let value = U256::from_be_slice(&encoded[21..53]);
    let data_length = U256::from_be_slice(&encoded[53..85]);
    let data = read_data(encoded, PACKED_HEADER_LEN, data_length)?;

    let call = MultiSendCall::new(operation, to, value, data);
    let consumed = call.encoded_len();
    Ok((call, consumed))
}

fn decode_legacy(encoded: &[u8]) -> Result<(MultiSendCall, usize)> {
    let word = |index: usize| {
        read_word(encoded, index * WORD).ok_or_else(|| {
            decode_error(
                index * WORD,
                format!("{} bytes is shorter than a legacy header", encoded.len()),
            )
        })
    };

    let operation = parse_operation(U256::from_be_bytes(word(0)?.0), 0)?;
    let to = word_to_address(&word(1)?);
    let value = U256::from_be_bytes(word(2)?.0);
    let data_length = U256::from_be_bytes(word(4)?.0);
    let data = read_data(encoded, LEGACY_HEADER_LEN, data_length)?;

    // the data field is padded to a word boundary; tolerate a missing final pad
    let padded = ceil32(data.len())
        .ok_or_else(|| decode_error(LEGACY_HEADER_LEN, "data length overflow"))?;
    let consumed = (LEGACY_HEADER_LEN + padded).min(encoded.len());

    Ok((MultiSendCall::new(operation, to, value, data), consumed))
}

/// Decodes one packed transaction, falling back to the legacy layout
///
/// When both layouts fail the packed-layout error is returned, since that is
/// the layout every current deployment produces.
pub fn decode_transaction(encoded: &[u8]) -> Result<(MultiSendCall, usize, MultiSendLayout)> {
    match MultiSendLayout::Current.decode_one(encoded) {
        Ok((call, consumed)) => Ok((call, consumed, MultiSendLayout::Current)),
        Err(current_err) => {
            trace!(%current_err, "packed MultiSend decode failed, trying legacy layout");
            MultiSendLayout::Legacy
                .decode_one(encoded)
                .map(|(call, consumed)| (call, consumed, MultiSendLayout::Legacy))
                .map_err(|_| current_err)
        }
    }
}

/// Decodes every transaction in a MultiSend `transactions` payload
///
/// Layout detection happens per transaction, consuming the buffer until it is
/// exhausted. An empty buffer decodes to an empty batch.
pub fn decode_multisend_data(encoded: &[u8]) -> Result<Vec<MultiSendCall>> {
    let mut calls = Vec::new();
    let mut cursor = 0usize;

    while cursor < encoded.len() {
        let (call, consumed, layout) =
            decode_transaction(&encoded[cursor..]).map_err(|err| match err {
                Error::MultiSendDecode { position, reason } => Error::MultiSendDecode {
                    position: cursor + position,
                    reason,
                },
                other => other,
            })?;
        trace!(index = calls.len(), ?layout, to = %call.to, "decoded MultiSend transaction");

        cursor += consumed;
        calls.push(call);
    }

    Ok(calls)
}

/// Decodes the calls from `multiSend(bytes)` calldata (selector included)
pub fn decode_multisend_calldata(calldata: &[u8]) -> Result<Vec<MultiSendCall>> {
    let call = IMultiSend::multiSendCall::abi_decode(calldata)?;
    decode_multisend_data(&call.transactions)
}
