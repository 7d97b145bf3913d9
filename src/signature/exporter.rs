//! Canonical signature blob export

use alloy::primitives::{Address, Bytes, B256};
use tracing::debug;

use super::kind::SafeSignature;
use crate::encoding::codec::{signature_to_bytes, usize_word, SIGNATURE_LENGTH, WORD};
use crate::error::Result;

/// Serializes signatures into the blob `checkSignatures` expects
///
/// Slots are sorted by owner, ascending, as the Safe contract rejects any
/// other order. Contract signature payloads follow the slots in the same
/// order, each as `len ‖ payload`, and each contract slot's `s` holds the
/// offset of its payload.
pub fn export_signatures(signatures: &[SafeSignature]) -> Result<Bytes> {
    let mut sorted = signatures
        .iter()
        .map(|signature| Ok((signature.owner()?, signature)))
        .collect::<Result<Vec<(Address, &SafeSignature)>>>()?;
    sorted.sort_by_key(|(owner, _)| *owner);

    let mut slots = Vec::with_capacity(sorted.len() * SIGNATURE_LENGTH);
    let mut dynamic = Vec::new();
    let mut offset = sorted.len() * SIGNATURE_LENGTH;

    for (_, signature) in &sorted {
        match signature.contract_signature() {
            Some(payload) => {
                slots.extend_from_slice(&signature_to_bytes(
                    signature.r(),
                    B256::from(usize_word(offset)),
                    0,
                ));
                dynamic.extend_from_slice(&usize_word(payload.len()));
                dynamic.extend_from_slice(payload);
                offset += WORD + payload.len();
            }
            None => slots.extend_from_slice(&signature.raw()),
        }
    }

    debug!(
        signatures = sorted.len(),
        dynamic_len = dynamic.len(),
        "exported signatures"
    );

    slots.extend_from_slice(&dynamic);
    Ok(Bytes::from(slots))
}
