//! Signature blob parsing
//!
//! A blob is a run of 65-byte `r ‖ s ‖ v` slots followed by a dynamic region
//! holding the length-prefixed payloads of contract signatures. Each contract
//! slot stores the byte offset of its payload in `s`; the smallest such offset
//! marks where the fixed slots end.

use alloy::primitives::{Bytes, B256, U256};
use serde::{Deserialize, Serialize};
use tracing::trace;

use super::kind::{SafeSignature, SignatureType};
use crate::encoding::codec::{
    checked_range, read_u256, signature_split, u256_to_usize, SIGNATURE_LENGTH, WORD,
};
use crate::error::{Error, Result};

/// What to do with a final fragment shorter than one signature slot
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrailingData {
    /// Reject the blob
    #[default]
    Strict,
    /// Stop parsing and drop the fragment; some senders zero-pad the blob
    Ignore,
}

/// Parses a signature blob into its records, in order of appearance
///
/// `preimage` is the data contract owners validate against; it defaults to
/// `safe_hash` when not given.
pub fn parse_signatures(
    signatures: &[u8],
    safe_hash: B256,
    preimage: Option<&[u8]>,
    trailing: TrailingData,
) -> Result<Vec<SafeSignature>> {
    let preimage = Bytes::copy_from_slice(preimage.unwrap_or(safe_hash.as_slice()));
    let mut data_position = signatures.len();
    let mut records = Vec::new();
    let mut i = 0;

    while i < data_position {
        let Some(range) = checked_range(signatures.len(), i, SIGNATURE_LENGTH) else {
            if trailing == TrailingData::Ignore {
                trace!(position = i, len = signatures.len() - i, "ignoring trailing data");
                break;
            }
            return Err(Error::malformed(
                i,
                format!(
                    "trailing {} bytes do not form a signature",
                    signatures.len() - i
                ),
            ));
        };
        let raw: &[u8; SIGNATURE_LENGTH] = signatures[range]
            .try_into()
            .map_err(|_| Error::malformed(i, "signature slot"))?;
        let (r, s, v) = signature_split(raw);
        let slot_end = i + SIGNATURE_LENGTH;

        let record = match SignatureType::from_v(v) {
            SignatureType::ContractSignature => {
                let offset = u256_to_usize(U256::from_be_bytes(s.0))
                    .ok_or_else(|| Error::malformed(i + WORD, "contract signature offset overflows"))?;
                if offset < slot_end {
                    return Err(Error::malformed(
                        i + WORD,
                        format!("contract signature offset {offset} points into the signature slots"),
                    ));
                }
                let contract_signature = read_dynamic(signatures, offset)?;
                data_position = data_position.min(offset);
                SafeSignature::Contract {
                    r,
                    safe_hash,
                    preimage: preimage.clone(),
                    contract_signature,
                }
            }
            SignatureType::ApprovedHash => SafeSignature::ApprovedHash { r, s, safe_hash },
            SignatureType::Eoa => SafeSignature::Eoa { r, s, v, safe_hash },
            SignatureType::EthSign => SafeSignature::EthSign { r, s, v, safe_hash },
        };

        trace!(
            slot = i / SIGNATURE_LENGTH,
            kind = %record.signature_type(),
            "parsed signature"
        );
        records.push(record);
        i = slot_end;
    }

    Ok(records)
}

/// Reads the length-prefixed payload at `offset`
fn read_dynamic(signatures: &[u8], offset: usize) -> Result<Bytes> {
    let len = read_u256(signatures, offset)
        .ok_or_else(|| Error::malformed(offset, "contract signature length out of bounds"))?;
    let len = u256_to_usize(len)
        .ok_or_else(|| Error::malformed(offset, "contract signature length overflows"))?;
    let range = checked_range(signatures.len(), offset + WORD, len).ok_or_else(|| {
        Error::malformed(
            offset,
            format!("contract signature of {len} bytes runs past the end of the blob"),
        )
    })?;
    Ok(Bytes::copy_from_slice(&signatures[range]))
}
