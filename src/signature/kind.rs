//! Safe signature variants
//!
//! The Safe contract packs four kinds of owner signatures into the same
//! 65-byte `r ‖ s ‖ v` slot and tells them apart by `v`.

use std::fmt;

use alloy::primitives::{Address, Bytes, Signature, B256, U256};
use serde::{Deserialize, Serialize};

use crate::encoding::codec::{
    address_word, signature_split, signature_to_bytes, usize_word, word_to_address,
    SIGNATURE_LENGTH,
};
use crate::encoding::eth_sign_message_hash;
use crate::error::{Error, Result};

/// Kind of a Safe signature, derived from its `v` byte
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SignatureType {
    /// `v == 0`: EIP-1271 signature checked by the owner contract
    ContractSignature,
    /// `v == 1`: hash pre-approved on chain through `approveHash`
    ApprovedHash,
    /// `v ∈ {27, 28}`: ECDSA over the Safe hash
    Eoa,
    /// `v > 30`: ECDSA over the EIP-191 wrapped Safe hash, `v` shifted by 4
    EthSign,
}

impl SignatureType {
    /// Classifies a signature slot by its `v` byte
    pub fn from_v(v: u8) -> Self {
        match v {
            0 => SignatureType::ContractSignature,
            1 => SignatureType::ApprovedHash,
            v if v > 30 => SignatureType::EthSign,
            _ => SignatureType::Eoa,
        }
    }
}

impl fmt::Display for SignatureType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SignatureType::ContractSignature => "CONTRACT_SIGNATURE",
            SignatureType::ApprovedHash => "APPROVED_HASH",
            SignatureType::Eoa => "EOA",
            SignatureType::EthSign => "ETH_SIGN",
        };
        f.write_str(name)
    }
}

/// A parsed, not yet validated Safe signature
///
/// Contract signatures do not keep their `s` word: inside a blob it is only
/// the offset of the dynamic payload and is recomputed on export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SafeSignature {
    /// EIP-1271 signature; `r` holds the owner contract
    Contract {
        r: B256,
        safe_hash: B256,
        /// Data handed to the owner's `isValidSignature`
        preimage: Bytes,
        /// Payload from the dynamic region of the blob
        contract_signature: Bytes,
    },
    /// On-chain approval; `r` holds the owner
    ApprovedHash { r: B256, s: B256, safe_hash: B256 },
    /// ECDSA signature over `safe_hash`
    Eoa { r: B256, s: B256, v: u8, safe_hash: B256 },
    /// ECDSA signature over the EIP-191 wrapped `safe_hash`
    EthSign { r: B256, s: B256, v: u8, safe_hash: B256 },
}

impl SafeSignature {
    /// Builds a single-slot signature from its 65 raw bytes
    ///
    /// Contract signatures carry a dynamic payload and cannot be built from one
    /// slot; use [`crate::parse_signatures`] or [`SafeSignature::contract`].
    pub fn from_bytes(signature: &[u8], safe_hash: B256) -> Result<Self> {
        let raw: &[u8; SIGNATURE_LENGTH] = signature.try_into().map_err(|_| {
            Error::malformed(
                0,
                format!(
                    "expected {SIGNATURE_LENGTH} signature bytes, got {}",
                    signature.len()
                ),
            )
        })?;
        let (r, s, v) = signature_split(raw);
        match SignatureType::from_v(v) {
            SignatureType::ContractSignature => Err(Error::malformed(
                64,
                "contract signature needs its dynamic part",
            )),
            SignatureType::ApprovedHash => Ok(SafeSignature::ApprovedHash { r, s, safe_hash }),
            SignatureType::Eoa => Ok(SafeSignature::Eoa { r, s, v, safe_hash }),
            SignatureType::EthSign => Ok(SafeSignature::EthSign { r, s, v, safe_hash }),
        }
    }

    /// Builds a pre-validated signature for `owner`, checked against `approvedHashes`
    pub fn approved_hash(owner: Address, safe_hash: B256) -> Self {
        SafeSignature::ApprovedHash {
            r: B256::from(address_word(owner)),
            s: B256::ZERO,
            safe_hash,
        }
    }

    /// Builds an EIP-1271 signature for the owner contract `owner`
    pub fn contract(
        owner: Address,
        safe_hash: B256,
        preimage: impl Into<Bytes>,
        contract_signature: impl Into<Bytes>,
    ) -> Self {
        SafeSignature::Contract {
            r: B256::from(address_word(owner)),
            safe_hash,
            preimage: preimage.into(),
            contract_signature: contract_signature.into(),
        }
    }

    /// Returns the kind of this signature
    pub fn signature_type(&self) -> SignatureType {
        match self {
            SafeSignature::Contract { .. } => SignatureType::ContractSignature,
            SafeSignature::ApprovedHash { .. } => SignatureType::ApprovedHash,
            SafeSignature::Eoa { .. } => SignatureType::Eoa,
            SafeSignature::EthSign { .. } => SignatureType::EthSign,
        }
    }

    /// Returns the hash this signature claims to cover
    pub fn safe_hash(&self) -> B256 {
        match self {
            SafeSignature::Contract { safe_hash, .. }
            | SafeSignature::ApprovedHash { safe_hash, .. }
            | SafeSignature::Eoa { safe_hash, .. }
            | SafeSignature::EthSign { safe_hash, .. } => *safe_hash,
        }
    }

    /// Returns the `r` word
    pub fn r(&self) -> B256 {
        match self {
            SafeSignature::Contract { r, .. }
            | SafeSignature::ApprovedHash { r, .. }
            | SafeSignature::Eoa { r, .. }
            | SafeSignature::EthSign { r, .. } => *r,
        }
    }

    /// Returns the `v` byte
    pub fn v(&self) -> u8 {
        match self {
            SafeSignature::Contract { .. } => 0,
            SafeSignature::ApprovedHash { .. } => 1,
            SafeSignature::Eoa { v, .. } | SafeSignature::EthSign { v, .. } => *v,
        }
    }

    /// Returns the payload of a contract signature
    pub fn contract_signature(&self) -> Option<&Bytes> {
        match self {
            SafeSignature::Contract {
                contract_signature, ..
            } => Some(contract_signature),
            _ => None,
        }
    }

    /// Returns the 65-byte slot
    ///
    /// For contract signatures `s` is 65, the offset used when the signature
    /// is exported on its own.
    pub fn raw(&self) -> [u8; SIGNATURE_LENGTH] {
        let s = match self {
            SafeSignature::Contract { .. } => B256::from(usize_word(SIGNATURE_LENGTH)),
            SafeSignature::ApprovedHash { s, .. }
            | SafeSignature::Eoa { s, .. }
            | SafeSignature::EthSign { s, .. } => *s,
        };
        signature_to_bytes(self.r(), s, self.v())
    }

    /// Returns the 65-byte slot as [`Bytes`]
    pub fn to_bytes(&self) -> Bytes {
        Bytes::copy_from_slice(&self.raw())
    }

    /// Returns the address this signature claims to be from
    ///
    /// This does not check the signature is valid: ECDSA kinds recover a key,
    /// the other kinds read the owner out of `r`.
    pub fn owner(&self) -> Result<Address> {
        match self {
            SafeSignature::Contract { r, .. } | SafeSignature::ApprovedHash { r, .. } => {
                Ok(word_to_address(r))
            }
            SafeSignature::Eoa { r, s, v, safe_hash } => recover(*safe_hash, *r, *s, *v),
            SafeSignature::EthSign { r, s, v, safe_hash } => {
                recover(eth_sign_message_hash(*safe_hash), *r, *s, v.wrapping_sub(4))
            }
        }
    }

    /// Serializes this signature so it is valid on its own
    ///
    /// Contract signatures are followed by their length-prefixed payload;
    /// every other kind is its raw slot.
    pub fn export_signature(&self) -> Bytes {
        let mut out = self.raw().to_vec();
        if let Some(payload) = self.contract_signature() {
            out.extend_from_slice(&usize_word(payload.len()));
            out.extend_from_slice(payload);
        }
        Bytes::from(out)
    }
}

impl fmt::Display for SafeSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.owner() {
            Ok(owner) => write!(f, "SafeSignature type={} owner={}", self.signature_type(), owner),
            Err(_) => write!(f, "SafeSignature type={} owner=?", self.signature_type()),
        }
    }
}

/// Recovers the signer of `hash` from an `r ‖ s ‖ v` triple with `v ∈ {27, 28}`
fn recover(hash: B256, r: B256, s: B256, v: u8) -> Result<Address> {
    let y_parity = match v {
        27 => false,
        28 => true,
        _ => return Err(Error::InvalidSignature(format!("unsupported v value {v}"))),
    };
    let signature = Signature::new(U256::from_be_bytes(r.0), U256::from_be_bytes(s.0), y_parity);
    signature
        .recover_address_from_prehash(&hash)
        .map_err(|e| Error::InvalidSignature(e.to_string()))
}
