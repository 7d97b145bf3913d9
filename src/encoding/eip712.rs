//! EIP-712 and EIP-191 hash composition for Safe transactions and messages

use alloy::primitives::{eip191_hash_message, keccak256, Address, Bytes, B256, U256};
use alloy::sol_types::SolValue;
use serde::{Deserialize, Serialize};

use crate::contracts::{DOMAIN_SEPARATOR_TYPEHASH, SAFE_TX_TYPEHASH};
use crate::types::Operation;

/// EIP-712 type hash for SafeMessage struct
/// keccak256("SafeMessage(bytes message)")
pub const SAFE_MSG_TYPEHASH: [u8; 32] = [
    0x60, 0xb3, 0xcb, 0xf8, 0xb4, 0xa2, 0x23, 0xd6, 0x8d, 0x64, 0x1b, 0x3b, 0x6d, 0xdf, 0x9a, 0x29,
    0x8e, 0x7f, 0x33, 0x71, 0x0c, 0xf3, 0xd3, 0xa9, 0xd1, 0x14, 0x6b, 0x5a, 0x61, 0x50, 0xfb, 0xca,
];

/// Safe transaction parameters for hashing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SafeTxParams {
    /// Target address
    pub to: Address,
    /// Value to send
    pub value: U256,
    /// Calldata
    pub data: Bytes,
    /// Operation type
    pub operation: Operation,
    /// Gas limit for the Safe transaction
    pub safe_tx_gas: U256,
    /// Base gas (overhead)
    pub base_gas: U256,
    /// Gas price for refund calculation
    pub gas_price: U256,
    /// Token used for gas refund (address(0) for ETH)
    pub gas_token: Address,
    /// Address to receive gas refund
    pub refund_receiver: Address,
    /// Safe nonce
    pub nonce: U256,
}

impl SafeTxParams {
    /// Creates new SafeTxParams with minimal parameters
    pub fn new(to: Address, value: U256, data: impl Into<Bytes>, operation: Operation) -> Self {
        Self {
            to,
            value,
            data: data.into(),
            operation,
            safe_tx_gas: U256::ZERO,
            base_gas: U256::ZERO,
            gas_price: U256::ZERO,
            gas_token: Address::ZERO,
            refund_receiver: Address::ZERO,
            nonce: U256::ZERO,
        }
    }

    /// Sets the safe transaction gas
    pub fn with_safe_tx_gas(mut self, gas: U256) -> Self {
        self.safe_tx_gas = gas;
        self
    }

    /// Sets the nonce
    pub fn with_nonce(mut self, nonce: U256) -> Self {
        self.nonce = nonce;
        self
    }
}

/// Computes the EIP-712 domain separator of `safe_address` on `chain_id`
pub fn compute_domain_separator(chain_id: u64, safe_address: Address) -> B256 {
    keccak256(
        (
            B256::from(DOMAIN_SEPARATOR_TYPEHASH),
            U256::from(chain_id),
            safe_address,
        )
            .abi_encode(),
    )
}

/// Computes the `SafeTx` struct hash
///
/// `data` enters the struct as its keccak256, per EIP-712 `bytes` encoding.
pub fn compute_safe_tx_hash(params: &SafeTxParams) -> B256 {
    keccak256(
        (
            B256::from(SAFE_TX_TYPEHASH),
            params.to,
            params.value,
            keccak256(&params.data),
            U256::from(params.operation.as_u8()),
            params.safe_tx_gas,
            params.base_gas,
            params.gas_price,
            params.gas_token,
            params.refund_receiver,
            params.nonce,
        )
            .abi_encode(),
    )
}

/// Builds the 66-byte EIP-712 envelope `0x1901 ‖ domainSeparator ‖ structHash`
pub fn encode_typed_data(domain_separator: B256, struct_hash: B256) -> Bytes {
    let mut encoded = Vec::with_capacity(66);
    encoded.extend_from_slice(&[0x19, 0x01]);
    encoded.extend_from_slice(domain_separator.as_slice());
    encoded.extend_from_slice(struct_hash.as_slice());
    Bytes::from(encoded)
}

/// Computes the final EIP-712 hash to sign
///
/// hash = keccak256("\x19\x01" || domainSeparator || structHash)
pub fn compute_transaction_hash(domain_separator: B256, safe_tx_hash: B256) -> B256 {
    keccak256(encode_typed_data(domain_separator, safe_tx_hash))
}

/// Returns the preimage of the Safe transaction hash
///
/// This is what `encodeTransactionData` returns on chain and what contract
/// owners receive as `_data` in the legacy EIP-1271 check.
pub fn encode_transaction_data(chain_id: u64, safe_address: Address, params: &SafeTxParams) -> Bytes {
    let domain_separator = compute_domain_separator(chain_id, safe_address);
    encode_typed_data(domain_separator, compute_safe_tx_hash(params))
}

/// Computes the complete transaction hash for signing
pub fn compute_safe_transaction_hash(
    chain_id: u64,
    safe_address: Address,
    params: &SafeTxParams,
) -> B256 {
    keccak256(encode_transaction_data(chain_id, safe_address, params))
}

/// Computes the hash a Safe signs for an off-chain message (EIP-1271 via the fallback handler)
///
/// messageHash = keccak256(0x1901 ‖ domainSeparator ‖ keccak256(abi.encode(SAFE_MSG_TYPEHASH, keccak256(message))))
pub fn compute_safe_message_hash(chain_id: u64, safe_address: Address, message: &[u8]) -> B256 {
    let mut encoded = Vec::with_capacity(64);
    encoded.extend_from_slice(&SAFE_MSG_TYPEHASH);
    encoded.extend_from_slice(keccak256(message).as_slice());
    let struct_hash = keccak256(&encoded);

    let domain_separator = compute_domain_separator(chain_id, safe_address);
    compute_transaction_hash(domain_separator, struct_hash)
}

/// Wraps a hash with the `"\x19Ethereum Signed Message:\n32"` prefix
///
/// Safe `eth_sign` signatures (v > 30) are produced over this value.
pub fn eth_sign_message_hash(hash: B256) -> B256 {
    eip191_hash_message(hash)
}
