//! Canonical Safe deployments

use alloy::primitives::{address, Address, B256, U256};
use serde::{Deserialize, Serialize};

use crate::create2::{encode_setup_call, predict_safe_address};
use crate::encoding::{compute_safe_message_hash, compute_safe_transaction_hash, SafeTxParams};

/// Safe contract addresses for one release
///
/// Canonical deployments use the same addresses on every chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainAddresses {
    /// Safe singleton address
    pub safe_singleton: Address,
    /// MultiSend contract address
    pub multi_send: Address,
    /// MultiSendCallOnly contract address
    pub multi_send_call_only: Address,
    /// Safe proxy factory address
    pub proxy_factory: Address,
    /// Compatibility fallback handler
    pub fallback_handler: Address,
}

impl Default for ChainAddresses {
    fn default() -> Self {
        Self::v1_4_1()
    }
}

impl ChainAddresses {
    /// Returns the canonical Safe v1.4.1 addresses
    pub fn v1_4_1() -> Self {
        Self {
            safe_singleton: address!("41675C099F32341bf84BFc5382aF534df5C7461a"),
            multi_send: address!("38869bf66a61cF6bDB996A6aE40D5853Fd43B526"),
            multi_send_call_only: address!("9641d764fc13c8B624c04430C7356C1C7C8102e2"),
            proxy_factory: address!("4e1DCf7AD4e460CfD30791CCC4F9c8a4f820ec67"),
            fallback_handler: address!("fd0732Dc9E303f09fCEf3a7388Ad10A83459Ec99"),
        }
    }

    /// Returns the canonical Safe v1.3.0 addresses
    pub fn v1_3_0() -> Self {
        Self {
            safe_singleton: address!("d9Db270c1B5E3Bd161E8c8503c55cEABeE709552"),
            multi_send: address!("A238CBeb142c10Ef7Ad8442C6D1f9E89e07e7761"),
            multi_send_call_only: address!("40A2aCCbd92BCA938b02010E17A5b8929b49130D"),
            proxy_factory: address!("a6B71E26C5e0845f74c812102Ca7114b6a896AB2"),
            fallback_handler: address!("f48f2B2d2a534e402487b3ee7C18c33Aec0Fe5e4"),
        }
    }

    /// Returns true if `address` is one of this release's MultiSend contracts
    pub fn is_multi_send(&self, address: Address) -> bool {
        address == self.multi_send || address == self.multi_send_call_only
    }

    /// Predicts the address of a Safe deployed through this release's factory
    ///
    /// The Safe is set up with `owners`, `threshold` and this release's
    /// fallback handler. `creation_code` is the factory's `proxyCreationCode()`.
    pub fn predict_safe_address(
        &self,
        owners: &[Address],
        threshold: u64,
        salt_nonce: U256,
        creation_code: &[u8],
    ) -> Address {
        let initializer = encode_setup_call(owners, threshold, self.fallback_handler);
        predict_safe_address(
            self.proxy_factory,
            self.safe_singleton,
            &initializer,
            salt_nonce,
            creation_code,
        )
    }
}

/// Chain ID plus the Safe deployment used on it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainConfig {
    /// Chain ID
    pub chain_id: u64,
    /// Contract addresses
    pub addresses: ChainAddresses,
}

impl ChainConfig {
    /// Creates a chain configuration with canonical v1.4.1 addresses
    pub fn new(chain_id: u64) -> Self {
        Self {
            chain_id,
            addresses: ChainAddresses::v1_4_1(),
        }
    }

    /// Creates a chain configuration with custom addresses
    pub fn with_addresses(chain_id: u64, addresses: ChainAddresses) -> Self {
        Self { chain_id, addresses }
    }

    /// Returns configuration for Ethereum mainnet
    pub fn mainnet() -> Self {
        Self::new(1)
    }

    /// Returns configuration for Sepolia testnet
    pub fn sepolia() -> Self {
        Self::new(11155111)
    }

    /// Hash owners sign for a transaction of `safe` on this chain
    pub fn safe_transaction_hash(&self, safe: Address, params: &SafeTxParams) -> B256 {
        compute_safe_transaction_hash(self.chain_id, safe, params)
    }

    /// Hash owners sign for an off-chain message of `safe` on this chain
    pub fn safe_message_hash(&self, safe: Address, message: &[u8]) -> B256 {
        compute_safe_message_hash(self.chain_id, safe, message)
    }
}
