//! CREATE2 address derivation
//!
//! `address = keccak256(0xff ‖ deployer ‖ salt ‖ keccak256(init_code))[12..]`
//!
//! The Safe proxy factory is the main CREATE2 deployer this crate cares
//! about, so the proxy salt and init code layouts live here as well.

use alloy::primitives::{keccak256, Address, Bytes, B256, U256};
use alloy::sol_types::SolCall;
use serde::{Deserialize, Serialize};

use crate::contracts::ISafeSetup;
use crate::encoding::codec::address_word;

/// Inputs of a CREATE2 deployment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreationParameters {
    /// Account executing CREATE2
    pub deployer: Address,
    /// 32-byte salt
    pub salt: B256,
    /// keccak256 of the init code
    pub init_code_hash: B256,
}

impl CreationParameters {
    /// Hashes `init_code` and bundles it with the deployer and salt
    pub fn new(deployer: Address, salt: B256, init_code: &[u8]) -> Self {
        Self {
            deployer,
            salt,
            init_code_hash: keccak256(init_code),
        }
    }

    /// Returns the address the contract will be deployed at
    pub fn address(&self) -> Address {
        let mut create2_input = Vec::with_capacity(1 + 20 + 32 + 32);
        create2_input.push(0xff);
        create2_input.extend_from_slice(self.deployer.as_slice());
        create2_input.extend_from_slice(self.salt.as_slice());
        create2_input.extend_from_slice(self.init_code_hash.as_slice());

        let hash = keccak256(&create2_input);

        Address::from_slice(&hash[12..])
    }
}

/// Computes the address `deployer` creates `init_code` at with `salt`
///
/// `init_code` is the full creation code, constructor arguments included.
pub fn compute_create2_address(deployer: Address, salt: B256, init_code: &[u8]) -> Address {
    CreationParameters::new(deployer, salt, init_code).address()
}

/// Computes the address of a contract created with CREATE by `deployer` at `nonce`
pub fn compute_create_address(deployer: Address, nonce: u64) -> Address {
    deployer.create(nonce)
}

/// Encodes the Safe.setup() call used as the proxy initializer
///
/// # Arguments
/// * `owners` - Array of owner addresses for the Safe
/// * `threshold` - Number of required confirmations for transactions
/// * `fallback_handler` - Address of the fallback handler contract
pub fn encode_setup_call(owners: &[Address], threshold: u64, fallback_handler: Address) -> Bytes {
    let setup_call = ISafeSetup::setupCall {
        _owners: owners.to_vec(),
        _threshold: U256::from(threshold),
        to: Address::ZERO,
        data: Bytes::new(),
        fallbackHandler: fallback_handler,
        paymentToken: Address::ZERO,
        payment: U256::ZERO,
        paymentReceiver: Address::ZERO,
    };

    Bytes::from(setup_call.abi_encode())
}

/// Salt the proxy factory uses: `keccak256(keccak256(initializer) ‖ saltNonce)`
pub fn safe_proxy_salt(initializer: &[u8], salt_nonce: U256) -> B256 {
    let mut salt_input = [0u8; 64];
    salt_input[..32].copy_from_slice(keccak256(initializer).as_slice());
    salt_input[32..].copy_from_slice(&salt_nonce.to_be_bytes::<32>());
    keccak256(salt_input)
}

/// Proxy init code: `proxyCreationCode ‖ singleton` with the singleton left-padded to a word
pub fn safe_proxy_init_code(creation_code: &[u8], singleton: Address) -> Bytes {
    let mut init_code = Vec::with_capacity(creation_code.len() + 32);
    init_code.extend_from_slice(creation_code);
    init_code.extend_from_slice(&address_word(singleton));
    Bytes::from(init_code)
}

/// Predicts where `createProxyWithNonce` deploys a Safe proxy
///
/// # Arguments
/// * `factory` - Address of the SafeProxyFactory contract
/// * `singleton` - Address of the Safe singleton (implementation) contract
/// * `initializer` - ABI-encoded Safe.setup() call data
/// * `salt_nonce` - User-provided nonce for address derivation
/// * `creation_code` - Proxy creation bytecode from SafeProxyFactory.proxyCreationCode()
pub fn predict_safe_address(
    factory: Address,
    singleton: Address,
    initializer: &[u8],
    salt_nonce: U256,
    creation_code: &[u8],
) -> Address {
    compute_create2_address(
        factory,
        safe_proxy_salt(initializer, salt_nonce),
        &safe_proxy_init_code(creation_code, singleton),
    )
}
