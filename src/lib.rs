//! # safe-sig
//!
//! Signature handling and batched-call encoding for Safe smart accounts.
//!
//! ## Features
//!
//! - Parse concatenated owner signatures (EOA, eth_sign, approved hash, EIP-1271)
//! - Validate approved-hash and contract signatures against chain state
//! - Export signature sets in the owner-sorted layout `execTransaction` expects
//! - Encode and decode MultiSend batches, including the legacy padded layout
//! - Predict CREATE2 deployment addresses, Safe proxies included
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use safe_sig::{export_signatures, parse_signatures, SignatureValidator, TrailingData};
//!
//! let signatures = parse_signatures(&blob, safe_tx_hash, None, TrailingData::Strict)?;
//!
//! let validator = SignatureValidator::from_provider(provider);
//! let valid = validator.validate_all(&signatures, safe_address).await?;
//!
//! let accepted: Vec<_> = signatures
//!     .into_iter()
//!     .zip(valid)
//!     .filter_map(|(signature, ok)| ok.then_some(signature))
//!     .collect();
//! let blob = export_signatures(&accepted)?;
//! ```
//!
//! ## MultiSend
//!
//! ```rust,ignore
//! use safe_sig::{contracts::IERC20, decode_multisend_data, encode_multisend_data, MultiSendCall};
//!
//! let calls = vec![
//!     MultiSendCall::typed(usdc, &IERC20::transferCall { to: recipient, amount }),
//!     MultiSendCall::call(recipient, Bytes::new()).with_value(U256::from(1)),
//! ];
//! let packed = encode_multisend_data(&calls);
//! assert_eq!(decode_multisend_data(&packed)?, calls);
//! ```

pub mod chain;
pub mod contracts;
pub mod create2;
pub mod encoding;
pub mod error;
pub mod signature;
pub mod types;

// Re-export main types at crate root
pub use chain::{ChainAddresses, ChainConfig};
pub use contracts::{ICompatibilityFallbackHandler, IMultiSend, ISafe, ISafeSetup, IERC20};
pub use create2::{
    compute_create2_address, compute_create_address, encode_setup_call, predict_safe_address,
    safe_proxy_init_code, safe_proxy_salt, CreationParameters,
};
pub use encoding::{
    decode_multisend_calldata, decode_multisend_data, encode_multisend_calldata,
    encode_multisend_data, MultiSendLayout, SafeTxParams,
};
pub use error::{Error, Result};
pub use signature::{
    eth_sign_hash, export_signatures, parse_signatures, sign_hash, ChainReader, ProviderReader,
    SafeSignature, SignatureType, SignatureValidator, TrailingData, ValidatorConfig,
};
pub use types::{MultiSendCall, Operation, SafeCall};

// Re-export alloy types that are commonly used
pub use alloy::network::AnyNetwork;
pub use alloy::primitives::{Address, Bytes, B256, U256};
pub use alloy::providers::Provider;
