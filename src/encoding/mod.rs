//! Encoding utilities for Safe transactions

pub mod codec;
mod eip712;
mod multisend;

pub use eip712::{
    compute_domain_separator, compute_safe_message_hash, compute_safe_transaction_hash,
    compute_safe_tx_hash, compute_transaction_hash, encode_transaction_data, encode_typed_data,
    eth_sign_message_hash, SafeTxParams, SAFE_MSG_TYPEHASH,
};
pub use multisend::{
    decode_multisend_calldata, decode_multisend_data, decode_transaction,
    encode_legacy_transaction, encode_multisend_calldata, encode_multisend_data,
    encode_transaction, MultiSendLayout,
};
