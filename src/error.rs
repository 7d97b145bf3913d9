//! Error types for safe-sig

use thiserror::Error;

/// Result type alias for safe-sig operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when parsing, validating or encoding Safe payloads
#[derive(Debug, Error)]
pub enum Error {
    /// Signature buffer is structurally invalid (bad offset, truncated slot, length mismatch)
    #[error("Malformed signature at byte {position}: {reason}")]
    MalformedSignature { position: usize, reason: String },

    /// ECDSA signature could not be recovered to an address
    #[error("Invalid signature: {0}")]
    InvalidSignature(String),

    /// MultiSend payload could not be decoded with any known layout
    #[error("MultiSend decoding failed at byte {position}: {reason}")]
    MultiSendDecode { position: usize, reason: String },

    /// ABI encoding/decoding error
    #[error("ABI error: {0}")]
    Abi(String),

    /// A read against chain state failed
    #[error("Failed to read {what}: {reason}")]
    ChainRead { what: &'static str, reason: String },

    /// A read against chain state did not complete in time
    #[error("Timed out reading {what} after {timeout_ms}ms")]
    Timeout { what: &'static str, timeout_ms: u64 },

    /// Signature generation failed
    #[error("Failed to sign: {0}")]
    Signing(String),
}

impl Error {
    /// Returns true for collaborator failures that should be retried by the caller.
    ///
    /// Structural errors are never retryable: the same input fails the same way.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::ChainRead { .. } | Error::Timeout { .. })
    }

    pub(crate) fn malformed(position: usize, reason: impl Into<String>) -> Self {
        Error::MalformedSignature {
            position,
            reason: reason.into(),
        }
    }
}

impl From<alloy::transports::RpcError<alloy::transports::TransportErrorKind>> for Error {
    fn from(err: alloy::transports::RpcError<alloy::transports::TransportErrorKind>) -> Self {
        Error::ChainRead {
            what: "rpc",
            reason: err.to_string(),
        }
    }
}

impl From<alloy::contract::Error> for Error {
    fn from(err: alloy::contract::Error) -> Self {
        Error::ChainRead {
            what: "contract call",
            reason: err.to_string(),
        }
    }
}

impl From<alloy::signers::Error> for Error {
    fn from(err: alloy::signers::Error) -> Self {
        Error::Signing(err.to_string())
    }
}

impl From<alloy::sol_types::Error> for Error {
    fn from(err: alloy::sol_types::Error) -> Self {
        Error::Abi(err.to_string())
    }
}
