//! On-chain validation of Safe signatures
//!
//! ECDSA signatures are checked locally. Approved hashes and contract
//! signatures need a read against chain state, done through [`ChainReader`].

use std::future::Future;
use std::time::Duration;

use alloy::eips::BlockId;
use alloy::network::AnyNetwork;
use alloy::primitives::{Address, Bytes, FixedBytes, B256, U256};
use alloy::providers::Provider;
use futures::future::try_join_all;
use tracing::{debug, instrument, warn};

use super::kind::SafeSignature;
use crate::contracts::{
    ICompatibilityFallbackHandler, ISafe, EIP1271_MAGIC_VALUE, EIP1271_MAGIC_VALUE_UPDATED,
};
use crate::error::{Error, Result};

/// Read access to the chain state signature validation depends on
pub trait ChainReader {
    /// Reads `approvedHashes(owner, hash)` on `safe` at `block`
    fn approved_hash(
        &self,
        safe: Address,
        owner: Address,
        hash: B256,
        block: BlockId,
    ) -> impl Future<Output = Result<U256>> + Send;

    /// Calls `isValidSignature(bytes,bytes)` on `contract`
    fn is_valid_signature(
        &self,
        contract: Address,
        data: Bytes,
        signature: Bytes,
    ) -> impl Future<Output = Result<FixedBytes<4>>> + Send;
}

/// [`ChainReader`] backed by an alloy provider
#[derive(Debug, Clone)]
pub struct ProviderReader<P> {
    provider: P,
}

impl<P> ProviderReader<P>
where
    P: Provider<AnyNetwork> + Send + Sync,
{
    /// Wraps a provider
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    /// Returns a reference to the provider
    pub fn provider(&self) -> &P {
        &self.provider
    }
}

impl<P> ChainReader for ProviderReader<P>
where
    P: Provider<AnyNetwork> + Send + Sync,
{
    async fn approved_hash(
        &self,
        safe: Address,
        owner: Address,
        hash: B256,
        block: BlockId,
    ) -> Result<U256> {
        let safe = ISafe::new(safe, &self.provider);
        safe.approvedHashes(owner, hash)
            .block(block)
            .call()
            .await
            .map_err(|e| Error::ChainRead {
                what: "approvedHashes",
                reason: e.to_string(),
            })
    }

    async fn is_valid_signature(
        &self,
        contract: Address,
        data: Bytes,
        signature: Bytes,
    ) -> Result<FixedBytes<4>> {
        let handler = ICompatibilityFallbackHandler::new(contract, &self.provider);
        handler
            .isValidSignature(data, signature)
            .call()
            .await
            .map_err(|e| Error::ChainRead {
                what: "isValidSignature",
                reason: e.to_string(),
            })
    }
}

/// Validator settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatorConfig {
    /// Upper bound for a single chain read
    pub timeout: Duration,
    /// Blocks `approvedHashes` is read at, in order, until one read succeeds
    pub block_tags: Vec<BlockId>,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            // Some nodes advance the block number before state at `pending` is readable
            block_tags: vec![BlockId::pending(), BlockId::latest()],
        }
    }
}

impl ValidatorConfig {
    /// Sets the per-read timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the blocks approvals are read at
    pub fn with_block_tags(mut self, block_tags: Vec<BlockId>) -> Self {
        self.block_tags = block_tags;
        self
    }

    /// Per-read timeout in milliseconds, saturating at `u64::MAX`
    pub fn timeout_ms(&self) -> u64 {
        u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX)
    }
}

/// Checks parsed signatures against their trust anchor
///
/// `Ok(false)` means the signature is not valid. An `Err` means validity
/// could not be established; see [`Error::is_retryable`].
#[derive(Debug, Clone)]
pub struct SignatureValidator<R> {
    reader: R,
    config: ValidatorConfig,
}

impl<P> SignatureValidator<ProviderReader<P>>
where
    P: Provider<AnyNetwork> + Send + Sync,
{
    /// Creates a validator reading through `provider`
    pub fn from_provider(provider: P) -> Self {
        Self::new(ProviderReader::new(provider))
    }
}

impl<R: ChainReader + Sync> SignatureValidator<R> {
    /// Creates a validator with the default config
    pub fn new(reader: R) -> Self {
        Self::with_config(reader, ValidatorConfig::default())
    }

    /// Creates a validator with a custom config
    pub fn with_config(reader: R, config: ValidatorConfig) -> Self {
        Self { reader, config }
    }

    /// Returns the config
    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Returns the chain reader
    pub fn reader(&self) -> &R {
        &self.reader
    }

    /// Checks one signature for the Safe at `safe_address`
    #[instrument(
        skip(self, signature),
        fields(safe = %safe_address, kind = %signature.signature_type())
    )]
    pub async fn is_valid(&self, signature: &SafeSignature, safe_address: Address) -> Result<bool> {
        match signature {
            SafeSignature::Eoa { .. } | SafeSignature::EthSign { .. } => {
                // Whether the signer is an owner is up to the caller
                Ok(signature.owner().is_ok())
            }
            SafeSignature::ApprovedHash { safe_hash, .. } => {
                let owner = signature.owner()?;
                self.check_approved_hash(safe_address, owner, *safe_hash)
                    .await
            }
            SafeSignature::Contract {
                preimage,
                contract_signature,
                ..
            } => {
                let owner = signature.owner()?;
                self.check_contract_signature(owner, preimage.clone(), contract_signature.clone())
                    .await
            }
        }
    }

    /// Checks every signature concurrently, returning results in input order
    pub async fn validate_all(
        &self,
        signatures: &[SafeSignature],
        safe_address: Address,
    ) -> Result<Vec<bool>> {
        try_join_all(
            signatures
                .iter()
                .map(|signature| self.is_valid(signature, safe_address)),
        )
        .await
    }

    async fn check_approved_hash(&self, safe: Address, owner: Address, hash: B256) -> Result<bool> {
        let mut last_error = None;

        for block in &self.config.block_tags {
            let read = self.reader.approved_hash(safe, owner, hash, *block);
            match self.with_timeout("approvedHashes", read).await {
                Ok(value) => {
                    debug!(%owner, ?block, %value, "read approved hash");
                    return Ok(value == U256::from(1));
                }
                Err(e) => {
                    debug!(%owner, ?block, error = %e, "approved hash read failed");
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or(Error::ChainRead {
            what: "approvedHashes",
            reason: "no block tags configured".to_string(),
        }))
    }

    async fn check_contract_signature(
        &self,
        owner: Address,
        data: Bytes,
        signature: Bytes,
    ) -> Result<bool> {
        let read = self.reader.is_valid_signature(owner, data, signature);
        match self.with_timeout("isValidSignature", read).await {
            Ok(magic) => Ok(magic == EIP1271_MAGIC_VALUE || magic == EIP1271_MAGIC_VALUE_UPDATED),
            Err(e @ Error::Timeout { .. }) => Err(e),
            Err(e) => {
                warn!(%owner, error = %e, "contract signature check failed");
                Ok(false)
            }
        }
    }

    async fn with_timeout<T>(
        &self,
        what: &'static str,
        read: impl Future<Output = Result<T>>,
    ) -> Result<T> {
        tokio::time::timeout(self.config.timeout, read)
            .await
            .map_err(|_| Error::Timeout {
                what,
                timeout_ms: self.config.timeout_ms(),
            })?
    }
}
