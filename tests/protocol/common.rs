//! Shared fixtures for protocol tests

use std::sync::Mutex;

use alloy::eips::BlockId;
use alloy::primitives::{b256, hex, Address, Bytes, FixedBytes, B256, U256};
use safe_sig::{ChainReader, Error, Result};

/// Safe transaction hash signed by the EOA fixture
pub const SAFE_TX_HASH: B256 =
    b256!("0x4c9577d1b1b8dec52329a983ae26238b65f74b7dd9fb28d74ad9548e92aaf196");

/// EOA signature over [`SAFE_TX_HASH`] by 0xADb7CB706e9A1bd9F96a397da340bF34a9984E1E
pub const EOA_SIGNATURE: [u8; 65] = hex!(
    "5dccf9f1375cee56331a67867a0b05a828894c2b76dee84546ec663997d7548257cb2d606087ee7590b966e958d97a65528ae941a0f7e5050949f618629509c81b"
);

/// In-memory chain state
///
/// Approvals are keyed by owner. Reads at blocks listed in `failing_blocks`
/// fail; every queried block is recorded.
#[derive(Default)]
pub struct MockChain {
    pub approvals: Vec<(Address, B256)>,
    pub contract_results: Vec<(Address, FixedBytes<4>)>,
    pub failing_blocks: Vec<BlockId>,
    pub queried_blocks: Mutex<Vec<BlockId>>,
}

impl MockChain {
    pub fn queried_blocks(&self) -> Vec<BlockId> {
        self.queried_blocks.lock().unwrap().clone()
    }
}

impl ChainReader for MockChain {
    async fn approved_hash(
        &self,
        _safe: Address,
        owner: Address,
        hash: B256,
        block: BlockId,
    ) -> Result<U256> {
        self.queried_blocks.lock().unwrap().push(block);
        if self.failing_blocks.contains(&block) {
            return Err(Error::ChainRead {
                what: "approvedHashes",
                reason: format!("state unavailable at {block:?}"),
            });
        }
        let approved = self.approvals.contains(&(owner, hash));
        Ok(U256::from(approved as u8))
    }

    async fn is_valid_signature(
        &self,
        contract: Address,
        _data: Bytes,
        _signature: Bytes,
    ) -> Result<FixedBytes<4>> {
        self.contract_results
            .iter()
            .find(|(address, _)| *address == contract)
            .map(|(_, magic)| *magic)
            .ok_or_else(|| Error::ChainRead {
                what: "isValidSignature",
                reason: "no code at address".to_string(),
            })
    }
}
