//! Call types for MultiSend batches

use alloy::primitives::{Address, Bytes, U256};
use alloy::sol_types::SolCall;
use serde::{Deserialize, Serialize};

use super::Operation;

/// Trait for types that can be packed into a MultiSend batch
pub trait SafeCall {
    /// Returns the target address
    fn to(&self) -> Address;

    /// Returns the value to send (in wei)
    fn value(&self) -> U256;

    /// Returns the calldata
    fn data(&self) -> Bytes;

    /// Returns the operation type (Call or DelegateCall)
    fn operation(&self) -> Operation;
}

/// One sub-transaction of a MultiSend batch
///
/// Produced by decoding a batch or built by the caller; the codec never
/// mutates it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MultiSendCall {
    /// Operation type
    pub operation: Operation,
    /// Target address
    pub to: Address,
    /// Value to send
    pub value: U256,
    /// Calldata
    pub data: Bytes,
}

impl MultiSendCall {
    /// Creates a new call with the given parameters
    pub fn new(operation: Operation, to: Address, value: U256, data: impl Into<Bytes>) -> Self {
        Self {
            operation,
            to,
            value,
            data: data.into(),
        }
    }

    /// Creates a regular call with zero value
    pub fn call(to: Address, data: impl Into<Bytes>) -> Self {
        Self::new(Operation::Call, to, U256::ZERO, data)
    }

    /// Creates a delegate call
    pub fn delegate_call(to: Address, data: impl Into<Bytes>) -> Self {
        Self::new(Operation::DelegateCall, to, U256::ZERO, data)
    }

    /// Creates a regular call from a `sol!` generated call type
    pub fn typed<C: SolCall>(to: Address, call: &C) -> Self {
        Self::call(to, call.abi_encode())
    }

    /// Sets the value
    pub fn with_value(mut self, value: U256) -> Self {
        self.value = value;
        self
    }

    /// Sets the operation type
    pub fn with_operation(mut self, operation: Operation) -> Self {
        self.operation = operation;
        self
    }

    /// Size of this call in the packed MultiSend layout
    pub fn encoded_len(&self) -> usize {
        1 + 20 + 32 + 32 + self.data.len()
    }
}

impl SafeCall for MultiSendCall {
    fn to(&self) -> Address {
        self.to
    }

    fn value(&self) -> U256 {
        self.value
    }

    fn data(&self) -> Bytes {
        self.data.clone()
    }

    fn operation(&self) -> Operation {
        self.operation
    }
}
