//! Contract ABI definitions and protocol constants

use alloy::primitives::{fixed_bytes, FixedBytes};
use alloy::sol;

sol! {
    /// Approved-hash registry of a Safe
    #[sol(rpc)]
    interface ISafe {
        /// Approval flag for `(owner, hash)`; 1 when approved
        function approvedHashes(address owner, bytes32 hash) external view returns (uint256);
    }

    /// Safe.setup() used as the proxy initializer
    interface ISafeSetup {
        function setup(
            address[] calldata _owners,
            uint256 _threshold,
            address to,
            bytes calldata data,
            address fallbackHandler,
            address paymentToken,
            uint256 payment,
            address payable paymentReceiver
        ) external;
    }

    /// Legacy EIP-1271 entrypoint exposed by the compatibility fallback handler
    #[sol(rpc)]
    interface ICompatibilityFallbackHandler {
        /// Returns 0x20c13b0b when `_signature` is valid for `_data`
        function isValidSignature(bytes memory _data, bytes memory _signature) external view returns (bytes4);
    }

    /// MultiSend interface for batching multiple calls
    #[sol(rpc)]
    interface IMultiSend {
        /// Sends multiple transactions in a single call
        /// @param transactions Packed encoding of transactions:
        ///        operation (1 byte) | to (20 bytes) | value (32 bytes) | data length (32 bytes) | data
        function multiSend(bytes memory transactions) external payable;
    }

    /// ERC20 transfer, for building MultiSend batches
    interface IERC20 {
        function transfer(address to, uint256 amount) external returns (bool);
    }
}

/// EIP-712 type hash for SafeTx struct
/// keccak256("SafeTx(address to,uint256 value,bytes data,uint8 operation,uint256 safeTxGas,uint256 baseGas,uint256 gasPrice,address gasToken,address refundReceiver,uint256 nonce)")
pub const SAFE_TX_TYPEHASH: [u8; 32] = [
    0xbb, 0x83, 0x10, 0xd4, 0x86, 0x36, 0x8d, 0xb6, 0xbd, 0x6f, 0x84, 0x94, 0x02, 0xfd, 0xd7, 0x3a,
    0xd5, 0x3d, 0x31, 0x6b, 0x5a, 0x4b, 0x26, 0x44, 0xad, 0x6e, 0xfe, 0x0f, 0x94, 0x12, 0x86, 0xd8,
];

/// EIP-712 domain type hash for Safe
/// keccak256("EIP712Domain(uint256 chainId,address verifyingContract)")
pub const DOMAIN_SEPARATOR_TYPEHASH: [u8; 32] = [
    0x47, 0xe7, 0x95, 0x34, 0xa2, 0x45, 0x95, 0x2e, 0x8b, 0x16, 0x89, 0x3a, 0x33, 0x6b, 0x85, 0xa3,
    0xd9, 0xea, 0x9f, 0xa8, 0xc5, 0x73, 0xf3, 0xd8, 0x03, 0xaf, 0xb9, 0x2a, 0x79, 0x46, 0x92, 0x18,
];

/// bytes4(keccak256("isValidSignature(bytes,bytes)"))
pub const EIP1271_MAGIC_VALUE: FixedBytes<4> = fixed_bytes!("0x20c13b0b");

/// bytes4(keccak256("isValidSignature(bytes32,bytes)"))
pub const EIP1271_MAGIC_VALUE_UPDATED: FixedBytes<4> = fixed_bytes!("0x1626ba7e");
