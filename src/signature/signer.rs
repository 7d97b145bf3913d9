//! ECDSA signature generation for Safe hashes

use alloy::primitives::B256;
use alloy::signers::Signer;

use super::kind::SafeSignature;
use crate::encoding::eth_sign_message_hash;
use crate::error::Result;

/// Signs a Safe hash directly, producing an EOA signature
///
/// Safe expects `v` as 27 or 28.
pub async fn sign_hash<S: Signer + Sync>(signer: &S, safe_hash: B256) -> Result<SafeSignature> {
    let signature = signer.sign_hash(&safe_hash).await?;

    Ok(SafeSignature::Eoa {
        r: B256::from(signature.r().to_be_bytes::<32>()),
        s: B256::from(signature.s().to_be_bytes::<32>()),
        v: if signature.v() { 28 } else { 27 },
        safe_hash,
    })
}

/// Signs the EIP-191 wrapped Safe hash, producing an eth_sign signature
///
/// The Safe marks these by shifting `v` up by 4, to 31 or 32.
pub async fn eth_sign_hash<S: Signer + Sync>(
    signer: &S,
    safe_hash: B256,
) -> Result<SafeSignature> {
    let signature = signer
        .sign_hash(&eth_sign_message_hash(safe_hash))
        .await?;

    Ok(SafeSignature::EthSign {
        r: B256::from(signature.r().to_be_bytes::<32>()),
        s: B256::from(signature.s().to_be_bytes::<32>()),
        v: if signature.v() { 32 } else { 31 },
        safe_hash,
    })
}
