//! Signature blob parse and export

use alloy::primitives::{address, Address, Bytes, U256};
use alloy::signers::local::PrivateKeySigner;
use safe_sig::{
    eth_sign_hash, export_signatures, parse_signatures, sign_hash, Error, SafeSignature,
    SignatureType, TrailingData,
};

use crate::common::{EOA_SIGNATURE, SAFE_TX_HASH};

fn owners(signatures: &[SafeSignature]) -> Vec<Address> {
    signatures.iter().map(|s| s.owner().unwrap()).collect()
}

#[test]
fn test_single_eoa_recovers_known_signer() {
    let signatures =
        parse_signatures(&EOA_SIGNATURE, SAFE_TX_HASH, None, TrailingData::Strict).unwrap();

    assert_eq!(signatures.len(), 1);
    assert_eq!(signatures[0].signature_type(), SignatureType::Eoa);
    assert_eq!(
        signatures[0].owner().unwrap(),
        address!("0xADb7CB706e9A1bd9F96a397da340bF34a9984E1E")
    );
    assert_eq!(
        signatures[0].to_string(),
        "SafeSignature type=EOA owner=0xADb7CB706e9A1bd9F96a397da340bF34a9984E1E"
    );
}

#[tokio::test]
async fn test_mixed_set_round_trips_through_export() {
    let alice = PrivateKeySigner::random();
    let bob = PrivateKeySigner::random();

    let signatures = vec![
        sign_hash(&alice, SAFE_TX_HASH).await.unwrap(),
        eth_sign_hash(&bob, SAFE_TX_HASH).await.unwrap(),
        SafeSignature::approved_hash(
            address!("0x05c85Ab5B09Eb8A55020d72daf6091E04e264af9"),
            SAFE_TX_HASH,
        ),
        SafeSignature::contract(
            address!("0x7777777777777777777777777777777777777777"),
            SAFE_TX_HASH,
            SAFE_TX_HASH.to_vec(),
            vec![0x01; 65],
        ),
        SafeSignature::contract(
            address!("0x3333333333333333333333333333333333333333"),
            SAFE_TX_HASH,
            SAFE_TX_HASH.to_vec(),
            Bytes::new(),
        ),
    ];

    let exported = export_signatures(&signatures).unwrap();
    let parsed = parse_signatures(&exported, SAFE_TX_HASH, None, TrailingData::Strict).unwrap();

    assert_eq!(parsed.len(), signatures.len());
    for signature in &signatures {
        assert!(parsed.contains(signature), "missing {signature}");
    }

    let parsed_owners = owners(&parsed);
    let mut sorted = parsed_owners.clone();
    sorted.sort();
    assert_eq!(parsed_owners, sorted);

    // exporting the parsed set again is byte for byte identical
    assert_eq!(export_signatures(&parsed).unwrap(), exported);
}

#[test]
fn test_exported_offsets_point_at_payloads() {
    let payloads: [&[u8]; 3] = [&[0xaa; 10], &[0xbb; 33], &[0xcc; 1]];
    let signatures: Vec<SafeSignature> = payloads
        .iter()
        .enumerate()
        .map(|(i, payload)| {
            SafeSignature::contract(
                Address::with_last_byte(3 - i as u8),
                SAFE_TX_HASH,
                SAFE_TX_HASH.to_vec(),
                payload.to_vec(),
            )
        })
        .collect();

    let exported = export_signatures(&signatures).unwrap();

    let mut previous = 0usize;
    for slot in 0..3 {
        let start = slot * 65;
        let owner = Address::from_slice(&exported[start + 12..start + 32]);
        let offset: usize = U256::from_be_slice(&exported[start + 32..start + 64]).to();
        assert!(offset > previous);
        previous = offset;

        let len: usize = U256::from_be_slice(&exported[offset..offset + 32]).to();
        let payload = &exported[offset + 32..offset + 32 + len];
        let expected = signatures
            .iter()
            .find(|s| s.owner().unwrap() == owner)
            .and_then(|s| s.contract_signature())
            .unwrap();
        assert_eq!(payload, expected.as_ref());
    }
}

#[test]
fn test_eth_sign_and_contract_pair() {
    let mut blob = vec![0x11u8; 64];
    blob.push(31);
    let mut contract = vec![0u8; 65];
    contract[31] = 0x99;
    contract[32..64].copy_from_slice(&U256::from(130).to_be_bytes::<32>());
    blob.extend(contract);
    blob.extend_from_slice(&U256::from(10).to_be_bytes::<32>());
    blob.extend_from_slice(&[0xee; 10]);

    let signatures = parse_signatures(&blob, SAFE_TX_HASH, None, TrailingData::Strict).unwrap();

    assert_eq!(signatures.len(), 2);
    assert_eq!(signatures[0].signature_type(), SignatureType::EthSign);
    assert_eq!(signatures[1].signature_type(), SignatureType::ContractSignature);
    assert_eq!(signatures[1].contract_signature().unwrap().len(), 10);
}

#[test]
fn test_malformed_blobs_are_rejected() {
    let mut contract = vec![0u8; 65];
    contract[32..64].copy_from_slice(&U256::from(65).to_be_bytes::<32>());
    // length prefix claims more than is present
    contract.extend_from_slice(&U256::from(100).to_be_bytes::<32>());

    let err = parse_signatures(&contract, SAFE_TX_HASH, None, TrailingData::Strict).unwrap_err();

    assert!(matches!(err, Error::MalformedSignature { .. }));
    assert!(!err.is_retryable());
}
