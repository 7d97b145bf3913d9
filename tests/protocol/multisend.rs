//! MultiSend payloads observed on chain

use alloy::primitives::{address, hex, Bytes, U256};
use safe_sig::encoding::encode_legacy_transaction;
use safe_sig::{
    decode_multisend_calldata, decode_multisend_data, encode_multisend_calldata,
    encode_multisend_data, Error, MultiSendCall, Operation,
};

/// Upgrades a Safe's master copy and sets its fallback handler in one batch
const CURRENT_CALLDATA: [u8; 324] = hex!(
    "8d80ff0a0000000000000000000000000000000000000000000000000000000000000020000000000000000000000000"
    "00000000000000000000000000000000000000f2005b9ea52aaa931d4eef74c8aeaf0fe759434fed7400000000000000"
    "000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000"
    "0000000000000000247de7edef00000000000000000000000034cfac646f301356faa8b21e94227e3583fe3f5f005b9e"
    "a52aaa931d4eef74c8aeaf0fe759434fed74000000000000000000000000000000000000000000000000000000000000"
    "00000000000000000000000000000000000000000000000000000000000000000024f08a032300000000000000000000"
    "0000d5d82b6addc9027b22dca772aa68d5d74cdbdf440000000000000000000000000000"
);

/// Batch built for the first MultiSend deployment, 32-byte aligned
const LEGACY_CALLDATA: &str = "8d80ff0a0000000000000000000000000000000000000000000000000000000000000020000000000000000000000000000000000000000000000000000000000000024000000000000000000000000000000000000000000000000000000000000000000000000000000000000000001db1a2063504d15d36e9506a192ab7bbb17dbb2a000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000800000000000000000000000000000000000000000000000000000000000000024e71bdf41000000000000000000000000980f3fb56999bf811f32b85e5274960fbf9f5c4f0000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000001db1a2063504d15d36e9506a192ab7bbb17dbb2a0000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000008000000000000000000000000000000000000000000000000000000000000000a4beaeb388000000000000000000000000980f3fb56999bf811f32b85e5274960fbf9f5c4f00000000000000000000000089d24a6b4ccb1b6faa2625fe562bdd9a232603590000000000000000000000000000000000000000000000008ac7230489e8000000000000000000000000000000000000000000000000000000000000000005a000000000000000000000000000000000000000000000000000000000000005a000000000000000000000000000000000000000000000000000000000";

#[test]
fn test_decode_current_calldata() {
    let safe = address!("0x5B9ea52Aaa931D4EEf74C8aEaf0Fe759434FeD74");

    let calls = decode_multisend_calldata(&CURRENT_CALLDATA).unwrap();

    assert_eq!(
        calls,
        vec![
            MultiSendCall::call(
                safe,
                hex!("7de7edef00000000000000000000000034cfac646f301356faa8b21e94227e3583fe3f5f")
                    .to_vec()
            ),
            MultiSendCall::call(
                safe,
                hex!("f08a0323000000000000000000000000d5d82b6addc9027b22dca772aa68d5d74cdbdf44")
                    .to_vec()
            ),
        ]
    );

    // re-encoding reproduces the calldata byte for byte
    assert_eq!(encode_multisend_calldata(&calls).as_ref(), &CURRENT_CALLDATA);
}

#[test]
fn test_decode_legacy_calldata() {
    let calldata = hex::decode(LEGACY_CALLDATA).unwrap();
    let target = address!("0x1DB1a2063504D15D36e9506A192ab7BBb17dbb2A");

    let calls = decode_multisend_calldata(&calldata).unwrap();

    assert_eq!(calls.len(), 2);
    assert!(calls.iter().all(|call| call.operation == Operation::Call));
    assert!(calls.iter().all(|call| call.to == target));
    assert!(calls.iter().all(|call| call.value == U256::ZERO));
    assert_eq!(
        calls[0].data,
        Bytes::from(
            hex!("e71bdf41000000000000000000000000980f3fb56999bf811f32b85e5274960fbf9f5c4f").to_vec()
        )
    );
    assert_eq!(calls[1].data.len(), 164);
    assert_eq!(&calls[1].data[..4], &hex!("beaeb388"));

    // the same calls re-encoded in the current layout decode identically
    let repacked = encode_multisend_data(&calls);
    assert_eq!(decode_multisend_data(&repacked).unwrap(), calls);
}

#[test]
fn test_three_calls_round_trip() {
    let calls = vec![
        MultiSendCall::call(address!("0x1111111111111111111111111111111111111111"), vec![0x01])
            .with_value(U256::from(5)),
        MultiSendCall::delegate_call(
            address!("0x2222222222222222222222222222222222222222"),
            vec![0x02; 40],
        ),
        MultiSendCall::call(address!("0x3333333333333333333333333333333333333333"), vec![0x03; 3]),
    ];

    let decoded = decode_multisend_data(&encode_multisend_data(&calls)).unwrap();

    assert_eq!(decoded, calls);
}

#[test]
fn test_legacy_encoding_decodes_to_same_calls() {
    let calls = vec![
        MultiSendCall::call(address!("0x4444444444444444444444444444444444444444"), vec![0xab; 36]),
        MultiSendCall::delegate_call(
            address!("0x5555555555555555555555555555555555555555"),
            vec![0xcd; 64],
        ),
    ];
    let legacy: Vec<u8> = calls
        .iter()
        .flat_map(|call| encode_legacy_transaction(call))
        .collect();

    assert_eq!(decode_multisend_data(&legacy).unwrap(), calls);
}

#[test]
fn test_wrong_selector_is_rejected() {
    let mut calldata = CURRENT_CALLDATA;
    calldata[0] = 0x1d;

    assert!(matches!(
        decode_multisend_calldata(&calldata),
        Err(Error::Abi(_))
    ));
}
