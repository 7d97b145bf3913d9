//! Deterministic deployment addresses

use alloy::primitives::{address, keccak256, Address, B256, U256};
use safe_sig::{
    compute_create2_address, encode_setup_call, predict_safe_address, ChainAddresses,
    CreationParameters,
};

#[test]
fn test_known_create2_vectors() {
    assert_eq!(
        compute_create2_address(
            address!("0x8942595A2dC5181Df0465AF0D7be08c8f23C93af"),
            keccak256("aloha"),
            &[0x00, 0xab, 0xcd],
        )
        .to_checksum(None),
        "0x8D02C796Dd019916F65EBa1C9D65a7079Ece00E0"
    );
    assert_eq!(
        compute_create2_address(
            address!("0xdeadbeef00000000000000000000000000000000"),
            B256::ZERO,
            &[0x00],
        ),
        address!("0xB928f69Bb1D91Cd65274e3c79d8986362984fDA3")
    );
}

#[test]
fn test_creation_parameters_serde() {
    let params = CreationParameters::new(Address::ZERO, B256::ZERO, &[0x00]);

    let json = serde_json::to_value(params).unwrap();
    assert!(json.get("initCodeHash").is_some());
    let back: CreationParameters = serde_json::from_value(json).unwrap();

    assert_eq!(back, params);
    assert_eq!(
        back.address(),
        address!("0x4D1A2e2bB4F88F0250f26Ffff098B0b30B26BF38")
    );
}

#[test]
fn test_safe_prediction_depends_on_every_input() {
    let addrs = ChainAddresses::v1_4_1();
    let owners = [
        address!("0x1111111111111111111111111111111111111111"),
        address!("0x2222222222222222222222222222222222222222"),
    ];
    let creation_code = [0x60, 0x80, 0x60, 0x40, 0x52];
    let initializer = encode_setup_call(&owners, 2, addrs.fallback_handler);

    let predicted = addrs.predict_safe_address(&owners, 2, U256::ZERO, &creation_code);

    assert_eq!(
        predicted,
        predict_safe_address(
            addrs.proxy_factory,
            addrs.safe_singleton,
            &initializer,
            U256::ZERO,
            &creation_code
        )
    );
    assert_ne!(
        predicted,
        addrs.predict_safe_address(&owners, 1, U256::ZERO, &creation_code)
    );
    assert_ne!(
        predicted,
        addrs.predict_safe_address(&owners[..1], 2, U256::ZERO, &creation_code)
    );
    assert_ne!(
        predicted,
        addrs.predict_safe_address(&owners, 2, U256::from(1), &creation_code)
    );
}
