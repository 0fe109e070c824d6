//! Signature engine tests (golden vector, round trip, tamper, key discipline).

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use serde::Serialize;
use serde_json::{json, Value};

use paywire_core::signing::{self, plaintext, private_key_from_pem, public_key_from_pem};
use paywire_core::{ErrorCode, Signer};

mod vector_loader;
use vector_loader::{
    merchant_private, merchant_private_pkcs1, merchant_public, remote_private, remote_public,
};

const GOLDEN_UUID: &str = "11111111-1111-1111-1111-111111111111";
const GOLDEN_SIGNATURE: &str = "hMj+EGBoKo7lG8E1a+kROqv593NPsioBN/EzwTOOoIstnUGsv2QF8sKsjHXdMMeAqT6NOeX18D8SbP43SYxvm5vn95FvH1lmecH7KtcRk69hJls3mlFleskWjiv4AcgYTFa1c9PmF7nwbaTV0dzGwGWXLSj2bI/uUIJ3UYlhUHdlgMTJvdGkpQLTWBoOZibKHdgum+1O8UKQTbJ7yvDHxm/RQQvYAzqm3V7QoAdpULPZHs8KXtol5Auj7Erm9ZUk4s+Ti8ZVU15sdL2LhA/f7nRMMqCxfUsp+B+S2ooaLR0M4oIQiowGjbWaYHoS2/yOjLAfafiph4fDwvHGYzGcfA==";

fn deposit_data() -> Value {
    json!({ "Amount": "100.00", "Currency": "EUR", "EndUserID": "u1" })
}

/// Merchant side: signs with the merchant key, verifies the remote.
fn merchant() -> Signer {
    Signer::from_pem(&merchant_private(), &remote_public()).unwrap()
}

/// Remote side: signs with the remote key, verifies the merchant.
fn remote() -> Signer {
    Signer::from_pem(&remote_private(), &merchant_public()).unwrap()
}

#[test]
fn plaintext_layout() {
    assert_eq!(
        plaintext("Deposit", GOLDEN_UUID, &deposit_data()),
        "Deposit11111111-1111-1111-1111-111111111111Amount100.00CurrencyEUREndUserIDu1"
    );
}

#[test]
fn golden_deposit_signature() {
    let sig = merchant().sign("Deposit", GOLDEN_UUID, &deposit_data()).unwrap();
    assert_eq!(sig, GOLDEN_SIGNATURE);

    let remote = remote();
    assert!(remote.is_valid("Deposit", GOLDEN_UUID, &deposit_data(), GOLDEN_SIGNATURE));

    let mut tampered = deposit_data();
    tampered["Amount"] = json!("100.01");
    assert!(!remote.is_valid("Deposit", GOLDEN_UUID, &tampered, GOLDEN_SIGNATURE));
}

#[derive(Serialize)]
struct GoldenDeposit {
    #[serde(rename = "Amount")]
    amount: String,
    #[serde(rename = "Currency")]
    currency: String,
    #[serde(rename = "EndUserID")]
    end_user_id: String,
    #[serde(rename = "Locale")]
    locale: Option<String>,
}

#[test]
fn decoded_object_signs_like_raw_node() {
    let decoded = GoldenDeposit {
        amount: "100.00".into(),
        currency: "EUR".into(),
        end_user_id: "u1".into(),
        locale: None,
    };
    let sig = merchant().sign_data("Deposit", GOLDEN_UUID, &decoded).unwrap();
    assert_eq!(sig, GOLDEN_SIGNATURE);
    assert!(remote().is_valid("Deposit", GOLDEN_UUID, &deposit_data(), &sig));
}

#[test]
fn pkcs1_private_key_produces_same_signature() {
    let key = private_key_from_pem(&merchant_private_pkcs1()).unwrap();
    let sig = signing::sign("Deposit", GOLDEN_UUID, &deposit_data(), &key).unwrap();
    assert_eq!(sig, GOLDEN_SIGNATURE);
}

#[test]
fn round_trip_various_payloads() {
    let merchant = merchant();
    let remote = remote();
    let payloads = [
        json!({}),
        json!({ "a": null }),
        json!({ "nested": { "list": [1, 2, { "x": true }] }, "n": 12.25 }),
        json!({ "Attributes": { "Locale": "sv_SE" }, "Username": "merchant" }),
    ];
    for (i, data) in payloads.iter().enumerate() {
        let uuid = format!("uuid-{i}");
        let sig = merchant.sign("Refund", &uuid, data).unwrap();
        remote.verify("Refund", &uuid, data, &sig).unwrap();
    }
}

#[test]
fn signature_covers_method_and_uuid() {
    let sig = merchant().sign("Deposit", GOLDEN_UUID, &deposit_data()).unwrap();
    let remote = remote();
    assert!(!remote.is_valid("Refund", GOLDEN_UUID, &deposit_data(), &sig));
    assert!(!remote.is_valid(
        "Deposit",
        "22222222-2222-2222-2222-222222222222",
        &deposit_data(),
        &sig
    ));
}

#[test]
fn every_non_null_field_is_covered() {
    let sig = merchant().sign("Deposit", GOLDEN_UUID, &deposit_data()).unwrap();
    let remote = remote();
    for field in ["Amount", "Currency", "EndUserID"] {
        let mut d = deposit_data();
        d[field] = json!("changed");
        assert!(!remote.is_valid("Deposit", GOLDEN_UUID, &d, &sig), "field={field}");
    }
    // adding a null field is not a change
    let mut d = deposit_data();
    d["Extra"] = Value::Null;
    assert!(remote.is_valid("Deposit", GOLDEN_UUID, &d, &sig));
}

#[test]
fn blank_and_garbage_signatures_fail_closed() {
    let remote = remote();
    for bad in ["", "   ", "not base64 !!", "AAAA"] {
        let err = remote
            .verify("Deposit", GOLDEN_UUID, &deposit_data(), bad)
            .expect_err("must fail");
        assert_eq!(err.code(), ErrorCode::Signature, "sig={bad:?}");
    }
}

#[test]
fn swapped_keys_do_not_verify() {
    let sig = merchant().sign("Deposit", GOLDEN_UUID, &deposit_data()).unwrap();
    // merchant verifies with the remote public key, so its own signature is foreign to it
    assert!(!merchant().is_valid("Deposit", GOLDEN_UUID, &deposit_data(), &sig));
}

#[test]
fn own_public_key_matches_fixture() {
    let expected = public_key_from_pem(&merchant_public()).unwrap();
    assert_eq!(merchant().own_public_key(), expected);
}

#[test]
fn invalid_pem_is_config_error() {
    let err = Signer::from_pem("not a key", &remote_public()).expect_err("must fail");
    assert_eq!(err.code().as_str(), "CONFIG");
}
