//! JSON test vector loader shared by canonical and signing tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]
#![allow(dead_code)]

use std::fs;

use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
pub struct TestVector {
    pub description: String,
    pub input: Value,
    pub expect: String,
}

pub fn load(name: &str) -> TestVector {
    let s = fs::read_to_string(format!("tests/vectors/{name}")).unwrap();
    serde_json::from_str(&s).unwrap()
}

fn key(name: &str) -> String {
    fs::read_to_string(format!("{}/../../testdata/keys/{name}", env!("CARGO_MANIFEST_DIR")))
        .unwrap_or_else(|e| panic!("missing key fixture {name}: {e}"))
}

pub fn merchant_private() -> String {
    key("merchant_private.pem")
}

pub fn merchant_private_pkcs1() -> String {
    key("merchant_private_pkcs1.pem")
}

pub fn merchant_public() -> String {
    key("merchant_public.pem")
}

pub fn remote_private() -> String {
    key("remote_private.pem")
}

pub fn remote_public() -> String {
    key("remote_public.pem")
}
