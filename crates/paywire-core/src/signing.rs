//! Signature engine (RSASSA-PKCS1-v1_5 over SHA-1, base64 text).
//!
//! Signed plaintext is `method ++ uuid ++ canonical(data)`. Our own private
//! key only ever signs outgoing material; the counterparty public key only
//! ever verifies incoming material. Signing/verifying keys are rebuilt per
//! call so no digest state is shared between threads.

use std::fmt;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use rsa::pkcs1::{DecodeRsaPrivateKey, DecodeRsaPublicKey};
use rsa::pkcs1v15::{Signature, SigningKey, VerifyingKey};
use rsa::pkcs8::{DecodePrivateKey, DecodePublicKey};
use rsa::signature::{SignatureEncoding, Signer as _, Verifier as _};
use rsa::{RsaPrivateKey, RsaPublicKey};
use serde_json::Value;
use sha1::Sha1;

use crate::error::{PaywireError, Result};
use crate::protocol::canonical;

/// Build the exact plaintext that gets signed.
pub fn plaintext(method: &str, uuid: &str, data: &Value) -> String {
    let mut s = String::with_capacity(method.len() + uuid.len() + 64);
    s.push_str(method);
    s.push_str(uuid);
    s.push_str(&canonical::serialize(data));
    s
}

/// Sign `method ++ uuid ++ canonical(data)` and return base64 text.
pub fn sign(method: &str, uuid: &str, data: &Value, key: &RsaPrivateKey) -> Result<String> {
    let text = plaintext(method, uuid, data);
    let signing_key = SigningKey::<Sha1>::new(key.clone());
    let sig = signing_key
        .try_sign(text.as_bytes())
        .map_err(|e| PaywireError::Config(format!("rsa signing failed: {e}")))?;
    tracing::debug!(%method, %uuid, "signed payload");
    Ok(STANDARD.encode(sig.to_bytes()))
}

/// Verify a base64 signature. Fails closed on any decode problem.
pub fn verify(
    method: &str,
    uuid: &str,
    data: &Value,
    signature: &str,
    key: &RsaPublicKey,
) -> Result<()> {
    let signature = signature.trim();
    if signature.is_empty() {
        return Err(PaywireError::Signature("missing signature".into()));
    }
    let raw = STANDARD
        .decode(signature)
        .map_err(|e| PaywireError::Signature(format!("signature is not base64: {e}")))?;
    let sig = Signature::try_from(raw.as_slice())
        .map_err(|e| PaywireError::Signature(format!("malformed signature: {e}")))?;

    let text = plaintext(method, uuid, data);
    let verifying_key = VerifyingKey::<Sha1>::new(key.clone());
    verifying_key.verify(text.as_bytes(), &sig).map_err(|_| {
        tracing::debug!(%method, %uuid, "signature mismatch");
        PaywireError::Signature(format!("signature mismatch for {method} ({uuid})"))
    })
}

/// Parse an RSA private key from PEM (PKCS#8 `PRIVATE KEY` or PKCS#1 `RSA PRIVATE KEY`).
pub fn private_key_from_pem(pem: &str) -> Result<RsaPrivateKey> {
    RsaPrivateKey::from_pkcs8_pem(pem)
        .or_else(|_| RsaPrivateKey::from_pkcs1_pem(pem))
        .map_err(|e| PaywireError::Config(format!("invalid private key pem: {e}")))
}

/// Parse an RSA public key from PEM (SPKI `PUBLIC KEY` or PKCS#1 `RSA PUBLIC KEY`).
pub fn public_key_from_pem(pem: &str) -> Result<RsaPublicKey> {
    RsaPublicKey::from_public_key_pem(pem)
        .or_else(|_| RsaPublicKey::from_pkcs1_pem(pem))
        .map_err(|e| PaywireError::Config(format!("invalid public key pem: {e}")))
}

/// Key pair bound to one party: own private key + counterparty public key.
#[derive(Clone)]
pub struct Signer {
    private_key: RsaPrivateKey,
    counterparty: RsaPublicKey,
}

impl fmt::Debug for Signer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signer").finish_non_exhaustive()
    }
}

impl Signer {
    pub fn new(private_key: RsaPrivateKey, counterparty: RsaPublicKey) -> Self {
        Self {
            private_key,
            counterparty,
        }
    }

    pub fn from_pem(private_pem: &str, counterparty_pem: &str) -> Result<Self> {
        Ok(Self::new(
            private_key_from_pem(private_pem)?,
            public_key_from_pem(counterparty_pem)?,
        ))
    }

    /// Public half of our own key (what the counterparty verifies with).
    pub fn own_public_key(&self) -> RsaPublicKey {
        self.private_key.to_public_key()
    }

    pub fn sign(&self, method: &str, uuid: &str, data: &Value) -> Result<String> {
        sign(method, uuid, data, &self.private_key)
    }

    /// Sign a decoded application object. Unset (`None`) fields sign the same
    /// as absent ones.
    pub fn sign_data<T: serde::Serialize>(
        &self,
        method: &str,
        uuid: &str,
        data: &T,
    ) -> Result<String> {
        let value = serde_json::to_value(data)
            .map_err(|e| PaywireError::Data(format!("data encode failed: {e}")))?;
        self.sign(method, uuid, &value)
    }

    pub fn verify(&self, method: &str, uuid: &str, data: &Value, signature: &str) -> Result<()> {
        verify(method, uuid, data, signature, &self.counterparty)
    }

    /// Boolean form of [`Signer::verify`].
    pub fn is_valid(&self, method: &str, uuid: &str, data: &Value, signature: &str) -> bool {
        self.verify(method, uuid, data, signature).is_ok()
    }
}
