//! Client settings loader (strict parsing).

pub mod schema;

use std::fs;

use paywire_core::error::{PaywireError, Result};
use paywire_core::Signer;

pub use schema::{
    ClientSettings, Credentials, Environment, KeyPaths, NotificationSettings, WebhookSection,
};

pub fn load_from_file(path: &str) -> Result<ClientSettings> {
    let s = fs::read_to_string(path)
        .map_err(|e| PaywireError::Config(format!("read config failed: {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<ClientSettings> {
    let cfg: ClientSettings = serde_yaml::from_str(s)
        .map_err(|e| PaywireError::Config(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}

/// Read both PEM files named in `keys` and build the signer.
pub fn load_signer(keys: &KeyPaths) -> Result<Signer> {
    let private_pem = fs::read_to_string(&keys.private_key_path).map_err(|e| {
        PaywireError::Config(format!("read {} failed: {e}", keys.private_key_path))
    })?;
    let public_pem = fs::read_to_string(&keys.public_key_path).map_err(|e| {
        PaywireError::Config(format!("read {} failed: {e}", keys.public_key_path))
    })?;
    Signer::from_pem(&private_pem, &public_pem)
}
