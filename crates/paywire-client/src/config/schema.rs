use std::fmt;

use serde::Deserialize;
use paywire_core::error::{PaywireError, Result};

pub const PRODUCTION_ENDPOINT: &str = "https://api.trustly.com/1";
pub const TEST_ENDPOINT: &str = "https://test.trustly.com/api/1";

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClientSettings {
    pub version: u32,

    #[serde(default)]
    pub environment: Environment,

    /// Only for `environment: custom`.
    #[serde(default)]
    pub endpoint: Option<String>,

    pub credentials: Credentials,

    #[serde(default)]
    pub keys: Option<KeyPaths>,

    #[serde(default)]
    pub notifications: NotificationSettings,

    #[serde(default)]
    pub webhook: WebhookSection,
}

impl ClientSettings {
    /// Settings without a config file (keys supplied directly to the client).
    pub fn new(environment: Environment, username: &str, password: &str) -> Self {
        Self {
            version: 1,
            environment,
            endpoint: None,
            credentials: Credentials {
                username: username.to_string(),
                password: password.to_string(),
            },
            keys: None,
            notifications: NotificationSettings::default(),
            webhook: WebhookSection::default(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(PaywireError::Config(format!(
                "unsupported settings version {}",
                self.version
            )));
        }
        match (&self.environment, &self.endpoint) {
            (Environment::Custom, None) => {
                return Err(PaywireError::Config(
                    "endpoint is required when environment is custom".into(),
                ));
            }
            (Environment::Custom, Some(url)) => {
                if !(url.starts_with("https://") || url.starts_with("http://")) {
                    return Err(PaywireError::Config(format!(
                        "endpoint must be an http(s) url, got '{url}'"
                    )));
                }
            }
            (_, Some(_)) => {
                return Err(PaywireError::Config(
                    "endpoint may only be set when environment is custom".into(),
                ));
            }
            (_, None) => {}
        }
        if self.credentials.username.trim().is_empty() {
            return Err(PaywireError::Config("credentials.username must not be empty".into()));
        }

        self.webhook.validate()?;

        Ok(())
    }

    /// URL outbound requests are posted to.
    pub fn endpoint_url(&self) -> &str {
        match self.environment {
            Environment::Production => PRODUCTION_ENDPOINT,
            Environment::Test => TEST_ENDPOINT,
            Environment::Custom => self.endpoint.as_deref().unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Production,
    #[default]
    Test,
    Custom,
}

#[derive(Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// PEM files: our private key and the counterparty public key.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct KeyPaths {
    pub private_key_path: String,
    pub public_key_path: String,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NotificationSettings {
    /// Put the listener's `respond_fail` message into the signed reply.
    #[serde(default)]
    pub include_message_in_response: bool,

    /// Use a failing listener's error text as its FAILED message.
    #[serde(default)]
    pub include_exception_message_in_response: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WebhookSection {
    #[serde(default = "default_listen")]
    pub listen: String,

    #[serde(default = "default_path")]
    pub path: String,
}

impl Default for WebhookSection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            path: default_path(),
        }
    }
}

impl WebhookSection {
    pub fn validate(&self) -> Result<()> {
        if !self.path.starts_with('/') {
            return Err(PaywireError::Config(
                "webhook.path must start with '/'".into(),
            ));
        }
        Ok(())
    }
}

fn default_listen() -> String {
    "0.0.0.0:8080".into()
}
fn default_path() -> String {
    "/notifications".into()
}
