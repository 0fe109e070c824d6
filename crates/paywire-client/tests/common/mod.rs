//! Shared fixtures: keys, settings, signed notifications and a fake remote API.

#![allow(dead_code)]

use std::fs;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{json, Value};

use paywire_client::config::{ClientSettings, Environment};
use paywire_client::transport::Transport;
use paywire_client::{ApiClient, ClientParts, NotificationHub};
use paywire_core::error::Result;
use paywire_core::protocol::envelope::{Request, Response, SignedBlock};
use paywire_core::Signer;

fn key(name: &str) -> String {
    let path = format!("{}/../../testdata/keys/{name}", env!("CARGO_MANIFEST_DIR"));
    fs::read_to_string(&path).unwrap_or_else(|e| panic!("read {path}: {e}"))
}

/// Our side: merchant private key, remote public key.
pub fn merchant() -> Signer {
    Signer::from_pem(&key("merchant_private.pem"), &key("remote_public.pem")).unwrap()
}

/// The payment provider: remote private key, merchant public key.
pub fn remote() -> Signer {
    Signer::from_pem(&key("remote_private.pem"), &key("merchant_public.pem")).unwrap()
}

pub fn settings() -> ClientSettings {
    ClientSettings::new(Environment::Test, "merchant", "secret")
}

pub fn hub_client(hub: &Arc<NotificationHub>, settings: ClientSettings) -> ApiClient {
    ApiClient::new(ClientParts {
        settings,
        signer: merchant(),
        transport: None,
        validator: None,
        hub: Some(Arc::clone(hub)),
    })
    .unwrap()
}

/// Notification as the provider posts it (lower-case params).
pub fn notification(method: &str, uuid: &str, data: Value) -> String {
    let signature = remote().sign(method, uuid, &data).unwrap();
    json!({
        "method": method,
        "version": "1.1",
        "params": { "signature": signature, "uuid": uuid, "data": data }
    })
    .to_string()
}

const OTHER_UUID: &str = "00000000-0000-0000-0000-000000000000";

/// How the fake remote answers a request.
pub enum Reply {
    /// Signed result with this data, echoing the request uuid.
    Result(Value),
    /// Signed result carrying a different uuid.
    WrongUuid(Value),
    /// Result whose data was altered after signing.
    Tampered(Value),
    /// Error branch.
    Error { code: i64, message: String },
}

/// Remote API stand-in: checks our signature, records the request, answers per `reply`.
pub struct FakeRemote {
    reply: Reply,
    seen: Mutex<Vec<(String, Request)>>,
}

impl FakeRemote {
    pub fn new(reply: Reply) -> Arc<Self> {
        Arc::new(Self {
            reply,
            seen: Mutex::new(Vec::new()),
        })
    }

    pub fn requests(&self) -> Vec<(String, Request)> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for FakeRemote {
    async fn send(&self, url: &str, body: String) -> Result<String> {
        let req: Request = serde_json::from_str(&body).unwrap();
        req.verify_with(&remote()).unwrap();
        self.seen.lock().unwrap().push((url.to_string(), req.clone()));

        let uuid = req.uuid().to_string();
        let response = match &self.reply {
            Reply::Result(data) => Response::signed(&remote(), &req.method, &uuid, data.clone())?,
            Reply::WrongUuid(data) => {
                Response::signed(&remote(), &req.method, OTHER_UUID, data.clone())?
            }
            Reply::Tampered(data) => {
                let mut r = Response::signed(&remote(), &req.method, &uuid, data.clone())?;
                if let Some(block) = r.result.as_mut() {
                    block.data["tampered"] = json!(true);
                }
                r
            }
            Reply::Error { code, message } => {
                let text = json!({
                    "version": "1.1",
                    "error": {
                        "name": "JSONRPCError",
                        "code": code,
                        "message": message,
                        "uuid": uuid,
                        "method": req.method,
                        "data": { "code": code, "message": message }
                    }
                });
                return Ok(text.to_string());
            }
        };
        response.to_json()
    }
}

pub fn api_client(remote: &Arc<FakeRemote>) -> ApiClient {
    let transport: Arc<dyn Transport> = Arc::clone(remote) as Arc<dyn Transport>;
    ApiClient::new(ClientParts {
        settings: settings(),
        signer: merchant(),
        transport: Some(transport),
        validator: None,
        hub: None,
    })
    .unwrap()
}
