//! JSON-RPC envelopes (requests, responses, notifications).
//!
//! Requests and notifications share one shape:
//! `{ method, version, params: { Signature, UUID, Data } }` (lower-case
//! param names are accepted on input). Responses carry exactly one of
//! `result` / `error`; both branches expose the same signed fields through
//! [`SignedBlock`].
//!
//! `data` defaults to `serde_json::Value` so a parsed envelope keeps the raw
//! wire node, which is what signatures are verified against.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{PaywireError, Result};
use crate::signing::Signer;

use super::API_VERSION;

/// Signed part of an envelope, whichever branch it came from.
pub trait SignedBlock {
    fn method(&self) -> &str;
    fn uuid(&self) -> &str;
    fn signature(&self) -> &str;
    fn data(&self) -> &Value;

    /// Verify the block against the counterparty key held by `signer`.
    fn verify_with(&self, signer: &Signer) -> Result<()> {
        signer.verify(self.method(), self.uuid(), self.data(), self.signature())
    }
}

/// Outbound request, or inbound notification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Request<D = Value> {
    pub method: String,
    #[serde(default = "default_version")]
    pub version: String,
    pub params: RequestParams<D>,
}

/// Notifications arrive in request form.
pub type Notification = Request<Value>;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestParams<D = Value> {
    #[serde(rename = "Signature", alias = "signature", default)]
    pub signature: String,
    #[serde(rename = "UUID", alias = "uuid")]
    pub uuid: String,
    #[serde(rename = "Data", alias = "data")]
    pub data: D,
}

fn default_version() -> String {
    API_VERSION.to_string()
}

impl Request<Value> {
    /// Build a signed request. `data` is signed exactly as it will be sent.
    pub fn signed(signer: &Signer, method: &str, uuid: &str, data: Value) -> Result<Self> {
        let signature = signer.sign(method, uuid, &data)?;
        Ok(Self {
            method: method.to_string(),
            version: API_VERSION.to_string(),
            params: RequestParams {
                signature,
                uuid: uuid.to_string(),
                data,
            },
        })
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self)
            .map_err(|e| PaywireError::Data(format!("request encode failed: {e}")))
    }
}

impl SignedBlock for Request<Value> {
    fn method(&self) -> &str {
        &self.method
    }
    fn uuid(&self) -> &str {
        &self.params.uuid
    }
    fn signature(&self) -> &str {
        &self.params.signature
    }
    fn data(&self) -> &Value {
        &self.params.data
    }
}

/// Successful response branch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultBlock<D = Value> {
    #[serde(default)]
    pub signature: String,
    #[serde(alias = "UUID")]
    pub uuid: String,
    pub method: String,
    pub data: D,
}

impl SignedBlock for ResultBlock<Value> {
    fn method(&self) -> &str {
        &self.method
    }
    fn uuid(&self) -> &str {
        &self.uuid
    }
    fn signature(&self) -> &str {
        &self.signature
    }
    fn data(&self) -> &Value {
        &self.data
    }
}

/// Error response branch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBlock {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub signature: String,
    #[serde(default, alias = "UUID")]
    pub uuid: String,
    #[serde(default)]
    pub method: String,
    #[serde(default)]
    pub data: Value,
}

impl ErrorBlock {
    /// Numeric code, falling back to `data.code` when the top level lacks it.
    pub fn code(&self) -> i64 {
        self.code
            .or_else(|| self.data.get("code").and_then(number_or_text))
            .unwrap_or(0)
    }

    /// Human message: `message`, then `name`, then the code as text.
    pub fn display_message(&self) -> String {
        non_blank(self.message.as_deref())
            .or_else(|| non_blank(self.name.as_deref()))
            .map(str::to_string)
            .unwrap_or_else(|| self.code().to_string())
    }

    pub fn into_error(self) -> PaywireError {
        PaywireError::ErrorResponse {
            code: self.code(),
            message: self.display_message(),
        }
    }
}

impl SignedBlock for ErrorBlock {
    fn method(&self) -> &str {
        &self.method
    }
    fn uuid(&self) -> &str {
        &self.uuid
    }
    fn signature(&self) -> &str {
        &self.signature
    }
    fn data(&self) -> &Value {
        &self.data
    }
}

fn non_blank(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.trim().is_empty())
}

fn number_or_text(v: &Value) -> Option<i64> {
    match v {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

/// Response envelope. Exactly one of `result` / `error` is present.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Response<D = Value> {
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<ResultBlock<D>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorBlock>,
}

impl Response<Value> {
    /// Build a signed success response.
    pub fn signed(signer: &Signer, method: &str, uuid: &str, data: Value) -> Result<Self> {
        let signature = signer.sign(method, uuid, &data)?;
        Ok(Self {
            version: API_VERSION.to_string(),
            result: Some(ResultBlock {
                signature,
                uuid: uuid.to_string(),
                method: method.to_string(),
                data,
            }),
            error: None,
        })
    }

    pub fn parse(text: &str) -> Result<Self> {
        serde_json::from_str(text)
            .map_err(|e| PaywireError::Data(format!("invalid response json: {e}")))
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self)
            .map_err(|e| PaywireError::Data(format!("response encode failed: {e}")))
    }

    /// Whichever branch is present.
    pub fn block(&self) -> Option<&dyn SignedBlock> {
        match (&self.result, &self.error) {
            (Some(r), None) => Some(r),
            (None, Some(e)) => Some(e),
            _ => None,
        }
    }

    /// Split into the success branch, or the matching error.
    pub fn into_result(self) -> Result<ResultBlock<Value>> {
        match (self.result, self.error) {
            (Some(r), None) => Ok(r),
            (None, Some(e)) => Err(e.into_error()),
            (Some(_), Some(_)) => Err(PaywireError::Data(
                "response carries both result and error".into(),
            )),
            (None, None) => Err(PaywireError::Data(
                "response carries neither result nor error".into(),
            )),
        }
    }

    /// Full inbound check for a reply to `expected_uuid`:
    /// branch selection, signature over the raw node, then correlation.
    pub fn verify_reply(self, signer: &Signer, expected_uuid: &str) -> Result<ResultBlock<Value>> {
        let block = self.into_result()?;
        block.verify_with(signer)?;
        if block.uuid != expected_uuid {
            return Err(PaywireError::Data(format!(
                "incoming uuid {} does not match request uuid {expected_uuid}",
                block.uuid
            )));
        }
        Ok(block)
    }
}
