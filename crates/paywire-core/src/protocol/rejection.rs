//! Soft-decline detection.
//!
//! Some successful results carry `result: "0"` / `false` and an optional
//! `rejected` reason. That is a business refusal, not a protocol error, so
//! callers opt in to treating it as one.

use serde_json::Value;

use crate::error::{PaywireError, Result};

/// Business-level refusal found in result data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    pub reason: Option<String>,
}

impl Rejection {
    /// Inspect result data. `None` means the operation was accepted.
    pub fn from_data(data: &Value) -> Option<Self> {
        let reason = data
            .get("rejected")
            .and_then(Value::as_str)
            .filter(|s| !s.trim().is_empty())
            .map(str::to_string);

        let declined = match data.get("result") {
            Some(Value::Bool(b)) => !b,
            Some(Value::String(s)) => s == "0" || s.eq_ignore_ascii_case("false"),
            Some(Value::Number(n)) => n.as_i64() == Some(0),
            _ => false,
        };

        if declined || reason.is_some() {
            Some(Self { reason })
        } else {
            None
        }
    }
}

/// Turn a soft decline into `PaywireError::Rejection`.
pub fn ensure_accepted(data: &Value) -> Result<()> {
    match Rejection::from_data(data) {
        None => Ok(()),
        Some(r) => Err(PaywireError::Rejection {
            reason: r.reason.unwrap_or_else(|| "declined".into()),
        }),
    }
}
