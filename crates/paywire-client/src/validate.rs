//! Optional structural validation of request and notification data.
//!
//! A client without a validator skips this step entirely.

use std::collections::HashMap;

use serde_json::Value;

use paywire_core::error::{PaywireError, Result};

/// Pluggable field-constraint checker.
pub trait DataValidator: Send + Sync {
    /// `method` is case folded; `data` is the `Data` object.
    fn validate(&self, method: &str, data: &Value) -> Result<()>;
}

/// Requires listed fields to be present, non-null and non-blank.
#[derive(Debug, Default, Clone)]
pub struct RequiredFields {
    rules: HashMap<String, Vec<String>>,
}

impl RequiredFields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn require<I, S>(&mut self, method: &str, fields: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rules
            .entry(method.to_lowercase())
            .or_default()
            .extend(fields.into_iter().map(Into::into));
    }
}

impl DataValidator for RequiredFields {
    fn validate(&self, method: &str, data: &Value) -> Result<()> {
        let Some(fields) = self.rules.get(method) else {
            return Ok(());
        };

        let missing: Vec<&str> = fields
            .iter()
            .filter(|f| match data.get(f.as_str()) {
                None | Some(Value::Null) => true,
                Some(Value::String(s)) => s.trim().is_empty(),
                Some(_) => false,
            })
            .map(String::as_str)
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(PaywireError::Validation(format!(
                "{method}: missing required field(s): {}",
                missing.join(", ")
            )))
        }
    }
}
