//! Canonical plaintext serialization.
//!
//! Rules (must match the counterparty byte for byte):
//! - object fields are emitted in byte-wise ascending name order as
//!   `name ++ serialize(value)`; null-valued fields are skipped entirely
//! - array elements are emitted in order, without separators
//! - strings are emitted raw (no quoting, no escaping)
//! - numbers use their decimal text form, booleans `true`/`false`
//! - null contributes nothing
//!
//! Absent and null fields therefore produce identical output, which is what
//! lets a decoded struct and the raw wire node be signed interchangeably.

use serde::Serialize;
use serde_json::Value;

use crate::error::{PaywireError, Result};

/// Flatten a JSON value into its canonical plaintext.
pub fn serialize(value: &Value) -> String {
    let mut out = String::new();
    write_value(&mut out, value);
    out
}

/// Canonical plaintext of a decoded application object.
pub fn serialize_data<T: Serialize + ?Sized>(data: &T) -> Result<String> {
    let value = serde_json::to_value(data)
        .map_err(|e| PaywireError::Data(format!("data encode failed: {e}")))?;
    Ok(serialize(&value))
}

fn write_value(out: &mut String, value: &Value) {
    match value {
        Value::Null => {}
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Number(n) => out.push_str(&n.to_string()),
        Value::String(s) => out.push_str(s),
        Value::Array(items) => {
            for item in items {
                write_value(out, item);
            }
        }
        Value::Object(map) => {
            // serde_json may preserve insertion order (feature unification),
            // so never rely on the map's own iteration order.
            let mut fields: Vec<(&String, &Value)> = map.iter().collect();
            fields.sort_unstable_by(|a, b| a.0.as_bytes().cmp(b.0.as_bytes()));
            for (name, field) in fields {
                if field.is_null() {
                    continue;
                }
                out.push_str(name);
                write_value(out, field);
            }
        }
    }
}
