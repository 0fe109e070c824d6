//! Protocol modules (canonical text + JSON-RPC envelopes).
//!
//! - `canonical`: the delimiter-free, sorted-field flattening that is signed.
//! - `envelope`: request/response/notification wire shapes.
//! - `rejection`: soft-decline detection inside successful result data.
//!
//! Parsers never panic: malformed input is reported as `PaywireError`.

pub mod canonical;
pub mod envelope;
pub mod rejection;

/// Protocol version carried by every envelope.
pub const API_VERSION: &str = "1.1";
