//! Transport layer.
//!
//! - `Transport`: outbound seam, one request body in, one response body out.
//!   The host application picks the implementation; there is no built-in
//!   retry, timeout or cancellation.
//! - `webhook`: inbound HTTP handler relaying notifications to the hub.

pub mod webhook;

use async_trait::async_trait;

use paywire_core::error::Result;

/// Outbound request transport. I/O failures map to `PaywireError::Connection`.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, url: &str, body: String) -> Result<String>;
}
