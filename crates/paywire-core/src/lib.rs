//! paywire core: signing primitives, wire envelopes, and error types.
//!
//! This crate defines the canonical serializer, the RSA/SHA-1 signature
//! engine and the JSON-RPC envelope shapes shared by the client, the webhook
//! dispatcher and test tooling. It carries no transport or runtime
//! dependencies so it can be reused in multiple contexts.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! Malformed payloads and bad signatures surface as `PaywireError` so a
//! hostile counterparty cannot crash the process.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod protocol;
pub mod signing;

/// Shared result type.
pub use error::{ErrorCode, PaywireError, Result};
pub use signing::Signer;
