//! paywire client library entry.
//!
//! This crate wires settings, the signed API client, the notification hub
//! and the axum webhook router into one stack. It is consumed by the
//! `paywire-webhook` binary (`main.rs`) and by integration tests.

pub mod app_state;
pub mod client;
pub mod config;
pub mod notify;
pub mod router;
pub mod transport;
pub mod validate;

pub use client::{ApiClient, ClientParts};
pub use notify::{DataShape, DispatchContext, NotificationHub};
