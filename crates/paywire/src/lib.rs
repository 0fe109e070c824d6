//! Top-level facade crate for paywire.
//!
//! Re-exports the signing core and the client library so users can depend on a single crate.

pub mod core {
    pub use paywire_core::*;
}

pub mod client {
    pub use paywire_client::*;
}
