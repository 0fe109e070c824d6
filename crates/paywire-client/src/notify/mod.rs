//! Notification dispatch.
//!
//! Inbound notifications flow: raw payload -> method lookup (with `""`
//! fallback) -> typed decode -> signature check -> optional validation ->
//! every listener of every registered client -> aggregated OK/FAILED reply,
//! signed by the client that answered.

pub mod context;
pub mod data;
pub mod hub;
pub mod receiver;
pub mod registry;

pub use context::{DispatchContext, NotificationStatus};
pub use data::{
    AccountData, CancelData, CreditData, DataShape, DebitData, KycData, NotificationData,
    NotificationPayload, PayoutConfirmationData, PendingData,
};
pub use hub::{HubMembership, NotificationHub, NotificationReply};
pub use registry::{ListenerError, ListenerResult, NotificationListener, FALLBACK_METHOD};
