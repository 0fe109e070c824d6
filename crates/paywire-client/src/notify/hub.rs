use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use dashmap::DashMap;
use serde_json::Value;

use paywire_core::error::{PaywireError, Result};

use super::context::{NotificationStatus, ResponseCollector};
use super::receiver::Receiver;

/// Reply the web boundary relays to the notifier.
#[derive(Debug, Clone)]
pub struct NotificationReply {
    pub status: NotificationStatus,
    pub http_status: u16,
    /// Signed response envelope (JSON).
    pub body: String,
}

/// Shared client registry for notification fan-out:
/// - `client_id -> Receiver`
/// - ids grow monotonically, so fan-out follows join order
pub struct NotificationHub {
    receivers: DashMap<u64, Arc<Receiver>>,
    seq: AtomicU64,
}

impl Default for NotificationHub {
    fn default() -> Self {
        Self::new()
    }
}

impl NotificationHub {
    pub fn new() -> Self {
        Self {
            receivers: DashMap::new(),
            seq: AtomicU64::new(1),
        }
    }

    /// Add a client; it stays registered until the membership is dropped.
    pub fn join(self: &Arc<Self>, receiver: Arc<Receiver>) -> HubMembership {
        let id = self.seq.fetch_add(1, Ordering::Relaxed);
        self.receivers.insert(id, receiver);
        tracing::info!(
            client_id = id,
            clients = self.receivers.len(),
            "client joined notification hub"
        );
        HubMembership {
            hub: Arc::downgrade(self),
            id,
        }
    }

    fn leave(&self, id: u64) {
        if self.receivers.remove(&id).is_some() {
            tracing::info!(
                client_id = id,
                clients = self.receivers.len(),
                "client left notification hub"
            );
        }
    }

    pub fn client_count(&self) -> usize {
        self.receivers.len()
    }

    fn snapshot(&self) -> Vec<(u64, Arc<Receiver>)> {
        let mut all: Vec<(u64, Arc<Receiver>)> = self
            .receivers
            .iter()
            .map(|e| (*e.key(), Arc::clone(e.value())))
            .collect();
        all.sort_unstable_by_key(|(id, _)| *id);
        all
    }

    /// Process one inbound notification end to end and build the signed reply.
    pub fn dispatch(&self, raw: &str) -> Result<NotificationReply> {
        let node: Value = serde_json::from_str(raw)
            .map_err(|e| PaywireError::Data(format!("invalid notification json: {e}")))?;
        let method_key = node
            .get("method")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_lowercase();

        let receivers = self.snapshot();
        if receivers.is_empty() {
            return Err(PaywireError::NoClient);
        }

        let collector = Arc::new(ResponseCollector::new());
        for (id, receiver) in &receivers {
            receiver.handle(*id, &node, &method_key, &collector)?;
        }

        let answer = collector
            .decide()
            .ok_or_else(|| PaywireError::NoResponse(method_key.clone()))?;
        let responder = receivers
            .iter()
            .find(|(id, _)| *id == answer.client_id)
            .map(|(_, r)| r)
            .ok_or_else(|| PaywireError::NoResponse(method_key.clone()))?;

        let body = responder.reply(&answer)?;
        tracing::debug!(
            method = %answer.method,
            uuid = %answer.uuid,
            status = answer.status.as_str(),
            answers = collector.len(),
            "notification answered"
        );
        Ok(NotificationReply {
            status: answer.status,
            http_status: answer.status.http_status(),
            body,
        })
    }
}

/// Registration guard held by a client; leaving happens on drop.
#[derive(Debug)]
pub struct HubMembership {
    hub: Weak<NotificationHub>,
    id: u64,
}

impl HubMembership {
    pub fn client_id(&self) -> u64 {
        self.id
    }
}

impl Drop for HubMembership {
    fn drop(&mut self) {
        if let Some(hub) = self.hub.upgrade() {
            hub.leave(self.id);
        }
    }
}
