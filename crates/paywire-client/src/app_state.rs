//! Shared application state for the webhook server.

use std::sync::Arc;

use crate::notify::NotificationHub;

#[derive(Clone)]
pub struct AppState {
    hub: Arc<NotificationHub>,
}

impl AppState {
    pub fn new(hub: Arc<NotificationHub>) -> Self {
        Self { hub }
    }

    pub fn hub(&self) -> Arc<NotificationHub> {
        Arc::clone(&self.hub)
    }
}
