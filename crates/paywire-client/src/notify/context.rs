//! Per-dispatch context and response aggregation.

use std::sync::{Arc, Mutex};

use super::data::NotificationData;

/// Acknowledgement status sent back to the notifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationStatus {
    Ok,
    Failed,
}

impl NotificationStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            NotificationStatus::Ok => "OK",
            NotificationStatus::Failed => "FAILED",
        }
    }

    /// HTTP status the web boundary should relay.
    pub fn http_status(self) -> u16 {
        match self {
            NotificationStatus::Ok => 200,
            NotificationStatus::Failed => 500,
        }
    }
}

/// One call to `respond_ok` / `respond_fail`.
#[derive(Debug, Clone)]
pub struct Answer {
    pub client_id: u64,
    pub method: String,
    pub uuid: String,
    pub status: NotificationStatus,
    pub message: Option<String>,
}

/// Collects answers from every listener of every client for one notification.
#[derive(Debug, Default)]
pub struct ResponseCollector {
    answers: Mutex<Vec<Answer>>,
}

impl ResponseCollector {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, answer: Answer) {
        // a poisoned lock only means a listener panicked mid-push; the vec is still usable
        let mut guard = self.answers.lock().unwrap_or_else(|e| e.into_inner());
        guard.push(answer);
    }

    pub fn len(&self) -> usize {
        self.answers.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Final answer: the last FAILED if any listener failed, else the last OK.
    pub fn decide(&self) -> Option<Answer> {
        let guard = self.answers.lock().unwrap_or_else(|e| e.into_inner());
        guard
            .iter()
            .rev()
            .find(|a| a.status == NotificationStatus::Failed)
            .or_else(|| guard.last())
            .cloned()
    }
}

/// Handed to every listener; exactly one of the response hooks is expected
/// to be called per listener.
pub struct DispatchContext {
    client_id: u64,
    method: String,
    uuid: String,
    data: NotificationData,
    collector: Arc<ResponseCollector>,
}

impl DispatchContext {
    pub fn new(
        client_id: u64,
        method: String,
        uuid: String,
        data: NotificationData,
        collector: Arc<ResponseCollector>,
    ) -> Self {
        Self {
            client_id,
            method,
            uuid,
            data,
            collector,
        }
    }

    /// Method as sent on the wire (not case folded).
    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn uuid(&self) -> &str {
        &self.uuid
    }

    pub fn data(&self) -> &NotificationData {
        &self.data
    }

    pub fn client_id(&self) -> u64 {
        self.client_id
    }

    pub fn respond_ok(&self) {
        self.answer(NotificationStatus::Ok, None);
    }

    /// An empty message is treated as no message.
    pub fn respond_fail(&self, message: impl Into<String>) {
        let message = message.into();
        let message = if message.is_empty() { None } else { Some(message) };
        self.answer(NotificationStatus::Failed, message);
    }

    fn answer(&self, status: NotificationStatus, message: Option<String>) {
        self.collector.push(Answer {
            client_id: self.client_id,
            method: self.method.clone(),
            uuid: self.uuid.clone(),
            status,
            message,
        });
    }
}
