use std::sync::Arc;

use dashmap::DashMap;

use paywire_core::error::{PaywireError, Result};

use super::context::DispatchContext;
use super::data::DataShape;

/// Error a listener may return; the dispatcher turns it into a FAILED answer.
pub type ListenerError = Box<dyn std::error::Error + Send + Sync>;
pub type ListenerResult = std::result::Result<(), ListenerError>;

/// Method key that catches notifications nobody registered for.
pub const FALLBACK_METHOD: &str = "";

/// Application callback for inbound notifications.
pub trait NotificationListener: Send + Sync {
    fn on_notification(&self, ctx: &DispatchContext) -> ListenerResult;
}

impl<F> NotificationListener for F
where
    F: Fn(&DispatchContext) -> ListenerResult + Send + Sync,
{
    fn on_notification(&self, ctx: &DispatchContext) -> ListenerResult {
        self(ctx)
    }
}

/// All listeners for one (case folded) method.
#[derive(Clone)]
pub struct Registration {
    pub shape: DataShape,
    pub listeners: Vec<Arc<dyn NotificationListener>>,
}

/// Per-client listener table: `method (lower case) -> Registration`.
#[derive(Default)]
pub struct ListenerRegistry {
    by_method: DashMap<String, Registration>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self {
            by_method: DashMap::new(),
        }
    }

    /// Append a listener. Every registration of a method must use one shape.
    pub fn register(
        &self,
        method: &str,
        shape: DataShape,
        listener: Arc<dyn NotificationListener>,
    ) -> Result<()> {
        let key = method.to_lowercase();
        let mut entry = self
            .by_method
            .entry(key.clone())
            .or_insert_with(|| Registration {
                shape,
                listeners: Vec::new(),
            });

        if entry.shape != shape {
            return Err(PaywireError::Config(format!(
                "notification method '{key}' already registered with shape {:?}, got {shape:?}",
                entry.shape
            )));
        }
        entry.listeners.push(listener);
        Ok(())
    }

    /// Exact method first, then the fallback key. Returns a snapshot so no
    /// map guard is held while listeners run.
    pub fn resolve(&self, method_key: &str) -> Option<Registration> {
        if let Some(r) = self.by_method.get(method_key) {
            if !r.listeners.is_empty() {
                return Some(r.value().clone());
            }
        }
        self.by_method
            .get(FALLBACK_METHOD)
            .map(|r| r.value().clone())
    }
}
