//! One client's notification endpoint: its listeners, keys and reply flags.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use serde_json::{json, Value};

use paywire_core::error::{PaywireError, Result};
use paywire_core::protocol::envelope::{Notification, Response, SignedBlock};
use paywire_core::Signer;

use crate::config::NotificationSettings;
use crate::validate::DataValidator;

use super::context::{Answer, DispatchContext, ResponseCollector};
use super::registry::ListenerRegistry;

pub struct Receiver {
    signer: Signer,
    listeners: ListenerRegistry,
    validator: Option<Arc<dyn DataValidator>>,
    flags: NotificationSettings,
}

impl Receiver {
    pub fn new(
        signer: Signer,
        validator: Option<Arc<dyn DataValidator>>,
        flags: NotificationSettings,
    ) -> Self {
        Self {
            signer,
            listeners: ListenerRegistry::new(),
            validator,
            flags,
        }
    }

    pub fn listeners(&self) -> &ListenerRegistry {
        &self.listeners
    }

    /// Resolve, decode, verify, validate, then run every listener.
    pub fn handle(
        &self,
        client_id: u64,
        node: &Value,
        method_key: &str,
        collector: &Arc<ResponseCollector>,
    ) -> Result<()> {
        let registration = self
            .listeners
            .resolve(method_key)
            .ok_or_else(|| PaywireError::NoListener(method_key.to_string()))?;

        let notification: Notification = serde_json::from_value(node.clone())
            .map_err(|e| PaywireError::Data(format!("invalid notification envelope: {e}")))?;
        let data = registration.shape.decode(notification.data())?;

        notification.verify_with(&self.signer).map_err(|e| match e {
            PaywireError::Signature(m) => {
                tracing::warn!(
                    method = %notification.method,
                    uuid = %notification.uuid(),
                    "notification signature rejected"
                );
                PaywireError::Signature(format!("notification: {m}"))
            }
            other => other,
        })?;

        if let Some(v) = &self.validator {
            v.validate(method_key, &data.to_value()?)?;
        }

        let ctx = DispatchContext::new(
            client_id,
            notification.method.clone(),
            notification.params.uuid.clone(),
            data,
            Arc::clone(collector),
        );

        for listener in &registration.listeners {
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| listener.on_notification(&ctx)));
            let failure = match outcome {
                Ok(Ok(())) => continue,
                Ok(Err(e)) => e.to_string(),
                Err(payload) => panic_text(payload.as_ref()),
            };
            tracing::warn!(
                client_id,
                method = %ctx.method(),
                error = %failure,
                "notification listener failed"
            );
            if self.flags.include_exception_message_in_response {
                ctx.respond_fail(failure);
            } else {
                ctx.respond_fail(String::new());
            }
        }
        Ok(())
    }

    /// Signed `{status, message?}` reply for the decided answer.
    pub fn reply(&self, answer: &Answer) -> Result<String> {
        let mut data = json!({ "status": answer.status.as_str() });
        if self.flags.include_message_in_response {
            if let Some(m) = &answer.message {
                data["message"] = Value::String(m.clone());
            }
        }
        Response::signed(&self.signer, &answer.method, &answer.uuid, data)?.to_json()
    }
}

fn panic_text(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "listener panicked".to_string()
    }
}
