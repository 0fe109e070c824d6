//! API client: signed outbound calls plus this client's notification listeners.
//!
//! A client built with a hub joins it immediately and leaves on `shutdown`
//! (or drop), so notifications fan out to every live client.

pub mod requests;

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use uuid::Uuid;

use paywire_core::error::{PaywireError, Result};
use paywire_core::protocol::envelope::{Request, Response, ResultBlock};
use paywire_core::protocol::rejection::ensure_accepted;
use paywire_core::Signer;

use crate::config::ClientSettings;
use crate::notify::receiver::Receiver;
use crate::notify::{
    DataShape, DispatchContext, HubMembership, ListenerResult, NotificationHub,
    NotificationListener, NotificationPayload,
};
use crate::transport::Transport;
use crate::validate::DataValidator;

pub use requests::{
    BalanceEntry, BalanceRequest, DepositAttributes, DepositRequest, DepositResponse,
    RefundRequest, RefundResponse,
};

/// Everything a client is built from. Optional parts may be left `None`.
pub struct ClientParts {
    pub settings: ClientSettings,
    pub signer: Signer,
    pub transport: Option<Arc<dyn Transport>>,
    pub validator: Option<Arc<dyn DataValidator>>,
    pub hub: Option<Arc<NotificationHub>>,
}

pub struct ApiClient {
    settings: ClientSettings,
    signer: Signer,
    transport: Option<Arc<dyn Transport>>,
    validator: Option<Arc<dyn DataValidator>>,
    receiver: Arc<Receiver>,
    membership: Option<HubMembership>,
}

impl ApiClient {
    pub fn new(parts: ClientParts) -> Result<Self> {
        parts.settings.validate()?;

        let receiver = Arc::new(Receiver::new(
            parts.signer.clone(),
            parts.validator.clone(),
            parts.settings.notifications,
        ));
        let membership = parts.hub.as_ref().map(|hub| hub.join(Arc::clone(&receiver)));

        Ok(Self {
            settings: parts.settings,
            signer: parts.signer,
            transport: parts.transport,
            validator: parts.validator,
            receiver,
            membership,
        })
    }

    pub fn settings(&self) -> &ClientSettings {
        &self.settings
    }

    /// Hub id while registered for notifications.
    pub fn client_id(&self) -> Option<u64> {
        self.membership.as_ref().map(HubMembership::client_id)
    }

    /// Leave the notification hub. Outbound calls keep working.
    pub fn shutdown(&mut self) {
        self.membership = None;
    }

    // ---- notifications

    /// Register a listener for `method` (case-insensitive; `""` is the fallback).
    pub fn register<F>(&self, method: &str, shape: DataShape, listener: F) -> Result<()>
    where
        F: Fn(&DispatchContext) -> ListenerResult + Send + Sync + 'static,
    {
        self.register_listener(method, shape, Arc::new(listener))
    }

    /// Register with the shape the protocol defines for `method`
    /// (unknown methods and the fallback decode as [`DataShape::Raw`]).
    pub fn listen<F>(&self, method: &str, listener: F) -> Result<()>
    where
        F: Fn(&DispatchContext) -> ListenerResult + Send + Sync + 'static,
    {
        self.register(method, DataShape::for_method(method), listener)
    }

    /// Same as [`ApiClient::register`] for listener types other than closures.
    pub fn register_listener(
        &self,
        method: &str,
        shape: DataShape,
        listener: Arc<dyn NotificationListener>,
    ) -> Result<()> {
        self.receiver.listeners().register(method, shape, listener)
    }

    /// Register for a typed payload, e.g. `client.on::<CreditData, _>(..)`.
    pub fn on<T, F>(&self, listener: F) -> Result<()>
    where
        T: NotificationPayload,
        F: Fn(&DispatchContext, &T) -> ListenerResult + Send + Sync + 'static,
    {
        self.register(T::METHOD, T::SHAPE, move |ctx| {
            match T::from_data(ctx.data()) {
                Some(payload) => listener(ctx, payload),
                None => Err(format!("unexpected payload shape {:?}", ctx.data().shape()).into()),
            }
        })
    }

    // ---- outbound calls

    /// Sign and send `data` under `method`, returning the verified result block.
    /// A fresh UUID is generated when `uuid` is `None`.
    pub async fn call(
        &self,
        method: &str,
        data: Value,
        uuid: Option<String>,
    ) -> Result<ResultBlock> {
        let uuid = uuid.unwrap_or_else(|| Uuid::new_v4().to_string());
        let data = self.with_credentials(data)?;

        if let Some(v) = &self.validator {
            v.validate(&method.to_lowercase(), &data)?;
        }

        let request = Request::signed(&self.signer, method, &uuid, data)?;
        let body = request.to_json()?;

        let transport = self
            .transport
            .as_ref()
            .ok_or_else(|| PaywireError::Connection("no transport configured".into()))?;

        let url = self.settings.endpoint_url();
        tracing::debug!(%method, %uuid, %url, "sending request");
        let text = transport.send(url, body).await?;

        let block = Response::parse(&text)?.verify_reply(&self.signer, &uuid)?;
        tracing::debug!(%method, %uuid, "response verified");
        Ok(block)
    }

    /// Typed wrapper over [`ApiClient::call`].
    pub async fn request<D, R>(&self, method: &str, data: &D) -> Result<R>
    where
        D: Serialize,
        R: DeserializeOwned,
    {
        let value = serde_json::to_value(data)
            .map_err(|e| PaywireError::Data(format!("{method} data encode failed: {e}")))?;
        let block = self.call(method, value, None).await?;
        serde_json::from_value(block.data)
            .map_err(|e| PaywireError::Data(format!("{method} result decode failed: {e}")))
    }

    pub async fn deposit(&self, req: &DepositRequest) -> Result<DepositResponse> {
        self.request("Deposit", req).await
    }

    /// Refund, treating a soft decline as `PaywireError::Rejection`.
    pub async fn refund(&self, req: &RefundRequest) -> Result<RefundResponse> {
        let value = serde_json::to_value(req)
            .map_err(|e| PaywireError::Data(format!("Refund data encode failed: {e}")))?;
        let block = self.call("Refund", value, None).await?;
        ensure_accepted(&block.data)?;
        serde_json::from_value(block.data)
            .map_err(|e| PaywireError::Data(format!("Refund result decode failed: {e}")))
    }

    pub async fn balance(&self) -> Result<Vec<BalanceEntry>> {
        self.request("Balance", &BalanceRequest::default()).await
    }

    /// Credentials travel inside `Data` and are covered by the signature.
    /// Caller-supplied values win; absent or null ones are filled in.
    fn with_credentials(&self, data: Value) -> Result<Value> {
        let mut map: Map<String, Value> = match data {
            Value::Object(m) => m,
            Value::Null => Map::new(),
            _ => return Err(PaywireError::Data("request data must be a json object".into())),
        };
        let creds = &self.settings.credentials;
        fill_if_unset(&mut map, "Username", &creds.username);
        fill_if_unset(&mut map, "Password", &creds.password);
        Ok(Value::Object(map))
    }
}

fn fill_if_unset(map: &mut Map<String, Value>, key: &str, value: &str) {
    let slot = map.entry(key).or_insert(Value::Null);
    if slot.is_null() {
        *slot = Value::String(value.to_string());
    }
}
