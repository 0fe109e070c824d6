//! paywire webhook receiver
//!
//! - POST {webhook.path}: signed notifications in, signed OK/FAILED out
//! - settings from the YAML file given as first argument (default `paywire.yaml`)
//! - every notification is logged and acknowledged by a fallback listener

use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{fmt, EnvFilter};

use paywire_client::{app_state, config, router};
use paywire_client::notify::FALLBACK_METHOD;
use paywire_client::{ApiClient, ClientParts, NotificationHub};
use paywire_core::error::{PaywireError, Result};

#[tokio::main]
async fn main() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    if let Err(e) = run().await {
        tracing::error!(code = e.code().as_str(), error = %e, "paywire-webhook stopped");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let path = std::env::args().nth(1).unwrap_or_else(|| "paywire.yaml".into());
    let cfg = config::load_from_file(&path)?;

    let keys = cfg
        .keys
        .as_ref()
        .ok_or_else(|| PaywireError::Config("keys section is required".into()))?;
    let signer = config::load_signer(keys)?;

    let listen: SocketAddr = cfg
        .webhook
        .listen
        .parse()
        .map_err(|e| {
            PaywireError::Config(format!("webhook.listen must be a valid SocketAddr: {e}"))
        })?;
    let webhook_path = cfg.webhook.path.clone();

    let hub = Arc::new(NotificationHub::new());
    let client = ApiClient::new(ClientParts {
        settings: cfg,
        signer,
        transport: None,
        validator: None,
        hub: Some(Arc::clone(&hub)),
    })?;

    client.listen(FALLBACK_METHOD, |ctx| {
        tracing::info!(method = %ctx.method(), uuid = %ctx.uuid(), "notification received");
        ctx.respond_ok();
        Ok(())
    })?;

    let app = router::build_router(app_state::AppState::new(hub), &webhook_path);

    tracing::info!(%listen, path = %webhook_path, "paywire-webhook starting");
    let listener = tokio::net::TcpListener::bind(listen)
        .await
        .map_err(|e| PaywireError::Connection(format!("bind {listen} failed: {e}")))?;

    axum::serve(listener, app)
        .await
        .map_err(|e| PaywireError::Connection(format!("server failed: {e}")))?;

    drop(client);
    Ok(())
}
