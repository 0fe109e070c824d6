//! Axum router wiring (HTTP POST -> notification hub).

use axum::{routing::post, Router};

use crate::{app_state::AppState, transport};

pub fn build_router(state: AppState, path: &str) -> Router {
    Router::new()
        .route(path, post(transport::webhook::receive_notification))
        .with_state(state)
}
