//! Notification webhook handler.
//!
//! Responsibilities:
//! - accept the raw POST body (no decoding before the hub sees it)
//! - run the synchronous dispatch on the blocking pool
//! - relay the signed reply with 200 (OK) / 500 (FAILED)
//! - map dispatch errors to a status code and a stable error code body

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use bytes::Bytes;

use paywire_core::error::{ErrorCode, PaywireError};

use crate::app_state::AppState;
use crate::notify::NotificationStatus;

pub async fn receive_notification(State(app): State<AppState>, body: Bytes) -> Response {
    let text = match String::from_utf8(body.to_vec()) {
        Ok(t) => t,
        Err(_) => return error_response(&PaywireError::Data("body is not utf-8".into())),
    };

    let hub = app.hub();
    let outcome = tokio::task::spawn_blocking(move || hub.dispatch(&text)).await;

    match outcome {
        Ok(Ok(reply)) => {
            let status = match reply.status {
                NotificationStatus::Ok => StatusCode::OK,
                NotificationStatus::Failed => StatusCode::INTERNAL_SERVER_ERROR,
            };
            (status, [(header::CONTENT_TYPE, "application/json")], reply.body).into_response()
        }
        Ok(Err(e)) => {
            tracing::warn!(code = e.code().as_str(), error = %e, "notification dispatch failed");
            error_response(&e)
        }
        Err(join) => {
            tracing::error!(error = %join, "notification dispatch task aborted");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

fn error_response(e: &PaywireError) -> Response {
    (status_for(e.code()), e.code().as_str()).into_response()
}

pub fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::Data | ErrorCode::Validation => StatusCode::BAD_REQUEST,
        ErrorCode::Signature => StatusCode::FORBIDDEN,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}
