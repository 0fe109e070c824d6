//! HTTP boundary: POST body in, signed reply or error code out.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

mod common;

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use serde_json::json;
use tower::ServiceExt;

use paywire_client::app_state::AppState;
use paywire_client::router::build_router;
use paywire_client::{ApiClient, DataShape, NotificationHub};
use paywire_core::protocol::envelope::Response;

use common::{hub_client, notification, settings};

const PATH: &str = "/notifications";
const UUID: &str = "5b1e0ec0-6c0a-4a4b-9f3c-3f2a1d0b9c8e";

fn app_with(hub: &Arc<NotificationHub>) -> axum::Router {
    build_router(AppState::new(Arc::clone(hub)), PATH)
}

fn ok_client(hub: &Arc<NotificationHub>) -> ApiClient {
    let client = hub_client(hub, settings());
    client
        .register("", DataShape::Raw, |ctx| {
            ctx.respond_ok();
            Ok(())
        })
        .unwrap();
    client
}

fn post(body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(PATH)
        .header(header::CONTENT_TYPE, "application/json")
        .body(body.into())
        .unwrap()
}

async fn body_text(resp: axum::response::Response) -> String {
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn ok_reply_is_200_with_signed_json() {
    let hub = Arc::new(NotificationHub::new());
    let _client = ok_client(&hub);

    let resp = app_with(&hub)
        .oneshot(post(notification("account", UUID, json!({ "orderid": "1" }))))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get(header::CONTENT_TYPE).unwrap(),
        "application/json"
    );

    let parsed = Response::parse(&body_text(resp).await).unwrap();
    let block = parsed.result.unwrap();
    assert_eq!(block.uuid, UUID);
    assert_eq!(block.data["status"], "OK");
}

#[tokio::test]
async fn failed_reply_is_500_with_signed_json() {
    let hub = Arc::new(NotificationHub::new());
    let client = hub_client(&hub, settings());
    client
        .register("", DataShape::Raw, |_ctx| Err("no such order".into()))
        .unwrap();

    let resp = app_with(&hub)
        .oneshot(post(notification("cancel", UUID, json!({}))))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let parsed = Response::parse(&body_text(resp).await).unwrap();
    assert_eq!(parsed.result.unwrap().data["status"], "FAILED");
}

#[tokio::test]
async fn malformed_body_is_400() {
    let hub = Arc::new(NotificationHub::new());
    let _client = ok_client(&hub);

    let resp = app_with(&hub).oneshot(post("not json")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_text(resp).await, "DATA");
}

#[tokio::test]
async fn non_utf8_body_is_400() {
    let hub = Arc::new(NotificationHub::new());
    let _client = ok_client(&hub);

    let resp = app_with(&hub)
        .oneshot(post(vec![0xff_u8, 0xfe, 0x00]))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn bad_signature_is_403() {
    let hub = Arc::new(NotificationHub::new());
    let _client = ok_client(&hub);

    let mut node: serde_json::Value =
        serde_json::from_str(&notification("credit", UUID, json!({ "amount": "1.00" }))).unwrap();
    node["params"]["data"]["amount"] = json!("1000.00");

    let resp = app_with(&hub).oneshot(post(node.to_string())).await.unwrap();
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    assert_eq!(body_text(resp).await, "SIGNATURE");
}

#[tokio::test]
async fn no_client_is_500() {
    let hub = Arc::new(NotificationHub::new());

    let resp = app_with(&hub)
        .oneshot(post(notification("credit", UUID, json!({}))))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_text(resp).await, "NO_CLIENT");
}

#[tokio::test]
async fn other_paths_are_not_routed() {
    let hub = Arc::new(NotificationHub::new());
    let _client = ok_client(&hub);

    let req = Request::builder()
        .method("POST")
        .uri("/elsewhere")
        .body(Body::from("{}"))
        .unwrap();
    let resp = app_with(&hub).oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
