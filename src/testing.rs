//! Router-level helpers shared by handler tests.

use axum::{
    body::Body,
    extract::FromRef,
    http::{header, Method, Request, StatusCode},
};
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use crate::auth::services::JwtKeys;
use crate::state::AppState;

pub async fn send(state: AppState, req: Request<Body>) -> (StatusCode, Value) {
    let app = crate::app::build_app(state);
    let res = app.oneshot(req).await.expect("router is infallible");
    let status = res.status();
    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
        .await
        .expect("read body");
    let body = serde_json::from_slice(&bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));
    (status, body)
}

pub async fn send_json(
    state: AppState,
    uri: &str,
    body: Value,
    auth: Option<&str>,
) -> (StatusCode, Value) {
    let mut req = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(auth) = auth {
        req = req.header(header::AUTHORIZATION, auth);
    }
    let req = req.body(Body::from(body.to_string())).expect("request");
    send(state, req).await
}

pub async fn send_get(state: AppState, uri: &str, auth: Option<&str>) -> (StatusCode, Value) {
    let mut req = Request::builder().method(Method::GET).uri(uri);
    if let Some(auth) = auth {
        req = req.header(header::AUTHORIZATION, auth);
    }
    let req = req.body(Body::empty()).expect("request");
    send(state, req).await
}

/// `Authorization` header value carrying a fresh access token for `user_id`.
pub fn bearer(state: &AppState, user_id: Uuid) -> String {
    let token = JwtKeys::from_ref(state)
        .sign_access(user_id)
        .expect("sign access");
    format!("Bearer {}", token)
}
