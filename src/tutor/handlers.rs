use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use tracing::instrument;

use super::dto::{ChatReply, ChatRequest};
use super::services::{relay, RelayError};
use crate::{
    auth::services::AuthUser,
    error::{api_error, bad_body, ApiError},
    state::AppState,
};

pub fn chat_routes() -> Router<AppState> {
    Router::new().route("/api/gemini", post(chat))
}

impl From<RelayError> for ApiError {
    fn from(e: RelayError) -> Self {
        match e {
            RelayError::EmptyMessage => api_error(StatusCode::BAD_REQUEST, "Message must not be empty"),
            RelayError::MissingCredential => {
                api_error(StatusCode::SERVICE_UNAVAILABLE, "API Key not configured")
            }
            RelayError::Upstream(_) => api_error(StatusCode::BAD_GATEWAY, "Failed to fetch response"),
        }
    }
}

#[instrument(skip(state, payload))]
pub async fn chat(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatReply>, ApiError> {
    let Json(payload) = payload.map_err(bad_body)?;
    let api_key = state.config.tutor.api_key();
    let reply = relay(state.tutor.as_ref(), api_key.as_deref(), &payload.message).await?;
    Ok(Json(ChatReply { reply }))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{header, Method, Request, StatusCode},
    };
    use serde_json::json;
    use uuid::Uuid;

    use crate::config::{AppConfig, TutorConfig};
    use crate::db::memory::MemoryStore;
    use crate::state::AppState;
    use crate::testing::{bearer, send, send_json};
    use crate::tutor::client::fake::FakeTutor;

    fn state_with(tutor: Arc<FakeTutor>, key_var: Option<&str>) -> AppState {
        let mut state = AppState::fake_with(Arc::new(MemoryStore::default()), tutor);
        if let Some(var) = key_var {
            let config = AppConfig {
                tutor: TutorConfig {
                    api_key_var: var.into(),
                    ..TutorConfig::default()
                },
                ..(*state.config).clone()
            };
            state.config = Arc::new(config);
        }
        state
    }

    #[tokio::test]
    async fn replies_when_key_is_configured() {
        std::env::set_var("MASOMOHUB_TEST_GEMINI_KEY_OK", "secret-key");
        let tutor = Arc::new(FakeTutor::replying("Keep going!"));
        let state = state_with(tutor.clone(), Some("MASOMOHUB_TEST_GEMINI_KEY_OK"));
        let auth = bearer(&state, Uuid::new_v4());

        let (status, body) =
            send_json(state, "/api/gemini", json!({ "message": "Any tips?" }), Some(&auth)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "reply": "Keep going!" }));
        assert_eq!(tutor.last_key().as_deref(), Some("secret-key"));
    }

    #[tokio::test]
    async fn missing_key_is_config_error_with_no_outbound_call() {
        let tutor = Arc::new(FakeTutor::replying("unused"));
        let state = state_with(tutor.clone(), None);
        let auth = bearer(&state, Uuid::new_v4());

        let (status, body) =
            send_json(state, "/api/gemini", json!({ "message": "hello" }), Some(&auth)).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body, json!({ "error": "API Key not configured" }));
        assert_eq!(tutor.calls(), 0);
    }

    #[tokio::test]
    async fn upstream_failure_is_bad_gateway() {
        std::env::set_var("MASOMOHUB_TEST_GEMINI_KEY_FAIL", "secret-key");
        let tutor = Arc::new(FakeTutor::failing("quota exceeded"));
        let state = state_with(tutor.clone(), Some("MASOMOHUB_TEST_GEMINI_KEY_FAIL"));
        let auth = bearer(&state, Uuid::new_v4());

        let (status, body) =
            send_json(state, "/api/gemini", json!({ "message": "hello" }), Some(&auth)).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body, json!({ "error": "Failed to fetch response" }));
        assert_eq!(tutor.calls(), 1);
    }

    #[tokio::test]
    async fn blank_message_is_bad_request() {
        let tutor = Arc::new(FakeTutor::replying("unused"));
        let state = state_with(tutor.clone(), None);
        let auth = bearer(&state, Uuid::new_v4());

        let (status, _) =
            send_json(state, "/api/gemini", json!({ "message": "   " }), Some(&auth)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(tutor.calls(), 0);
    }

    #[tokio::test]
    async fn requires_access_token() {
        let tutor = Arc::new(FakeTutor::replying("unused"));
        let state = state_with(tutor.clone(), None);
        let (status, body) = send_json(state, "/api/gemini", json!({ "message": "hi" }), None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body, json!({ "error": "Missing Authorization header" }));
        assert_eq!(tutor.calls(), 0);
    }

    #[tokio::test]
    async fn body_without_message_field_gets_error_body() {
        let tutor = Arc::new(FakeTutor::replying("unused"));
        let state = state_with(tutor.clone(), None);
        let auth = bearer(&state, Uuid::new_v4());

        let (status, body) =
            send_json(state, "/api/gemini", json!({ "msg": "hi" }), Some(&auth)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "Invalid request body" }));
        assert_eq!(tutor.calls(), 0);
    }

    #[tokio::test]
    async fn non_json_body_gets_error_body() {
        let tutor = Arc::new(FakeTutor::replying("unused"));
        let state = state_with(tutor.clone(), None);
        let auth = bearer(&state, Uuid::new_v4());
        let req = Request::builder()
            .method(Method::POST)
            .uri("/api/gemini")
            .header(header::CONTENT_TYPE, "text/plain")
            .header(header::AUTHORIZATION, auth)
            .body(Body::from("hello"))
            .unwrap();

        let (status, body) = send(state, req).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
        assert_eq!(tutor.calls(), 0);
    }
}
