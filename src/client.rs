//! Typed HTTP client for the student API.

use std::time::Duration;

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;

use crate::auth::dto::{AuthResponse, LoginRequest};
use crate::dashboard::dto::DashboardView;
use crate::error::ErrorBody;
use crate::tutor::dto::{ChatReply, ChatRequest};

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("not signed in")]
    NotSignedIn,
    #[error("server answered {status}: {message}")]
    Rejected { status: StatusCode, message: String },
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}

pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    access_token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(60))
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            access_token: None,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn token(&self) -> Result<&str, ClientError> {
        self.access_token.as_deref().ok_or(ClientError::NotSignedIn)
    }

    /// Signs in and keeps the access token for later calls.
    pub async fn login(&mut self, req: &LoginRequest) -> Result<AuthResponse, ClientError> {
        let res = self
            .http
            .post(self.url("/api/v1/auth/login"))
            .json(req)
            .send()
            .await?;
        let auth: AuthResponse = decode(res).await?;
        self.access_token = Some(auth.access_token.clone());
        Ok(auth)
    }

    /// `Ok(None)` when the server has no such user.
    pub async fn dashboard(&self) -> Result<Option<DashboardView>, ClientError> {
        let res = self
            .http
            .get(self.url("/api/v1/dashboard"))
            .bearer_auth(self.token()?)
            .send()
            .await?;
        if res.status() == StatusCode::NOT_FOUND {
            debug!("dashboard: user not found");
            return Ok(None);
        }
        decode(res).await.map(Some)
    }

    pub async fn chat(&self, message: &str) -> Result<String, ClientError> {
        let res = self
            .http
            .post(self.url("/api/gemini"))
            .bearer_auth(self.token()?)
            .json(&ChatRequest {
                message: message.to_string(),
            })
            .send()
            .await?;
        let reply: ChatReply = decode(res).await?;
        Ok(reply.reply)
    }
}

async fn decode<T: DeserializeOwned>(res: reqwest::Response) -> Result<T, ClientError> {
    let status = res.status();
    if status.is_success() {
        return Ok(res.json::<T>().await?);
    }
    let text = res.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&text)
        .map(|b| b.error)
        .unwrap_or(text);
    Err(ClientError::Rejected { status, message })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::auth::password::hash_password;
    use crate::db::memory::MemoryStore;
    use crate::state::AppState;
    use crate::tutor::client::fake::FakeTutor;

    async fn spawn(state: AppState) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let app = crate::app::build_app(state);
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn login_req(password: &str) -> LoginRequest {
        LoginRequest {
            email: "admin@masomo.com".into(),
            password: password.into(),
        }
    }

    #[tokio::test]
    async fn login_then_dashboard_then_chat_without_key() {
        let store = Arc::new(MemoryStore::default());
        let user = store.add_user("admin@masomo.com", &hash_password("123456").unwrap(), "Alex Johnson");
        store.enroll(user, "UI/UX Design Fundamentals", "UI/UX", 8, 25, 2);
        store.enroll(user, "Advanced React Patterns", "Frontend", 10, 40, 4);
        let base = spawn(AppState::fake_with(store, Arc::new(FakeTutor::replying("hi")))).await;

        let mut client = ApiClient::new(&base).unwrap();
        assert!(matches!(client.dashboard().await, Err(ClientError::NotSignedIn)));

        let auth = client.login(&login_req("123456")).await.unwrap();
        assert_eq!(auth.user.name, "Alex Johnson");

        let view = client.dashboard().await.unwrap().expect("user exists");
        let progress: Vec<i32> = view.courses_in_progress.iter().map(|c| c.progress).collect();
        assert_eq!(progress, vec![25, 40]);

        match client.chat("hello").await {
            Err(ClientError::Rejected { status, message }) => {
                assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
                assert_eq!(message, "API Key not configured");
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[tokio::test]
    async fn wrong_password_is_rejected() {
        let store = Arc::new(MemoryStore::default());
        store.add_user("admin@masomo.com", &hash_password("123456").unwrap(), "Alex Johnson");
        let base = spawn(AppState::fake_with(store, Arc::new(FakeTutor::replying("hi")))).await;

        let mut client = ApiClient::new(&base).unwrap();
        let err = client.login(&login_req("nope")).await.unwrap_err();
        assert!(matches!(err, ClientError::Rejected { status, .. } if status == StatusCode::UNAUTHORIZED));
    }
}
