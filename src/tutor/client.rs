use std::time::Duration;

use anyhow::{anyhow, bail, Context};
use axum::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::config::TutorConfig;

/// Text-generation backend behind the chat relay.
#[async_trait]
pub trait TutorClient: Send + Sync {
    async fn generate(&self, api_key: &str, prompt: &str) -> anyhow::Result<String>;
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

/// Joined text of the first candidate, if it has any.
fn extract_text(resp: &GenerateResponse) -> Option<String> {
    let parts = &resp.candidates.first()?.content.as_ref()?.parts;
    let text: String = parts.iter().filter_map(|p| p.text.as_deref()).collect();
    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Google Generative Language API (`generateContent`).
#[derive(Clone)]
pub struct GeminiClient {
    client: reqwest::Client,
    base_url: String,
    model: String,
}

impl GeminiClient {
    pub fn new(cfg: &TutorConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .build()
            .context("build gemini http client")?;
        Ok(Self {
            client,
            base_url: cfg.base_url.trim_end_matches('/').to_string(),
            model: cfg.model.clone(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.base_url, self.model)
    }
}

#[async_trait]
impl TutorClient for GeminiClient {
    #[instrument(skip(self, api_key, prompt), fields(model = %self.model))]
    async fn generate(&self, api_key: &str, prompt: &str) -> anyhow::Result<String> {
        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
        };

        let res = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await
            .context("gemini request")?;

        let status = res.status();
        if !status.is_success() {
            let detail = res.text().await.unwrap_or_default();
            bail!("gemini returned {}: {}", status, detail.chars().take(512).collect::<String>());
        }

        let parsed: GenerateResponse = res.json().await.context("decode gemini response")?;
        let text = extract_text(&parsed).ok_or_else(|| anyhow!("gemini response had no text"))?;
        debug!(chars = text.len(), "gemini completion received");
        Ok(text)
    }
}
