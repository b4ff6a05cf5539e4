use std::time::Duration;

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde_json::{json, Value};
use smartshop_core::{LlmConfig, Role, Turn};
use tracing::warn;

use crate::llm::GenerativeBackend;

const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// HTTP client for the Gemini `generateContent` REST API.
///
/// The request timeout is owned here (client-level), so the engine never
/// waits longer than the configured bound.
pub struct GeminiClient {
    http: Client,
    api_key: Option<SecretString>,
    base_url: String,
}

impl GeminiClient {
    pub fn new(config: &LlmConfig) -> Result<Self> {
        Self::with_base_url(config, GEMINI_BASE_URL)
    }

    /// Points the client at an alternate endpoint, for test servers.
    pub fn with_base_url(config: &LlmConfig, base_url: impl Into<String>) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("building gemini http client")?;

        Ok(Self { http, api_key: config.api_key.clone(), base_url: base_url.into() })
    }

    async fn post_contents(&self, model: &str, contents: Value) -> Result<String> {
        let Some(api_key) = &self.api_key else {
            bail!("gemini api key is not configured");
        };

        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url,
            model,
            api_key.expose_secret()
        );

        let response = self
            .http
            .post(&url)
            .json(&json!({ "contents": contents }))
            .send()
            .await
            .context("gemini request failed")?;

        let status = response.status();
        if !status.is_success() {
            warn!(%status, model, "gemini returned non-success status");
            bail!("gemini returned status {status}");
        }

        let body: Value = response.json().await.context("decoding gemini response body")?;
        extract_text(&body).context("gemini response carried no text")
    }
}

#[async_trait]
impl GenerativeBackend for GeminiClient {
    async fn generate(&self, model: &str, prompt: &str) -> Result<String> {
        self.post_contents(model, json!([{ "role": "user", "parts": [{ "text": prompt }] }]))
            .await
    }

    async fn continue_chat(&self, model: &str, history: &[Turn], message: &str) -> Result<String> {
        let mut contents: Vec<Value> = history.iter().map(turn_content).collect();
        contents.push(json!({ "role": "user", "parts": [{ "text": message }] }));
        self.post_contents(model, Value::Array(contents)).await
    }
}

fn turn_content(turn: &Turn) -> Value {
    let role = match turn.role {
        Role::User => "user",
        Role::Model => "model",
    };
    json!({ "role": role, "parts": [{ "text": turn.content }] })
}

/// Pulls `candidates[0].content.parts[0].text` out of a response body.
fn extract_text(body: &Value) -> Option<String> {
    body.get("candidates")?
        .as_array()?
        .first()?
        .get("content")?
        .get("parts")?
        .as_array()?
        .first()?
        .get("text")?
        .as_str()
        .map(str::to_string)
}
