//! Ollama HTTP backend for mood inference.

use crate::llm::Generator;
use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use daybook_core::LlmConfig;
use reqwest::Client;
use serde_json::{json, Value};
use std::time::Duration;

pub struct OllamaGenerator {
    client: Client,
    endpoint: String,
    model: String,
}

impl OllamaGenerator {
    pub fn new(config: &LlmConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            model: config.model.clone(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

/// Request body for Ollama's generate endpoint. Low temperature keeps the
/// JSON output stable; num_predict bounds the completion length.
pub fn build_payload(model: &str, prompt: &str) -> Value {
    json!({
        "model": model,
        "prompt": prompt,
        "stream": false,
        "options": {
            "temperature": 0.3,
            "num_predict": 150,
            "top_p": 0.9,
            "top_k": 40,
        }
    })
}

#[async_trait]
impl Generator for OllamaGenerator {
    async fn generate(&self, prompt: &str) -> Result<String> {
        let payload = build_payload(&self.model, prompt);

        let response = self
            .client
            .post(&self.endpoint)
            .json(&payload)
            .send()
            .await
            .context("Failed to reach Ollama")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            bail!("Ollama returned {}: {}", status, body);
        }

        let body: Value = response
            .json()
            .await
            .context("Failed to parse Ollama response body")?;

        let text = body["response"]
            .as_str()
            .context("Missing response text from Ollama")?;

        Ok(text.to_string())
    }
}
