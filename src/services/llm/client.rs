use std::time::Duration;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

/// Black-box text generation: one prompt pair in, one completion out.
///
/// The orchestrator only ever sees this trait, so tests substitute a
/// scripted implementation and the binary wires up a real server.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    async fn infer(&self, system_prompt: &str, user_prompt: &str) -> Result<String>;
}

#[derive(Serialize)]
struct CompletionRequest {
    prompt: String,
    stream: bool,
    n_predict: usize,
    temperature: f32,
    stop: Vec<String>,
}

#[derive(Deserialize)]
struct CompletionResponse {
    content: String,
}

/// Client for the `/completion` endpoint of a local llama-server.
#[derive(Clone)]
pub struct LlamaServerClient {
    client: Client,
    base_url: String,
}

impl LlamaServerClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: Client::builder()
                .timeout(timeout) // Hard timeout enforcement (network level)
                .build()
                .unwrap_or_default(),
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl LanguageModel for LlamaServerClient {
    async fn infer(&self, system_prompt: &str, user_prompt: &str) -> Result<String> {
        let full_prompt = format!("System: {system_prompt}\nUser: {user_prompt}\nAssistant:");

        let request_body = CompletionRequest {
            prompt: full_prompt,
            stream: false, // One-shot only
            n_predict: 512,
            temperature: 0.4,
            stop: vec!["User:".to_string(), "System:".to_string()],
        };

        let response = self
            .client
            .post(format!("{}/completion", self.base_url))
            .json(&request_body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(anyhow!("LLM server error: {}", response.status()));
        }

        let resp_json: CompletionResponse = response.json().await?;
        Ok(resp_json.content.trim().to_string())
    }
}
