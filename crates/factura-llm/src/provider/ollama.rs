//! Ollama completion provider.
//!
//! Talks to a local Ollama instance over its REST API using the
//! non-streaming `/api/generate` endpoint.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::provider::{CompletionProvider, GenerationOptions};
use crate::{CompletionError, Result};

/// Default Ollama endpoint.
pub const DEFAULT_BASE_URL: &str = "http://localhost:11434";

/// Timeout for generation requests.
const GENERATE_TIMEOUT_SECS: u64 = 60;

/// Timeout for the lightweight tag listing.
const TAGS_TIMEOUT_SECS: u64 = 5;

/// Completion provider backed by a local Ollama server.
pub struct OllamaProvider {
    base_url: String,
    model: String,
    options: GenerationOptions,
    client: reqwest::Client,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    system: &'a str,
    stream: bool,
    options: OllamaOptions,
}

/// Sampling options in Ollama's naming.
#[derive(Serialize)]
struct OllamaOptions {
    temperature: f32,
    top_p: f32,
    top_k: u32,
    num_predict: u32,
}

impl From<GenerationOptions> for OllamaOptions {
    fn from(opts: GenerationOptions) -> Self {
        Self {
            temperature: opts.temperature,
            top_p: opts.top_p,
            top_k: opts.top_k,
            num_predict: opts.max_output_tokens,
        }
    }
}

#[derive(Deserialize)]
struct GenerateResponse {
    response: String,
}

#[derive(Deserialize)]
struct TagsResponse {
    #[serde(default)]
    models: Vec<TagModel>,
}

#[derive(Deserialize)]
struct TagModel {
    name: String,
}

impl OllamaProvider {
    /// Create a provider bound to one model on one endpoint.
    pub fn new(
        base_url: impl Into<String>,
        model: impl Into<String>,
        options: GenerationOptions,
    ) -> Result<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(GENERATE_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            base_url,
            model: model.into(),
            options,
            client,
        })
    }

    fn map_send_error(&self, err: reqwest::Error) -> CompletionError {
        if err.is_connect() || err.is_timeout() {
            CompletionError::Unavailable(format!("{}: {err}", self.base_url))
        } else {
            CompletionError::Transport(err)
        }
    }
}

#[async_trait]
impl CompletionProvider for OllamaProvider {
    fn name(&self) -> &str {
        "ollama"
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn generate(&self, system: &str, prompt: &str) -> Result<String> {
        let url = format!("{}/api/generate", self.base_url);
        let request = GenerateRequest {
            model: &self.model,
            prompt,
            system,
            stream: false,
            options: self.options.into(),
        };

        debug!(model = %self.model, prompt_len = prompt.len(), "sending generate request");

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(CompletionError::ModelNotAvailable(self.model.clone()));
        }
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(CompletionError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let body: GenerateResponse = response
            .json()
            .await
            .map_err(|e| CompletionError::InvalidResponse(e.to_string()))?;

        Ok(body.response)
    }

    async fn list_models(&self) -> Result<Vec<String>> {
        let url = format!("{}/api/tags", self.base_url);

        let response = self
            .client
            .get(&url)
            .timeout(Duration::from_secs(TAGS_TIMEOUT_SECS))
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(CompletionError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let body: TagsResponse = response
            .json()
            .await
            .map_err(|e| CompletionError::InvalidResponse(e.to_string()))?;

        Ok(body.models.into_iter().map(|m| m.name).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn trims_trailing_slash_from_base_url() {
        let provider =
            OllamaProvider::new("http://localhost:11434/", "llama3.2", GenerationOptions::default())
                .unwrap();
        assert_eq!(provider.base_url, "http://localhost:11434");
        assert_eq!(provider.model(), "llama3.2");
        assert_eq!(provider.name(), "ollama");
    }

    #[test]
    fn generate_request_serializes_expected_shape() {
        let request = GenerateRequest {
            model: "llama3.2",
            prompt: "invoice text",
            system: "examiner",
            stream: false,
            options: GenerationOptions::default().into(),
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["model"], "llama3.2");
        assert_eq!(value["stream"], false);
        assert_eq!(value["options"]["temperature"], 0.0);
        assert_eq!(value["options"]["num_predict"], 8192);
        assert_eq!(value["options"]["top_k"], 64);
    }

    #[test]
    fn tags_response_deserializes_model_names() {
        let json = r#"{"models": [{"name": "llama3.2:latest"}, {"name": "mistral:7b"}]}"#;
        let body: TagsResponse = serde_json::from_str(json).unwrap();
        let names: Vec<String> = body.models.into_iter().map(|m| m.name).collect();
        assert_eq!(names, vec!["llama3.2:latest", "mistral:7b"]);
    }

    #[test]
    fn tags_response_tolerates_missing_models_field() {
        let body: TagsResponse = serde_json::from_str("{}").unwrap();
        assert!(body.models.is_empty());
    }
}
