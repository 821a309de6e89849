//! OpenAI-compatible completion provider.
//!
//! Works against the standard `/v1/chat/completions` surface, which is
//! also served by local gateways such as LM Studio and vLLM. When the
//! API key is empty no `Authorization` header is sent, so keyless local
//! gateways work out of the box.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::provider::{CompletionProvider, GenerationOptions};
use crate::{CompletionError, Result};

/// Default OpenAI endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com";

const GENERATE_TIMEOUT_SECS: u64 = 60;
const MODELS_TIMEOUT_SECS: u64 = 5;

/// Completion provider backed by an OpenAI-compatible server.
pub struct OpenAiProvider {
    base_url: String,
    api_key: String,
    model: String,
    options: GenerationOptions,
    client: reqwest::Client,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    top_p: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

#[derive(Deserialize)]
struct ModelsResponse {
    #[serde(default)]
    data: Vec<ModelEntry>,
}

#[derive(Deserialize)]
struct ModelEntry {
    id: String,
}

impl OpenAiProvider {
    /// Create a provider bound to one model on one endpoint.
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
        options: GenerationOptions,
    ) -> Result<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(GENERATE_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            base_url,
            api_key: api_key.into(),
            model: model.into(),
            options,
            client,
        })
    }

    fn authorized(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        if self.api_key.is_empty() {
            builder
        } else {
            builder.bearer_auth(&self.api_key)
        }
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
impl CompletionProvider for OpenAiProvider {
    fn name(&self) -> &str {
        "openai"
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn generate(&self, system: &str, prompt: &str) -> Result<String> {
        let url = format!("{}/v1/chat/completions", self.base_url);
        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            temperature: self.options.temperature,
            top_p: self.options.top_p,
            max_tokens: self.options.max_output_tokens,
        };

        debug!(model = %self.model, prompt_len = prompt.len(), "sending chat completion request");

        let response = self
            .authorized(self.client.post(&url).json(&request))
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

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| CompletionError::InvalidResponse(e.to_string()))?;

        let choice = body
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| CompletionError::InvalidResponse("no choices in response".into()))?;

        Ok(choice.message.content)
    }

    async fn list_models(&self) -> Result<Vec<String>> {
        let url = format!("{}/v1/models", self.base_url);

        let response = self
            .authorized(
                self.client
                    .get(&url)
                    .timeout(Duration::from_secs(MODELS_TIMEOUT_SECS)),
            )
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

        let body: ModelsResponse = response
            .json()
            .await
            .map_err(|e| CompletionError::InvalidResponse(e.to_string()))?;

        Ok(body.data.into_iter().map(|m| m.id).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn chat_request_serializes_expected_shape() {
        let request = ChatRequest {
            model: "gpt-4o-mini",
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: "examiner",
                },
                ChatMessage {
                    role: "user",
                    content: "invoice text",
                },
            ],
            temperature: 0.0,
            top_p: 0.95,
            max_tokens: 8192,
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["model"], "gpt-4o-mini");
        assert_eq!(value["messages"][0]["role"], "system");
        assert_eq!(value["messages"][1]["content"], "invoice text");
        assert_eq!(value["max_tokens"], 8192);
    }

    #[test]
    fn chat_response_yields_first_choice_content() {
        let json = r#"{"choices": [{"message": {"role": "assistant", "content": "Company name: Acme"}}]}"#;
        let body: ChatResponse = serde_json::from_str(json).unwrap();
        let content = body.choices.into_iter().next().unwrap().message.content;
        assert_eq!(content, "Company name: Acme");
    }

    #[test]
    fn models_response_deserializes_ids() {
        let json = r#"{"object": "list", "data": [{"id": "gpt-4o-mini"}, {"id": "gpt-4o"}]}"#;
        let body: ModelsResponse = serde_json::from_str(json).unwrap();
        let ids: Vec<String> = body.data.into_iter().map(|m| m.id).collect();
        assert_eq!(ids, vec!["gpt-4o-mini", "gpt-4o"]);
    }

    #[test]
    fn keyless_provider_builds() {
        let provider = OpenAiProvider::new(
            "http://localhost:1234/",
            "",
            "local-model",
            GenerationOptions::default(),
        )
        .unwrap();
        assert_eq!(provider.base_url, "http://localhost:1234");
        assert!(provider.api_key.is_empty());
    }
}
