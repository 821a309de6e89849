//! Completion provider implementations.

pub mod ollama;
pub mod openai;

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::{CompletionError, Result};

/// Sampling parameters passed through to the provider.
///
/// Defaults favour deterministic output, which keeps the downstream
/// field parser on familiar ground.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationOptions {
    pub temperature: f32,
    pub top_p: f32,
    pub top_k: u32,
    pub max_output_tokens: u32,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            temperature: 0.0,
            top_p: 0.95,
            top_k: 64,
            max_output_tokens: 8192,
        }
    }
}

/// Which completion backend to talk to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// Local Ollama instance over its REST API.
    Ollama,
    /// OpenAI-compatible chat-completion endpoint.
    OpenAi,
}

impl ProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::Ollama => "ollama",
            ProviderKind::OpenAi => "openai",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderKind {
    type Err = CompletionError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ollama" => Ok(ProviderKind::Ollama),
            "openai" => Ok(ProviderKind::OpenAi),
            other => Err(CompletionError::Configuration(format!(
                "unknown provider '{other}', expected 'ollama' or 'openai'"
            ))),
        }
    }
}

/// Trait for text-completion providers.
///
/// This trait abstracts over the HTTP APIs of different LLM servers,
/// allowing the extraction pipeline to stay provider-agnostic. One
/// provider instance is bound to one model.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Short identifier for logs and display.
    fn name(&self) -> &str;

    /// Model identifier this provider generates with.
    fn model(&self) -> &str;

    /// Generate a completion for `prompt` under `system` instructions.
    ///
    /// A single request is made; callers decide what a failure means.
    async fn generate(&self, system: &str, prompt: &str) -> Result<String>;

    /// List model identifiers the provider currently serves.
    async fn list_models(&self) -> Result<Vec<String>>;

    /// Probe whether the provider endpoint is reachable.
    async fn is_available(&self) -> bool {
        self.list_models().await.is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn generation_options_defaults() {
        let opts = GenerationOptions::default();
        assert_eq!(opts.temperature, 0.0);
        assert_eq!(opts.top_p, 0.95);
        assert_eq!(opts.top_k, 64);
        assert_eq!(opts.max_output_tokens, 8192);
    }

    #[test]
    fn generation_options_partial_json_fills_defaults() {
        let opts: GenerationOptions = serde_json::from_str(r#"{"temperature": 0.7}"#).unwrap();
        assert_eq!(opts.temperature, 0.7);
        assert_eq!(opts.top_k, 64);
    }

    #[test]
    fn provider_kind_from_str() {
        assert_eq!("ollama".parse::<ProviderKind>().unwrap(), ProviderKind::Ollama);
        assert_eq!("OpenAI".parse::<ProviderKind>().unwrap(), ProviderKind::OpenAi);
        assert_eq!(" Ollama ".parse::<ProviderKind>().unwrap(), ProviderKind::Ollama);
        assert!("gemini".parse::<ProviderKind>().is_err());
    }

    #[test]
    fn provider_kind_display_round_trips() {
        for kind in [ProviderKind::Ollama, ProviderKind::OpenAi] {
            assert_eq!(kind.to_string().parse::<ProviderKind>().unwrap(), kind);
        }
    }

    #[test]
    fn provider_kind_serde_uses_lowercase() {
        assert_eq!(serde_json::to_string(&ProviderKind::OpenAi).unwrap(), r#""openai""#);
        let kind: ProviderKind = serde_json::from_str(r#""ollama""#).unwrap();
        assert_eq!(kind, ProviderKind::Ollama);
    }
}
