//! LLM completion abstraction for factura.
//!
//! This crate provides a unified async interface over text-completion
//! servers:
//! - Ollama over its local REST API
//! - OpenAI-compatible chat-completion endpoints
//!
//! Providers are single-shot: one request per call, no retries. Callers
//! own the policy for what a failed or empty completion means.

mod error;
mod provider;

pub use error::CompletionError;
pub use provider::ollama::{DEFAULT_BASE_URL as OLLAMA_BASE_URL, OllamaProvider};
pub use provider::openai::{DEFAULT_BASE_URL as OPENAI_BASE_URL, OpenAiProvider};
pub use provider::{CompletionProvider, GenerationOptions, ProviderKind};

/// Result type for completion operations.
pub type Result<T> = std::result::Result<T, CompletionError>;
