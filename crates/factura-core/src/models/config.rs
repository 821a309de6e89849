//! Configuration structures for the extraction pipeline.

use std::path::PathBuf;

use factura_llm::{GenerationOptions, ProviderKind};
use serde::{Deserialize, Serialize};

/// Main configuration for the factura pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FacturaConfig {
    /// LLM extraction configuration.
    pub extraction: ExtractionConfig,

    /// PDF processing configuration.
    pub pdf: PdfConfig,

    /// Invoice database configuration.
    pub database: DatabaseConfig,
}

/// LLM extraction configuration.
///
/// The orchestrator takes its own copy at construction, so edits to the
/// config file never change the behavior of a pipeline that is already
/// running.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Which completion backend to use.
    pub provider: ProviderKind,

    /// Model identifier to generate with.
    pub model: String,

    /// Base URL of the Ollama server.
    pub ollama_url: String,

    /// Base URL of the OpenAI-compatible server.
    pub openai_url: String,

    /// API key for the OpenAI-compatible server. The `OPENAI_API_KEY`
    /// environment variable takes precedence when set.
    pub openai_api_key: String,

    /// Sampling parameters for generation.
    pub generation: GenerationOptions,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            provider: ProviderKind::Ollama,
            model: "llama3.2".to_string(),
            ollama_url: factura_llm::OLLAMA_BASE_URL.to_string(),
            openai_url: factura_llm::OPENAI_BASE_URL.to_string(),
            openai_api_key: String::new(),
            generation: GenerationOptions::default(),
        }
    }
}

/// PDF processing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfConfig {
    /// Maximum pages to read text from (0 = unlimited).
    pub max_pages: usize,

    /// Minimum text length to consider the PDF text-based.
    pub min_text_length: usize,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self {
            max_pages: 10,
            min_text_length: 50,
        }
    }
}

/// Invoice database configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file.
    pub path: PathBuf,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("invoices.db"),
        }
    }
}

impl FacturaConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))?;
        std::fs::write(path, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn default_config_values() {
        let config = FacturaConfig::default();
        assert_eq!(config.extraction.provider, ProviderKind::Ollama);
        assert_eq!(config.extraction.model, "llama3.2");
        assert_eq!(config.extraction.ollama_url, "http://localhost:11434");
        assert_eq!(config.extraction.generation.temperature, 0.0);
        assert_eq!(config.pdf.max_pages, 10);
        assert_eq!(config.pdf.min_text_length, 50);
        assert_eq!(config.database.path, PathBuf::from("invoices.db"));
    }

    #[test]
    fn partial_json_fills_defaults() {
        let json = r#"{"extraction": {"provider": "openai", "model": "gpt-4o-mini"}}"#;
        let config: FacturaConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.extraction.provider, ProviderKind::OpenAi);
        assert_eq!(config.extraction.model, "gpt-4o-mini");
        assert_eq!(config.extraction.generation.top_k, 64);
        assert_eq!(config.pdf.max_pages, 10);
    }

    #[test]
    fn config_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = FacturaConfig::default();
        config.extraction.model = "mistral:7b".to_string();
        config.database.path = PathBuf::from("/tmp/test.db");
        config.save(&path).unwrap();

        let loaded = FacturaConfig::from_file(&path).unwrap();
        assert_eq!(loaded.extraction.model, "mistral:7b");
        assert_eq!(loaded.database.path, PathBuf::from("/tmp/test.db"));
    }

    #[test]
    fn from_file_missing_path_is_io_error() {
        let err = FacturaConfig::from_file(std::path::Path::new("/nonexistent/config.json"))
            .unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::NotFound);
    }
}
