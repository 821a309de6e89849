//! Extraction orchestration: prompt assembly, completion, parsing.

use factura_llm::{CompletionProvider, OllamaProvider, OpenAiProvider, ProviderKind};
use tracing::{error, info, warn};

use crate::Result;
use crate::extract::{parser, prompt};
use crate::models::config::ExtractionConfig;
use crate::models::invoice::ExtractedFields;

/// Build the completion provider described by the configuration.
///
/// For OpenAI the `OPENAI_API_KEY` environment variable takes precedence
/// over the configured key.
pub fn build_provider(config: &ExtractionConfig) -> Result<Box<dyn CompletionProvider>> {
    let provider: Box<dyn CompletionProvider> = match config.provider {
        ProviderKind::Ollama => Box::new(OllamaProvider::new(
            &config.ollama_url,
            &config.model,
            config.generation,
        )?),
        ProviderKind::OpenAi => {
            let api_key = std::env::var("OPENAI_API_KEY")
                .ok()
                .filter(|key| !key.is_empty())
                .unwrap_or_else(|| config.openai_api_key.clone());
            Box::new(OpenAiProvider::new(
                &config.openai_url,
                api_key,
                &config.model,
                config.generation,
            )?)
        }
    };

    Ok(provider)
}

/// Drives one extraction: build the prompt, request a completion, parse
/// the result.
///
/// The extractor holds its provider for its whole lifetime; the
/// configuration it was built from is read exactly once.
pub struct LlmExtractor {
    provider: Box<dyn CompletionProvider>,
}

impl LlmExtractor {
    /// Wrap an existing provider.
    pub fn new(provider: Box<dyn CompletionProvider>) -> Self {
        Self { provider }
    }

    /// Build an extractor from configuration.
    pub fn from_config(config: &ExtractionConfig) -> Result<Self> {
        Ok(Self {
            provider: build_provider(config)?,
        })
    }

    /// Extract the three invoice fields from document text.
    ///
    /// This call does not fail: a provider error or an unusable
    /// completion degrades to all-`Absent` fields for the reviewer to
    /// fill in. Exactly one request is made; there is no retry.
    pub async fn extract(&self, invoice_text: &str) -> ExtractedFields {
        let prompt = prompt::build_prompt(invoice_text);

        info!(
            provider = self.provider.name(),
            model = self.provider.model(),
            text_len = invoice_text.len(),
            "requesting field extraction"
        );

        let completion = match self
            .provider
            .generate(prompt::SYSTEM_INSTRUCTION, &prompt)
            .await
        {
            Ok(completion) => completion,
            Err(err) => {
                error!(%err, "completion request failed");
                return ExtractedFields::absent();
            }
        };

        if completion.trim().is_empty() {
            warn!("provider returned an empty completion");
            return ExtractedFields::absent();
        }

        parser::parse_completion(&completion)
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    pub fn model(&self) -> &str {
        self.provider.model()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::invoice::FieldValue;
    use factura_llm::CompletionError;
    use pretty_assertions::assert_eq;

    struct FixedProvider {
        completion: &'static str,
    }

    #[async_trait::async_trait]
    impl CompletionProvider for FixedProvider {
        fn name(&self) -> &str {
            "fixed"
        }

        fn model(&self) -> &str {
            "test-model"
        }

        async fn generate(&self, _system: &str, _prompt: &str) -> factura_llm::Result<String> {
            Ok(self.completion.to_string())
        }

        async fn list_models(&self) -> factura_llm::Result<Vec<String>> {
            Ok(vec!["test-model".to_string()])
        }
    }

    struct FailingProvider;

    #[async_trait::async_trait]
    impl CompletionProvider for FailingProvider {
        fn name(&self) -> &str {
            "failing"
        }

        fn model(&self) -> &str {
            "test-model"
        }

        async fn generate(&self, _system: &str, _prompt: &str) -> factura_llm::Result<String> {
            Err(CompletionError::Unavailable("connection refused".to_string()))
        }

        async fn list_models(&self) -> factura_llm::Result<Vec<String>> {
            Err(CompletionError::Unavailable("connection refused".to_string()))
        }
    }

    #[tokio::test]
    async fn extract_parses_provider_completion() {
        let extractor = LlmExtractor::new(Box::new(FixedProvider {
            completion: "Company name: Acme Corp Invoice date: 17-Jun-24 Total amount: $1,500.50",
        }));

        let fields = extractor.extract("some invoice text").await;
        assert_eq!(fields.company_name, FieldValue::Present("Acme Corp".to_string()));
        assert_eq!(fields.invoice_date, FieldValue::Present("17-Jun-24".to_string()));
        assert_eq!(fields.total_amount, FieldValue::Present("1500.50".to_string()));
    }

    #[tokio::test]
    async fn provider_failure_degrades_to_absent() {
        let extractor = LlmExtractor::new(Box::new(FailingProvider));
        let fields = extractor.extract("some invoice text").await;
        assert_eq!(fields, ExtractedFields::absent());
    }

    #[tokio::test]
    async fn empty_completion_degrades_to_absent() {
        let extractor = LlmExtractor::new(Box::new(FixedProvider { completion: "  \n " }));
        let fields = extractor.extract("some invoice text").await;
        assert_eq!(fields, ExtractedFields::absent());
    }

    #[test]
    fn builds_provider_for_each_kind() {
        let mut config = ExtractionConfig::default();
        let provider = build_provider(&config).unwrap();
        assert_eq!(provider.name(), "ollama");

        config.provider = ProviderKind::OpenAi;
        let provider = build_provider(&config).unwrap();
        assert_eq!(provider.name(), "openai");
    }
}
