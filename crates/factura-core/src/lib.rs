//! Core library for invoice field extraction.
//!
//! This crate provides:
//! - PDF text extraction and classification
//! - LLM-backed extraction of the three invoice fields
//!   (company name, invoice date, total amount)
//! - Normalization of dates and amounts into canonical forms
//! - Validation that gates persistence of reviewed fields

pub mod error;
pub mod models;
pub mod pdf;
pub mod extract;
pub mod normalize;
pub mod validate;

pub use error::{ExtractionError, FacturaError, PdfError, Result};
pub use models::config::{DatabaseConfig, ExtractionConfig, FacturaConfig, PdfConfig};
pub use models::invoice::{
    ExtractedFields, FieldValue, InvoiceRecord, NormalizedInvoice, SearchQuery, StoreStats, UNKNOWN,
};
pub use pdf::{PdfTextExtractor, PdfType, TextExtractor};
pub use extract::{LlmExtractor, build_provider};
pub use validate::{ValidationReport, validate, validate_fields};

/// Re-export completion types.
pub use factura_llm::{
    CompletionError, CompletionProvider, GenerationOptions, OllamaProvider, OpenAiProvider,
    ProviderKind,
};
