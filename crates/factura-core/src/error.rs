//! Error types for the factura-core library.

use thiserror::Error;

/// Main error type for the factura library.
#[derive(Error, Debug)]
pub enum FacturaError {
    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// Invoice field extraction error.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// Completion error from the LLM layer.
    #[error("completion error: {0}")]
    Completion(#[from] factura_llm::CompletionError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to PDF processing.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,

    /// The PDF carries no embedded text layer (scanned or empty pages).
    #[error("PDF has no extractable text (scanned image or empty document)")]
    NoText,
}

/// Errors related to invoice field extraction.
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// Required field is missing from the model output.
    #[error("missing required field: {0}")]
    MissingField(String),

    /// A field value could not be normalized.
    #[error("failed to parse {field}: '{value}'")]
    Parse { field: String, value: String },
}

/// Result type for the factura library.
pub type Result<T> = std::result::Result<T, FacturaError>;
