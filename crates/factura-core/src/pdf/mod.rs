//! PDF processing module.

mod extractor;

pub use extractor::PdfTextExtractor;

use crate::error::PdfError;

/// Classification of a PDF's content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PdfType {
    /// Contains extractable text.
    Text,
    /// Contains only images (scanned document).
    Image,
    /// Contains both meaningful text and images.
    Hybrid,
    /// Empty or unreadable.
    Empty,
}

/// Result type for PDF operations.
pub type Result<T> = std::result::Result<T, PdfError>;

/// Trait for document text sources.
///
/// The extraction pipeline only consumes text. An OCR engine for
/// scanned documents would plug in behind this same seam.
pub trait TextExtractor {
    /// Extract readable text from a document's bytes.
    fn extract_text(&self, data: &[u8]) -> Result<String>;
}
