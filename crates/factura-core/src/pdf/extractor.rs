//! PDF text extraction using lopdf and pdf-extract.

use lopdf::{Document, Object};
use tracing::{debug, warn};

use super::{PdfType, Result, TextExtractor};
use crate::error::PdfError;
use crate::models::config::PdfConfig;

/// Text extractor for PDFs with an embedded text layer.
pub struct PdfTextExtractor {
    max_pages: usize,
    min_text_length: usize,
}

impl PdfTextExtractor {
    /// Create an extractor with default limits.
    pub fn new() -> Self {
        Self::from_config(&PdfConfig::default())
    }

    /// Create an extractor with limits from configuration.
    pub fn from_config(config: &PdfConfig) -> Self {
        Self {
            max_pages: config.max_pages,
            min_text_length: config.min_text_length,
        }
    }

    /// Classify a PDF without committing to extraction.
    pub fn classify(&self, data: &[u8]) -> Result<PdfType> {
        self.analyze(data).map(|(pdf_type, _)| pdf_type)
    }

    fn analyze(&self, data: &[u8]) -> Result<(PdfType, String)> {
        let (doc, raw) = self.load(data)?;
        let page_count = doc.get_pages().len();

        let text = pdf_extract::extract_text_from_mem(&raw)
            .map_err(|e| PdfError::TextExtraction(e.to_string()))?;
        let text = self.cap_pages(text, page_count);

        let has_text = text.trim().len() > self.min_text_length;
        let has_images = count_image_objects(&doc) > 0;

        let pdf_type = match (has_text, has_images) {
            (true, false) => PdfType::Text,
            (false, true) => PdfType::Image,
            (true, true) => PdfType::Hybrid,
            (false, false) => PdfType::Empty,
        };

        debug!(page_count, has_text, has_images, ?pdf_type, "analyzed PDF");
        Ok((pdf_type, text))
    }

    fn load(&self, data: &[u8]) -> Result<(Document, Vec<u8>)> {
        let mut doc = Document::load_mem(data).map_err(|e| PdfError::Parse(e.to_string()))?;

        // Handle PDFs with empty password encryption
        let raw = if doc.is_encrypted() {
            if doc.decrypt("").is_err() {
                return Err(PdfError::Encrypted);
            }
            debug!("decrypted PDF with empty password");

            let mut decrypted = Vec::new();
            doc.save_to(&mut decrypted)
                .map_err(|e| PdfError::Parse(format!("failed to save decrypted PDF: {e}")))?;
            decrypted
        } else {
            data.to_vec()
        };

        if doc.get_pages().is_empty() {
            return Err(PdfError::NoPages);
        }

        Ok((doc, raw))
    }

    /// Keep roughly the first `max_pages` pages of text. pdf-extract
    /// returns the whole document as one string, so the cut is made by
    /// line count.
    fn cap_pages(&self, text: String, page_count: usize) -> String {
        if self.max_pages == 0 || page_count <= self.max_pages {
            return text;
        }

        let lines: Vec<&str> = text.lines().collect();
        let lines_per_page = lines.len() / page_count;
        let keep = lines_per_page * self.max_pages;

        warn!(
            page_count,
            max_pages = self.max_pages,
            "document exceeds page limit, reading only the leading pages"
        );

        lines[..keep.min(lines.len())].join("\n")
    }
}

impl Default for PdfTextExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl TextExtractor for PdfTextExtractor {
    fn extract_text(&self, data: &[u8]) -> Result<String> {
        let (pdf_type, text) = self.analyze(data)?;

        match pdf_type {
            PdfType::Text | PdfType::Hybrid => Ok(text),
            PdfType::Image | PdfType::Empty => {
                debug!(?pdf_type, "PDF has no usable text layer");
                Err(PdfError::NoText)
            }
        }
    }
}

/// Count image XObjects in the document. Decoding is not needed here;
/// the presence of any image stream is enough to tell a scan from a
/// genuinely empty document.
fn count_image_objects(doc: &Document) -> usize {
    doc.objects
        .values()
        .filter(|object| match object {
            Object::Stream(stream) => stream
                .dict
                .get(b"Subtype")
                .and_then(|subtype| subtype.as_name())
                .map(|name| name == b"Image")
                .unwrap_or(false),
            _ => false,
        })
        .count()
}
