//! Data models for invoice extraction and storage.

pub mod config;
pub mod invoice;

pub use config::{DatabaseConfig, ExtractionConfig, FacturaConfig, PdfConfig};
pub use invoice::{
    ExtractedFields, FieldValue, InvoiceRecord, NormalizedInvoice, SearchQuery, StoreStats, UNKNOWN,
};
