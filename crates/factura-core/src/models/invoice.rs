//! Invoice field data models.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::ExtractionError;
use crate::normalize;

/// Display and wire sentinel for fields the model could not extract.
pub const UNKNOWN: &str = "Unknown";

/// A single extracted field value.
///
/// Absence is a first-class state rather than a magic string, so code
/// cannot accidentally treat the sentinel as real data. The serde
/// representation stays a plain string (`"Unknown"` for absent) to keep
/// JSON output compatible with the review surface.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FieldValue {
    /// A non-empty value as produced by the model.
    Present(String),

    /// The model did not produce a usable value.
    #[default]
    Absent,
}

impl FieldValue {
    /// Classify a raw string: trimmed-empty or the sentinel become `Absent`.
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed == UNKNOWN {
            FieldValue::Absent
        } else {
            FieldValue::Present(trimmed.to_string())
        }
    }

    /// The value as a string slice, if present.
    pub fn as_deref(&self) -> Option<&str> {
        match self {
            FieldValue::Present(s) => Some(s),
            FieldValue::Absent => None,
        }
    }

    pub fn is_present(&self) -> bool {
        matches!(self, FieldValue::Present(_))
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, FieldValue::Absent)
    }

    /// Convert into an `Option`, dropping the sentinel.
    pub fn into_option(self) -> Option<String> {
        match self {
            FieldValue::Present(s) => Some(s),
            FieldValue::Absent => None,
        }
    }
}

impl std::fmt::Display for FieldValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldValue::Present(s) => f.write_str(s),
            FieldValue::Absent => f.write_str(UNKNOWN),
        }
    }
}

impl From<String> for FieldValue {
    fn from(raw: String) -> Self {
        FieldValue::new(raw)
    }
}

impl From<FieldValue> for String {
    fn from(value: FieldValue) -> Self {
        value.to_string()
    }
}

/// The three fields extracted from an invoice, before review.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedFields {
    /// Issuing company name.
    pub company_name: FieldValue,

    /// Invoice date as written on the document.
    pub invoice_date: FieldValue,

    /// Total amount as written on the document.
    pub total_amount: FieldValue,
}

impl ExtractedFields {
    /// All fields absent. The default result when extraction fails.
    pub fn absent() -> Self {
        Self::default()
    }

    /// True when every field carries a value.
    pub fn is_complete(&self) -> bool {
        self.company_name.is_present()
            && self.invoice_date.is_present()
            && self.total_amount.is_present()
    }
}

/// A reviewed invoice in canonical form, ready to persist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedInvoice {
    /// Issuing company name, trimmed and non-empty.
    pub company_name: String,

    /// Invoice date in canonical calendar form.
    pub invoice_date: NaiveDate,

    /// Total amount as an exact decimal.
    pub total_amount: Decimal,
}

impl NormalizedInvoice {
    /// Normalize reviewed field values into storable form.
    ///
    /// This is the gate between the review surface and the store: every
    /// field must survive normalization or the whole invoice is refused.
    pub fn from_reviewed(
        company: &str,
        date: &str,
        amount: &str,
    ) -> std::result::Result<Self, ExtractionError> {
        let company = company.trim();
        if company.is_empty() || company == UNKNOWN {
            return Err(ExtractionError::MissingField("company name".to_string()));
        }

        let invoice_date =
            normalize::date::parse(date).ok_or_else(|| ExtractionError::Parse {
                field: "invoice date".to_string(),
                value: date.to_string(),
            })?;

        let total_amount =
            normalize::amount::parse(amount).ok_or_else(|| ExtractionError::Parse {
                field: "total amount".to_string(),
                value: amount.to_string(),
            })?;

        Ok(Self {
            company_name: company.to_string(),
            invoice_date,
            total_amount,
        })
    }
}

/// A persisted invoice row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceRecord {
    /// Row id assigned by the store.
    pub id: i64,

    /// Issuing company name.
    pub company_name: String,

    /// Invoice date.
    pub invoice_date: NaiveDate,

    /// Total amount.
    pub total_amount: Decimal,

    /// Creation timestamp as recorded by the store.
    pub created_at: String,

    /// Last-update timestamp as recorded by the store.
    pub updated_at: String,
}

/// Filters for searching stored invoices. Absent filter means no constraint.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchQuery {
    /// Earliest invoice date, inclusive.
    pub from: Option<NaiveDate>,

    /// Latest invoice date, inclusive.
    pub to: Option<NaiveDate>,

    /// Substring match on the company name.
    pub company: Option<String>,
}

/// Aggregate statistics over stored invoices.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StoreStats {
    /// Number of stored invoices.
    pub total_invoices: u64,

    /// Sum of all invoice amounts.
    pub total_amount: Decimal,

    /// Number of distinct company names.
    pub unique_companies: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn field_value_classifies_raw_strings() {
        assert_eq!(FieldValue::new("Acme Corp"), FieldValue::Present("Acme Corp".to_string()));
        assert_eq!(FieldValue::new("  Acme Corp  "), FieldValue::Present("Acme Corp".to_string()));
        assert_eq!(FieldValue::new(""), FieldValue::Absent);
        assert_eq!(FieldValue::new("   "), FieldValue::Absent);
        assert_eq!(FieldValue::new("Unknown"), FieldValue::Absent);
        assert_eq!(FieldValue::new(" Unknown "), FieldValue::Absent);
    }

    #[test]
    fn field_value_displays_sentinel_when_absent() {
        assert_eq!(FieldValue::Absent.to_string(), "Unknown");
        assert_eq!(FieldValue::new("Acme").to_string(), "Acme");
    }

    #[test]
    fn field_value_serde_round_trips_through_strings() {
        let json = r#"{"company_name":"Acme","invoice_date":"Unknown","total_amount":"1500.50"}"#;
        let fields: ExtractedFields = serde_json::from_str(json).unwrap();
        assert_eq!(fields.company_name, FieldValue::Present("Acme".to_string()));
        assert_eq!(fields.invoice_date, FieldValue::Absent);

        let back = serde_json::to_string(&fields).unwrap();
        assert_eq!(back, json);
    }

    #[test]
    fn extracted_fields_completeness() {
        let mut fields = ExtractedFields::absent();
        assert!(!fields.is_complete());

        fields.company_name = FieldValue::new("Acme");
        fields.invoice_date = FieldValue::new("17-Jun-24");
        fields.total_amount = FieldValue::new("1500.50");
        assert!(fields.is_complete());
    }

    #[test]
    fn normalized_invoice_from_reviewed_values() {
        let invoice = NormalizedInvoice::from_reviewed("Acme Corp", "17-Jun-24", "$1,500.50").unwrap();
        assert_eq!(invoice.company_name, "Acme Corp");
        assert_eq!(invoice.invoice_date, NaiveDate::from_ymd_opt(2024, 6, 17).unwrap());
        assert_eq!(invoice.total_amount, Decimal::new(150050, 2));
    }

    #[test]
    fn normalized_invoice_refuses_sentinel_company() {
        let err = NormalizedInvoice::from_reviewed("Unknown", "2024-06-17", "100").unwrap_err();
        assert!(matches!(err, ExtractionError::MissingField(_)));
    }

    #[test]
    fn normalized_invoice_refuses_unparseable_date() {
        let err = NormalizedInvoice::from_reviewed("Acme", "soon", "100").unwrap_err();
        assert!(matches!(err, ExtractionError::Parse { ref field, .. } if field == "invoice date"));
    }

    #[test]
    fn normalized_invoice_refuses_unparseable_amount() {
        let err = NormalizedInvoice::from_reviewed("Acme", "2024-06-17", "a lot").unwrap_err();
        assert!(matches!(err, ExtractionError::Parse { ref field, .. } if field == "total amount"));
    }
}
