//! Validation of reviewed invoice fields.

use serde::Serialize;

use crate::models::invoice::{ExtractedFields, UNKNOWN};
use crate::normalize;

/// Outcome of validating the three reviewed fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ValidationReport {
    /// Human-readable problems, one per failed field.
    pub errors: Vec<String>,
}

impl ValidationReport {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Validate reviewed field values before persistence.
///
/// All three rules run unconditionally so the reviewer sees every
/// problem at once, not just the first. A field passes when it would
/// survive normalization; zero and negative amounts are legitimate
/// (credit notes exist).
pub fn validate(company: &str, date: &str, amount: &str) -> ValidationReport {
    let mut errors = Vec::new();

    let company = company.trim();
    if company.is_empty() || company == UNKNOWN {
        errors.push("Invalid company name".to_string());
    }

    if normalize::date::parse(date).is_none() {
        errors.push("Invalid invoice date".to_string());
    }

    if normalize::amount::parse(amount).is_none() {
        errors.push("Invalid total amount".to_string());
    }

    ValidationReport { errors }
}

/// Validate extracted fields as they stand, sentinel included.
pub fn validate_fields(fields: &ExtractedFields) -> ValidationReport {
    validate(
        &fields.company_name.to_string(),
        &fields.invoice_date.to_string(),
        &fields.total_amount.to_string(),
    )
}
