//! Parsing of model completions into extracted fields.

use tracing::warn;

use crate::extract::patterns::{AMOUNT_DIGITS, COMPANY_NAME, INVOICE_DATE, TOTAL_AMOUNT};
use crate::models::invoice::{ExtractedFields, FieldValue};

/// Parse a completion against the strict label contract.
///
/// Each field is recovered independently: a completion with a mangled
/// `Total amount:` line still yields the company and date. Fields whose
/// label is missing come back `Absent`. This function never fails; the
/// worst completion produces all-`Absent` fields.
pub fn parse_completion(completion: &str) -> ExtractedFields {
    let company_name = capture(&COMPANY_NAME, completion);
    let invoice_date = capture(&INVOICE_DATE, completion);
    let total_amount = capture(&TOTAL_AMOUNT, completion).map(|raw| cleanup_amount(&raw));

    if company_name.is_none() && invoice_date.is_none() && total_amount.is_none() {
        warn!(completion_len = completion.len(), "completion matched no field labels");
    }

    ExtractedFields {
        company_name: to_field(company_name),
        invoice_date: to_field(invoice_date),
        total_amount: to_field(total_amount),
    }
}

fn capture(pattern: &regex::Regex, completion: &str) -> Option<String> {
    pattern
        .captures(completion)
        .map(|caps| caps[1].trim().to_string())
}

/// Pull the numeric run out of the captured amount and strip grouping
/// commas. When no digits are present the raw capture is kept as-is;
/// normalization will reject it later and the reviewer sees the
/// original text.
fn cleanup_amount(raw: &str) -> String {
    match AMOUNT_DIGITS.captures(raw) {
        Some(caps) => caps[1].replace(',', ""),
        None => raw.to_string(),
    }
}

fn to_field(value: Option<String>) -> FieldValue {
    match value {
        Some(raw) => FieldValue::new(raw),
        None => FieldValue::Absent,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn present(s: &str) -> FieldValue {
        FieldValue::Present(s.to_string())
    }

    #[test]
    fn parses_well_formed_single_line() {
        let fields = parse_completion(
            "Company name: Acme Corp Invoice date: 17-Jun-24 Total amount: $1,234.56",
        );
        assert_eq!(fields.company_name, present("Acme Corp"));
        assert_eq!(fields.invoice_date, present("17-Jun-24"));
        assert_eq!(fields.total_amount, present("1234.56"));
    }

    #[test]
    fn parses_multi_line_completion() {
        let fields = parse_completion(
            "Company name: Acme Corp\nInvoice date: 17-Jun-24\nTotal amount: 1500.50\n",
        );
        assert_eq!(fields.company_name, present("Acme Corp"));
        assert_eq!(fields.invoice_date, present("17-Jun-24"));
        assert_eq!(fields.total_amount, present("1500.50"));
    }

    #[test]
    fn recovers_fields_when_one_label_is_missing() {
        // No "Total amount:" label: the date capture loses its anchor
        // but company and amount behave independently.
        let fields =
            parse_completion("Company name: Acme Corp Invoice date: 17-Jun-24 Total: 99");
        assert_eq!(fields.company_name, present("Acme Corp"));
        assert_eq!(fields.invoice_date, FieldValue::Absent);
        assert_eq!(fields.total_amount, FieldValue::Absent);
    }

    #[test]
    fn amount_alone_still_parses() {
        let fields = parse_completion("Total amount: 42.00");
        assert_eq!(fields.company_name, FieldValue::Absent);
        assert_eq!(fields.total_amount, present("42.00"));
    }

    #[test]
    fn empty_completion_yields_all_absent() {
        assert_eq!(parse_completion(""), ExtractedFields::absent());
        assert_eq!(parse_completion("I cannot read this invoice."), ExtractedFields::absent());
    }

    #[test]
    fn sentinel_values_in_completion_become_absent() {
        let fields = parse_completion(
            "Company name: Unknown Invoice date: Unknown Total amount: Unknown",
        );
        assert_eq!(fields.company_name, FieldValue::Absent);
        assert_eq!(fields.invoice_date, FieldValue::Absent);
        // The amount capture has no digits, so the raw text survives
        // cleanup and the sentinel check happens on "Unknown" itself.
        assert_eq!(fields.total_amount, FieldValue::Absent);
    }

    #[test]
    fn non_numeric_amount_capture_is_kept_raw() {
        let fields = parse_completion("Total amount: N/A");
        assert_eq!(fields.total_amount, present("N/A"));
    }

    #[test]
    fn amount_cleanup_strips_grouping_commas() {
        let fields = parse_completion("Total amount: USD 12,345,678.90");
        assert_eq!(fields.total_amount, present("12345678.90"));
    }

    #[test]
    fn surrounding_chatter_does_not_break_labels() {
        let fields = parse_completion(
            "Here is what I found:\nCompany name: Acme GmbH Invoice date: 2024-06-17 Total amount: 250.00\nLet me know if you need more.",
        );
        assert_eq!(fields.company_name, present("Acme GmbH"));
        assert_eq!(fields.invoice_date, present("2024-06-17"));
        assert_eq!(fields.total_amount, present("250.00"));
    }
}
