//! Label patterns for parsing model completions.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Field captures are anchored between their own label and the next
    // one, so a value can never bleed into the following field. The
    // lazy `+?` keeps trailing whitespace out of the capture.
    pub static ref COMPANY_NAME: Regex = Regex::new(
        r"(?i)Company name:\s*([^\n]+?)\s*Invoice date:"
    ).unwrap();

    pub static ref INVOICE_DATE: Regex = Regex::new(
        r"(?i)Invoice date:\s*([^\n]+?)\s*Total amount:"
    ).unwrap();

    pub static ref TOTAL_AMOUNT: Regex = Regex::new(
        r"(?i)Total amount:\s*([^\n]+?)(?:\n|$)"
    ).unwrap();

    // Coarse numeric cleanup applied to the captured amount
    pub static ref AMOUNT_DIGITS: Regex = Regex::new(
        r"([\d,]+\.?\d*)"
    ).unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn company_capture_stops_at_next_label() {
        let caps = COMPANY_NAME
            .captures("Company name: Acme Corp Invoice date: 17-Jun-24 Total amount: 100")
            .unwrap();
        assert_eq!(&caps[1], "Acme Corp");
    }

    #[test]
    fn labels_match_case_insensitively() {
        let caps = COMPANY_NAME
            .captures("company NAME: Acme invoice date: x total amount: 1")
            .unwrap();
        assert_eq!(&caps[1], "Acme");
    }

    #[test]
    fn amount_capture_runs_to_end_of_line() {
        let caps = TOTAL_AMOUNT.captures("Total amount: $1,234.56\nthanks").unwrap();
        assert_eq!(&caps[1], "$1,234.56");

        let caps = TOTAL_AMOUNT.captures("Total amount: 99.50").unwrap();
        assert_eq!(&caps[1], "99.50");
    }

    #[test]
    fn labels_match_across_line_breaks() {
        let text = "Company name: Acme Corp\nInvoice date: 17-Jun-24\nTotal amount: 100";
        assert_eq!(&COMPANY_NAME.captures(text).unwrap()[1], "Acme Corp");
        assert_eq!(&INVOICE_DATE.captures(text).unwrap()[1], "17-Jun-24");
    }

    #[test]
    fn digit_cleanup_finds_first_numeric_run() {
        let caps = AMOUNT_DIGITS.captures("$1,234.56 USD").unwrap();
        assert_eq!(&caps[1], "1,234.56");
        assert!(AMOUNT_DIGITS.captures("no digits here").is_none());
    }
}
