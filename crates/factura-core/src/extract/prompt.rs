//! Prompt text for invoice field extraction.

/// System role given to the model.
pub const SYSTEM_INSTRUCTION: &str = "You are an invoice examiner. Your job is to interpret \
the text of an invoice and extract the information from the document accurately and precisely.";

/// Instructions appended after the invoice text. The parser depends on
/// the labels and their order staying exactly as written here.
pub const EXTRACTION_PROMPT: &str = "\
Extract the company name, invoice date, and total amount from the invoice.
Only return the required information without adding extra words or sentences.
The output should strictly follow this format:
Company name: <company_name> Invoice date: <invoice_date> Total amount: <total_amount>

Ensure:
- The company name is enclosed within `Company name:`
- The invoice date is enclosed within `Invoice date:`
- The total amount is enclosed within `Total amount:`
- No extra text or comments are included.
- Use the exact field names and order as provided above.";

/// Assemble the user prompt: the invoice text first, instructions after.
pub fn build_prompt(invoice_text: &str) -> String {
    format!("{invoice_text}\n\n{EXTRACTION_PROMPT}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_puts_invoice_text_before_instructions() {
        let prompt = build_prompt("INVOICE #42");
        assert!(prompt.starts_with("INVOICE #42\n\n"));
        assert!(prompt.ends_with(EXTRACTION_PROMPT));
    }

    #[test]
    fn instructions_name_all_three_labels() {
        for label in ["Company name:", "Invoice date:", "Total amount:"] {
            assert!(EXTRACTION_PROMPT.contains(label), "missing {label}");
        }
    }
}
