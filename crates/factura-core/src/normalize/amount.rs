//! Amount normalization for extracted invoice fields.

use std::str::FromStr;

use rust_decimal::Decimal;
use tracing::debug;

use crate::models::invoice::UNKNOWN;

/// Parse a monetary amount written with arbitrary currency symbols and
/// separator conventions.
///
/// Handles both `1,500.50` and `1.500,50`: when both separators appear,
/// the rightmost one is the decimal separator. A lone comma always reads
/// as a decimal separator, so `1,500` parses as one and a half. That
/// ambiguity is inherent to the input and deliberately not guessed away;
/// the review step exists to catch it.
pub fn parse(raw: &str) -> Option<Decimal> {
    let raw = raw.trim();
    if raw.is_empty() || raw == UNKNOWN {
        return None;
    }

    // Strip currency symbols, spaces, and everything else non-numeric.
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, '.' | ',' | '-'))
        .collect();
    if cleaned.is_empty() {
        return None;
    }

    // With repeated separators only the last occurrence can be the
    // decimal point; the rest are treated as grouping and dropped.
    let cleaned = keep_last(&cleaned, '.');
    let cleaned = keep_last(&cleaned, ',');

    let normalized = match (cleaned.rfind(','), cleaned.rfind('.')) {
        (Some(_), None) => cleaned.replace(',', "."),
        (Some(comma), Some(dot)) if comma > dot => {
            cleaned.replace('.', "").replace(',', ".")
        }
        (Some(_), Some(_)) => cleaned.replace(',', ""),
        _ => cleaned,
    };

    let amount = Decimal::from_str(&normalized).ok()?;
    debug!(input = raw, %amount, "parsed amount");
    Some(amount)
}

/// Drop all but the last occurrence of `sep`.
fn keep_last(s: &str, sep: char) -> String {
    let count = s.matches(sep).count();
    if count <= 1 {
        return s.to_string();
    }

    let mut seen = 0;
    s.chars()
        .filter(|&c| {
            if c == sep {
                seen += 1;
                seen == count
            } else {
                true
            }
        })
        .collect()
}

/// Format an amount with a currency prefix, thousands grouping, and two
/// decimal places (e.g. `$1,500.50`).
pub fn format_amount(amount: Decimal, currency: &str) -> String {
    let s = format!("{:.2}", amount.round_dp(2));
    let (sign, unsigned) = match s.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", s.as_str()),
    };
    let (integer_part, decimal_part) = unsigned.split_once('.').unwrap_or((unsigned, "00"));

    let chars: Vec<char> = integer_part.chars().collect();
    let mut grouped = String::new();
    for (i, c) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(*c);
    }

    format!("{currency}{sign}{grouped}.{decimal_part}")
}
