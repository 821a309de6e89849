//! Normalization of extracted field values into canonical forms.
//!
//! Dates become `chrono::NaiveDate`, amounts become
//! `rust_decimal::Decimal`. Both parsers answer `None` for anything they
//! cannot read, including the `Unknown` sentinel; the validator turns
//! those into review errors.

pub mod amount;
pub mod date;
