//! LLM-backed invoice field extraction.
//!
//! The flow is prompt → completion → parse. The orchestrator never
//! fails: anything that goes wrong on the way degrades to `Absent`
//! fields, which the review surface presents as editable defaults.

pub mod orchestrator;
pub mod parser;
pub mod patterns;
pub mod prompt;

pub use orchestrator::{LlmExtractor, build_provider};
pub use parser::parse_completion;
