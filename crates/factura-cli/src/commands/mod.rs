//! CLI subcommand implementations.

pub mod batch;
pub mod config;
pub mod delete;
pub mod extract;
pub mod models;
pub mod save;
pub mod search;
pub mod stats;
