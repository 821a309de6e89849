//! Save command - persist reviewed invoice fields.

use clap::Args;
use console::style;

use factura_core::models::invoice::NormalizedInvoice;
use factura_core::normalize::amount::format_amount;
use factura_core::validate::validate;
use factura_store::{InvoiceStore, SqliteStore};

use super::config::load_config;

/// Arguments for the save command.
#[derive(Args)]
pub struct SaveArgs {
    /// Company name
    #[arg(long)]
    company: String,

    /// Invoice date
    #[arg(long)]
    date: String,

    /// Total amount
    #[arg(long)]
    amount: String,
}

pub async fn run(args: SaveArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;

    // All three rules run so the user sees every problem at once
    let report = validate(&args.company, &args.date, &args.amount);
    if !report.is_ok() {
        eprintln!("{}", style("Validation issues:").yellow());
        for error in &report.errors {
            eprintln!("  - {}", error);
        }
        anyhow::bail!("Invoice not saved");
    }

    let invoice = NormalizedInvoice::from_reviewed(&args.company, &args.date, &args.amount)?;
    let store = SqliteStore::open(&config.database.path)?;
    let id = store.insert(&invoice)?;

    println!(
        "{} Saved invoice #{}: {} | {} | {}",
        style("✓").green(),
        id,
        invoice.company_name,
        invoice.invoice_date,
        format_amount(invoice.total_amount, "$"),
    );

    Ok(())
}
