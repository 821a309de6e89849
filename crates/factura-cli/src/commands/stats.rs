//! Stats command - aggregate statistics over stored invoices.

use console::style;

use factura_core::normalize::amount::format_amount;
use factura_store::{InvoiceStore, SqliteStore};

use super::config::load_config;

pub async fn run(config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let store = SqliteStore::open(&config.database.path)?;
    let stats = store.stats()?;

    println!("{}", style("Invoice Database").bold());
    println!("  Total invoices:   {}", stats.total_invoices);
    println!("  Total amount:     {}", format_amount(stats.total_amount, "$"));
    println!("  Unique companies: {}", stats.unique_companies);

    Ok(())
}
