//! Delete command - remove a stored invoice.

use clap::Args;
use console::style;

use factura_store::{InvoiceStore, SqliteStore};

use super::config::load_config;

/// Arguments for the delete command.
#[derive(Args)]
pub struct DeleteArgs {
    /// Id of the invoice to delete
    #[arg(required = true)]
    id: i64,
}

pub async fn run(args: DeleteArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let store = SqliteStore::open(&config.database.path)?;

    if store.delete(args.id)? {
        println!("{} Deleted invoice #{}", style("✓").green(), args.id);
    } else {
        println!("{} No invoice with id {}", style("⚠").yellow(), args.id);
    }

    Ok(())
}
