//! CLI application for invoice field extraction and review.

mod commands;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use commands::{batch, config, delete, extract, models, save, search, stats};

/// factura - Extract, review and store invoice fields
#[derive(Parser)]
#[command(name = "factura")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract fields from a single invoice PDF
    Extract(extract::ExtractArgs),

    /// Extract fields from multiple invoice PDFs
    Batch(batch::BatchArgs),

    /// Save reviewed invoice fields to the database
    Save(save::SaveArgs),

    /// Search stored invoices
    Search(search::SearchArgs),

    /// Show statistics over stored invoices
    Stats,

    /// Delete a stored invoice by id
    Delete(delete::DeleteArgs),

    /// List models available from the configured provider
    Models,

    /// Manage configuration
    Config(config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    // Execute command
    match cli.command {
        Commands::Extract(args) => extract::run(args, cli.config.as_deref()).await,
        Commands::Batch(args) => batch::run(args, cli.config.as_deref()).await,
        Commands::Save(args) => save::run(args, cli.config.as_deref()).await,
        Commands::Search(args) => search::run(args, cli.config.as_deref()).await,
        Commands::Stats => stats::run(cli.config.as_deref()).await,
        Commands::Delete(args) => delete::run(args, cli.config.as_deref()).await,
        Commands::Models => models::run(cli.config.as_deref()).await,
        Commands::Config(args) => config::run(args, cli.config.as_deref()).await,
    }
}
