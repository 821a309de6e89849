//! Extract command - pull invoice fields from a single PDF.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use factura_core::extract::LlmExtractor;
use factura_core::models::config::FacturaConfig;
use factura_core::models::invoice::{ExtractedFields, FieldValue, NormalizedInvoice};
use factura_core::pdf::{PdfTextExtractor, TextExtractor};
use factura_core::validate::validate;
use factura_store::{InvoiceStore, SqliteStore};

use super::config::load_config;

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Input PDF file
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Save the fields to the invoice database after extraction
    #[arg(long)]
    save: bool,

    /// Replace the extracted company name before saving
    #[arg(long)]
    company: Option<String>,

    /// Replace the extracted invoice date before saving
    #[arg(long)]
    date: Option<String>,

    /// Replace the extracted total amount before saving
    #[arg(long)]
    amount: Option<String>,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// Plain text fields
    Text,
}

pub async fn run(args: ExtractArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Extracting from: {}", args.input.display());

    let pb = ProgressBar::new(100);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {msg}")
            .unwrap()
            .progress_chars("##-"),
    );

    pb.set_message("Reading PDF...");
    pb.set_position(10);
    let data = fs::read(&args.input)?;

    pb.set_message("Extracting text...");
    pb.set_position(30);
    let pdf = PdfTextExtractor::from_config(&config.pdf);
    let text = pdf.extract_text(&data)?;
    debug!("Extracted {} characters of text", text.len());

    pb.set_message("Requesting completion...");
    pb.set_position(50);
    let extractor = LlmExtractor::from_config(&config.extraction)?;
    let fields = extractor.extract(&text).await;

    pb.set_position(100);
    pb.finish_with_message("Done");

    // Command-line review: flags replace extracted values
    let fields = apply_overrides(fields, &args);

    let output = format_fields(&fields, args.format)?;
    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    if args.save {
        save_fields(&fields, &config)?;
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

fn apply_overrides(mut fields: ExtractedFields, args: &ExtractArgs) -> ExtractedFields {
    if let Some(company) = &args.company {
        fields.company_name = FieldValue::new(company.clone());
    }
    if let Some(date) = &args.date {
        fields.invoice_date = FieldValue::new(date.clone());
    }
    if let Some(amount) = &args.amount {
        fields.total_amount = FieldValue::new(amount.clone());
    }
    fields
}

fn save_fields(fields: &ExtractedFields, config: &FacturaConfig) -> anyhow::Result<()> {
    let company = fields.company_name.to_string();
    let date = fields.invoice_date.to_string();
    let amount = fields.total_amount.to_string();

    let report = validate(&company, &date, &amount);
    if !report.is_ok() {
        eprintln!("{}", style("Validation issues:").yellow());
        for error in &report.errors {
            eprintln!("  - {}", error);
        }
        anyhow::bail!("Not saved. Correct the fields with --company/--date/--amount and retry.");
    }

    let invoice = NormalizedInvoice::from_reviewed(&company, &date, &amount)?;
    let store = SqliteStore::open(&config.database.path)?;
    let id = store.insert(&invoice)?;

    println!("{} Saved invoice #{}", style("✓").green(), id);

    Ok(())
}

pub(crate) fn format_fields(
    fields: &ExtractedFields,
    format: OutputFormat,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string(fields)?),
        OutputFormat::Text => Ok(format!(
            "Company name: {}\nInvoice date: {}\nTotal amount: {}\n",
            fields.company_name, fields.invoice_date, fields.total_amount
        )),
    }
}
