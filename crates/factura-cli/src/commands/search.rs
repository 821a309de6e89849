//! Search command - query stored invoices and export the results.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use clap::Args;
use console::style;
use rust_decimal::prelude::ToPrimitive;

use factura_core::models::invoice::{InvoiceRecord, SearchQuery};
use factura_core::normalize;
use factura_store::{InvoiceStore, SqliteStore};

use super::config::load_config;

/// Column headers shared by the table and the exports.
const HEADERS: [&str; 4] = ["ID", "Company Name", "Invoice Date", "Total Amount"];

/// Arguments for the search command.
#[derive(Args)]
pub struct SearchArgs {
    /// Earliest invoice date, inclusive (YYYY-MM-DD)
    #[arg(long)]
    from: Option<String>,

    /// Latest invoice date, inclusive (YYYY-MM-DD)
    #[arg(long)]
    to: Option<String>,

    /// Company name substring
    #[arg(long)]
    company: Option<String>,

    /// Export results (.csv, .xlsx or .json by extension)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

pub async fn run(args: SearchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;

    if let (Some(from), Some(to)) = (&args.from, &args.to) {
        if !normalize::date::validate_range(from, to) {
            anyhow::bail!("Invalid date range: {} to {}", from, to);
        }
    }

    let query = SearchQuery {
        from: parse_bound("--from", args.from.as_deref())?,
        to: parse_bound("--to", args.to.as_deref())?,
        company: args.company.clone(),
    };

    let store = SqliteStore::open(&config.database.path)?;
    let records = store.search(&query)?;

    if records.is_empty() {
        println!("{} No invoices found", style("ℹ").blue());
        return Ok(());
    }

    println!(
        "{} Found {} invoice(s)",
        style("✓").green(),
        records.len()
    );
    println!();
    print_table(&records);

    if let Some(output) = &args.output {
        export(&records, output)?;
        println!();
        println!(
            "{} Results written to {}",
            style("✓").green(),
            output.display()
        );
    }

    Ok(())
}

fn parse_bound(flag: &str, value: Option<&str>) -> anyhow::Result<Option<NaiveDate>> {
    match value {
        None => Ok(None),
        Some(raw) => match normalize::date::parse_iso(raw) {
            Some(date) => Ok(Some(date)),
            None => anyhow::bail!("Invalid {} date: {} (expected YYYY-MM-DD)", flag, raw),
        },
    }
}

fn print_table(records: &[InvoiceRecord]) {
    println!(
        "{}",
        style(format!(
            "{:>5}  {:<32} {:<12} {:>14}",
            HEADERS[0], HEADERS[1], HEADERS[2], HEADERS[3]
        ))
        .bold()
    );

    for record in records {
        println!(
            "{:>5}  {:<32} {:<12} {:>14}",
            record.id,
            record.company_name,
            record.invoice_date,
            normalize::amount::format_amount(record.total_amount, "$"),
        );
    }
}

fn export(records: &[InvoiceRecord], path: &Path) -> anyhow::Result<()> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match extension.as_str() {
        "csv" => export_csv(records, path),
        "xlsx" => export_xlsx(records, path),
        "json" => export_json(records, path),
        _ => anyhow::bail!("Unsupported export format: .{} (use .csv, .xlsx or .json)", extension),
    }
}

fn export_csv(records: &[InvoiceRecord], path: &Path) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record(HEADERS)?;
    for record in records {
        wtr.write_record([
            record.id.to_string(),
            record.company_name.clone(),
            record.invoice_date.to_string(),
            normalize::amount::format_amount(record.total_amount, "$"),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

fn export_xlsx(records: &[InvoiceRecord], path: &Path) -> anyhow::Result<()> {
    use rust_xlsxwriter::{Format, FormatAlign, Workbook};

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name("Invoices")?;

    let header_format = Format::new().set_bold();
    let amount_format = Format::new()
        .set_num_format("$#,##0.00")
        .set_align(FormatAlign::Right);

    worksheet.set_column_width(1, 32.0)?;
    worksheet.set_column_width(2, 12.0)?;
    worksheet.set_column_width(3, 14.0)?;

    for (col, header) in HEADERS.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *header, &header_format)?;
    }

    for (row, record) in records.iter().enumerate() {
        let row = (row + 1) as u32;
        worksheet.write_number(row, 0, record.id as f64)?;
        worksheet.write_string(row, 1, record.company_name.as_str())?;
        worksheet.write_string(row, 2, record.invoice_date.to_string())?;
        worksheet.write_number_with_format(
            row,
            3,
            record.total_amount.to_f64().unwrap_or(0.0),
            &amount_format,
        )?;
    }

    worksheet.set_freeze_panes(1, 0)?;
    workbook.save(path)?;
    Ok(())
}

fn export_json(records: &[InvoiceRecord], path: &Path) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(records)?;
    std::fs::write(path, json)?;
    Ok(())
}
