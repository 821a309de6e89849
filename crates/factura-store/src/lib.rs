//! SQLite persistence for extracted invoices.
//!
//! One table holds the reviewed records; insert, search, statistics,
//! and delete cover the review surface's needs. The connection sits
//! behind a mutex so a single store can be shared across threads.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use chrono::NaiveDate;
use factura_core::models::invoice::{InvoiceRecord, NormalizedInvoice, SearchQuery, StoreStats};
use rusqlite::{Connection, params};
use rust_decimal::Decimal;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur during storage operations.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Database error.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Stored data did not convert back into model types.
    #[error("invalid stored data: {0}")]
    InvalidData(String),

    /// The connection mutex was poisoned by a panicking thread.
    #[error("store connection poisoned")]
    Poisoned,
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Capability trait for invoice persistence.
pub trait InvoiceStore: Send + Sync {
    /// Persist a reviewed invoice, returning its new id.
    fn insert(&self, invoice: &NormalizedInvoice) -> Result<i64>;

    /// Search stored invoices, newest invoice date first.
    fn search(&self, query: &SearchQuery) -> Result<Vec<InvoiceRecord>>;

    /// Aggregate statistics over all stored invoices.
    fn stats(&self) -> Result<StoreStats>;

    /// Delete one record. Returns whether a row was removed.
    fn delete(&self, id: i64) -> Result<bool>;
}

/// SQLite-backed invoice store.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open (or create) the database at `path` and ensure the schema.
    ///
    /// Use `:memory:` for an in-memory database, which is handy in
    /// tests.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;
        conn.execute_batch(include_str!("schema.sql"))?;
        debug!("invoice store ready");

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| StoreError::Poisoned)
    }
}

impl InvoiceStore for SqliteStore {
    fn insert(&self, invoice: &NormalizedInvoice) -> Result<i64> {
        let conn = self.conn()?;
        let amount = amount_to_stored(invoice.total_amount)?;

        conn.execute(
            "INSERT INTO invoices (company_name, invoice_date, total_amount) VALUES (?1, ?2, ?3)",
            params![invoice.company_name, iso(invoice.invoice_date), amount],
        )?;

        let id = conn.last_insert_rowid();
        info!(id, company = %invoice.company_name, "inserted invoice");
        Ok(id)
    }

    fn search(&self, query: &SearchQuery) -> Result<Vec<InvoiceRecord>> {
        let conn = self.conn()?;

        let mut sql = String::from(
            "SELECT id, company_name, invoice_date, total_amount, created_at, updated_at \
             FROM invoices WHERE 1=1",
        );
        let mut params: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        if let Some(from) = query.from {
            sql.push_str(" AND invoice_date >= ?");
            params.push(Box::new(iso(from)));
        }

        if let Some(to) = query.to {
            sql.push_str(" AND invoice_date <= ?");
            params.push(Box::new(iso(to)));
        }

        if let Some(company) = &query.company {
            sql.push_str(" AND company_name LIKE ?");
            params.push(Box::new(format!("%{company}%")));
        }

        sql.push_str(" ORDER BY invoice_date DESC");

        let mut stmt = conn.prepare(&sql)?;
        let param_refs: Vec<&dyn rusqlite::ToSql> = params.iter().map(|p| p.as_ref()).collect();

        let rows = stmt.query_map(&param_refs[..], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, f64>(3)?,
                row.get::<_, String>(4)?,
                row.get::<_, String>(5)?,
            ))
        })?;

        let mut records = Vec::new();
        for row in rows {
            let (id, company_name, invoice_date, total_amount, created_at, updated_at) = row?;
            records.push(InvoiceRecord {
                id,
                company_name,
                invoice_date: parse_stored_date(&invoice_date)?,
                total_amount: decimal_from_stored(total_amount)?,
                created_at,
                updated_at,
            });
        }

        debug!(count = records.len(), "invoice search finished");
        Ok(records)
    }

    fn stats(&self) -> Result<StoreStats> {
        let conn = self.conn()?;

        let (total_invoices, total_amount, unique_companies) = conn.query_row(
            "SELECT COUNT(*), COALESCE(SUM(total_amount), 0), COUNT(DISTINCT company_name) \
             FROM invoices",
            [],
            |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, f64>(1)?,
                    row.get::<_, i64>(2)?,
                ))
            },
        )?;

        Ok(StoreStats {
            total_invoices: total_invoices as u64,
            total_amount: decimal_from_stored(total_amount)?,
            unique_companies: unique_companies as u64,
        })
    }

    fn delete(&self, id: i64) -> Result<bool> {
        let conn = self.conn()?;
        let affected = conn.execute("DELETE FROM invoices WHERE id = ?1", params![id])?;

        if affected > 0 {
            info!(id, "deleted invoice");
        }
        Ok(affected > 0)
    }
}

fn iso(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

fn parse_stored_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| StoreError::InvalidData(format!("bad stored date '{raw}'")))
}

fn amount_to_stored(amount: Decimal) -> Result<f64> {
    amount
        .to_f64()
        .ok_or_else(|| StoreError::InvalidData(format!("amount {amount} not storable")))
}

/// Amounts live in a REAL column; two decimal places is the column's
/// declared contract, so restore that scale on the way out.
fn decimal_from_stored(value: f64) -> Result<Decimal> {
    Decimal::from_f64(value)
        .map(|d| d.round_dp(2))
        .ok_or_else(|| StoreError::InvalidData(format!("bad stored amount {value}")))
}
