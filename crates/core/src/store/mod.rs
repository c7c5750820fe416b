use std::collections::HashSet;
use std::path::Path;

use chrono::NaiveDate;
use rusqlite::{params, Connection};

use crate::errors::CoreError;
use crate::models::cash::{CashEntry, NewCashEntry};
use crate::models::stock::{NewStockTransaction, StockTransaction};

/// Table schema, applied idempotently on every open.
const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS cash (
    transaction_id    INTEGER PRIMARY KEY AUTOINCREMENT,
    taiwanese_dollars REAL NOT NULL,
    us_dollars        REAL NOT NULL,
    note              TEXT NOT NULL,
    date_info         TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS stock (
    id             INTEGER PRIMARY KEY AUTOINCREMENT,
    stock_id       TEXT NOT NULL,
    stock_num      INTEGER NOT NULL,
    stock_price    REAL NOT NULL,
    processing_fee REAL NOT NULL,
    tax            REAL NOT NULL,
    date_info      TEXT NOT NULL
);
"#;

/// Dates are persisted as ISO-8601 text in the `date_info` columns.
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Request-scoped handle to the SQLite ledger.
///
/// One `Store` is opened per request and released when it goes out of scope,
/// on every exit path including faults. There is no shared connection and no
/// pooling — the store file itself is the only cross-request state.
pub struct Store {
    conn: Connection,
}

impl Store {
    /// Open (creating if absent) the ledger at `path` and ensure the schema.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, CoreError> {
        let conn = Connection::open(path)?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn })
    }

    // ── Cash ────────────────────────────────────────────────────────

    /// Append a new cash entry.
    pub fn insert_cash(&self, entry: &NewCashEntry) -> Result<(), CoreError> {
        self.conn.execute(
            "INSERT INTO cash (taiwanese_dollars, us_dollars, note, date_info)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                entry.twd_amount,
                entry.usd_amount,
                entry.note,
                entry.date.format(DATE_FORMAT).to_string(),
            ],
        )?;
        Ok(())
    }

    /// Remove the cash entry with the given id. Deleting an id that does not
    /// exist is a no-op, not an error.
    pub fn delete_cash(&self, id: i64) -> Result<(), CoreError> {
        self.conn
            .execute("DELETE FROM cash WHERE transaction_id = ?1", params![id])?;
        Ok(())
    }

    /// All cash entries, insertion order.
    pub fn list_cash(&self) -> Result<Vec<CashEntry>, CoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT transaction_id, taiwanese_dollars, us_dollars, note, date_info
             FROM cash ORDER BY transaction_id",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, f64>(1)?,
                row.get::<_, f64>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, String>(4)?,
            ))
        })?;

        let mut entries = Vec::new();
        for row in rows {
            let (id, twd_amount, usd_amount, note, date) = row?;
            entries.push(CashEntry {
                id,
                twd_amount,
                usd_amount,
                note,
                date: parse_stored_date(&date)?,
            });
        }
        Ok(entries)
    }

    // ── Stock ───────────────────────────────────────────────────────

    /// Append a new stock transaction.
    pub fn insert_stock(&self, tx: &NewStockTransaction) -> Result<(), CoreError> {
        self.conn.execute(
            "INSERT INTO stock (stock_id, stock_num, stock_price, processing_fee, tax, date_info)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                tx.ticker,
                tx.shares,
                tx.unit_price,
                tx.fee,
                tx.tax,
                tx.date.format(DATE_FORMAT).to_string(),
            ],
        )?;
        Ok(())
    }

    /// Distinct tickers across all stock transactions, first-seen order.
    pub fn list_stock_tickers(&self) -> Result<Vec<String>, CoreError> {
        let mut stmt = self
            .conn
            .prepare("SELECT stock_id FROM stock ORDER BY id")?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

        let mut seen = HashSet::new();
        let mut tickers = Vec::new();
        for row in rows {
            let ticker = row?;
            if seen.insert(ticker.clone()) {
                tickers.push(ticker);
            }
        }
        Ok(tickers)
    }

    /// All transactions for one ticker, insertion order.
    pub fn list_stock_by_ticker(&self, ticker: &str) -> Result<Vec<StockTransaction>, CoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, stock_id, stock_num, stock_price, processing_fee, tax, date_info
             FROM stock WHERE stock_id = ?1 ORDER BY id",
        )?;
        let rows = stmt.query_map(params![ticker], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, i64>(2)?,
                row.get::<_, f64>(3)?,
                row.get::<_, f64>(4)?,
                row.get::<_, f64>(5)?,
                row.get::<_, String>(6)?,
            ))
        })?;

        let mut txs = Vec::new();
        for row in rows {
            let (id, ticker, shares, unit_price, fee, tax, date) = row?;
            txs.push(StockTransaction {
                id,
                ticker,
                shares,
                unit_price,
                fee,
                tax,
                date: parse_stored_date(&date)?,
            });
        }
        Ok(txs)
    }
}

impl Drop for Store {
    fn drop(&mut self) {
        // Request lifecycle is over; the connection closes with us.
        tracing::debug!("closing store connection");
    }
}

/// Parse a `date_info` column back into a date. The form layer only ever
/// stores ISO dates, so a parse failure means the store file was edited
/// out-of-band.
fn parse_stored_date(text: &str) -> Result<NaiveDate, CoreError> {
    NaiveDate::parse_from_str(text, DATE_FORMAT)
        .map_err(|e| CoreError::Store(format!("invalid date_info '{text}': {e}")))
}
