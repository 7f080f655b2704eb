// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result, anyhow};
use chrono::{DateTime, NaiveDate, Utc};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rusqlite::{Connection, Row, params};
use rust_decimal::Decimal;
use std::fs;
use std::path::PathBuf;
use tracing::{debug, info, warn};

use crate::models::{BudgetThresholds, Transaction, TxKind};
use crate::repository::TransactionRepository;

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("com.alphavelocity", "Spendwise", "spendwise"));

/// Environment variable that overrides the database location.
pub const DB_ENV: &str = "SPENDWISE_DB";

pub const DEFAULT_THRESHOLDS: [(&str, i64); 7] = [
    ("Bills", 500),
    ("Food", 300),
    ("Shopping", 200),
    ("Travel", 400),
    ("Entertainment", 150),
    ("Healthcare", 200),
    ("Other", 100),
];

pub fn db_path() -> Result<PathBuf> {
    if let Ok(p) = std::env::var(DB_ENV) {
        if !p.trim().is_empty() {
            return Ok(PathBuf::from(p.trim()));
        }
    }
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join("spendwise.sqlite"))
}

pub fn open_or_init() -> Result<Connection> {
    let path = db_path()?;
    let conn =
        Connection::open(&path).with_context(|| format!("Open DB at {}", path.display()))?;
    init_schema(&conn)?;
    debug!(path = %path.display(), "database ready");
    Ok(conn)
}

pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
    CREATE TABLE IF NOT EXISTS settings(
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS transactions(
        id TEXT PRIMARY KEY,
        type TEXT NOT NULL,
        category TEXT NOT NULL,
        amount TEXT NOT NULL,
        date TEXT NOT NULL,
        note TEXT,
        created_at TEXT NOT NULL
    );
    CREATE INDEX IF NOT EXISTS idx_transactions_date ON transactions(date);

    -- rowid order is the threshold display order
    CREATE TABLE IF NOT EXISTS budgets(
        category TEXT PRIMARY KEY,
        amount TEXT NOT NULL
    );
    "#,
    )?;
    Ok(())
}

pub fn insert_transaction(conn: &Connection, tx: &Transaction) -> Result<()> {
    conn.execute(
        "INSERT INTO transactions(id, type, category, amount, date, note, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            tx.id,
            tx.kind.as_str(),
            tx.category,
            tx.amount.to_string(),
            tx.date.to_string(),
            tx.note,
            tx.created_at.to_rfc3339(),
        ],
    )?;
    debug!(id = %tx.id, kind = %tx.kind, "inserted transaction");
    Ok(())
}

/// Overwrites the stored record with the same id.
pub fn replace_transaction(conn: &Connection, tx: &Transaction) -> Result<()> {
    let n = conn.execute(
        "UPDATE transactions SET type=?2, category=?3, amount=?4, date=?5, note=?6 WHERE id=?1",
        params![
            tx.id,
            tx.kind.as_str(),
            tx.category,
            tx.amount.to_string(),
            tx.date.to_string(),
            tx.note,
        ],
    )?;
    if n == 0 {
        return Err(anyhow!("Transaction '{}' not found", tx.id));
    }
    Ok(())
}

pub fn delete_transaction(conn: &Connection, id: &str) -> Result<()> {
    let n = conn.execute("DELETE FROM transactions WHERE id=?1", params![id])?;
    if n == 0 {
        return Err(anyhow!("Transaction '{}' not found", id));
    }
    Ok(())
}

pub fn find_transaction(conn: &Connection, id: &str) -> Result<Transaction> {
    let mut stmt = conn.prepare(
        "SELECT id, type, category, amount, date, note, created_at FROM transactions WHERE id=?1",
    )?;
    let mut rows = stmt.query(params![id])?;
    match rows.next()? {
        Some(r) => decode_row(r),
        None => Err(anyhow!("Transaction '{}' not found", id)),
    }
}

/// Upserts a threshold; an existing category keeps its position.
pub fn set_threshold(conn: &Connection, category: &str, amount: Decimal) -> Result<()> {
    conn.execute(
        "INSERT INTO budgets(category, amount) VALUES (?1, ?2)
         ON CONFLICT(category) DO UPDATE SET amount=excluded.amount",
        params![category, amount.to_string()],
    )?;
    Ok(())
}

pub fn remove_threshold(conn: &Connection, category: &str) -> Result<()> {
    let n = conn.execute("DELETE FROM budgets WHERE category=?1", params![category])?;
    if n == 0 {
        return Err(anyhow!("No budget set for '{}'", category));
    }
    Ok(())
}

/// Deletes every transaction, budget and setting in one transaction.
/// Returns the number of transactions removed.
pub fn clear_all(conn: &mut Connection) -> Result<usize> {
    let tx = conn.transaction()?;
    let removed = tx.execute("DELETE FROM transactions", [])?;
    tx.execute("DELETE FROM budgets", [])?;
    tx.execute("DELETE FROM settings", [])?;
    tx.commit()?;
    info!(transactions = removed, "cleared all data");
    Ok(removed)
}

/// Seeds [`DEFAULT_THRESHOLDS`] when no budgets exist. Returns whether it did.
pub fn seed_default_thresholds(conn: &Connection) -> Result<bool> {
    let existing: i64 = conn.query_row("SELECT COUNT(*) FROM budgets", [], |r| r.get(0))?;
    if existing > 0 {
        return Ok(false);
    }
    for (category, amount) in DEFAULT_THRESHOLDS {
        set_threshold(conn, category, Decimal::from(amount))?;
    }
    info!(count = DEFAULT_THRESHOLDS.len(), "seeded default budgets");
    Ok(true)
}

fn decode_row(r: &Row<'_>) -> Result<Transaction> {
    let id: String = r.get(0)?;
    let kind_s: String = r.get(1)?;
    let category: String = r.get(2)?;
    let amount_s: String = r.get(3)?;
    let date_s: String = r.get(4)?;
    let note: Option<String> = r.get(5)?;
    let created_s: String = r.get(6)?;

    let kind = kind_s.parse::<TxKind>()?;
    let amount = amount_s
        .parse::<Decimal>()
        .with_context(|| format!("Invalid amount '{}'", amount_s))?;
    let date = NaiveDate::parse_from_str(&date_s, "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}'", date_s))?;
    let created_at = DateTime::parse_from_rfc3339(&created_s)
        .with_context(|| format!("Invalid created_at '{}'", created_s))?
        .with_timezone(&Utc);
    Ok(Transaction {
        id,
        kind,
        category,
        amount,
        date,
        note,
        created_at,
    })
}

/// Every stored row, decoded or not, in insertion order.
pub fn scan_transactions(conn: &Connection) -> Result<Vec<(String, Result<Transaction>)>> {
    let mut stmt = conn.prepare(
        "SELECT id, type, category, amount, date, note, created_at
         FROM transactions ORDER BY rowid",
    )?;
    let mut rows = stmt.query([])?;
    let mut out = Vec::new();
    while let Some(r) = rows.next()? {
        let id: String = r.get(0)?;
        out.push((id, decode_row(r)));
    }
    Ok(out)
}

/// SQLite-backed snapshot source.
pub struct SqliteRepository<'c> {
    conn: &'c Connection,
}

impl<'c> SqliteRepository<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        Self { conn }
    }
}

impl TransactionRepository for SqliteRepository<'_> {
    fn load(&self) -> Result<Vec<Transaction>> {
        let mut out = Vec::new();
        for (id, decoded) in scan_transactions(self.conn)? {
            match decoded {
                Ok(tx) => out.push(tx),
                Err(e) => warn!(id = %id, error = %e, "skipping unreadable transaction row"),
            }
        }
        Ok(out)
    }

    fn load_thresholds(&self) -> Result<BudgetThresholds> {
        let mut stmt = self
            .conn
            .prepare("SELECT category, amount FROM budgets ORDER BY rowid")?;
        let mut rows = stmt.query([])?;
        let mut thresholds = BudgetThresholds::new();
        while let Some(r) = rows.next()? {
            let category: String = r.get(0)?;
            let amount_s: String = r.get(1)?;
            match amount_s.parse::<Decimal>() {
                Ok(a) if a >= Decimal::ZERO => thresholds.set(&category, a),
                _ => warn!(category = %category, amount = %amount_s, "skipping invalid budget"),
            }
        }
        Ok(thresholds)
    }
}
