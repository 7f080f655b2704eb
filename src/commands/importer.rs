// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db::insert_transaction;
use crate::models::NewTransaction;
use anyhow::{Context, Result};
use csv::{ReaderBuilder, StringRecord};
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::path::Path;
use tracing::info;

pub fn handle(conn: &mut Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => import_transactions(conn, sub),
        _ => Ok(()),
    }
}

/// Row shape shared by both formats. Ids and timestamps in the file are
/// ignored; every imported record gets a fresh id.
#[derive(Debug, Deserialize)]
struct ImportRow {
    #[serde(rename = "type")]
    kind: String,
    category: String,
    amount: String,
    date: String,
    #[serde(default)]
    note: Option<String>,
}

#[derive(Debug, Deserialize)]
struct JsonRow {
    #[serde(rename = "type")]
    kind: String,
    category: String,
    amount: Decimal,
    date: String,
    #[serde(default)]
    note: Option<String>,
}

impl From<JsonRow> for ImportRow {
    fn from(r: JsonRow) -> Self {
        ImportRow {
            kind: r.kind,
            category: r.category,
            amount: r.amount.to_string(),
            date: r.date,
            note: r.note,
        }
    }
}

fn read_rows(path: &str) -> Result<Vec<ImportRow>> {
    let is_json = Path::new(path)
        .extension()
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));
    if is_json {
        let text = std::fs::read_to_string(path).with_context(|| format!("Open JSON {}", path))?;
        let rows: Vec<JsonRow> =
            serde_json::from_str(&text).with_context(|| format!("Parse JSON {}", path))?;
        return Ok(rows.into_iter().map(ImportRow::from).collect());
    }

    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("Open CSV {}", path))?;
    // Header names are matched case-insensitively ("Type" or "type").
    let headers: StringRecord = rdr
        .headers()?
        .iter()
        .map(|h| h.trim().to_lowercase())
        .collect();
    rdr.set_headers(headers);
    let mut rows = Vec::new();
    for (i, rec) in rdr.deserialize::<ImportRow>().enumerate() {
        rows.push(rec.with_context(|| format!("CSV row {}", i + 1))?);
    }
    Ok(rows)
}

fn import_transactions(conn: &mut Connection, sub: &clap::ArgMatches) -> Result<()> {
    let path = sub
        .get_one::<String>("path")
        .map(|s| s.trim().to_string())
        .unwrap_or_default();
    let rows = read_rows(&path)?;

    let tx = conn.transaction()?;
    for (i, r) in rows.iter().enumerate() {
        let record = NewTransaction::parse(
            &r.kind,
            &r.category,
            &r.amount,
            &r.date,
            r.note.as_deref(),
        )
        .and_then(NewTransaction::validate)
        .with_context(|| format!("Row {} of {}", i + 1, path))?;
        insert_transaction(&tx, &record)?;
    }
    tx.commit()?;
    info!(count = rows.len(), path = %path, "imported transactions");
    println!("Imported {} transactions from {}", rows.len(), path);
    Ok(())
}
