// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db::SqliteRepository;
use crate::repository::TransactionRepository;
use anyhow::{Context, Result, anyhow};
use rusqlite::Connection;
use tracing::info;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => export_transactions(conn, sub),
        _ => Ok(()),
    }
}

fn export_transactions(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub
        .get_one::<String>("format")
        .map(|s| s.trim().to_lowercase())
        .unwrap_or_default();
    let out = sub
        .get_one::<String>("out")
        .map(|s| s.trim().to_string())
        .unwrap_or_default();
    if fmt != "csv" && fmt != "json" {
        return Err(anyhow!("Unknown format: {} (use csv|json)", fmt));
    }

    let mut rows = SqliteRepository::new(conn).load()?;
    rows.sort_by(|a, b| a.date.cmp(&b.date));

    if fmt == "csv" {
        let mut wtr = csv::Writer::from_path(&out).with_context(|| format!("Create {}", out))?;
        wtr.write_record(["id", "type", "category", "amount", "date", "note"])?;
        for t in &rows {
            let amount = t.amount.to_string();
            let date = t.date.to_string();
            wtr.write_record([
                t.id.as_str(),
                t.kind.as_str(),
                t.category.as_str(),
                amount.as_str(),
                date.as_str(),
                t.note.as_deref().unwrap_or_default(),
            ])?;
        }
        wtr.flush()?;
    } else {
        std::fs::write(&out, serde_json::to_string_pretty(&rows)?)
            .with_context(|| format!("Write {}", out))?;
    }
    info!(count = rows.len(), format = %fmt, "exported transactions");
    println!("Exported {} transactions to {}", rows.len(), out);
    Ok(())
}
