// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db::{self, SqliteRepository};
use crate::engine::{FilterCriteria, Window, filter};
use crate::models::{NewTransaction, Transaction};
use crate::repository::TransactionRepository;
use crate::utils::{fmt_money, get_base_currency, maybe_print_json, pretty_table};
use anyhow::{Result, anyhow};
use rusqlite::Connection;
use tracing::info;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("edit", sub)) => edit(conn, sub)?,
        Some(("rm", sub)) => remove(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn arg<'a>(sub: &'a clap::ArgMatches, id: &str) -> Option<&'a str> {
    sub.get_one::<String>(id).map(|s| s.trim())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let entry = NewTransaction::parse(
        arg(sub, "type").unwrap_or_default(),
        arg(sub, "category").unwrap_or_default(),
        arg(sub, "amount").unwrap_or_default(),
        arg(sub, "date").unwrap_or_default(),
        arg(sub, "note"),
    )?;
    let tx = entry.validate()?;
    db::insert_transaction(conn, &tx)?;
    info!(id = %tx.id, "recorded transaction");
    println!(
        "Recorded {} {} in {} on {} (id: {})",
        tx.kind,
        fmt_money(&tx.amount, &get_base_currency(conn)?),
        tx.category,
        tx.date,
        tx.id
    );
    Ok(())
}

fn edit(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = arg(sub, "id").ok_or_else(|| anyhow!("--id is required"))?;
    let current = db::find_transaction(conn, id)?;
    let amount = current.amount.to_string();
    let date = current.date.to_string();
    let entry = NewTransaction::parse(
        arg(sub, "type").unwrap_or(current.kind.as_str()),
        arg(sub, "category").unwrap_or(&current.category),
        arg(sub, "amount").unwrap_or(&amount),
        arg(sub, "date").unwrap_or(&date),
        arg(sub, "note").or(current.note.as_deref()),
    )?;
    let edited = current.replaced_with(entry)?;
    db::replace_transaction(conn, &edited)?;
    info!(id = %edited.id, "edited transaction");
    println!("Updated transaction {}", edited.id);
    Ok(())
}

fn remove(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = arg(sub, "id").ok_or_else(|| anyhow!("--id is required"))?;
    db::delete_transaction(conn, id)?;
    info!(id = %id, "deleted transaction");
    println!("Removed transaction {}", id);
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(conn, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let ccy = get_base_currency(conn)?;
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|t| {
                vec![
                    t.date.to_string(),
                    t.kind.to_string(),
                    t.category.clone(),
                    fmt_money(&t.amount, &ccy),
                    t.note.clone().unwrap_or_default(),
                    t.id.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Date", "Type", "Category", "Amount", "Note", "ID"], rows)
        );
    }
    Ok(())
}

/// Stored transactions narrowed by `--month`/`--category`, newest first,
/// truncated to `--limit`.
pub fn query_rows(conn: &Connection, sub: &clap::ArgMatches) -> Result<Vec<Transaction>> {
    let mut criteria = FilterCriteria {
        category: arg(sub, "category").map(str::to_string),
        ..Default::default()
    };
    if let Some(month) = arg(sub, "month") {
        let w = Window::parse_month(month)
            .ok_or_else(|| anyhow!("Invalid month '{}', expected YYYY-MM", month))?;
        criteria.start_date = Some(w.start);
        criteria.end_date = Some(w.end);
    }
    let snapshot = SqliteRepository::new(conn).load()?;
    let mut rows = filter(&snapshot, &criteria).transactions;
    if let Some(limit) = sub.get_one::<usize>("limit") {
        rows.truncate(*limit);
    }
    Ok(rows)
}
