// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db::{self, SqliteRepository};
use crate::engine::{
    BudgetAlert, BudgetStatus, SystemClock, alerts, spending_for_category, status_for_all,
};
use crate::repository::TransactionRepository;
use crate::utils::{
    fmt_money, get_base_currency, maybe_print_json, month_window, parse_decimal, pretty_table,
};
use anyhow::{Result, anyhow};
use rust_decimal::Decimal;
use rusqlite::Connection;
use tracing::info;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set", sub)) => set(conn, sub)?,
        Some(("rm", sub)) => remove(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("status", sub)) => status(conn, sub)?,
        Some(("alerts", sub)) => show_alerts(conn, sub)?,
        Some(("spent", sub)) => spent(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn category_arg(sub: &clap::ArgMatches) -> Result<String> {
    let cat = sub
        .get_one::<String>("category")
        .map(|s| s.trim().to_string())
        .unwrap_or_default();
    if cat.is_empty() {
        return Err(anyhow!("Category is required"));
    }
    Ok(cat)
}

fn set(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let cat = category_arg(sub)?;
    let amount = parse_decimal(sub.get_one::<String>("amount").map_or("", |s| s.as_str()))?;
    if amount < Decimal::ZERO {
        return Err(anyhow!("Budget for '{}' cannot be negative", cat));
    }
    db::set_threshold(conn, &cat, amount)?;
    info!(category = %cat, amount = %amount, "budget set");
    println!(
        "Budget set for {} = {}",
        cat,
        fmt_money(&amount, &get_base_currency(conn)?)
    );
    Ok(())
}

fn remove(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let cat = category_arg(sub)?;
    db::remove_threshold(conn, &cat)?;
    println!("Budget removed for {}", cat);
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let thresholds = SqliteRepository::new(conn).load_thresholds()?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &thresholds)? {
        let ccy = get_base_currency(conn)?;
        let data = thresholds
            .iter()
            .map(|(c, a)| vec![c.to_string(), fmt_money(&a, &ccy)])
            .collect();
        println!("{}", pretty_table(&["Category", "Budget"], data));
    }
    Ok(())
}

/// Budget status for `--month` (default: current month).
pub fn compute_status(conn: &Connection, sub: &clap::ArgMatches) -> Result<Vec<BudgetStatus>> {
    let window = month_window(sub.get_one::<String>("month"), &SystemClock)?;
    let repo = SqliteRepository::new(conn);
    let thresholds = repo.load_thresholds()?;
    let snapshot = repo.load()?;
    Ok(status_for_all(&thresholds, &snapshot, &window))
}

pub fn compute_alerts(conn: &Connection, sub: &clap::ArgMatches) -> Result<Vec<BudgetAlert>> {
    let window = month_window(sub.get_one::<String>("month"), &SystemClock)?;
    let repo = SqliteRepository::new(conn);
    let thresholds = repo.load_thresholds()?;
    let snapshot = repo.load()?;
    Ok(alerts(&thresholds, &snapshot, &window))
}

/// Expense total for `--category` in `--month` (default: current month).
pub fn compute_spent(conn: &Connection, sub: &clap::ArgMatches) -> Result<Decimal> {
    let cat = category_arg(sub)?;
    let window = month_window(sub.get_one::<String>("month"), &SystemClock)?;
    let snapshot = SqliteRepository::new(conn).load()?;
    Ok(spending_for_category(&cat, &snapshot, &window))
}

fn spent(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let total = compute_spent(conn, sub)?;
    println!(
        "{} spent {}",
        category_arg(sub)?,
        fmt_money(&total, &get_base_currency(conn)?)
    );
    Ok(())
}

fn status(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let data = compute_status(conn, sub)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let ccy = get_base_currency(conn)?;
        let rows = data
            .iter()
            .map(|s| {
                vec![
                    s.category.clone(),
                    fmt_money(&s.budget, &ccy),
                    fmt_money(&s.spent, &ccy),
                    fmt_money(&s.remaining, &ccy),
                    format!("{:.1}%", s.percent_used.round_dp(1)),
                    s.state.as_str().to_string(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Category", "Budget", "Spent", "Remaining", "Used", "State"],
                rows
            )
        );
    }
    Ok(())
}

fn show_alerts(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let data = compute_alerts(conn, sub)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        if data.is_empty() {
            println!("All budgets on track");
        }
        for a in &data {
            println!("[{}] {}", a.state.as_str(), a.message);
        }
    }
    Ok(())
}
