// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db::SqliteRepository;
use crate::engine::{
    Clock, Granularity, Insight, SystemClock, TrendBucket, category_breakdown, compute_kpis,
    generate_insights, trend_series,
};
use crate::repository::TransactionRepository;
use crate::utils::{
    fmt_money, get_base_currency, maybe_print_json, parse_date, pretty_table, window_from_args,
};
use anyhow::{Result, anyhow};
use rusqlite::Connection;
use tracing::debug;

const DEFAULT_MONTH_BUCKETS: usize = 12;
const DEFAULT_WEEK_BUCKETS: usize = 8;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("kpis", sub)) => kpis(conn, sub)?,
        Some(("breakdown", sub)) => breakdown(conn, sub)?,
        Some(("trend", sub)) => trend(conn, sub)?,
        Some(("insights", sub)) => insights(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn kpis(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let window = window_from_args(sub)?;
    let snapshot = SqliteRepository::new(conn).load()?;
    let k = compute_kpis(&snapshot, &window);
    debug!(start = %window.start, end = %window.end, count = k.transaction_count, "kpis");
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &k)? {
        let ccy = get_base_currency(conn)?;
        let rows = vec![
            vec!["Window".into(), format!("{} .. {}", window.start, window.end)],
            vec!["Income".into(), fmt_money(&k.income, &ccy)],
            vec!["Expenses".into(), fmt_money(&k.expenses, &ccy)],
            vec!["Balance".into(), fmt_money(&k.balance, &ccy)],
            vec!["Transactions".into(), k.transaction_count.to_string()],
            vec!["Avg expense".into(), fmt_money(&k.avg_expense, &ccy)],
            vec![
                "Top category".into(),
                format!("{} ({})", k.top_category, fmt_money(&k.top_category_amount, &ccy)),
            ],
        ];
        println!("{}", pretty_table(&["Metric", "Value"], rows));
    }
    Ok(())
}

fn breakdown(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let window = window_from_args(sub)?;
    let snapshot = SqliteRepository::new(conn).load()?;
    let items = category_breakdown(&snapshot, &window);
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &items)? {
        let ccy = get_base_currency(conn)?;
        let rows = items
            .iter()
            .map(|c| vec![c.category.clone(), fmt_money(&c.amount, &ccy)])
            .collect();
        println!("{}", pretty_table(&["Category", "Spent"], rows));
    }
    Ok(())
}

/// Trend buckets from `--granularity`, `--buckets` and `--anchor`. Defaults
/// to 12 months (8 weeks) ending with today's bucket.
pub fn compute_trend(conn: &Connection, sub: &clap::ArgMatches) -> Result<Vec<TrendBucket>> {
    let granularity = sub
        .get_one::<String>("granularity")
        .map(|g| g.parse::<Granularity>())
        .transpose()
        .map_err(|e| anyhow!(e))?
        .unwrap_or(Granularity::Month);
    let buckets = sub.get_one::<usize>("buckets").copied().unwrap_or(match granularity {
        Granularity::Month => DEFAULT_MONTH_BUCKETS,
        Granularity::Week => DEFAULT_WEEK_BUCKETS,
    });
    let anchor = match sub.get_one::<String>("anchor") {
        Some(a) => parse_date(a)?,
        None => SystemClock.today(),
    };
    let snapshot = SqliteRepository::new(conn).load()?;
    Ok(trend_series(&snapshot, granularity, buckets, anchor))
}

fn trend(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let series = compute_trend(conn, sub)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &series)? {
        let ccy = get_base_currency(conn)?;
        let rows = series
            .iter()
            .map(|b| {
                vec![
                    b.label.clone(),
                    fmt_money(&b.income, &ccy),
                    fmt_money(&b.expense, &ccy),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["Period", "Income", "Expense"], rows));
    }
    Ok(())
}

pub fn compute_insights(conn: &Connection, sub: &clap::ArgMatches) -> Result<Vec<Insight>> {
    let window = window_from_args(sub)?;
    let repo = SqliteRepository::new(conn);
    let snapshot = repo.load()?;
    let thresholds = repo.load_thresholds()?;
    let k = compute_kpis(&snapshot, &window);
    Ok(generate_insights(&k, &thresholds))
}

fn insights(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let data = compute_insights(conn, sub)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        if data.is_empty() {
            println!("No insights for this period");
            return Ok(());
        }
        let rows = data
            .iter()
            .map(|i| vec![i.kind.as_str().to_string(), i.title.clone(), i.message.clone()])
            .collect();
        println!("{}", pretty_table(&["Kind", "Title", "Message"], rows));
    }
    Ok(())
}
