// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db::SqliteRepository;
use crate::engine::{FilterCriteria, QueryResult, filter};
use crate::models::TxKind;
use crate::repository::TransactionRepository;
use crate::utils::{
    fmt_money, get_base_currency, maybe_print_json, parse_date, parse_decimal, pretty_table,
};
use anyhow::Result;
use rusqlite::Connection;

pub fn criteria_from_args(sub: &clap::ArgMatches) -> Result<FilterCriteria> {
    let get = |id: &str| {
        sub.get_one::<String>(id)
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
    };
    Ok(FilterCriteria {
        text: get("text").map(str::to_string),
        kind: get("type").map(|t| t.parse::<TxKind>()).transpose()?,
        category: get("category").map(str::to_string),
        min_amount: get("min").map(parse_decimal).transpose()?,
        max_amount: get("max").map(parse_decimal).transpose()?,
        start_date: get("from").map(parse_date).transpose()?,
        end_date: get("to").map(parse_date).transpose()?,
    })
}

pub fn run(conn: &Connection, sub: &clap::ArgMatches) -> Result<QueryResult> {
    let criteria = criteria_from_args(sub)?;
    let snapshot = SqliteRepository::new(conn).load()?;
    Ok(filter(&snapshot, &criteria))
}

pub fn handle(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let result = run(conn, sub)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &result)? {
        let ccy = get_base_currency(conn)?;
        let rows = result
            .transactions
            .iter()
            .map(|t| {
                vec![
                    t.date.to_string(),
                    t.kind.to_string(),
                    t.category.clone(),
                    fmt_money(&t.signed_amount(), &ccy),
                    t.note.clone().unwrap_or_default(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Date", "Type", "Category", "Amount", "Note"], rows)
        );
        println!(
            "{} found, {} total",
            result.transactions.len(),
            fmt_money(&result.total, &ccy)
        );
    }
    Ok(())
}
