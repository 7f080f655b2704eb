// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

#![allow(dead_code)]

use rusqlite::Connection;
use spendwise::{cli, db, models::NewTransaction};

pub fn setup() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    conn
}

pub fn record(conn: &Connection, kind: &str, category: &str, amount: &str, date: &str) -> String {
    let tx = NewTransaction::parse(kind, category, amount, date, None)
        .and_then(NewTransaction::validate)
        .unwrap();
    db::insert_transaction(conn, &tx).unwrap();
    tx.id
}

/// Salary 3000, Food 50 and 70, Bills 500, all in May 2024.
pub fn may_2024() -> Connection {
    let conn = setup();
    record(&conn, "income", "Salary", "3000", "2024-05-01");
    record(&conn, "expense", "Food", "50", "2024-05-02");
    record(&conn, "expense", "Food", "70", "2024-05-15");
    record(&conn, "expense", "Bills", "500", "2024-05-20");
    conn
}

/// Matches for the innermost subcommand of `args`.
pub fn leaf(args: &[&str]) -> clap::ArgMatches {
    let mut m = cli::build_cli().get_matches_from(args);
    while let Some((_, sub)) = m.subcommand() {
        m = sub.clone();
    }
    m
}

/// Matches one level below the top-level command.
pub fn group(args: &[&str]) -> clap::ArgMatches {
    let m = cli::build_cli().get_matches_from(args);
    match m.subcommand() {
        Some((_, sub)) => sub.clone(),
        None => panic!("no subcommand in {:?}", args),
    }
}
