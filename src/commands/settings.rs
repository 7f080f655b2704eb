// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db::clear_all;
use crate::utils::{get_base_currency, set_base_currency};
use anyhow::{Result, anyhow};
use rusqlite::Connection;

pub fn handle(conn: &mut Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("currency", sub)) => currency(conn, sub)?,
        Some(("clear", sub)) => clear(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn currency(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    match sub.get_one::<String>("set").map(|s| s.trim().to_uppercase()) {
        Some(ccy) => {
            if ccy.len() != 3 || !ccy.chars().all(|c| c.is_ascii_alphabetic()) {
                return Err(anyhow!("Invalid currency code '{}'", ccy));
            }
            set_base_currency(conn, &ccy)?;
            println!("Currency set to {}", ccy);
        }
        None => println!("{}", get_base_currency(conn)?),
    }
    Ok(())
}

fn clear(conn: &mut Connection, sub: &clap::ArgMatches) -> Result<()> {
    if !sub.get_flag("yes") {
        return Err(anyhow!(
            "This deletes all transactions, budgets and settings; re-run with --yes"
        ));
    }
    let removed = clear_all(conn)?;
    println!("Cleared all data ({} transactions removed)", removed);
    Ok(())
}
