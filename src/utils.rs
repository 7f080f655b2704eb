// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result, anyhow};
use chrono::NaiveDate;
use comfy_table::{Cell, Table, presets::UTF8_FULL};
use rusqlite::{Connection, OptionalExtension, params};
use rust_decimal::Decimal;

use crate::engine::window::{Clock, Period, SystemClock, Window};

pub const DEFAULT_CURRENCY: &str = "USD";

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

pub fn parse_decimal(s: &str) -> Result<Decimal> {
    s.trim()
        .parse::<Decimal>()
        .with_context(|| format!("Invalid decimal '{}'", s))
}

pub fn fmt_money(d: &Decimal, ccy: &str) -> String {
    format!("{} {:.2}", ccy, d.round_dp(2))
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn get_base_currency(conn: &Connection) -> Result<String> {
    let v: Option<String> = conn
        .query_row(
            "SELECT value FROM settings WHERE key='base_currency'",
            [],
            |r| r.get(0),
        )
        .optional()?;
    Ok(v.unwrap_or_else(|| DEFAULT_CURRENCY.to_string()))
}

pub fn set_base_currency(conn: &Connection, ccy: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO settings(key, value) VALUES('base_currency', ?1)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        params![ccy],
    )?;
    Ok(())
}

/// Window for a `YYYY-MM` flag, or the current month when absent.
pub fn month_window(month: Option<&String>, clock: &dyn Clock) -> Result<Window> {
    match month {
        Some(m) => Window::parse_month(m)
            .ok_or_else(|| anyhow!("Invalid month '{}', expected YYYY-MM", m.trim())),
        None => Ok(Window::current(Period::Month, clock)),
    }
}

/// Resolves `--from/--to` or `--period` into a window. Explicit bounds win.
pub fn window_from_args(sub: &clap::ArgMatches) -> Result<Window> {
    let from = sub.get_one::<String>("from");
    let to = sub.get_one::<String>("to");
    match (from, to) {
        (Some(f), Some(t)) => Ok(Window::new(parse_date(f)?, parse_date(t)?)),
        (None, None) => {
            let period = sub
                .get_one::<String>("period")
                .map(|p| p.parse::<Period>())
                .transpose()
                .map_err(|e| anyhow!(e))?
                .unwrap_or(Period::Month);
            Ok(Window::current(period, &SystemClock))
        }
        _ => Err(anyhow!("--from and --to must be given together")),
    }
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // If v is an array, stream each element; else stream single line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}
