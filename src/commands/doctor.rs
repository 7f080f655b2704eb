// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db::{SqliteRepository, scan_transactions};
use crate::repository::TransactionRepository;
use crate::utils::pretty_table;
use anyhow::Result;
use rusqlite::Connection;

/// Stored rows the engine would skip, as (issue, detail) pairs.
pub fn find_issues(conn: &Connection) -> Result<Vec<Vec<String>>> {
    let mut rows = Vec::new();

    // 1) Rows that cannot be decoded at all
    // 2) Decoded rows that break the record invariants
    for (id, decoded) in scan_transactions(conn)? {
        match decoded {
            Err(e) => rows.push(vec!["unreadable_row".into(), format!("{}: {}", id, e)]),
            Ok(tx) if !tx.is_valid() => rows.push(vec![
                "invalid_record".into(),
                format!("{}: category '{}', amount {}", id, tx.category, tx.amount),
            ]),
            Ok(_) => {}
        }
    }

    // 3) Budgets with unusable amounts are dropped on load
    let mut stmt = conn.prepare("SELECT category FROM budgets ORDER BY rowid")?;
    let stored: Vec<String> = stmt
        .query_map([], |r| r.get::<_, String>(0))?
        .collect::<rusqlite::Result<_>>()?;
    let loaded = SqliteRepository::new(conn).load_thresholds()?;
    for category in stored {
        if loaded.get(&category).is_none() {
            rows.push(vec!["invalid_budget".into(), category]);
        }
    }
    Ok(rows)
}

pub fn handle(conn: &Connection) -> Result<()> {
    let rows = find_issues(conn)?;
    if rows.is_empty() {
        println!("doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}
