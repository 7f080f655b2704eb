// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

mod common;

use common::{group, leaf, may_2024, record, setup};
use rust_decimal::Decimal;
use spendwise::{commands::transactions, db, models::TxKind};

#[test]
fn add_trims_and_stores_record() {
    let conn = setup();
    let m = group(&[
        "spendwise", "tx", "add", "--type", "Expense", "--category", "  Food ", "--amount",
        "12.50", "--date", "2024-05-02", "--note", "  ",
    ]);
    transactions::handle(&conn, &m).unwrap();

    let rows = transactions::query_rows(&conn, &leaf(&["spendwise", "tx", "list"])).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].kind, TxKind::Expense);
    assert_eq!(rows[0].category, "Food");
    assert_eq!(rows[0].amount, "12.50".parse::<Decimal>().unwrap());
    assert_eq!(rows[0].note, None);
}

#[test]
fn add_rejects_invalid_input() {
    let conn = setup();
    for (kind, category, amount, date) in [
        ("expense", "Food", "0", "2024-05-02"),
        ("expense", " ", "5", "2024-05-02"),
        ("transfer", "Food", "5", "2024-05-02"),
        ("expense", "Food", "5", "05/02/2024"),
    ] {
        let m = group(&[
            "spendwise", "tx", "add", "--type", kind, "--category", category, "--amount", amount,
            "--date", date,
        ]);
        let rejected = transactions::handle(&conn, &m).is_err();
        assert!(rejected, "{} {} {} {}", kind, category, amount, date);
    }
    let n: i64 = conn
        .query_row("SELECT COUNT(*) FROM transactions", [], |r| r.get(0))
        .unwrap();
    assert_eq!(n, 0);
}

#[test]
fn list_is_newest_first_and_respects_limit() {
    let conn = may_2024();
    let rows = transactions::query_rows(&conn, &leaf(&["spendwise", "tx", "list", "--limit", "2"]))
        .unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].date.to_string(), "2024-05-20");
    assert_eq!(rows[1].date.to_string(), "2024-05-15");
}

#[test]
fn list_filters_by_month_and_category() {
    let conn = may_2024();
    record(&conn, "expense", "Food", "9", "2024-06-01");
    let rows = transactions::query_rows(
        &conn,
        &leaf(&["spendwise", "tx", "list", "--month", "2024-05", "--category", "Food"]),
    )
    .unwrap();
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|t| t.category == "Food"));
}

#[test]
fn edit_keeps_id_and_created_at() {
    let conn = setup();
    let id = record(&conn, "expense", "Food", "10", "2024-05-02");
    let before = db::find_transaction(&conn, &id).unwrap();

    let m = group(&["spendwise", "tx", "edit", "--id", &id, "--amount", "15", "--note", "lunch"]);
    transactions::handle(&conn, &m).unwrap();

    let after = db::find_transaction(&conn, &id).unwrap();
    assert_eq!(after.amount, Decimal::from(15));
    assert_eq!(after.note.as_deref(), Some("lunch"));
    assert_eq!(after.category, "Food");
    assert_eq!(after.created_at, before.created_at);
}

#[test]
fn edit_rejects_non_positive_amount() {
    let conn = setup();
    let id = record(&conn, "expense", "Food", "10", "2024-05-02");
    let m = group(&["spendwise", "tx", "edit", "--id", &id, "--amount=-3"]);
    assert!(transactions::handle(&conn, &m).is_err());
    assert_eq!(db::find_transaction(&conn, &id).unwrap().amount, Decimal::from(10));
}

#[test]
fn rm_deletes_and_errors_on_unknown_id() {
    let conn = setup();
    let id = record(&conn, "income", "Salary", "100", "2024-05-01");
    transactions::handle(&conn, &group(&["spendwise", "tx", "rm", "--id", &id])).unwrap();
    assert!(db::find_transaction(&conn, &id).is_err());
    assert!(transactions::handle(&conn, &group(&["spendwise", "tx", "rm", "--id", &id])).is_err());
}
