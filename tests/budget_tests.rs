// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

mod common;

use common::{group, leaf, may_2024, setup};
use rusqlite::Connection;
use rust_decimal::Decimal;
use spendwise::{commands::budgets, db, engine::BudgetState, repository::TransactionRepository};

#[test]
fn status_and_alerts_for_month() {
    let conn = may_2024();
    db::set_threshold(&conn, "Food", Decimal::from(100)).unwrap();
    db::set_threshold(&conn, "Bills", Decimal::from(600)).unwrap();
    db::set_threshold(&conn, "Travel", Decimal::from(400)).unwrap();

    let status = budgets::compute_status(
        &conn,
        &leaf(&["spendwise", "budget", "status", "--month", "2024-05"]),
    )
    .unwrap();
    let cats: Vec<&str> = status.iter().map(|s| s.category.as_str()).collect();
    assert_eq!(cats, ["Food", "Bills", "Travel"]);
    assert_eq!(status[0].spent, Decimal::from(120));
    assert_eq!(status[0].state, BudgetState::Over);
    assert_eq!(status[1].state, BudgetState::Warning);
    assert_eq!(status[2].state, BudgetState::Under);

    let alerts = budgets::compute_alerts(
        &conn,
        &leaf(&["spendwise", "budget", "alerts", "--month", "2024-05"]),
    )
    .unwrap();
    let messages: Vec<&str> = alerts.iter().map(|a| a.message.as_str()).collect();
    assert_eq!(messages, ["Food exceeded budget by 20", "Bills at 83% of budget"]);
}

#[test]
fn other_month_has_no_spend() {
    let conn = may_2024();
    db::set_threshold(&conn, "Food", Decimal::from(100)).unwrap();
    let alerts = budgets::compute_alerts(
        &conn,
        &leaf(&["spendwise", "budget", "alerts", "--month", "2024-06"]),
    )
    .unwrap();
    assert!(alerts.is_empty());
}

fn set_budget(conn: &Connection, category: &str, amount: &str) -> anyhow::Result<()> {
    let amount = format!("--amount={}", amount);
    let m = group(&["spendwise", "budget", "set", "--category", category, &amount]);
    budgets::handle(conn, &m)
}

#[test]
fn set_updates_in_place_and_rejects_negative() {
    let conn = setup();
    set_budget(&conn, "Food", "300").unwrap();
    set_budget(&conn, "Bills", "500").unwrap();
    set_budget(&conn, "Food", "250").unwrap();
    assert!(set_budget(&conn, "Food", "-1").is_err());

    let thresholds = db::SqliteRepository::new(&conn).load_thresholds().unwrap();
    let v = thresholds.into_vec();
    assert_eq!(
        v,
        vec![
            ("Food".to_string(), Decimal::from(250)),
            ("Bills".to_string(), Decimal::from(500)),
        ]
    );
}

#[test]
fn rm_unknown_budget_errors() {
    let conn = setup();
    let m = group(&["spendwise", "budget", "rm", "--category", "Food"]);
    assert!(budgets::handle(&conn, &m).is_err());
}

#[test]
fn spent_for_one_category_and_month() {
    let conn = may_2024();
    let may = leaf(&["spendwise", "budget", "spent", "--category", "Food", "--month", "2024-05"]);
    assert_eq!(budgets::compute_spent(&conn, &may).unwrap(), Decimal::from(120));

    let june = leaf(&["spendwise", "budget", "spent", "--category", "Food", "--month", "2024-06"]);
    assert_eq!(budgets::compute_spent(&conn, &june).unwrap(), Decimal::ZERO);

    let salary = leaf(&[
        "spendwise", "budget", "spent", "--category", "Salary", "--month", "2024-05",
    ]);
    assert_eq!(budgets::compute_spent(&conn, &salary).unwrap(), Decimal::ZERO);
}

#[test]
fn tiny_budget_is_reported_over_without_panicking() {
    let conn = may_2024();
    set_budget(&conn, "Food", "0.0000000000000000000000000001").unwrap();
    let alerts = budgets::compute_alerts(
        &conn,
        &leaf(&["spendwise", "budget", "alerts", "--month", "2024-05"]),
    )
    .unwrap();
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].state, BudgetState::Over);
}

#[test]
fn bad_month_is_an_error() {
    let conn = setup();
    let m = leaf(&["spendwise", "budget", "status", "--month", "May"]);
    assert!(budgets::compute_status(&conn, &m).is_err());
}
