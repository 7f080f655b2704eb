// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

mod common;

use common::{leaf, may_2024, record, setup};
use rust_decimal::Decimal;
use spendwise::{
    commands::{reports, search},
    db,
    engine::{InsightKind, InsightRule},
};

#[test]
fn insights_for_may() {
    let conn = may_2024();
    db::set_threshold(&conn, "Bills", Decimal::from(400)).unwrap();
    let m = leaf(&[
        "spendwise", "report", "insights", "--from", "2024-05-01", "--to", "2024-05-31",
    ]);
    let insights = reports::compute_insights(&conn, &m).unwrap();
    let rules: Vec<InsightRule> = insights.iter().map(|i| i.rule).collect();
    assert_eq!(
        rules,
        [InsightRule::TopCategoryOverBudget, InsightRule::SavingsOpportunity]
    );
    assert_eq!(insights[0].kind, InsightKind::Warning);
    assert_eq!(insights[0].title, "Bills Over Budget");
    assert_eq!(insights[0].amount, Some(Decimal::from(100)));
    assert_eq!(insights[1].kind, InsightKind::Success);
}

#[test]
fn insights_flag_overspend_and_income_only() {
    let conn = setup();
    record(&conn, "income", "Salary", "100", "2024-05-01");
    record(&conn, "expense", "Food", "150", "2024-05-02");
    record(&conn, "income", "Salary", "100", "2024-06-01");

    let may = reports::compute_insights(
        &conn,
        &leaf(&["spendwise", "report", "insights", "--from", "2024-05-01", "--to", "2024-05-31"]),
    )
    .unwrap();
    assert_eq!(may[0].rule, InsightRule::Overspend);
    assert_eq!(may[0].amount, Some(Decimal::from(50)));

    let june = reports::compute_insights(
        &conn,
        &leaf(&["spendwise", "report", "insights", "--from", "2024-06-01", "--to", "2024-06-30"]),
    )
    .unwrap();
    assert_eq!(june.len(), 1);
    assert_eq!(june[0].rule, InsightRule::NoSpend);
}

#[test]
fn window_bounds_must_come_in_pairs() {
    let conn = may_2024();
    let m = leaf(&["spendwise", "report", "insights", "--from", "2024-05-01"]);
    assert!(reports::compute_insights(&conn, &m).is_err());
}

#[test]
fn search_expenses_over_sixty() {
    let conn = may_2024();
    let m = leaf(&["spendwise", "search", "--type", "expense", "--min", "60"]);
    let result = search::run(&conn, &m).unwrap();
    let cats: Vec<&str> = result.transactions.iter().map(|t| t.category.as_str()).collect();
    assert_eq!(cats, ["Bills", "Food"]);
    assert_eq!(result.total, Decimal::from(-570));
}

#[test]
fn search_text_matches_category_case_insensitively() {
    let conn = may_2024();
    let result = search::run(&conn, &leaf(&["spendwise", "search", "--text", "FOO"])).unwrap();
    assert_eq!(result.transactions.len(), 2);
    assert_eq!(result.total, Decimal::from(-120));
}

#[test]
fn search_rejects_unknown_type() {
    let conn = may_2024();
    let m = leaf(&["spendwise", "search", "--type", "refund"]);
    assert!(search::run(&conn, &m).is_err());
}

#[test]
fn weekly_trend_ends_with_anchor_week() {
    let conn = may_2024();
    let m = leaf(&[
        "spendwise", "report", "trend", "--granularity", "week", "--buckets", "3", "--anchor",
        "2024-05-15",
    ]);
    let series = reports::compute_trend(&conn, &m).unwrap();
    let labels: Vec<&str> = series.iter().map(|b| b.label.as_str()).collect();
    assert_eq!(labels, ["Apr 28", "May 5", "May 12"]);
    // Salary on May 1 and Food 50 on May 2 fall in the week of Apr 28.
    assert_eq!(series[0].income, Decimal::from(3000));
    assert_eq!(series[0].expense, Decimal::from(50));
    assert_eq!(series[1].expense, Decimal::ZERO);
    assert_eq!(series[2].expense, Decimal::from(70));
}

#[test]
fn monthly_trend_defaults_to_twelve_buckets() {
    let conn = may_2024();
    let m = leaf(&["spendwise", "report", "trend", "--anchor", "2024-06-10"]);
    let series = reports::compute_trend(&conn, &m).unwrap();
    assert_eq!(series.len(), 12);
    assert_eq!(series[0].label, "2023-07");
    assert_eq!(series[11].label, "2024-06");
    assert_eq!(series[10].expense, Decimal::from(620));

    let weekly = leaf(&["spendwise", "report", "trend", "--granularity", "week"]);
    assert_eq!(reports::compute_trend(&conn, &weekly).unwrap().len(), 8);
}

#[test]
fn trend_rejects_unknown_granularity() {
    let conn = may_2024();
    let m = leaf(&["spendwise", "report", "trend", "--granularity", "day"]);
    assert!(reports::compute_trend(&conn, &m).is_err());
}
