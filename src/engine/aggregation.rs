// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! KPIs, category breakdowns, and trend series.

use std::str::FromStr;

use chrono::{Datelike, Duration, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;

use super::window::{month_start, week_start, Window};
use super::{admitted, admitted_in};
use crate::models::{CategoryMap, Transaction, TxKind};

/// Shown as the top category when the window has no expenses.
pub const NO_CATEGORY: &str = "—";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Kpis {
    pub income: Decimal,
    pub expenses: Decimal,
    pub balance: Decimal,
    pub transaction_count: usize,
    pub avg_expense: Decimal,
    pub top_category: String,
    pub top_category_amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryAmount {
    pub category: String,
    pub amount: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Granularity {
    Week,
    Month,
}

impl FromStr for Granularity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "week" => Ok(Granularity::Week),
            "month" => Ok(Granularity::Month),
            other => Err(format!("Unknown granularity '{}', expected week|month", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendBucket {
    pub label: String,
    pub start: NaiveDate,
    pub income: Decimal,
    pub expense: Decimal,
}

pub fn compute_kpis(transactions: &[Transaction], window: &Window) -> Kpis {
    let mut income = Decimal::ZERO;
    let mut expenses = Decimal::ZERO;
    let mut count = 0usize;
    let mut expense_count = 0usize;
    let mut by_category = CategoryMap::new();

    for tx in admitted_in(transactions, window) {
        count += 1;
        match tx.kind {
            TxKind::Income => income = income.saturating_add(tx.amount),
            TxKind::Expense => {
                expenses = expenses.saturating_add(tx.amount);
                expense_count += 1;
                by_category.add(&tx.category, tx.amount);
            }
        }
    }

    let avg_expense = if expense_count == 0 {
        Decimal::ZERO
    } else {
        expenses / Decimal::from(expense_count)
    };

    // Only a strictly larger sum takes the lead, so ties go to the first seen.
    let mut top_category = NO_CATEGORY.to_string();
    let mut top_category_amount = Decimal::ZERO;
    for (category, amount) in by_category.iter() {
        if amount > top_category_amount {
            top_category = category.to_string();
            top_category_amount = amount;
        }
    }

    Kpis {
        income,
        expenses,
        balance: income - expenses,
        transaction_count: count,
        avg_expense,
        top_category,
        top_category_amount,
    }
}

/// Expense totals per category, largest first. Ties keep discovery order.
pub fn category_breakdown(transactions: &[Transaction], window: &Window) -> Vec<CategoryAmount> {
    let mut by_category = CategoryMap::new();
    for tx in admitted_in(transactions, window).filter(|tx| tx.kind == TxKind::Expense) {
        by_category.add(&tx.category, tx.amount);
    }
    let mut items: Vec<CategoryAmount> = by_category
        .into_vec()
        .into_iter()
        .map(|(category, amount)| CategoryAmount { category, amount })
        .collect();
    items.sort_by(|a, b| b.amount.cmp(&a.amount));
    items
}

/// `bucket_count` consecutive buckets ending with the one containing
/// `anchor`, oldest first. Records outside the covered range are ignored.
pub fn trend_series(
    transactions: &[Transaction],
    granularity: Granularity,
    bucket_count: usize,
    anchor: NaiveDate,
) -> Vec<TrendBucket> {
    let starts = bucket_starts(granularity, bucket_count, anchor);
    let mut buckets: Vec<TrendBucket> = starts
        .iter()
        .map(|&start| TrendBucket {
            label: bucket_label(granularity, start),
            start,
            income: Decimal::ZERO,
            expense: Decimal::ZERO,
        })
        .collect();

    for tx in admitted(transactions) {
        let key = bucket_key(granularity, tx.date);
        if let Ok(i) = starts.binary_search(&key) {
            let b = &mut buckets[i];
            match tx.kind {
                TxKind::Income => b.income = b.income.saturating_add(tx.amount),
                TxKind::Expense => b.expense = b.expense.saturating_add(tx.amount),
            }
        }
    }
    buckets
}

fn bucket_key(granularity: Granularity, date: NaiveDate) -> NaiveDate {
    match granularity {
        Granularity::Week => week_start(date),
        Granularity::Month => month_start(date),
    }
}

fn bucket_label(granularity: Granularity, start: NaiveDate) -> String {
    match granularity {
        Granularity::Week => start.format("%b %-d").to_string(),
        Granularity::Month => start.format("%Y-%m").to_string(),
    }
}

fn bucket_starts(
    granularity: Granularity,
    bucket_count: usize,
    anchor: NaiveDate,
) -> Vec<NaiveDate> {
    let last = bucket_key(granularity, anchor);
    (0..bucket_count)
        .rev()
        .filter_map(|back| match granularity {
            Granularity::Week => last.checked_sub_signed(Duration::weeks(back as i64)),
            Granularity::Month => shift_months(last, -(back as i64)),
        })
        .collect()
}

fn shift_months(first_of_month: NaiveDate, delta: i64) -> Option<NaiveDate> {
    let idx = first_of_month.year() as i64 * 12 + first_of_month.month0() as i64 + delta;
    let year = i32::try_from(idx.div_euclid(12)).ok()?;
    NaiveDate::from_ymd_opt(year, idx.rem_euclid(12) as u32 + 1, 1)
}
