// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Pure analytics over transaction snapshots.
//!
//! Every function borrows a snapshot and returns a freshly derived value.
//! Nothing here touches storage or the wall clock.

pub mod aggregation;
pub mod budget;
pub mod insights;
pub mod query;
pub mod window;

use rust_decimal::Decimal;

use crate::models::Transaction;

pub use aggregation::{
    CategoryAmount, Granularity, Kpis, NO_CATEGORY, TrendBucket, category_breakdown, compute_kpis,
    trend_series,
};
pub use budget::{
    BudgetAlert, BudgetState, BudgetStatus, alerts, spending_for_category, status_for_all,
};
pub use insights::{Insight, InsightKind, InsightRule, RULES, generate_insights};
pub use query::{FilterCriteria, QueryResult, filter};
pub use window::{Clock, FixedClock, Period, SystemClock, Window};

/// Records that still satisfy the entry invariants. Anything else is
/// skipped rather than failing the whole computation.
pub(crate) fn admitted(transactions: &[Transaction]) -> impl Iterator<Item = &Transaction> {
    transactions.iter().filter(|tx| {
        let ok = tx.is_valid();
        if !ok {
            tracing::debug!(id = %tx.id, "skipping transaction that fails invariants");
        }
        ok
    })
}

pub(crate) fn admitted_in<'a>(
    transactions: &'a [Transaction],
    window: &'a Window,
) -> impl Iterator<Item = &'a Transaction> {
    admitted(transactions).filter(move |tx| window.contains(tx.date))
}

/// Amount rendered with at most two decimals and no trailing zeros.
pub fn plain_amount(d: Decimal) -> String {
    d.round_dp(2).normalize().to_string()
}
