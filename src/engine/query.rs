// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use super::admitted;
use crate::models::{Transaction, TxKind};

/// Optional predicates, AND-combined. `None` (or a blank string) leaves a
/// dimension unconstrained.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterCriteria {
    pub text: Option<String>,
    pub kind: Option<TxKind>,
    pub category: Option<String>,
    pub min_amount: Option<Decimal>,
    pub max_amount: Option<Decimal>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryResult {
    pub transactions: Vec<Transaction>,
    /// Signed sum: income adds, expense subtracts.
    pub total: Decimal,
}

impl FilterCriteria {
    pub fn matches(&self, tx: &Transaction) -> bool {
        if let Some(needle) = non_blank(&self.text).map(|s| s.to_lowercase()) {
            let in_note = tx
                .note
                .as_deref()
                .is_some_and(|n| n.to_lowercase().contains(&needle));
            if !in_note && !tx.category.to_lowercase().contains(&needle) {
                return false;
            }
        }
        if self.kind.is_some_and(|k| k != tx.kind) {
            return false;
        }
        if non_blank(&self.category).is_some_and(|c| c != tx.category) {
            return false;
        }
        if tx.amount < self.min_amount.unwrap_or(Decimal::ZERO) {
            return false;
        }
        if self.max_amount.is_some_and(|max| tx.amount > max) {
            return false;
        }
        if self.start_date.is_some_and(|start| tx.date < start) {
            return false;
        }
        if self.end_date.is_some_and(|end| tx.date > end) {
            return false;
        }
        true
    }
}

fn non_blank(s: &Option<String>) -> Option<&str> {
    s.as_deref().filter(|s| !s.is_empty())
}

/// Matching records, most recent first. Same-day records keep their
/// snapshot order.
pub fn filter(transactions: &[Transaction], criteria: &FilterCriteria) -> QueryResult {
    let mut matched: Vec<Transaction> = admitted(transactions)
        .filter(|tx| criteria.matches(tx))
        .cloned()
        .collect();
    matched.sort_by(|a, b| b.date.cmp(&a.date));
    let total = matched
        .iter()
        .map(Transaction::signed_amount)
        .fold(Decimal::ZERO, Decimal::saturating_add);
    QueryResult {
        transactions: matched,
        total,
    }
}
