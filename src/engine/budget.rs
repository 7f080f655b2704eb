// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Spend-vs-threshold status per budgeted category.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use super::window::Window;
use super::{admitted_in, plain_amount};
use crate::models::{BudgetThresholds, Transaction, TxKind};

const WARNING_PERCENT: Decimal = Decimal::from_parts(80, 0, 0, false, 0);
const OVER_PERCENT: Decimal = Decimal::ONE_HUNDRED;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetState {
    Under,
    Warning,
    Over,
}

impl BudgetState {
    pub fn from_percent(percent_used: Decimal) -> Self {
        if percent_used >= OVER_PERCENT {
            BudgetState::Over
        } else if percent_used >= WARNING_PERCENT {
            BudgetState::Warning
        } else {
            BudgetState::Under
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BudgetState::Under => "under",
            BudgetState::Warning => "warning",
            BudgetState::Over => "over",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetStatus {
    pub category: String,
    pub budget: Decimal,
    pub spent: Decimal,
    pub remaining: Decimal,
    pub percent_used: Decimal,
    pub state: BudgetState,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetAlert {
    pub category: String,
    pub state: BudgetState,
    pub message: String,
}

pub fn spending_for_category(
    category: &str,
    transactions: &[Transaction],
    window: &Window,
) -> Decimal {
    admitted_in(transactions, window)
        .filter(|tx| tx.kind == TxKind::Expense && tx.category == category)
        .map(|tx| tx.amount)
        .fold(Decimal::ZERO, Decimal::saturating_add)
}

/// One status per threshold entry, in threshold order. Categories without a
/// threshold are not reported.
pub fn status_for_all(
    thresholds: &BudgetThresholds,
    transactions: &[Transaction],
    window: &Window,
) -> Vec<BudgetStatus> {
    thresholds
        .iter()
        .map(|(category, budget)| {
            let spent = spending_for_category(category, transactions, window);
            let percent_used = percent_of(spent, budget);
            BudgetStatus {
                category: category.to_string(),
                budget,
                spent,
                remaining: budget - spent,
                percent_used,
                state: BudgetState::from_percent(percent_used),
            }
        })
        .collect()
}

/// `spent` as a percentage of `budget`. A zero budget reads as 0%; a ratio
/// past the decimal range saturates, which still classifies as over.
fn percent_of(spent: Decimal, budget: Decimal) -> Decimal {
    if budget.is_zero() {
        return Decimal::ZERO;
    }
    spent
        .checked_div(budget)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .unwrap_or(Decimal::MAX)
}

pub fn alerts(
    thresholds: &BudgetThresholds,
    transactions: &[Transaction],
    window: &Window,
) -> Vec<BudgetAlert> {
    status_for_all(thresholds, transactions, window)
        .into_iter()
        .filter_map(|s| {
            let message = match s.state {
                BudgetState::Under => return None,
                BudgetState::Over => format!(
                    "{} exceeded budget by {}",
                    s.category,
                    plain_amount(s.spent - s.budget)
                ),
                BudgetState::Warning => format!(
                    "{} at {}% of budget",
                    s.category,
                    s.percent_used
                        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
                        .normalize()
                ),
            };
            Some(BudgetAlert {
                category: s.category,
                state: s.state,
                message,
            })
        })
        .collect()
}
