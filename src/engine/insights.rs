// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Rule-based advisory insights.
//!
//! Each [`InsightRule`] looks at the same inputs and contributes at most one
//! [`Insight`]. Rules run in [`RULES`] order, so output order is fixed.

use rust_decimal::Decimal;
use serde::Serialize;

use super::aggregation::{Kpis, NO_CATEGORY};
use super::plain_amount;
use crate::models::BudgetThresholds;

/// Transaction count above which the volume rule fires.
pub const HIGH_VOLUME_COUNT: usize = 20;

const SAVINGS_RATE: Decimal = Decimal::from_parts(10, 0, 0, false, 2);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightKind {
    Warning,
    Success,
    Info,
}

impl InsightKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            InsightKind::Warning => "warning",
            InsightKind::Success => "success",
            InsightKind::Info => "info",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Insight {
    pub rule: InsightRule,
    pub kind: InsightKind,
    pub title: String,
    pub message: String,
    /// Numeric payload for ordering (deficit, overage, estimate, count).
    pub amount: Option<Decimal>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightRule {
    Overspend,
    TopCategoryOverBudget,
    SavingsOpportunity,
    NoSpend,
    HighVolume,
}

pub const RULES: [InsightRule; 5] = [
    InsightRule::Overspend,
    InsightRule::TopCategoryOverBudget,
    InsightRule::SavingsOpportunity,
    InsightRule::NoSpend,
    InsightRule::HighVolume,
];

impl InsightRule {
    pub fn as_str(&self) -> &'static str {
        match self {
            InsightRule::Overspend => "overspend",
            InsightRule::TopCategoryOverBudget => "top_category_over_budget",
            InsightRule::SavingsOpportunity => "savings_opportunity",
            InsightRule::NoSpend => "no_spend",
            InsightRule::HighVolume => "high_volume",
        }
    }

    pub fn evaluate(&self, kpis: &Kpis, thresholds: &BudgetThresholds) -> Option<Insight> {
        match self {
            InsightRule::Overspend => {
                if kpis.expenses <= kpis.income {
                    return None;
                }
                let deficit = kpis.expenses - kpis.income;
                Some(self.build(
                    InsightKind::Warning,
                    "Expenses Exceed Income".into(),
                    format!(
                        "You spent {} more than you earned in this period.",
                        plain_amount(deficit)
                    ),
                    Some(deficit),
                ))
            }
            InsightRule::TopCategoryOverBudget => {
                if kpis.top_category == NO_CATEGORY {
                    return None;
                }
                let budget = thresholds.get(&kpis.top_category).unwrap_or(Decimal::ZERO);
                if kpis.top_category_amount <= budget {
                    return None;
                }
                let overage = kpis.top_category_amount - budget;
                Some(self.build(
                    InsightKind::Warning,
                    format!("{} Over Budget", kpis.top_category),
                    format!(
                        "Your top category {} is {} over its budget of {}.",
                        kpis.top_category,
                        plain_amount(overage),
                        plain_amount(budget)
                    ),
                    Some(overage),
                ))
            }
            InsightRule::SavingsOpportunity => {
                if kpis.avg_expense <= Decimal::ZERO {
                    return None;
                }
                let estimate = kpis.avg_expense * SAVINGS_RATE;
                Some(self.build(
                    InsightKind::Success,
                    "Savings Opportunity".into(),
                    format!(
                        "Trimming 10% off your average expense would save about {} \
                         per transaction.",
                        plain_amount(estimate)
                    ),
                    Some(estimate),
                ))
            }
            InsightRule::NoSpend => {
                if !kpis.expenses.is_zero() || kpis.income <= Decimal::ZERO {
                    return None;
                }
                Some(self.build(
                    InsightKind::Info,
                    "No Spending Yet".into(),
                    "You have income and no expenses this period. Keep it up!".into(),
                    None,
                ))
            }
            InsightRule::HighVolume => {
                if kpis.transaction_count <= HIGH_VOLUME_COUNT {
                    return None;
                }
                Some(self.build(
                    InsightKind::Info,
                    "High Transaction Volume".into(),
                    format!(
                        "You have {} transactions this period. Monitor for unusual patterns.",
                        kpis.transaction_count
                    ),
                    Some(Decimal::from(kpis.transaction_count)),
                ))
            }
        }
    }

    fn build(
        &self,
        kind: InsightKind,
        title: String,
        message: String,
        amount: Option<Decimal>,
    ) -> Insight {
        Insight {
            rule: *self,
            kind,
            title,
            message,
            amount,
        }
    }
}

pub fn generate_insights(kpis: &Kpis, thresholds: &BudgetThresholds) -> Vec<Insight> {
    RULES
        .iter()
        .filter_map(|rule| rule.evaluate(kpis, thresholds))
        .collect()
}
