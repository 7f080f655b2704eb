// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use uuid::Uuid;

use crate::error::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxKind {
    Income,
    Expense,
}

impl TxKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TxKind::Income => "income",
            TxKind::Expense => "expense",
        }
    }
}

impl fmt::Display for TxKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TxKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "income" => Ok(TxKind::Income),
            "expense" => Ok(TxKind::Expense),
            other => Err(ValidationError::UnknownType(other.to_string())),
        }
    }
}

/// A recorded income or expense. Never mutated in place; edits go through
/// [`Transaction::replaced_with`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: TxKind,
    pub category: String,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    /// Whether the record still satisfies the entry invariants. Persisted data
    /// can drift, so readers check this instead of trusting the store.
    pub fn is_valid(&self) -> bool {
        self.amount > Decimal::ZERO && !self.category.trim().is_empty()
    }

    /// Amount with income positive and expense negative.
    pub fn signed_amount(&self) -> Decimal {
        match self.kind {
            TxKind::Income => self.amount,
            TxKind::Expense => -self.amount,
        }
    }

    /// New record carrying this one's id and creation time.
    pub fn replaced_with(&self, edit: NewTransaction) -> Result<Transaction, ValidationError> {
        let mut tx = edit.validate()?;
        tx.id = self.id.clone();
        tx.created_at = self.created_at;
        Ok(tx)
    }
}

/// Unvalidated input from the entry path (CLI flags, import rows).
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub kind: TxKind,
    pub category: String,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub note: Option<String>,
}

impl NewTransaction {
    pub fn parse(
        kind: &str,
        category: &str,
        amount: &str,
        date: &str,
        note: Option<&str>,
    ) -> Result<Self, ValidationError> {
        let kind = kind.parse::<TxKind>()?;
        let amount = amount
            .trim()
            .parse::<Decimal>()
            .map_err(|_| ValidationError::InvalidAmount(amount.trim().to_string()))?;
        let date = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
            .map_err(|_| ValidationError::InvalidDate(date.trim().to_string()))?;
        Ok(Self {
            kind,
            category: category.to_string(),
            amount,
            date,
            note: note.map(|s| s.to_string()),
        })
    }

    /// Checks the invariants and issues a fresh id.
    pub fn validate(self) -> Result<Transaction, ValidationError> {
        let category = self.category.trim().to_string();
        if category.is_empty() {
            return Err(ValidationError::MissingCategory);
        }
        if self.amount <= Decimal::ZERO {
            return Err(ValidationError::NonPositiveAmount(self.amount));
        }
        let note = self
            .note
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());
        Ok(Transaction {
            id: Uuid::new_v4().to_string(),
            kind: self.kind,
            category,
            amount: self.amount,
            date: self.date,
            note,
            created_at: Utc::now(),
        })
    }
}

/// Category-keyed amounts iterating in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryMap {
    entries: Vec<(String, Decimal)>,
    index: HashMap<String, usize>,
}

/// Budget thresholds per category. A missing entry means no budget was set.
pub type BudgetThresholds = CategoryMap;

impl CategoryMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the amount; an existing category keeps its position.
    pub fn set(&mut self, category: &str, amount: Decimal) {
        match self.index.get(category) {
            Some(&i) => self.entries[i].1 = amount,
            None => {
                self.index.insert(category.to_string(), self.entries.len());
                self.entries.push((category.to_string(), amount));
            }
        }
    }

    /// Accumulates into the category, saturating at the decimal range.
    pub fn add(&mut self, category: &str, amount: Decimal) {
        match self.index.get(category) {
            Some(&i) => self.entries[i].1 = self.entries[i].1.saturating_add(amount),
            None => {
                self.index.insert(category.to_string(), self.entries.len());
                self.entries.push((category.to_string(), amount));
            }
        }
    }

    pub fn get(&self, category: &str) -> Option<Decimal> {
        self.index.get(category).map(|&i| self.entries[i].1)
    }

    pub fn remove(&mut self, category: &str) -> Option<Decimal> {
        let i = self.index.remove(category)?;
        let (_, amount) = self.entries.remove(i);
        for slot in self.index.values_mut() {
            if *slot > i {
                *slot -= 1;
            }
        }
        Some(amount)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Decimal)> {
        self.entries.iter().map(|(c, a)| (c.as_str(), *a))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_vec(self) -> Vec<(String, Decimal)> {
        self.entries
    }
}

impl<S: AsRef<str>> FromIterator<(S, Decimal)> for CategoryMap {
    fn from_iter<I: IntoIterator<Item = (S, Decimal)>>(iter: I) -> Self {
        let mut map = CategoryMap::new();
        for (category, amount) in iter {
            map.set(category.as_ref(), amount);
        }
        map
    }
}

impl Serialize for CategoryMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (category, amount) in &self.entries {
            map.serialize_entry(category, amount)?;
        }
        map.end()
    }
}
