// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use crate::models::{BudgetThresholds, Transaction};

/// Read side of the transaction store. Each call returns a complete
/// snapshot in a stable order.
pub trait TransactionRepository {
    fn load(&self) -> Result<Vec<Transaction>>;

    fn load_thresholds(&self) -> Result<BudgetThresholds>;
}
