// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::catalog::Catalog;
use crate::models::{MonthRef, Transaction, TxType};

/// Criteria narrowing the ledger to the displayed month.
///
/// `category` and `r#type` of `None` mean "all".
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionFilter {
    pub month: MonthRef,
    pub query: String,
    pub category: Option<String>,
    pub r#type: Option<TxType>,
}

impl TransactionFilter {
    pub fn for_month(month: MonthRef) -> Self {
        TransactionFilter {
            month,
            query: String::new(),
            category: None,
            r#type: None,
        }
    }

    pub fn matches(&self, tx: &Transaction, catalog: &Catalog) -> bool {
        let in_month = tx.date.is_some_and(|d| self.month.contains(d));
        in_month
            && self.matches_query(tx, catalog)
            && self.category.as_deref().is_none_or(|c| c == tx.category_id)
            && self.r#type.is_none_or(|t| t == tx.r#type)
    }

    fn matches_query(&self, tx: &Transaction, catalog: &Catalog) -> bool {
        if self.query.is_empty() {
            return true;
        }
        let needle = self.query.to_lowercase();
        let in_note = tx
            .note
            .as_deref()
            .is_some_and(|n| n.to_lowercase().contains(&needle));
        in_note || catalog.name_of(&tx.category_id).to_lowercase().contains(&needle)
    }

    /// Ordered subsequence of `ledger` matching every criterion.
    pub fn apply<'a>(&self, ledger: &'a [Transaction], catalog: &Catalog) -> Vec<&'a Transaction> {
        ledger.iter().filter(|tx| self.matches(tx, catalog)).collect()
    }
}
