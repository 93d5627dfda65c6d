// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::catalog::Catalog;
use crate::models::{MonthRef, Transaction, TxType};
use rust_decimal::Decimal;
use serde::Serialize;

pub const TREND_MONTHS: u32 = 6;
pub const LEGEND_SIZE: usize = 5;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub income: Decimal,
    pub expenses: Decimal,
    pub balance: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryTotal {
    pub id: String,
    pub name: String,
    pub color: String,
    pub value: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrendPoint {
    #[serde(skip)]
    pub month: MonthRef,
    pub label: &'static str,
    pub income: Decimal,
    pub expenses: Decimal,
}

pub fn summarize<'a, I>(txs: I) -> Summary
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let (income, expenses) =
        txs.into_iter()
            .fold((Decimal::ZERO, Decimal::ZERO), |(inc, exp), tx| match tx.r#type {
                TxType::Income => (inc + tx.amount, exp),
                TxType::Expense => (inc, exp + tx.amount),
                TxType::Unknown => (inc, exp),
            });
    Summary {
        income,
        expenses,
        balance: income - expenses,
    }
}

/// Expense totals per catalog category, largest first, zero totals dropped.
pub fn category_breakdown<'a, I>(txs: I, catalog: &Catalog) -> Vec<CategoryTotal>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let expenses: Vec<&Transaction> = txs
        .into_iter()
        .filter(|tx| tx.r#type == TxType::Expense)
        .collect();
    let mut totals: Vec<CategoryTotal> = catalog
        .categories()
        .iter()
        .map(|c| CategoryTotal {
            id: c.id.clone(),
            name: c.name.clone(),
            color: c.color.clone(),
            value: expenses
                .iter()
                .filter(|tx| tx.category_id == c.id)
                .map(|tx| tx.amount)
                .sum(),
        })
        .filter(|t| !t.value.is_zero())
        .collect();
    // stable: ties keep catalog order
    totals.sort_by(|a, b| b.value.cmp(&a.value));
    totals
}

pub fn legend(breakdown: &[CategoryTotal]) -> &[CategoryTotal] {
    &breakdown[..breakdown.len().min(LEGEND_SIZE)]
}

/// Income and expenses for the six months ending with `current`, oldest first.
///
/// Always runs over the whole ledger, independent of the displayed filters.
pub fn six_month_trend(ledger: &[Transaction], current: MonthRef) -> Vec<TrendPoint> {
    (0..TREND_MONTHS)
        .rev()
        .map(|i| {
            let month = current.months_before(i);
            let mut point = TrendPoint {
                month,
                label: month.short_label(),
                income: Decimal::ZERO,
                expenses: Decimal::ZERO,
            };
            for tx in ledger
                .iter()
                .filter(|tx| tx.date.is_some_and(|d| month.contains(d)))
            {
                match tx.r#type {
                    TxType::Income => point.income += tx.amount,
                    TxType::Expense => point.expenses += tx.amount,
                    TxType::Unknown => {}
                }
            }
            point
        })
        .collect()
}
