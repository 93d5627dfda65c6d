// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use spendlog::catalog::Catalog;
use spendlog::filter::TransactionFilter;
use spendlog::models::{MonthRef, Transaction, TxType};

fn tx(id: &str, t: TxType, cat: &str, date: &str, note: Option<&str>) -> Transaction {
    Transaction {
        id: id.into(),
        amount: Decimal::from(10),
        r#type: t,
        category_id: cat.into(),
        date: NaiveDate::parse_from_str(date, "%Y-%m-%d").ok(),
        note: note.map(String::from),
        created_at: None,
    }
}

fn ledger() -> Vec<Transaction> {
    vec![
        tx("a", TxType::Expense, "food", "2025-03-30", Some("Pizza night")),
        tx("b", TxType::Income, "salary", "2025-03-01", None),
        tx("c", TxType::Expense, "transport", "2025-03-12", Some("Metro card")),
        tx("d", TxType::Expense, "food", "2025-02-27", Some("pizza again")),
        tx("e", TxType::Expense, "food", "2024-03-15", None),
        tx("f", TxType::Expense, "ghost", "2025-03-05", Some("mystery")),
        tx("g", TxType::Expense, "food", "garbage", Some("pizza")),
    ]
}

fn ids(v: &[&Transaction]) -> Vec<String> {
    v.iter().map(|t| t.id.clone()).collect()
}

fn march() -> TransactionFilter {
    TransactionFilter::for_month(MonthRef::new(2025, 3).unwrap())
}

#[test]
fn month_only_keeps_ledger_order() {
    let l = ledger();
    let got = march().apply(&l, &Catalog::default());
    // same month of another year and undated records are excluded
    assert_eq!(ids(&got), vec!["a", "b", "c", "f"]);
}

#[test]
fn query_matches_note_or_category_name_case_insensitively() {
    let l = ledger();
    let catalog = Catalog::default();

    let mut f = march();
    f.query = "PIZZA".into();
    assert_eq!(ids(&f.apply(&l, &catalog)), vec!["a"]);

    f.query = "dining".into();
    assert_eq!(ids(&f.apply(&l, &catalog)), vec!["a"]);

    f.query = "unknown".into();
    assert_eq!(ids(&f.apply(&l, &catalog)), vec!["f"]);

    f.query = "sal".into();
    assert_eq!(ids(&f.apply(&l, &catalog)), vec!["b"]);
}

#[test]
fn category_and_type_criteria() {
    let l = ledger();
    let catalog = Catalog::default();

    let mut f = march();
    f.category = Some("transport".into());
    assert_eq!(ids(&f.apply(&l, &catalog)), vec!["c"]);

    let mut f = march();
    f.r#type = Some(TxType::Income);
    assert_eq!(ids(&f.apply(&l, &catalog)), vec!["b"]);

    let mut f = march();
    f.r#type = Some(TxType::Expense);
    f.category = Some("food".into());
    f.query = "night".into();
    assert_eq!(ids(&f.apply(&l, &catalog)), vec!["a"]);
}

#[test]
fn applying_twice_is_idempotent() {
    let l = ledger();
    let catalog = Catalog::default();
    let mut f = march();
    f.r#type = Some(TxType::Expense);

    let once: Vec<Transaction> = f.apply(&l, &catalog).into_iter().cloned().collect();
    let twice: Vec<Transaction> = f.apply(&once, &catalog).into_iter().cloned().collect();
    assert_eq!(once, twice);
    assert_eq!(once.len(), 3);
}
