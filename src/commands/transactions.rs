// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db;
use crate::errors::LedgerError;
use crate::ledger::LedgerStore;
use crate::models::{Transaction, TransactionDraft, TxType};
use crate::utils::{
    filter_from_args, fmt_money, maybe_print_json, parse_amount, parse_date, pretty_table, today,
};
use anyhow::{Result, anyhow};
use chrono::Utc;
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde::Serialize;

pub fn handle(conn: &Connection, store: &mut LedgerStore, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, store, sub)?,
        Some(("edit", sub)) => edit(conn, store, sub)?,
        Some(("rm", sub)) => remove(conn, store, sub)?,
        Some(("undo", _)) => undo(conn, store)?,
        Some(("list", sub)) => list(conn, store, sub)?,
        _ => {}
    }
    Ok(())
}

/// Turns the entry form flags into a draft, falling back to `base` for omitted fields.
pub fn draft_from_args(
    store: &LedgerStore,
    sub: &clap::ArgMatches,
    base: Option<&Transaction>,
) -> Result<TransactionDraft> {
    let r#type = match sub.get_one::<String>("type") {
        Some(t) => t.parse::<TxType>()?,
        None => base.map(|b| b.r#type).unwrap_or(TxType::Expense),
    };
    let amount = match sub.get_one::<String>("amount") {
        Some(a) => parse_amount(a),
        None => base.map(|b| b.amount),
    };
    let catalog = store.catalog();
    let category_id = match sub.get_one::<String>("category") {
        Some(key) => catalog
            .lookup(key)
            .map(|c| c.id.clone())
            .ok_or_else(|| LedgerError::UnknownCategory(key.trim().to_string()))?,
        None => match base {
            Some(b) => b.category_id.clone(),
            None => catalog
                .default_for(r#type)
                .map(|c| c.id.clone())
                .ok_or_else(|| anyhow!("No {} category in the catalog", r#type))?,
        },
    };
    if let Some(cat) = catalog.get(&category_id) {
        if !cat.kind.accepts(r#type) {
            tracing::warn!(category = %cat.name, kind = %cat.kind, tx_type = %r#type, "category kind does not match transaction type");
        }
    }
    let date = match sub.get_one::<String>("date") {
        Some(d) => parse_date(d)?,
        None => base.and_then(|b| b.date).unwrap_or_else(today),
    };
    let note = match sub.get_one::<String>("note") {
        Some(n) => Some(n.clone()),
        None => base.and_then(|b| b.note.clone()),
    };
    Ok(TransactionDraft {
        amount,
        r#type,
        category_id,
        date,
        note,
    })
}

fn add(conn: &Connection, store: &mut LedgerStore, sub: &clap::ArgMatches) -> Result<()> {
    let draft = draft_from_args(store, sub, None)?;
    let ccy = db::get_currency(conn)?;
    let tx = store.add(draft, Utc::now())?.clone();
    store.commit(conn)?;
    println!(
        "Recorded {} {} on {} ({}) [{}]",
        tx.r#type,
        fmt_money(&tx.amount, &ccy),
        display_date(&tx),
        store.catalog().name_of(&tx.category_id),
        tx.id
    );
    Ok(())
}

fn edit(conn: &Connection, store: &mut LedgerStore, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub.get_one::<String>("id").map(|s| s.trim()).unwrap_or_default();
    let base = store
        .get(id)
        .cloned()
        .ok_or_else(|| LedgerError::NotFound(id.to_string()))?;
    let draft = draft_from_args(store, sub, Some(&base))?;
    store.edit(id, draft)?;
    store.commit(conn)?;
    println!("Updated transaction {}", id);
    Ok(())
}

fn remove(conn: &Connection, store: &mut LedgerStore, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub.get_one::<String>("id").map(|s| s.trim()).unwrap_or_default();
    let removed = store.delete(id, Utc::now())?.clone();
    store.commit(conn)?;
    println!(
        "Deleted {} {} on {}. Run `spendlog tx undo` within a few seconds to restore it.",
        removed.r#type,
        removed.amount,
        display_date(&removed)
    );
    Ok(())
}

fn undo(conn: &Connection, store: &mut LedgerStore) -> Result<()> {
    let restored = store.undo(Utc::now()).map(|tx| tx.id.clone());
    match restored {
        Ok(id) => {
            store.commit(conn)?;
            println!("Restored transaction {}", id);
            Ok(())
        }
        Err(e @ LedgerError::UndoExpired(_)) => {
            // the stale buffer is gone either way
            store.commit(conn)?;
            Err(e.into())
        }
        Err(e) => Err(e.into()),
    }
}

fn list(conn: &Connection, store: &LedgerStore, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(store, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let ccy = db::get_currency(conn)?;
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.date.clone(),
                    r.r#type.clone(),
                    r.category.clone(),
                    fmt_money(&r.amount, &ccy),
                    r.note.clone(),
                    r.id.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Date", "Type", "Category", "Amount", "Note", "ID"], rows)
        );
    }
    Ok(())
}

#[derive(Serialize)]
pub struct TransactionRow {
    pub id: String,
    pub date: String,
    pub r#type: String,
    pub category: String,
    pub amount: Decimal,
    pub note: String,
}

/// Rows of the displayed month, in ledger order.
pub fn query_rows(store: &LedgerStore, sub: &clap::ArgMatches) -> Result<Vec<TransactionRow>> {
    let filter = filter_from_args(sub, store.catalog())?;
    let catalog = store.catalog();
    Ok(store
        .filtered(&filter)
        .into_iter()
        .map(|tx| TransactionRow {
            id: tx.id.clone(),
            date: display_date(tx),
            r#type: tx.r#type.to_string(),
            category: catalog.name_of(&tx.category_id).to_string(),
            amount: tx.amount,
            note: tx.note.clone().unwrap_or_default(),
        })
        .collect())
}

fn display_date(tx: &Transaction) -> String {
    tx.date
        .map(|d| d.to_string())
        .unwrap_or_else(|| "Invalid Date".to_string())
}
