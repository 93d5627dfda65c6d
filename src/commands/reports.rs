// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregate::{CategoryTotal, category_breakdown, legend, six_month_trend, summarize};
use crate::db;
use crate::ledger::LedgerStore;
use crate::models::MonthRef;
use crate::utils::{filter_from_args, fmt_money, maybe_print_json, parse_month, pretty_table, today};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, store: &LedgerStore, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("summary", sub)) => summary(conn, store, sub)?,
        Some(("breakdown", sub)) => breakdown(conn, store, sub)?,
        Some(("trend", sub)) => trend(conn, store, sub)?,
        _ => {}
    }
    Ok(())
}

fn summary(conn: &Connection, store: &LedgerStore, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let filter = filter_from_args(sub, store.catalog())?;
    let s = summarize(store.filtered(&filter));
    if !maybe_print_json(json_flag, jsonl_flag, &s)? {
        let ccy = db::get_currency(conn)?;
        println!(
            "{}",
            pretty_table(
                &["Month", "Income", "Expenses", "Balance"],
                vec![vec![
                    filter.month.to_string(),
                    fmt_money(&s.income, &ccy),
                    fmt_money(&s.expenses, &ccy),
                    fmt_money(&s.balance, &ccy),
                ]],
            )
        );
    }
    Ok(())
}

fn breakdown(conn: &Connection, store: &LedgerStore, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let filter = filter_from_args(sub, store.catalog())?;
    let data = breakdown_rows(store, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let ccy = db::get_currency(conn)?;
        let shown = table_rows(&data, sub);
        let rows: Vec<Vec<String>> = shown
            .iter()
            .map(|t| vec![t.name.clone(), fmt_money(&t.value, &ccy), t.color.clone()])
            .collect();
        let spent = format!("Spent ({})", filter.month);
        println!(
            "{}",
            pretty_table(&["Category", spent.as_str(), "Color"], rows)
        );
        if shown.len() < data.len() {
            println!(
                "{} more categories (use --top or --json)",
                data.len() - shown.len()
            );
        }
    }
    Ok(())
}

/// Breakdown of the displayed month, cut to `--top N` when given.
pub fn breakdown_rows(store: &LedgerStore, sub: &clap::ArgMatches) -> Result<Vec<CategoryTotal>> {
    let filter = filter_from_args(sub, store.catalog())?;
    let mut data = category_breakdown(store.filtered(&filter), store.catalog());
    if let Some(top) = sub.get_one::<usize>("top") {
        data.truncate(*top);
    }
    Ok(data)
}

/// Entries the table shows: the legend unless `--top` was given.
pub fn table_rows<'a>(data: &'a [CategoryTotal], sub: &clap::ArgMatches) -> &'a [CategoryTotal] {
    if sub.get_one::<usize>("top").is_some() {
        data
    } else {
        legend(data)
    }
}

fn trend(conn: &Connection, store: &LedgerStore, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let current = match sub.get_one::<String>("month") {
        Some(m) => parse_month(m)?,
        None => MonthRef::of(today()),
    };
    let points = six_month_trend(store.transactions(), current);
    if !maybe_print_json(json_flag, jsonl_flag, &points)? {
        let ccy = db::get_currency(conn)?;
        let rows: Vec<Vec<String>> = points
            .iter()
            .map(|p| {
                vec![
                    format!("{} ({})", p.label, p.month),
                    fmt_money(&p.income, &ccy),
                    fmt_money(&p.expenses, &ccy),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["Month", "Income", "Expenses"], rows));
    }
    Ok(())
}
