// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::catalog::Catalog;
use crate::filter::TransactionFilter;
use crate::models::{MonthRef, TxType};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use comfy_table::{Cell, Table, presets::UTF8_FULL};
use rust_decimal::Decimal;

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

pub fn parse_month(s: &str) -> Result<MonthRef> {
    s.parse::<MonthRef>()
}

/// Entry form amount: blank or unparsable input is treated as missing.
pub fn parse_amount(s: &str) -> Option<Decimal> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    s.parse::<Decimal>().ok()
}

pub fn fmt_money(d: &Decimal, ccy: &str) -> String {
    format!("{} {:.2}", ccy, d.round_dp(2))
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // If v is an array, stream each element; else stream single line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}

/// Builds the month view filter from the shared `--month/--query/--category/--type` flags.
///
/// Category names are resolved to ids; `all` disables a criterion.
pub fn filter_from_args(sub: &clap::ArgMatches, catalog: &Catalog) -> Result<TransactionFilter> {
    let month = match sub.get_one::<String>("month") {
        Some(m) => parse_month(m)?,
        None => MonthRef::of(today()),
    };
    let r#type = sub
        .get_one::<String>("type")
        .filter(|t| !t.trim().eq_ignore_ascii_case("all"))
        .map(|t| t.parse::<TxType>())
        .transpose()?;
    Ok(TransactionFilter {
        month,
        query: sub.get_one::<String>("query").cloned().unwrap_or_default(),
        category: sub
            .get_one::<String>("category")
            .map(|s| s.trim())
            .filter(|s| !s.is_empty() && !s.eq_ignore_ascii_case("all"))
            .map(|s| catalog.lookup(s).map_or_else(|| s.to_string(), |c| c.id.clone())),
        r#type,
    })
}

pub fn confirm(prompt: &str) -> Result<bool> {
    dialoguer::Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .context("Confirmation prompt failed")
}
