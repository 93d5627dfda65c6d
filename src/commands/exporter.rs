// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::codec::{backup_file_name, csv_file_name, export_csv, export_json};
use crate::ledger::LedgerStore;
use crate::utils::{filter_from_args, today};
use anyhow::{Context, Result};
use chrono::Utc;
use std::path::PathBuf;

pub fn handle(store: &LedgerStore, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("json", sub)) => export_backup(store, sub),
        Some(("csv", sub)) => export_month_csv(store, sub),
        _ => Ok(()),
    }
}

fn out_path(sub: &clap::ArgMatches, default_name: String) -> PathBuf {
    sub.get_one::<String>("out")
        .map(|s| PathBuf::from(s.trim()))
        .unwrap_or_else(|| PathBuf::from(default_name))
}

fn export_backup(store: &LedgerStore, sub: &clap::ArgMatches) -> Result<()> {
    let out = out_path(sub, backup_file_name(today()));
    let body = export_json(store.transactions(), store.catalog(), Utc::now())?;
    std::fs::write(&out, body).with_context(|| format!("Write {}", out.display()))?;
    tracing::info!(path = %out.display(), count = store.transactions().len(), "backup written");
    println!(
        "Exported {} transactions to {}",
        store.transactions().len(),
        out.display()
    );
    Ok(())
}

fn export_month_csv(store: &LedgerStore, sub: &clap::ArgMatches) -> Result<()> {
    let filter = filter_from_args(sub, store.catalog())?;
    let rows = store.filtered(&filter);
    let count = rows.len();
    // fails before any file is created when the month is empty
    let body = export_csv(filter.month, rows, store.catalog())?;
    let out = out_path(sub, csv_file_name(filter.month));
    std::fs::write(&out, body).with_context(|| format!("Write {}", out.display()))?;
    tracing::info!(path = %out.display(), count, "csv written");
    println!("Exported {} transactions to {}", count, out.display());
    Ok(())
}
