// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::codec::parse_backup;
use crate::ledger::LedgerStore;
use crate::utils::confirm;
use anyhow::{Context, Result};
use rusqlite::Connection;

pub fn handle(conn: &Connection, store: &mut LedgerStore, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("json", sub)) => import_backup(conn, store, sub, |n| {
            confirm(&format!(
                "Import {} transactions? This will merge with your existing data.",
                n
            ))
        }),
        _ => Ok(()),
    }
}

/// Merges a backup file. `ask` is consulted once with the incoming count unless `--yes` is set.
pub fn import_backup<F>(
    conn: &Connection,
    store: &mut LedgerStore,
    sub: &clap::ArgMatches,
    ask: F,
) -> Result<()>
where
    F: FnOnce(usize) -> Result<bool>,
{
    let path = sub
        .get_one::<String>("path")
        .map(|s| s.trim())
        .unwrap_or_default();
    let contents = std::fs::read_to_string(path).with_context(|| format!("Open {}", path))?;
    let incoming = parse_backup(&contents).with_context(|| format!("Import {}", path))?;

    let n = incoming.len();
    if !sub.get_flag("yes") && !ask(n)? {
        println!("Import cancelled");
        return Ok(());
    }
    store.merge_import(incoming);
    store.commit(conn)?;
    println!("Imported {} transactions from {}", n, path);
    Ok(())
}
