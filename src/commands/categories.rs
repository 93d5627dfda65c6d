// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::ledger::LedgerStore;
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::{Result, anyhow};
use rusqlite::Connection;

pub fn handle(conn: &Connection, store: &mut LedgerStore, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("list", sub)) => {
            let cats = store.catalog().categories();
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &cats)? {
                let data = cats
                    .iter()
                    .map(|c| {
                        vec![
                            c.id.clone(),
                            c.name.clone(),
                            c.kind.to_string(),
                            c.color.clone(),
                            c.icon.clone(),
                        ]
                    })
                    .collect();
                println!(
                    "{}",
                    pretty_table(&["ID", "Name", "Kind", "Color", "Icon"], data)
                );
            }
        }
        Some(("rename", sub)) => {
            let id = sub.get_one::<String>("id").map(|s| s.trim()).unwrap_or_default();
            let name = sub.get_one::<String>("name").map(|s| s.trim()).unwrap_or_default();
            if name.is_empty() {
                return Err(anyhow!("Category name cannot be empty"));
            }
            let old = store.catalog().name_of(id).to_string();
            store.rename_category(id, name)?;
            store.commit(conn)?;
            println!("Renamed category '{}' to '{}'", old, name);
        }
        _ => {}
    }
    Ok(())
}
