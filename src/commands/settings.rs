// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::AppConfig;
use crate::db::{get_currency, set_currency};
use crate::utils::pretty_table;
use anyhow::{Result, anyhow};
use rusqlite::Connection;

pub fn handle(conn: &Connection, cfg: &AppConfig, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("show", _)) => {
            let rows = vec![
                vec!["data_dir".to_string(), cfg.data_dir.display().to_string()],
                vec!["currency".to_string(), get_currency(conn)?],
                vec![
                    "undo_window".to_string(),
                    format!("{}s", cfg.undo_window.num_seconds()),
                ],
            ];
            println!("{}", pretty_table(&["Setting", "Value"], rows));
        }
        Some(("currency", sub)) => {
            let code = sub
                .get_one::<String>("code")
                .map(|s| s.trim().to_uppercase())
                .unwrap_or_default();
            if code.is_empty() {
                return Err(anyhow!("Currency code cannot be empty"));
            }
            set_currency(conn, &code)?;
            println!("Currency label set to {}", code);
        }
        _ => {}
    }
    Ok(())
}
