// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use spendlog::{cli, commands, config::AppConfig, db, ledger::LedgerStore};

fn main() -> Result<()> {
    spendlog::init_tracing();

    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let cfg = AppConfig::resolve()?;
    let conn = db::open_or_init(&cfg)?;
    let mut store = LedgerStore::load(&conn)?.with_undo_window(cfg.undo_window);

    match matches.subcommand() {
        Some(("init", _)) => {
            if store.is_dirty() {
                store.commit(&conn)?;
            }
            println!("Data store initialized at {}", cfg.db_path()?.display());
        }
        Some(("tx", sub)) => commands::transactions::handle(&conn, &mut store, sub)?,
        Some(("category", sub)) => commands::categories::handle(&conn, &mut store, sub)?,
        Some(("report", sub)) => commands::reports::handle(&conn, &store, sub)?,
        Some(("export", sub)) => commands::exporter::handle(&store, sub)?,
        Some(("import", sub)) => commands::importer::handle(&conn, &mut store, sub)?,
        Some(("config", sub)) => commands::settings::handle(&conn, &cfg, sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
