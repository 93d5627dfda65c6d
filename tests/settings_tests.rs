// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use spendlog::config::{AppConfig, DB_FILE, DEFAULT_CURRENCY};
use spendlog::{cli, commands::settings, db};
use tempfile::tempdir;

#[test]
fn currency_label_defaults_and_updates() {
    let dir = tempdir().unwrap();
    let cfg = AppConfig::at(dir.path().join("data"));
    let conn = db::open_or_init(&cfg).unwrap();
    assert!(dir.path().join("data").join(DB_FILE).exists());
    assert_eq!(db::get_currency(&conn).unwrap(), DEFAULT_CURRENCY);

    let matches = cli::build_cli().get_matches_from(["spendlog", "config", "currency", " eur "]);
    if let Some(("config", cfg_m)) = matches.subcommand() {
        settings::handle(&conn, &cfg, cfg_m).unwrap();
    } else {
        panic!("no config subcommand");
    }
    assert_eq!(db::get_currency(&conn).unwrap(), "EUR");
}

#[test]
fn blank_currency_is_rejected() {
    let dir = tempdir().unwrap();
    let cfg = AppConfig::at(dir.path().to_path_buf());
    let conn = db::open_or_init(&cfg).unwrap();

    let matches = cli::build_cli().get_matches_from(["spendlog", "config", "currency", "  "]);
    if let Some(("config", cfg_m)) = matches.subcommand() {
        assert!(settings::handle(&conn, &cfg, cfg_m).is_err());
    } else {
        panic!("no config subcommand");
    }
    assert_eq!(db::get_currency(&conn).unwrap(), DEFAULT_CURRENCY);
}
