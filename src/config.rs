// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use chrono::Duration;
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use std::fs;
use std::path::PathBuf;

static APP: Lazy<(&str, &str, &str)> = Lazy::new(|| ("com.alphavelocity", "Spendlog", "spendlog"));

pub const HOME_ENV: &str = "SPENDLOG_HOME";
pub const DB_FILE: &str = "spendlog.sqlite";
pub const UNDO_WINDOW_SECS: i64 = 5;
pub const DEFAULT_CURRENCY: &str = "USD";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub undo_window: Duration,
}

impl AppConfig {
    /// `$SPENDLOG_HOME` wins over the platform data directory.
    pub fn resolve() -> Result<Self> {
        let data_dir = match std::env::var_os(HOME_ENV) {
            Some(dir) if !dir.is_empty() => PathBuf::from(dir),
            _ => ProjectDirs::from(APP.0, APP.1, APP.2)
                .context("Could not determine platform-specific data dir")?
                .data_dir()
                .to_path_buf(),
        };
        Ok(AppConfig::at(data_dir))
    }

    pub fn at(data_dir: PathBuf) -> Self {
        AppConfig {
            data_dir,
            undo_window: Duration::seconds(UNDO_WINDOW_SECS),
        }
    }

    pub fn db_path(&self) -> Result<PathBuf> {
        fs::create_dir_all(&self.data_dir).context("Failed to create data dir")?;
        Ok(self.data_dir.join(DB_FILE))
    }
}
