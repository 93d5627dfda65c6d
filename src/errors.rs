// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::MonthRef;
use thiserror::Error;

pub type LedgerResult<T> = std::result::Result<T, LedgerError>;

/// Failures raised by the ledger model, the codec and the store.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("Please enter a valid amount greater than zero")]
    InvalidAmount,
    #[error("Invalid file format: {0}")]
    InvalidFormat(String),
    #[error("No transactions to export for {0}")]
    NothingToExport(MonthRef),
    #[error("Transaction '{0}' not found")]
    NotFound(String),
    #[error("Category '{0}' not found")]
    UnknownCategory(String),
    #[error("Nothing to undo")]
    NothingToUndo,
    #[error("Undo window expired ({0}s)")]
    UndoExpired(i64),
    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}
