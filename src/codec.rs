// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::catalog::Catalog;
use crate::errors::{LedgerError, LedgerResult};
use crate::models::{Category, MonthRef, Transaction};
use chrono::{DateTime, NaiveDate, Utc};
use csv::{QuoteStyle, WriterBuilder};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const CSV_HEADER: &str = "Date,Type,Category,Amount,Note";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Backup<'a> {
    pub transactions: &'a [Transaction],
    pub categories: &'a [Category],
    pub export_date: DateTime<Utc>,
}

pub fn backup_file_name(today: NaiveDate) -> String {
    format!("finance-backup-{}.json", today.format("%Y-%m-%d"))
}

pub fn csv_file_name(month: MonthRef) -> String {
    format!("transactions-{}.csv", month)
}

pub fn export_json(
    transactions: &[Transaction],
    catalog: &Catalog,
    exported_at: DateTime<Utc>,
) -> LedgerResult<String> {
    let backup = Backup {
        transactions,
        categories: catalog.categories(),
        export_date: exported_at,
    };
    Ok(serde_json::to_string_pretty(&backup)?)
}

/// Decodes the `transactions` array of a backup file.
///
/// Only the envelope is checked. Records are decoded leniently and never
/// validated: a record that is not an object decodes as an empty one.
pub fn parse_backup(contents: &str) -> LedgerResult<Vec<Transaction>> {
    let doc: Value = serde_json::from_str(contents)
        .map_err(|e| LedgerError::InvalidFormat(format!("not JSON ({})", e)))?;
    let records = match doc.get("transactions") {
        Some(Value::Array(items)) => items,
        Some(_) => {
            return Err(LedgerError::InvalidFormat(
                "`transactions` is not an array".into(),
            ));
        }
        None => {
            return Err(LedgerError::InvalidFormat(
                "missing `transactions` array".into(),
            ));
        }
    };
    let empty = Value::Object(Map::new());
    records
        .iter()
        .enumerate()
        .map(|(i, rec)| {
            let rec = if rec.is_object() {
                rec
            } else {
                tracing::warn!(index = i + 1, "backup record is not an object");
                &empty
            };
            Transaction::deserialize(rec)
                .map_err(|e| LedgerError::InvalidFormat(format!("transaction #{}: {}", i + 1, e)))
        })
        .collect()
}

/// Renders the displayed month as CSV; every data field is quoted.
pub fn export_csv<'a, I>(month: MonthRef, txs: I, catalog: &Catalog) -> LedgerResult<String>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let txs: Vec<&Transaction> = txs.into_iter().collect();
    if txs.is_empty() {
        return Err(LedgerError::NothingToExport(month));
    }

    let mut buf = Vec::new();
    buf.extend_from_slice(CSV_HEADER.as_bytes());
    buf.push(b'\n');
    {
        let mut wtr = WriterBuilder::new()
            .quote_style(QuoteStyle::Always)
            .from_writer(&mut buf);
        for tx in txs {
            let date = tx
                .date
                .map(|d| d.to_string())
                .unwrap_or_else(|| "Invalid Date".to_string());
            wtr.write_record([
                date.as_str(),
                tx.r#type.as_str(),
                catalog.name_of(&tx.category_id),
                tx.amount.to_string().as_str(),
                tx.note.as_deref().unwrap_or(""),
            ])?;
        }
        wtr.flush().map_err(csv::Error::from)?;
    }
    Ok(String::from_utf8_lossy(&buf).into_owned())
}
