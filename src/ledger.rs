// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! The ledger store: sole owner of the transaction list, the category catalog
//! and the single-slot undo buffer.
//!
//! Every mutation happens in memory first; [`LedgerStore::commit`] then writes
//! the whole state to the key-value table in one SQLite transaction.

use crate::catalog::Catalog;
use crate::config::UNDO_WINDOW_SECS;
use crate::db::{self, CATEGORIES_KEY, TRANSACTIONS_KEY, UNDO_KEY};
use crate::errors::{LedgerError, LedgerResult};
use crate::filter::TransactionFilter;
use crate::models::{Category, Transaction, TransactionDraft, new_id};
use chrono::{DateTime, Duration, Utc};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UndoSlot {
    pub transaction: Transaction,
    pub deleted_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct LedgerStore {
    transactions: Vec<Transaction>,
    catalog: Catalog,
    undo: Option<UndoSlot>,
    undo_window: Duration,
    dirty: bool,
}

impl Default for LedgerStore {
    fn default() -> Self {
        LedgerStore::new(Vec::new(), Catalog::default())
    }
}

impl LedgerStore {
    pub fn new(transactions: Vec<Transaction>, catalog: Catalog) -> Self {
        LedgerStore {
            transactions,
            catalog,
            undo: None,
            undo_window: Duration::seconds(UNDO_WINDOW_SECS),
            dirty: false,
        }
    }

    pub fn with_undo_window(mut self, window: Duration) -> Self {
        self.undo_window = window;
        self
    }

    /// Reads the persisted state, seeding the built-in catalog on first use.
    pub fn load(conn: &Connection) -> LedgerResult<Self> {
        let transactions: Vec<Transaction> =
            db::get_json(conn, TRANSACTIONS_KEY)?.unwrap_or_default();
        let stored_categories: Option<Vec<Category>> = db::get_json(conn, CATEGORIES_KEY)?;
        let seeded = stored_categories.is_none();
        let catalog = stored_categories.map(Catalog::new).unwrap_or_default();
        let undo: Option<UndoSlot> = db::get_json(conn, UNDO_KEY)?;
        tracing::debug!(
            transactions = transactions.len(),
            categories = catalog.categories().len(),
            seeded,
            "ledger loaded"
        );
        let mut store = LedgerStore::new(transactions, catalog);
        store.undo = undo;
        store.dirty = seeded;
        Ok(store)
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn undo_slot(&self) -> Option<&UndoSlot> {
        self.undo.as_ref()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn get(&self, id: &str) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.id == id)
    }

    pub fn filtered(&self, filter: &TransactionFilter) -> Vec<&Transaction> {
        filter.apply(&self.transactions, &self.catalog)
    }

    pub fn insert_front(&mut self, tx: Transaction) -> &Transaction {
        self.transactions.insert(0, tx);
        self.dirty = true;
        &self.transactions[0]
    }

    pub fn replace_by_id(&mut self, tx: Transaction) -> LedgerResult<&Transaction> {
        let pos = self.position(&tx.id)?;
        self.transactions[pos] = tx;
        self.dirty = true;
        Ok(&self.transactions[pos])
    }

    pub fn remove_by_id(&mut self, id: &str) -> LedgerResult<Transaction> {
        let pos = self.position(id)?;
        self.dirty = true;
        Ok(self.transactions.remove(pos))
    }

    fn position(&self, id: &str) -> LedgerResult<usize> {
        self.transactions
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| LedgerError::NotFound(id.to_string()))
    }

    /// Entry form submit without an in-edit id.
    pub fn add(&mut self, draft: TransactionDraft, now: DateTime<Utc>) -> LedgerResult<&Transaction> {
        let tx = draft.into_transaction(new_id(), Some(now))?;
        tracing::debug!(id = %tx.id, amount = %tx.amount, kind = %tx.r#type, "transaction added");
        Ok(self.insert_front(tx))
    }

    /// Entry form submit for `id`; the record keeps its id and creation time.
    pub fn edit(&mut self, id: &str, draft: TransactionDraft) -> LedgerResult<&Transaction> {
        let created_at = self
            .get(id)
            .ok_or_else(|| LedgerError::NotFound(id.to_string()))?
            .created_at;
        let tx = draft.into_transaction(id.to_string(), created_at)?;
        tracing::debug!(id = %id, "transaction replaced");
        self.replace_by_id(tx)
    }

    /// Removes `id` and parks it in the undo buffer, replacing any earlier entry.
    pub fn delete(&mut self, id: &str, now: DateTime<Utc>) -> LedgerResult<&Transaction> {
        let tx = self.remove_by_id(id)?;
        if let Some(prev) = &self.undo {
            tracing::debug!(id = %prev.transaction.id, "undo buffer overwritten");
        }
        tracing::debug!(id = %id, "transaction deleted");
        let slot = self.undo.insert(UndoSlot {
            transaction: tx,
            deleted_at: now,
        });
        Ok(&slot.transaction)
    }

    /// Restores the most recent delete at the front of the ledger.
    ///
    /// The buffer is single-shot: it is cleared whether or not the window
    /// has passed.
    pub fn undo(&mut self, now: DateTime<Utc>) -> LedgerResult<&Transaction> {
        let slot = self.undo.take().ok_or(LedgerError::NothingToUndo)?;
        self.dirty = true;
        if now - slot.deleted_at > self.undo_window {
            tracing::debug!(id = %slot.transaction.id, "undo window elapsed");
            return Err(LedgerError::UndoExpired(self.undo_window.num_seconds()));
        }
        tracing::debug!(id = %slot.transaction.id, "delete undone");
        Ok(self.insert_front(slot.transaction))
    }

    /// Prepends imported records in file order. Ids are not deduplicated.
    pub fn merge_import(&mut self, incoming: Vec<Transaction>) -> usize {
        let n = incoming.len();
        if n > 0 {
            self.transactions.splice(0..0, incoming);
            self.dirty = true;
        }
        tracing::debug!(count = n, total = self.transactions.len(), "import merged");
        n
    }

    pub fn rename_category(&mut self, id: &str, name: &str) -> LedgerResult<&Category> {
        let cat = self
            .catalog
            .get_mut(id)
            .ok_or_else(|| LedgerError::UnknownCategory(id.to_string()))?;
        cat.name = name.trim().to_string();
        self.dirty = true;
        Ok(cat)
    }

    /// Writes ledger, catalog and undo buffer. Failures are logged and returned.
    pub fn commit(&mut self, conn: &Connection) -> LedgerResult<()> {
        match self.write_all(conn) {
            Ok(()) => {
                self.dirty = false;
                tracing::info!(transactions = self.transactions.len(), "ledger committed");
                Ok(())
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to persist ledger");
                Err(e)
            }
        }
    }

    fn write_all(&self, conn: &Connection) -> LedgerResult<()> {
        let tx = conn.unchecked_transaction()?;
        db::put_json(&tx, TRANSACTIONS_KEY, &self.transactions)?;
        db::put_json(&tx, CATEGORIES_KEY, self.catalog.categories())?;
        match &self.undo {
            Some(slot) => db::put_json(&tx, UNDO_KEY, slot)?,
            None => db::delete_key(&tx, UNDO_KEY)?,
        }
        tx.commit()?;
        Ok(())
    }
}
