//! JSON-file transaction store
//!
//! Persists a [`MemoryStore`] to `transactions.json`:
//!
//! ```json
//! { "next_id": 3, "transactions": [ ... ] }
//! ```
//!
//! The file is rewritten atomically after every mutation. If the write fails
//! the in-memory state is rolled back, so memory and disk never disagree.

use std::path::{Path, PathBuf};

use tracing::debug;

use super::file_io::{read_json, write_json_atomic};
use super::{MemoryStore, TransactionStore};
use crate::error::LedgerResult;
use crate::models::{Transaction, TransactionId};

/// Transaction store backed by a JSON file
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    data: MemoryStore,
}

impl JsonFileStore {
    /// Load the store at `path`; a missing file is an empty store
    pub fn open(path: impl Into<PathBuf>) -> LedgerResult<Self> {
        let path = path.into();
        let mut data: MemoryStore = read_json(&path)?;
        data.normalize();
        debug!(path = %path.display(), count = data.count()?, "Loaded transactions");
        Ok(Self { path, data })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the current state to disk
    pub fn save(&self) -> LedgerResult<()> {
        write_json_atomic(&self.path, &self.data)?;
        debug!(path = %self.path.display(), "Saved transactions");
        Ok(())
    }

    fn commit<T>(
        &mut self,
        change: impl FnOnce(&mut MemoryStore) -> LedgerResult<T>,
    ) -> LedgerResult<T> {
        let snapshot = self.data.clone();
        let result = change(&mut self.data).and_then(|value| self.save().map(|_| value));
        if result.is_err() {
            self.data = snapshot;
        }
        result
    }
}

impl TransactionStore for JsonFileStore {
    fn add(&mut self, txn: Transaction) -> LedgerResult<Transaction> {
        self.commit(|data| data.add(txn))
    }

    fn add_all(&mut self, txns: Vec<Transaction>) -> LedgerResult<Vec<Transaction>> {
        self.commit(|data| data.add_all(txns))
    }

    fn list(&self) -> LedgerResult<Vec<Transaction>> {
        self.data.list()
    }

    fn get(&self, id: TransactionId) -> LedgerResult<Option<Transaction>> {
        self.data.get(id)
    }

    fn delete(&mut self, id: TransactionId) -> LedgerResult<bool> {
        if self.data.get(id)?.is_none() {
            return Ok(false);
        }
        self.commit(|data| data.delete(id))
    }

    fn clear(&mut self) -> LedgerResult<usize> {
        self.commit(|data| data.clear())
    }

    fn count(&self) -> LedgerResult<usize> {
        self.data.count()
    }
}
