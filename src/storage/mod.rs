//! Storage layer for the ledger
//!
//! A small gateway trait with an in-memory and a JSON-file implementation.
//! Callers receive copies; nothing returned by a store aliases stored state.

pub mod file_io;
pub mod memory;
pub mod transactions;

pub use file_io::{read_json, write_json_atomic, write_text_atomic};
pub use memory::MemoryStore;
pub use transactions::JsonFileStore;

use crate::error::LedgerResult;
use crate::models::{Transaction, TransactionId};

/// Persistence gateway for transactions
///
/// Listing order is insertion order, but callers should not rely on it.
pub trait TransactionStore {
    /// Persist a transaction and return it with its assigned id
    fn add(&mut self, txn: Transaction) -> LedgerResult<Transaction>;

    /// Persist several transactions at once
    fn add_all(&mut self, txns: Vec<Transaction>) -> LedgerResult<Vec<Transaction>>;

    /// Snapshot of every stored transaction
    fn list(&self) -> LedgerResult<Vec<Transaction>>;

    fn get(&self, id: TransactionId) -> LedgerResult<Option<Transaction>>;

    /// Remove one transaction; false if it was not stored
    fn delete(&mut self, id: TransactionId) -> LedgerResult<bool>;

    /// Remove everything, returning how many were removed
    fn clear(&mut self) -> LedgerResult<usize>;

    fn count(&self) -> LedgerResult<usize>;
}
