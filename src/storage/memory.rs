//! In-memory transaction store
//!
//! Owns the transaction list and the identifier counter. Reads hand out
//! copies, so nothing a caller does to a listing reaches stored state.

use serde::{Deserialize, Serialize};

use super::TransactionStore;
use crate::error::LedgerResult;
use crate::models::{Transaction, TransactionId};

/// Transactions held in insertion order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryStore {
    #[serde(default = "first_id")]
    next_id: TransactionId,
    #[serde(default)]
    transactions: Vec<Transaction>,
}

fn first_id() -> TransactionId {
    TransactionId::new(1)
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self {
            next_id: first_id(),
            transactions: Vec::new(),
        }
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The identifier the next insert will receive
    pub fn next_id(&self) -> TransactionId {
        self.next_id
    }

    /// Repair state loaded from elsewhere: give unnumbered entries an id and
    /// move the counter past every id in use
    pub(crate) fn normalize(&mut self) {
        if let Some(max) = self.transactions.iter().filter_map(Transaction::id).max() {
            if self.next_id <= max {
                self.next_id = max.next();
            }
        }

        let mut next_id = self.next_id;
        for txn in self.transactions.iter_mut().filter(|t| t.id().is_none()) {
            *txn = txn.clone().with_id(next_id);
            next_id = next_id.next();
        }
        self.next_id = next_id;
    }

    fn assign_id(&mut self, txn: Transaction) -> Transaction {
        let txn = txn.with_id(self.next_id);
        self.next_id = self.next_id.next();
        txn
    }
}

impl TransactionStore for MemoryStore {
    fn add(&mut self, txn: Transaction) -> LedgerResult<Transaction> {
        let txn = self.assign_id(txn);
        self.transactions.push(txn.clone());
        Ok(txn)
    }

    fn add_all(&mut self, txns: Vec<Transaction>) -> LedgerResult<Vec<Transaction>> {
        txns.into_iter().map(|txn| self.add(txn)).collect()
    }

    fn list(&self) -> LedgerResult<Vec<Transaction>> {
        Ok(self.transactions.clone())
    }

    fn get(&self, id: TransactionId) -> LedgerResult<Option<Transaction>> {
        Ok(self.transactions.iter().find(|t| t.id() == Some(id)).cloned())
    }

    fn delete(&mut self, id: TransactionId) -> LedgerResult<bool> {
        let before = self.transactions.len();
        self.transactions.retain(|t| t.id() != Some(id));
        Ok(self.transactions.len() != before)
    }

    fn clear(&mut self) -> LedgerResult<usize> {
        let removed = self.transactions.len();
        self.transactions.clear();
        Ok(removed)
    }

    fn count(&self) -> LedgerResult<usize> {
        Ok(self.transactions.len())
    }
}
