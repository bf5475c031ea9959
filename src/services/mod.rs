//! Service layer for the ledger
//!
//! Business logic on top of the storage gateway: validation, ordering,
//! CSV import/export and summaries.

pub mod transaction;

pub use transaction::{ImportResult, Page, PageRequest, TransactionService};
