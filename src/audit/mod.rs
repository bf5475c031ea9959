//! Audit trail for the ledger
//!
//! Records every change to the stored transactions in an append-only,
//! line-delimited JSON log.
//!
//! - `AuditEntry`: one recorded operation with a timestamp, the affected
//!   transaction (if any), and a short human-readable summary.
//! - `AuditLogger`: appends entries to the log file and reads them back.
//!
//! # Example
//!
//! ```rust,ignore
//! use expense_ledger::audit::{AuditEntry, AuditLogger};
//!
//! let logger = AuditLogger::new(paths.audit_log());
//! logger.log(&AuditEntry::create(&transaction))?;
//! ```

mod entry;
mod logger;

pub use entry::{AuditEntry, Operation};
pub use logger::AuditLogger;
