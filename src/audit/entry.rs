//! Audit entry data structures
//!
//! Defines the operations that are audited and the entry format itself.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::Transaction;

/// Types of operations that can be audited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    /// A transaction was added
    Create,
    /// A transaction was removed
    Delete,
    /// Every transaction was removed
    Clear,
    /// Transactions were added from a CSV file
    Import,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Create => write!(f, "CREATE"),
            Operation::Delete => write!(f, "DELETE"),
            Operation::Clear => write!(f, "CLEAR"),
            Operation::Import => write!(f, "IMPORT"),
        }
    }
}

/// A single audit log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    /// When the operation occurred (UTC)
    pub timestamp: DateTime<Utc>,

    /// Type of operation performed
    pub operation: Operation,

    /// ID of the affected transaction, for single-entry operations
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_id: Option<String>,

    /// JSON snapshot of the affected transaction
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snapshot: Option<serde_json::Value>,

    /// Human-readable description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

impl AuditEntry {
    fn new(operation: Operation) -> Self {
        Self {
            timestamp: Utc::now(),
            operation,
            entity_id: None,
            snapshot: None,
            summary: None,
        }
    }

    fn for_transaction(operation: Operation, txn: &Transaction) -> Self {
        Self {
            entity_id: txn.id().map(|id| id.to_string()),
            snapshot: serde_json::to_value(txn).ok(),
            summary: Some(txn.to_string()),
            ..Self::new(operation)
        }
    }

    /// Entry for a newly stored transaction
    pub fn create(txn: &Transaction) -> Self {
        Self::for_transaction(Operation::Create, txn)
    }

    /// Entry for a removed transaction
    pub fn delete(txn: &Transaction) -> Self {
        Self::for_transaction(Operation::Delete, txn)
    }

    /// Entry for removing every transaction
    pub fn clear(removed: usize) -> Self {
        Self {
            summary: Some(format!("{} transactions removed", removed)),
            ..Self::new(Operation::Clear)
        }
    }

    /// Entry for a CSV import
    pub fn import(imported: usize, skipped_rows: usize) -> Self {
        Self {
            summary: Some(format!(
                "{} transactions imported, {} short rows skipped",
                imported, skipped_rows
            )),
            ..Self::new(Operation::Import)
        }
    }

    /// Format the entry for human-readable output
    pub fn format_human_readable(&self) -> String {
        let mut output = format!(
            "[{}] {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.operation
        );

        if let Some(id) = &self.entity_id {
            output.push_str(&format!(" #{}", id));
        }

        if let Some(summary) = &self.summary {
            output.push_str(&format!(" ({})", summary));
        }

        output
    }
}
