//! CLI command handlers
//!
//! Bridges clap argument parsing with the service layer. Each handler
//! prints its result to stdout; diagnostics go through `tracing`.

pub mod audit;
pub mod export;
pub mod import;
pub mod summary;
pub mod transaction;

pub use audit::{handle_audit_command, AuditArgs};
pub use export::{handle_export_command, ExportArgs};
pub use import::{handle_import_command, ImportArgs};
pub use summary::{handle_summary_command, SummaryCommands};
pub use transaction::{
    handle_add_command, handle_clear_command, handle_delete_command, handle_list_command, AddArgs,
    ClearArgs, DeleteArgs, ListArgs,
};

use crate::audit::AuditLogger;
use crate::config::{LedgerPaths, Settings};
use crate::error::LedgerResult;
use crate::services::TransactionService;
use crate::storage::JsonFileStore;

/// Everything a command needs: resolved paths, settings, the loaded store
/// and the audit log
pub struct LedgerContext {
    pub paths: LedgerPaths,
    pub settings: Settings,
    pub store: JsonFileStore,
    pub audit: AuditLogger,
}

impl LedgerContext {
    /// Load settings and transactions under `paths`
    pub fn open(paths: LedgerPaths) -> LedgerResult<Self> {
        paths.ensure_directories()?;
        let settings = Settings::load_or_create(&paths)?;
        let store = JsonFileStore::open(paths.transactions_file())?;
        let audit = AuditLogger::new(paths.audit_log());

        Ok(Self {
            paths,
            settings,
            store,
            audit,
        })
    }

    /// Transaction service over the loaded store, audited when enabled
    pub fn service(&mut self) -> TransactionService<'_> {
        let service = TransactionService::new(&mut self.store);
        if self.settings.audit_enabled {
            service.with_audit(&self.audit)
        } else {
            service
        }
    }
}
