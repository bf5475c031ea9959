//! Configuration module for the ledger
//!
//! Path resolution for the data directory and persisted user settings.

pub mod paths;
pub mod settings;

pub use paths::{LedgerPaths, DATA_DIR_ENV};
pub use settings::{ExportSettings, Settings};
