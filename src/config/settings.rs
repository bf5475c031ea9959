//! User settings for the ledger
//!
//! Stored as `config.json` in the base directory. Every field has a default,
//! so a partial or older file still loads.

use serde::{Deserialize, Serialize};

use super::paths::LedgerPaths;
use crate::codec::{CsvLayout, ExportOptions};
use crate::error::LedgerError;
use crate::reports::DEFAULT_CURRENCY_SYMBOL;

/// Defaults for file exports
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportSettings {
    /// Append the per-month summary block
    #[serde(default = "default_true")]
    pub include_summary: bool,

    /// Start exported files with a UTF-8 byte order mark
    #[serde(default = "default_true")]
    pub byte_order_mark: bool,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            include_summary: true,
            byte_order_mark: true,
        }
    }
}

/// User settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Symbol printed in summaries
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Rows per page when listing
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    #[serde(default)]
    pub export: ExportSettings,

    /// Record mutations in the audit log
    #[serde(default = "default_true")]
    pub audit_enabled: bool,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    DEFAULT_CURRENCY_SYMBOL.to_string()
}

fn default_page_size() -> usize {
    20
}

fn default_true() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            page_size: default_page_size(),
            export: ExportSettings::default(),
            audit_enabled: true,
        }
    }
}

impl Settings {
    /// Load settings from disk, or defaults if the file doesn't exist
    pub fn load_or_create(paths: &LedgerPaths) -> Result<Self, LedgerError> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            // Not persisted until the caller saves
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| LedgerError::Io(format!("Failed to read settings file: {}", e)))?;

        serde_json::from_str(&contents)
            .map_err(|e| LedgerError::Config(format!("Failed to parse settings file: {}", e)))
    }

    /// Save settings to disk
    pub fn save(&self, paths: &LedgerPaths) -> Result<(), LedgerError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| LedgerError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| LedgerError::Io(format!("Failed to write settings file: {}", e)))
    }

    /// Export options for a file written from the command line
    pub fn export_options(&self) -> ExportOptions {
        ExportOptions {
            layout: CsvLayout::Detailed,
            include_summary: self.export.include_summary,
            byte_order_mark: self.export.byte_order_mark,
            currency_symbol: self.currency_symbol.clone(),
        }
    }
}
