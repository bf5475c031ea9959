//! CSV codec
//!
//! Reads ledger CSV files into transactions and writes transactions back out,
//! either as a bare three-column file or as a report with a trailing
//! per-month summary block.

pub mod reader;
pub mod writer;

pub use reader::{parse_csv, ColumnMapping, CsvReader, ParsedCsv};
pub use writer::{export_transactions_csv, serialize_csv, CsvLayout, ExportOptions};

/// UTF-8 byte order mark, written ahead of report exports for spreadsheet tools
pub const UTF8_BOM: &str = "\u{feff}";

/// Opening line of the summary block appended to report exports
pub const SUMMARY_START: &str = "==== Summary for All Transactions ====";

/// Closing line of the summary block
pub const SUMMARY_END: &str = "===================================";
