//! CLI command for CSV import

use std::path::PathBuf;

use clap::Args;

use super::LedgerContext;
use crate::error::{LedgerError, LedgerResult};

/// Arguments for `import`
#[derive(Args, Debug)]
pub struct ImportArgs {
    /// CSV file with `amount,categoryType,date` rows
    pub file: PathBuf,
}

/// Import every transaction in the file, or none if any row is invalid
pub fn handle_import_command(ctx: &mut LedgerContext, args: ImportArgs) -> LedgerResult<()> {
    let text = std::fs::read_to_string(&args.file).map_err(|e| {
        LedgerError::Import(format!("Failed to read {}: {}", args.file.display(), e))
    })?;

    let result = ctx.service().import_csv(&text)?;

    println!("Import Complete!");
    println!("  Imported:    {}", result.imported_count());
    if !result.skipped_lines.is_empty() {
        let lines: Vec<String> = result.skipped_lines.iter().map(ToString::to_string).collect();
        println!(
            "  Skipped:     {} (short rows on lines {})",
            result.skipped_count(),
            lines.join(", ")
        );
    }
    Ok(())
}
