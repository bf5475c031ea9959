//! CLI command for CSV export

use std::io::Write;
use std::path::PathBuf;

use clap::Args;

use super::LedgerContext;
use crate::codec::ExportOptions;
use crate::error::{LedgerError, LedgerResult};
use crate::storage::write_text_atomic;

/// Arguments for `export`
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Output file path, or `-` for stdout
    pub output: PathBuf,

    /// Three-column CSV without the summary block or byte order mark
    #[arg(long)]
    pub plain: bool,
}

pub fn handle_export_command(ctx: &mut LedgerContext, args: ExportArgs) -> LedgerResult<()> {
    let options = if args.plain {
        ExportOptions::plain().with_currency_symbol(ctx.settings.currency_symbol.clone())
    } else {
        ctx.settings.export_options()
    };

    let bytes = ctx.service().export_csv(&options)?;

    if args.output.as_os_str() == "-" {
        let mut stdout = std::io::stdout().lock();
        stdout
            .write_all(&bytes)
            .and_then(|_| stdout.flush())
            .map_err(|e| LedgerError::Export(e.to_string()))?;
    } else {
        write_text_atomic(&args.output, &bytes)
            .map_err(|e| LedgerError::Export(e.to_string()))?;
        println!("Transactions exported to: {}", args.output.display());
    }
    Ok(())
}
