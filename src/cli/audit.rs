//! CLI command for reading the audit log

use clap::Args;

use super::LedgerContext;
use crate::error::LedgerResult;

/// Arguments for `audit`
#[derive(Args, Debug)]
pub struct AuditArgs {
    /// Number of most recent entries to show
    #[arg(short, long, default_value_t = 20)]
    pub limit: usize,
}

pub fn handle_audit_command(ctx: &LedgerContext, args: AuditArgs) -> LedgerResult<()> {
    let entries = ctx.audit.read_recent(args.limit)?;

    if entries.is_empty() {
        println!("No audit entries found.");
        return Ok(());
    }

    for entry in entries {
        println!("{}", entry.format_human_readable());
    }
    Ok(())
}
