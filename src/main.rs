use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use expense_ledger::cli::{
    handle_add_command, handle_audit_command, handle_clear_command, handle_delete_command,
    handle_export_command, handle_import_command, handle_list_command, handle_summary_command,
    AddArgs, AuditArgs, ClearArgs, DeleteArgs, ExportArgs, ImportArgs, LedgerContext, ListArgs,
    SummaryCommands,
};
use expense_ledger::config::{LedgerPaths, DATA_DIR_ENV};

#[derive(Parser)]
#[command(
    name = "ledger",
    version,
    about = "Personal expense and income ledger",
    long_about = "Record income and expenses by category, summarize them by month, \
                  and move them in and out of CSV files."
)]
struct Cli {
    /// Directory holding settings, transactions and the audit log
    #[arg(long, global = true, env = DATA_DIR_ENV)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Record a transaction
    Add(AddArgs),

    /// List transactions, oldest first
    #[command(alias = "ls")]
    List(ListArgs),

    /// Delete a transaction by ID
    #[command(alias = "rm")]
    Delete(DeleteArgs),

    /// Delete every transaction
    Clear(ClearArgs),

    /// Monthly summaries
    #[command(subcommand)]
    Summary(SummaryCommands),

    /// Import transactions from a CSV file
    Import(ImportArgs),

    /// Export transactions to a CSV file
    Export(ExportArgs),

    /// Show current configuration and paths
    Config,

    /// Show recent audit log entries
    Audit(AuditArgs),
}

fn init_tracing() {
    use tracing_subscriber::prelude::*;

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_default_env());

    tracing_subscriber::registry().with(fmt_layer).init();
}

fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();

    let paths = match cli.data_dir {
        Some(dir) => LedgerPaths::with_base_dir(dir),
        None => LedgerPaths::new()?,
    };
    let mut ctx = LedgerContext::open(paths)?;

    match cli.command {
        Some(Commands::Add(args)) => handle_add_command(&mut ctx, args)?,
        Some(Commands::List(args)) => handle_list_command(&mut ctx, args)?,
        Some(Commands::Delete(args)) => handle_delete_command(&mut ctx, args)?,
        Some(Commands::Clear(args)) => handle_clear_command(&mut ctx, args)?,
        Some(Commands::Summary(cmd)) => handle_summary_command(&mut ctx, cmd)?,
        Some(Commands::Import(args)) => handle_import_command(&mut ctx, args)?,
        Some(Commands::Export(args)) => handle_export_command(&mut ctx, args)?,
        Some(Commands::Audit(args)) => handle_audit_command(&ctx, args)?,
        Some(Commands::Config) => {
            let settings = &ctx.settings;
            println!("Expense Ledger Configuration");
            println!("============================");
            println!("Base directory:    {}", ctx.paths.base_dir().display());
            println!("Transactions file: {}", ctx.paths.transactions_file().display());
            println!("Settings file:     {}", ctx.paths.settings_file().display());
            println!("Audit log:         {}", ctx.paths.audit_log().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol:  {}", settings.currency_symbol);
            println!("  Page size:        {}", settings.page_size);
            println!("  Export summary:   {}", settings.export.include_summary);
            println!("  Export BOM:       {}", settings.export.byte_order_mark);
            println!("  Audit enabled:    {}", settings.audit_enabled);
        }
        None => {
            println!("Expense Ledger - personal income and expense tracking");
            println!();
            println!("Run 'ledger --help' for usage information.");
        }
    }

    Ok(())
}
