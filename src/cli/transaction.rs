//! Transaction CLI commands
//!
//! `add`, `list`, `delete` and `clear`.

use chrono::Local;
use clap::Args;

use super::LedgerContext;
use crate::display::{format_transaction_page, format_transaction_table};
use crate::error::{LedgerError, LedgerResult};
use crate::models::{NewTransaction, TransactionId, DATE_FORMAT};
use crate::services::PageRequest;

/// Arguments for `add`
#[derive(Args, Debug)]
pub struct AddArgs {
    /// Amount, e.g. "250.50"
    pub amount: String,
    /// Category type: SALARY, BUSINESS, FOOD, RENT, TRAVEL or OTHER
    pub category_type: String,
    /// Transaction date (YYYY-MM-DD), defaults to today
    #[arg(short, long)]
    pub date: Option<String>,
    /// Category display name, defaults to the category type
    #[arg(short, long)]
    pub name: Option<String>,
    /// Expected transaction type (INCOME or EXPENSE); rejected if it
    /// disagrees with the category type
    #[arg(short = 't', long = "type")]
    pub transaction_type: Option<String>,
}

/// Arguments for `list`
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Page to show, starting at 1
    #[arg(short, long, default_value_t = 1)]
    pub page: usize,
    /// Rows per page, defaults to the configured page size
    #[arg(short, long)]
    pub size: Option<usize>,
    /// Print every transaction as JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `delete`
#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Transaction ID
    pub id: String,
}

/// Arguments for `clear`
#[derive(Args, Debug)]
pub struct ClearArgs {
    /// Confirm removal of every transaction
    #[arg(short, long)]
    pub force: bool,
}

pub fn handle_add_command(ctx: &mut LedgerContext, args: AddArgs) -> LedgerResult<()> {
    let date = args
        .date
        .unwrap_or_else(|| Local::now().date_naive().format(DATE_FORMAT).to_string());

    let mut input = NewTransaction::new(args.amount, args.category_type, date);
    input.category = args.name;
    input.transaction_type = args.transaction_type;

    let txn = ctx.service().create(&input)?;
    println!(
        "Added transaction #{}: {}",
        txn.id().map(|id| id.to_string()).unwrap_or_default(),
        txn
    );
    Ok(())
}

pub fn handle_list_command(ctx: &mut LedgerContext, args: ListArgs) -> LedgerResult<()> {
    if args.json {
        let transactions = ctx.service().list()?;
        println!("{}", serde_json::to_string_pretty(&transactions)?);
        return Ok(());
    }

    if args.page == 0 {
        return Err(LedgerError::Validation("Pages are numbered from 1".into()));
    }
    let size = args.size.unwrap_or(ctx.settings.page_size);
    let page = ctx
        .service()
        .list_page(PageRequest::new(args.page - 1, size))?;

    if page.items.is_empty() && page.total > 0 {
        println!("{}", format_transaction_table(&[]).trim_end());
        println!("Page {} is past the end ({} pages).", args.page, page.total_pages());
    } else {
        print!("{}", format_transaction_page(&page));
    }
    Ok(())
}

pub fn handle_delete_command(ctx: &mut LedgerContext, args: DeleteArgs) -> LedgerResult<()> {
    let id: TransactionId = args
        .id
        .parse()
        .map_err(|_| LedgerError::format("transaction id", args.id.trim()))?;

    let deleted = ctx.service().delete(id)?;
    println!("Deleted transaction #{}: {}", id, deleted);
    Ok(())
}

pub fn handle_clear_command(ctx: &mut LedgerContext, args: ClearArgs) -> LedgerResult<()> {
    let mut service = ctx.service();

    if !args.force {
        let count = service.list()?.len();
        println!("About to remove all {} transactions.", count);
        println!("Use --force to confirm.");
        return Ok(());
    }

    let removed = service.clear()?;
    println!("Removed {} transactions.", removed);
    Ok(())
}
