//! Summary CLI commands

use std::collections::BTreeMap;

use clap::Subcommand;

use super::LedgerContext;
use crate::display::format_monthly_net;
use crate::error::LedgerResult;

/// Summary subcommands
#[derive(Subcommand, Debug)]
pub enum SummaryCommands {
    /// Income, expense and net for one month
    Month {
        /// Year, e.g. 2025
        year: i32,
        /// Month number, 1-12
        month: u32,
    },
    /// Income, expense and net for every month with transactions
    All,
    /// Net amount per month
    Net {
        /// Print a JSON object keyed by month
        #[arg(long)]
        json: bool,
    },
}

pub fn handle_summary_command(ctx: &mut LedgerContext, cmd: SummaryCommands) -> LedgerResult<()> {
    let symbol = ctx.settings.currency_symbol.clone();
    let service = ctx.service();

    match cmd {
        SummaryCommands::Month { year, month } => {
            let summary = service.month_summary(year, month)?;
            println!("{}", summary.render(&symbol));
        }
        SummaryCommands::All => {
            let report = service.all_months_summary()?;
            if !report.is_empty() {
                println!("{}", report.render(&symbol));
            }
        }
        SummaryCommands::Net { json } => {
            let net = service.monthly_net()?;
            if json {
                let values: BTreeMap<String, String> = net
                    .iter()
                    .map(|(month, amount)| (month.to_string(), amount.to_decimal_string()))
                    .collect();
                println!("{}", serde_json::to_string_pretty(&values)?);
            } else {
                print!("{}", format_monthly_net(&net, &symbol));
            }
        }
    }

    Ok(())
}
