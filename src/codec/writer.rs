//! CSV export
//!
//! Two shapes are produced. The plain export is the three-column file that
//! streams straight out of storage. The report export adds the transaction
//! type column, appends the per-month summary block and starts with a byte
//! order mark so spreadsheet tools pick up the currency symbol correctly.

use std::fmt::Write as _;
use std::io::Write;

use super::{SUMMARY_END, SUMMARY_START, UTF8_BOM};
use crate::error::{LedgerError, LedgerResult};
use crate::models::{Transaction, DATE_FORMAT};
use crate::reports::{summarize_all_months, MonthlyReport, DEFAULT_CURRENCY_SYMBOL};

/// Column layout of exported rows
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CsvLayout {
    /// `amount,categoryType,date`
    #[default]
    Standard,
    /// `Amount,TransactionType,CategoryType,Date`
    Detailed,
}

impl CsvLayout {
    pub fn header(&self) -> &'static str {
        match self {
            Self::Standard => "amount,categoryType,date",
            Self::Detailed => "Amount,TransactionType,CategoryType,Date",
        }
    }

    fn write_row(&self, out: &mut String, txn: &Transaction) -> std::fmt::Result {
        let amount = txn.amount().to_decimal_string();
        let date = txn.date().format(DATE_FORMAT);
        match self {
            Self::Standard => writeln!(out, "{},{},{}", amount, txn.category_type(), date),
            Self::Detailed => writeln!(
                out,
                "{},{},{},{}",
                amount,
                txn.transaction_type(),
                txn.category_type(),
                date
            ),
        }
    }
}

/// Options controlling the export shape
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOptions {
    pub layout: CsvLayout,
    /// Append the per-month summary block after the rows
    pub include_summary: bool,
    /// Start the output with a UTF-8 byte order mark
    pub byte_order_mark: bool,
    /// Symbol used in the summary block
    pub currency_symbol: String,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self::plain()
    }
}

impl ExportOptions {
    /// Three columns, nothing else
    pub fn plain() -> Self {
        Self {
            layout: CsvLayout::Standard,
            include_summary: false,
            byte_order_mark: false,
            currency_symbol: DEFAULT_CURRENCY_SYMBOL.to_string(),
        }
    }

    /// Detailed columns, summary block and byte order mark
    pub fn report() -> Self {
        Self {
            layout: CsvLayout::Detailed,
            include_summary: true,
            byte_order_mark: true,
            currency_symbol: DEFAULT_CURRENCY_SYMBOL.to_string(),
        }
    }

    pub fn with_currency_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.currency_symbol = symbol.into();
        self
    }
}

fn render_document(
    transactions: &[Transaction],
    options: &ExportOptions,
    summary: Option<&MonthlyReport>,
) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail
    let _ = write_document(&mut out, transactions, options, summary);
    out
}

fn write_document(
    out: &mut String,
    transactions: &[Transaction],
    options: &ExportOptions,
    summary: Option<&MonthlyReport>,
) -> std::fmt::Result {
    if options.byte_order_mark {
        out.push_str(UTF8_BOM);
    }

    writeln!(out, "{}", options.layout.header())?;
    for txn in transactions {
        options.layout.write_row(out, txn)?;
    }

    if let Some(report) = summary {
        writeln!(out)?;
        writeln!(out, "{}", SUMMARY_START)?;
        for month in &report.months {
            writeln!(out, "{}", month.render(&options.currency_symbol))?;
            writeln!(out)?;
        }
        writeln!(out, "{}", SUMMARY_END)?;
    }

    Ok(())
}

/// Write transactions as CSV
///
/// Rows are written in the order given.
pub fn export_transactions_csv<W: Write>(
    transactions: &[Transaction],
    writer: &mut W,
    options: &ExportOptions,
) -> LedgerResult<()> {
    let summary = if options.include_summary {
        Some(summarize_all_months(transactions)?)
    } else {
        None
    };
    let document = render_document(transactions, options, summary.as_ref());
    writer
        .write_all(document.as_bytes())
        .and_then(|_| writer.flush())
        .map_err(|e| LedgerError::Export(e.to_string()))
}

/// Plain three-column CSV text
pub fn serialize_csv(transactions: &[Transaction]) -> String {
    render_document(transactions, &ExportOptions::plain(), None)
}
