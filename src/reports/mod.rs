//! Reports module for the ledger
//!
//! Monthly income, expense and net summaries, computed from a snapshot of
//! transactions. Storage order never matters: every report groups and sorts
//! explicitly.

pub mod monthly;

pub use monthly::{
    summarize_all_months, summarize_by_month_map, summarize_month, MonthlyReport,
    MonthlySummary, DEFAULT_CURRENCY_SYMBOL,
};
