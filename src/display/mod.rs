//! Display formatting for terminal output
//!
//! Tables and report lines for the command-line interface.

pub mod report;
pub mod transaction;

pub use report::format_monthly_net;
pub use transaction::{format_page_footer, format_transaction_page, format_transaction_table};
