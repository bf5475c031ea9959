//! Expense Ledger - personal income and expense tracking from the terminal
//!
//! Records transactions (amount, category, date), lists and deletes them,
//! summarizes them by calendar month, and moves them in and out of CSV files.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (transactions, categories, money, months)
//! - `codec`: CSV reading and writing
//! - `reports`: Monthly income/expense/net summaries
//! - `storage`: Transaction store trait with memory and JSON file backends
//! - `services`: Business logic layer
//! - `display`: Terminal formatting
//! - `audit`: Audit logging system
//! - `cli`: Command handlers for the `ledger` binary
//!
//! # Example
//!
//! ```rust
//! use expense_ledger::codec::parse_csv;
//! use expense_ledger::reports::summarize_month;
//!
//! let transactions = parse_csv(
//!     "amount,categoryType,date\n1500.00,SALARY,2025-01-05\n250.50,FOOD,2025-01-10\n",
//! )?;
//! let january = summarize_month(&transactions, 2025, 1)?;
//! assert_eq!(january.to_string(), "Summary for 2025-01:\nIncome: ₹1500.00\nExpense: ₹250.50\nNet: ₹1249.50");
//! # Ok::<(), expense_ledger::LedgerError>(())
//! ```

pub mod audit;
pub mod cli;
pub mod codec;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{LedgerError, LedgerResult};
