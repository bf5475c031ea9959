//! Core data models for the ledger
//!
//! This module contains the data structures that represent the ledger
//! domain: transactions, categories, money amounts, and month keys.

pub mod category;
pub mod ids;
pub mod money;
pub mod month;
pub mod transaction;

pub use category::{Category, CategoryType, TransactionType};
pub use ids::TransactionId;
pub use money::{Money, MoneyParseError};
pub use month::MonthKey;
pub use transaction::{parse_date, NewTransaction, Transaction, DATE_FORMAT};
