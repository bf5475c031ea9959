//! Category model
//!
//! Every category belongs to one of a fixed set of category types, and each
//! category type is tied to exactly one transaction type. The transaction
//! type of a ledger entry is always derived from its category type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::LedgerError;

/// Direction of money for a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    /// Uppercase name, as written to CSV and JSON
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Income => "INCOME",
            Self::Expense => "EXPENSE",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for TransactionType {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "INCOME" => Ok(Self::Income),
            "EXPENSE" => Ok(Self::Expense),
            _ => Err(LedgerError::format("transaction type", s.trim())),
        }
    }
}

/// Closed set of spending and income categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CategoryType {
    Salary,
    Business,
    Food,
    Rent,
    Travel,
    Other,
}

impl CategoryType {
    /// All category types in declaration order
    pub const ALL: [CategoryType; 6] = [
        Self::Salary,
        Self::Business,
        Self::Food,
        Self::Rent,
        Self::Travel,
        Self::Other,
    ];

    /// The transaction type this category type implies
    pub const fn transaction_type(&self) -> TransactionType {
        match self {
            Self::Salary | Self::Business => TransactionType::Income,
            Self::Food | Self::Rent | Self::Travel | Self::Other => TransactionType::Expense,
        }
    }

    /// Uppercase name, as written to CSV and JSON
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Salary => "SALARY",
            Self::Business => "BUSINESS",
            Self::Food => "FOOD",
            Self::Rent => "RENT",
            Self::Travel => "TRAVEL",
            Self::Other => "OTHER",
        }
    }
}

impl fmt::Display for CategoryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for CategoryType {
    type Err = LedgerError;

    /// Case-insensitive lookup against the fixed set
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|ct| ct.name().eq_ignore_ascii_case(token))
            .ok_or_else(|| LedgerError::format("category type", token))
    }
}

/// A named category of a fixed type
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Category {
    name: String,
    category_type: CategoryType,
}

impl Category {
    /// Create a category with a custom name
    pub fn new(name: impl Into<String>, category_type: CategoryType) -> Self {
        Self {
            name: name.into(),
            category_type,
        }
    }

    /// Create a category named after its type
    pub fn of(category_type: CategoryType) -> Self {
        Self::new(category_type.name(), category_type)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category_type(&self) -> CategoryType {
        self.category_type
    }

    /// Shorthand for `category_type().transaction_type()`
    pub fn transaction_type(&self) -> TransactionType {
        self.category_type.transaction_type()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.category_type.name())
    }
}
