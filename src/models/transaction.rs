//! Transaction model
//!
//! A transaction records an amount, its category, and the calendar date it
//! happened on. The transaction type is derived from the category type and
//! can never disagree with it; every constructor and the deserializer enforce
//! this.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::category::{Category, CategoryType, TransactionType};
use super::ids::TransactionId;
use super::money::Money;
use crate::error::{LedgerError, LedgerResult};

/// Date format used everywhere dates are read or written
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a strict `yyyy-MM-dd` date
pub fn parse_date(s: &str) -> LedgerResult<NaiveDate> {
    let s = s.trim();
    let shape_ok = s.len() == 10
        && s.bytes().enumerate().all(|(i, b)| match i {
            4 | 7 => b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !shape_ok {
        return Err(LedgerError::format("date", s));
    }
    NaiveDate::parse_from_str(s, DATE_FORMAT).map_err(|_| LedgerError::format("date", s))
}

/// A ledger entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TransactionRecord")]
pub struct Transaction {
    id: Option<TransactionId>,
    amount: Money,
    transaction_type: TransactionType,
    category: Category,
    date: NaiveDate,
}

impl Transaction {
    /// Create a transaction; the type is derived from the category
    pub fn new(amount: Money, category: Category, date: NaiveDate) -> LedgerResult<Self> {
        if amount.is_negative() {
            return Err(LedgerError::Validation(format!(
                "Amount must not be negative, got {}",
                amount
            )));
        }

        Ok(Self {
            id: None,
            amount,
            transaction_type: category.transaction_type(),
            category,
            date,
        })
    }

    /// Create a transaction whose input also declared a transaction type
    ///
    /// The declared type is checked against the one implied by the category
    /// and rejected when they differ.
    pub fn with_declared_type(
        amount: Money,
        category: Category,
        date: NaiveDate,
        declared: TransactionType,
    ) -> LedgerResult<Self> {
        let derived = category.transaction_type();
        if declared != derived {
            return Err(LedgerError::Validation(format!(
                "Transaction type {} does not match category type {} (expected {})",
                declared,
                category.category_type(),
                derived
            )));
        }
        Self::new(amount, category, date)
    }

    /// Return a copy carrying a storage-assigned identifier
    pub fn with_id(mut self, id: TransactionId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn id(&self) -> Option<TransactionId> {
        self.id
    }

    pub fn amount(&self) -> Money {
        self.amount
    }

    pub fn transaction_type(&self) -> TransactionType {
        self.transaction_type
    }

    pub fn category(&self) -> &Category {
        &self.category
    }

    pub fn category_type(&self) -> CategoryType {
        self.category.category_type()
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Check if this is income
    pub fn is_income(&self) -> bool {
        self.transaction_type == TransactionType::Income
    }

    /// Amount with sign applied: positive for income, negative for expense
    pub fn signed_amount(&self) -> Money {
        if self.is_income() {
            self.amount
        } else {
            -self.amount
        }
    }

    /// Compare everything except the storage identifier
    pub fn same_entry(&self, other: &Transaction) -> bool {
        self.amount == other.amount && self.category == other.category && self.date == other.date
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.date.format(DATE_FORMAT),
            self.transaction_type,
            self.category,
            self.amount
        )
    }
}

/// Wire shape of a transaction, validated on the way in
#[derive(Deserialize)]
struct TransactionRecord {
    #[serde(default)]
    id: Option<TransactionId>,
    amount: Money,
    #[serde(default)]
    transaction_type: Option<TransactionType>,
    category: Category,
    date: NaiveDate,
}

impl TryFrom<TransactionRecord> for Transaction {
    type Error = LedgerError;

    fn try_from(record: TransactionRecord) -> Result<Self, Self::Error> {
        let txn = match record.transaction_type {
            Some(declared) => {
                Transaction::with_declared_type(record.amount, record.category, record.date, declared)?
            }
            None => Transaction::new(record.amount, record.category, record.date)?,
        };
        Ok(match record.id {
            Some(id) => txn.with_id(id),
            None => txn,
        })
    }
}

/// Unvalidated transaction input as it arrives from a form, a command line,
/// or a CSV row
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTransaction {
    pub amount: Option<String>,
    /// Display name for the category; defaults to the category type name
    pub category: Option<String>,
    pub category_type: Option<String>,
    /// Optional declared type, checked against the category type
    pub transaction_type: Option<String>,
    pub date: Option<String>,
}

impl NewTransaction {
    /// Input with the three required fields set
    pub fn new(
        amount: impl Into<String>,
        category_type: impl Into<String>,
        date: impl Into<String>,
    ) -> Self {
        Self {
            amount: Some(amount.into()),
            category_type: Some(category_type.into()),
            date: Some(date.into()),
            ..Self::default()
        }
    }

    /// Set the declared transaction type
    pub fn declared_type(mut self, transaction_type: impl Into<String>) -> Self {
        self.transaction_type = Some(transaction_type.into());
        self
    }

    /// Set the category display name
    pub fn category_name(mut self, name: impl Into<String>) -> Self {
        self.category = Some(name.into());
        self
    }

    /// Validate the input and build a transaction
    pub fn validate(&self) -> LedgerResult<Transaction> {
        let amount = required(&self.amount, "amount")?;
        let category_type = required(&self.category_type, "categoryType")?;
        let date = required(&self.date, "date")?;

        let amount = Money::parse(amount).map_err(|_| LedgerError::format("amount", amount.trim()))?;
        let category_type: CategoryType = category_type.parse()?;
        let date = parse_date(date)?;

        let category = match self.category.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => Category::new(name, category_type),
            _ => Category::of(category_type),
        };

        match self.transaction_type.as_deref().map(str::trim) {
            Some(declared) if !declared.is_empty() => {
                let declared: TransactionType = declared.parse()?;
                Transaction::with_declared_type(amount, category, date, declared)
            }
            _ => Transaction::new(amount, category, date),
        }
    }
}

fn required<'a>(value: &'a Option<String>, field: &str) -> LedgerResult<&'a str> {
    match value.as_deref() {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(LedgerError::Validation(format!("{} is required", field))),
    }
}
