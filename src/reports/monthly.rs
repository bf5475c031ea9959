//! Monthly summaries
//!
//! Groups transactions by calendar month and totals income and expense for
//! each month. Rendering follows a fixed three-line block per month:
//!
//! ```text
//! Summary for 2025-01:
//! Income: ₹1500.00
//! Expense: ₹250.50
//! Net: ₹1249.50
//! ```

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::error::{LedgerError, LedgerResult};
use crate::models::{Money, MonthKey, Transaction};

/// Currency symbol used when none is configured
pub const DEFAULT_CURRENCY_SYMBOL: &str = "₹";

/// Income and expense totals for one month
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthlySummary {
    pub month: MonthKey,
    pub income: Money,
    pub expense: Money,
}

impl MonthlySummary {
    /// A summary with nothing recorded
    pub fn empty(month: MonthKey) -> Self {
        Self {
            month,
            income: Money::zero(),
            expense: Money::zero(),
        }
    }

    /// Income minus expense
    pub fn net(&self) -> Money {
        self.income - self.expense
    }

    /// Add one transaction to the totals
    fn record(&mut self, txn: &Transaction) -> LedgerResult<()> {
        let total = if txn.is_income() {
            &mut self.income
        } else {
            &mut self.expense
        };
        *total = accumulate(*total, txn.amount(), self.month)?;
        Ok(())
    }

    /// Render the three-line block with the given currency symbol
    pub fn render(&self, symbol: &str) -> String {
        format!(
            "Summary for {}:\nIncome: {}\nExpense: {}\nNet: {}",
            self.month,
            self.income.format_with_symbol(symbol),
            self.expense.format_with_symbol(symbol),
            self.net().format_with_symbol(symbol)
        )
    }
}

impl fmt::Display for MonthlySummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(DEFAULT_CURRENCY_SYMBOL))
    }
}

/// Summaries for every month that has transactions, oldest first
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MonthlyReport {
    pub months: Vec<MonthlySummary>,
}

impl MonthlyReport {
    pub fn is_empty(&self) -> bool {
        self.months.is_empty()
    }

    /// Summary for one month, if it has transactions
    pub fn get(&self, month: MonthKey) -> Option<&MonthlySummary> {
        self.months.iter().find(|s| s.month == month)
    }

    pub fn total_income(&self) -> LedgerResult<Money> {
        grand_total(self.months.iter().map(|s| s.income))
    }

    pub fn total_expense(&self) -> LedgerResult<Money> {
        grand_total(self.months.iter().map(|s| s.expense))
    }

    pub fn total_net(&self) -> LedgerResult<Money> {
        self.total_income()?
            .checked_sub(self.total_expense()?)
            .ok_or_else(|| LedgerError::Validation("Report net total is out of range".into()))
    }

    /// Render every month's block, separated by a blank line
    pub fn render(&self, symbol: &str) -> String {
        let blocks: Vec<String> = self.months.iter().map(|s| s.render(symbol)).collect();
        blocks.join("\n\n").trim_end().to_string()
    }
}

impl fmt::Display for MonthlyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(DEFAULT_CURRENCY_SYMBOL))
    }
}

fn accumulate(total: Money, amount: Money, month: MonthKey) -> LedgerResult<Money> {
    total
        .checked_add(amount)
        .ok_or_else(|| LedgerError::Validation(format!("Totals for {} are out of range", month)))
}

fn grand_total(mut amounts: impl Iterator<Item = Money>) -> LedgerResult<Money> {
    amounts.try_fold(Money::zero(), |total, amount| {
        total
            .checked_add(amount)
            .ok_or_else(|| LedgerError::Validation("Report total is out of range".into()))
    })
}

/// Totals for the transactions dated in one month
///
/// `month` is 1-based. A month without transactions yields zero totals; only
/// a month number outside 1-12 is an error.
pub fn summarize_month(
    transactions: &[Transaction],
    year: i32,
    month: u32,
) -> LedgerResult<MonthlySummary> {
    let key = MonthKey::new(year, month)?;
    let mut summary = MonthlySummary::empty(key);

    for txn in transactions.iter().filter(|t| key.contains(t.date())) {
        summary.record(txn)?;
    }

    Ok(summary)
}

/// Totals for every month that appears in the transactions
///
/// Income and expense are accumulated separately; the reported months are the
/// union of both, so a month with only income still reports a zero expense.
/// A month whose total does not fit in `Money` is a Validation error.
pub fn summarize_all_months(transactions: &[Transaction]) -> LedgerResult<MonthlyReport> {
    let mut income: BTreeMap<MonthKey, Money> = BTreeMap::new();
    let mut expense: BTreeMap<MonthKey, Money> = BTreeMap::new();

    for txn in transactions {
        let totals = if txn.is_income() {
            &mut income
        } else {
            &mut expense
        };
        let month = MonthKey::of(txn.date());
        let total = totals.entry(month).or_default();
        *total = accumulate(*total, txn.amount(), month)?;
    }

    let months: BTreeSet<MonthKey> = income.keys().chain(expense.keys()).copied().collect();

    Ok(MonthlyReport {
        months: months
            .into_iter()
            .map(|month| MonthlySummary {
                month,
                income: income.get(&month).copied().unwrap_or_default(),
                expense: expense.get(&month).copied().unwrap_or_default(),
            })
            .collect(),
    })
}

/// Net amount per month: income adds, expense subtracts
///
/// Months without transactions are absent rather than zero.
pub fn summarize_by_month_map(
    transactions: &[Transaction],
) -> LedgerResult<BTreeMap<MonthKey, Money>> {
    let mut net: BTreeMap<MonthKey, Money> = BTreeMap::new();
    for txn in transactions {
        let month = MonthKey::of(txn.date());
        let total = net.entry(month).or_default();
        *total = accumulate(*total, txn.signed_amount(), month)?;
    }
    Ok(net)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, CategoryType};
    use chrono::NaiveDate;

    fn txn(cents: i64, category_type: CategoryType, y: i32, m: u32, d: u32) -> Transaction {
        Transaction::new(
            Money::from_cents(cents),
            Category::of(category_type),
            NaiveDate::from_ymd_opt(y, m, d).unwrap(),
        )
        .unwrap()
    }

    fn scenario() -> Vec<Transaction> {
        vec![
            txn(150000, CategoryType::Salary, 2025, 1, 5),
            txn(25050, CategoryType::Food, 2025, 1, 10),
            txn(80000, CategoryType::Food, 2025, 2, 1),
        ]
    }

    #[test]
    fn test_summarize_month_scenario() {
        let summary = summarize_month(&scenario(), 2025, 1).unwrap();
        assert_eq!(summary.income, Money::from_cents(150000));
        assert_eq!(summary.expense, Money::from_cents(25050));
        assert_eq!(summary.net(), Money::from_cents(124950));
        assert_eq!(
            summary.to_string(),
            "Summary for 2025-01:\nIncome: ₹1500.00\nExpense: ₹250.50\nNet: ₹1249.50"
        );
    }

    #[test]
    fn test_summarize_month_without_matches_is_zero() {
        let summary = summarize_month(&scenario(), 2024, 1).unwrap();
        assert!(summary.income.is_zero());
        assert!(summary.expense.is_zero());
        assert!(summary.net().is_zero());
        assert_eq!(
            summary.to_string(),
            "Summary for 2024-01:\nIncome: ₹0.00\nExpense: ₹0.00\nNet: ₹0.00"
        );

        let summary = summarize_month(&[], 2025, 6).unwrap();
        assert!(summary.net().is_zero());
    }

    #[test]
    fn test_summarize_month_rejects_bad_month() {
        assert!(summarize_month(&scenario(), 2025, 13).unwrap_err().is_validation());
        assert!(summarize_month(&scenario(), 2025, 0).is_err());
    }

    #[test]
    fn test_negative_net_renders_sign_after_symbol() {
        let summary = summarize_month(&scenario(), 2025, 2).unwrap();
        assert_eq!(summary.net(), Money::from_cents(-80000));
        assert!(summary.to_string().ends_with("Net: ₹-800.00"));
    }

    #[test]
    fn test_summarize_all_months_scenario() {
        let report = summarize_all_months(&scenario()).unwrap();
        let keys: Vec<String> = report.months.iter().map(|s| s.month.to_string()).collect();
        assert_eq!(keys, vec!["2025-01", "2025-02"]);

        assert_eq!(
            report.to_string(),
            "Summary for 2025-01:\nIncome: ₹1500.00\nExpense: ₹250.50\nNet: ₹1249.50\n\n\
             Summary for 2025-02:\nIncome: ₹0.00\nExpense: ₹800.00\nNet: ₹-800.00"
        );
    }

    #[test]
    fn test_summarize_all_months_ignores_input_order() {
        let mut shuffled = scenario();
        shuffled.reverse();
        shuffled.push(txn(1000, CategoryType::Business, 2024, 12, 31));

        let report = summarize_all_months(&shuffled).unwrap();
        let keys: Vec<String> = report.months.iter().map(|s| s.month.to_string()).collect();
        assert_eq!(keys, vec!["2024-12", "2025-01", "2025-02"]);

        let december = report.get(MonthKey::new(2024, 12).unwrap()).unwrap();
        assert_eq!(december.income, Money::from_cents(1000));
        assert!(december.expense.is_zero());
    }

    #[test]
    fn test_net_equals_income_minus_expense_in_every_block() {
        let mut txns = scenario();
        txns.push(txn(1234, CategoryType::Travel, 2025, 1, 20));
        txns.push(txn(999, CategoryType::Business, 2025, 2, 2));

        for summary in summarize_all_months(&txns).unwrap().months {
            assert_eq!(summary.income - summary.expense, summary.net());
        }
    }

    #[test]
    fn test_report_totals() {
        let report = summarize_all_months(&scenario()).unwrap();
        assert_eq!(report.total_income().unwrap(), Money::from_cents(150000));
        assert_eq!(report.total_expense().unwrap(), Money::from_cents(105050));
        assert_eq!(report.total_net().unwrap(), Money::from_cents(44950));
    }

    #[test]
    fn test_render_with_custom_symbol() {
        let report = summarize_all_months(&scenario()[..1]).unwrap();
        assert_eq!(
            report.render("$"),
            "Summary for 2025-01:\nIncome: $1500.00\nExpense: $0.00\nNet: $1500.00"
        );
    }

    #[test]
    fn test_empty_inputs() {
        assert!(summarize_all_months(&[]).unwrap().is_empty());
        assert_eq!(summarize_all_months(&[]).unwrap().to_string(), "");
        assert!(summarize_by_month_map(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_summarize_by_month_map() {
        let net = summarize_by_month_map(&scenario()).unwrap();
        assert_eq!(net.len(), 2);
        assert_eq!(net[&MonthKey::new(2025, 1).unwrap()], Money::from_cents(124950));
        assert_eq!(net[&MonthKey::new(2025, 2).unwrap()], Money::from_cents(-80000));
        assert!(!net.contains_key(&MonthKey::new(2025, 3).unwrap()));
    }

    #[test]
    fn test_totals_that_overflow_are_errors() {
        let huge = i64::MAX / 2 + 1;
        let txns = vec![
            txn(huge, CategoryType::Salary, 2025, 1, 1),
            txn(huge, CategoryType::Salary, 2025, 1, 2),
        ];

        assert!(summarize_all_months(&txns).unwrap_err().is_validation());
        assert!(summarize_month(&txns, 2025, 1).unwrap_err().is_validation());
        assert!(summarize_by_month_map(&txns).unwrap_err().is_validation());

        let err = summarize_all_months(&txns).unwrap_err();
        assert!(err.to_string().contains("2025-01"));
    }

    #[test]
    fn test_large_totals_in_separate_months_still_summarize() {
        let huge = i64::MAX / 2 + 1;
        let txns = vec![
            txn(huge, CategoryType::Salary, 2025, 1, 1),
            txn(huge, CategoryType::Salary, 2025, 2, 1),
        ];

        let report = summarize_all_months(&txns).unwrap();
        assert_eq!(report.months.len(), 2);
        assert!(report.total_income().unwrap_err().is_validation());
    }
}
