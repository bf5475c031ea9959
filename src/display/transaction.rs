//! Transaction display formatting
//!
//! Plain-text tables for listing transactions in a terminal.

use crate::models::{Transaction, DATE_FORMAT};
use crate::services::Page;

const HEADERS: [&str; 5] = ["ID", "Date", "Type", "Category", "Amount"];

fn category_label(txn: &Transaction) -> String {
    let category = txn.category();
    if category.name() == category.category_type().name() {
        category.to_string()
    } else {
        format!("{} ({})", category, category.name())
    }
}

fn row_cells(txn: &Transaction) -> [String; 5] {
    [
        txn.id().map(|id| id.to_string()).unwrap_or_else(|| "-".to_string()),
        txn.date().format(DATE_FORMAT).to_string(),
        txn.transaction_type().to_string(),
        category_label(txn),
        txn.amount().to_decimal_string(),
    ]
}

/// Format transactions as a table, columns sized to their content
pub fn format_transaction_table(transactions: &[Transaction]) -> String {
    if transactions.is_empty() {
        return "No transactions found.\n".to_string();
    }

    let rows: Vec<[String; 5]> = transactions.iter().map(row_cells).collect();

    let mut widths = HEADERS.map(|h| h.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut output = String::new();
    push_line(&mut output, &HEADERS.map(String::from), &widths);
    output.push_str(&"-".repeat(widths.iter().sum::<usize>() + 2 * (widths.len() - 1)));
    output.push('\n');
    for row in &rows {
        push_line(&mut output, row, &widths);
    }

    output
}

fn push_line(output: &mut String, cells: &[String; 5], widths: &[usize; 5]) {
    let [id, date, kind, category, amount] = cells;
    output.push_str(&format!(
        "{:>w0$}  {:<w1$}  {:<w2$}  {:<w3$}  {:>w4$}",
        id,
        date,
        kind,
        category,
        amount,
        w0 = widths[0],
        w1 = widths[1],
        w2 = widths[2],
        w3 = widths[3],
        w4 = widths[4],
    ));
    output.push('\n');
}

/// Footer line under a paged listing
pub fn format_page_footer<T>(page: &Page<T>) -> String {
    format!(
        "Page {} of {} ({} transactions)",
        page.page + 1,
        page.total_pages(),
        page.total
    )
}

/// Table plus footer for one page
pub fn format_transaction_page(page: &Page<Transaction>) -> String {
    if page.total == 0 {
        return format_transaction_table(&[]);
    }
    format!(
        "{}{}\n",
        format_transaction_table(&page.items),
        format_page_footer(page)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, CategoryType, Money, TransactionId};
    use chrono::NaiveDate;

    fn txn(id: u64, cents: i64, category: Category) -> Transaction {
        Transaction::new(
            Money::from_cents(cents),
            category,
            NaiveDate::from_ymd_opt(2025, 1, 5).unwrap(),
        )
        .unwrap()
        .with_id(TransactionId::new(id))
    }

    #[test]
    fn test_empty_table() {
        assert_eq!(format_transaction_table(&[]), "No transactions found.\n");
    }

    #[test]
    fn test_table_layout() {
        let table = format_transaction_table(&[
            txn(1, 150000, Category::of(CategoryType::Salary)),
            txn(12, 550, Category::new("Lunch", CategoryType::Food)),
        ]);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "ID  Date        Type     Category       Amount");
        assert_eq!(lines[2], " 1  2025-01-05  INCOME   SALARY        1500.00");
        assert_eq!(lines[3], "12  2025-01-05  EXPENSE  FOOD (Lunch)     5.50");
        assert_eq!(lines[1].len(), lines[0].len());
    }

    #[test]
    fn test_page_footer() {
        let page = Page {
            items: vec![txn(3, 100, Category::of(CategoryType::Rent))],
            page: 1,
            size: 2,
            total: 3,
        };
        assert_eq!(format_page_footer(&page), "Page 2 of 2 (3 transactions)");
        assert!(format_transaction_page(&page).ends_with("Page 2 of 2 (3 transactions)\n"));
    }

    #[test]
    fn test_empty_page() {
        let page: Page<Transaction> = Page {
            items: Vec::new(),
            page: 0,
            size: 20,
            total: 0,
        };
        assert_eq!(format_transaction_page(&page), "No transactions found.\n");
    }
}
