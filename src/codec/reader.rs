//! CSV parsing
//!
//! Supports header-driven column detection, so both the three-column layout
//! (`amount,categoryType,date`) and the detailed report layout
//! (`Amount,TransactionType,CategoryType,Date`) read back without
//! configuration.
//!
//! Rows with too few fields are skipped and reported. Any other bad field
//! fails the whole parse; nothing is returned from a partially valid file.

use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::{debug, warn};

use super::{SUMMARY_START, UTF8_BOM};
use crate::error::{LedgerError, LedgerResult};
use crate::models::{parse_date, Category, CategoryType, Money, Transaction, TransactionType};

/// Column positions within a CSV row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMapping {
    /// Index of the amount column
    pub amount_column: usize,
    /// Index of the category type column
    pub category_type_column: usize,
    /// Index of the date column
    pub date_column: usize,
    /// Index of a declared transaction type column, checked against the
    /// category type
    pub transaction_type_column: Option<usize>,
    /// Index of a category display name column
    pub category_name_column: Option<usize>,
}

impl Default for ColumnMapping {
    fn default() -> Self {
        Self::standard()
    }
}

impl ColumnMapping {
    /// `amount,categoryType,date`
    pub fn standard() -> Self {
        Self {
            amount_column: 0,
            category_type_column: 1,
            date_column: 2,
            transaction_type_column: None,
            category_name_column: None,
        }
    }

    /// `Amount,TransactionType,CategoryType,Date`
    pub fn detailed() -> Self {
        Self {
            amount_column: 0,
            category_type_column: 2,
            date_column: 3,
            transaction_type_column: Some(1),
            category_name_column: None,
        }
    }

    /// Locate columns by header name
    ///
    /// Names are matched ignoring case, spaces and punctuation, so
    /// `categoryType`, `Category Type` and `category_type` are the same column.
    /// Returns `None` when the amount, category type or date column is missing.
    pub fn from_header(header: &StringRecord) -> Option<Self> {
        let mut amount = None;
        let mut category_type = None;
        let mut date = None;
        let mut transaction_type = None;
        let mut category_name = None;

        for (idx, name) in header.iter().enumerate() {
            let slot = match normalize_header(name).as_str() {
                "amount" => &mut amount,
                "categorytype" => &mut category_type,
                "date" => &mut date,
                "transactiontype" | "type" => &mut transaction_type,
                "category" | "categoryname" | "name" => &mut category_name,
                _ => continue,
            };
            slot.get_or_insert(idx);
        }

        match (amount, category_type, date) {
            (Some(amount_column), Some(category_type_column), Some(date_column)) => Some(Self {
                amount_column,
                category_type_column,
                date_column,
                transaction_type_column: transaction_type,
                category_name_column: category_name,
            }),
            _ => None,
        }
    }

    /// Fewest fields a row needs to cover every mapped column
    pub fn min_fields(&self) -> usize {
        [
            Some(self.amount_column),
            Some(self.category_type_column),
            Some(self.date_column),
            self.transaction_type_column,
            self.category_name_column,
        ]
        .into_iter()
        .flatten()
        .max()
        .map_or(0, |idx| idx + 1)
    }
}

fn normalize_header(name: &str) -> String {
    name.chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

fn looks_like_header(record: &StringRecord) -> bool {
    let starts_with_amount = record
        .get(0)
        .map(|first| first.to_ascii_lowercase().starts_with("amount"))
        .unwrap_or(false);
    starts_with_amount || record.iter().any(|field| normalize_header(field) == "amount")
}

fn is_blank(record: &StringRecord) -> bool {
    record.iter().all(str::is_empty)
}

/// Outcome of parsing one CSV document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedCsv {
    /// Parsed transactions in file order, without identifiers
    pub transactions: Vec<Transaction>,
    /// 1-based line numbers of rows skipped for having too few fields
    pub skipped_lines: Vec<usize>,
}

/// CSV reader for ledger files
#[derive(Debug, Clone, Default)]
pub struct CsvReader {
    mapping: Option<ColumnMapping>,
}

impl CsvReader {
    /// Reader that detects the layout from the header, falling back to the
    /// standard layout when there is none
    pub fn new() -> Self {
        Self::default()
    }

    /// Reader with a fixed layout; header rows are still skipped
    pub fn with_mapping(mapping: ColumnMapping) -> Self {
        Self {
            mapping: Some(mapping),
        }
    }

    /// Parse a whole document
    pub fn parse(&self, text: &str) -> LedgerResult<ParsedCsv> {
        let text = text.strip_prefix(UTF8_BOM).unwrap_or(text);

        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(text.as_bytes());

        let mut mapping = self.mapping.clone();
        let mut parsed = ParsedCsv::default();

        for result in reader.records() {
            let record = result?;
            let line = record
                .position()
                .map(|pos| pos.line() as usize)
                .unwrap_or_default();

            if is_blank(&record) {
                continue;
            }

            // Report exports end with a human-readable summary block
            if record.get(0) == Some(SUMMARY_START) {
                debug!(line, "Reached summary block, stopping");
                break;
            }

            if looks_like_header(&record) {
                if mapping.is_none() && parsed.transactions.is_empty() {
                    mapping = Some(ColumnMapping::from_header(&record).unwrap_or_else(|| {
                        debug!(line, "Header names no known layout, using standard columns");
                        ColumnMapping::standard()
                    }));
                }
                continue;
            }

            let mapping = mapping.get_or_insert_with(ColumnMapping::standard);
            if record.len() < mapping.min_fields() {
                warn!(line, fields = record.len(), "Skipping short CSV row");
                parsed.skipped_lines.push(line);
                continue;
            }

            let txn = parse_record(&record, mapping).map_err(|e| e.at_line(line))?;
            parsed.transactions.push(txn);
        }

        debug!(
            parsed = parsed.transactions.len(),
            skipped = parsed.skipped_lines.len(),
            "Parsed CSV"
        );
        Ok(parsed)
    }
}

fn parse_record(record: &StringRecord, mapping: &ColumnMapping) -> LedgerResult<Transaction> {
    let field = |idx: usize| record.get(idx).unwrap_or_default();

    let amount_text = field(mapping.amount_column);
    let amount = Money::parse(amount_text).map_err(|_| LedgerError::format("amount", amount_text))?;
    let category_type: CategoryType = field(mapping.category_type_column).parse()?;
    let date = parse_date(field(mapping.date_column))?;

    let category = match mapping.category_name_column.map(field) {
        Some(name) if !name.is_empty() => Category::new(name, category_type),
        _ => Category::of(category_type),
    };

    match mapping.transaction_type_column.map(field) {
        Some(declared) if !declared.is_empty() => {
            let declared: TransactionType = declared.parse()?;
            Transaction::with_declared_type(amount, category, date, declared)
        }
        _ => Transaction::new(amount, category, date),
    }
}

/// Parse a document with header detection and lenient short-row handling
pub fn parse_csv(text: &str) -> LedgerResult<Vec<Transaction>> {
    Ok(CsvReader::new().parse(text)?.transactions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_standard_file() {
        let text = "amount,categoryType,date\n1500.00,SALARY,2025-01-05\n250.50,FOOD,2025-01-10\n";
        let txns = parse_csv(text).unwrap();

        assert_eq!(txns.len(), 2);
        assert_eq!(txns[0].amount(), Money::from_cents(150000));
        assert_eq!(txns[0].category_type(), CategoryType::Salary);
        assert_eq!(txns[0].transaction_type(), TransactionType::Income);
        assert_eq!(txns[0].date(), date(2025, 1, 5));
        assert_eq!(txns[1].transaction_type(), TransactionType::Expense);
        assert!(txns.iter().all(|t| t.id().is_none()));
    }

    #[test]
    fn test_parse_without_header() {
        let txns = parse_csv("10,RENT,2025-03-01\n5.5,travel,2025-03-02").unwrap();
        assert_eq!(txns.len(), 2);
        assert_eq!(txns[1].amount(), Money::from_cents(550));
        assert_eq!(txns[1].category_type(), CategoryType::Travel);
    }

    #[test]
    fn test_category_type_is_case_insensitive() {
        let txns = parse_csv("1,food,2025-01-01\n1,FOOD,2025-01-01\n1,Food,2025-01-01").unwrap();
        assert!(txns.iter().all(|t| t.category_type() == CategoryType::Food));
    }

    #[test]
    fn test_unknown_category_type_fails_naming_token() {
        let err = parse_csv("amount,categoryType,date\n12.00,GROCERY,2025-01-05").unwrap_err();
        assert!(err.is_format());
        assert_eq!(err.to_string(), "Invalid category type on line 2: 'GROCERY'");
    }

    #[test]
    fn test_hard_error_aborts_whole_parse() {
        let text = "1,FOOD,2025-01-01\n2,FOOD,2025/01/02\n3,FOOD,2025-01-03";
        let err = parse_csv(text).unwrap_err();
        assert_eq!(err.to_string(), "Invalid date on line 2: '2025/01/02'");
    }

    #[test]
    fn test_bad_amount() {
        let err = parse_csv("abc,FOOD,2025-01-01").unwrap_err();
        assert_eq!(err.to_string(), "Invalid amount on line 1: 'abc'");
    }

    #[test]
    fn test_negative_amount_is_validation_error() {
        let err = parse_csv("-5,FOOD,2025-01-01").unwrap_err();
        assert!(err.is_validation());
        assert!(err.to_string().contains("line 1"));
    }

    #[test]
    fn test_short_rows_are_skipped() {
        let text = "amount,categoryType,date\n10,FOOD\n\n20,RENT,2025-01-02\njunk\n";
        let parsed = CsvReader::new().parse(text).unwrap();

        assert_eq!(parsed.transactions.len(), 1);
        assert_eq!(parsed.transactions[0].amount(), Money::from_cents(2000));
        assert_eq!(parsed.skipped_lines, vec![2, 5]);
    }

    #[test]
    fn test_repeated_header_lines_are_skipped() {
        let text = "amount,categoryType,date\n1,FOOD,2025-01-01\nAmount,CategoryType,Date\n2,FOOD,2025-01-02";
        let parsed = CsvReader::new().parse(text).unwrap();
        assert_eq!(parsed.transactions.len(), 2);
        assert!(parsed.skipped_lines.is_empty());
    }

    #[test]
    fn test_leading_bom_is_stripped() {
        let text = "\u{feff}amount,categoryType,date\n1,OTHER,2025-01-01";
        let txns = parse_csv(text).unwrap();
        assert_eq!(txns.len(), 1);
        assert_eq!(txns[0].category_type(), CategoryType::Other);
    }

    #[test]
    fn test_detailed_layout_checks_declared_type() {
        let text = "Amount,TransactionType,CategoryType,Date\n100.00,INCOME,BUSINESS,2025-04-01";
        let txns = parse_csv(text).unwrap();
        assert_eq!(txns[0].transaction_type(), TransactionType::Income);

        let text = "Amount,TransactionType,CategoryType,Date\n100.00,INCOME,FOOD,2025-04-01";
        let err = parse_csv(text).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_header_columns_in_any_order() {
        let text = "date,Category,amount,category_type\n2025-05-06,Lunch,12.75,food";
        let txns = parse_csv(text).unwrap();
        assert_eq!(txns[0].amount(), Money::from_cents(1275));
        assert_eq!(txns[0].category().name(), "Lunch");
        assert_eq!(txns[0].date(), date(2025, 5, 6));
    }

    #[test]
    fn test_unrecognised_header_falls_back_to_standard_layout() {
        for text in [
            "Amount,Category,Date\n10.00,FOOD,2025-01-01\n",
            "amount,type,when\n10.00,FOOD,2025-01-01\n",
        ] {
            let parsed = CsvReader::new().parse(text).unwrap();
            assert_eq!(parsed.transactions.len(), 1);
            assert!(parsed.skipped_lines.is_empty());
            assert_eq!(parsed.transactions[0].amount(), Money::from_cents(1000));
            assert_eq!(parsed.transactions[0].category_type(), CategoryType::Food);
            assert_eq!(parsed.transactions[0].date(), date(2025, 1, 1));
        }
    }

    #[test]
    fn test_quoted_fields() {
        let txns = parse_csv("\"42.10\",\"SALARY\",\"2025-06-30\"").unwrap();
        assert_eq!(txns[0].amount(), Money::from_cents(4210));
    }

    #[test]
    fn test_fixed_mapping() {
        let reader = CsvReader::with_mapping(ColumnMapping::detailed());
        let parsed = reader.parse("7,EXPENSE,RENT,2025-01-01\n8,RENT,2025-01-01").unwrap();
        assert_eq!(parsed.transactions.len(), 1);
        assert_eq!(parsed.skipped_lines, vec![2]);
    }

    #[test]
    fn test_min_fields() {
        assert_eq!(ColumnMapping::standard().min_fields(), 3);
        assert_eq!(ColumnMapping::detailed().min_fields(), 4);
    }

    #[test]
    fn test_empty_input() {
        assert!(parse_csv("").unwrap().is_empty());
        assert!(parse_csv("amount,categoryType,date\n").unwrap().is_empty());
    }
}
