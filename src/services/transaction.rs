//! Transaction service
//!
//! Business operations over a [`TransactionStore`]: validated creation,
//! listing and paging, deletion, CSV import and export, and monthly
//! summaries. Mutations are written to the audit log when one is attached.

use std::collections::BTreeMap;

use tracing::{debug, info, warn};

use crate::audit::{AuditEntry, AuditLogger};
use crate::codec::{export_transactions_csv, CsvReader, ExportOptions};
use crate::error::{LedgerError, LedgerResult};
use crate::models::{Money, MonthKey, NewTransaction, Transaction, TransactionId};
use crate::reports::{
    summarize_all_months, summarize_by_month_map, summarize_month, MonthlyReport, MonthlySummary,
};
use crate::storage::TransactionStore;

/// Which slice of the listing to return
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// 0-based page number
    pub page: usize,
    /// Rows per page, at least 1
    pub size: usize,
}

impl PageRequest {
    pub fn new(page: usize, size: usize) -> Self {
        Self { page, size }
    }
}

/// One page of a sorted listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub size: usize,
    /// Number of items across all pages
    pub total: usize,
}

impl<T> Page<T> {
    /// Number of pages; an empty listing still has one (empty) page
    pub fn total_pages(&self) -> usize {
        self.total.div_ceil(self.size).max(1)
    }

    pub fn is_last(&self) -> bool {
        self.page + 1 >= self.total_pages()
    }
}

/// Outcome of a CSV import
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportResult {
    /// Stored transactions, with their new ids
    pub imported: Vec<Transaction>,
    /// Lines skipped for having too few fields
    pub skipped_lines: Vec<usize>,
}

impl ImportResult {
    pub fn imported_count(&self) -> usize {
        self.imported.len()
    }

    pub fn skipped_count(&self) -> usize {
        self.skipped_lines.len()
    }
}

/// Service for transaction management
pub struct TransactionService<'a> {
    store: &'a mut dyn TransactionStore,
    audit: Option<&'a AuditLogger>,
}

impl<'a> TransactionService<'a> {
    /// Create a service without an audit log
    pub fn new(store: &'a mut dyn TransactionStore) -> Self {
        Self { store, audit: None }
    }

    /// Record mutations in `audit`
    pub fn with_audit(mut self, audit: &'a AuditLogger) -> Self {
        self.audit = Some(audit);
        self
    }

    fn record(&self, entry: AuditEntry) {
        if let Some(audit) = self.audit {
            // The change is already stored; a failed audit write must not undo it
            if let Err(e) = audit.log(&entry) {
                warn!(error = %e, operation = %entry.operation, "Failed to write audit entry");
            }
        }
    }

    /// Validate input and store the resulting transaction
    pub fn create(&mut self, input: &NewTransaction) -> LedgerResult<Transaction> {
        let txn = input.validate()?;
        let txn = self.store.add(txn)?;

        info!(id = ?txn.id(), amount = %txn.amount(), category = %txn.category_type(), "Created transaction");
        self.record(AuditEntry::create(&txn));
        Ok(txn)
    }

    /// Get a transaction by ID
    pub fn get(&self, id: TransactionId) -> LedgerResult<Option<Transaction>> {
        self.store.get(id)
    }

    /// All transactions, oldest first (ties broken by id)
    pub fn list(&self) -> LedgerResult<Vec<Transaction>> {
        let mut transactions = self.store.list()?;
        transactions.sort_by_key(|t| (t.date(), t.id()));
        Ok(transactions)
    }

    /// One page of the sorted listing
    ///
    /// A page past the end is empty rather than an error.
    pub fn list_page(&self, request: PageRequest) -> LedgerResult<Page<Transaction>> {
        if request.size == 0 {
            return Err(LedgerError::Validation(
                "Page size must be at least 1".into(),
            ));
        }

        let transactions = self.list()?;
        let total = transactions.len();
        let items = transactions
            .into_iter()
            .skip(request.page.saturating_mul(request.size))
            .take(request.size)
            .collect();

        Ok(Page {
            items,
            page: request.page,
            size: request.size,
            total,
        })
    }

    /// Remove a transaction, returning what was removed
    pub fn delete(&mut self, id: TransactionId) -> LedgerResult<Transaction> {
        let txn = self
            .store
            .get(id)?
            .ok_or_else(|| LedgerError::transaction_not_found(id.to_string()))?;

        self.store.delete(id)?;

        info!(%id, "Deleted transaction");
        self.record(AuditEntry::delete(&txn));
        Ok(txn)
    }

    /// Remove every transaction, returning how many were removed
    pub fn clear(&mut self) -> LedgerResult<usize> {
        let removed = self.store.clear()?;

        info!(removed, "Cleared transactions");
        self.record(AuditEntry::clear(removed));
        Ok(removed)
    }

    /// Parse CSV text and store every transaction in it
    ///
    /// Either the whole file is stored or, on any field error, nothing is.
    pub fn import_csv(&mut self, text: &str) -> LedgerResult<ImportResult> {
        let parsed = CsvReader::new().parse(text)?;
        for line in &parsed.skipped_lines {
            debug!(line, "Short row not imported");
        }

        let imported = self.store.add_all(parsed.transactions)?;
        let result = ImportResult {
            imported,
            skipped_lines: parsed.skipped_lines,
        };

        info!(
            imported = result.imported_count(),
            skipped = result.skipped_count(),
            "Imported CSV"
        );
        self.record(AuditEntry::import(
            result.imported_count(),
            result.skipped_count(),
        ));
        Ok(result)
    }

    /// Render every transaction, oldest first, as CSV bytes
    pub fn export_csv(&self, options: &ExportOptions) -> LedgerResult<Vec<u8>> {
        let transactions = self.list()?;
        let mut buf = Vec::new();
        export_transactions_csv(&transactions, &mut buf, options)?;
        debug!(rows = transactions.len(), bytes = buf.len(), "Exported CSV");
        Ok(buf)
    }

    /// Totals for one month (1-based)
    pub fn month_summary(&self, year: i32, month: u32) -> LedgerResult<MonthlySummary> {
        summarize_month(&self.store.list()?, year, month)
    }

    /// Totals for every month with transactions
    pub fn all_months_summary(&self) -> LedgerResult<MonthlyReport> {
        summarize_all_months(&self.store.list()?)
    }

    /// Net amount per month
    pub fn monthly_net(&self) -> LedgerResult<BTreeMap<MonthKey, Money>> {
        summarize_by_month_map(&self.store.list()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::Operation;
    use crate::models::{CategoryType, TransactionType};
    use crate::storage::{JsonFileStore, MemoryStore};
    use tempfile::TempDir;

    fn input(amount: &str, category_type: &str, date: &str) -> NewTransaction {
        NewTransaction::new(amount, category_type, date)
    }

    fn seed(service: &mut TransactionService<'_>) {
        service.create(&input("800.00", "FOOD", "2025-02-01")).unwrap();
        service.create(&input("1500.00", "SALARY", "2025-01-05")).unwrap();
        service.create(&input("250.50", "food", "2025-01-10")).unwrap();
    }

    #[test]
    fn test_create_derives_type_and_assigns_id() {
        let mut store = MemoryStore::new();
        let mut service = TransactionService::new(&mut store);

        let txn = service.create(&input("1500", "salary", "2025-01-05")).unwrap();
        assert_eq!(txn.id(), Some(TransactionId::new(1)));
        assert_eq!(txn.transaction_type(), TransactionType::Income);
        assert_eq!(txn.category_type(), CategoryType::Salary);
    }

    #[test]
    fn test_create_rejects_bad_input() {
        let mut store = MemoryStore::new();
        let mut service = TransactionService::new(&mut store);

        let err = service.create(&input("10", "GROCERY", "2025-01-05")).unwrap_err();
        assert_eq!(err.to_string(), "Invalid category type: 'GROCERY'");

        let err = service.create(&input("-10", "FOOD", "2025-01-05")).unwrap_err();
        assert!(err.is_validation());

        let err = service
            .create(&input("10", "FOOD", "2025-01-05").declared_type("INCOME"))
            .unwrap_err();
        assert!(err.is_validation());

        assert!(service.list().unwrap().is_empty());
    }

    #[test]
    fn test_list_sorted_by_date_then_id() {
        let mut store = MemoryStore::new();
        let mut service = TransactionService::new(&mut store);
        seed(&mut service);
        service.create(&input("1", "OTHER", "2025-01-05")).unwrap();

        let ids: Vec<u64> = service
            .list()
            .unwrap()
            .iter()
            .filter_map(Transaction::id)
            .map(|id| id.value())
            .collect();
        assert_eq!(ids, vec![2, 4, 3, 1]);
    }

    #[test]
    fn test_list_page() {
        let mut store = MemoryStore::new();
        let mut service = TransactionService::new(&mut store);
        seed(&mut service);

        let page = service.list_page(PageRequest::new(0, 2)).unwrap();
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.total, 3);
        assert_eq!(page.total_pages(), 2);
        assert!(!page.is_last());

        let page = service.list_page(PageRequest::new(1, 2)).unwrap();
        assert_eq!(page.items.len(), 1);
        assert!(page.is_last());

        let page = service.list_page(PageRequest::new(5, 2)).unwrap();
        assert!(page.items.is_empty());

        assert!(service
            .list_page(PageRequest::new(0, 0))
            .unwrap_err()
            .is_validation());
    }

    #[test]
    fn test_empty_listing_has_one_page() {
        let mut store = MemoryStore::new();
        let service = TransactionService::new(&mut store);
        let page = service.list_page(PageRequest::new(0, 20)).unwrap();
        assert_eq!(page.total_pages(), 1);
        assert!(page.is_last());
    }

    #[test]
    fn test_delete() {
        let mut store = MemoryStore::new();
        let mut service = TransactionService::new(&mut store);
        let txn = service.create(&input("5", "RENT", "2025-03-01")).unwrap();
        let id = txn.id().unwrap();

        assert_eq!(service.delete(id).unwrap(), txn);
        assert!(service.delete(id).unwrap_err().is_not_found());
    }

    #[test]
    fn test_summaries() {
        let mut store = MemoryStore::new();
        let mut service = TransactionService::new(&mut store);
        seed(&mut service);

        let january = service.month_summary(2025, 1).unwrap();
        assert_eq!(january.net(), Money::from_cents(124950));

        let report = service.all_months_summary().unwrap();
        assert_eq!(report.months.len(), 2);
        assert_eq!(report.months[0].month.to_string(), "2025-01");

        let net = service.monthly_net().unwrap();
        assert_eq!(net[&MonthKey::new(2025, 2).unwrap()], Money::from_cents(-80000));
    }

    #[test]
    fn test_summaries_of_huge_imported_amounts_fail_cleanly() {
        let mut store = MemoryStore::new();
        let mut service = TransactionService::new(&mut store);

        let result = service
            .import_csv("90000000000000000,SALARY,2025-01-01\n90000000000000000,SALARY,2025-01-02\n")
            .unwrap();
        assert_eq!(result.imported_count(), 2);

        assert!(service.all_months_summary().unwrap_err().is_validation());
        assert!(service.month_summary(2025, 1).unwrap_err().is_validation());
        assert!(service.monthly_net().unwrap_err().is_validation());
        assert!(service.export_csv(&ExportOptions::report()).is_err());
        assert!(service.export_csv(&ExportOptions::plain()).is_ok());
    }

    #[test]
    fn test_import_is_all_or_nothing() {
        let mut store = MemoryStore::new();
        let mut service = TransactionService::new(&mut store);

        let err = service
            .import_csv("amount,categoryType,date\n10,FOOD,2025-01-01\n20,GROCERY,2025-01-02\n")
            .unwrap_err();
        assert!(err.to_string().contains("GROCERY"));
        assert!(service.list().unwrap().is_empty());

        let result = service
            .import_csv("amount,categoryType,date\n10,FOOD,2025-01-01\n20,FOOD\n30,BUSINESS,2025-01-03\n")
            .unwrap();
        assert_eq!(result.imported_count(), 2);
        assert_eq!(result.skipped_lines, vec![3]);
        assert_eq!(service.list().unwrap().len(), 2);
    }

    #[test]
    fn test_export_is_sorted() {
        let mut store = MemoryStore::new();
        let mut service = TransactionService::new(&mut store);
        seed(&mut service);

        let bytes = service.export_csv(&ExportOptions::plain()).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert_eq!(
            text,
            "amount,categoryType,date\n\
             1500.00,SALARY,2025-01-05\n\
             250.50,FOOD,2025-01-10\n\
             800.00,FOOD,2025-02-01\n"
        );
    }

    #[test]
    fn test_export_then_import_round_trip() {
        let mut source = MemoryStore::new();
        let mut service = TransactionService::new(&mut source);
        seed(&mut service);
        let report = service.export_csv(&ExportOptions::report()).unwrap();
        let text = String::from_utf8(report).unwrap();
        let original = service.list().unwrap();

        let mut target = MemoryStore::new();
        let mut other = TransactionService::new(&mut target);
        let result = other.import_csv(&text).unwrap();
        assert_eq!(result.skipped_count(), 0);

        let copied = other.list().unwrap();
        assert_eq!(copied.len(), original.len());
        for (a, b) in original.iter().zip(&copied) {
            assert!(a.same_entry(b));
        }
    }

    #[test]
    fn test_mutations_are_audited() {
        let temp_dir = TempDir::new().unwrap();
        let audit = AuditLogger::new(temp_dir.path().join("audit.log"));
        let mut store = JsonFileStore::open(temp_dir.path().join("transactions.json")).unwrap();
        let mut service = TransactionService::new(&mut store).with_audit(&audit);

        let txn = service.create(&input("12.50", "TRAVEL", "2025-04-04")).unwrap();
        service.delete(txn.id().unwrap()).unwrap();
        service.import_csv("1,FOOD,2025-04-05\n").unwrap();
        service.clear().unwrap();

        let operations: Vec<Operation> = audit
            .read_all()
            .unwrap()
            .into_iter()
            .map(|e| e.operation)
            .collect();
        assert_eq!(
            operations,
            vec![
                Operation::Create,
                Operation::Delete,
                Operation::Import,
                Operation::Clear
            ]
        );
    }

    #[test]
    fn test_failed_create_is_not_audited() {
        let temp_dir = TempDir::new().unwrap();
        let audit = AuditLogger::new(temp_dir.path().join("audit.log"));
        let mut store = MemoryStore::new();
        let mut service = TransactionService::new(&mut store).with_audit(&audit);

        assert!(service.create(&input("x", "FOOD", "2025-01-01")).is_err());
        assert!(!audit.exists());
    }
}
