use super::*;
use crate::partner::{PARTNER_COLUMNS, PartnerCategory, PartnerForm};
use crate::sheets::MemoryStore;
use std::sync::Mutex;

const SHEET: &str = "Sheet1";

// =========================================================================
// MockStore: scripted read result, recorded writes
// =========================================================================

struct FailingReadStore {
    read_error: Mutex<Option<SheetError>>,
    writes: Mutex<Vec<Table>>,
}

impl FailingReadStore {
    fn new(read_error: SheetError) -> Self {
        Self { read_error: Mutex::new(Some(read_error)), writes: Mutex::new(Vec::new()) }
    }

    fn writes(&self) -> Vec<Table> {
        self.writes.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl SheetStore for FailingReadStore {
    async fn read(&self, worksheet: &str) -> Result<Table, SheetError> {
        Err(self
            .read_error
            .lock()
            .unwrap()
            .take()
            .unwrap_or_else(|| SheetError::NotFound(worksheet.to_owned())))
    }

    async fn write(&self, _worksheet: &str, table: &Table) -> Result<(), SheetError> {
        self.writes.lock().unwrap().push(table.clone());
        Ok(())
    }
}

struct RejectingWriteStore;

#[async_trait::async_trait]
impl SheetStore for RejectingWriteStore {
    async fn read(&self, _worksheet: &str) -> Result<Table, SheetError> {
        Ok(Table::default())
    }

    async fn write(&self, _worksheet: &str, _table: &Table) -> Result<(), SheetError> {
        Err(SheetError::Unauthorized { status: 403 })
    }
}

fn record(category: PartnerCategory, name: &str) -> PartnerRecord {
    PartnerForm {
        name: name.into(),
        contact: "9000000000".into(),
        state: "Maharashtra".into(),
        city: "Pune".into(),
        address: "MG Road".into(),
        detail_1: format!("{name} d1"),
        detail_2: format!("{name} d2"),
        remarks: String::new(),
    }
    .collect(category, "2026-10-18 10:30".into())
}

fn seeded_store(rows: usize) -> MemoryStore {
    let mut table = Table::with_columns(PARTNER_COLUMNS);
    for i in 0..rows {
        table.push_row(record(PartnerCategory::PrimaryStockist, &format!("Seed {i}")).to_row());
    }
    MemoryStore::with_worksheet(SHEET, table)
}

// =========================================================================
// submit
// =========================================================================

#[tokio::test]
async fn submit_appends_exactly_one_row_per_category() {
    for category in PartnerCategory::ALL {
        let store = seeded_store(2);
        let rec = record(category, "Acme");

        let outcome = submit(&store, SHEET, &rec, InitPolicy::MissingOnly).await.unwrap();
        assert_eq!(outcome, SubmitOutcome::Appended { total_rows: 3 });

        let table = store.read(SHEET).await.unwrap();
        assert_eq!(table.len(), 3);
        let last = &table.rows()[2];
        assert_eq!(last[1], category.label());
        assert_eq!(last[7], "Acme d1");
        assert_eq!(last[8], "Acme d2");
        assert_eq!(table.rows()[0][2], "Seed 0");
    }
}

#[tokio::test]
async fn submit_accepts_all_empty_fields() {
    let store = seeded_store(0);
    let rec = PartnerForm::default().collect(PartnerCategory::LogisticsAgent, "2026-10-18 10:30".into());

    submit(&store, SHEET, &rec, InitPolicy::MissingOnly).await.unwrap();

    let table = store.read(SHEET).await.unwrap();
    assert_eq!(table.len(), 1);
    assert_eq!(table.rows()[0][1], "Logistics Agent (CFA)");
    assert!(table.rows()[0][2..].iter().all(String::is_empty));
}

#[tokio::test]
async fn submit_initializes_missing_worksheet() {
    let store = MemoryStore::new();
    let rec = record(PartnerCategory::RetailDistributor, "First");

    let outcome = submit(&store, SHEET, &rec, InitPolicy::MissingOnly).await.unwrap();
    assert_eq!(outcome, SubmitOutcome::Initialized);
    assert_eq!(outcome.message(), "Database Initialized.");
    assert_eq!(store.read(SHEET).await.unwrap(), rec.to_table());
}

#[tokio::test]
async fn transient_read_failure_skips_write_by_default() {
    let store = FailingReadStore::new(SheetError::Transient("connection reset".into()));
    let rec = record(PartnerCategory::PrimaryStockist, "Acme");

    let err = submit(&store, SHEET, &rec, InitPolicy::MissingOnly).await.unwrap_err();
    assert!(err.retryable());
    assert!(store.writes().is_empty());
}

#[tokio::test]
async fn any_read_failure_policy_writes_only_the_new_row() {
    let store = FailingReadStore::new(SheetError::Unauthorized { status: 401 });
    let rec = record(PartnerCategory::PrimaryStockist, "Acme");

    let outcome = submit(&store, SHEET, &rec, InitPolicy::AnyReadFailure).await.unwrap();
    assert_eq!(outcome, SubmitOutcome::Initialized);

    let writes = store.writes();
    assert_eq!(writes.len(), 1);
    assert_eq!(writes[0].len(), 1);
    assert_eq!(writes[0], rec.to_table());
}

#[tokio::test]
async fn write_failure_surfaces() {
    let rec = record(PartnerCategory::PrimaryStockist, "Acme");
    let err = submit(&RejectingWriteStore, SHEET, &rec, InitPolicy::MissingOnly).await.unwrap_err();
    assert!(matches!(err, SheetError::Unauthorized { status: 403 }));
}

// =========================================================================
// read-modify-write race
// =========================================================================

#[tokio::test]
async fn interleaved_submissions_lose_an_append_and_it_is_detected() {
    let store = seeded_store(1);
    let first = record(PartnerCategory::PrimaryStockist, "First");
    let second = record(PartnerCategory::LogisticsAgent, "Second");

    // Both submitters read before either writes.
    let first_plan = plan_write(store.read(SHEET).await, &first, InitPolicy::MissingOnly).unwrap();
    let second_plan = plan_write(store.read(SHEET).await, &second, InitPolicy::MissingOnly).unwrap();
    store.write(SHEET, first_plan.table()).await.unwrap();
    store.write(SHEET, second_plan.table()).await.unwrap();

    let table = store.read(SHEET).await.unwrap();
    assert_eq!(table.len(), 2, "one append is lost to the later write-back");

    let submitted = [first.clone(), second];
    let missing = missing_records(&table, &submitted);
    assert_eq!(missing, vec![&first]);
}

#[tokio::test]
async fn sequential_submissions_keep_both_rows() {
    let store = seeded_store(0);
    let first = record(PartnerCategory::PrimaryStockist, "First");
    let second = record(PartnerCategory::PrimaryStockist, "Second");

    submit(&store, SHEET, &first, InitPolicy::MissingOnly).await.unwrap();
    submit(&store, SHEET, &second, InitPolicy::MissingOnly).await.unwrap();

    let table = store.read(SHEET).await.unwrap();
    assert_eq!(table.len(), 2);
    assert!(missing_records(&table, &[first, second]).is_empty());
}

// =========================================================================
// view
// =========================================================================

#[tokio::test]
async fn view_distinguishes_rows_empty_and_syncing() {
    assert!(matches!(view(&seeded_store(2), SHEET).await, LiveView::Rows(t) if t.len() == 2));
    assert_eq!(view(&seeded_store(0), SHEET).await, LiveView::Empty);
    assert_eq!(view(&MemoryStore::new(), SHEET).await, LiveView::Syncing);
}

#[test]
fn appended_outcome_message() {
    assert_eq!(SubmitOutcome::Appended { total_rows: 4 }.message(), "Cloud Database Updated.");
}
