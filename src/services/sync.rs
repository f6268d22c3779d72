//! Partner sheet synchronizer: read, append, write back.
//!
//! DESIGN
//! ======
//! A submission reads the whole worksheet, appends the new row and writes
//! the combined table back over the remote contents. When the read fails
//! because the worksheet does not exist, the record alone is written as a
//! fresh table. Other read failures surface to the caller unless the
//! `AnyReadFailure` policy asks for the legacy "initialize on any error"
//! behavior.
//!
//! TRADE-OFFS
//! ==========
//! Read-modify-write without locking: two submissions that both read
//! before either writes lose the earlier append. Write volume is low, so
//! the race is detected after the fact (`missing_records`) rather than
//! prevented.

use tracing::{info, warn};

use crate::partner::PartnerRecord;
use crate::sheets::{SheetError, SheetStore};
use crate::table::Table;

/// Which read failures allow an initializing write.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InitPolicy {
    /// Only a missing worksheet.
    #[default]
    MissingOnly,
    /// Every read failure. Can overwrite an existing worksheet whose read
    /// failed for an unrelated reason.
    AnyReadFailure,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Appended to the existing table, which now holds `total_rows` rows.
    Appended { total_rows: usize },
    /// The worksheet was (re)created holding only the new record.
    Initialized,
}

impl SubmitOutcome {
    /// Confirmation shown to the user.
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Self::Appended { .. } => "Cloud Database Updated.",
            Self::Initialized => "Database Initialized.",
        }
    }
}

/// Table to write back, decided from the read result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WritePlan {
    Append(Table),
    Initialize(Table),
}

impl WritePlan {
    #[must_use]
    pub fn table(&self) -> &Table {
        match self {
            Self::Append(table) | Self::Initialize(table) => table,
        }
    }

    #[must_use]
    pub fn outcome(&self) -> SubmitOutcome {
        match self {
            Self::Append(table) => SubmitOutcome::Appended { total_rows: table.len() },
            Self::Initialize(_) => SubmitOutcome::Initialized,
        }
    }
}

/// Decide what to write for `record` given the result of reading the
/// current worksheet.
///
/// # Errors
///
/// Returns the read error when `policy` does not allow initializing after
/// it.
pub fn plan_write(
    existing: Result<Table, SheetError>,
    record: &PartnerRecord,
    policy: InitPolicy,
) -> Result<WritePlan, SheetError> {
    match existing {
        Ok(table) => Ok(WritePlan::Append(table.concat(record.to_table()))),
        Err(err) if err.is_not_found() || policy == InitPolicy::AnyReadFailure => {
            warn!(error = %err, code = err.error_code(), "partner sheet unreadable; initializing");
            Ok(WritePlan::Initialize(record.to_table()))
        }
        Err(err) => Err(err),
    }
}

/// Append `record` to `worksheet`.
///
/// # Errors
///
/// Returns a [`SheetError`] if the read fails in a way `policy` does not
/// recover from, or if the write fails.
pub async fn submit(
    store: &dyn SheetStore,
    worksheet: &str,
    record: &PartnerRecord,
    policy: InitPolicy,
) -> Result<SubmitOutcome, SheetError> {
    let plan = plan_write(store.read(worksheet).await, record, policy)?;
    store.write(worksheet, plan.table()).await?;

    let outcome = plan.outcome();
    info!(%worksheet, category = record.category().label(), ?outcome, "partner record submitted");
    Ok(outcome)
}

/// Live read-only projection of the worksheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LiveView {
    Rows(Table),
    Empty,
    /// The read failed; the kind is logged, the user sees a generic notice.
    Syncing,
}

/// Re-read the worksheet for display.
pub async fn view(store: &dyn SheetStore, worksheet: &str) -> LiveView {
    match store.read(worksheet).await {
        Ok(table) if table.is_empty() => LiveView::Empty,
        Ok(table) => LiveView::Rows(table),
        Err(err) => {
            warn!(error = %err, code = err.error_code(), %worksheet, "partner sheet read failed");
            LiveView::Syncing
        }
    }
}

/// Submitted records that no row of `table` carries, e.g. appends lost
/// to a concurrent write-back.
#[must_use]
pub fn missing_records<'a>(table: &Table, records: &'a [PartnerRecord]) -> Vec<&'a PartnerRecord> {
    records
        .iter()
        .filter(|record| !table.contains_row(&record.cells()))
        .collect()
}

#[cfg(test)]
#[path = "sync_test.rs"]
mod tests;
