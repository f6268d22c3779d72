//! Lead book: the per-session lead table fed by bulk import.
//!
//! Leads exist only in session memory. The table is replaced wholesale by
//! each import and is never edited row by row.

use tracing::info;

use crate::table::Table;
use crate::xlsx::{self, XlsxError};

/// Header of the lead table before anything is imported.
pub const LEAD_COLUMNS: [&str; 27] = [
    "Lead",
    "Owner",
    "First Name",
    "Last Name",
    "Email",
    "Mobile Cc",
    "Mobile",
    "REMARK",
    "Designation",
    "Phone Co",
    "Phone",
    "Lead Source",
    "Sub Lead Source",
    "Lead Status",
    "Industry",
    "Department",
    "Annual Revenue",
    "Company",
    "Country",
    "State",
    "City",
    "Street",
    "Pincode",
    "Lead Priority",
    "Description",
    "Product",
    "Date",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeadBook {
    table: Table,
}

impl Default for LeadBook {
    fn default() -> Self {
        Self { table: Table::with_columns(LEAD_COLUMNS) }
    }
}

impl LeadBook {
    #[must_use]
    pub fn table(&self) -> &Table {
        &self.table
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Replace the lead table with the first worksheet of an uploaded
    /// workbook. Columns are taken as-is. Returns the imported row count.
    ///
    /// # Errors
    ///
    /// Returns an error if the upload is not a readable workbook; the
    /// current table is kept.
    pub fn import(&mut self, bytes: &[u8]) -> Result<usize, XlsxError> {
        let table = xlsx::read_table(bytes)?;
        let rows = table.len();
        info!(rows, columns = table.columns().len(), "lead table imported");
        self.table = table;
        Ok(rows)
    }

    /// Workbook bytes for download, or `None` while the table is empty.
    ///
    /// # Errors
    ///
    /// Returns an error if the workbook cannot be written.
    pub fn export(&self) -> Result<Option<Vec<u8>>, XlsxError> {
        if self.is_empty() {
            return Ok(None);
        }
        xlsx::write_table(&self.table).map(Some)
    }
}

#[cfg(test)]
#[path = "leads_test.rs"]
mod tests;
