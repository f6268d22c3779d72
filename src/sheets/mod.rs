//! Remote tabular store: whole-worksheet reads and writes.
//!
//! DESIGN
//! ======
//! The store contract is coarse: `read` returns the entire
//! worksheet and `write` replaces it. There is no incremental append and
//! no concurrency token; callers that read-modify-write race each other.
//!
//! `SheetStore` is the seam between the console and Google Sheets so
//! routes and the synchronizer can run against `MemoryStore` in tests and
//! in local runs without credentials.

pub mod config;
pub mod google;

use std::collections::HashMap;
use std::sync::Mutex;

use crate::table::Table;

// =============================================================================
// ERROR TYPE
// =============================================================================

/// Remote store failure, classified so callers can pick a recovery.
#[derive(Debug, thiserror::Error)]
pub enum SheetError {
    /// The worksheet (or the whole document) does not exist.
    #[error("worksheet not found: {0}")]
    NotFound(String),

    /// Credentials were rejected.
    #[error("remote store rejected credentials (status {status})")]
    Unauthorized { status: u16 },

    /// Network failure, timeout, rate limiting or a server-side error.
    #[error("transient remote store failure: {0}")]
    Transient(String),

    /// Any other non-success response.
    #[error("remote store error: status {status}")]
    Api { status: u16, body: String },

    /// The response body could not be interpreted.
    #[error("remote store response malformed: {0}")]
    Malformed(String),

    /// An access token could not be obtained.
    #[error("access token unavailable: {0}")]
    Auth(String),

    /// A request URL could not be assembled from configuration.
    #[error("invalid request URL: {0}")]
    InvalidUrl(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

impl SheetError {
    /// Grepable code for log lines.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "E_SHEET_NOT_FOUND",
            Self::Unauthorized { .. } => "E_SHEET_UNAUTHORIZED",
            Self::Transient(_) => "E_SHEET_TRANSIENT",
            Self::Api { .. } => "E_SHEET_API",
            Self::Malformed(_) => "E_SHEET_MALFORMED",
            Self::Auth(_) => "E_SHEET_AUTH",
            Self::InvalidUrl(_) => "E_SHEET_INVALID_URL",
            Self::HttpClientBuild(_) => "E_SHEET_HTTP_CLIENT_BUILD",
        }
    }

    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    #[must_use]
    pub fn retryable(&self) -> bool {
        matches!(self, Self::Transient(_))
    }
}

// =============================================================================
// STORE TRAIT
// =============================================================================

/// Whole-worksheet access to the remote table. Enables mocking in tests.
#[async_trait::async_trait]
pub trait SheetStore: Send + Sync {
    /// Read every row of `worksheet`. An existing but empty worksheet reads
    /// as an empty table.
    ///
    /// # Errors
    ///
    /// Returns [`SheetError::NotFound`] when the worksheet does not exist,
    /// or another [`SheetError`] kind for every other failure.
    async fn read(&self, worksheet: &str) -> Result<Table, SheetError>;

    /// Replace the contents of `worksheet` with `table`, creating the
    /// worksheet if needed.
    ///
    /// # Errors
    ///
    /// Returns a [`SheetError`] if the remote store rejects the write.
    async fn write(&self, worksheet: &str, table: &Table) -> Result<(), SheetError>;
}

// =============================================================================
// IN-MEMORY STORE
// =============================================================================

/// Process-local store. Data is lost on restart.
#[derive(Default)]
pub struct MemoryStore {
    worksheets: Mutex<HashMap<String, Table>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with one worksheet.
    #[must_use]
    pub fn with_worksheet(worksheet: &str, table: Table) -> Self {
        let store = Self::new();
        store.lock().insert(worksheet.to_owned(), table);
        store
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, Table>> {
        self.worksheets.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

#[async_trait::async_trait]
impl SheetStore for MemoryStore {
    async fn read(&self, worksheet: &str) -> Result<Table, SheetError> {
        self.lock()
            .get(worksheet)
            .cloned()
            .ok_or_else(|| SheetError::NotFound(worksheet.to_owned()))
    }

    async fn write(&self, worksheet: &str, table: &Table) -> Result<(), SheetError> {
        self.lock().insert(worksheet.to_owned(), table.clone());
        Ok(())
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
