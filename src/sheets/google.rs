//! Google Sheets API v4 client.
//!
//! Thin HTTP wrapper over `values.get`, `values.update`,
//! `values.batchClear` and `batchUpdate` (worksheet creation).
//! Authentication uses a service-account key exchanged for bearer tokens.
//! Response parsing and status classification are pure functions for
//! testability.
//!
//! A full-table write puts the new grid over the old one first and only
//! then clears whatever the old table had below or to the right of it, so
//! a failed request never leaves the worksheet emptier than before.

use std::time::Duration;

use reqwest::Url;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use yup_oauth2::ServiceAccountAuthenticator;
use yup_oauth2::authenticator::DefaultAuthenticator;

use super::config::GoogleSheetsConfig;
use super::{SheetError, SheetStore};
use crate::table::Table;

const SPREADSHEETS_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets";

/// Last column a Google Sheets worksheet can have.
const MAX_COLUMN: usize = 18_278;

// =============================================================================
// CLIENT
// =============================================================================

pub struct GoogleSheetsClient {
    http: reqwest::Client,
    auth: DefaultAuthenticator,
    base_url: String,
    spreadsheet_id: String,
}

impl GoogleSheetsClient {
    /// Load the service-account key and build the HTTP client.
    ///
    /// # Errors
    ///
    /// Returns an error if the key file cannot be read or parsed, or the
    /// HTTP client fails to build.
    pub async fn connect(config: &GoogleSheetsConfig) -> Result<Self, SheetError> {
        let key = yup_oauth2::read_service_account_key(&config.credentials_path)
            .await
            .map_err(|e| SheetError::Auth(format!("{}: {e}", config.credentials_path.display())))?;
        let auth = ServiceAccountAuthenticator::builder(key)
            .build()
            .await
            .map_err(|e| SheetError::Auth(e.to_string()))?;
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeouts.request_secs))
            .connect_timeout(Duration::from_secs(config.timeouts.connect_secs))
            .build()
            .map_err(|e| SheetError::HttpClientBuild(e.to_string()))?;

        Ok(Self {
            http,
            auth,
            base_url: config.base_url.clone(),
            spreadsheet_id: config.spreadsheet_id.clone(),
        })
    }

    async fn bearer_token(&self) -> Result<String, SheetError> {
        let token = self
            .auth
            .token(&[SPREADSHEETS_SCOPE])
            .await
            .map_err(|e| SheetError::Auth(e.to_string()))?;
        token
            .token()
            .map(str::to_owned)
            .ok_or_else(|| SheetError::Auth("token response carried no access token".into()))
    }

    /// Send an authorized request and return the body of a 2xx response.
    async fn send(&self, request: reqwest::RequestBuilder, worksheet: &str) -> Result<String, SheetError> {
        let token = self.bearer_token().await?;
        let response = request
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| SheetError::Transient(e.to_string()))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| SheetError::Transient(e.to_string()))?;

        if !(200..300).contains(&status) {
            return Err(classify_status(status, text, worksheet));
        }
        Ok(text)
    }
}

// =============================================================================
// WRITE PROTOCOL
// =============================================================================

/// The three value operations a full-table write is built from.
#[async_trait::async_trait]
pub(crate) trait ValuesApi: Send + Sync {
    /// Write `grid` starting at `A1`, leaving cells outside it untouched.
    async fn put_values(&self, worksheet: &str, grid: &[Vec<String>]) -> Result<(), SheetError>;

    /// Empty every A1 range in `ranges`.
    async fn clear_ranges(&self, worksheet: &str, ranges: &[String]) -> Result<(), SheetError>;

    async fn add_worksheet(&self, worksheet: &str) -> Result<(), SheetError>;
}

/// Replace the contents of `worksheet` with `table`.
///
/// The grid is written first; a missing worksheet is created and the
/// write retried. Clearing the stale tail comes last; its failure is
/// logged and the write still succeeds.
pub(crate) async fn overwrite(api: &dyn ValuesApi, worksheet: &str, table: &Table) -> Result<(), SheetError> {
    let grid = table.to_grid();
    match api.put_values(worksheet, &grid).await {
        Ok(()) => {}
        Err(SheetError::NotFound(_)) => {
            api.add_worksheet(worksheet).await?;
            api.put_values(worksheet, &grid).await?;
        }
        Err(e) => return Err(e),
    }

    let tail = stale_tail_ranges(worksheet, grid.len(), table.columns().len());
    if let Err(e) = api.clear_ranges(worksheet, &tail).await {
        warn!(error = %e, code = e.error_code(), %worksheet, "stale cells left around rewritten table");
    }
    Ok(())
}

#[async_trait::async_trait]
impl ValuesApi for GoogleSheetsClient {
    async fn put_values(&self, worksheet: &str, grid: &[Vec<String>]) -> Result<(), SheetError> {
        let range = a1_range(worksheet);
        let url = values_url(&self.base_url, &self.spreadsheet_id, &range, None)?;
        let body = ValueRangeBody { range: &range, major_dimension: "ROWS", values: grid };
        let request = self
            .http
            .put(url)
            .query(&[("valueInputOption", "RAW")])
            .json(&body);
        self.send(request, worksheet).await?;
        Ok(())
    }

    async fn clear_ranges(&self, worksheet: &str, ranges: &[String]) -> Result<(), SheetError> {
        if ranges.is_empty() {
            return Ok(());
        }
        let url = batch_clear_url(&self.base_url, &self.spreadsheet_id)?;
        let body = serde_json::json!({ "ranges": ranges });
        self.send(self.http.post(url).json(&body), worksheet).await?;
        Ok(())
    }

    async fn add_worksheet(&self, worksheet: &str) -> Result<(), SheetError> {
        let url = batch_update_url(&self.base_url, &self.spreadsheet_id)?;
        let body = serde_json::json!({
            "requests": [{ "addSheet": { "properties": { "title": worksheet } } }]
        });
        self.send(self.http.post(url).json(&body), worksheet).await?;
        info!(%worksheet, "worksheet created");
        Ok(())
    }
}

#[async_trait::async_trait]
impl SheetStore for GoogleSheetsClient {
    async fn read(&self, worksheet: &str) -> Result<Table, SheetError> {
        let url = values_url(&self.base_url, &self.spreadsheet_id, &a1_range(worksheet), None)?;
        let request = self
            .http
            .get(url)
            .query(&[("majorDimension", "ROWS"), ("valueRenderOption", "FORMATTED_VALUE")]);
        let text = self.send(request, worksheet).await?;
        parse_values(&text)
    }

    async fn write(&self, worksheet: &str, table: &Table) -> Result<(), SheetError> {
        overwrite(self, worksheet, table).await
    }
}

// =============================================================================
// WIRE TYPES
// =============================================================================

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ValueRangeBody<'a> {
    range: &'a str,
    major_dimension: &'static str,
    values: &'a [Vec<String>],
}

#[derive(Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<serde_json::Value>>,
}

// =============================================================================
// PURE HELPERS
// =============================================================================

/// A1 range covering a whole worksheet: the quoted sheet name.
pub(crate) fn a1_range(worksheet: &str) -> String {
    format!("'{}'", worksheet.replace('\'', "''"))
}

/// `{base}/spreadsheets/{id}/values/{range}[:{action}]`
pub(crate) fn values_url(
    base_url: &str,
    spreadsheet_id: &str,
    range: &str,
    action: Option<&str>,
) -> Result<Url, SheetError> {
    let last = match action {
        Some(action) => format!("{range}:{action}"),
        None => range.to_owned(),
    };
    build_url(base_url, &["spreadsheets", spreadsheet_id, "values", &last])
}

/// `{base}/spreadsheets/{id}/values:batchClear`
pub(crate) fn batch_clear_url(base_url: &str, spreadsheet_id: &str) -> Result<Url, SheetError> {
    build_url(base_url, &["spreadsheets", spreadsheet_id, "values:batchClear"])
}

/// `{base}/spreadsheets/{id}:batchUpdate`
pub(crate) fn batch_update_url(base_url: &str, spreadsheet_id: &str) -> Result<Url, SheetError> {
    build_url(base_url, &["spreadsheets", &format!("{spreadsheet_id}:batchUpdate")])
}

fn build_url(base_url: &str, segments: &[&str]) -> Result<Url, SheetError> {
    let mut url = Url::parse(base_url).map_err(|e| SheetError::InvalidUrl(format!("{base_url}: {e}")))?;
    url.path_segments_mut()
        .map_err(|()| SheetError::InvalidUrl(base_url.to_owned()))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

/// Ranges of `worksheet` outside a `rows` x `columns` grid anchored at
/// `A1`: everything below it, and everything right of it.
pub(crate) fn stale_tail_ranges(worksheet: &str, rows: usize, columns: usize) -> Vec<String> {
    let sheet = a1_range(worksheet);
    let last = column_letters(MAX_COLUMN);
    let mut ranges = vec![format!("{sheet}!A{}:{last}", rows + 1)];
    if columns < MAX_COLUMN {
        ranges.push(format!("{sheet}!{}1:{last}", column_letters(columns + 1)));
    }
    ranges
}

/// A1 column name of a 1-based column index (`1` is `A`, `27` is `AA`).
pub(crate) fn column_letters(mut index: usize) -> String {
    let mut letters = Vec::new();
    while index > 0 {
        let rem = (index - 1) % 26;
        letters.push(b'A' + u8::try_from(rem).unwrap_or(0));
        index = (index - 1) / 26;
    }
    letters.reverse();
    String::from_utf8(letters).unwrap_or_default()
}

/// Map a non-success response to an error kind.
///
/// A missing worksheet comes back as `400 INVALID_ARGUMENT` with
/// "Unable to parse range"; a missing document as `404`.
pub(crate) fn classify_status(status: u16, body: String, worksheet: &str) -> SheetError {
    match status {
        404 => SheetError::NotFound(worksheet.to_owned()),
        400 if body.contains("Unable to parse range") => SheetError::NotFound(worksheet.to_owned()),
        401 | 403 => SheetError::Unauthorized { status },
        408 | 429 | 500..=599 => SheetError::Transient(format!("status {status}")),
        _ => SheetError::Api { status, body },
    }
}

/// Parse a `ValueRange` body. The first row is the header; scalar cells
/// are rendered as text and trailing cells the API omits read as empty.
pub(crate) fn parse_values(json: &str) -> Result<Table, SheetError> {
    let range: ValueRange = serde_json::from_str(json).map_err(|e| SheetError::Malformed(e.to_string()))?;
    let grid = range
        .values
        .into_iter()
        .map(|row| row.into_iter().map(value_text).collect())
        .collect();
    Ok(Table::from_grid(grid))
}

fn value_text(value: serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s,
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
#[path = "google_test.rs"]
mod tests;
