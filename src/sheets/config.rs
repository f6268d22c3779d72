//! Remote store configuration parsed from environment variables.

use std::path::PathBuf;

use crate::services::sync::InitPolicy;

pub const DEFAULT_WORKSHEET: &str = "Sheet1";
pub const DEFAULT_SHEETS_API_BASE_URL: &str = "https://sheets.googleapis.com/v4";
pub const DEFAULT_SHEETS_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_SHEETS_CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config parse failed: {0}")]
    Parse(String),

    #[error("missing config: env var {var} not set")]
    Missing { var: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SheetsTimeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

/// Connection details for a Google Sheets document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoogleSheetsConfig {
    pub spreadsheet_id: String,
    pub credentials_path: PathBuf,
    pub base_url: String,
    pub timeouts: SheetsTimeouts,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetsConfig {
    pub worksheet: String,
    pub init_policy: InitPolicy,
    /// `None` when no document is configured; the console then runs on
    /// an in-memory store.
    pub google: Option<GoogleSheetsConfig>,
}

impl SheetsConfig {
    /// Build typed store config from environment variables.
    ///
    /// Optional, but required together:
    /// - `SHEETS_SPREADSHEET_ID`: document id or full document URL
    /// - `SHEETS_CREDENTIALS_PATH`: service-account JSON key file
    ///
    /// Optional:
    /// - `SHEETS_WORKSHEET`: default `Sheet1`
    /// - `SHEETS_API_BASE_URL`: default Sheets v4 endpoint
    /// - `SHEETS_REQUEST_TIMEOUT_SECS`: default 30
    /// - `SHEETS_CONNECT_TIMEOUT_SECS`: default 10
    /// - `PARTNER_INIT_POLICY`: `missing` (default) or `any`
    ///
    /// # Errors
    ///
    /// Returns an error if only one of the document settings is present or
    /// a value cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        let worksheet = std::env::var("SHEETS_WORKSHEET")
            .ok()
            .map(|w| w.trim().to_owned())
            .filter(|w| !w.is_empty())
            .unwrap_or_else(|| DEFAULT_WORKSHEET.to_owned());
        let init_policy = parse_init_policy(std::env::var("PARTNER_INIT_POLICY").ok().as_deref())?;

        let spreadsheet = non_empty_var("SHEETS_SPREADSHEET_ID");
        let credentials = non_empty_var("SHEETS_CREDENTIALS_PATH");

        let google = match (spreadsheet, credentials) {
            (None, None) => None,
            (Some(_), None) => return Err(ConfigError::Missing { var: "SHEETS_CREDENTIALS_PATH".into() }),
            (None, Some(_)) => return Err(ConfigError::Missing { var: "SHEETS_SPREADSHEET_ID".into() }),
            (Some(raw_id), Some(path)) => Some(GoogleSheetsConfig {
                spreadsheet_id: extract_spreadsheet_id(&raw_id)?,
                credentials_path: PathBuf::from(path),
                base_url: std::env::var("SHEETS_API_BASE_URL")
                    .unwrap_or_else(|_| DEFAULT_SHEETS_API_BASE_URL.to_owned())
                    .trim_end_matches('/')
                    .to_owned(),
                timeouts: SheetsTimeouts {
                    request_secs: env_parse_u64("SHEETS_REQUEST_TIMEOUT_SECS", DEFAULT_SHEETS_REQUEST_TIMEOUT_SECS),
                    connect_secs: env_parse_u64("SHEETS_CONNECT_TIMEOUT_SECS", DEFAULT_SHEETS_CONNECT_TIMEOUT_SECS),
                },
            }),
        };

        Ok(Self { worksheet, init_policy, google })
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn env_parse_u64(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(default)
}

fn parse_init_policy(raw: Option<&str>) -> Result<InitPolicy, ConfigError> {
    match raw.unwrap_or("missing") {
        "missing" => Ok(InitPolicy::MissingOnly),
        "any" => Ok(InitPolicy::AnyReadFailure),
        other => Err(ConfigError::Parse(format!(
            "unknown PARTNER_INIT_POLICY '{other}' (expected 'missing' or 'any')"
        ))),
    }
}

/// Accept a bare document id or a `.../spreadsheets/d/<id>/edit` URL.
pub(crate) fn extract_spreadsheet_id(raw: &str) -> Result<String, ConfigError> {
    let raw = raw.trim();
    if !raw.contains('/') {
        return Ok(raw.to_owned());
    }

    let mut parts = raw.split('/');
    while let Some(part) = parts.next() {
        if part == "d" {
            if let Some(id) = parts.next().filter(|id| !id.is_empty()) {
                return Ok(id.to_owned());
            }
        }
    }
    Err(ConfigError::Parse(format!("no spreadsheet id in SHEETS_SPREADSHEET_ID '{raw}'")))
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
