//! Master lead routes: page, bulk import, export.

use axum::extract::{Multipart, Query, State};
use axum::http::StatusCode;
use axum::response::{Html, Redirect, Response};
use axum_extra::extract::cookie::CookieJar;
use tracing::{error, warn};
use uuid::Uuid;

use super::{PageQuery, partners, resolve_session, session_cookie_id, xlsx_attachment};
use crate::state::{AppState, Notice};
use crate::views::leads::render_leads_page;

pub const LEADS_EXPORT_FILENAME: &str = "BROBOND_Leads.xlsx";

const IMPORT_FIELD: &str = "file";

/// `GET /leads`: lead repository, or the partner form in form-only mode.
pub async fn page(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(query): Query<PageQuery>,
) -> (CookieJar, Html<String>) {
    if query.is_form_only() {
        return partners::page(State(state), jar, Query(query)).await;
    }

    let (session_id, jar) = resolve_session(jar);
    let (leads, notice) = state
        .with_session(session_id, |s| (s.leads.table().clone(), s.notice.take()))
        .await;
    (jar, Html(render_leads_page(leads, notice.into_iter().collect())))
}

/// `POST /leads/import`: replace the session's lead table with an upload.
///
/// A request without a file (or with an empty one) leaves the lead table
/// as it is.
pub async fn import(
    State(state): State<AppState>,
    jar: CookieJar,
    mut multipart: Multipart,
) -> Result<(CookieJar, Redirect), StatusCode> {
    let (session_id, jar) = resolve_session(jar);

    let mut upload = None;
    while let Some(field) = multipart.next_field().await.map_err(|e| {
        warn!(error = %e, "lead upload rejected");
        StatusCode::BAD_REQUEST
    })? {
        if field.name() != Some(IMPORT_FIELD) {
            continue;
        }
        let bytes = field.bytes().await.map_err(|e| {
            warn!(error = %e, "lead upload truncated");
            StatusCode::BAD_REQUEST
        })?;
        if !bytes.is_empty() {
            upload = Some(bytes);
        }
    }

    match upload {
        Some(bytes) => apply_import(&state, session_id, &bytes).await,
        None => {
            state
                .with_session(session_id, |s| s.notice = Some(Notice::info("Choose an .xlsx file to import.")))
                .await;
        }
    }
    Ok((jar, Redirect::to("/leads")))
}

pub(crate) async fn apply_import(state: &AppState, session_id: Uuid, bytes: &[u8]) {
    state
        .with_session(session_id, |s| {
            s.notice = Some(match s.leads.import(bytes) {
                Ok(_) => Notice::success("Data synchronization successful."),
                Err(e) => {
                    warn!(error = %e, %session_id, "lead import failed");
                    Notice::error("The uploaded file could not be read as an Excel workbook.")
                }
            });
        })
        .await;
}

/// `GET /leads/export.xlsx`: download the session's lead table.
pub async fn export(State(state): State<AppState>, jar: CookieJar) -> Result<Response, StatusCode> {
    let Some(session_id) = session_cookie_id(&jar) else {
        return Err(StatusCode::NOT_FOUND);
    };

    let exported = state.with_session(session_id, |s| s.leads.export()).await;
    match exported {
        Ok(Some(bytes)) => Ok(xlsx_attachment(LEADS_EXPORT_FILENAME, bytes)),
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(e) => {
            error!(error = %e, %session_id, "lead export failed");
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

#[cfg(test)]
#[path = "leads_test.rs"]
mod tests;
