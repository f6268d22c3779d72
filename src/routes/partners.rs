//! Channel-partner routes: form, category switch, submission, export.

use axum::extract::{Form, Query, State};
use axum::http::StatusCode;
use axum::response::{Html, Redirect, Response};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;
use tracing::{error, warn};
use uuid::Uuid;

use super::{PageQuery, resolve_session, xlsx_attachment};
use crate::partner::{PartnerCategory, PartnerForm, timestamp_now};
use crate::services::sync::{self, LiveView};
use crate::sheets::SheetError;
use crate::state::{AppState, Notice};
use crate::views::partners::{PartnersPage, render_partners_page};
use crate::xlsx;

pub const PARTNERS_EXPORT_FILENAME: &str = "BROBOND_Partners.xlsx";

const SUBMIT_FAILED: &str = "Partner data could not be saved to the cloud database. Your entries were kept; please try again.";
const LOST_APPEND: &str =
    "Your last submission is missing from the cloud database. It may have been overwritten by a simultaneous update; please submit it again.";

#[derive(Debug, Deserialize)]
pub struct CategoryBody {
    pub category: String,
}

/// Partner form post. `category` is the slug the form was rendered for
/// and takes precedence over the session selection.
#[derive(Debug, Deserialize)]
pub struct SubmitBody {
    #[serde(default)]
    pub category: Option<String>,
    #[serde(flatten)]
    pub form: PartnerForm,
}

fn partners_location(query: &PageQuery) -> &'static str {
    if query.is_form_only() { "/partners?view=form" } else { "/partners" }
}

/// `GET /partners`: partner form, plus the live table outside form-only mode.
pub async fn page(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(query): Query<PageQuery>,
) -> (CookieJar, Html<String>) {
    let (session_id, jar) = resolve_session(jar);
    let html = render_for_session(&state, session_id, query.is_form_only()).await;
    (jar, Html(html))
}

pub(crate) async fn render_for_session(state: &AppState, session_id: Uuid, form_only: bool) -> String {
    let (category, draft, notice, last_submission) = state
        .with_session(session_id, |s| {
            let last = if form_only { None } else { s.last_submission.take() };
            (s.category, s.draft.clone(), s.notice.take(), last)
        })
        .await;
    let mut notices: Vec<Notice> = notice.into_iter().collect();

    let live = if form_only {
        None
    } else {
        let live = sync::view(state.store.as_ref(), &state.sync.worksheet).await;
        if let (LiveView::Rows(table), Some(record)) = (&live, &last_submission) {
            if !sync::missing_records(table, std::slice::from_ref(record)).is_empty() {
                warn!(%session_id, name = %record.name, "submitted partner row missing after write-back");
                notices.push(Notice::warning(LOST_APPEND));
            }
        }
        Some(live)
    };

    render_partners_page(PartnersPage { category, draft, notices, form_only, live })
}

/// `POST /partners/category`: switch the partner type shown by the form.
pub async fn select_category(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(query): Query<PageQuery>,
    Form(body): Form<CategoryBody>,
) -> (CookieJar, Redirect) {
    let (session_id, jar) = resolve_session(jar);
    if let Some(category) = PartnerCategory::from_slug(&body.category) {
        state.with_session(session_id, |s| s.category = category).await;
    }
    (jar, Redirect::to(partners_location(&query)))
}

/// `POST /partners`: collect the form and append it to the partner sheet.
pub async fn submit(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(query): Query<PageQuery>,
    Form(body): Form<SubmitBody>,
) -> (CookieJar, Redirect) {
    let (session_id, jar) = resolve_session(jar);
    let SubmitBody { category: posted, form } = body;
    let posted = posted.as_deref().and_then(PartnerCategory::from_slug);
    let category = state
        .with_session(session_id, |s| {
            if let Some(category) = posted {
                s.category = category;
            }
            s.category
        })
        .await;
    let record = form.clone().collect(category, timestamp_now());

    let result = sync::submit(state.store.as_ref(), &state.sync.worksheet, &record, state.sync.init_policy).await;

    state
        .with_session(session_id, |s| match result {
            Ok(outcome) => s.submitted(record, Notice::success(outcome.message())),
            Err(e) => {
                error!(error = %e, code = e.error_code(), retryable = e.retryable(), %session_id, "partner submission failed");
                s.submit_failed(form, Notice::error(SUBMIT_FAILED));
            }
        })
        .await;

    (jar, Redirect::to(partners_location(&query)))
}

/// `GET /partners/export.xlsx`: download the current partner sheet.
pub async fn export(State(state): State<AppState>) -> Result<Response, StatusCode> {
    let table = state
        .store
        .read(&state.sync.worksheet)
        .await
        .map_err(sheet_error_to_status)?;
    if table.is_empty() {
        return Err(StatusCode::NOT_FOUND);
    }

    let bytes = xlsx::write_table(&table).map_err(|e| {
        error!(error = %e, "partner export failed");
        StatusCode::INTERNAL_SERVER_ERROR
    })?;
    Ok(xlsx_attachment(PARTNERS_EXPORT_FILENAME, bytes))
}

pub(crate) fn sheet_error_to_status(err: SheetError) -> StatusCode {
    warn!(error = %err, code = err.error_code(), "partner sheet read failed");
    match err {
        SheetError::NotFound(_) => StatusCode::NOT_FOUND,
        SheetError::Transient(_) => StatusCode::SERVICE_UNAVAILABLE,
        _ => StatusCode::BAD_GATEWAY,
    }
}

#[cfg(test)]
#[path = "partners_test.rs"]
mod tests;
