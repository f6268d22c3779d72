//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every console page is a plain GET rendered on the server; every form
//! posts back and redirects (post/redirect/get), so a refresh never
//! re-submits. Browser identity is a session cookie; there is no login.

pub mod leads;
pub mod pages;
pub mod partners;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::StatusCode;
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Deserialize;
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::state::AppState;
use crate::xlsx::XLSX_CONTENT_TYPE;

pub const SESSION_COOKIE: &str = "brobond_session";

/// Largest accepted lead upload.
const UPLOAD_LIMIT_BYTES: usize = 16 * 1024 * 1024;

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(pages::dashboard))
        .route("/leads", get(leads::page))
        .route("/leads/import", post(leads::import).layer(DefaultBodyLimit::max(UPLOAD_LIMIT_BYTES)))
        .route("/leads/export.xlsx", get(leads::export))
        .route("/partners", get(partners::page).post(partners::submit))
        .route("/partners/category", post(partners::select_category))
        .route("/partners/export.xlsx", get(partners::export))
        .route("/expenses", get(pages::expenses))
        .route("/hrm", get(pages::hrm))
        .route("/ceo", get(pages::ceo))
        .route("/md", get(pages::md))
        .route("/healthz", get(healthz))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

// =============================================================================
// QUERY
// =============================================================================

/// Recognized query parameters. Only `view=form` has an effect; anything
/// else is ignored.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub view: Option<String>,
}

impl PageQuery {
    /// Navigation-less partner-form mode.
    #[must_use]
    pub fn is_form_only(&self) -> bool {
        self.view.as_deref() == Some("form")
    }
}

#[cfg(test)]
impl PageQuery {
    pub fn form_only() -> Self {
        Self { view: Some("form".into()) }
    }
}

// =============================================================================
// SESSION COOKIE
// =============================================================================

pub(crate) fn session_cookie_id(jar: &CookieJar) -> Option<Uuid> {
    jar.get(SESSION_COOKIE).and_then(|cookie| Uuid::parse_str(cookie.value()).ok())
}

/// Session id from the cookie, minting a new one (and its cookie) when the
/// browser has none.
pub(crate) fn resolve_session(jar: CookieJar) -> (Uuid, CookieJar) {
    if let Some(id) = session_cookie_id(&jar) {
        return (id, jar);
    }

    let id = Uuid::new_v4();
    let cookie = Cookie::build((SESSION_COOKIE, id.to_string()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax);
    (id, jar.add(cookie))
}

// =============================================================================
// DOWNLOADS
// =============================================================================

pub(crate) fn xlsx_attachment(filename: &str, bytes: Vec<u8>) -> Response {
    (
        [
            (CONTENT_TYPE, XLSX_CONTENT_TYPE.to_owned()),
            (CONTENT_DISPOSITION, format!("attachment; filename=\"{filename}\"")),
        ],
        bytes,
    )
        .into_response()
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
