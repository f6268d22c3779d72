//! Locked console sections. Each still honors `view=form`.

use axum::extract::{Query, State};
use axum::response::Html;
use axum_extra::extract::cookie::CookieJar;

use super::{PageQuery, partners};
use crate::state::AppState;
use crate::views::{Section, render_locked_page};

async fn locked_section(state: AppState, jar: CookieJar, query: PageQuery, section: Section) -> (CookieJar, Html<String>) {
    if query.is_form_only() {
        return partners::page(State(state), jar, Query(query)).await;
    }
    (jar, Html(render_locked_page(section)))
}

/// `GET /`: sales dashboard.
pub async fn dashboard(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(query): Query<PageQuery>,
) -> (CookieJar, Html<String>) {
    locked_section(state, jar, query, Section::SalesDashboard).await
}

/// `GET /expenses`
pub async fn expenses(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(query): Query<PageQuery>,
) -> (CookieJar, Html<String>) {
    locked_section(state, jar, query, Section::ExpenseTracker).await
}

/// `GET /hrm`
pub async fn hrm(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(query): Query<PageQuery>,
) -> (CookieJar, Html<String>) {
    locked_section(state, jar, query, Section::Hrm).await
}

/// `GET /ceo`
pub async fn ceo(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(query): Query<PageQuery>,
) -> (CookieJar, Html<String>) {
    locked_section(state, jar, query, Section::CeoDesk).await
}

/// `GET /md`
pub async fn md(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(query): Query<PageQuery>,
) -> (CookieJar, Html<String>) {
    locked_section(state, jar, query, Section::MdPanel).await
}
