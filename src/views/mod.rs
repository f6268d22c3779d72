//! Server-rendered console pages.
//!
//! SYSTEM CONTEXT
//! ==============
//! Pages are Leptos views rendered to HTML strings on every request; there
//! is no client bundle. Forms post back to the server and the handlers
//! redirect, so every interaction is one render pass. The full console
//! has a navigation sidebar; the embeddable form-only mode (`view=form`)
//! renders the partner form with no navigation at all.

pub mod leads;
pub mod partners;
pub mod table;

use leptos::prelude::*;
use leptos::tachys::view::RenderHtml;

use crate::state::Notice;

const STYLESHEET: &str = "
body { margin: 0; font-family: Helvetica, Arial, sans-serif; color: #1E1E1E; background: #fafbfc; }
.console { display: flex; min-height: 100vh; }
.sidebar { background: #ffffff; min-width: 420px; max-width: 420px; border-right: 2px solid #e6e9ef; padding: 16px; box-sizing: border-box; }
.brand-title { font-size: 62px; font-weight: 900; text-align: center; margin-top: 5px; }
.brand-sub { font-size: 16px; text-align: center; font-weight: 700; color: #666; margin-bottom: 30px; text-transform: uppercase; }
.cat-label { background: #f1f3f6; padding: 20px; font-weight: 800; font-size: 24px; text-align: center; margin-bottom: 30px; border-radius: 8px; text-transform: uppercase; border: 2px solid #d1d5db; }
.nav { display: flex; flex-direction: column; }
.nav-link { font-size: 26px; font-weight: 700; color: #2C3E50; white-space: nowrap; margin-bottom: 12px; text-decoration: none; }
.nav-link--active { text-decoration: underline; }
.nav-link--locked { color: #8a94a6; }
.content { flex: 1; padding: 32px; }
.content--form-only { max-width: 960px; margin: 0 auto; }
.columns { display: flex; gap: 24px; }
.column { flex: 1; }
.field { display: flex; flex-direction: column; margin-bottom: 12px; }
.field input, .field textarea, .category-picker select { padding: 8px; font-size: 16px; }
.button { display: block; width: 100%; border: none; border-radius: 6px; padding: 18px 0; background: #1E1E1E; color: white; font-weight: 800; font-size: 20px; text-align: center; text-decoration: none; cursor: pointer; margin: 12px 0; }
.button--secondary { background: #2C3E50; font-size: 16px; padding: 10px 0; }
.notice { padding: 12px 16px; border-radius: 6px; margin: 12px 0; }
.notice--success { background: #e6f4ea; }
.notice--info { background: #e8f0fe; }
.notice--warning { background: #fef7e0; }
.notice--error { background: #fce8e6; }
.table-wrap { overflow: auto; max-height: 550px; }
.data-table { border-collapse: collapse; width: 100%; }
.data-table th, .data-table td { border: 1px solid #e6e9ef; padding: 6px 10px; text-align: left; white-space: nowrap; }
";

// =============================================================================
// SECTIONS
// =============================================================================

/// Navigation entries of the console sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    SalesDashboard,
    MasterLeads,
    ChannelPartners,
    ExpenseTracker,
    Hrm,
    CeoDesk,
    MdPanel,
}

impl Section {
    pub const ALL: [Self; 7] = [
        Self::SalesDashboard,
        Self::MasterLeads,
        Self::ChannelPartners,
        Self::ExpenseTracker,
        Self::Hrm,
        Self::CeoDesk,
        Self::MdPanel,
    ];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::SalesDashboard => "📊 SALES DASHBOARD",
            Self::MasterLeads => "📞 MASTER LEADS",
            Self::ChannelPartners => "🤝 CHANNEL PARTNERS",
            Self::ExpenseTracker => "💸 EXPENSE TRACKER",
            Self::Hrm => "👤 HRM (AYUSH)",
            Self::CeoDesk => "👑 CEO DESK",
            Self::MdPanel => "💼 MD PANEL",
        }
    }

    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Self::SalesDashboard => "/",
            Self::MasterLeads => "/leads",
            Self::ChannelPartners => "/partners",
            Self::ExpenseTracker => "/expenses",
            Self::Hrm => "/hrm",
            Self::CeoDesk => "/ceo",
            Self::MdPanel => "/md",
        }
    }

    /// Sections that only show a placeholder.
    #[must_use]
    pub fn is_locked(self) -> bool {
        !matches!(self, Self::MasterLeads | Self::ChannelPartners)
    }
}

// =============================================================================
// SHARED COMPONENTS
// =============================================================================

#[component]
fn Sidebar(active: Section) -> impl IntoView {
    let links = Section::ALL
        .into_iter()
        .map(|section| {
            let class = match (section == active, section.is_locked()) {
                (true, _) => "nav-link nav-link--active",
                (false, true) => "nav-link nav-link--locked",
                (false, false) => "nav-link",
            };
            view! { <a class=class href=section.path()>{section.label()}</a> }
        })
        .collect_view();

    view! {
        <aside class="sidebar">
            <div class="brand-title">"BROBOND"</div>
            <div class="brand-sub">"A BRAND BY SNBPL"</div>
            <div class="cat-label">"Management System"</div>
            <nav class="nav">{links}</nav>
        </aside>
    }
}

#[component]
pub fn NoticeList(notices: Vec<Notice>) -> impl IntoView {
    notices
        .into_iter()
        .map(|notice| {
            let class = notice.kind.css_class();
            view! { <div class=class>{notice.text}</div> }
        })
        .collect_view()
}

// =============================================================================
// DOCUMENTS
// =============================================================================

fn document(body: impl IntoView + 'static) -> String {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <title>"BROBOND"</title>
                <style>{STYLESHEET}</style>
            </head>
            <body>{body}</body>
        </html>
    }
    .to_html()
}

/// Full console: sidebar navigation plus the section content.
pub fn console_page(active: Section, content: impl IntoView + 'static) -> String {
    document(view! {
        <div class="console">
            <Sidebar active=active/>
            <main class="content">{content}</main>
        </div>
    })
}

/// Navigation-less page used by the embeddable partner form.
pub fn form_only_page(content: impl IntoView + 'static) -> String {
    document(view! { <main class="content content--form-only">{content}</main> })
}

/// Placeholder for sections that are not built.
#[must_use]
pub fn render_locked_page(section: Section) -> String {
    console_page(
        section,
        view! {
            <h1>{section.label()}</h1>
            <div class="notice notice--info">"Module Locked."</div>
        },
    )
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
