//! Channel-partner section: category selector, partner form, live table.

use leptos::prelude::*;
use leptos::tachys::view::any_view::IntoAny;

use super::table::DataTable;
use super::{NoticeList, Section, console_page, form_only_page};
use crate::partner::{PartnerCategory, PartnerForm};
use crate::services::sync::LiveView;
use crate::state::Notice;

/// Everything the partner section renders from.
#[derive(Debug, Clone)]
pub struct PartnersPage {
    pub category: PartnerCategory,
    pub draft: PartnerForm,
    pub notices: Vec<Notice>,
    pub form_only: bool,
    /// `None` in form-only mode, where the live table is not shown.
    pub live: Option<LiveView>,
}

#[must_use]
pub fn render_partners_page(page: PartnersPage) -> String {
    let PartnersPage { category, draft, notices, form_only, live } = page;
    let live_panel = live.map(|live| {
        view! {
            <hr class="divider"/>
            <h2>"📊 Live Channel Partner Database"</h2>
            <LivePanel live=live/>
        }
    });
    let content = view! {
        <h1>"🤝 CHANNEL PARTNER MANAGEMENT"</h1>
        <NoticeList notices=notices/>
        <PartnerFormPanel category=category draft=draft form_only=form_only/>
        {live_panel}
    };

    if form_only { form_only_page(content) } else { console_page(Section::ChannelPartners, content) }
}

#[component]
fn TextField(label: &'static str, name: &'static str, value: String) -> impl IntoView {
    view! {
        <label class="field">
            <span>{label}</span>
            <input type="text" name=name value=value/>
        </label>
    }
}

#[component]
fn PartnerFormPanel(category: PartnerCategory, draft: PartnerForm, form_only: bool) -> impl IntoView {
    let suffix = if form_only { "?view=form" } else { "" };
    let category_action = format!("/partners/category{suffix}");
    let submit_action = format!("/partners{suffix}");
    let (detail_1_label, detail_2_label) = category.detail_labels();
    let heading = format!("Strategic Partnership Form: {}", category.label());

    let options = PartnerCategory::ALL
        .into_iter()
        .map(|option| {
            let selected = option == category;
            view! { <option value=option.slug() selected=selected>{option.label()}</option> }
        })
        .collect_view();

    let PartnerForm { name, contact, state, city, address, detail_1, detail_2, remarks } = draft;

    view! {
        <form class="category-picker" method="post" action=category_action>
            <label for="category">"SELECT PARTNER TYPE"</label>
            <select id="category" name="category">{options}</select>
            <button type="submit" class="button button--secondary">"Switch Partner Type"</button>
        </form>
        <form class="partner-form" method="post" action=submit_action>
            <input type="hidden" name="category" value=category.slug()/>
            <h3>{heading}</h3>
            <div class="columns">
                <div class="column">
                    <TextField label="Entity / Registered Firm Name" name="name" value=name/>
                    <TextField label="Primary Contact Number" name="contact" value=contact/>
                    <TextField label="Operating State" name="state" value=state/>
                </div>
                <div class="column">
                    <TextField label="Operating City" name="city" value=city/>
                    <TextField label="Registered Office Address" name="address" value=address/>
                </div>
            </div>
            <TextField label=detail_1_label name="detail_1" value=detail_1/>
            <TextField label=detail_2_label name="detail_2" value=detail_2/>
            <label class="field">
                <span>"Executive Summary / Discussion Notes"</span>
                <textarea name="remarks" rows="4">{remarks}</textarea>
            </label>
            <button type="submit" class="button">"SUBMIT PARTNER DATA"</button>
        </form>
    }
}

#[component]
fn LivePanel(live: LiveView) -> impl IntoView {
    match live {
        LiveView::Rows(table) => view! {
            <a class="button" href="/partners/export.xlsx">"📤 DOWNLOAD PARTNERS EXCEL"</a>
            <DataTable table=table/>
        }
        .into_any(),
        LiveView::Empty => ().into_any(),
        LiveView::Syncing => view! { <div class="notice notice--info">"Syncing with cloud..."</div> }.into_any(),
    }
}
