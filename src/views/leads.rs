//! Master lead repository section.

use leptos::prelude::*;

use super::table::DataTable;
use super::{NoticeList, Section, console_page};
use crate::state::Notice;
use crate::table::Table;

#[must_use]
pub fn render_leads_page(leads: Table, notices: Vec<Notice>) -> String {
    let table_panel = (!leads.is_empty()).then(move || {
        view! {
            <a class="button" href="/leads/export.xlsx">"📤 DOWNLOAD LEADS EXCEL"</a>
            <DataTable table=leads/>
        }
    });

    console_page(
        Section::MasterLeads,
        view! {
            <h1>"🛡️ MASTER LEAD REPOSITORY"</h1>
            <NoticeList notices=notices/>
            <details class="expander" open=true>
                <summary>"📥 BULK DATA IMPORT"</summary>
                <form method="post" action="/leads/import" enctype="multipart/form-data">
                    <label class="field">
                        <span>"Upload Excel Spreadsheet"</span>
                        <input type="file" name="file" accept=".xlsx"/>
                    </label>
                    <button type="submit" class="button">"EXECUTE IMPORT"</button>
                </form>
            </details>
            {table_panel}
        },
    )
}
