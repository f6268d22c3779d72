use super::*;
use crate::partner::{PartnerCategory, PartnerForm};
use crate::services::sync::LiveView;
use crate::table::Table;
use leads::render_leads_page;
use partners::{PartnersPage, render_partners_page};

fn partners_page(form_only: bool, live: Option<LiveView>) -> PartnersPage {
    PartnersPage {
        category: PartnerCategory::PrimaryStockist,
        draft: PartnerForm::default(),
        notices: Vec::new(),
        form_only,
        live,
    }
}

fn partner_table() -> Table {
    Table::from_rows(
        vec!["Name".into(), "City".into()],
        vec![vec!["Shree Traders".into(), "Surat".into()]],
    )
}

// =============================================================================
// form-only mode
// =============================================================================

#[test]
fn form_only_page_has_no_navigation() {
    let html = render_partners_page(partners_page(true, None));
    assert!(html.contains("CHANNEL PARTNER MANAGEMENT"));
    assert!(html.contains("SUBMIT PARTNER DATA"));
    assert!(!html.contains("<aside"));
    assert!(!html.contains("<nav"));
    assert!(!html.contains("MASTER LEADS"));
    assert!(!html.contains("Live Channel Partner Database"));
}

#[test]
fn form_only_page_posts_back_in_form_mode() {
    let html = render_partners_page(partners_page(true, None));
    assert!(html.contains("/partners?view=form"));
    assert!(html.contains("/partners/category?view=form"));
}

#[test]
fn console_page_has_sidebar_navigation() {
    let html = render_partners_page(partners_page(false, Some(LiveView::Empty)));
    assert!(html.contains("<aside"));
    assert!(html.contains("BROBOND"));
    assert!(html.contains("A BRAND BY SNBPL"));
    for section in Section::ALL {
        assert!(html.contains(section.label()), "missing {}", section.label());
    }
    assert!(html.contains("nav-link--active"));
}

// =============================================================================
// partner form
// =============================================================================

#[test]
fn detail_labels_follow_selected_category() {
    for category in PartnerCategory::ALL {
        let mut page = partners_page(true, None);
        page.category = category;
        let html = render_partners_page(page);
        let (first, second) = category.detail_labels();
        assert!(html.contains(first));
        assert!(html.contains(second));
        assert!(html.contains(category.label()));
    }
}

#[test]
fn logistics_form_does_not_show_stockist_details() {
    let mut page = partners_page(true, None);
    page.category = PartnerCategory::LogisticsAgent;
    let html = render_partners_page(page);
    assert!(html.contains("GSTIN Details"));
    assert!(!html.contains("Warehousing Capacity"));
}

#[test]
fn draft_values_prefill_inputs() {
    let mut page = partners_page(true, None);
    page.draft = PartnerForm { name: "Kaveri Logistics".into(), remarks: "call back".into(), ..PartnerForm::default() };
    let html = render_partners_page(page);
    assert!(html.contains("Kaveri Logistics"));
    assert!(html.contains("call back"));
}

#[test]
fn form_fields_use_stable_names() {
    let html = render_partners_page(partners_page(true, None));
    for name in ["name", "contact", "state", "city", "address", "detail_1", "detail_2", "remarks"] {
        assert!(html.contains(&format!("name=\"{name}\"")), "missing field {name}");
    }
}

#[test]
fn notices_are_rendered() {
    let mut page = partners_page(true, None);
    page.notices = vec![Notice::success("Cloud Database Updated.")];
    let html = render_partners_page(page);
    assert!(html.contains("Cloud Database Updated."));
    assert!(html.contains("notice--success"));
}

// =============================================================================
// live table
// =============================================================================

#[test]
fn live_rows_render_table_and_download() {
    let html = render_partners_page(partners_page(false, Some(LiveView::Rows(partner_table()))));
    assert!(html.contains("Shree Traders"));
    assert!(html.contains("/partners/export.xlsx"));
    assert!(html.contains("DOWNLOAD PARTNERS EXCEL"));
}

#[test]
fn failed_read_shows_syncing() {
    let html = render_partners_page(partners_page(false, Some(LiveView::Syncing)));
    assert!(html.contains("Syncing with cloud..."));
    assert!(!html.contains("DOWNLOAD PARTNERS EXCEL"));
}

#[test]
fn empty_sheet_shows_neither_table_nor_download() {
    let html = render_partners_page(partners_page(false, Some(LiveView::Empty)));
    assert!(html.contains("Live Channel Partner Database"));
    assert!(!html.contains("DOWNLOAD PARTNERS EXCEL"));
    assert!(!html.contains("Syncing with cloud..."));
}

// =============================================================================
// leads + locked
// =============================================================================

#[test]
fn empty_leads_page_offers_import_only() {
    let html = render_leads_page(Table::with_columns(["Lead"]), Vec::new());
    assert!(html.contains("MASTER LEAD REPOSITORY"));
    assert!(html.contains("EXECUTE IMPORT"));
    assert!(html.contains("multipart/form-data"));
    assert!(!html.contains("DOWNLOAD LEADS EXCEL"));
}

#[test]
fn imported_leads_render_with_download() {
    let leads = Table::from_rows(vec!["Company".into()], vec![vec!["Nirma Bonds".into()]]);
    let html = render_leads_page(leads, Vec::new());
    assert!(html.contains("Nirma Bonds"));
    assert!(html.contains("/leads/export.xlsx"));
}

#[test]
fn locked_sections_render_placeholder() {
    for section in Section::ALL.into_iter().filter(|s| s.is_locked()) {
        let html = render_locked_page(section);
        assert!(html.contains("Module Locked."));
    }
    assert!(!Section::MasterLeads.is_locked());
    assert!(!Section::ChannelPartners.is_locked());
}

#[test]
fn sidebar_marks_locked_sections() {
    let html = render_partners_page(partners_page(false, Some(LiveView::Empty)));
    assert_eq!(html.matches(r#"class="nav-link nav-link--locked""#).count(), 5);
    assert!(html.contains(r#"class="nav-link" href="/leads""#));

    let html = render_locked_page(Section::Hrm);
    assert_eq!(html.matches(r#"class="nav-link nav-link--locked""#).count(), 4);
    assert!(html.contains(r#"class="nav-link nav-link--active" href="/hrm""#));
}

#[test]
fn partner_form_posts_its_category() {
    let mut page = partners_page(true, None);
    page.category = PartnerCategory::RetailDistributor;
    let html = render_partners_page(page);
    assert!(html.contains(r#"<input type="hidden" name="category" value="db""#));
}

#[test]
fn document_starts_with_doctype() {
    let html = render_locked_page(Section::SalesDashboard);
    assert!(html.to_ascii_lowercase().starts_with("<!doctype html>"));
}
