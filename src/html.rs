use maud::{DOCTYPE, Markup, html};

use crate::{aggregation::DailyStats, format::format_currency, pagination::PageIndicator};

// Layout
pub const PAGE_CONTAINER_STYLE: &str = "page";
pub const CARD_GRID_STYLE: &str = "card-grid";
pub const CARD_STYLE: &str = "card";
pub const CARD_LABEL_STYLE: &str = "card-label";
pub const CARD_VALUE_STYLE: &str = "card-value";
pub const CARD_DETAIL_STYLE: &str = "card-detail";

// Tables
pub const TABLE_STYLE: &str = "records";
pub const TABLE_CELL_NUMBER_STYLE: &str = "number";

// Forms
pub const FORM_STYLE: &str = "filters";

const STYLESHEET: &str = r#"
body { margin: 0; font-family: system-ui, sans-serif; background: #f9fafb; color: #111827; }
nav { display: flex; gap: 1.5rem; padding: 1rem 1.5rem; background: #1d4ed8; }
nav a { color: #dbeafe; text-decoration: none; font-weight: 600; }
nav a.current { color: #ffffff; text-decoration: underline; }
.page { max-width: 72rem; margin: 0 auto; padding: 1.5rem; }
.card-grid { display: grid; grid-template-columns: repeat(auto-fit, minmax(12rem, 1fr)); gap: 1rem; margin: 1rem 0; }
.card { background: #ffffff; border: 1px solid #e5e7eb; border-radius: 0.5rem; padding: 1rem; }
.card-label { font-size: 0.875rem; color: #4b5563; }
.card-value { font-size: 1.5rem; font-weight: 700; }
.card-detail { font-size: 0.75rem; color: #6b7280; }
.filters { display: flex; flex-wrap: wrap; gap: 0.75rem; align-items: end; margin: 1rem 0; }
.filters label { display: flex; flex-direction: column; font-size: 0.875rem; }
table.records { width: 100%; border-collapse: collapse; background: #ffffff; }
table.records th, table.records td { padding: 0.5rem 0.75rem; border-bottom: 1px solid #e5e7eb; text-align: left; }
table.records td.number, table.records th.number { text-align: right; }
.pagination { display: flex; gap: 0.5rem; margin: 1rem 0; list-style: none; padding: 0; }
.pagination .current { font-weight: 700; }
.note { font-size: 0.875rem; color: #6b7280; }
.error { text-align: center; padding: 4rem 1rem; }
.error h1 { font-size: 6rem; margin: 0; color: #1d4ed8; }
"#;

pub fn base(title: &str, content: &Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en"
        {
            head
            {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) " - E-Wallet Tracker" }
                style { (STYLESHEET) }
            }

            body
            {
                (content)
            }
        }
    }
}

pub fn error_view(title: &str, header: &str, description: &str, fix: &str) -> Markup {
    let content = html!(
        section class="error"
        {
            h1 { (header) }
            p { strong { (description) } }
            p { (fix) }
            a href="/" { "Back to Overview" }
        }
    );

    base(title, &content)
}

/// A summary card with a label, a headline value and an optional detail line.
pub fn stat_card(label: &str, value: &str, detail: Option<&str>) -> Markup {
    html! {
        div class=(CARD_STYLE)
        {
            div class=(CARD_LABEL_STYLE) { (label) }
            div class=(CARD_VALUE_STYLE) { (value) }
            @if let Some(detail) = detail {
                div class=(CARD_DETAIL_STYLE) { (detail) }
            }
        }
    }
}

/// Cards for the cash-in, cash-out and charge totals of `stats`.
pub fn daily_stats_cards(stats: &DailyStats) -> Markup {
    let cash_in_detail = format!(
        "{} · {} charges",
        transaction_count(stats.cash_in_count),
        format_currency(stats.cash_in_charges)
    );
    let cash_out_detail = format!(
        "{} · {} charges",
        transaction_count(stats.cash_out_count),
        format_currency(stats.cash_out_charges)
    );

    html! {
        div class=(CARD_GRID_STYLE)
        {
            (stat_card("Cash-In", &format_currency(stats.cash_in), Some(&cash_in_detail)))
            (stat_card("Cash-Out", &format_currency(stats.cash_out), Some(&cash_out_detail)))
            (stat_card("Service Charges", &format_currency(stats.total_charges()), None))
        }
    }
}

fn transaction_count(count: usize) -> String {
    match count {
        1 => "1 transaction".to_owned(),
        count => format!("{count} transactions"),
    }
}

/// The page navigation bar, where `href_for_page` builds the link for a page.
pub fn pagination_nav(
    indicators: &[PageIndicator],
    href_for_page: impl Fn(u64) -> String,
) -> Markup {
    html! {
        nav aria-label="Pagination"
        {
            ul class="pagination"
            {
                @for indicator in indicators {
                    li
                    {
                        @match indicator {
                            PageIndicator::Page(page) => {
                                a href=(href_for_page(*page)) { (page) }
                            }
                            PageIndicator::Current(page) => {
                                span class="current" aria-current="page" { (page) }
                            }
                            PageIndicator::Ellipsis => {
                                span { "…" }
                            }
                            PageIndicator::Previous(page) => {
                                a href=(href_for_page(*page)) rel="prev" { "Previous" }
                            }
                            PageIndicator::Next(page) => {
                                a href=(href_for_page(*page)) rel="next" { "Next" }
                            }
                        }
                    }
                }
            }
        }
    }
}
