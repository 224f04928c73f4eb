//! The JuanPay page: float reconciliation totals and a paginated table of
//! daily balances.

use axum::{
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    AppState, Error,
    aggregation::{JuanPaySummary, derive_sales, sum_beginnings, summarize_juanpay},
    endpoints,
    format::{format_currency, format_date_label},
    html::{
        CARD_GRID_STYLE, FORM_STYLE, PAGE_CONTAINER_STYLE, TABLE_CELL_NUMBER_STYLE, TABLE_STYLE,
        base, pagination_nav, stat_card,
    },
    navigation::NavBar,
    pagination::{PageIndicator, PaginationConfig, page_indicators},
    query::ScreenQuery,
    record::JuanPayRecord,
    source::RecordSource,
};

/// The state needed for the JuanPay page.
#[derive(Debug, Clone)]
pub struct JuanPayPageState {
    /// Where records are read from.
    pub source: RecordSource,
    /// The config that controls how to display pages of data.
    pub pagination_config: PaginationConfig,
}

impl FromRef<AppState> for JuanPayPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            source: state.source.clone(),
            pagination_config: state.pagination_config.clone(),
        }
    }
}

/// A reconciliation with its derived totals.
struct JuanPayRow<'a> {
    record: &'a JuanPayRecord,
    total_beginning: f64,
    derived_sales: f64,
}

impl<'a> JuanPayRow<'a> {
    fn new(record: &'a JuanPayRecord) -> Self {
        let total_beginning = sum_beginnings(record);

        Self {
            record,
            total_beginning,
            derived_sales: derive_sales(total_beginning, record.ending),
        }
    }
}

/// Display the JuanPay reconciliations.
pub async fn get_juanpay_page(
    State(state): State<JuanPayPageState>,
    Query(query): Query<ScreenQuery>,
) -> Result<Response, Error> {
    let records = state.source.fetch_juanpay().await?;
    let config = &state.pagination_config;

    let filtered = query.filter_context(config).apply(&records);

    let summary = summarize_juanpay(filtered.matches.iter().copied());
    let derived_sales: f64 = filtered
        .matches
        .iter()
        .map(|record| JuanPayRow::new(record).derived_sales)
        .sum();
    let rows: Vec<JuanPayRow> = filtered
        .page
        .items
        .into_iter()
        .map(JuanPayRow::new)
        .collect();
    let indicators = page_indicators(
        filtered.page_number,
        filtered.page.total_pages,
        config.max_pages,
    );

    Ok(juanpay_view(&summary, derived_sales, &rows, &indicators, &query).into_response())
}

fn juanpay_view(
    summary: &JuanPaySummary,
    derived_sales: f64,
    rows: &[JuanPayRow],
    indicators: &[PageIndicator],
    query: &ScreenQuery,
) -> Markup {
    let nav_bar = NavBar::new(endpoints::JUANPAY_VIEW).into_html();
    let range = query.date_range();

    let content = html!(
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            h1 { "JuanPay" }

            form method="get" action=(endpoints::JUANPAY_VIEW) class=(FORM_STYLE)
            {
                label
                {
                    "From"
                    input type="date" name="start" value=[query.start.as_deref()];
                }
                label
                {
                    "To"
                    input type="date" name="end" value=[query.end.as_deref()];
                }
                button type="submit" { "Apply" }
            }

            section id="summary"
            {
                h2 { (range.label()) }
                div class=(CARD_GRID_STYLE)
                {
                    (stat_card("Total Beginning", &format_currency(summary.total_beginning), None))
                    (stat_card("Total Ending", &format_currency(summary.total_ending), None))
                    (stat_card("Total Sales", &format_currency(summary.total_sales), None))
                    (stat_card(
                        "Derived Sales",
                        &format_currency(derived_sales),
                        Some("Beginning minus ending, never below zero")
                    ))
                }
            }

            section id="records"
            {
                (juanpay_table(rows))
                (pagination_nav(indicators, |page_number| {
                    query.with_page(page_number).to_url(endpoints::JUANPAY_VIEW)
                }))
            }
        }
    );

    base("JuanPay", &content)
}

fn juanpay_table(rows: &[JuanPayRow]) -> Markup {
    html!(
        table class=(TABLE_STYLE)
        {
            thead
            {
                tr
                {
                    th { "Date" }
                    th class=(TABLE_CELL_NUMBER_STYLE) { "Beginning" }
                    th class=(TABLE_CELL_NUMBER_STYLE) { "Ending" }
                    th class=(TABLE_CELL_NUMBER_STYLE) { "Sales" }
                    th class=(TABLE_CELL_NUMBER_STYLE) { "Derived Sales" }
                }
            }
            tbody
            {
                @for row in rows {
                    tr
                    {
                        td { (format_date_label(&row.record.date)) }
                        td class=(TABLE_CELL_NUMBER_STYLE) { (format_currency(row.total_beginning)) }
                        td class=(TABLE_CELL_NUMBER_STYLE) { (format_currency(row.record.ending)) }
                        td class=(TABLE_CELL_NUMBER_STYLE) { (format_currency(row.record.sales)) }
                        td class=(TABLE_CELL_NUMBER_STYLE) { (format_currency(row.derived_sales)) }
                    }
                }

                @if rows.is_empty() {
                    tr
                    {
                        td colspan="5" { "No records found." }
                    }
                }
            }
        }
    )
}
