//! The GCash and PayMaya pages: one day's totals and a searchable,
//! paginated table of transactions.

use axum::{
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    AppState, Error,
    aggregation::{DailyStats, aggregate_by_type_and_charge, aggregate_for_exact_date},
    date_range::DateRange,
    endpoints,
    format::{format_currency, format_date_label},
    html::{
        FORM_STYLE, PAGE_CONTAINER_STYLE, TABLE_CELL_NUMBER_STYLE, TABLE_STYLE, base,
        daily_stats_cards, pagination_nav,
    },
    iso_date::IsoDate,
    navigation::NavBar,
    pagination::{PaginationConfig, page_indicators},
    query::ScreenQuery,
    record::{Provider, WalletRecord},
    source::RecordSource,
    timezone::local_today,
};

/// The state needed for the GCash and PayMaya pages.
#[derive(Debug, Clone)]
pub struct WalletPageState {
    /// Where records are read from.
    pub source: RecordSource,
    /// The local timezone as a canonical timezone name, e.g. "Asia/Manila".
    pub local_timezone: String,
    /// The config that controls how to display pages of data.
    pub pagination_config: PaginationConfig,
}

impl FromRef<AppState> for WalletPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            source: state.source.clone(),
            local_timezone: state.local_timezone.clone(),
            pagination_config: state.pagination_config.clone(),
        }
    }
}

/// Everything a wallet page displays.
struct WalletPage<'a> {
    provider: Provider,
    selected_date: IsoDate,
    selected_day: DailyStats,
    date_range: DateRange,
    filtered_totals: DailyStats,
    filtered_count: usize,
    total_count: usize,
    records: Vec<&'a WalletRecord>,
    page: u64,
    total_pages: u64,
}

/// Display the GCash transactions.
pub async fn get_gcash_page(
    State(state): State<WalletPageState>,
    Query(query): Query<ScreenQuery>,
) -> Result<Response, Error> {
    get_wallet_page(Provider::GCash, state, query).await
}

/// Display the PayMaya transactions.
pub async fn get_paymaya_page(
    State(state): State<WalletPageState>,
    Query(query): Query<ScreenQuery>,
) -> Result<Response, Error> {
    get_wallet_page(Provider::PayMaya, state, query).await
}

async fn get_wallet_page(
    provider: Provider,
    state: WalletPageState,
    query: ScreenQuery,
) -> Result<Response, Error> {
    let today = local_today(&state.local_timezone)?;
    let records = state.source.fetch_wallet(provider).await?;

    let page = build_wallet_page(
        provider,
        &records,
        &query,
        query.selected_date(today),
        &state.pagination_config,
    );

    Ok(wallet_view(&page, &query, &state.pagination_config).into_response())
}

fn build_wallet_page<'a>(
    provider: Provider,
    records: &'a [WalletRecord],
    query: &ScreenQuery,
    selected_date: IsoDate,
    config: &PaginationConfig,
) -> WalletPage<'a> {
    let context = query.filter_context(config);
    let filtered = context.apply(records);

    WalletPage {
        provider,
        selected_day: aggregate_for_exact_date(records, &selected_date),
        selected_date,
        date_range: context.date_range,
        filtered_totals: aggregate_by_type_and_charge(filtered.matches.iter().copied()),
        filtered_count: filtered.matches.len(),
        total_count: records.len(),
        records: filtered.page.items,
        page: filtered.page_number,
        total_pages: filtered.page.total_pages,
    }
}

fn wallet_view(page: &WalletPage, query: &ScreenQuery, config: &PaginationConfig) -> Markup {
    let route = endpoints::provider_view(page.provider);
    let nav_bar = NavBar::new(route).into_html();
    let indicators = page_indicators(page.page, page.total_pages, config.max_pages);

    let content = html!(
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            h1 { (page.provider.label()) }

            form method="get" action=(route) class=(FORM_STYLE)
            {
                label
                {
                    "Search"
                    input
                        type="search"
                        name="search"
                        placeholder="Reference, type or payment"
                        value=[query.search.as_deref()];
                }
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
                label
                {
                    "Day"
                    input type="date" name="date" value=(page.selected_date.as_str());
                }
                button type="submit" { "Apply" }
            }

            section id="selected-day"
            {
                h2 { (format_date_label(&page.selected_date)) }
                (daily_stats_cards(&page.selected_day))
            }

            section id="filtered-totals"
            {
                h2 { "Matching transactions" }
                p class="note"
                {
                    (page.filtered_count) " of " (page.total_count) " transactions, "
                    (page.date_range.label())
                }
                (daily_stats_cards(&page.filtered_totals))
            }

            section id="records"
            {
                (records_table(&page.records))
                (pagination_nav(&indicators, |page_number| {
                    query.with_page(page_number).to_url(route)
                }))
            }
        }
    );

    base(page.provider.label(), &content)
}

fn records_table(records: &[&WalletRecord]) -> Markup {
    html!(
        table class=(TABLE_STYLE)
        {
            thead
            {
                tr
                {
                    th { "Date" }
                    th { "Reference" }
                    th { "Type" }
                    th class=(TABLE_CELL_NUMBER_STYLE) { "Amount" }
                    th class=(TABLE_CELL_NUMBER_STYLE) { "Service Charge" }
                    th { "Charge Paid With" }
                }
            }
            tbody
            {
                @for record in records {
                    tr
                    {
                        td { (format_date_label(&record.date)) }
                        td { (record.reference_number) }
                        td { (record.transaction_type.label()) }
                        td class=(TABLE_CELL_NUMBER_STYLE) { (format_currency(record.amount)) }
                        td class=(TABLE_CELL_NUMBER_STYLE)
                        {
                            (format_currency(record.service_charge))
                        }
                        td { (record.charge_mop.label()) }
                    }
                }

                @if records.is_empty() {
                    tr
                    {
                        td colspan="6" { "No records found." }
                    }
                }
            }
        }
    )
}
