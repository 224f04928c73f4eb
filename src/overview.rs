//! The overview page: totals across GCash and PayMaya over a date range,
//! each provider's totals for one day, and a day-by-day breakdown.

use std::collections::BTreeSet;

use axum::{
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    AppState, Error,
    aggregation::{
        DailyStats, ProviderTotals, aggregate_across_providers, aggregate_for_exact_date,
        daily_stats_by_date,
    },
    date_range::{DateRange, matches_date},
    endpoints,
    format::{format_currency, format_date_label},
    html::{
        CARD_GRID_STYLE, FORM_STYLE, PAGE_CONTAINER_STYLE, TABLE_CELL_NUMBER_STYLE, TABLE_STYLE,
        base, daily_stats_cards, stat_card,
    },
    iso_date::IsoDate,
    navigation::NavBar,
    query::ScreenQuery,
    record::{Provider, WalletRecord},
    source::{RecordSource, Snapshot},
    timezone::local_today,
};

/// The state needed for the overview page.
#[derive(Debug, Clone)]
pub struct OverviewState {
    /// Where records are read from.
    pub source: RecordSource,
    /// The local timezone as a canonical timezone name, e.g. "Asia/Manila".
    pub local_timezone: String,
}

impl FromRef<AppState> for OverviewState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            source: state.source.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// The wallet totals for one day.
#[derive(Debug, Clone, PartialEq)]
struct DayRow {
    date: IsoDate,
    gcash: DailyStats,
    paymaya: DailyStats,
}

/// Everything the overview page displays.
#[derive(Debug, Clone, PartialEq)]
struct Overview {
    /// The range the totals cover, with reversed bounds swapped.
    range: DateRange,
    totals: ProviderTotals,
    selected_date: IsoDate,
    selected_day: Vec<(Provider, DailyStats)>,
    /// Days in the range that have transactions, newest first.
    days: Vec<DayRow>,
    /// The first and last dates across all records.
    bounds: Option<(IsoDate, IsoDate)>,
}

/// Display totals across the e-wallet providers.
pub async fn get_overview_page(
    State(state): State<OverviewState>,
    Query(query): Query<ScreenQuery>,
) -> Result<Response, Error> {
    let today = local_today(&state.local_timezone)?;
    let snapshot = state.source.fetch_snapshot().await?;

    let overview = build_overview(&snapshot, &query.date_range(), query.selected_date(today));

    Ok(overview_view(&overview, &query).into_response())
}

fn build_overview(snapshot: &Snapshot, range: &DateRange, selected_date: IsoDate) -> Overview {
    let range = range.normalized();
    let totals = aggregate_across_providers(&snapshot.gcash, &snapshot.paymaya, &range);

    let selected_day = [Provider::GCash, Provider::PayMaya]
        .into_iter()
        .map(|provider| {
            let records = snapshot.wallet_records(provider);
            (provider, aggregate_for_exact_date(records, &selected_date))
        })
        .collect();

    let days_in_range = |records: &[WalletRecord]| {
        daily_stats_by_date(records.iter().filter(|record| matches_date(*record, &range)))
    };
    let gcash_days = days_in_range(&snapshot.gcash);
    let paymaya_days = days_in_range(&snapshot.paymaya);
    let dates: BTreeSet<&IsoDate> = gcash_days.keys().chain(paymaya_days.keys()).collect();
    let days = dates
        .into_iter()
        .rev()
        .map(|date| DayRow {
            date: date.clone(),
            gcash: gcash_days.get(date).copied().unwrap_or_default(),
            paymaya: paymaya_days.get(date).copied().unwrap_or_default(),
        })
        .collect();

    Overview {
        totals,
        selected_date,
        selected_day,
        days,
        bounds: snapshot.date_bounds(),
        range,
    }
}

fn overview_view(overview: &Overview, query: &ScreenQuery) -> Markup {
    let nav_bar = NavBar::new(endpoints::OVERVIEW_VIEW).into_html();
    let totals = &overview.totals;

    let content = html!(
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            h1 { "Overview" }

            @if let Some((first, last)) = &overview.bounds {
                p class="note"
                {
                    "Records from " (format_date_label(first)) " to " (format_date_label(last))
                }
            }

            form method="get" action=(endpoints::OVERVIEW_VIEW) class=(FORM_STYLE)
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
                label
                {
                    "Day"
                    input
                        type="date"
                        name="date"
                        value=(overview.selected_date.as_str());
                }
                button type="submit" { "Apply" }
            }

            section id="range-totals"
            {
                h2 { "GCash and PayMaya: " (overview.range.label()) }
                div class=(CARD_GRID_STYLE)
                {
                    (stat_card("Total Cash-In", &format_currency(totals.total_cash_in), None))
                    (stat_card("Total Cash-Out", &format_currency(totals.total_cash_out), None))
                    (stat_card(
                        "Cash-In Charges",
                        &format_currency(totals.total_cash_in_charges),
                        None
                    ))
                    (stat_card(
                        "Cash-Out Charges",
                        &format_currency(totals.total_cash_out_charges),
                        None
                    ))
                }
                p class="note" { "JuanPay balances are not included in these totals." }
            }

            section id="selected-day"
            {
                h2 { (format_date_label(&overview.selected_date)) }

                @for (provider, stats) in &overview.selected_day {
                    section id=(format!("day-{}", provider.label().to_lowercase()))
                    {
                        h3 { (provider.label()) }
                        (daily_stats_cards(stats))
                    }
                }
            }

            section id="daily-breakdown"
            {
                h2 { "By day" }
                (daily_table(&overview.days))
            }
        }
    );

    base("Overview", &content)
}

fn daily_table(days: &[DayRow]) -> Markup {
    html!(
        table class=(TABLE_STYLE)
        {
            thead
            {
                tr
                {
                    th { "Date" }
                    th class=(TABLE_CELL_NUMBER_STYLE) { "GCash Cash-In" }
                    th class=(TABLE_CELL_NUMBER_STYLE) { "GCash Cash-Out" }
                    th class=(TABLE_CELL_NUMBER_STYLE) { "PayMaya Cash-In" }
                    th class=(TABLE_CELL_NUMBER_STYLE) { "PayMaya Cash-Out" }
                    th class=(TABLE_CELL_NUMBER_STYLE) { "Charges" }
                }
            }
            tbody
            {
                @for day in days {
                    tr
                    {
                        td { (format_date_label(&day.date)) }
                        td class=(TABLE_CELL_NUMBER_STYLE) { (format_currency(day.gcash.cash_in)) }
                        td class=(TABLE_CELL_NUMBER_STYLE) { (format_currency(day.gcash.cash_out)) }
                        td class=(TABLE_CELL_NUMBER_STYLE) { (format_currency(day.paymaya.cash_in)) }
                        td class=(TABLE_CELL_NUMBER_STYLE) { (format_currency(day.paymaya.cash_out)) }
                        td class=(TABLE_CELL_NUMBER_STYLE)
                        {
                            (format_currency(day.gcash.total_charges() + day.paymaya.total_charges()))
                        }
                    }
                }

                @if days.is_empty() {
                    tr
                    {
                        td colspan="6" { "No transactions in this range." }
                    }
                }
            }
        }
    )
}
