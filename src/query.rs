//! Query string parameters shared by the record screens.
//!
//! Every parameter is kept as a raw string so that malformed values are
//! treated like missing ones instead of rejecting the request.

use serde::Deserialize;

use crate::{
    date_range::DateRange, filter::FilterContext, iso_date::IsoDate, pagination::PaginationConfig,
};

/// The filters, selected day and page of a screen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ScreenQuery {
    /// Free-text search over reference numbers, types and payment methods.
    pub search: Option<String>,
    /// The first day to include.
    pub start: Option<String>,
    /// The last day to include.
    pub end: Option<String>,
    /// The day to show daily totals for, defaulting to today.
    pub date: Option<String>,
    /// The 1-indexed page to display.
    pub page: Option<String>,
}

impl ScreenQuery {
    /// The search term as entered, empty if there is none.
    pub fn search_term(&self) -> &str {
        self.search.as_deref().unwrap_or_default()
    }

    /// The date range given by `start` and `end`, exactly as given.
    pub fn date_range(&self) -> DateRange {
        DateRange::from_query(self.start.as_deref(), self.end.as_deref())
    }

    /// The day to show daily totals for.
    pub fn selected_date(&self, today: IsoDate) -> IsoDate {
        IsoDate::from_filter(self.date.as_deref()).unwrap_or(today)
    }

    /// The requested page, if it is a whole number.
    pub fn page(&self) -> Option<u64> {
        self.page
            .as_deref()
            .and_then(|page| page.trim().parse().ok())
    }

    /// The filter state for this request before the page is clamped.
    pub fn filter_context(&self, config: &PaginationConfig) -> FilterContext {
        FilterContext {
            search_term: self.search_term().to_owned(),
            date_range: self.date_range(),
            page: self.page().unwrap_or(config.default_page),
            page_size: config.page_size,
        }
    }

    /// A copy of this query that points at `page`.
    pub fn with_page(&self, page: u64) -> Self {
        Self {
            page: Some(page.to_string()),
            ..self.clone()
        }
    }

    /// The URL of `route` with the non-blank parameters of this query.
    pub fn to_url(&self, route: &str) -> String {
        let params: Vec<(&str, &str)> = [
            ("search", &self.search),
            ("start", &self.start),
            ("end", &self.end),
            ("date", &self.date),
            ("page", &self.page),
        ]
        .into_iter()
        .filter_map(|(name, value)| {
            value
                .as_deref()
                .filter(|value| !value.trim().is_empty())
                .map(|value| (name, value))
        })
        .collect();

        if params.is_empty() {
            return route.to_owned();
        }

        match serde_urlencoded::to_string(&params) {
            Ok(query) => format!("{route}?{query}"),
            Err(error) => {
                tracing::error!("Could not encode query parameters {params:?}: {error}");
                route.to_owned()
            }
        }
    }
}
