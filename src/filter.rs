//! Free-text search and date filtering over record collections.

use crate::{
    date_range::{DateRange, matches_date},
    pagination::{Page, page_count, paginate},
    record::{Dated, JuanPayRecord, WalletRecord},
};

/// A record with string fields that free-text search looks at.
pub trait Searchable {
    /// The fields to match search terms against.
    fn search_fields(&self) -> Vec<&str>;
}

impl Searchable for WalletRecord {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.reference_number.as_str(),
            self.transaction_type.label(),
            self.charge_mop.label(),
        ]
    }
}

impl Searchable for JuanPayRecord {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.date.as_str()]
    }
}

/// Whether any searchable field of `record` contains `term`, ignoring case.
///
/// A blank or whitespace-only term matches every record. Any other term is
/// matched as given, surrounding whitespace included.
pub fn matches_search<R: Searchable>(record: &R, term: &str) -> bool {
    if term.trim().is_empty() {
        return true;
    }

    let term = term.to_lowercase();

    record
        .search_fields()
        .into_iter()
        .any(|field| field.to_lowercase().contains(&term))
}

/// The records that match both `term` and `range`, in their original order.
pub fn filter_records<'a, R>(
    records: impl IntoIterator<Item = &'a R>,
    term: &str,
    range: &DateRange,
) -> Vec<&'a R>
where
    R: Searchable + Dated + 'a,
{
    records
        .into_iter()
        .filter(|record| matches_search(*record, term) && matches_date(*record, range))
        .collect()
}

/// The filter state of a table screen for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterContext {
    /// The free-text search term.
    pub search_term: String,
    /// The dates to include.
    pub date_range: DateRange,
    /// The 1-indexed page to display.
    pub page: u64,
    /// The number of records per page.
    pub page_size: u64,
}

impl FilterContext {
    /// The records matching the search term and date range.
    pub fn filter<'a, R>(&self, records: impl IntoIterator<Item = &'a R>) -> Vec<&'a R>
    where
        R: Searchable + Dated + 'a,
    {
        filter_records(records, &self.search_term, &self.date_range)
    }

    /// Filter `records` and return the page selected by this context.
    ///
    /// Pages before the first or after the last show the first or last page.
    pub fn apply<'a, R>(&self, records: impl IntoIterator<Item = &'a R>) -> FilteredPage<'a, R>
    where
        R: Searchable + Dated + 'a,
    {
        let matches = self.filter(records);
        let total_pages = page_count(matches.len(), self.page_size);
        let page_number = self.page.clamp(1, total_pages);

        FilteredPage {
            page: paginate(&matches, page_number, self.page_size),
            page_number,
            matches,
        }
    }
}

/// One page of filtered records.
#[derive(Debug, Clone, PartialEq)]
pub struct FilteredPage<'a, R> {
    /// Every record that matched the filter, across all pages.
    pub matches: Vec<&'a R>,
    /// The records on the displayed page and the page count.
    pub page: Page<&'a R>,
    /// The 1-indexed page that is displayed.
    pub page_number: u64,
}
