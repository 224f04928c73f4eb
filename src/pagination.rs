//! This modules defines the common functionality for paging data.

/// The config for pagination
#[derive(Debug, Clone)]
pub struct PaginationConfig {
    /// The page number to default to when not specified in a request.
    pub default_page: u64,
    /// The maximum records to display per page.
    pub page_size: u64,
    /// The maximum number of page links to show in the pagination indicator.
    pub max_pages: u64,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_page: 1,
            page_size: 10,
            max_pages: 5,
        }
    }
}

/// A page of items along with the number of pages available.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    /// The items on this page.
    pub items: Vec<T>,
    /// The total number of pages, which is at least one.
    pub total_pages: u64,
}

/// The number of pages needed to show `item_count` items, at least one.
///
/// A page size of zero is treated as one.
pub fn page_count(item_count: usize, page_size: u64) -> u64 {
    (item_count as u64).div_ceil(page_size.max(1)).max(1)
}

/// Slice out the 1-indexed `page` of `records`.
///
/// The page is not clamped: pages before the first or after the last are
/// empty.
pub fn paginate<T: Clone>(records: &[T], page: u64, page_size: u64) -> Page<T> {
    let page_size = page_size.max(1);
    let total_pages = page_count(records.len(), page_size);

    let items = match page.checked_sub(1) {
        Some(page_index) => {
            let start = page_index.saturating_mul(page_size);
            let end = start.saturating_add(page_size);
            let start = usize::try_from(start).unwrap_or(usize::MAX).min(records.len());
            let end = usize::try_from(end).unwrap_or(usize::MAX).min(records.len());

            records[start..end].to_vec()
        }
        None => Vec::new(),
    };

    Page { items, total_pages }
}

/// An element of the page navigation bar.
#[derive(Debug, PartialEq, Eq)]
pub enum PageIndicator {
    /// A link to another page.
    Page(u64),
    /// The page being displayed.
    Current(u64),
    /// A gap in the page links.
    Ellipsis,
    /// A link to the previous page.
    Previous(u64),
    /// A link to the next page.
    Next(u64),
}

/// Build the page navigation for `current` out of `page_count` pages, showing
/// at most `max_pages` consecutive page links around the current page.
///
/// The first and last page are always reachable; gaps are marked with an
/// ellipsis.
pub fn page_indicators(current: u64, page_count: u64, max_pages: u64) -> Vec<PageIndicator> {
    let max_pages = max_pages.max(1);
    let (first, last) = if page_count <= max_pages {
        (1, page_count)
    } else {
        let first = current
            .saturating_sub(max_pages / 2)
            .clamp(1, page_count - max_pages + 1);
        (first, first + max_pages - 1)
    };

    let mut indicators = Vec::new();

    if current > 1 {
        indicators.push(PageIndicator::Previous(current - 1));
    }

    if first > 1 {
        indicators.push(PageIndicator::Page(1));
        if first > 2 {
            indicators.push(PageIndicator::Ellipsis);
        }
    }

    indicators.extend((first..=last).map(|page| {
        if page == current {
            PageIndicator::Current(page)
        } else {
            PageIndicator::Page(page)
        }
    }));

    if last < page_count {
        if last + 1 < page_count {
            indicators.push(PageIndicator::Ellipsis);
        }
        indicators.push(PageIndicator::Page(page_count));
    }

    if current < page_count {
        indicators.push(PageIndicator::Next(current + 1));
    }

    indicators
}

#[cfg(test)]
mod tests {
    use crate::pagination::{PageIndicator, page_count, page_indicators, paginate};

    #[test]
    fn counts_pages() {
        assert_eq!(page_count(0, 10), 1);
        assert_eq!(page_count(10, 10), 1);
        assert_eq!(page_count(11, 10), 2);
        assert_eq!(page_count(23, 10), 3);
        assert_eq!(page_count(3, 0), 3);
    }

    #[test]
    fn last_page_holds_remainder() {
        let records: Vec<u32> = (1..=23).collect();

        let got = paginate(&records, 3, 10);

        assert_eq!(got.total_pages, 3);
        assert_eq!(got.items, [21, 22, 23]);
    }

    #[test]
    fn pages_reconstruct_input() {
        let records: Vec<u32> = (1..=23).collect();
        let total_pages = paginate(&records, 1, 7).total_pages;

        let pages: Vec<Vec<u32>> = (1..=total_pages)
            .map(|page| paginate(&records, page, 7).items)
            .collect();

        assert!(pages.iter().all(|page| !page.is_empty() && page.len() <= 7));
        assert_eq!(pages.concat(), records);
    }

    #[test]
    fn out_of_range_pages_are_empty() {
        let records: Vec<u32> = (1..=5).collect();

        assert!(paginate(&records, 0, 10).items.is_empty());
        assert!(paginate(&records, 2, 10).items.is_empty());
        assert!(paginate(&records, u64::MAX, 10).items.is_empty());
        assert_eq!(paginate(&records, 2, 10).total_pages, 1);
    }

    #[test]
    fn empty_input_has_one_empty_page() {
        let records: Vec<u32> = Vec::new();

        let got = paginate(&records, 1, 10);

        assert_eq!(got.total_pages, 1);
        assert!(got.items.is_empty());
    }

    #[test]
    fn shows_all_pages() {
        let want = [
            PageIndicator::Current(1),
            PageIndicator::Page(2),
            PageIndicator::Page(3),
            PageIndicator::Page(4),
            PageIndicator::Page(5),
            PageIndicator::Next(2),
        ];

        let got = page_indicators(1, 5, 5);

        assert_eq!(want, got.as_slice());
    }

    #[test]
    fn single_page_has_no_buttons() {
        assert_eq!(page_indicators(1, 1, 5), [PageIndicator::Current(1)]);
    }

    #[test]
    fn shows_page_subset_on_left() {
        let want = [
            PageIndicator::Current(1),
            PageIndicator::Page(2),
            PageIndicator::Page(3),
            PageIndicator::Page(4),
            PageIndicator::Page(5),
            PageIndicator::Ellipsis,
            PageIndicator::Page(10),
            PageIndicator::Next(2),
        ];

        let got = page_indicators(1, 10, 5);

        assert_eq!(want, got.as_slice());
    }

    #[test]
    fn shows_page_subset_in_center() {
        let want = [
            PageIndicator::Previous(4),
            PageIndicator::Page(1),
            PageIndicator::Ellipsis,
            PageIndicator::Page(3),
            PageIndicator::Page(4),
            PageIndicator::Current(5),
            PageIndicator::Page(6),
            PageIndicator::Page(7),
            PageIndicator::Ellipsis,
            PageIndicator::Page(10),
            PageIndicator::Next(6),
        ];

        let got = page_indicators(5, 10, 5);

        assert_eq!(want, got.as_slice());
    }

    #[test]
    fn omits_ellipsis_next_to_first_page() {
        let want = [
            PageIndicator::Previous(3),
            PageIndicator::Page(1),
            PageIndicator::Page(2),
            PageIndicator::Page(3),
            PageIndicator::Current(4),
            PageIndicator::Page(5),
            PageIndicator::Page(6),
            PageIndicator::Ellipsis,
            PageIndicator::Page(10),
            PageIndicator::Next(5),
        ];

        let got = page_indicators(4, 10, 5);

        assert_eq!(want, got.as_slice());
    }

    #[test]
    fn shows_page_subset_on_right() {
        let want = [
            PageIndicator::Previous(9),
            PageIndicator::Page(1),
            PageIndicator::Ellipsis,
            PageIndicator::Page(6),
            PageIndicator::Page(7),
            PageIndicator::Page(8),
            PageIndicator::Page(9),
            PageIndicator::Current(10),
        ];

        let got = page_indicators(10, 10, 5);

        assert_eq!(want, got.as_slice());
    }
}
