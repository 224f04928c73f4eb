//! Optional, inclusive date-range filters.

use crate::{format::format_date_label, iso_date::IsoDate, record::Dated};

/// An inclusive date range where either bound may be open.
///
/// A range with neither bound matches every date.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DateRange {
    /// The earliest date to include.
    pub start: Option<IsoDate>,
    /// The latest date to include.
    pub end: Option<IsoDate>,
}

impl DateRange {
    /// Create a range from optional bounds.
    pub fn new(start: Option<IsoDate>, end: Option<IsoDate>) -> Self {
        Self { start, end }
    }

    /// Create a range from raw query values, where blank values are open bounds.
    pub fn from_query(start: Option<&str>, end: Option<&str>) -> Self {
        Self::new(IsoDate::from_filter(start), IsoDate::from_filter(end))
    }

    /// Whether neither bound is set.
    pub fn is_unbounded(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    /// The same range with its bounds swapped if `start` is after `end`.
    ///
    /// Only the overview screen applies this; the provider screens filter
    /// with the range exactly as entered, so a reversed range matches nothing
    /// there.
    pub fn normalized(&self) -> Self {
        match (&self.start, &self.end) {
            (Some(start), Some(end)) if start > end => {
                Self::new(Some(end.clone()), Some(start.clone()))
            }
            _ => self.clone(),
        }
    }

    /// Whether `date` falls inside the range, comparing normalised date strings.
    pub fn contains(&self, date: &IsoDate) -> bool {
        let after_start = self.start.as_ref().is_none_or(|start| date >= start);
        let before_end = self.end.as_ref().is_none_or(|end| date <= end);

        after_start && before_end
    }

    /// A human readable description of the range, e.g. "May 1, 2024 - May 5, 2024".
    pub fn label(&self) -> String {
        match (&self.start, &self.end) {
            (None, None) => "All dates".to_owned(),
            (Some(start), None) => format!("From {}", format_date_label(start)),
            (None, Some(end)) => format!("Until {}", format_date_label(end)),
            (Some(start), Some(end)) => {
                format!("{} - {}", format_date_label(start), format_date_label(end))
            }
        }
    }
}

/// Whether `record` is dated within `range`.
///
/// The range is used as given; see [DateRange::normalized] for the lenient
/// variant.
pub fn matches_date<R: Dated>(record: &R, range: &DateRange) -> bool {
    range.contains(record.date())
}

#[cfg(test)]
mod tests {
    use crate::{iso_date::IsoDate, record::Dated};

    use super::{DateRange, matches_date};

    struct DatedRecord(IsoDate);

    impl Dated for DatedRecord {
        fn date(&self) -> &IsoDate {
            &self.0
        }
    }

    fn record(date: &str) -> DatedRecord {
        DatedRecord(IsoDate::normalize(date))
    }

    fn range(start: Option<&str>, end: Option<&str>) -> DateRange {
        DateRange::from_query(start, end)
    }

    #[test]
    fn unbounded_range_matches_everything() {
        let range = DateRange::default();

        assert!(range.is_unbounded());
        assert!(matches_date(&record("1999-01-01"), &range));
        assert!(matches_date(&record(""), &range));
    }

    #[test]
    fn start_only_is_inclusive_lower_bound() {
        let range = range(Some("2024-01-03"), None);

        assert!(!matches_date(&record("2024-01-02"), &range));
        assert!(matches_date(&record("2024-01-03"), &range));
        assert!(matches_date(&record("2025-01-01"), &range));
    }

    #[test]
    fn end_only_is_inclusive_upper_bound() {
        let range = range(None, Some("2024-01-05"));

        assert!(matches_date(&record("2023-12-31"), &range));
        assert!(matches_date(&record("2024-01-05"), &range));
        assert!(!matches_date(&record("2024-01-06"), &range));
    }

    #[test]
    fn bounds_accept_timestamps() {
        let range = range(Some("2024-01-03T00:00:00.000Z"), Some("2024-01-03"));

        assert!(matches_date(&record("2024-01-03T23:59:59.000Z"), &range));
    }

    #[test]
    fn blank_bounds_are_open() {
        assert!(range(Some(""), Some("  ")).is_unbounded());
    }

    #[test]
    fn reversed_range_matches_nothing_unless_normalized() {
        let reversed = range(Some("2024-01-05"), Some("2024-01-03"));
        let jan_4 = record("2024-01-04");

        assert!(!matches_date(&jan_4, &reversed));
        assert!(matches_date(&jan_4, &reversed.normalized()));
        assert_eq!(reversed.normalized(), range(Some("2024-01-03"), Some("2024-01-05")));
    }

    #[test]
    fn normalized_keeps_ordered_and_one_sided_ranges() {
        let ordered = range(Some("2024-01-03"), Some("2024-01-05"));
        let one_sided = range(Some("2024-01-05"), None);

        assert_eq!(ordered.normalized(), ordered);
        assert_eq!(one_sided.normalized(), one_sided);
    }

    #[test]
    fn labels_describe_bounds() {
        assert_eq!(DateRange::default().label(), "All dates");
        assert_eq!(range(Some("2024-05-01"), None).label(), "From May 1, 2024");
        assert_eq!(range(None, Some("2024-05-05")).label(), "Until May 5, 2024");
        assert_eq!(
            range(Some("2024-05-01"), Some("2024-05-05")).label(),
            "May 1, 2024 - May 5, 2024"
        );
    }
}
