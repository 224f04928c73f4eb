//! Calendar dates as normalised `YYYY-MM-DD` strings.
//!
//! Records from the backend carry their dates as strings. Comparing those
//! strings directly, rather than converting them to timestamps, keeps date
//! filters free of timezone drift: for the `YYYY-MM-DD` format lexicographic
//! order is chronological order.

use std::fmt::Display;

use serde::{Deserialize, Deserializer, Serialize};
use time::{
    Date, OffsetDateTime, UtcOffset, format_description::BorrowedFormatItem,
    macros::format_description,
};

const ISO_DATE_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]");
const ISO_DATE_LENGTH: usize = 10;

/// A date string normalised to `YYYY-MM-DD` where possible.
///
/// Ordering is the string ordering.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct IsoDate(String);

impl IsoDate {
    /// Normalise a raw date string.
    ///
    /// Leading and trailing whitespace is removed. If the first ten
    /// characters form a valid calendar date, only those are kept, so
    /// timestamps such as `2024-05-01T00:00:00.000Z` become `2024-05-01`.
    /// Anything else is kept verbatim.
    pub fn normalize(raw: &str) -> Self {
        let trimmed = raw.trim();

        match trimmed.get(..ISO_DATE_LENGTH) {
            Some(prefix) if Date::parse(prefix, ISO_DATE_FORMAT).is_ok() => {
                Self(prefix.to_owned())
            }
            _ => Self(trimmed.to_owned()),
        }
    }

    /// Parse an optional filter value, where a missing or blank value means
    /// "no filter".
    pub fn from_filter(raw: Option<&str>) -> Option<Self> {
        raw.filter(|value| !value.trim().is_empty())
            .map(Self::normalize)
    }

    /// The date for `date`.
    pub fn from_date(date: Date) -> Self {
        Self(date.to_string())
    }

    /// Today's date at the given UTC offset.
    pub fn today(offset: UtcOffset) -> Self {
        Self::from_date(OffsetDateTime::now_utc().to_offset(offset).date())
    }

    /// The normalised string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The calendar date, if the string is a valid `YYYY-MM-DD` date.
    pub fn to_date(&self) -> Option<Date> {
        Date::parse(&self.0, ISO_DATE_FORMAT).ok()
    }
}

impl Display for IsoDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for IsoDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;

        Ok(Self::normalize(raw.as_deref().unwrap_or_default()))
    }
}
