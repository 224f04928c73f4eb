use time::{OffsetDateTime, UtcOffset};
use time_tz::{Offset, TimeZone};

use crate::{Error, iso_date::IsoDate};

pub fn get_local_offset(canonical_timezone: &str) -> Option<UtcOffset> {
    time_tz::timezones::get_by_name(canonical_timezone)
        .map(|tz| tz.get_offset_utc(&OffsetDateTime::now_utc()).to_utc())
}

/// Today's date in `canonical_timezone`, e.g. "Asia/Manila".
///
/// # Errors
/// Returns [Error::InvalidTimezone] if the timezone name is not known.
pub fn local_today(canonical_timezone: &str) -> Result<IsoDate, Error> {
    get_local_offset(canonical_timezone)
        .map(IsoDate::today)
        .ok_or_else(|| Error::InvalidTimezone(canonical_timezone.to_owned()))
}
