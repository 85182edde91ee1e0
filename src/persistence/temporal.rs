//! Date and date interval handling.
//!
//! Dates are kept as [`NaiveDateTime`] so the time of day survives a save and
//! load, but every comparison in the engine looks at the calendar day only.

use std::fmt::Display;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Literal separator between the two ends of an interval value.
pub const INTERVAL_SEPARATOR: &str = " - ";

/// Storage format used when a date is written into a document.
pub(crate) const DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

const DATE_TIME_FORMATS: [&str; 10] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%d.%m.%Y %H:%M:%S",
    "%d.%m.%Y %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
];

const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%d.%m.%Y", "%Y/%m/%d"];

pub fn parse_date_time(text: &str) -> Option<NaiveDateTime> {
    //! Parse a date or date-time in any of the accepted layouts.
    //!
    //! A bare date is read as midnight. An RFC 3339 offset is dropped and the
    //! wall clock time as written is kept.

    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if let Ok(datetime) = DateTime::parse_from_rfc3339(text) {
        return Some(datetime.naive_local());
    }

    DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}

pub fn same_day(left: &NaiveDateTime, right: &NaiveDateTime) -> bool {
    left.date() == right.date()
}

/// A parsed `"<start> - <end>"` value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DateInterval {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl DateInterval {
    pub fn same_days(&self, other: &DateInterval) -> bool {
        same_day(&self.start, &other.start) && same_day(&self.end, &other.end)
    }
}

impl FromStr for DateInterval {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(INTERVAL_SEPARATOR).collect();
        if parts.len() != 2 {
            return Err(());
        }

        let start = parse_date_time(parts[0]).ok_or(())?;
        let end = parse_date_time(parts[1]).ok_or(())?;

        Ok(DateInterval { start, end })
    }
}

impl Display for DateInterval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}{}{}",
            self.start.format(DATE_TIME_FORMAT),
            INTERVAL_SEPARATOR,
            self.end.format(DATE_TIME_FORMAT)
        )
    }
}
