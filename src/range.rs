//! Date range parsing and validation
//!
//! A [`DateRange`] is the only way into the fetch pipeline: it guarantees
//! `start <= end` and that `end` is not the current day, whose track would
//! still be incomplete.

use chrono::{Local, NaiveDate};
use std::fmt;

/// Date format accepted on input and used in file names and query strings
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Anything that can be turned into a calendar date for range validation
///
/// Implemented for text in `YYYY-MM-DD` form and for [`NaiveDate`] values,
/// which are passed through unchanged.
pub trait DateInput {
    /// Resolve into a date
    fn to_date(&self) -> Result<NaiveDate, RangeError>;
}

impl DateInput for NaiveDate {
    fn to_date(&self) -> Result<NaiveDate, RangeError> {
        Ok(*self)
    }
}

impl DateInput for &NaiveDate {
    fn to_date(&self) -> Result<NaiveDate, RangeError> {
        Ok(**self)
    }
}

impl DateInput for &str {
    fn to_date(&self) -> Result<NaiveDate, RangeError> {
        parse_date(self)
    }
}

impl DateInput for String {
    fn to_date(&self) -> Result<NaiveDate, RangeError> {
        parse_date(self)
    }
}

impl DateInput for &String {
    fn to_date(&self) -> Result<NaiveDate, RangeError> {
        parse_date(self)
    }
}

/// Parse a `YYYY-MM-DD` date
pub fn parse_date(input: &str) -> Result<NaiveDate, RangeError> {
    let input = input.trim();
    NaiveDate::parse_from_str(input, DATE_FORMAT).map_err(|e| RangeError::Format {
        input: input.to_string(),
        reason: e.to_string(),
    })
}

/// Today's date on the local calendar
pub fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

/// Validated, immutable date range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Validate a range against `today`
    ///
    /// # Errors
    ///
    /// - [`RangeError::Format`] if either input is not a `YYYY-MM-DD` date
    /// - [`RangeError::InvalidRange`] if `start > end`
    /// - [`RangeError::TodayAsEnd`] if `end == today`
    pub fn new<S, E>(start: S, end: E, today: NaiveDate) -> Result<Self, RangeError>
    where
        S: DateInput,
        E: DateInput,
    {
        let start = start.to_date()?;
        let end = end.to_date()?;

        if start > end {
            return Err(RangeError::InvalidRange { start, end });
        }

        if end == today {
            return Err(RangeError::TodayAsEnd { end });
        }

        Ok(Self { start, end })
    }

    /// First day of the range
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last day of the range
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// `(end - start)` in whole days; zero for a single-day range
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days()
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// Validate a range and return its span in days
///
/// Convenience wrapper over [`DateRange::new`] for callers that only need the
/// day count.
///
/// ```
/// use chrono::NaiveDate;
/// use vessel_track_downloader::range::validate;
///
/// let today = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
/// assert_eq!(validate("2022-01-08", "2022-07-08", today).unwrap(), 181);
/// ```
pub fn validate<S, E>(start: S, end: E, today: NaiveDate) -> Result<i64, RangeError>
where
    S: DateInput,
    E: DateInput,
{
    DateRange::new(start, end, today).map(|range| range.days())
}

/// Date range validation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RangeError {
    /// Input was not a `YYYY-MM-DD` date
    #[error("invalid date '{input}', expected YYYY-MM-DD: {reason}")]
    Format {
        /// Offending input
        input: String,
        /// Parser message
        reason: String,
    },

    /// Start date falls after end date
    #[error("invalid range: end date {end} is before start date {start}")]
    InvalidRange {
        /// Requested start
        start: NaiveDate,
        /// Requested end
        end: NaiveDate,
    },

    /// End date is today
    #[error("end date {end} is today; today's track is incomplete, pick an earlier end date")]
    TodayAsEnd {
        /// Requested end
        end: NaiveDate,
    },
}
