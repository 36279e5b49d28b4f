//! Tolerant parsing of date/time strings and calendar date ranges.
//!
//! Upstream fields are frequently empty, malformed or placeholder text such
//! as `No moonrise`. Parsing therefore resolves failures to `None` rather
//! than an error; only [`validate`] is used for strict precondition checks.

use chrono::{Days, NaiveDate, NaiveDateTime, NaiveTime, ParseResult};

/// A temporal type that can be parsed from text with a `strftime` format
pub trait Temporal: Sized {
    fn parse_with_format(text: &str, format: &str) -> ParseResult<Self>;
}

impl Temporal for NaiveDate {
    fn parse_with_format(text: &str, format: &str) -> ParseResult<Self> {
        NaiveDate::parse_from_str(text, format)
    }
}

impl Temporal for NaiveTime {
    fn parse_with_format(text: &str, format: &str) -> ParseResult<Self> {
        NaiveTime::parse_from_str(text, format)
    }
}

impl Temporal for NaiveDateTime {
    fn parse_with_format(text: &str, format: &str) -> ParseResult<Self> {
        NaiveDateTime::parse_from_str(text, format)
    }
}

/// Parse `text` as `T` using `format`, or `None` on any mismatch
///
/// ```rust
/// use chrono::NaiveTime;
/// use wttr_archive::temporal::parse_or_absent;
///
/// let t: Option<NaiveTime> = parse_or_absent("06:48 PM", "%I:%M %p");
/// assert_eq!(t, NaiveTime::from_hms_opt(18, 48, 0));
/// assert_eq!(parse_or_absent::<NaiveTime>("No moonrise", "%I:%M %p"), None);
/// ```
pub fn parse_or_absent<T: Temporal>(text: &str, format: &str) -> Option<T> {
    T::parse_with_format(text.trim(), format).ok()
}

/// Check whether `text` matches `format` as a datetime, a date or a time
pub fn validate(text: &str, format: &str) -> bool {
    parse_or_absent::<NaiveDateTime>(text, format).is_some()
        || parse_or_absent::<NaiveDate>(text, format).is_some()
        || parse_or_absent::<NaiveTime>(text, format).is_some()
}

/// Half-open range of calendar dates `[start, end)`
///
/// The range is `Copy`, so iterating it never consumes the range itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

/// Build the half-open range of dates from `start` up to but excluding `end`
pub fn date_range(start: NaiveDate, end: NaiveDate) -> DateRange {
    DateRange { start, end }
}

impl DateRange {
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Number of dates in the range
    pub fn len(&self) -> usize {
        (self.end - self.start).num_days().max(0) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    pub fn iter(&self) -> DateRangeIter {
        DateRangeIter {
            next: self.start,
            end: self.end,
        }
    }
}

impl IntoIterator for DateRange {
    type Item = NaiveDate;
    type IntoIter = DateRangeIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for &DateRange {
    type Item = NaiveDate;
    type IntoIter = DateRangeIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Lazy iterator over a [`DateRange`]
#[derive(Debug, Clone)]
pub struct DateRangeIter {
    next: NaiveDate,
    end: NaiveDate,
}

impl Iterator for DateRangeIter {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.end {
            return None;
        }
        let current = self.next;
        // Stepping past NaiveDate::MAX ends the range
        self.next = current.checked_add_days(Days::new(1)).unwrap_or(self.end);
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.end - self.next).num_days().max(0) as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for DateRangeIter {}
