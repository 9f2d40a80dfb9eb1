//! GOV.UK style date formatting for templates.
//!
//! Dates arrive either as `[day, month, year]` triples, the shape posted by
//! multi-field date inputs, or as date values, and are rendered as
//! `1 February 2020` unless a moment-style pattern says otherwise.
//!
//! Formatting never fails: anything that cannot be read as a date renders as
//! an empty string so that a missing answer leaves a blank on the page.
//!
//! ```
//! use govuk_date::{DateTriple, format_filter};
//!
//! assert_eq!(format_filter(DateTriple::new(1, 2, 2020), None), "1 February 2020");
//! assert_eq!(format_filter("2020-02-01", Some("YYYY-MM-DD")), "2020-02-01");
//! assert_eq!(format_filter("", None), "");
//! ```

mod consts;
mod filters;
mod input;
mod pattern;
mod prelude;
mod triple;
mod types;

pub use consts::*;
pub use filters::{DateFilter, DateFilters, FilterConfig, register};
pub use input::{DateInput, InputError};
pub use pattern::FormatPattern;
pub use triple::{DateTriple, TripleError};
pub use types::{Day, Month, Year};

use crate::prelude::*;
use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// An absolute date and time with no time zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Deref, From, Into)]
#[display(fmt = "{}", "_0.format(consts::ISO_LAYOUT)")]
pub struct CalendarDate(NaiveDateTime);

impl CalendarDate {
    pub const fn new(datetime: NaiveDateTime) -> Self {
        Self(datetime)
    }

    /// Returns the year component
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Returns the month component (1-indexed)
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// Returns the day-of-month component
    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// Returns the calendar date without its time
    pub fn date(&self) -> NaiveDate {
        self.0.date()
    }

    /// Renders with `pattern`.
    pub fn format(&self, pattern: &FormatPattern) -> String {
        pattern.render(&self.0)
    }
}

impl From<NaiveDate> for CalendarDate {
    fn from(date: NaiveDate) -> Self {
        Self(date.and_time(NaiveTime::MIN))
    }
}

impl FromStr for CalendarDate {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DateInput::from(s).to_calendar_date()
    }
}

impl From<CalendarDate> for tera::Value {
    fn from(date: CalendarDate) -> Self {
        Self::String(date.to_string())
    }
}

impl Serialize for CalendarDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for CalendarDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Builds the calendar date for a triple, letting out-of-range components
/// overflow into neighbouring months and years.
///
/// Returns `None` only when the result is outside the representable calendar.
pub fn normalize_to_date(triple: DateTriple) -> Option<CalendarDate> {
    triple.normalize()
}

/// The date a triple names, as handed back to templates by `arrayToDateObject`.
pub fn array_to_date_object(triple: DateTriple) -> Option<CalendarDate> {
    normalize_to_date(triple)
}

/// Formats `input` with `format`, or the default pattern when `format` is
/// absent or empty.
///
/// # Errors
/// Returns `InputError` when `input` is missing or is not a valid date.
pub fn try_format_date(input: &DateInput, format: Option<&str>) -> Result<String, InputError> {
    let date = input.to_calendar_date()?;
    let pattern = format
        .filter(|format| !format.is_empty())
        .map_or_else(FormatPattern::default, FormatPattern::parse);
    Ok(date.format(&pattern))
}

/// Formats any accepted date representation. Missing or invalid input gives `""`.
pub fn format_date(input: impl Into<DateInput>, format: Option<&str>) -> String {
    let input = input.into();
    try_format_date(&input, format).unwrap_or_else(|err| {
        log::debug!("Rendering blank date for {input:?}: {err}");
        String::new()
    })
}

/// Formats a date value. Same contract as [`format_date`].
pub fn date_to_govuk_date(input: impl Into<DateInput>, format: Option<&str>) -> String {
    format_date(input, format)
}

/// Normalizes a triple and formats it. Gives `""` if the triple lies outside
/// the representable calendar.
pub fn array_to_govuk_date(triple: DateTriple, format: Option<&str>) -> String {
    normalize_to_date(triple).map_or_else(
        || {
            log::debug!("Rendering blank date for {triple}: outside the calendar range");
            String::new()
        },
        |date| format_date(date, format),
    )
}

/// Formats a triple or a date value, whichever `input` holds.
pub fn format_filter(input: impl Into<DateInput>, format: Option<&str>) -> String {
    match input.into() {
        DateInput::Triple(triple) => array_to_govuk_date(triple, format),
        other => date_to_govuk_date(other, format),
    }
}
