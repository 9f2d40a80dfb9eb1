//! Tagged date input and interpretation of raw template values.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use tera::Value;

use crate::triple::{DateTriple, TripleError};
use crate::CalendarDate;

/// Date-time layouts accepted for text input after RFC 3339 has been tried.
const DATETIME_LAYOUTS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

const DATE_LAYOUT: &str = "%Y-%m-%d";
const YEAR_DIGITS: usize = 4;
const YEAR_MONTH_LEN: usize = 7;

/// Why an input could not be turned into a calendar date.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    /// Absent, null, or otherwise empty input.
    #[error("No date given")]
    Missing,

    /// A value of a kind that never names a date.
    #[error("Unsupported date value: {0}")]
    Unsupported(&'static str),

    /// Text that is not an ISO-8601 date.
    #[error("Unrecognised date text: {0}")]
    UnparseableText(String),

    /// Millisecond timestamp outside the calendar range.
    #[error("Timestamp out of range: {0}")]
    TimestampOutOfRange(i64),

    /// Triple whose normalized date lies outside the calendar range.
    #[error("Date {0} is outside the supported calendar range")]
    OutOfRange(DateTriple),

    /// Array that is not a readable triple.
    #[error(transparent)]
    Triple(#[from] TripleError),
}

/// A date as handed to the formatter, tagged by its representation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateInput {
    /// Nothing to format.
    Missing,
    /// `[day, month, year]` from a date-input component.
    Triple(DateTriple),
    /// An already-built calendar date.
    Date(CalendarDate),
    /// ISO-8601 text.
    Text(String),
    /// Milliseconds since the Unix epoch (UTC).
    Timestamp(i64),
}

impl DateInput {
    pub const fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }

    /// Interprets this input as a calendar date.
    ///
    /// # Errors
    /// Returns `InputError` describing why no date could be produced.
    pub fn to_calendar_date(&self) -> Result<CalendarDate, InputError> {
        match self {
            Self::Missing => Err(InputError::Missing),
            Self::Triple(triple) => triple.normalize().ok_or(InputError::OutOfRange(*triple)),
            Self::Date(date) => Ok(*date),
            Self::Text(text) => parse_text(text),
            Self::Timestamp(millis) => DateTime::from_timestamp_millis(*millis)
                .map(|datetime| CalendarDate::from(datetime.naive_utc()))
                .ok_or(InputError::TimestampOutOfRange(*millis)),
        }
    }
}

/// Parses ISO-8601 text: `YYYY`, `YYYY-MM`, `YYYY-MM-DD`, optionally with a
/// time. A trailing offset is accepted and the wall-clock time kept as written.
fn parse_text(text: &str) -> Result<CalendarDate, InputError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(InputError::Missing);
    }

    if let Ok(datetime) = DateTime::parse_from_rfc3339(text) {
        return Ok(datetime.naive_local().into());
    }

    if let Some(datetime) = DATETIME_LAYOUTS
        .iter()
        .find_map(|layout| NaiveDateTime::parse_from_str(text, layout).ok())
    {
        return Ok(datetime.into());
    }

    let date = match text.len() {
        YEAR_DIGITS if text.bytes().all(|b| b.is_ascii_digit()) => {
            NaiveDate::parse_from_str(&format!("{text}-01-01"), DATE_LAYOUT).ok()
        },
        YEAR_MONTH_LEN => NaiveDate::parse_from_str(&format!("{text}-01"), DATE_LAYOUT).ok(),
        _ => NaiveDate::parse_from_str(text, DATE_LAYOUT).ok(),
    };

    date.map(CalendarDate::from)
        .ok_or_else(|| InputError::UnparseableText(text.to_owned()))
}

/// Whole milliseconds from a JSON number; fractions are truncated.
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn millis(number: &tera::Number) -> Option<i64> {
    number.as_i64().or_else(|| {
        number
            .as_f64()
            .map(f64::trunc)
            .filter(|ms| ms.is_finite() && *ms >= i64::MIN as f64 && *ms <= i64::MAX as f64)
            .map(|ms| ms as i64)
    })
}

impl TryFrom<&Value> for DateInput {
    type Error = InputError;

    /// Empty values (`null`, `false`, `""`, `0`) become [`DateInput::Missing`];
    /// arrays must be triples, strings are text, numbers are timestamps.
    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::Null | Value::Bool(false) => Ok(Self::Missing),
            Value::Bool(true) => Err(InputError::Unsupported("boolean")),
            Value::String(text) if text.is_empty() => Ok(Self::Missing),
            Value::String(text) => Ok(Self::Text(text.clone())),
            Value::Number(number) => match millis(number) {
                Some(0) => Ok(Self::Missing),
                Some(ms) => Ok(Self::Timestamp(ms)),
                None => Err(InputError::Unsupported("number out of range")),
            },
            Value::Array(values) => Ok(Self::Triple(DateTriple::try_from(values.as_slice())?)),
            Value::Object(_) => Err(InputError::Unsupported("object")),
        }
    }
}

impl From<DateTriple> for DateInput {
    fn from(triple: DateTriple) -> Self {
        Self::Triple(triple)
    }
}

impl From<CalendarDate> for DateInput {
    fn from(date: CalendarDate) -> Self {
        Self::Date(date)
    }
}

impl From<NaiveDate> for DateInput {
    fn from(date: NaiveDate) -> Self {
        Self::Date(date.into())
    }
}

impl From<NaiveDateTime> for DateInput {
    fn from(datetime: NaiveDateTime) -> Self {
        Self::Date(datetime.into())
    }
}

impl From<String> for DateInput {
    fn from(text: String) -> Self {
        if text.is_empty() { Self::Missing } else { Self::Text(text) }
    }
}

impl From<&str> for DateInput {
    fn from(text: &str) -> Self {
        Self::from(text.to_owned())
    }
}

impl<T> From<Option<T>> for DateInput
where
    T: Into<Self>,
{
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Missing, Into::into)
    }
}
