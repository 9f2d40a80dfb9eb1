use chrono::{NaiveDate, TimeDelta};
use serde::{Deserialize, Serialize};
use tera::Value;

use crate::consts::{MAX_MONTH, MAX_YEAR, MONTHS_PER_YEAR, TRIPLE_LEN};
use crate::types::{Day, Month, Year};
use crate::{CalendarDate, prelude::*};

/// A `[day, month, year]` date as posted by multi-field date inputs.
///
/// The month is 1-indexed. Components are not validated: [`DateTriple::normalize`]
/// carries out-of-range values into the neighbouring month or year, and
/// [`DateTriple::to_exact_date`] rejects them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[display(fmt = "[{}, {}, {}]", day, month, year)]
pub struct DateTriple {
    pub day:   i64,
    pub month: i64,
    pub year:  i64,
}

/// Reasons a triple cannot be read or strictly converted.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum TripleError {
    #[display(fmt = "Expected an array of {} date components", TRIPLE_LEN)]
    NotAnArray,
    #[display(fmt = "Expected {} date components, found {}", TRIPLE_LEN, "_0")]
    WrongLength(usize),
    #[display(fmt = "Date component is not a whole number: {_0}")]
    NotANumber(String),
    #[display(fmt = "Invalid year: {} (must be 1-{})", "_0", MAX_YEAR)]
    InvalidYear(i64),
    #[display(fmt = "Invalid month: {} (must be 1-{})", "_0", MAX_MONTH)]
    InvalidMonth(i64),
    #[display(fmt = "Invalid day {day} for month {year}-{month:02}")]
    InvalidDay { day: i64, month: u8, year: u16 },
}

impl std::error::Error for TripleError {}

impl DateTriple {
    pub const fn new(day: i64, month: i64, year: i64) -> Self {
        Self { day, month, year }
    }

    /// Builds the calendar date at midnight, letting out-of-range components
    /// overflow: `[32, 1, 2020]` is 1 February 2020 and `[0, 3, 2020]` is
    /// 29 February 2020.
    ///
    /// Returns `None` only when the result lies outside the representable
    /// calendar range.
    pub fn normalize(&self) -> Option<CalendarDate> {
        // month is 1-indexed; count whole months from year 0 so overflow carries into the year
        let months = self
            .year
            .checked_mul(MONTHS_PER_YEAR)?
            .checked_add(self.month.checked_sub(1)?)?;
        let year = i32::try_from(months.div_euclid(MONTHS_PER_YEAR)).ok()?;
        let month = u32::try_from(months.rem_euclid(MONTHS_PER_YEAR)).ok()? + 1;

        let first = NaiveDate::from_ymd_opt(year, month, 1)?;
        let date = first.checked_add_signed(TimeDelta::try_days(self.day.checked_sub(1)?)?)?;
        Some(CalendarDate::from(date))
    }

    /// Converts to a calendar date, rejecting components that do not name a
    /// real day in `1..=MAX_YEAR`.
    ///
    /// # Errors
    /// Returns the first invalid component as a `TripleError`.
    pub fn to_exact_date(&self) -> Result<CalendarDate, TripleError> {
        let year = Year::new(self.year)?;
        let month = Month::new(self.month)?;
        let day = Day::new(self.day, year, month)?;

        NaiveDate::from_ymd_opt(
            i32::from(year.get()),
            u32::from(month.get()),
            u32::from(day.get()),
        )
        .map(CalendarDate::from)
        .ok_or(TripleError::InvalidDay {
            day:   self.day,
            month: month.get(),
            year:  year.get(),
        })
    }

    /// Reads one component the way form values arrive: integers, whole
    /// floats, or numeric strings. Fractions are truncated.
    fn component(value: &Value) -> Result<i64, TripleError> {
        let not_a_number = || TripleError::NotANumber(value.to_string());
        match value {
            Value::Number(number) => number
                .as_i64()
                .or_else(|| number.as_f64().and_then(truncate))
                .ok_or_else(not_a_number),
            Value::String(text) => {
                let text = text.trim();
                text.parse::<i64>()
                    .ok()
                    .or_else(|| text.parse::<f64>().ok().and_then(truncate))
                    .ok_or_else(not_a_number)
            },
            _ => Err(not_a_number()),
        }
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn truncate(value: f64) -> Option<i64> {
    let whole = value.trunc();
    (whole.is_finite() && whole >= i64::MIN as f64 && whole <= i64::MAX as f64).then_some(whole as i64)
}

impl From<(i64, i64, i64)> for DateTriple {
    fn from((day, month, year): (i64, i64, i64)) -> Self {
        Self::new(day, month, year)
    }
}

impl From<[i64; TRIPLE_LEN]> for DateTriple {
    fn from([day, month, year]: [i64; TRIPLE_LEN]) -> Self {
        Self::new(day, month, year)
    }
}

impl TryFrom<&[Value]> for DateTriple {
    type Error = TripleError;

    fn try_from(values: &[Value]) -> Result<Self, Self::Error> {
        match values {
            [day, month, year] => Ok(Self::new(
                Self::component(day)?,
                Self::component(month)?,
                Self::component(year)?,
            )),
            _ => Err(TripleError::WrongLength(values.len())),
        }
    }
}

impl TryFrom<&Value> for DateTriple {
    type Error = TripleError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        value
            .as_array()
            .ok_or(TripleError::NotAnArray)
            .and_then(|values| Self::try_from(values.as_slice()))
    }
}

impl Serialize for DateTriple {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        [self.day, self.month, self.year].serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for DateTriple {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let values = Vec::<Value>::deserialize(deserializer)?;
        Self::try_from(values.as_slice()).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ymd(date: CalendarDate) -> (i32, u32, u32) {
        (date.year(), date.month(), date.day())
    }

    #[test]
    fn test_normalize_cases() {
        struct TestCase {
            triple:      [i64; 3],
            expected:    (i32, u32, u32),
            description: &'static str,
        }

        let cases = [
            TestCase {
                triple:      [1, 2, 2020],
                expected:    (2020, 2, 1),
                description: "plain date",
            },
            TestCase {
                triple:      [1, 1, 1970],
                expected:    (1970, 1, 1),
                description: "epoch",
            },
            TestCase {
                triple:      [32, 1, 2020],
                expected:    (2020, 2, 1),
                description: "day past end of January",
            },
            TestCase {
                triple:      [31, 4, 2020],
                expected:    (2020, 5, 1),
                description: "April has 30 days",
            },
            TestCase {
                triple:      [30, 2, 2021],
                expected:    (2021, 3, 2),
                description: "February in a common year",
            },
            TestCase {
                triple:      [0, 3, 2020],
                expected:    (2020, 2, 29),
                description: "day zero is the last day of the previous month",
            },
            TestCase {
                triple:      [1, 13, 2020],
                expected:    (2021, 1, 1),
                description: "month 13 carries into the next year",
            },
            TestCase {
                triple:      [15, 0, 2020],
                expected:    (2019, 12, 15),
                description: "month zero is December of the previous year",
            },
            TestCase {
                triple:      [-1, 1, 2020],
                expected:    (2019, 12, 30),
                description: "negative day counts back",
            },
            TestCase {
                triple:      [400, 1, 2020],
                expected:    (2021, 2, 3),
                description: "day overflow across a year boundary",
            },
        ];

        for case in &cases {
            let date = DateTriple::from(case.triple)
                .normalize()
                .unwrap_or_else(|| panic!("no date for {}", case.description));
            assert_eq!(ymd(date), case.expected, "{}", case.description);
        }
    }

    #[test]
    fn test_normalize_is_midnight() {
        let date = DateTriple::new(1, 2, 2020).normalize().unwrap();
        assert_eq!(date.to_string(), "2020-02-01T00:00:00.000Z");
    }

    #[test]
    fn test_normalize_out_of_range() {
        assert_eq!(DateTriple::new(1, 1, i64::MAX).normalize(), None);
        assert_eq!(DateTriple::new(1, 1, 1_000_000).normalize(), None);
        assert_eq!(DateTriple::new(i64::MIN, 1, 2020).normalize(), None);
        assert_eq!(DateTriple::new(1, i64::MIN, 2020).normalize(), None);
    }

    #[test]
    fn test_to_exact_date() {
        let date = DateTriple::new(29, 2, 2024).to_exact_date().unwrap();
        assert_eq!(ymd(date), (2024, 2, 29));

        assert_eq!(
            DateTriple::new(31, 4, 2020).to_exact_date(),
            Err(TripleError::InvalidDay {
                day:   31,
                month: 4,
                year:  2020,
            })
        );
        assert_eq!(
            DateTriple::new(1, 13, 2020).to_exact_date(),
            Err(TripleError::InvalidMonth(13))
        );
        assert_eq!(
            DateTriple::new(1, 1, 0).to_exact_date(),
            Err(TripleError::InvalidYear(0))
        );
    }

    #[test]
    fn test_try_from_value_cases() {
        struct TestCase {
            value:       Value,
            expected:    Result<DateTriple, TripleError>,
            description: &'static str,
        }

        let cases = [
            TestCase {
                value:       json!([1, 2, 2020]),
                expected:    Ok(DateTriple::new(1, 2, 2020)),
                description: "integers",
            },
            TestCase {
                value:       json!(["1", " 02 ", "2020"]),
                expected:    Ok(DateTriple::new(1, 2, 2020)),
                description: "numeric strings from form fields",
            },
            TestCase {
                value:       json!([1.9, 2.0, 2020]),
                expected:    Ok(DateTriple::new(1, 2, 2020)),
                description: "floats truncate",
            },
            TestCase {
                value:       json!(["", "2", "2020"]),
                expected:    Err(TripleError::NotANumber("\"\"".to_owned())),
                description: "blank day field",
            },
            TestCase {
                value:       json!(["first", 2, 2020]),
                expected:    Err(TripleError::NotANumber("\"first\"".to_owned())),
                description: "non-numeric day",
            },
            TestCase {
                value:       json!([1, null, 2020]),
                expected:    Err(TripleError::NotANumber("null".to_owned())),
                description: "null month",
            },
            TestCase {
                value:       json!([1, 2]),
                expected:    Err(TripleError::WrongLength(2)),
                description: "too short",
            },
            TestCase {
                value:       json!([1, 2, 2020, 4]),
                expected:    Err(TripleError::WrongLength(4)),
                description: "too long",
            },
            TestCase {
                value:       json!("2020-02-01"),
                expected:    Err(TripleError::NotAnArray),
                description: "not an array",
            },
        ];

        for case in &cases {
            assert_eq!(
                DateTriple::try_from(&case.value),
                case.expected,
                "{}",
                case.description
            );
        }
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            TripleError::WrongLength(2).to_string(),
            "Expected 3 date components, found 2"
        );
        assert_eq!(
            TripleError::InvalidMonth(13).to_string(),
            "Invalid month: 13 (must be 1-12)"
        );
        assert_eq!(
            TripleError::InvalidDay {
                day:   31,
                month: 4,
                year:  2020,
            }
            .to_string(),
            "Invalid day 31 for month 2020-04"
        );
    }

    #[test]
    fn test_serde_array_format() {
        let triple = DateTriple::new(1, 2, 2020);
        let json = serde_json::to_string(&triple).unwrap();
        assert_eq!(json, "[1,2,2020]");

        let parsed: DateTriple = serde_json::from_str(r#"["1","2","2020"]"#).unwrap();
        assert_eq!(parsed, triple);

        let result = serde_json::from_str::<DateTriple>("[1,2]");
        assert!(result.is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(DateTriple::new(1, 2, 2020).to_string(), "[1, 2, 2020]");
    }
}
