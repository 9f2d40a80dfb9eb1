use crate::consts::{MAX_MONTH, MAX_YEAR};
use crate::prelude::*;
use crate::triple::TripleError;
use chrono::NaiveDate;
use std::num::{NonZeroU8, NonZeroU16};

/// A year value guaranteed to be in the range `1..=MAX_YEAR` (1..=9999)
/// Uses `NonZeroU16` internally, so 0 is not a valid year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{}", _0)]
pub struct Year(NonZeroU16);

impl Year {
    /// Creates a new Year, validating that it's non-zero and <= `MAX_YEAR`
    ///
    /// # Errors
    /// Returns `TripleError::InvalidYear` if the value is outside `1..=MAX_YEAR`.
    pub fn new(value: i64) -> Result<Self, TripleError> {
        u16::try_from(value)
            .ok()
            .filter(|year| *year <= MAX_YEAR)
            .and_then(NonZeroU16::new)
            .map(Self)
            .ok_or(TripleError::InvalidYear(value))
    }

    /// Returns the year value as u16
    #[inline]
    pub const fn get(self) -> u16 {
        self.0.get()
    }
}

impl From<Year> for u16 {
    fn from(year: Year) -> Self {
        year.get()
    }
}

/// A month value guaranteed to be in the range `1..=MAX_MONTH` (1..=12)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{}", _0)]
pub struct Month(NonZeroU8);

impl Month {
    /// Creates a new Month, validating that it's non-zero and <= `MAX_MONTH`
    ///
    /// # Errors
    /// Returns `TripleError::InvalidMonth` if the value is outside `1..=MAX_MONTH`.
    pub fn new(value: i64) -> Result<Self, TripleError> {
        u8::try_from(value)
            .ok()
            .filter(|month| *month <= MAX_MONTH)
            .and_then(NonZeroU8::new)
            .map(Self)
            .ok_or(TripleError::InvalidMonth(value))
    }

    /// Returns the month value as u8
    #[inline]
    pub const fn get(self) -> u8 {
        self.0.get()
    }
}

impl From<Month> for u8 {
    fn from(month: Month) -> Self {
        month.get()
    }
}

/// A day value guaranteed to exist in a given year and month
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{}", _0)]
pub struct Day(NonZeroU8);

impl Day {
    /// Creates a new Day, validating it against the calendar for `year` and `month`
    ///
    /// # Errors
    /// Returns `TripleError::InvalidDay` if the month has no such day.
    pub fn new(value: i64, year: Year, month: Month) -> Result<Self, TripleError> {
        let invalid = TripleError::InvalidDay {
            day: value,
            month: month.get(),
            year: year.get(),
        };
        let day = u8::try_from(value).ok().and_then(NonZeroU8::new).ok_or_else(|| invalid.clone())?;

        if NaiveDate::from_ymd_opt(
            i32::from(year.get()),
            u32::from(month.get()),
            u32::from(day.get()),
        )
        .is_none()
        {
            return Err(invalid);
        }

        Ok(Self(day))
    }

    /// Returns the day value as u8
    #[inline]
    pub const fn get(self) -> u8 {
        self.0.get()
    }
}

impl From<Day> for u8 {
    fn from(day: Day) -> Self {
        day.get()
    }
}
