//! Moment-style format patterns such as `D MMMM YYYY`.

use std::fmt;

use chrono::{Datelike, NaiveDateTime, Timelike};

use crate::consts::{
    DEFAULT_PATTERN, LITERAL_CLOSE, LITERAL_OPEN, MONTH_NAMES, SHORT_NAME_LEN, WEEKDAY_NAMES,
};

/// A single date or time field inside a pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Year,
    YearShort,
    MonthName,
    MonthNameShort,
    MonthPadded,
    Month,
    DayOrdinal,
    DayPadded,
    Day,
    WeekdayName,
    WeekdayNameShort,
    WeekdayNameMin,
    Weekday,
    Hour24Padded,
    Hour24,
    Hour12Padded,
    Hour12,
    MinutePadded,
    Minute,
    SecondPadded,
    Second,
    MeridiemUpper,
    MeridiemLower,
}

/// Recognised tokens; longer tokens sharing a prefix come first.
const TOKENS: [(&str, Field); 23] = [
    ("YYYY", Field::Year),
    ("YY", Field::YearShort),
    ("MMMM", Field::MonthName),
    ("MMM", Field::MonthNameShort),
    ("MM", Field::MonthPadded),
    ("M", Field::Month),
    ("Do", Field::DayOrdinal),
    ("DD", Field::DayPadded),
    ("D", Field::Day),
    ("dddd", Field::WeekdayName),
    ("ddd", Field::WeekdayNameShort),
    ("dd", Field::WeekdayNameMin),
    ("d", Field::Weekday),
    ("HH", Field::Hour24Padded),
    ("H", Field::Hour24),
    ("hh", Field::Hour12Padded),
    ("h", Field::Hour12),
    ("mm", Field::MinutePadded),
    ("m", Field::Minute),
    ("ss", Field::SecondPadded),
    ("s", Field::Second),
    ("A", Field::MeridiemUpper),
    ("a", Field::MeridiemLower),
];

#[derive(Debug, Clone, PartialEq, Eq)]
enum Piece {
    Literal(String),
    Field(Field),
}

/// A parsed format pattern.
///
/// Parsing never fails: characters that are not tokens are copied through,
/// and text inside `[...]` is always literal. An unterminated `[` is literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatPattern {
    pieces: Vec<Piece>,
}

impl FormatPattern {
    pub fn parse(pattern: &str) -> Self {
        let mut pieces = Vec::new();
        let mut literal = String::new();
        let mut rest = pattern;

        while let Some(c) = rest.chars().next() {
            if c == LITERAL_OPEN {
                let open = c.len_utf8();
                if let Some(close) = rest[open..].find(LITERAL_CLOSE) {
                    literal.push_str(&rest[open..open + close]);
                    rest = &rest[open + close + LITERAL_CLOSE.len_utf8()..];
                    continue;
                }
            }

            if let Some((token, field)) = TOKENS.iter().find(|(token, _)| rest.starts_with(token)) {
                if !literal.is_empty() {
                    pieces.push(Piece::Literal(std::mem::take(&mut literal)));
                }
                pieces.push(Piece::Field(*field));
                rest = &rest[token.len()..];
                continue;
            }

            literal.push(c);
            rest = &rest[c.len_utf8()..];
        }

        if !literal.is_empty() {
            pieces.push(Piece::Literal(literal));
        }
        Self { pieces }
    }

    /// Renders `datetime` with this pattern.
    pub fn render(&self, datetime: &NaiveDateTime) -> String {
        Rendered {
            pattern: self,
            datetime,
        }
        .to_string()
    }
}

impl Default for FormatPattern {
    fn default() -> Self {
        Self::parse(DEFAULT_PATTERN)
    }
}

impl From<&str> for FormatPattern {
    fn from(pattern: &str) -> Self {
        Self::parse(pattern)
    }
}

struct Rendered<'a> {
    pattern:  &'a FormatPattern,
    datetime: &'a NaiveDateTime,
}

impl fmt::Display for Rendered<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for piece in &self.pattern.pieces {
            match piece {
                Piece::Literal(text) => f.write_str(text)?,
                Piece::Field(field) => write_field(f, *field, self.datetime)?,
            }
        }
        Ok(())
    }
}

fn write_field(f: &mut fmt::Formatter<'_>, field: Field, dt: &NaiveDateTime) -> fmt::Result {
    let month_name = MONTH_NAMES[dt.month() as usize];
    let weekday_name = WEEKDAY_NAMES[dt.weekday().num_days_from_sunday() as usize];

    match field {
        Field::Year if dt.year() < 0 => write!(f, "-{:04}", dt.year().unsigned_abs()),
        Field::Year => write!(f, "{:04}", dt.year()),
        Field::YearShort => write!(f, "{:02}", dt.year().rem_euclid(100)),
        Field::MonthName => f.write_str(month_name),
        Field::MonthNameShort => f.write_str(&month_name[..SHORT_NAME_LEN]),
        Field::MonthPadded => write!(f, "{:02}", dt.month()),
        Field::Month => write!(f, "{}", dt.month()),
        Field::DayOrdinal => write!(f, "{}{}", dt.day(), ordinal_suffix(dt.day())),
        Field::DayPadded => write!(f, "{:02}", dt.day()),
        Field::Day => write!(f, "{}", dt.day()),
        Field::WeekdayName => f.write_str(weekday_name),
        Field::WeekdayNameShort => f.write_str(&weekday_name[..SHORT_NAME_LEN]),
        Field::WeekdayNameMin => f.write_str(&weekday_name[..2]),
        Field::Weekday => write!(f, "{}", dt.weekday().num_days_from_sunday()),
        Field::Hour24Padded => write!(f, "{:02}", dt.hour()),
        Field::Hour24 => write!(f, "{}", dt.hour()),
        Field::Hour12Padded => write!(f, "{:02}", dt.hour12().1),
        Field::Hour12 => write!(f, "{}", dt.hour12().1),
        Field::MinutePadded => write!(f, "{:02}", dt.minute()),
        Field::Minute => write!(f, "{}", dt.minute()),
        Field::SecondPadded => write!(f, "{:02}", dt.second()),
        Field::Second => write!(f, "{}", dt.second()),
        Field::MeridiemUpper => f.write_str(if dt.hour12().0 { "PM" } else { "AM" }),
        Field::MeridiemLower => f.write_str(if dt.hour12().0 { "pm" } else { "am" }),
    }
}

const fn ordinal_suffix(day: u32) -> &'static str {
    match (day % 10, day % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn datetime(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .and_then(|date| date.and_hms_opt(h, min, s))
            .unwrap()
    }

    fn render(pattern: &str, dt: &NaiveDateTime) -> String {
        FormatPattern::parse(pattern).render(dt)
    }

    #[test]
    fn test_default_pattern() {
        let dt = datetime(2020, 2, 1, 0, 0, 0);
        assert_eq!(FormatPattern::default().render(&dt), "1 February 2020");
        assert_eq!(FormatPattern::default(), FormatPattern::parse("D MMMM YYYY"));
    }

    #[test]
    fn test_token_cases() {
        struct TestCase {
            pattern:  &'static str,
            expected: &'static str,
        }

        // Tuesday 4 February 2020, 15:07:09
        let dt = datetime(2020, 2, 4, 15, 7, 9);
        let cases = [
            TestCase {
                pattern:  "YYYY-MM-DD",
                expected: "2020-02-04",
            },
            TestCase {
                pattern:  "YY",
                expected: "20",
            },
            TestCase {
                pattern:  "MMMM MMM MM M",
                expected: "February Feb 02 2",
            },
            TestCase {
                pattern:  "Do DD D",
                expected: "4th 04 4",
            },
            TestCase {
                pattern:  "dddd ddd dd d",
                expected: "Tuesday Tue Tu 2",
            },
            TestCase {
                pattern:  "HH:mm:ss",
                expected: "15:07:09",
            },
            TestCase {
                pattern:  "H:m:s",
                expected: "15:7:9",
            },
            TestCase {
                pattern:  "hh:mm A",
                expected: "03:07 PM",
            },
            TestCase {
                pattern:  "h a",
                expected: "3 pm",
            },
            TestCase {
                pattern:  "dddd D MMMM YYYY",
                expected: "Tuesday 4 February 2020",
            },
        ];

        for case in &cases {
            assert_eq!(render(case.pattern, &dt), case.expected, "pattern {}", case.pattern);
        }
    }

    #[test]
    fn test_twelve_hour_clock_edges() {
        assert_eq!(render("h A", &datetime(2020, 1, 1, 0, 0, 0)), "12 AM");
        assert_eq!(render("h A", &datetime(2020, 1, 1, 12, 0, 0)), "12 PM");
        assert_eq!(render("h a", &datetime(2020, 1, 1, 23, 0, 0)), "11 pm");
    }

    #[test]
    fn test_ordinal_suffixes() {
        let expected = [
            (1, "1st"),
            (2, "2nd"),
            (3, "3rd"),
            (4, "4th"),
            (11, "11th"),
            (12, "12th"),
            (13, "13th"),
            (21, "21st"),
            (22, "22nd"),
            (23, "23rd"),
            (31, "31st"),
        ];
        for (day, text) in expected {
            assert_eq!(render("Do", &datetime(2020, 1, day, 0, 0, 0)), text);
        }
    }

    #[test]
    fn test_literals() {
        let dt = datetime(2020, 2, 1, 9, 30, 0);
        assert_eq!(render("[Today is] dddd", &dt), "Today is Saturday");
        assert_eq!(render("D/M/YYYY, HH:mm", &dt), "1/2/2020, 09:30");
        assert_eq!(render("[YYYY] YYYY", &dt), "YYYY 2020");
        assert_eq!(render("[xyz D", &dt), "[xyz 1");
        assert_eq!(render("", &dt), "");
    }

    #[test]
    fn test_non_ascii_literals() {
        let dt = datetime(2020, 2, 1, 0, 0, 0);
        assert_eq!(render("D · MMMM", &dt), "1 · February");
        assert_eq!(render("[é]YYYY", &dt), "é2020");
    }

    #[test]
    fn test_year_padding() {
        assert_eq!(render("YYYY", &datetime(5, 1, 1, 0, 0, 0)), "0005");
        assert_eq!(render("YY", &datetime(2005, 1, 1, 0, 0, 0)), "05");
        assert_eq!(render("YYYY", &datetime(-44, 3, 15, 0, 0, 0)), "-0044");
    }
}
