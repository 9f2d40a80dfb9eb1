/// Pattern applied when no format is given: day without leading zero,
/// full month name, four-digit year.
pub const DEFAULT_PATTERN: &str = "D MMMM YYYY";

/// Maximum valid year for strict triple conversion (inclusive)
pub const MAX_YEAR: u16 = 9999;

/// Maximum valid month (December)
pub const MAX_MONTH: u8 = 12;

/// Months in a calendar year, used to carry month overflow into the year
pub(crate) const MONTHS_PER_YEAR: i64 = 12;

/// Number of components in a date triple: day, month, year
pub const TRIPLE_LEN: usize = 3;

/// English month names (index 0 is unused, months are 1-indexed)
pub const MONTH_NAMES: [&str; 13] = [
    "", // index 0 unused (months are 1-indexed)
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// English weekday names, Sunday first
pub const WEEKDAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// Length of abbreviated month and weekday names (`Feb`, `Tue`)
pub(crate) const SHORT_NAME_LEN: usize = 3;

/// Opens a literal run inside a format pattern
pub const LITERAL_OPEN: char = '[';
/// Closes a literal run inside a format pattern
pub const LITERAL_CLOSE: char = ']';

/// Keyword argument carrying the format pattern in templates
pub const FORMAT_ARG: &str = "format";

/// Filter: any date value or triple to a GOV.UK date string
pub const GOVUK_DATE: &str = "govukDate";
/// Filter: triple to a GOV.UK date string
pub const ARRAY_TO_GOVUK_DATE: &str = "arrayToGovukDate";
/// Filter: date value to a GOV.UK date string
pub const DATE_TO_GOVUK_DATE: &str = "dateToGovukDate";
/// Filter: triple to an ISO-8601 date-time string
pub const ARRAY_TO_DATE_OBJECT: &str = "arrayToDateObject";
/// Filter: the current local date-time
pub const TODAY: &str = "today";

/// Layout used when a calendar date is handed back to a template as a value
pub(crate) const ISO_LAYOUT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";
