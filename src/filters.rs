//! Tera filters for GOV.UK dates.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;

use chrono::Utc;
use serde::Deserialize;
use tera::{Tera, Value};

use crate::consts::{
    ARRAY_TO_DATE_OBJECT, ARRAY_TO_GOVUK_DATE, DATE_TO_GOVUK_DATE, DEFAULT_PATTERN, FORMAT_ARG,
    GOVUK_DATE, TODAY,
};
use crate::{
    CalendarDate, DateInput, DateTriple, array_to_date_object, array_to_govuk_date,
    date_to_govuk_date, format_filter,
};

/// Settings shared by every registered filter.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Pattern applied when a template passes no `format` argument
    pub default_pattern: String,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            default_pattern: DEFAULT_PATTERN.to_owned(),
        }
    }
}

/// One of the date filters, by the name templates call it with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DateFilter {
    /// Triple or date value to a GOV.UK date
    GovukDate,
    /// Triple to a GOV.UK date
    ArrayToGovukDate,
    /// Date value to a GOV.UK date
    DateToGovukDate,
    /// Triple to an ISO-8601 date-time, `null` if the value is not a triple
    ArrayToDateObject,
    /// Current date-time; the piped value is ignored
    Today,
}

impl DateFilter {
    pub const ALL: [Self; 5] = [
        Self::GovukDate,
        Self::ArrayToGovukDate,
        Self::DateToGovukDate,
        Self::ArrayToDateObject,
        Self::Today,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Self::GovukDate => GOVUK_DATE,
            Self::ArrayToGovukDate => ARRAY_TO_GOVUK_DATE,
            Self::DateToGovukDate => DATE_TO_GOVUK_DATE,
            Self::ArrayToDateObject => ARRAY_TO_DATE_OBJECT,
            Self::Today => TODAY,
        }
    }

    /// Applies the filter to a template value. Never fails: unreadable input
    /// gives an empty string (or `null` for `arrayToDateObject`).
    pub fn apply(self, value: &Value, args: &HashMap<String, Value>, config: &FilterConfig) -> Value {
        let format = args
            .get(FORMAT_ARG)
            .and_then(Value::as_str)
            .filter(|format| !format.is_empty())
            .unwrap_or(&config.default_pattern);

        match self {
            Self::GovukDate => Value::String(match DateInput::try_from(value) {
                Ok(input) => format_filter(input, Some(format)),
                Err(err) => self.blank(value, &err),
            }),
            Self::ArrayToGovukDate => Value::String(match DateTriple::try_from(value) {
                Ok(triple) => array_to_govuk_date(triple, Some(format)),
                Err(err) => self.blank(value, &err),
            }),
            Self::DateToGovukDate => Value::String(match DateInput::try_from(value) {
                Ok(input) => date_to_govuk_date(input, Some(format)),
                Err(err) => self.blank(value, &err),
            }),
            Self::ArrayToDateObject => match DateTriple::try_from(value) {
                Ok(triple) => array_to_date_object(triple).map_or(Value::Null, Value::from),
                Err(err) => {
                    log::debug!("{self}: no date object for {value}: {err}");
                    Value::Null
                },
            },
            Self::Today => Value::from(CalendarDate::from(Utc::now().naive_utc())),
        }
    }

    fn blank(self, value: &Value, err: &dyn std::error::Error) -> String {
        log::debug!("{self}: rendering blank date for {value}: {err}");
        String::new()
    }
}

impl fmt::Display for DateFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The filter registry: an explicit name-to-filter mapping that the caller
/// installs into its own [`Tera`] instance.
#[derive(Debug, Clone)]
pub struct DateFilters {
    config:  Arc<FilterConfig>,
    filters: BTreeMap<&'static str, DateFilter>,
}

impl DateFilters {
    pub fn new(config: FilterConfig) -> Self {
        let filters = DateFilter::ALL.into_iter().map(|filter| (filter.name(), filter)).collect();
        Self {
            config: Arc::new(config),
            filters,
        }
    }

    pub fn config(&self) -> &FilterConfig {
        &self.config
    }

    /// Filter names in sorted order
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.filters.keys().copied()
    }

    pub fn get(&self, name: &str) -> Option<DateFilter> {
        self.filters.get(name).copied()
    }

    /// Runs the filter called `name`, or returns `None` if there is no such filter.
    pub fn call(&self, name: &str, value: &Value, args: &HashMap<String, Value>) -> Option<Value> {
        self.get(name).map(|filter| filter.apply(value, args, &self.config))
    }

    /// Registers every filter with `tera`, replacing filters of the same name.
    pub fn register(&self, tera: &mut Tera) {
        for (&name, &filter) in &self.filters {
            let config = Arc::clone(&self.config);
            tera.register_filter(
                name,
                move |value: &Value, args: &HashMap<String, Value>| -> tera::Result<Value> {
                    Ok(filter.apply(value, args, &config))
                },
            );
            log::trace!("Registered date filter {name}");
        }
    }
}

impl Default for DateFilters {
    fn default() -> Self {
        Self::new(FilterConfig::default())
    }
}

/// Registers the date filters with `tera` using the default configuration.
pub fn register(tera: &mut Tera) {
    DateFilters::default().register(tera);
}
