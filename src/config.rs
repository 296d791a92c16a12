//! Configurable defaults and the [`DateUtils`] facade bound to them.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::{
    DATE_SEPARATOR, DEFAULT_FORMAT, DEFAULT_LANG, TIME_SEPARATOR,
    date::CalendarDate,
    error::DateError,
    types::{DateFields, Scale},
    utils::{self, DateInput},
};

/// The compiled default time separator pattern.
#[allow(clippy::expect_used)] // constant pattern, compiles or the tests fail
pub fn default_time_separator() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(TIME_SEPARATOR).expect("default time separator must compile"))
}

/// Defaults applied by [`DateUtils`] when an argument is omitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Separator between year, month and day when parsing strings
    pub date_separator: char,
    /// Pattern separating time components when parsing strings
    pub time_separator: String,
    /// Format string used by [`DateUtils::format`]
    pub format:         String,
    /// Locale tag for month names
    pub lang:           String,
    /// Scale used by [`DateUtils::diff`]
    pub diff_scale:     Scale,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            date_separator: DATE_SEPARATOR,
            time_separator: TIME_SEPARATOR.to_owned(),
            format:         DEFAULT_FORMAT.to_owned(),
            lang:           DEFAULT_LANG.to_owned(),
            diff_scale:     Scale::Day,
        }
    }
}

/// The utility operations with defaults taken from a validated [`Config`].
#[derive(Debug, Clone)]
pub struct DateUtils {
    config:         Config,
    time_separator: Regex,
}

impl DateUtils {
    /// Validates `config` and binds it.
    ///
    /// # Errors
    /// Returns `DateError::InvalidSeparator` if the time separator is not a valid pattern.
    pub fn new(config: Config) -> Result<Self, DateError> {
        let time_separator = Regex::new(&config.time_separator)?;
        tracing::debug!(?config, "date utils configured");
        Ok(Self { config, time_separator })
    }

    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// # Errors
    /// See [`utils::parse`].
    pub fn parse<D: CalendarDate>(&self, input: impl Into<DateInput>) -> Result<D, DateError> {
        utils::parse(input, self.config.date_separator, &self.time_separator)
    }

    pub fn to_string<D: CalendarDate>(&self, date: &D, with_time: bool) -> String {
        utils::to_string(date, with_time)
    }

    /// Formats with the configured format string and locale.
    pub fn format<D: CalendarDate>(&self, date: &D) -> String {
        utils::format(date, &self.config.format, &self.config.lang)
    }

    pub fn format_as<D: CalendarDate>(&self, date: &D, format_string: &str) -> String {
        utils::format(date, format_string, &self.config.lang)
    }

    /// Difference in the configured scale.
    pub fn diff<D: CalendarDate>(&self, date_a: &D, date_b: &D) -> i64 {
        utils::diff(date_a, date_b, self.config.diff_scale)
    }

    pub fn diff_in<D: CalendarDate>(&self, date_a: &D, date_b: &D, scale: Scale) -> i64 {
        utils::diff(date_a, date_b, scale)
    }

    /// # Errors
    /// See [`utils::today`].
    pub fn today<D: CalendarDate>(&self) -> Result<D, DateError> {
        utils::today()
    }

    /// # Errors
    /// See [`utils::now`].
    pub fn now<D: CalendarDate>(&self) -> Result<D, DateError> {
        utils::now()
    }

    /// # Errors
    /// See [`utils::add`].
    pub fn add<D: CalendarDate>(&self, date: &D, qty: i64, scale: Scale) -> Result<D, DateError> {
        utils::add(date, qty, scale)
    }

    /// # Errors
    /// See [`utils::start_of`].
    pub fn start_of<D: CalendarDate>(&self, date: &D, scale: Scale) -> Result<D, DateError> {
        utils::start_of(date, scale)
    }

    /// # Errors
    /// See [`utils::clone`].
    pub fn clone_date<D: CalendarDate>(&self, date: &D) -> Result<D, DateError> {
        utils::clone(date)
    }

    pub fn get_date_values<D: CalendarDate>(&self, date: &D) -> DateFields {
        utils::get_date_values(date)
    }

    pub fn get_days_in_month<D: CalendarDate>(&self, date: &D) -> u32 {
        utils::get_days_in_month(date)
    }

    pub fn is_leap_year(&self, year: i64) -> bool {
        utils::is_leap_year(year)
    }
}

impl Default for DateUtils {
    fn default() -> Self {
        Self {
            config:         Config::default(),
            time_separator: default_time_separator().clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{JalaliDate, test_utils::jdate};

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.date_separator, '-');
        assert_eq!(config.time_separator, "[.:]");
        assert_eq!(config.format, "YYYY-MM-DD HH:mm:ss.SSS");
        assert_eq!(config.lang, "en");
        assert_eq!(config.diff_scale, Scale::Day);
    }

    #[test]
    fn test_default_time_separator() {
        let re = default_time_separator();
        assert!(std::ptr::eq(re, default_time_separator()));
        assert_eq!(re.split("10:20:30.400").collect::<Vec<_>>(), ["10", "20", "30", "400"]);
    }

    #[test]
    fn test_config_deserialize_partial() {
        let config: Config =
            serde_json::from_str(r#"{"date_separator": "/", "diff_scale": "hours"}"#).expect("partial config is valid");
        assert_eq!(config.date_separator, '/');
        assert_eq!(config.diff_scale, Scale::Hour);
        assert_eq!(config.format, DEFAULT_FORMAT);
    }

    #[test]
    fn test_config_rejects_unknown_scale() {
        let result: Result<Config, _> = serde_json::from_str(r#"{"diff_scale": "weeks"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_time_separator() {
        let config = Config {
            time_separator: "[".to_owned(),
            ..Config::default()
        };
        assert!(matches!(DateUtils::new(config), Err(DateError::InvalidSeparator(_))));
    }

    #[test]
    fn test_configured_parse_and_format() {
        let utils = DateUtils::new(Config {
            date_separator: '/',
            time_separator: "h".to_owned(),
            format: "DD/MM/YYYY".to_owned(),
            ..Config::default()
        })
        .expect("valid config");

        let date: JalaliDate = utils.parse("1403/07/28 10h30").expect("valid configured input");
        assert_eq!(utils.get_date_values(&date), DateFields::new(1403, 6, 28));
        assert_eq!(utils.format(&date), "28/07/1403");
    }

    #[test]
    fn test_configured_diff_scale() {
        let utils = DateUtils::new(Config {
            diff_scale: Scale::Hour,
            ..Config::default()
        })
        .expect("valid config");

        assert_eq!(utils.diff(&jdate(1403, 0, 2), &jdate(1403, 0, 1)), 24);
        assert_eq!(utils.diff_in(&jdate(1403, 0, 2), &jdate(1403, 0, 1), Scale::Day), 1);
    }

    #[test]
    fn test_default_utils() {
        let utils = DateUtils::default();
        let date = jdate(1403, 11, 1);
        assert_eq!(utils.get_days_in_month(&date), 30);
        assert!(utils.is_leap_year(1403));
        assert_eq!(utils.to_string(&date, false), "1403-12-01");
        assert_eq!(utils.format_as(&date, "YYYY"), "1403");
    }
}
