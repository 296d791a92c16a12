use std::{fmt, str::FromStr};

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Timelike};
use regex::Regex;

use crate::{
    DATE_SEPARATOR, MONTHS_IN_YEAR,
    config::default_time_separator,
    conversion,
    error::DateError,
    types::DateFields,
};

const NANOS_PER_MILLI: u32 = 1_000_000;

/// Accessor contract of a calendar date backed by a native Gregorian instant.
///
/// Months are zero-based. Every constructor carries out-of-range fields into
/// the next larger field the way a native date does.
pub trait CalendarDate: Sized {
    /// Wraps a native instant.
    ///
    /// # Errors
    /// Returns `DateError::OutOfRange` if the instant has no calendar equivalent.
    fn from_native(instant: NaiveDateTime) -> Result<Self, DateError>;

    /// Parses `"<year><sep><month><sep><day>[ <h><tsep><mi><tsep><s><tsep><ms>]"` with a one-based month.
    ///
    /// # Errors
    /// Returns a `DateError` describing the first malformed or invalid component.
    fn from_date_str(s: &str, date_separator: char, time_separator: &Regex) -> Result<Self, DateError>;

    /// Builds a date from fields, carrying overflow.
    ///
    /// # Errors
    /// Returns `DateError::OutOfRange` if the carried result is outside the supported span.
    fn from_fields(fields: DateFields) -> Result<Self, DateError>;

    fn year(&self) -> i64;
    fn month(&self) -> u32;
    fn day(&self) -> u32;
    fn hour(&self) -> u32;
    fn minute(&self) -> u32;
    fn second(&self) -> u32;
    fn millisecond(&self) -> u32;

    /// Replaces the time of day, carrying overflow into the date.
    ///
    /// # Errors
    /// Returns `DateError::OutOfRange` if the carried result is outside the supported span.
    fn set_time(&mut self, hour: u32, minute: u32, second: u32, millisecond: u32) -> Result<(), DateError>;

    /// The equivalent native instant
    fn native(&self) -> NaiveDateTime;
}

/// A Jalali (Solar Hijri) date and time of day.
///
/// Ordering follows the underlying instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct JalaliDate {
    native: NaiveDateTime,
    year:   i64,
    month:  u32,
    day:    u32,
}

impl JalaliDate {
    /// Midnight of the given day, `month` zero-based
    ///
    /// # Errors
    /// Returns `DateError::OutOfRange` if the date is outside the supported span.
    pub fn new(year: i64, month: i64, day: i64) -> Result<Self, DateError> {
        Self::from_fields(DateFields::new(year, month, day))
    }

    /// Real number of days in this date's month.
    ///
    /// # Errors
    /// Propagates range errors of the conversion; cannot fail for a constructed date.
    pub fn month_length(&self) -> Result<u32, DateError> {
        let length = conversion::month_length(self.year, i64::from(self.month) + 1)?;
        u32::try_from(length).map_err(|_| DateError::OutOfRange { year: self.year })
    }

    /// Whether this date's year is leap under the break-table rule.
    ///
    /// # Errors
    /// Propagates range errors of the conversion; cannot fail for a constructed date.
    pub fn is_leap(&self) -> Result<bool, DateError> {
        conversion::is_leap(self.year)
    }

    fn parse_number(s: &str) -> Result<i64, DateError> {
        s.trim()
            .parse::<i64>()
            .map_err(|_| DateError::InvalidFormat(s.to_owned()))
    }

    fn parse_time(s: &str, separator: &Regex) -> Result<(i64, i64, i64, i64), DateError> {
        let parts = separator
            .split(s)
            .map(Self::parse_number)
            .collect::<Result<Vec<_>, _>>()?;

        let (hour, minute, second, millisecond) = match parts[..] {
            [hour] => (hour, 0, 0, 0),
            [hour, minute] => (hour, minute, 0, 0),
            [hour, minute, second] => (hour, minute, second, 0),
            [hour, minute, second, millisecond] => (hour, minute, second, millisecond),
            _ => {
                return Err(DateError::InvalidFormat(format!(
                    "Too many time components: expected 1-4, found {}",
                    parts.len()
                )));
            },
        };

        if !(0..24).contains(&hour)
            || !(0..60).contains(&minute)
            || !(0..60).contains(&second)
            || !(0..1000).contains(&millisecond)
        {
            return Err(DateError::InvalidFormat(format!("Invalid time: {s}")));
        }
        Ok((hour, minute, second, millisecond))
    }

    fn offset_from_midnight(fields: &DateFields) -> Option<TimeDelta> {
        TimeDelta::try_days(fields.day.checked_sub(1)?)?
            .checked_add(&TimeDelta::try_hours(fields.hour)?)?
            .checked_add(&TimeDelta::try_minutes(fields.minute)?)?
            .checked_add(&TimeDelta::try_seconds(fields.second)?)?
            .checked_add(&TimeDelta::try_milliseconds(fields.millisecond)?)
    }
}

impl CalendarDate for JalaliDate {
    fn from_native(instant: NaiveDateTime) -> Result<Self, DateError> {
        let millis = instant.nanosecond() / NANOS_PER_MILLI;
        let native = instant.with_nanosecond(millis * NANOS_PER_MILLI).unwrap_or(instant);
        let (year, month, day) = conversion::from_gregorian(native.date())?;
        let out_of_range = || DateError::OutOfRange { year };

        Ok(Self {
            native,
            year,
            month: u32::try_from(month - 1).map_err(|_| out_of_range())?,
            day: u32::try_from(day).map_err(|_| out_of_range())?,
        })
    }

    fn from_date_str(s: &str, date_separator: char, time_separator: &Regex) -> Result<Self, DateError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(DateError::EmptyInput);
        }

        let (date_part, time_part) = match trimmed.split_once(|c: char| c == 'T' || c.is_whitespace()) {
            Some((date, time)) => (date, Some(time.trim())),
            None => (trimmed, None),
        };

        let parts: Vec<&str> = date_part.split(date_separator).collect();
        let [year, month, day] = parts[..] else {
            return Err(DateError::InvalidFormat(format!(
                "Expected year{date_separator}month{date_separator}day, found {} components: {trimmed}",
                parts.len()
            )));
        };

        let year = Self::parse_number(year)?;
        let month = Self::parse_number(month)?;
        let day = Self::parse_number(day)?;

        let max_day = conversion::month_length(year, month)?;
        if !(1..=max_day).contains(&day) {
            return Err(DateError::InvalidDay { year, month, day });
        }

        let (hour, minute, second, millisecond) = match time_part {
            Some(time) if !time.is_empty() => Self::parse_time(time, time_separator)?,
            _ => (0, 0, 0, 0),
        };

        Self::from_fields(DateFields::new(year, month - 1, day).with_time(hour, minute, second, millisecond))
    }

    #[tracing::instrument(level = "trace", err)]
    fn from_fields(fields: DateFields) -> Result<Self, DateError> {
        let out_of_range = || DateError::OutOfRange { year: fields.year };

        let total_months = fields
            .year
            .checked_mul(MONTHS_IN_YEAR)
            .and_then(|months| months.checked_add(fields.month))
            .ok_or_else(out_of_range)?;
        let year = total_months.div_euclid(MONTHS_IN_YEAR);
        let month = total_months.rem_euclid(MONTHS_IN_YEAR);

        let first_of_month = conversion::to_gregorian(year, month + 1, 1)?;
        let native = Self::offset_from_midnight(&fields)
            .and_then(|offset| first_of_month.and_time(NaiveTime::MIN).checked_add_signed(offset))
            .ok_or_else(out_of_range)?;

        if (year, month) != (fields.year, fields.month) {
            tracing::trace!(year, month, "carried month overflow");
        }
        Self::from_native(native)
    }

    fn year(&self) -> i64 {
        self.year
    }

    fn month(&self) -> u32 {
        self.month
    }

    fn day(&self) -> u32 {
        self.day
    }

    fn hour(&self) -> u32 {
        self.native.hour()
    }

    fn minute(&self) -> u32 {
        self.native.minute()
    }

    fn second(&self) -> u32 {
        self.native.second()
    }

    fn millisecond(&self) -> u32 {
        self.native.nanosecond() / NANOS_PER_MILLI
    }

    fn set_time(&mut self, hour: u32, minute: u32, second: u32, millisecond: u32) -> Result<(), DateError> {
        let fields = DateFields::new(self.year, i64::from(self.month), i64::from(self.day)).with_time(
            i64::from(hour),
            i64::from(minute),
            i64::from(second),
            i64::from(millisecond),
        );
        *self = Self::from_fields(fields)?;
        Ok(())
    }

    fn native(&self) -> NaiveDateTime {
        self.native
    }
}

impl TryFrom<NaiveDateTime> for JalaliDate {
    type Error = DateError;

    fn try_from(value: NaiveDateTime) -> Result<Self, Self::Error> {
        Self::from_native(value)
    }
}

impl TryFrom<NaiveDate> for JalaliDate {
    type Error = DateError;

    fn try_from(value: NaiveDate) -> Result<Self, Self::Error> {
        Self::from_native(value.and_time(NaiveTime::MIN))
    }
}

impl From<JalaliDate> for NaiveDateTime {
    fn from(date: JalaliDate) -> Self {
        date.native
    }
}

impl fmt::Display for JalaliDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02} {:02}:{:02}:{:02}.{:03}",
            self.year,
            self.month + 1,
            self.day,
            self.hour(),
            self.minute(),
            self.second(),
            self.millisecond()
        )
    }
}

impl FromStr for JalaliDate {
    type Err = DateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_date_str(s, DATE_SEPARATOR, default_time_separator())
    }
}

impl serde::Serialize for JalaliDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> serde::Deserialize<'de> for JalaliDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{gregorian, jdate};

    #[test]
    fn test_new_reads_back_fields() {
        let date = jdate(1403, 6, 28);
        assert_eq!(date.year(), 1403);
        assert_eq!(date.month(), 6);
        assert_eq!(date.day(), 28);
        assert_eq!((date.hour(), date.minute(), date.second(), date.millisecond()), (0, 0, 0, 0));
        assert_eq!(date.native(), gregorian(2024, 10, 19, 0, 0, 0, 0));
    }

    #[test]
    fn test_from_native_keeps_time() {
        let date = JalaliDate::from_native(gregorian(2024, 3, 20, 13, 45, 7, 250)).expect("instant in range");
        assert_eq!((date.year(), date.month(), date.day()), (1403, 0, 1));
        assert_eq!((date.hour(), date.minute(), date.second(), date.millisecond()), (13, 45, 7, 250));
    }

    #[test]
    fn test_from_native_truncates_to_milliseconds() {
        let instant = gregorian(2024, 3, 20, 0, 0, 0, 0)
            .with_nanosecond(123_456_789)
            .expect("valid nanosecond");
        let date = JalaliDate::from_native(instant).expect("instant in range");
        assert_eq!(date.millisecond(), 123);
        assert_eq!(date.native().nanosecond(), 123_000_000);
    }

    #[test]
    fn test_from_fields_carries_overflow() {
        struct TestCase {
            fields:      DateFields,
            expected:    (i64, u32, u32),
            description: &'static str,
        }

        let cases = [
            TestCase {
                fields:      DateFields::new(1403, 0, 32),
                expected:    (1403, 1, 1),
                description: "day past a 31-day month",
            },
            TestCase {
                fields:      DateFields::new(1403, 12, 1),
                expected:    (1404, 0, 1),
                description: "month past Esfand",
            },
            TestCase {
                fields:      DateFields::new(1403, -1, 1),
                expected:    (1402, 11, 1),
                description: "negative month",
            },
            TestCase {
                fields:      DateFields::new(1403, 0, 0),
                expected:    (1402, 11, 29),
                description: "day zero of Farvardin after a common year",
            },
            TestCase {
                fields:      DateFields::new(1403, 11, 1).with_time(24 * 30, 0, 0, 0),
                expected:    (1404, 0, 1),
                description: "hours past a leap Esfand",
            },
        ];

        for case in &cases {
            let date = JalaliDate::from_fields(case.fields).expect("carried fields in range");
            assert_eq!(
                (date.year(), date.month(), date.day()),
                case.expected,
                "{}",
                case.description
            );
        }
    }

    #[test]
    fn test_from_fields_out_of_range() {
        let result = JalaliDate::new(conversion::MAX_YEAR + 1, 0, 1);
        assert!(matches!(result, Err(DateError::OutOfRange { .. })));

        let result = JalaliDate::new(i64::MAX, 0, 1);
        assert!(matches!(result, Err(DateError::OutOfRange { .. })));

        let first = JalaliDate::new(conversion::MIN_YEAR, 0, 1).expect("first supported day");
        assert_eq!((first.year(), first.month(), first.day()), (conversion::MIN_YEAR, 0, 1));
        let last = JalaliDate::new(conversion::MAX_YEAR, 11, 29).expect("last supported day");
        assert_eq!((last.year(), last.month(), last.day()), (conversion::MAX_YEAR, 11, 29));
        assert!(JalaliDate::new(conversion::MAX_YEAR, 11, 30).is_err());

        let result = JalaliDate::new(1403, 0, i64::MIN);
        assert_eq!(result, Err(DateError::OutOfRange { year: 1403 }));
    }

    #[test]
    fn test_set_time() {
        let mut date = jdate(1403, 0, 1);
        date.set_time(10, 20, 30, 40).expect("time in range");
        assert_eq!((date.hour(), date.minute(), date.second(), date.millisecond()), (10, 20, 30, 40));

        date.set_time(0, 0, 0, 0).expect("midnight in range");
        assert_eq!(date, jdate(1403, 0, 1));
    }

    #[test]
    fn test_from_date_str() {
        let sep = default_time_separator();
        let date = JalaliDate::from_date_str("1403-07-28", '-', sep).expect("valid date string");
        assert_eq!((date.year(), date.month(), date.day()), (1403, 6, 28));

        let date = JalaliDate::from_date_str("1403/07/28 10:20:30.400", '/', sep).expect("valid date-time string");
        assert_eq!((date.hour(), date.minute(), date.second(), date.millisecond()), (10, 20, 30, 400));

        let date = JalaliDate::from_date_str("1403-01-01T08:15", '-', sep).expect("valid ISO-like string");
        assert_eq!((date.hour(), date.minute()), (8, 15));
    }

    #[test]
    fn test_from_date_str_errors() {
        struct TestCase {
            input:    &'static str,
            expected: DateError,
        }

        let cases = [
            TestCase {
                input:    "   ",
                expected: DateError::EmptyInput,
            },
            TestCase {
                input:    "1403-07",
                expected: DateError::InvalidFormat("Expected year-month-day, found 2 components: 1403-07".into()),
            },
            TestCase {
                input:    "1403-xx-01",
                expected: DateError::InvalidFormat("xx".into()),
            },
            TestCase {
                input:    "1403-13-01",
                expected: DateError::InvalidMonth(13),
            },
            TestCase {
                input:    "1403-07-31",
                expected: DateError::InvalidDay {
                    year:  1403,
                    month: 7,
                    day:   31,
                },
            },
            TestCase {
                input:    "1402-12-30",
                expected: DateError::InvalidDay {
                    year:  1402,
                    month: 12,
                    day:   30,
                },
            },
            TestCase {
                input:    "1403-01-01 25:00",
                expected: DateError::InvalidFormat("Invalid time: 25:00".into()),
            },
        ];

        for case in &cases {
            assert_eq!(
                case.input.parse::<JalaliDate>(),
                Err(case.expected.clone()),
                "unexpected result for {:?}",
                case.input
            );
        }
    }

    #[test]
    fn test_display_and_from_str() {
        let date = JalaliDate::from_fields(DateFields::new(1403, 6, 28).with_time(9, 5, 3, 7)).expect("fields in range");
        assert_eq!(date.to_string(), "1403-07-28 09:05:03.007");
        assert_eq!(date.to_string().parse::<JalaliDate>(), Ok(date));
    }

    #[test]
    fn test_ordering_follows_instant() {
        assert!(jdate(1402, 11, 29) < jdate(1403, 0, 1));
        assert!(jdate(1403, 6, 1) > jdate(1403, 5, 31));
    }

    #[test]
    fn test_real_calendar() {
        assert_eq!(jdate(1403, 11, 1).month_length(), Ok(30));
        assert_eq!(jdate(1402, 11, 1).month_length(), Ok(29));
        assert_eq!(jdate(1403, 6, 1).month_length(), Ok(30));
        assert_eq!(jdate(1403, 0, 1).is_leap(), Ok(true));
    }

    #[test]
    fn test_native_conversions() {
        let instant = gregorian(2024, 10, 19, 0, 0, 0, 0);
        let date = JalaliDate::try_from(instant).expect("instant in range");
        assert_eq!(NaiveDateTime::from(date), instant);
        assert_eq!(JalaliDate::try_from(instant.date()), Ok(date));
    }

    #[test]
    fn test_serde_string_format() {
        let date = jdate(1403, 6, 28);
        let json = serde_json::to_string(&date).expect("failed to serialize date");
        assert_eq!(json, r#""1403-07-28 00:00:00.000""#);

        let parsed: JalaliDate = serde_json::from_str(&json).expect("failed to deserialize date");
        assert_eq!(date, parsed);
    }
}
