//! The date utility operations.
//!
//! Every operation reads a date through [`get_date_values`] and builds new
//! dates through [`CalendarDate::from_fields`], so the field order is the same
//! everywhere.

use chrono::{Local, NaiveDateTime};
use regex::Regex;

use crate::{
    DATE_SEPARATOR, MILLISECOND_PAD_WIDTH, PAD_FILL, PAD_WIDTH,
    consts::{DAYS_PER_MONTH, HOURS_PER_DAY, MILLIS_PER_SECOND, MINUTES_PER_HOUR, MONTHS_PER_YEAR, SECONDS_PER_MINUTE},
    date::CalendarDate,
    error::DateError,
    formatter::pad_start,
    rules,
    types::{DateFields, Scale},
};

pub use crate::formatter::{format, format_with};
pub use crate::rules::is_leap_year;

/// Input accepted by [`parse`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateInput {
    /// A native instant, wrapped as is
    Native(NaiveDateTime),
    /// A date string, normalized to midnight
    Text(String),
}

impl From<NaiveDateTime> for DateInput {
    fn from(value: NaiveDateTime) -> Self {
        Self::Native(value)
    }
}

impl From<&str> for DateInput {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for DateInput {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Reads the seven fields of `date` in canonical order.
pub fn get_date_values<D: CalendarDate>(date: &D) -> DateFields {
    DateFields::new(date.year(), i64::from(date.month()), i64::from(date.day())).with_time(
        i64::from(date.hour()),
        i64::from(date.minute()),
        i64::from(date.second()),
        i64::from(date.millisecond()),
    )
}

fn at_midnight<D: CalendarDate>(mut date: D) -> Result<D, DateError> {
    date.set_time(0, 0, 0, 0)?;
    Ok(date)
}

/// Builds a date from a native instant or a string.
///
/// Native instants keep their time of day. Strings are parsed with the given
/// separators and the result is moved to midnight.
///
/// # Errors
/// Returns the collaborator's `DateError` if the input cannot be converted.
pub fn parse<D: CalendarDate>(
    input: impl Into<DateInput>,
    date_separator: char,
    time_separator: &Regex,
) -> Result<D, DateError> {
    match input.into() {
        DateInput::Native(instant) => D::from_native(instant),
        DateInput::Text(text) => at_midnight(D::from_date_str(&text, date_separator, time_separator)?),
    }
}

/// `year-MM-DD`, plus ` HH:mm:ss.SSS` when `with_time` is set.
pub fn to_string<D: CalendarDate>(date: &D, with_time: bool) -> String {
    let fields = get_date_values(date);
    let pad = |value: i64| pad_start(value, PAD_WIDTH, PAD_FILL);

    let date_string = format!(
        "{}{DATE_SEPARATOR}{}{DATE_SEPARATOR}{}",
        pad(fields.year),
        pad(fields.month + 1),
        pad(fields.day)
    );
    if !with_time {
        return date_string;
    }
    format!(
        "{date_string} {}:{}:{}.{}",
        pad(fields.hour),
        pad(fields.minute),
        pad(fields.second),
        pad_start(fields.millisecond, MILLISECOND_PAD_WIDTH, PAD_FILL)
    )
}

/// The current instant.
///
/// # Errors
/// Returns `DateError::OutOfRange` if the clock is outside the supported span.
pub fn now<D: CalendarDate>() -> Result<D, DateError> {
    D::from_native(Local::now().naive_local())
}

/// Midnight of the current day.
///
/// # Errors
/// Returns `DateError::OutOfRange` if the clock is outside the supported span.
pub fn today<D: CalendarDate>() -> Result<D, DateError> {
    let fields = get_date_values(&now::<D>()?).date_only();
    at_midnight(D::from_fields(fields)?)
}

/// Rebuilds `date` from its fields. The copy is always at midnight.
///
/// # Errors
/// Propagates construction errors; cannot fail for a valid input date.
pub fn clone<D: CalendarDate>(date: &D) -> Result<D, DateError> {
    at_midnight(D::from_fields(get_date_values(date))?)
}

/// Shifts the field matching `scale` by `qty`; overflow carries into larger fields.
///
/// # Errors
/// Returns `DateError::OutOfRange` if the shifted field overflows or the
/// result is outside the supported span.
pub fn add<D: CalendarDate>(date: &D, qty: i64, scale: Scale) -> Result<D, DateError> {
    let fields = get_date_values(date);
    let shifted = fields
        .offset(scale, qty)
        .ok_or(DateError::OutOfRange { year: fields.year })?;
    D::from_fields(shifted)
}

/// Signed difference `date_a - date_b` in whole units of `scale`, floored.
///
/// Months count as 30 days and years as 12 such months.
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
pub fn diff<D: CalendarDate>(date_a: &D, date_b: &D, scale: Scale) -> i64 {
    let milliseconds = date_a
        .native()
        .signed_duration_since(date_b.native())
        .num_milliseconds() as f64;
    let seconds = milliseconds / MILLIS_PER_SECOND;
    let minutes = seconds / SECONDS_PER_MINUTE;
    let hours = minutes / MINUTES_PER_HOUR;
    let days = hours / HOURS_PER_DAY;
    let months = days / DAYS_PER_MONTH;
    let years = months / MONTHS_PER_YEAR;

    let value = match scale {
        Scale::Millisecond => milliseconds,
        Scale::Second => seconds,
        Scale::Minute => minutes,
        Scale::Hour => hours,
        Scale::Day => days,
        Scale::Month => months,
        Scale::Year => years,
    };
    value.floor() as i64
}

/// [`diff`] with the scale given by its singular or plural name.
///
/// # Errors
/// Returns `DateError::UnknownScale` if `scale` names no unit.
pub fn diff_by_name<D: CalendarDate>(date_a: &D, date_b: &D, scale: &str) -> Result<i64, DateError> {
    Ok(diff(date_a, date_b, Scale::from_name(scale)?))
}

const fn identity(field: Scale) -> i64 {
    match field {
        Scale::Day => 1,
        _ => 0,
    }
}

/// Truncates `date` to the start of `scale`.
///
/// A field is reset when the next coarser unit ranks at or below `scale`;
/// the year is never reset. The result is always at midnight, also for
/// scales finer than a day.
///
/// # Errors
/// Propagates construction errors; cannot fail for a valid input date.
pub fn start_of<D: CalendarDate>(date: &D, scale: Scale) -> Result<D, DateError> {
    let mut fields = get_date_values(date);
    for field in Scale::ALL {
        if field.parent().is_some_and(|parent| parent.rank() <= scale.rank()) {
            *fields.field_mut(field) = identity(field);
        }
    }
    at_midnight(D::from_fields(fields)?)
}

/// Length of `date`'s month under the fixed month table.
pub fn get_days_in_month<D: CalendarDate>(date: &D) -> u32 {
    rules::days_in_month(date.year(), date.month())
}
