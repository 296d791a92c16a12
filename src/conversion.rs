//! Jalali <-> Gregorian day conversion.
//!
//! Uses the break-year table of the 2820-year grand cycle: between two
//! break years leap years follow the 33-year sub-cycle, and each Jalali
//! year is anchored to the Gregorian March day its Farvardin 1 falls on.

use chrono::{Datelike, Days, NaiveDate, TimeDelta};

use crate::error::DateError;

/// Years where the leap sub-cycle restarts. The last entry is exclusive.
const BREAKS: [i64; 20] = [
    -61, 9, 38, 199, 426, 686, 756, 818, 1111, 1181, 1210, 1635, 2060, 2097, 2192, 2262, 2324, 2394, 2456, 3178,
];

/// Offset between a Jalali year and the Gregorian year its Nowruz falls in
const GREGORIAN_OFFSET: i64 = 621;

/// Days in Farvardin..Shahrivar, the six 31-day months
const FIRST_HALF_DAYS: i64 = 186;
/// Days from Farvardin 1 back to Mehr 1 of the previous (common) year
const DAYS_FROM_MEHR_TO_NOWRUZ: i64 = 179;

/// First supported Jalali year
pub const MIN_YEAR: i64 = BREAKS[0];
/// Last supported Jalali year (inclusive)
pub const MAX_YEAR: i64 = BREAKS[BREAKS.len() - 1] - 1;

struct YearInfo {
    /// Years since the last leap year; 0 means this year is leap.
    leap:           i64,
    gregorian_year: i64,
    /// Day of Gregorian March on which Farvardin 1 falls
    march:          i64,
}

fn year_info(year: i64) -> Result<YearInfo, DateError> {
    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return Err(DateError::OutOfRange { year });
    }

    let gregorian_year = year + GREGORIAN_OFFSET;
    let mut leap_count = -14;
    let mut previous = BREAKS[0];
    let mut jump = 0;

    for &next in &BREAKS[1..] {
        jump = next - previous;
        if year < next {
            break;
        }
        leap_count += jump / 33 * 8 + (jump % 33) / 4;
        previous = next;
    }

    let mut n = year - previous;
    leap_count += n / 33 * 8 + (n % 33 + 3) / 4;
    if jump % 33 == 4 && jump - n == 4 {
        leap_count += 1;
    }

    let gregorian_leaps = gregorian_year / 4 - (gregorian_year / 100 + 1) * 3 / 4 - 150;
    let march = 20 + leap_count - gregorian_leaps;

    if jump - n < 6 {
        n = n - jump + (jump + 4) / 33 * 33;
    }
    let mut leap = ((n + 1) % 33 - 1) % 4;
    if leap == -1 {
        leap = 4;
    }

    Ok(YearInfo {
        leap,
        gregorian_year,
        march,
    })
}

fn nowruz(info: &YearInfo) -> Result<NaiveDate, DateError> {
    i32::try_from(info.gregorian_year)
        .ok()
        .zip(u32::try_from(info.march).ok())
        .and_then(|(year, day)| NaiveDate::from_ymd_opt(year, 3, day))
        .ok_or(DateError::OutOfRange {
            year: info.gregorian_year - GREGORIAN_OFFSET,
        })
}

/// Farvardin 1 of `year`. The year after [`MAX_YEAR`] is reached through
/// the length of `MAX_YEAR`, so its last days still resolve.
fn nowruz_of(year: i64) -> Result<NaiveDate, DateError> {
    if year != MAX_YEAR + 1 {
        return nowruz(&year_info(year)?);
    }
    let last = year_info(MAX_YEAR)?;
    let length = if last.leap == 0 { 366 } else { 365 };
    nowruz(&last)?
        .checked_add_days(Days::new(length))
        .ok_or(DateError::OutOfRange { year })
}

/// Whether `year` is leap under the break-table rule.
pub fn is_leap(year: i64) -> Result<bool, DateError> {
    Ok(year_info(year)?.leap == 0)
}

/// Real length of the one-based `month` of `year`.
pub fn month_length(year: i64, month: i64) -> Result<i64, DateError> {
    match month {
        1..=6 => Ok(31),
        7..=11 => Ok(30),
        12 if is_leap(year)? => Ok(30),
        12 => Ok(29),
        _ => Err(DateError::InvalidMonth(month)),
    }
}

/// Gregorian date of the Jalali `year`/`month`/`day` (month one-based).
///
/// `day` is not range checked; it is added as an offset from the first of
/// the month.
pub fn to_gregorian(year: i64, month: i64, day: i64) -> Result<NaiveDate, DateError> {
    let info = year_info(year)?;
    let offset = (month - 1) * 31 - month / 7 * (month - 7) + day - 1;
    TimeDelta::try_days(offset)
        .and_then(|delta| nowruz(&info).ok()?.checked_add_signed(delta))
        .ok_or(DateError::OutOfRange { year })
}

/// Jalali `(year, month, day)` of a Gregorian date, month one-based.
pub fn from_gregorian(date: NaiveDate) -> Result<(i64, i64, i64), DateError> {
    let gregorian_year = i64::from(date.year());
    let mut year = gregorian_year - GREGORIAN_OFFSET;
    let mut k = date.signed_duration_since(nowruz_of(year)?).num_days();

    if k >= 0 {
        if year > MAX_YEAR {
            return Err(DateError::OutOfRange { year });
        }
        if k < FIRST_HALF_DAYS {
            return Ok((year, 1 + k / 31, k % 31 + 1));
        }
        k -= FIRST_HALF_DAYS;
    } else {
        year -= 1;
        if year < MIN_YEAR {
            return Err(DateError::OutOfRange { year });
        }
        k += DAYS_FROM_MEHR_TO_NOWRUZ;
        if is_leap(year)? {
            k += 1;
        }
    }

    Ok((year, 7 + k / 30, k % 30 + 1))
}
