//! Fixed calendar rules: month lengths and the 33-year leap cycle.
//!
//! These tables are what the utility layer reports. They are an
//! approximation and do not always agree with the break-table conversion
//! in [`crate::JalaliDate`].

use crate::consts::{DAYS_IN_MONTH, ESFAND, ESFAND_DAYS, ESFAND_DAYS_LEAP, LEAP_CYCLE, LEAP_RESIDUES};

/// Leap iff `year % 33` is one of the eight leap residues.
///
/// The remainder truncates toward zero, so negative years never match.
pub fn is_leap_year(year: i64) -> bool {
    LEAP_RESIDUES.contains(&(year % LEAP_CYCLE))
}

/// Number of days in the zero-based `month` of `year`.
///
/// Months before Esfand come from the fixed table; Esfand has 30 days in a
/// leap year and 29 otherwise.
pub fn days_in_month(year: i64, month: u32) -> u32 {
    debug_assert!(month <= ESFAND);

    if month < ESFAND {
        DAYS_IN_MONTH[month as usize]
    } else if is_leap_year(year) {
        ESFAND_DAYS_LEAP
    } else {
        ESFAND_DAYS
    }
}
