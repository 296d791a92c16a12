/// Number of months in a Jalali year
pub const MONTHS_IN_YEAR: i64 = 12;

/// Zero-based index of Esfand, the last month
pub const ESFAND: u32 = 11;

/// Fixed month lengths for months 0..=10. Esfand is resolved by the leap rule.
pub const DAYS_IN_MONTH: [u32; 11] = [31; 11];

/// Esfand length in a leap year
pub const ESFAND_DAYS_LEAP: u32 = 30;
/// Esfand length in a common year
pub const ESFAND_DAYS: u32 = 29;

/// Length of the leap cycle used by [`crate::is_leap_year`]
pub const LEAP_CYCLE: i64 = 33;

/// Residues of `year % LEAP_CYCLE` that mark a leap year
pub const LEAP_RESIDUES: [i64; 8] = [1, 5, 9, 13, 17, 22, 26, 30];

/// Default date component separator
pub const DATE_SEPARATOR: char = '-';
/// Default time component separator pattern
pub const TIME_SEPARATOR: &str = "[.:]";

/// Default format string for [`crate::format`]
pub const DEFAULT_FORMAT: &str = "YYYY-MM-DD HH:mm:ss.SSS";
/// Default locale tag for month names
pub const DEFAULT_LANG: &str = "en";

/// Width every numeric token is padded to
pub const PAD_WIDTH: usize = 2;
/// Width of the millisecond field in [`crate::to_string`]
pub const MILLISECOND_PAD_WIDTH: usize = 3;
/// Fill character for padding
pub const PAD_FILL: char = '0';

/// Format tokens in declaration order. Ties in length keep this order.
pub const FORMAT_TOKENS: [&str; 10] = ["YYYY", "MM", "DD", "HH", "mm", "ss", "SSS", "D", "MMMM", "MMM"];

/// Placeholder prefix used between token matching and value substitution
pub(crate) const PLACEHOLDER_PREFIX: char = '$';

pub(crate) const MILLIS_PER_SECOND: f64 = 1000.0;
pub(crate) const SECONDS_PER_MINUTE: f64 = 60.0;
pub(crate) const MINUTES_PER_HOUR: f64 = 60.0;
pub(crate) const HOURS_PER_DAY: f64 = 24.0;
/// Approximate month length used by [`crate::diff`]
pub(crate) const DAYS_PER_MONTH: f64 = 30.0;
pub(crate) const MONTHS_PER_YEAR: f64 = 12.0;
