//! Date utilities for the Jalali (Solar Hijri) calendar.
//!
//! The operations mirror a generic date utility (`parse`, `format`, `diff`,
//! `add`, `start_of`, `clone`) and work on any [`CalendarDate`]. All of them
//! exchange dates as [`DateFields`]: year, zero-based month, day, hour,
//! minute, second and millisecond.
//!
//! ```
//! use jalali_date::{JalaliDate, Scale, add, format, get_date_values};
//!
//! let date: JalaliDate = "1403-07-28".parse().unwrap();
//! let next = add(&date, 3, Scale::Day).unwrap();
//! assert_eq!(get_date_values(&next).to_array(), [1403, 7, 1, 0, 0, 0, 0]);
//! assert_eq!(format(&next, "D MMMM YYYY", "fa"), "01 آبان 1403");
//! ```

mod config;
mod consts;
mod conversion;
mod date;
mod error;
mod formatter;
mod prelude;
mod rules;
mod types;
mod utils;

pub use config::{Config, DateUtils, default_time_separator};
pub use consts::*;
pub use conversion::{MAX_YEAR, MIN_YEAR};
pub use date::{CalendarDate, JalaliDate};
pub use error::DateError;
pub use formatter::{Locale, LocaleFormatter, MonthNameFormatter, formatter_for, pad_start};
pub use rules::days_in_month;
pub use types::{DateFields, Scale};
pub use utils::{
    DateInput, add, clone, diff, diff_by_name, format, format_with, get_date_values, get_days_in_month, is_leap_year,
    now, parse, start_of, to_string, today,
};
