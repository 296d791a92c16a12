use crate::error::DateError;
use crate::prelude::*;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Unit of granularity used for arithmetic step size and truncation level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Scale {
    #[display(fmt = "year")]
    Year,
    #[display(fmt = "month")]
    Month,
    #[display(fmt = "day")]
    Day,
    #[display(fmt = "hour")]
    Hour,
    #[display(fmt = "minute")]
    Minute,
    #[display(fmt = "second")]
    Second,
    #[display(fmt = "millisecond")]
    Millisecond,
}

/// Singular and plural name of every scale, coarsest first.
const SCALE_NAMES: [(Scale, &str, &str); 7] = [
    (Scale::Year, "year", "years"),
    (Scale::Month, "month", "months"),
    (Scale::Day, "day", "days"),
    (Scale::Hour, "hour", "hours"),
    (Scale::Minute, "minute", "minutes"),
    (Scale::Second, "second", "seconds"),
    (Scale::Millisecond, "millisecond", "milliseconds"),
];

impl Scale {
    /// All scales, coarsest first
    pub const ALL: [Self; 7] = [
        Self::Year,
        Self::Month,
        Self::Day,
        Self::Hour,
        Self::Minute,
        Self::Second,
        Self::Millisecond,
    ];

    /// Position in the total order used by `start_of`: year is 6, millisecond is 0.
    pub const fn rank(self) -> u8 {
        match self {
            Self::Year => 6,
            Self::Month => 5,
            Self::Day => 4,
            Self::Hour => 3,
            Self::Minute => 2,
            Self::Second => 1,
            Self::Millisecond => 0,
        }
    }

    /// The next coarser scale, `None` for year
    pub const fn parent(self) -> Option<Self> {
        match self {
            Self::Year => None,
            Self::Month => Some(Self::Year),
            Self::Day => Some(Self::Month),
            Self::Hour => Some(Self::Day),
            Self::Minute => Some(Self::Hour),
            Self::Second => Some(Self::Minute),
            Self::Millisecond => Some(Self::Second),
        }
    }

    pub const fn singular(self) -> &'static str {
        SCALE_NAMES[self as usize].1
    }

    pub const fn plural(self) -> &'static str {
        SCALE_NAMES[self as usize].2
    }

    /// Looks a scale up by its singular or plural name.
    ///
    /// # Errors
    /// Returns `DateError::UnknownScale` if the name matches neither form.
    pub fn from_name(name: &str) -> Result<Self, DateError> {
        SCALE_NAMES
            .iter()
            .find(|(_, singular, plural)| *singular == name || *plural == name)
            .map(|(scale, ..)| *scale)
            .ok_or_else(|| DateError::UnknownScale(name.to_owned()))
    }
}

impl FromStr for Scale {
    type Err = DateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s.trim())
    }
}

impl TryFrom<String> for Scale {
    type Error = DateError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Scale> for String {
    fn from(scale: Scale) -> Self {
        scale.singular().to_owned()
    }
}

/// The seven-field decomposition of a calendar date.
///
/// `month` is zero-based. Values are signed and unbounded so that arithmetic
/// can push a field out of range; construction carries the overflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct DateFields {
    pub year:        i64,
    pub month:       i64,
    pub day:         i64,
    pub hour:        i64,
    pub minute:      i64,
    pub second:      i64,
    pub millisecond: i64,
}

impl DateFields {
    /// Date-only fields, time of day at midnight
    pub const fn new(year: i64, month: i64, day: i64) -> Self {
        Self {
            year,
            month,
            day,
            hour: 0,
            minute: 0,
            second: 0,
            millisecond: 0,
        }
    }

    pub const fn with_time(self, hour: i64, minute: i64, second: i64, millisecond: i64) -> Self {
        Self {
            hour,
            minute,
            second,
            millisecond,
            ..self
        }
    }

    /// Drops the time of day
    pub const fn date_only(self) -> Self {
        Self::new(self.year, self.month, self.day)
    }

    /// Value of the field matching `scale`
    pub const fn get(&self, scale: Scale) -> i64 {
        match scale {
            Scale::Year => self.year,
            Scale::Month => self.month,
            Scale::Day => self.day,
            Scale::Hour => self.hour,
            Scale::Minute => self.minute,
            Scale::Second => self.second,
            Scale::Millisecond => self.millisecond,
        }
    }

    pub fn field_mut(&mut self, scale: Scale) -> &mut i64 {
        match scale {
            Scale::Year => &mut self.year,
            Scale::Month => &mut self.month,
            Scale::Day => &mut self.day,
            Scale::Hour => &mut self.hour,
            Scale::Minute => &mut self.minute,
            Scale::Second => &mut self.second,
            Scale::Millisecond => &mut self.millisecond,
        }
    }

    /// Copy with only the field matching `scale` shifted by `qty`, or
    /// `None` if that field overflows.
    pub fn offset(mut self, scale: Scale, qty: i64) -> Option<Self> {
        let field = self.field_mut(scale);
        *field = field.checked_add(qty)?;
        Some(self)
    }

    pub const fn to_array(self) -> [i64; 7] {
        [
            self.year,
            self.month,
            self.day,
            self.hour,
            self.minute,
            self.second,
            self.millisecond,
        ]
    }
}

impl From<[i64; 7]> for DateFields {
    fn from(values: [i64; 7]) -> Self {
        let [year, month, day, hour, minute, second, millisecond] = values;
        Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
            millisecond,
        }
    }
}

impl From<DateFields> for [i64; 7] {
    fn from(fields: DateFields) -> Self {
        fields.to_array()
    }
}
