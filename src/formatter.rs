//! Token formatting and locale month names.
//!
//! Month-name formatters are cached per locale tag for the life of the
//! process. Entries are never invalidated.

use std::{
    cmp::Reverse,
    collections::HashMap,
    fmt,
    sync::{Arc, OnceLock, PoisonError, RwLock},
};

use chrono::NaiveDateTime;

use crate::{
    FORMAT_TOKENS, PAD_FILL, PAD_WIDTH,
    consts::PLACEHOLDER_PREFIX,
    conversion,
    date::CalendarDate,
    prelude::*,
    types::DateFields,
    utils::get_date_values,
};

const PERSIAN_MONTHS: [&str; 12] = [
    "فروردین",
    "اردیبهشت",
    "خرداد",
    "تیر",
    "مرداد",
    "شهریور",
    "مهر",
    "آبان",
    "آذر",
    "دی",
    "بهمن",
    "اسفند",
];

/// Renders the long month name of a native instant.
pub trait MonthNameFormatter: Send + Sync {
    fn month_name(&self, instant: NaiveDateTime) -> String;
}

/// Locales with built-in month names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Locale {
    /// Gregorian month names of the instant
    #[display(fmt = "en")]
    English,
    /// Jalali month names of the instant
    #[display(fmt = "fa")]
    Persian,
}

impl Locale {
    /// Resolves a BCP 47 style tag by its primary language subtag.
    pub fn from_tag(tag: &str) -> Option<Self> {
        let primary = tag.split(['-', '_']).next().unwrap_or_default();
        match primary.to_ascii_lowercase().as_str() {
            "en" => Some(Self::English),
            "fa" => Some(Self::Persian),
            _ => None,
        }
    }
}

/// Month-name formatter for one locale tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleFormatter {
    tag:    String,
    locale: Locale,
}

impl LocaleFormatter {
    /// Unknown tags fall back to English.
    pub fn new(tag: &str) -> Self {
        let locale = Locale::from_tag(tag).unwrap_or_else(|| {
            tracing::debug!(tag, "unsupported locale, falling back to en");
            Locale::English
        });
        Self {
            tag: tag.to_owned(),
            locale,
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub const fn locale(&self) -> Locale {
        self.locale
    }
}

impl MonthNameFormatter for LocaleFormatter {
    fn month_name(&self, instant: NaiveDateTime) -> String {
        match self.locale {
            Locale::English => instant.format("%B").to_string(),
            Locale::Persian => match conversion::from_gregorian(instant.date()) {
                Ok((_, month, _)) => usize::try_from(month - 1)
                    .ok()
                    .and_then(|index| PERSIAN_MONTHS.get(index))
                    .map_or_else(String::new, |name| (*name).to_owned()),
                Err(err) => {
                    tracing::warn!(%instant, %err, "no Jalali month for instant");
                    String::new()
                },
            },
        }
    }
}

impl fmt::Display for LocaleFormatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.tag, self.locale)
    }
}

type FormatterCache = RwLock<HashMap<String, Arc<LocaleFormatter>>>;

fn cache() -> &'static FormatterCache {
    static CACHE: OnceLock<FormatterCache> = OnceLock::new();
    CACHE.get_or_init(FormatterCache::default)
}

/// The cached formatter for `lang`, created on first use.
pub fn formatter_for(lang: &str) -> Arc<LocaleFormatter> {
    let cached = cache()
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .get(lang)
        .cloned();
    if let Some(formatter) = cached {
        return formatter;
    }

    let formatter = Arc::new(LocaleFormatter::new(lang));
    tracing::debug!(%formatter, "caching month name formatter");
    Arc::clone(
        cache()
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(lang.to_owned())
            .or_insert(formatter),
    )
}

/// Left-pads the string form of `value` with `fill` up to `width` characters.
pub fn pad_start(value: impl fmt::Display, width: usize, fill: char) -> String {
    let s = value.to_string();
    let missing = width.saturating_sub(s.chars().count());
    std::iter::repeat_n(fill, missing).chain(s.chars()).collect()
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    chars
        .next()
        .map(|first| first.to_uppercase().chain(chars).collect())
        .unwrap_or_default()
}

fn token_value(token: &str, fields: &DateFields, month_name: &str) -> String {
    let pad = |value: i64| pad_start(value, PAD_WIDTH, PAD_FILL);
    match token {
        "YYYY" => pad(fields.year),
        "MM" => pad(fields.month + 1),
        "DD" | "D" => pad(fields.day),
        "HH" => pad(fields.hour),
        "mm" => pad(fields.minute),
        "ss" => pad(fields.second),
        "SSS" => pad(fields.millisecond),
        "MMMM" | "MMM" => month_name.to_owned(),
        _ => String::new(),
    }
}

/// Formats `date` with month names from the cached formatter for `lang`.
///
/// Tokens: `YYYY MM DD D HH mm ss SSS MMMM MMM`. Every numeric token is
/// padded to two digits, year and milliseconds included. `MMM` and `MMMM`
/// both render the long month name. Only the first occurrence of each
/// token is replaced.
pub fn format<D: CalendarDate>(date: &D, format_string: &str, lang: &str) -> String {
    format_with(date, format_string, &*formatter_for(lang))
}

/// Like [`format`], with an explicit month-name formatter.
pub fn format_with<D: CalendarDate>(date: &D, format_string: &str, formatter: &dyn MonthNameFormatter) -> String {
    let fields = get_date_values(date);
    let month_name = capitalize(&formatter.month_name(date.native()));

    let mut tokens = FORMAT_TOKENS;
    tokens.sort_by_key(|token| Reverse(token.len()));

    // Matched tokens become positional placeholders first so that an
    // inserted value is never matched as another token.
    let mut out = format_string.to_owned();
    let mut values = Vec::new();
    for token in tokens {
        if out.contains(token) {
            out = out.replacen(token, &format!("{PLACEHOLDER_PREFIX}{}", values.len()), 1);
            values.push(token_value(token, &fields, &month_name));
        }
    }

    for (i, value) in values.iter().enumerate() {
        out = out.replacen(&format!("{PLACEHOLDER_PREFIX}{i}"), value, 1);
    }
    out
}
