//! Strict datetime parsing with day alignment and timezone localization.
//!
//! [`parse_datetime`] reads a wall-clock value against a strftime-style
//! format, optionally pins it to the start or end of its day, and optionally
//! localizes it into the zone configured in [`Settings`]. Localization
//! reinterprets the naive fields as local time in that zone; it never shifts
//! them from UTC.
//!
//! The function is pure: no clock access, no global state. The only
//! configuration it consults is the `Settings` value passed in.

use std::fmt;

use chrono::format::{parse as parse_items, Fixed, Item, Numeric, ParseResult, Parsed, StrftimeItems};
use chrono::{DateTime, NaiveDateTime, TimeZone, Timelike, Utc};
use chrono_tz::Tz;

use crate::error::{QueryError, Result};
use crate::settings::Settings;

/// The format accessors use when the caller does not pass one.
pub const DEFAULT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// ── Alignment ───────────────────────────────────────────────────────────────

/// Where to pin the time-of-day of a parsed value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    /// Keep the parsed time-of-day.
    #[default]
    None,
    /// 00:00:00 of the parsed day.
    Start,
    /// 23:59:59 of the parsed day.
    End,
}

impl Align {
    /// Overwrite hour, minute and second. Sub-second precision is kept.
    fn apply(self, naive: NaiveDateTime) -> NaiveDateTime {
        let (hour, minute, second) = match self {
            Align::None => return naive,
            Align::Start => (0, 0, 0),
            Align::End => (23, 59, 59),
        };
        // A leap-second nanosecond cannot sit on a pinned second.
        let nano = naive.nanosecond() % 1_000_000_000;
        naive
            .date()
            .and_hms_nano_opt(hour, minute, second, nano)
            .unwrap_or(naive)
    }
}

// ── Timestamp ───────────────────────────────────────────────────────────────

/// A parsed calendar timestamp, with or without an attached timezone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Timestamp {
    Naive(NaiveDateTime),
    Aware(DateTime<Tz>),
}

impl Timestamp {
    /// The wall-clock fields, whatever the zone.
    pub fn naive_local(&self) -> NaiveDateTime {
        match self {
            Timestamp::Naive(naive) => *naive,
            Timestamp::Aware(dt) => dt.naive_local(),
        }
    }

    pub fn is_aware(&self) -> bool {
        matches!(self, Timestamp::Aware(_))
    }

    pub fn timezone(&self) -> Option<Tz> {
        match self {
            Timestamp::Naive(_) => None,
            Timestamp::Aware(dt) => Some(dt.timezone()),
        }
    }

    /// The instant in UTC. Naive values have no instant and return `None`.
    pub fn to_utc(&self) -> Option<DateTime<Utc>> {
        match self {
            Timestamp::Naive(_) => None,
            Timestamp::Aware(dt) => Some(dt.with_timezone(&Utc)),
        }
    }

    /// Render with a strftime-style format.
    pub fn format(&self, format: &str) -> String {
        match self {
            Timestamp::Naive(naive) => naive.format(format).to_string(),
            Timestamp::Aware(dt) => dt.format(format).to_string(),
        }
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Timestamp::Naive(naive) => write!(f, "{naive}"),
            Timestamp::Aware(dt) => write!(f, "{}", dt.to_rfc3339()),
        }
    }
}

// ── parse_datetime ──────────────────────────────────────────────────────────

/// Parse `value` against `format`, align it, and optionally localize it.
///
/// # Arguments
///
/// * `value` — The raw string (e.g., `"2024-01-05 13:45:22"`)
/// * `format` — A strftime-style format (e.g., [`DEFAULT_FORMAT`])
/// * `align` — Whether to pin the time-of-day to the start or end of the day
/// * `aware` — Whether to attach `settings.time_zone`
/// * `settings` — Supplies the zone used when `aware` is true
///
/// Fields the format does not mention take defaults: year 1900, month 1,
/// day 1, and 00:00:00. So `"%Y-%m"` yields the first of the month at
/// midnight and `"%H:%M"` lands on 1900-01-01. An `%I` hour without `%p`
/// is read as AM.
/// An ambiguous local time (DST fall-back) resolves to the earlier instant.
///
/// # Errors
///
/// Returns [`QueryError::InvalidDatetime`] if `value` does not match `format`,
/// or [`QueryError::NonexistentLocalTime`] if the wall-clock value falls in a
/// DST gap of the configured zone.
///
/// # Examples
///
/// ```
/// use query_accessors::{parse_datetime, Align, Settings, DEFAULT_FORMAT};
///
/// let ts = parse_datetime("2024-01-05 13:45:22", DEFAULT_FORMAT, Align::Start, false, &Settings::default()).unwrap();
/// assert_eq!(ts.to_string(), "2024-01-05 00:00:00");
/// ```
pub fn parse_datetime(
    value: &str,
    format: &str,
    align: Align,
    aware: bool,
    settings: &Settings,
) -> Result<Timestamp> {
    let naive = align.apply(parse_naive(value, format)?);

    if !aware {
        return Ok(Timestamp::Naive(naive));
    }

    localize(naive, settings.time_zone).map(Timestamp::Aware)
}

/// Reinterpret naive wall-clock fields as local time in `zone`.
fn localize(naive: NaiveDateTime, zone: Tz) -> Result<DateTime<Tz>> {
    zone.from_local_datetime(&naive)
        .earliest()
        .ok_or(QueryError::NonexistentLocalTime { naive, zone })
}

fn parse_naive(value: &str, format: &str) -> Result<NaiveDateTime> {
    let invalid = |source: chrono::ParseError| QueryError::InvalidDatetime {
        value: value.to_string(),
        format: format.to_string(),
        source,
    };

    let items: Vec<Item<'_>> = StrftimeItems::new(format).collect();
    let mut parsed = Parsed::new();
    parse_items(&mut parsed, value, items.iter()).map_err(invalid)?;
    fill_missing_fields(&mut parsed, &FormatFields::scan(&items)).map_err(invalid)?;
    parsed.to_naive_datetime_with_offset(0).map_err(invalid)
}

/// Which calendar and clock fields a format mentions.
#[derive(Debug, Default)]
struct FormatFields {
    year: bool,
    month: bool,
    day: bool,
    week_based: bool,
    hour: bool,
    hour12: bool,
    ampm: bool,
    minute: bool,
    complete: bool,
}

impl FormatFields {
    fn scan(items: &[Item<'_>]) -> Self {
        let mut fields = Self::default();
        for item in items {
            match item {
                Item::Numeric(Numeric::Year | Numeric::YearDiv100 | Numeric::YearMod100, _) => {
                    fields.year = true
                }
                Item::Numeric(Numeric::Month, _)
                | Item::Fixed(Fixed::ShortMonthName | Fixed::LongMonthName) => fields.month = true,
                Item::Numeric(Numeric::Day, _) => fields.day = true,
                Item::Numeric(
                    Numeric::IsoYear
                    | Numeric::IsoYearDiv100
                    | Numeric::IsoYearMod100
                    | Numeric::IsoWeek
                    | Numeric::WeekFromSun
                    | Numeric::WeekFromMon
                    | Numeric::Ordinal,
                    _,
                ) => fields.week_based = true,
                Item::Numeric(Numeric::Hour, _) => fields.hour = true,
                Item::Numeric(Numeric::Hour12, _) => fields.hour12 = true,
                Item::Fixed(Fixed::LowerAmPm | Fixed::UpperAmPm) => fields.ampm = true,
                Item::Numeric(Numeric::Minute, _) => fields.minute = true,
                Item::Numeric(Numeric::Timestamp, _)
                | Item::Fixed(Fixed::RFC2822 | Fixed::RFC3339) => fields.complete = true,
                _ => {}
            }
        }
        fields
    }
}

/// Fill the fields a format leaves out: date parts default to 1900-01-01 and
/// clock parts to zero.
///
/// Week- and ordinal-based formats derive the date themselves and are left
/// alone there.
fn fill_missing_fields(parsed: &mut Parsed, fields: &FormatFields) -> ParseResult<()> {
    if fields.complete {
        return Ok(());
    }

    if !fields.year && !fields.week_based {
        parsed.set_year(1900)?;
    }
    if !fields.week_based {
        if !fields.month {
            parsed.set_month(1)?;
        }
        if !fields.day {
            parsed.set_day(1)?;
        }
    }

    if !fields.hour && !fields.hour12 && !fields.ampm {
        parsed.set_hour(0)?;
    } else if fields.hour12 && !fields.ampm {
        parsed.set_ampm(false)?;
    }
    if !fields.minute {
        parsed.set_minute(0)?;
    }
    Ok(())
}
