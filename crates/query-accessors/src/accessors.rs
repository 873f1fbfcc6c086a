//! Typed accessors over a [`QueryParams`] mapping.
//!
//! Every accessor reads one named parameter and converts it. A missing
//! parameter always yields the caller's default. A present but malformed
//! value is handled in one of two tiers:
//!
//! - `get_*` substitutes the default (or, for lists, drops the bad element)
//!   and emits a `debug` event.
//! - `try_get_*` returns the [`QueryError`] so the caller decides.
//!
//! # Functions
//!
//! - [`get_str`] — the raw value
//! - [`get_bool`] / [`try_get_bool`] — `true/t/yes/y/1` and `false/f/no/n/0`
//! - [`get_int`] / [`try_get_int`] — base-10 signed integer
//! - [`get_list`] / [`try_get_list`] — delimited list with a per-element converter
//! - [`get_datetime`] / [`try_get_datetime`] — via [`parse_datetime`]
//! - [`get_datetime_range`] / [`try_get_datetime_range`] — a delimited start/end pair

use std::fmt::Display;

use tracing::debug;

use crate::datetime::{parse_datetime, Align, Timestamp, DEFAULT_FORMAT};
use crate::error::{QueryError, Result};
use crate::params::QueryParams;
use crate::settings::Settings;

/// Delimiter for list and range values unless the caller picks another.
pub const DEFAULT_DELIM: &str = ",";

const TRUTHY: [&str; 5] = ["true", "t", "yes", "y", "1"];
const FALSY: [&str; 5] = ["false", "f", "no", "n", "0"];

// ── Options ─────────────────────────────────────────────────────────────────

/// Options for [`get_datetime`] and [`try_get_datetime`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatetimeOptions {
    /// strftime-style format the value must match.
    pub format: String,
    /// Time-of-day alignment applied after parsing.
    pub align: Align,
    /// Attach the configured timezone. `None` defers to [`Settings::use_tz`].
    pub aware: Option<bool>,
}

impl Default for DatetimeOptions {
    fn default() -> Self {
        Self {
            format: DEFAULT_FORMAT.to_string(),
            align: Align::None,
            aware: None,
        }
    }
}

/// Options for [`get_datetime_range`] and [`try_get_datetime_range`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeOptions {
    /// strftime-style format both halves must match.
    pub format: String,
    /// Separator between the start and end values.
    pub delim: String,
    /// Align the start to 00:00:00 and the end to 23:59:59.
    pub align: bool,
    /// Attach the configured timezone. `None` defers to [`Settings::use_tz`].
    pub aware: Option<bool>,
}

impl Default for RangeOptions {
    fn default() -> Self {
        Self {
            format: DEFAULT_FORMAT.to_string(),
            delim: DEFAULT_DELIM.to_string(),
            align: false,
            aware: None,
        }
    }
}

// ── Strings ─────────────────────────────────────────────────────────────────

/// The raw value of `name`, or `default` if absent.
///
/// Pass `None` to tell an absent parameter apart from any value it could
/// carry, including the empty string.
pub fn get_str<'a, P>(params: &'a P, name: &str, default: Option<&'a str>) -> Option<&'a str>
where
    P: QueryParams + ?Sized,
{
    params.get_param(name).or(default)
}

// ── Booleans ────────────────────────────────────────────────────────────────

/// Parse a boolean from the truthy/falsy sets, ignoring case.
///
/// Usable as a [`get_list`] converter.
///
/// # Errors
///
/// Returns [`QueryError::InvalidBoolean`] for any other value.
pub fn parse_bool(value: &str) -> Result<bool> {
    let lowered = value.to_lowercase();
    if TRUTHY.contains(&lowered.as_str()) {
        Ok(true)
    } else if FALSY.contains(&lowered.as_str()) {
        Ok(false)
    } else {
        Err(QueryError::InvalidBoolean(value.to_string()))
    }
}

/// The boolean value of `name`, or `default` if absent or not a boolean.
///
/// ```
/// use std::collections::HashMap;
/// use query_accessors::get_bool;
///
/// let params = HashMap::from([("active".to_string(), "Yes".to_string())]);
/// assert!(get_bool(&params, "active", false));
/// assert!(!get_bool(&params, "archived", false));
/// ```
pub fn get_bool<P>(params: &P, name: &str, default: bool) -> bool
where
    P: QueryParams + ?Sized,
{
    try_get_bool(params, name, default).unwrap_or_else(|e| fallback(name, &e, default))
}

/// Like [`get_bool`], but a value outside both sets is an error.
pub fn try_get_bool<P>(params: &P, name: &str, default: bool) -> Result<bool>
where
    P: QueryParams + ?Sized,
{
    match params.get_param(name) {
        Some(raw) => parse_bool(raw),
        None => Ok(default),
    }
}

// ── Integers ────────────────────────────────────────────────────────────────

/// The integer value of `name`, or `default` if absent or malformed.
pub fn get_int<P>(params: &P, name: &str, default: i64) -> i64
where
    P: QueryParams + ?Sized,
{
    try_get_int(params, name, default).unwrap_or_else(|e| fallback(name, &e, default))
}

/// Like [`get_int`], but a malformed value is an error.
///
/// Surrounding whitespace is ignored. Fractions such as `"4.2"` and
/// digit-group underscores such as `"1_000"` are rejected.
///
/// # Errors
///
/// Returns [`QueryError::InvalidInteger`] if the value is not a base-10 `i64`.
pub fn try_get_int<P>(params: &P, name: &str, default: i64) -> Result<i64>
where
    P: QueryParams + ?Sized,
{
    let Some(raw) = params.get_param(name) else {
        return Ok(default);
    };

    raw.trim()
        .parse::<i64>()
        .map_err(|source| QueryError::InvalidInteger {
            name: name.to_string(),
            value: raw.to_string(),
            source,
        })
}

// ── Lists ───────────────────────────────────────────────────────────────────

/// Split `raw` on `delim`, trim each piece, drop empty ones.
fn split_pieces<'a>(raw: &'a str, delim: &'a str) -> Result<impl Iterator<Item = &'a str>> {
    if delim.is_empty() {
        return Err(QueryError::EmptyDelimiter);
    }
    Ok(raw.split(delim).map(str::trim).filter(|piece| !piece.is_empty()))
}

/// The list value of `name`, converting each element with `convert`.
///
/// Elements that fail conversion are dropped. Returns `default` if the
/// parameter is absent or `delim` is empty.
///
/// ```
/// use std::collections::HashMap;
/// use query_accessors::get_list;
///
/// let params = HashMap::from([("ids".to_string(), " 1, 2,,x,3 ".to_string())]);
/// let ids = get_list(&params, "ids", Vec::new(), ",", |s| s.parse::<i64>());
/// assert_eq!(ids, vec![1, 2, 3]);
/// ```
pub fn get_list<P, T, E, F>(
    params: &P,
    name: &str,
    default: Vec<T>,
    delim: &str,
    mut convert: F,
) -> Vec<T>
where
    P: QueryParams + ?Sized,
    F: FnMut(&str) -> std::result::Result<T, E>,
    E: Display,
{
    let Some(raw) = params.get_param(name) else {
        return default;
    };

    let pieces = match split_pieces(raw, delim) {
        Ok(pieces) => pieces,
        Err(e) => return fallback(name, &e, default),
    };

    pieces
        .filter_map(|item| match convert(item) {
            Ok(value) => Some(value),
            Err(e) => {
                debug!(param = name, item, error = %e, "dropping malformed list element");
                None
            }
        })
        .collect()
}

/// Like [`get_list`], but the first element that fails conversion is an error.
///
/// # Errors
///
/// Returns [`QueryError::InvalidElement`] for a failing element, or
/// [`QueryError::EmptyDelimiter`] if `delim` is empty.
pub fn try_get_list<P, T, E, F>(
    params: &P,
    name: &str,
    default: Vec<T>,
    delim: &str,
    mut convert: F,
) -> Result<Vec<T>>
where
    P: QueryParams + ?Sized,
    F: FnMut(&str) -> std::result::Result<T, E>,
    E: Display,
{
    let Some(raw) = params.get_param(name) else {
        return Ok(default);
    };

    split_pieces(raw, delim)?
        .map(|item| {
            convert(item).map_err(|e| QueryError::InvalidElement {
                name: name.to_string(),
                item: item.to_string(),
                reason: e.to_string(),
            })
        })
        .collect()
}

// ── Datetimes ───────────────────────────────────────────────────────────────

/// The datetime value of `name`, or `default` if absent or malformed.
pub fn get_datetime<P>(
    params: &P,
    name: &str,
    default: Option<Timestamp>,
    options: &DatetimeOptions,
    settings: &Settings,
) -> Option<Timestamp>
where
    P: QueryParams + ?Sized,
{
    let Some(raw) = params.get_param(name) else {
        return default;
    };

    match parse_single(raw, options, settings) {
        Ok(ts) => Some(ts),
        Err(e) => fallback(name, &e, default),
    }
}

/// Like [`get_datetime`], but a malformed value is an error.
///
/// # Errors
///
/// Propagates the [`parse_datetime`] error.
pub fn try_get_datetime<P>(
    params: &P,
    name: &str,
    default: Option<Timestamp>,
    options: &DatetimeOptions,
    settings: &Settings,
) -> Result<Option<Timestamp>>
where
    P: QueryParams + ?Sized,
{
    match params.get_param(name) {
        Some(raw) => parse_single(raw, options, settings).map(Some),
        None => Ok(default),
    }
}

fn parse_single(raw: &str, options: &DatetimeOptions, settings: &Settings) -> Result<Timestamp> {
    parse_datetime(
        raw,
        &options.format,
        options.align,
        settings.resolve_aware(options.aware),
        settings,
    )
}

// ── Datetime ranges ─────────────────────────────────────────────────────────

/// The `(start, end)` value of `name`.
///
/// Returns `(default, default)` if the parameter is absent, lacks the
/// delimiter, has more than two parts, or either half fails to parse. A
/// partially parsed pair is never returned.
///
/// ```
/// use std::collections::HashMap;
/// use query_accessors::{get_datetime_range, RangeOptions, Settings};
///
/// let params = HashMap::from([(
///     "period".to_string(),
///     "2024-01-01 08:00:00,2024-01-31 17:00:00".to_string(),
/// )]);
/// let options = RangeOptions { align: true, ..Default::default() };
/// let (start, end) = get_datetime_range(&params, "period", None, &options, &Settings::naive());
/// assert_eq!(start.unwrap().to_string(), "2024-01-01 00:00:00");
/// assert_eq!(end.unwrap().to_string(), "2024-01-31 23:59:59");
/// ```
pub fn get_datetime_range<P>(
    params: &P,
    name: &str,
    default: Option<Timestamp>,
    options: &RangeOptions,
    settings: &Settings,
) -> (Option<Timestamp>, Option<Timestamp>)
where
    P: QueryParams + ?Sized,
{
    let Some(raw) = params.get_param(name) else {
        return (default.clone(), default);
    };

    match parse_range(raw, options, settings) {
        Ok((start, end)) => (Some(start), Some(end)),
        Err(e) => fallback(name, &e, (default.clone(), default)),
    }
}

/// Like [`get_datetime_range`], but any failure is an error.
///
/// # Errors
///
/// Returns [`QueryError::MissingDelimiter`], [`QueryError::InvalidRange`],
/// [`QueryError::EmptyDelimiter`], or the [`parse_datetime`] error of the
/// first half that fails.
pub fn try_get_datetime_range<P>(
    params: &P,
    name: &str,
    default: Option<Timestamp>,
    options: &RangeOptions,
    settings: &Settings,
) -> Result<(Option<Timestamp>, Option<Timestamp>)>
where
    P: QueryParams + ?Sized,
{
    let Some(raw) = params.get_param(name) else {
        return Ok((default.clone(), default));
    };

    let (start, end) = parse_range(raw, options, settings)?;
    Ok((Some(start), Some(end)))
}

fn parse_range(
    raw: &str,
    options: &RangeOptions,
    settings: &Settings,
) -> Result<(Timestamp, Timestamp)> {
    let delim = options.delim.as_str();
    if delim.is_empty() {
        return Err(QueryError::EmptyDelimiter);
    }

    let Some((start_raw, end_raw)) = raw.split_once(delim) else {
        return Err(QueryError::MissingDelimiter {
            value: raw.to_string(),
            delim: delim.to_string(),
        });
    };
    if end_raw.contains(delim) {
        return Err(QueryError::InvalidRange {
            value: raw.to_string(),
            delim: delim.to_string(),
        });
    }

    let (start_align, end_align) = if options.align {
        (Align::Start, Align::End)
    } else {
        (Align::None, Align::None)
    };
    let aware = settings.resolve_aware(options.aware);

    let start = parse_datetime(start_raw, &options.format, start_align, aware, settings)?;
    let end = parse_datetime(end_raw, &options.format, end_align, aware, settings)?;
    Ok((start, end))
}

// ── Internal helpers ────────────────────────────────────────────────────────

fn fallback<T>(name: &str, error: &QueryError, default: T) -> T {
    debug!(param = name, error = %error, "malformed query parameter, using default");
    default
}
