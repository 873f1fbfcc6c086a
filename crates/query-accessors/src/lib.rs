//! # query-accessors
//!
//! Typed accessors for decoded URL query parameters.
//!
//! A request handler hands over its query parameters as any [`QueryParams`]
//! mapping and reads each value as the shape it needs: a string, a boolean,
//! an integer, a delimited list, a datetime, or a datetime range. Missing
//! parameters yield the caller's default. Malformed values either fall back
//! to that default (`get_*`) or surface as a [`QueryError`] (`try_get_*`).
//!
//! ## Modules
//!
//! - [`accessors`] — The `get_*` / `try_get_*` functions
//! - [`datetime`] — Strict datetime parsing with day alignment and timezone localization
//! - [`params`] — The [`QueryParams`] mapping trait and its implementations
//! - [`settings`] — Timezone configuration injected into the datetime accessors
//! - [`error`] — Error types

pub mod accessors;
pub mod datetime;
pub mod error;
pub mod params;
pub mod settings;

pub use accessors::{
    get_bool, get_datetime, get_datetime_range, get_int, get_list, get_str, parse_bool,
    try_get_bool, try_get_datetime, try_get_datetime_range, try_get_int, try_get_list,
    DatetimeOptions, RangeOptions, DEFAULT_DELIM,
};
pub use datetime::{parse_datetime, Align, Timestamp, DEFAULT_FORMAT};
pub use error::QueryError;
pub use params::QueryParams;
pub use settings::Settings;
