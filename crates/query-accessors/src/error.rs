//! Error types for query parameter conversion.

use std::num::ParseIntError;

use chrono::NaiveDateTime;
use chrono_tz::Tz;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum QueryError {
    #[error("Invalid boolean: '{0}'")]
    InvalidBoolean(String),

    #[error("Invalid integer for '{name}': '{value}' ({source})")]
    InvalidInteger {
        name: String,
        value: String,
        #[source]
        source: ParseIntError,
    },

    #[error("Invalid element in '{name}': '{item}' ({reason})")]
    InvalidElement {
        name: String,
        item: String,
        reason: String,
    },

    #[error("Invalid datetime: '{value}' does not match '{format}' ({source})")]
    InvalidDatetime {
        value: String,
        format: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("Nonexistent local time: {naive} in {zone}")]
    NonexistentLocalTime { naive: NaiveDateTime, zone: Tz },

    #[error("Missing delimiter: '{value}' must contain '{delim}'")]
    MissingDelimiter { value: String, delim: String },

    #[error("Invalid range: '{value}' must split into exactly two parts on '{delim}'")]
    InvalidRange { value: String, delim: String },

    #[error("Empty delimiter")]
    EmptyDelimiter,

    #[error("Invalid settings: {0}")]
    InvalidSettings(String),
}

pub type Result<T> = std::result::Result<T, QueryError>;
