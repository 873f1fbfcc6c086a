//! Configuration injected into the datetime accessors.
//!
//! The hosting application owns these values; accessors only read them.

use chrono_tz::Tz;
use serde::Deserialize;

use crate::error::{QueryError, Result};

/// Timezone configuration for produced timestamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Whether datetime accessors attach `time_zone` unless told otherwise.
    pub use_tz: bool,
    /// The zone naive wall-clock values are localized into.
    pub time_zone: Tz,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            use_tz: true,
            time_zone: Tz::UTC,
        }
    }
}

impl Settings {
    pub fn new(use_tz: bool, time_zone: Tz) -> Self {
        Self { use_tz, time_zone }
    }

    /// Settings that never attach a timezone by default.
    pub fn naive() -> Self {
        Self {
            use_tz: false,
            ..Self::default()
        }
    }

    /// Load settings from a TOML document. Missing keys keep their defaults.
    ///
    /// ```
    /// use query_accessors::Settings;
    ///
    /// let settings = Settings::from_toml_str("time_zone = \"Asia/Shanghai\"").unwrap();
    /// assert!(settings.use_tz);
    /// assert_eq!(settings.time_zone, chrono_tz::Asia::Shanghai);
    /// ```
    pub fn from_toml_str(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| QueryError::InvalidSettings(e.to_string()))
    }

    /// Resolve an optional per-call awareness override against `use_tz`.
    pub fn resolve_aware(&self, aware: Option<bool>) -> bool {
        aware.unwrap_or(self.use_tz)
    }
}
