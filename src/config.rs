use std::env::{self, VarError};

use chrono_tz::Tz;
use serde::Deserialize;

use crate::{
    error::TimingError,
    timing::{
        display::{is_valid_pattern, DEFAULT_DISPLAY_FORMAT},
        local_time::parse_timezone,
        resolver::{DEFAULT_MAX_SEARCH_DAYS, MAX_SEARCH_DAYS_LIMIT},
    },
};

pub const MAX_SEARCH_DAYS_VAR: &str = "STATION_TIMING_MAX_SEARCH_DAYS";
pub const DISPLAY_FORMAT_VAR: &str = "STATION_TIMING_DISPLAY_FORMAT";
pub const TIMEZONE_VAR: &str = "STATION_TIMING_TIMEZONE";

#[derive(Clone, Debug, PartialEq)]
pub struct ResolverConfig {
    /// Days to scan past the requested date in each direction.
    pub max_search_days: u32,
    /// strftime pattern used by `format_for_display`.
    pub display_format: String,
    /// Station timezone, only used to read the current wall-clock time.
    pub timezone: Tz,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            max_search_days: DEFAULT_MAX_SEARCH_DAYS,
            display_format: DEFAULT_DISPLAY_FORMAT.to_string(),
            timezone: Tz::UTC,
        }
    }
}

#[derive(Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
struct RawConfig {
    max_search_days: Option<u32>,
    display_format: Option<String>,
    timezone: Option<String>,
}

impl ResolverConfig {
    /// Reads a JSON config, e.g. `{"maxSearchDays": 14, "timezone": "Europe/London"}`.
    /// Missing keys take their defaults.
    pub fn from_config(config: &str) -> Result<Self, TimingError> {
        let raw: RawConfig =
            serde_json::from_str(config).map_err(|err| TimingError::InvalidConfig {
                key: "config",
                reason: err.to_string(),
            })?;
        Self::from_raw(raw)
    }

    pub fn from_env() -> Result<Self, TimingError> {
        Self::from_lookup(|key| env::var(key))
    }

    /// Builds the config from any variable source. Unset variables fall back
    /// to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, TimingError>
    where
        F: Fn(&str) -> Result<String, VarError>,
    {
        let var = |key: &'static str| match lookup(key) {
            Ok(value) => Ok(Some(value)),
            Err(VarError::NotPresent) => {
                tracing::debug!(key, "not set, using default");
                Ok(None)
            }
            Err(err) => Err(TimingError::InvalidConfig {
                key,
                reason: err.to_string(),
            }),
        };

        let max_search_days = match var(MAX_SEARCH_DAYS_VAR)? {
            Some(value) => Some(value.trim().parse::<u32>().map_err(|err| {
                TimingError::InvalidConfig {
                    key: MAX_SEARCH_DAYS_VAR,
                    reason: err.to_string(),
                }
            })?),
            None => None,
        };

        Self::from_raw(RawConfig {
            max_search_days,
            display_format: var(DISPLAY_FORMAT_VAR)?,
            timezone: var(TIMEZONE_VAR)?,
        })
    }

    fn from_raw(raw: RawConfig) -> Result<Self, TimingError> {
        let defaults = Self::default();

        let max_search_days = raw.max_search_days.unwrap_or(defaults.max_search_days);
        if max_search_days == 0 || max_search_days > MAX_SEARCH_DAYS_LIMIT {
            return Err(TimingError::InvalidConfig {
                key: "maxSearchDays",
                reason: format!("must be between 1 and {}", MAX_SEARCH_DAYS_LIMIT),
            });
        }

        let display_format = raw.display_format.unwrap_or(defaults.display_format);
        if !is_valid_pattern(&display_format) {
            return Err(TimingError::InvalidConfig {
                key: "displayFormat",
                reason: format!("'{}' is not a valid strftime pattern", display_format),
            });
        }

        let timezone = match raw.timezone {
            Some(name) => parse_timezone(&name)?,
            None => defaults.timezone,
        };

        let config = Self {
            max_search_days,
            display_format,
            timezone,
        };
        tracing::info!(
            max_search_days = config.max_search_days,
            timezone = config.timezone.name(),
            "resolver config loaded"
        );
        Ok(config)
    }
}
