use std::{fmt, str::FromStr, sync::LazyLock};

use chrono::{NaiveTime, Timelike};
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::TimingError;

static HM_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{1,2}):(\d{2})$").expect("static regex"));

/// A wall-clock time of day with minute resolution.
///
/// Stored as minutes since midnight, always in `0..1440`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay(u16);

impl TimeOfDay {
    pub fn from_hm(hour: u16, minute: u16) -> Result<Self, TimingError> {
        if hour > 23 || minute > 59 {
            return Err(TimingError::InvalidTimeOfDay {
                value: format!("{}:{:02}", hour, minute),
            });
        }
        Ok(Self(hour * 60 + minute))
    }

    /// Minute of day of a timestamp. Seconds are dropped.
    pub fn of<T: Timelike>(time: &T) -> Self {
        Self((time.hour() * 60 + time.minute()) as u16)
    }

    pub fn minutes(&self) -> u16 {
        self.0
    }

    pub fn hour(&self) -> u16 {
        self.0 / 60
    }

    pub fn minute(&self) -> u16 {
        self.0 % 60
    }

    pub fn to_naive_time(&self) -> NaiveTime {
        // Always in range, the constructors guard it
        NaiveTime::from_hms_opt(self.hour() as u32, self.minute() as u32, 0)
            .unwrap_or(NaiveTime::MIN)
    }
}

impl FromStr for TimeOfDay {
    type Err = TimingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || TimingError::InvalidTimeOfDay {
            value: s.to_string(),
        };
        let captures = HM_REGEX.captures(s.trim()).ok_or_else(invalid)?;
        let hour: u16 = captures[1].parse().map_err(|_| invalid())?;
        let minute: u16 = captures[2].parse().map_err(|_| invalid())?;
        Self::from_hm(hour, minute).map_err(|_| invalid())
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl Serialize for TimeOfDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimeOfDay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
