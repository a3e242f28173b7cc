use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::TimingError;

use super::time_of_day::TimeOfDay;

/// One weekday's hours as they appear on a station record.
///
/// Times stay as raw strings here; [`DaySchedule::from_raw`] validates them.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct RawDaySchedule {
    #[serde(default)]
    pub closed: bool,
    #[serde(default)]
    pub open: Option<String>,
    #[serde(default)]
    pub close: Option<String>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DaySchedule {
    closed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    open: Option<TimeOfDay>,
    #[serde(skip_serializing_if = "Option::is_none")]
    close: Option<TimeOfDay>,
}

impl DaySchedule {
    pub fn new_open(opening: TimeOfDay, closing: TimeOfDay) -> Self {
        Self {
            closed: false,
            open: Some(opening),
            close: Some(closing),
        }
    }

    pub fn new_closed() -> Self {
        Self {
            closed: true,
            open: None,
            close: None,
        }
    }

    /// Validates one day of a station record. Times on a closed day are ignored.
    pub fn from_raw(day: &'static str, raw: &RawDaySchedule) -> Result<Self, TimingError> {
        if raw.closed {
            return Ok(Self::new_closed());
        }
        let opening = Self::parse_field(day, "open", raw.open.as_deref())?;
        let closing = Self::parse_field(day, "close", raw.close.as_deref())?;
        if opening > closing {
            // Overnight hours are not supported, this day will never report open
            tracing::warn!(
                day,
                open = %opening,
                close = %closing,
                "opening time is after closing time"
            );
        }
        Ok(Self::new_open(opening, closing))
    }

    fn parse_field(
        day: &'static str,
        field: &'static str,
        value: Option<&str>,
    ) -> Result<TimeOfDay, TimingError> {
        match value.map(str::trim) {
            None | Some("") => Err(TimingError::MissingTime { day, field }),
            Some(value) => value.parse(),
        }
    }

    pub fn closed(&self) -> bool {
        self.closed
    }

    pub fn opening(&self) -> Option<TimeOfDay> {
        self.open
    }

    pub fn closing(&self) -> Option<TimeOfDay> {
        self.close
    }

    /// `(opening, closing)` for a day that operates, `None` when closed.
    pub fn hours(&self) -> Option<(TimeOfDay, TimeOfDay)> {
        if self.closed {
            return None;
        }
        Some((self.open?, self.close?))
    }

    pub fn contains(&self, time: TimeOfDay) -> bool {
        match self.hours() {
            Some((opening, closing)) => opening <= time && time <= closing,
            None => false,
        }
    }

    pub fn opening_on(&self, date: NaiveDate) -> Option<NaiveDateTime> {
        self.hours()
            .map(|(opening, _)| date.and_time(opening.to_naive_time()))
    }

    pub fn closing_on(&self, date: NaiveDate) -> Option<NaiveDateTime> {
        self.hours()
            .map(|(_, closing)| date.and_time(closing.to_naive_time()))
    }
}
