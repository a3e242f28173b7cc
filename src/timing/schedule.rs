use chrono::Weekday;
use serde::{ser::SerializeMap, Deserialize, Serialize, Serializer};

use crate::error::TimingError;

use super::daily::{DaySchedule, RawDaySchedule};

/// Weekday keys in station records, Monday first.
pub const DAY_NAMES: [&str; 7] = [
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
    "sunday",
];

pub fn day_name(weekday: Weekday) -> &'static str {
    DAY_NAMES[weekday.num_days_from_monday() as usize]
}

/// A station's opening hours exactly as stored, before validation.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct RawWeeklySchedule {
    #[serde(default, rename = "is24Hours")]
    pub is_24_hours: bool,
    #[serde(default)]
    pub monday: Option<RawDaySchedule>,
    #[serde(default)]
    pub tuesday: Option<RawDaySchedule>,
    #[serde(default)]
    pub wednesday: Option<RawDaySchedule>,
    #[serde(default)]
    pub thursday: Option<RawDaySchedule>,
    #[serde(default)]
    pub friday: Option<RawDaySchedule>,
    #[serde(default)]
    pub saturday: Option<RawDaySchedule>,
    #[serde(default)]
    pub sunday: Option<RawDaySchedule>,
}

impl RawWeeklySchedule {
    fn days(&self) -> [Option<&RawDaySchedule>; 7] {
        [
            self.monday.as_ref(),
            self.tuesday.as_ref(),
            self.wednesday.as_ref(),
            self.thursday.as_ref(),
            self.friday.as_ref(),
            self.saturday.as_ref(),
            self.sunday.as_ref(),
        ]
    }
}

/// Validated weekly opening hours of a station.
///
/// A value of this type always has all seven days with well-formed times,
/// so lookups never fail. Build one with [`WeeklySchedule::from_json`],
/// by deserializing, or from already-validated [`DaySchedule`]s.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawWeeklySchedule")]
pub struct WeeklySchedule {
    is_24_hours: bool,
    timings: [DaySchedule; 7],
}

impl WeeklySchedule {
    /// `timings` is Monday first.
    pub fn new(timings: [DaySchedule; 7]) -> Self {
        Self {
            is_24_hours: false,
            timings,
        }
    }

    pub fn new_24_hours() -> Self {
        Self {
            is_24_hours: true,
            timings: [DaySchedule::new_closed(); 7],
        }
    }

    pub fn all_closed() -> Self {
        Self::new([DaySchedule::new_closed(); 7])
    }

    pub fn from_json(json: &str) -> Result<Self, TimingError> {
        let raw: RawWeeklySchedule = serde_json::from_str(json)?;
        Self::try_from(raw)
    }

    pub fn with_day(mut self, weekday: Weekday, timing: DaySchedule) -> Self {
        self.timings[weekday.num_days_from_monday() as usize] = timing;
        self
    }

    pub fn with_24_hours(mut self, is_24_hours: bool) -> Self {
        self.is_24_hours = is_24_hours;
        self
    }

    pub fn is_24_hours(&self) -> bool {
        self.is_24_hours
    }

    pub fn day(&self, weekday: Weekday) -> &DaySchedule {
        &self.timings[weekday.num_days_from_monday() as usize]
    }

    pub fn is_closed_every_day(&self) -> bool {
        !self.is_24_hours && self.timings.iter().all(DaySchedule::closed)
    }
}

impl TryFrom<RawWeeklySchedule> for WeeklySchedule {
    type Error = TimingError;

    fn try_from(raw: RawWeeklySchedule) -> Result<Self, Self::Error> {
        if raw.is_24_hours {
            return Ok(Self::new_24_hours());
        }
        let mut timings = [DaySchedule::new_closed(); 7];
        for (index, day) in raw.days().into_iter().enumerate() {
            let name = DAY_NAMES[index];
            let day = day.ok_or(TimingError::MissingDay(name))?;
            timings[index] = DaySchedule::from_raw(name, day)?;
        }
        Ok(Self::new(timings))
    }
}

impl Serialize for WeeklySchedule {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(8))?;
        map.serialize_entry("is24Hours", &self.is_24_hours)?;
        for (name, timing) in DAY_NAMES.iter().zip(self.timings.iter()) {
            map.serialize_entry(name, timing)?;
        }
        map.end()
    }
}
