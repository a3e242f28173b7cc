use std::fmt;

use chrono::{Datelike, Days, NaiveDate, NaiveDateTime};
use serde::{Serialize, Serializer};

use crate::{config::ResolverConfig, error::TimingError};

use super::{
    booking::{self, BookingTimingCheck},
    display,
    local_time,
    schedule::{day_name, WeeklySchedule},
    time_of_day::TimeOfDay,
};

pub const DEFAULT_MAX_SEARCH_DAYS: u32 = 7;
/// Larger horizons are clamped to a year.
pub const MAX_SEARCH_DAYS_LIMIT: u32 = 366;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ClosedReason {
    ClosedOnDay,
    ClosedAtTime,
}

impl ClosedReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClosedReason::ClosedOnDay => "closed on this day",
            ClosedReason::ClosedAtTime => "closed at this time",
        }
    }
}

impl fmt::Display for ClosedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ClosedReason {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Whether a station is open at one instant, with the day's hours for context.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenStatus {
    pub is_open: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<ClosedReason>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub day_name: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub open_time: Option<TimeOfDay>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub close_time: Option<TimeOfDay>,
}

impl OpenStatus {
    fn always_open() -> Self {
        Self {
            is_open: true,
            reason: None,
            day_name: None,
            open_time: None,
            close_time: None,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Before,
    After,
}

impl Direction {
    pub fn label(&self) -> &'static str {
        match self {
            Direction::After => "Next available opening",
            Direction::Before => "Last available time before",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub direction: Direction,
    pub instant: NaiveDateTime,
    pub distance_ms: i64,
    pub label: String,
}

impl Candidate {
    fn new(direction: Direction, instant: NaiveDateTime, requested: NaiveDateTime) -> Self {
        Self {
            direction,
            instant,
            distance_ms: (instant - requested).num_milliseconds().abs(),
            label: direction.label().to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilitySuggestion {
    pub is_valid: bool,
    #[serde(flatten)]
    pub status: OpenStatus,
    pub suggestions: Vec<Candidate>,
}

impl AvailabilitySuggestion {
    /// The closest usable alternative, if any.
    pub fn best(&self) -> Option<&Candidate> {
        self.suggestions.first()
    }
}

/// Is the station open at `instant`?
///
/// `instant` must already be in the station's wall-clock time. Both the
/// opening and the closing minute count as open.
pub fn is_open(instant: NaiveDateTime, schedule: &WeeklySchedule) -> OpenStatus {
    if schedule.is_24_hours() {
        return OpenStatus::always_open();
    }

    let weekday = instant.weekday();
    let daily = schedule.day(weekday);
    let Some((opening, closing)) = daily.hours() else {
        return OpenStatus {
            is_open: false,
            reason: Some(ClosedReason::ClosedOnDay),
            day_name: Some(day_name(weekday)),
            open_time: None,
            close_time: None,
        };
    };

    let minute = TimeOfDay::of(&instant);
    let is_open = opening <= minute && minute <= closing;
    OpenStatus {
        is_open,
        reason: (!is_open).then_some(ClosedReason::ClosedAtTime),
        day_name: Some(day_name(weekday)),
        open_time: Some(opening),
        close_time: Some(closing),
    }
}

/// Next opening after `instant`, looking at most `max_search_days` past its date.
pub fn find_next_opening(
    instant: NaiveDateTime,
    schedule: &WeeklySchedule,
    max_search_days: u32,
) -> Option<NaiveDateTime> {
    let start = instant.date();
    for offset in 0..=max_search_days.min(MAX_SEARCH_DAYS_LIMIT) {
        let date = start.checked_add_days(Days::new(offset.into()))?;
        let Some(opening) = opening_on(schedule, date) else {
            continue;
        };
        if offset > 0 || opening > instant {
            return Some(opening);
        }
    }
    None
}

/// Most recent closing before `instant`, looking at most `max_search_days` back.
pub fn find_previous_closing(
    instant: NaiveDateTime,
    schedule: &WeeklySchedule,
    max_search_days: u32,
) -> Option<NaiveDateTime> {
    let start = instant.date();
    for offset in 0..=max_search_days.min(MAX_SEARCH_DAYS_LIMIT) {
        let date = start.checked_sub_days(Days::new(offset.into()))?;
        let Some(closing) = schedule.day(date.weekday()).closing_on(date) else {
            continue;
        };
        if offset > 0 || closing < instant {
            return Some(closing);
        }
    }
    None
}

fn opening_on(schedule: &WeeklySchedule, date: NaiveDate) -> Option<NaiveDateTime> {
    schedule.day(date.weekday()).opening_on(date)
}

/// Checks `instant` and, when the station is closed, proposes the nearest
/// opening after it and the nearest closing before it.
///
/// Candidates earlier than `now` are dropped. The result is sorted with the
/// closest candidate first; an empty list means nothing was found in range.
pub fn nearest_availability(
    instant: NaiveDateTime,
    schedule: &WeeklySchedule,
    now: NaiveDateTime,
    max_search_days: u32,
) -> AvailabilitySuggestion {
    let status = is_open(instant, schedule);
    if status.is_open {
        return AvailabilitySuggestion {
            is_valid: true,
            status,
            suggestions: Vec::new(),
        };
    }
    if schedule.is_closed_every_day() {
        tracing::debug!(%instant, "station is closed every day");
        return AvailabilitySuggestion {
            is_valid: false,
            status,
            suggestions: Vec::new(),
        };
    }

    let forward = find_next_opening(instant, schedule, max_search_days)
        .map(|at| Candidate::new(Direction::After, at, instant));
    let backward = find_previous_closing(instant, schedule, max_search_days)
        .map(|at| Candidate::new(Direction::Before, at, instant));

    let mut suggestions: Vec<Candidate> = [forward, backward]
        .into_iter()
        .flatten()
        .filter(|candidate| candidate.instant >= now)
        .collect();
    suggestions.sort_by_key(|candidate| candidate.distance_ms);

    if suggestions.is_empty() {
        tracing::debug!(
            %instant,
            max_search_days,
            "no availability found within search horizon"
        );
    }

    AvailabilitySuggestion {
        is_valid: false,
        status,
        suggestions,
    }
}

/// The operations above bound to a [`ResolverConfig`].
///
/// Holds no state besides its config and is cheap to clone into handlers.
#[derive(Clone, Debug, Default)]
pub struct TimingResolver {
    config: ResolverConfig,
}

impl TimingResolver {
    pub fn new(config: ResolverConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    pub fn is_open(&self, instant: NaiveDateTime, schedule: &WeeklySchedule) -> OpenStatus {
        is_open(instant, schedule)
    }

    pub fn nearest_availability(
        &self,
        instant: NaiveDateTime,
        schedule: &WeeklySchedule,
        now: NaiveDateTime,
    ) -> AvailabilitySuggestion {
        nearest_availability(instant, schedule, now, self.config.max_search_days)
    }

    pub fn validate_booking(
        &self,
        drop_off: NaiveDateTime,
        pick_up: NaiveDateTime,
        schedule: &WeeklySchedule,
        now: NaiveDateTime,
    ) -> Result<BookingTimingCheck, TimingError> {
        booking::validate_booking(
            drop_off,
            pick_up,
            schedule,
            now,
            self.config.max_search_days,
        )
    }

    pub fn format_for_display(&self, instant: NaiveDateTime) -> String {
        display::format_with(instant, &self.config.display_format)
    }

    /// Current wall-clock time at the configured timezone.
    pub fn now(&self) -> NaiveDateTime {
        local_time::facility_now(self.config.timezone)
    }
}
