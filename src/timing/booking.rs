use chrono::NaiveDateTime;
use serde::Serialize;

use crate::error::TimingError;

use super::{
    resolver::{nearest_availability, AvailabilitySuggestion},
    schedule::WeeklySchedule,
};

/// Drop-off and pick-up checked against a station's hours.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingTimingCheck {
    pub drop_off: AvailabilitySuggestion,
    pub pick_up: AvailabilitySuggestion,
}

impl BookingTimingCheck {
    pub fn is_valid(&self) -> bool {
        self.drop_off.is_valid && self.pick_up.is_valid
    }
}

/// Validates a requested booking window before it is created.
///
/// A reversed window or a drop-off in the past is an error. Times outside
/// opening hours are not: they come back with suggestions for the caller to
/// show.
pub fn validate_booking(
    drop_off: NaiveDateTime,
    pick_up: NaiveDateTime,
    schedule: &WeeklySchedule,
    now: NaiveDateTime,
    max_search_days: u32,
) -> Result<BookingTimingCheck, TimingError> {
    if pick_up <= drop_off {
        return Err(TimingError::InvalidBookingWindow);
    }
    if drop_off < now {
        return Err(TimingError::InstantInPast);
    }

    let check = BookingTimingCheck {
        drop_off: nearest_availability(drop_off, schedule, now, max_search_days),
        pick_up: nearest_availability(pick_up, schedule, now, max_search_days),
    };
    if !check.is_valid() {
        tracing::debug!(
            %drop_off,
            %pick_up,
            drop_off_open = check.drop_off.is_valid,
            pick_up_open = check.pick_up.is_valid,
            "booking falls outside station hours"
        );
    }
    Ok(check)
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, Weekday};

    use super::*;
    use crate::timing::{daily::DaySchedule, resolver::Direction};

    fn at(day: u32, hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, day)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    fn weekdays_nine_to_five() -> WeeklySchedule {
        let open = DaySchedule::new_open("09:00".parse().unwrap(), "17:00".parse().unwrap());
        WeeklySchedule::new([open; 7])
            .with_day(Weekday::Sat, DaySchedule::new_closed())
            .with_day(Weekday::Sun, DaySchedule::new_closed())
    }

    #[test]
    fn accepts_window_within_hours() {
        let check = validate_booking(
            at(20, 10, 0),
            at(22, 16, 30),
            &weekdays_nine_to_five(),
            at(19, 12, 0),
            7,
        )
        .unwrap();
        assert!(check.is_valid());
        assert!(check.drop_off.suggestions.is_empty());
        assert!(check.pick_up.suggestions.is_empty());
    }

    #[test]
    fn weekend_pick_up_gets_suggestions() {
        // Saturday 24th pick-up: Friday 17:00 is closer than Monday 09:00
        let check = validate_booking(
            at(20, 10, 0),
            at(24, 12, 0),
            &weekdays_nine_to_five(),
            at(19, 12, 0),
            7,
        )
        .unwrap();
        assert!(!check.is_valid());
        assert!(check.drop_off.is_valid);
        let best = check.pick_up.best().unwrap();
        assert_eq!(best.direction, Direction::Before);
        assert_eq!(best.instant, at(23, 17, 0));
    }

    #[test]
    fn rejects_reversed_window() {
        let result = validate_booking(
            at(21, 10, 0),
            at(21, 10, 0),
            &weekdays_nine_to_five(),
            at(19, 12, 0),
            7,
        );
        assert!(matches!(result, Err(TimingError::InvalidBookingWindow)));
    }

    #[test]
    fn rejects_drop_off_in_the_past() {
        let result = validate_booking(
            at(19, 10, 0),
            at(20, 10, 0),
            &weekdays_nine_to_five(),
            at(19, 12, 0),
            7,
        );
        assert!(matches!(result, Err(TimingError::InstantInPast)));
    }
}
