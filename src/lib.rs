//! Opening-hours checks for luggage storage stations.
//!
//! Answers whether a station is open at a requested drop-off or pick-up
//! time and, when it is not, suggests the nearest usable times around it.
//! Everything here is a pure function of a [`WeeklySchedule`] and the
//! instants passed in. Instants are the station's wall-clock time; see
//! [`timing::local_time`] for converting from UTC.

pub mod config;
pub mod error;
pub mod timing;

pub use config::ResolverConfig;
pub use error::TimingError;
pub use timing::{
    booking::{validate_booking, BookingTimingCheck},
    daily::DaySchedule,
    display::{format_for_display, parse_instant},
    resolver::{
        find_next_opening, find_previous_closing, is_open, nearest_availability,
        AvailabilitySuggestion, Candidate, ClosedReason, Direction, OpenStatus, TimingResolver,
        DEFAULT_MAX_SEARCH_DAYS,
    },
    schedule::WeeklySchedule,
    time_of_day::TimeOfDay,
};
