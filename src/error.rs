use thiserror::Error;

#[derive(Debug, Error)]
pub enum TimingError {
    #[error("schedule is missing a '{0}' entry")]
    MissingDay(&'static str),

    #[error("invalid time of day '{value}', expected HH:MM")]
    InvalidTimeOfDay { value: String },

    #[error("'{day}' is open but has no '{field}' time")]
    MissingTime {
        day: &'static str,
        field: &'static str,
    },

    #[error("could not decode schedule: {0}")]
    InvalidSchedule(#[from] serde_json::Error),

    #[error("invalid instant '{0}'")]
    InvalidInstant(String),

    #[error("unknown timezone '{0}'")]
    UnknownTimezone(String),

    #[error("invalid config value for {key}: {reason}")]
    InvalidConfig { key: &'static str, reason: String },

    #[error("pick-up time must be after drop-off time")]
    InvalidBookingWindow,

    #[error("drop-off time is in the past")]
    InstantInPast,
}
