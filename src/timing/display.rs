use std::fmt::Write;

use chrono::{format::StrftimeItems, format::Item, DateTime, NaiveDateTime};

use crate::error::TimingError;

pub const ISO_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";
pub const DATETIME_LOCAL_FORMAT: &str = "%Y-%m-%dT%H:%M";
pub const DEFAULT_DISPLAY_FORMAT: &str = "%A, %-d %B %Y at %-I:%M %p";

const ACCEPTED_FORMATS: [&str; 4] = [
    ISO_FORMAT,
    DATETIME_LOCAL_FORMAT,
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// e.g. `Tuesday, 20 October 2026 at 9:00 AM`
pub fn format_for_display(instant: NaiveDateTime) -> String {
    format_with(instant, DEFAULT_DISPLAY_FORMAT)
}

/// Formats with a strftime pattern. Falls back to the default pattern when
/// `pattern` cannot render a naive time, e.g. it is malformed or asks for an
/// offset (`%z`, `%Z`).
pub fn format_with(instant: NaiveDateTime, pattern: &str) -> String {
    render(instant, pattern).unwrap_or_else(|| {
        tracing::warn!(pattern, "invalid display format, using default");
        instant.format(DEFAULT_DISPLAY_FORMAT).to_string()
    })
}

pub fn is_valid_pattern(pattern: &str) -> bool {
    StrftimeItems::new(pattern).all(|item| !matches!(item, Item::Error))
        && render(NaiveDateTime::default(), pattern).is_some()
}

fn render(instant: NaiveDateTime, pattern: &str) -> Option<String> {
    let mut rendered = String::new();
    write!(rendered, "{}", instant.format(pattern)).ok()?;
    Some(rendered)
}

/// Parses a user-requested time as sent by a form or API client.
///
/// Offsets in RFC 3339 input are kept as wall-clock time, not converted.
pub fn parse_instant(text: &str) -> Result<NaiveDateTime, TimingError> {
    let text = text.trim();
    for format in ACCEPTED_FORMATS {
        if let Ok(instant) = NaiveDateTime::parse_from_str(text, format) {
            return Ok(instant);
        }
    }
    DateTime::parse_from_rfc3339(text)
        .map(|instant| instant.naive_local())
        .map_err(|_| TimingError::InvalidInstant(text.to_string()))
}
