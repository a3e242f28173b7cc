use chrono::{DateTime, NaiveDateTime, Utc};
use chrono_tz::Tz;

use crate::error::TimingError;

pub fn parse_timezone(name: &str) -> Result<Tz, TimingError> {
    name.trim()
        .parse()
        .map_err(|_| TimingError::UnknownTimezone(name.to_string()))
}

/// Wall-clock time at a station for a UTC instant.
pub fn to_facility_time(instant: DateTime<Utc>, timezone: Tz) -> NaiveDateTime {
    instant.with_timezone(&timezone).naive_local()
}

pub fn facility_now(timezone: Tz) -> NaiveDateTime {
    to_facility_time(Utc::now(), timezone)
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, TimeZone};

    use super::*;

    #[test]
    fn parses_iana_names() {
        assert_eq!(parse_timezone("Europe/London").unwrap(), Tz::Europe__London);
        assert_eq!(parse_timezone(" UTC ").unwrap(), Tz::UTC);
        assert!(matches!(
            parse_timezone("Mars/Olympus_Mons"),
            Err(TimingError::UnknownTimezone(ref name)) if name == "Mars/Olympus_Mons"
        ));
    }

    #[test]
    fn converts_to_wall_clock() {
        let noon_utc = Utc.with_ymd_and_hms(2026, 7, 1, 12, 0, 0).unwrap();
        let expected = NaiveDate::from_ymd_opt(2026, 7, 1)
            .unwrap()
            .and_hms_opt(13, 0, 0)
            .unwrap();
        // BST in July
        assert_eq!(to_facility_time(noon_utc, Tz::Europe__London), expected);

        let winter = Utc.with_ymd_and_hms(2026, 12, 1, 12, 0, 0).unwrap();
        assert_eq!(
            to_facility_time(winter, Tz::Europe__London),
            winter.naive_utc()
        );
    }
}
