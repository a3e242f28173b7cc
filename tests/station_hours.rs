use chrono::{NaiveDate, NaiveDateTime};
use station_timing::{
    format_for_display, is_open, nearest_availability, parse_instant, ClosedReason, Direction,
    ResolverConfig, TimingError, TimingResolver, WeeklySchedule,
};

const CITY_CENTRE: &str = r#"{
    "is24Hours": false,
    "monday":    { "closed": false, "open": "08:00", "close": "20:00" },
    "tuesday":   { "closed": false, "open": "08:00", "close": "20:00" },
    "wednesday": { "closed": false, "open": "08:00", "close": "20:00" },
    "thursday":  { "closed": false, "open": "08:00", "close": "20:00" },
    "friday":    { "closed": false, "open": "08:00", "close": "22:00" },
    "saturday":  { "closed": false, "open": "10:00", "close": "18:00" },
    "sunday":    { "closed": true }
}"#;

fn at(day: u32, hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 10, day)
        .unwrap()
        .and_hms_opt(hour, minute, 0)
        .unwrap()
}

#[test]
fn sunday_request_is_rejected_with_suggestions() {
    let schedule = WeeklySchedule::from_json(CITY_CENTRE).unwrap();
    let requested = parse_instant("2026-10-25T12:00").unwrap();
    let now = at(23, 9, 0);

    let result = nearest_availability(requested, &schedule, now, 7);
    assert!(!result.is_valid);
    assert_eq!(result.status.reason, Some(ClosedReason::ClosedOnDay));
    assert_eq!(result.status.day_name, Some("sunday"));

    // Saturday 18:00 is 18h back, Monday 08:00 is 20h ahead
    let directions: Vec<Direction> = result.suggestions.iter().map(|c| c.direction).collect();
    assert_eq!(directions, vec![Direction::Before, Direction::After]);
    assert_eq!(result.suggestions[0].instant, at(24, 18, 0));
    assert_eq!(result.suggestions[1].instant, at(26, 8, 0));

    assert_eq!(
        format_for_display(result.suggestions[0].instant),
        "Saturday, 24 October 2026 at 6:00 PM"
    );
}

#[test]
fn friday_late_opening_is_honoured() {
    let schedule = WeeklySchedule::from_json(CITY_CENTRE).unwrap();
    assert!(is_open(at(23, 21, 30), &schedule).is_open);
    assert!(!is_open(at(22, 21, 30), &schedule).is_open);
}

#[test]
fn broken_station_record_fails_fast() {
    let without_sunday = CITY_CENTRE.replace(r#""sunday":    { "closed": true }"#, r#""extra": 1"#);
    assert!(matches!(
        WeeklySchedule::from_json(&without_sunday),
        Err(TimingError::MissingDay("sunday"))
    ));
}

#[test]
fn resolver_validates_a_booking_end_to_end() {
    let resolver = TimingResolver::new(
        ResolverConfig::from_config(r#"{ "displayFormat": "%a %H:%M" }"#).unwrap(),
    );
    let schedule = WeeklySchedule::from_json(CITY_CENTRE).unwrap();

    let check = resolver
        .validate_booking(at(24, 11, 0), at(25, 11, 0), &schedule, at(23, 9, 0))
        .unwrap();
    assert!(check.drop_off.is_valid);
    assert!(!check.pick_up.is_valid);

    let best = check.pick_up.best().unwrap();
    assert_eq!(resolver.format_for_display(best.instant), "Sat 18:00");

    let value = serde_json::to_value(&check).unwrap();
    assert_eq!(value["pickUp"]["reason"], "closed on this day");
    assert_eq!(value["dropOff"]["isValid"], true);
}

#[test]
fn twenty_four_hour_station_accepts_anything() {
    let schedule = WeeklySchedule::from_json(r#"{ "is24Hours": true }"#).unwrap();
    let result = nearest_availability(at(25, 3, 0), &schedule, at(20, 0, 0), 7);
    assert!(result.is_valid);
    assert!(result.suggestions.is_empty());
}
