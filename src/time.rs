// src/time.rs
//! UTC timestamp parsing/formatting with microsecond precision

use crate::error::{Result, TrackError};
use crate::geo::PathTime;
use chrono::{DateTime, Duration, NaiveDateTime, Utc};

const DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";
const DATE_TIME_LEN: usize = 19;

/// The Unix epoch, used as the default timestamp.
pub fn epoch() -> PathTime {
    DateTime::<Utc>::UNIX_EPOCH
}

/// Parse `YYYY-MM-DDTHH:MM:SS[.fraction][Z]` as a UTC instant.
///
/// The fraction may have any number of digits and is rounded to the
/// nearest microsecond.
pub fn parse_utc(text: &str) -> Result<PathTime> {
    let text = text.trim();

    let (head, rest) = match (text.get(..DATE_TIME_LEN), text.get(DATE_TIME_LEN..)) {
        (Some(head), Some(rest)) => (head, rest),
        _ => return Err(TrackError::Parse(format!("Timestamp too short: {:?}", text))),
    };

    let naive = NaiveDateTime::parse_from_str(head, DATE_TIME_FORMAT)
        .map_err(|e| TrackError::Parse(format!("Invalid timestamp {:?}: {}", text, e)))?;

    let rest = rest.strip_suffix('Z').unwrap_or(rest);
    let micros = if rest.is_empty() {
        0
    } else {
        parse_fraction_micros(rest)
            .ok_or_else(|| TrackError::Parse(format!("Invalid fractional seconds in {:?}", text)))?
    };

    Ok(naive.and_utc() + Duration::microseconds(micros))
}

fn parse_fraction_micros(fraction: &str) -> Option<i64> {
    let digits = fraction.strip_prefix('.')?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let seconds: f64 = format!("0.{}", digits).parse().ok()?;
    Some(((seconds + 0.0000005) * 1e6) as i64)
}

/// Canonical form, always six fractional digits and a trailing `Z`.
pub fn format_utc(time: &PathTime) -> String {
    time.format("%Y-%m-%dT%H:%M:%S%.6fZ").to_string()
}

/// Whole seconds from `start` to `end`, truncated towards zero.
pub fn duration_seconds(start: &PathTime, end: &PathTime) -> i64 {
    (*end - *start).num_seconds()
}

/// Fractional seconds from `start` to `end` at microsecond resolution.
pub fn seconds_between(start: &PathTime, end: &PathTime) -> f64 {
    (*end - *start)
        .num_microseconds()
        .map_or(f64::NAN, |us| us as f64 / 1e6)
}

/// Duration from `start` to `end` as `H:MM:SS`
pub fn duration_to_string(start: &PathTime, end: &PathTime) -> String {
    let mut secs = duration_seconds(start, end);

    let hours = secs / 3600;
    secs %= 3600;
    let minutes = secs / 60;
    let seconds = secs % 60;

    format!("{}:{:02}:{:02}", hours, minutes, seconds)
}

/// Microseconds since the Unix epoch
pub fn time_to_us(time: &PathTime) -> i64 {
    time.timestamp_micros()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_format() {
        let cases = [
            ("2022-05-07T15:43:15.999999Z", "2022-05-07T15:43:15.999999Z"),
            ("2022-05-07T15:43:15.000000Z", "2022-05-07T15:43:15.000000Z"),
            ("2022-05-07T15:43:15.000001Z", "2022-05-07T15:43:15.000001Z"),
            ("2022-05-07T15:43:15.001Z", "2022-05-07T15:43:15.001000Z"),
            ("2022-05-07T15:43:15Z", "2022-05-07T15:43:15.000000Z"),
            ("2022-05-07T15:43:15.100015", "2022-05-07T15:43:15.100015Z"),
            ("2022-05-07T15:43:15", "2022-05-07T15:43:15.000000Z"),
        ];

        for (input, expected) in cases {
            let time = parse_utc(input).unwrap();
            assert_eq!(format_utc(&time), expected, "input {}", input);
        }
    }

    #[test]
    fn test_fraction_rounds_to_nearest_microsecond() {
        let time = parse_utc("2022-05-07T15:43:15.1234567Z").unwrap();
        assert_eq!(format_utc(&time), "2022-05-07T15:43:15.123457Z");

        let time = parse_utc("2022-05-07T15:43:15.9999996Z").unwrap();
        assert_eq!(format_utc(&time), "2022-05-07T15:43:16.000000Z");
    }

    #[test]
    fn test_round_trip_is_stable() {
        let samples = [
            "1970-01-01T00:00:00.000000Z",
            "2022-05-07T10:20:06.433000Z",
            "2025-11-15T17:08:05.052000Z",
            "1999-12-31T23:59:59.999999Z",
        ];
        for text in samples {
            let once = format_utc(&parse_utc(text).unwrap());
            let twice = format_utc(&parse_utc(&once).unwrap());
            assert_eq!(once, text);
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_utc("").is_err());
        assert!(parse_utc("not a time at all!!").is_err());
        assert!(parse_utc("2022-05-07T15:43:15,5Z").is_err());
        assert!(parse_utc("2022-05-07T15:43:15.Z").is_err());
    }

    #[test]
    fn test_durations() {
        let start = parse_utc("2022-05-07T10:20:06.433Z").unwrap();
        let end = parse_utc("2022-05-07T15:43:38.000Z").unwrap();
        assert_eq!(duration_seconds(&start, &end), 19411);
        assert_eq!(duration_to_string(&start, &end), "5:23:31");
        assert!((seconds_between(&start, &end) - 19411.567).abs() < 1e-6);
    }

    #[test]
    fn test_duration_truncates() {
        let start = parse_utc("2022-05-07T10:20:00.000Z").unwrap();
        let end = parse_utc("2022-05-07T10:20:01.999Z").unwrap();
        assert_eq!(duration_seconds(&start, &end), 1);
        assert_eq!(duration_seconds(&end, &start), -1);
    }

    #[test]
    fn test_epoch() {
        assert_eq!(time_to_us(&epoch()), 0);
        assert_eq!(format_utc(&epoch()), "1970-01-01T00:00:00.000000Z");
    }
}
