// Time helpers - report timestamps and ISO-8601 durations

use chrono::{DateTime, NaiveDateTime, TimeDelta, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

static DURATION_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(DURATION_PATTERN).expect("invalid duration regex"));

/// ISO-8601 duration without calendar-relative parts: PnW, PnD, PTnHnMn.nS
const DURATION_PATTERN: &str =
    r"^P(?:(\d+)W)?(?:(\d+)D)?(?:T(?:(\d+)H)?(?:(\d+)M)?(\d+(?:\.\d+)?S)?)?$";

/// Naive layouts accepted after an optional `Z` / ` UTC` suffix is removed
const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

pub fn now() -> DateTime<Utc> {
    Utc::now()
}

/// Parse a report timestamp. Values without an offset are taken as UTC.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.with_timezone(&Utc));
    }

    let naive = value
        .strip_suffix(" UTC")
        .or_else(|| value.strip_suffix('Z'))
        .unwrap_or(value);

    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(naive, format).ok())
        .map(|dt| dt.and_utc())
}

/// Parse an ISO-8601 duration literal such as `PT1M23.456S`.
///
/// Year and month designators are rejected since they have no fixed length.
pub fn parse_iso8601_duration(value: &str) -> Option<TimeDelta> {
    let value = value.trim();
    if value.ends_with('T') {
        return None;
    }

    let caps = DURATION_REGEX.captures(value)?;
    if caps.iter().skip(1).all(|c| c.is_none()) {
        return None;
    }

    let int = |idx: usize| -> Option<i64> {
        caps.get(idx)
            .map_or(Some(0), |m| m.as_str().parse::<i64>().ok())
    };
    let seconds: f64 = match caps.get(5) {
        Some(m) => m.as_str().trim_end_matches('S').parse().ok()?,
        None => 0.0,
    };

    let whole_seconds = int(1)?
        .checked_mul(7)?
        .checked_add(int(2)?)?
        .checked_mul(24)?
        .checked_add(int(3)?)?
        .checked_mul(60)?
        .checked_add(int(4)?)?
        .checked_mul(60)?;
    let millis = whole_seconds
        .checked_mul(1000)?
        .checked_add((seconds * 1000.0).round() as i64)?;

    TimeDelta::try_milliseconds(millis)
}

/// Human-readable duration, e.g. `2m 3.5s` or `850ms`
pub fn format_duration(duration: TimeDelta) -> String {
    let total_ms = duration.num_milliseconds().max(0);
    if total_ms < 1000 {
        return format!("{}ms", total_ms);
    }

    let hours = total_ms / 3_600_000;
    let minutes = (total_ms / 60_000) % 60;
    let seconds = (total_ms % 60_000) as f64 / 1000.0;

    let mut parts = Vec::new();
    if hours > 0 {
        parts.push(format!("{}h", hours));
    }
    if minutes > 0 {
        parts.push(format!("{}m", minutes));
    }
    parts.push(format!("{:.1}s", seconds));
    parts.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_parse_timestamp_rfc3339() {
        let ts = parse_timestamp("2024-03-12T10:15:30.250+01:00").unwrap();
        assert_eq!(ts.hour(), 9);
        assert_eq!(ts.timestamp_subsec_millis(), 250);
    }

    #[test]
    fn test_parse_timestamp_zulu_and_naive() {
        let zulu = parse_timestamp("2024-03-12T10:15:30Z").unwrap();
        let naive = parse_timestamp("2024-03-12T10:15:30").unwrap();
        let utc_suffix = parse_timestamp("2024-03-12T10:15:30 UTC").unwrap();
        assert_eq!(zulu, naive);
        assert_eq!(zulu, utc_suffix);
        assert_eq!(zulu.year(), 2024);
    }

    #[test]
    fn test_parse_timestamp_invalid() {
        assert!(parse_timestamp("yesterday").is_none());
        assert!(parse_timestamp("").is_none());
    }

    #[test]
    fn test_parse_duration_seconds() {
        let d = parse_iso8601_duration("PT1M23.456S").unwrap();
        assert_eq!(d.num_milliseconds(), 83_456);
    }

    #[test]
    fn test_parse_duration_days_and_hours() {
        let d = parse_iso8601_duration("P1DT2H").unwrap();
        assert_eq!(d.num_hours(), 26);
        let w = parse_iso8601_duration("P2W").unwrap();
        assert_eq!(w.num_days(), 14);
    }

    #[test]
    fn test_parse_duration_rejects_garbage() {
        assert!(parse_iso8601_duration("P").is_none());
        assert!(parse_iso8601_duration("PT").is_none());
        assert!(parse_iso8601_duration("P1Y").is_none());
        assert!(parse_iso8601_duration("10 seconds").is_none());
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(TimeDelta::milliseconds(850)), "850ms");
        assert_eq!(format_duration(TimeDelta::milliseconds(123_500)), "2m 3.5s");
        assert_eq!(
            format_duration(TimeDelta::milliseconds(3_600_000 + 1_000)),
            "1h 1.0s"
        );
    }
}
