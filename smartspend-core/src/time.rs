//! Time utilities: timestamp parsing and time-zone aware "now".

use anyhow::Result;
use chrono::{DateTime, NaiveDate, SecondsFormat, TimeZone, Utc};
use chrono_tz::Tz;

/// Parse an IANA time zone name like "Asia/Kolkata".
pub fn parse_timezone(tz: &str) -> Result<Tz> {
    tz.trim()
        .parse::<Tz>()
        .map_err(|_| anyhow::anyhow!("invalid timezone: {tz}"))
}

/// Parse a stored timestamp into UTC.
///
/// Accepts RFC 3339 (what clients write, e.g. `2024-01-01T10:00:00.000Z`) and
/// bare `YYYY-MM-DD` dates, which are read as midnight UTC.
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|ndt| Utc.from_utc_datetime(&ndt))
}

/// Parse an explicit "now" override (RFC 3339 or `YYYY-MM-DD`) into `tz`.
pub fn parse_now(s: &str, tz: Tz) -> Result<DateTime<Tz>> {
    parse_timestamp(s)
        .map(|dt| dt.with_timezone(&tz))
        .ok_or_else(|| anyhow::anyhow!("invalid timestamp '{s}' (expected RFC 3339 or YYYY-MM-DD)"))
}

/// The current instant, expressed in `tz`.
pub fn now_in(tz: Tz) -> DateTime<Tz> {
    Utc::now().with_timezone(&tz)
}

/// Format a UTC time the way records are stored (millisecond RFC 3339, `Z`).
pub fn to_rfc3339_utc(dt: DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rfc3339_with_millis() {
        let dt = parse_timestamp("2024-01-01T10:30:00.000Z").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2024, 1, 1, 10, 30, 0).unwrap());
    }

    #[test]
    fn test_parse_offset_normalizes_to_utc() {
        let dt = parse_timestamp("2024-01-01T05:30:00+05:30").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_bare_date_is_utc_midnight() {
        let dt = parse_timestamp("2024-02-01").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_timestamp("").is_none());
        assert!(parse_timestamp("yesterday").is_none());
        assert!(parse_timestamp("2024-13-01").is_none());
    }

    #[test]
    fn test_parse_timezone() {
        assert_eq!(parse_timezone("Asia/Kolkata").unwrap(), chrono_tz::Asia::Kolkata);
        assert!(parse_timezone("Mars/Olympus").is_err());
    }

    #[test]
    fn test_rfc3339_round_trip_format() {
        let dt = Utc.with_ymd_and_hms(2026, 2, 20, 23, 59, 0).unwrap();
        assert_eq!(to_rfc3339_utc(dt), "2026-02-20T23:59:00.000Z");
    }
}
