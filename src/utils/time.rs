//! Time utilities: UTC storage format, parsing, duration formatting.

use crate::errors::{AppError, AppResult};
use chrono::{DateTime, SecondsFormat, Utc};

/// Canonical storage format: RFC 3339 UTC with fixed microsecond precision,
/// so TEXT ordering in SQLite matches chronological ordering.
pub fn fmt_utc(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub fn parse_utc(s: &str) -> AppResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| AppError::InvalidTimestamp(s.to_string()))
}

/// Human form of a second count: "7h 32m 10s", "-12s" for anomalies.
pub fn format_seconds(secs: i64) -> String {
    let sign = if secs < 0 { "-" } else { "" };
    let s = secs.abs();
    let (h, m, r) = (s / 3600, (s % 3600) / 60, s % 60);
    if h > 0 {
        format!("{sign}{h}h {m:02}m {r:02}s")
    } else if m > 0 {
        format!("{sign}{m}m {r:02}s")
    } else {
        format!("{sign}{r}s")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn storage_format_round_trips() {
        let ts = Utc.with_ymd_and_hms(2025, 9, 24, 11, 34, 22).unwrap();
        let s = fmt_utc(ts);
        assert_eq!(parse_utc(&s).unwrap(), ts);
    }

    #[test]
    fn storage_format_sorts_lexicographically() {
        let a = Utc.with_ymd_and_hms(2025, 9, 24, 11, 34, 22).unwrap();
        let b = a + chrono::Duration::milliseconds(200);
        assert!(fmt_utc(a) < fmt_utc(b));
    }

    #[test]
    fn format_seconds_handles_negative() {
        assert_eq!(format_seconds(-12), "-12s");
        assert_eq!(format_seconds(6), "6s");
        assert_eq!(format_seconds(3 * 3600 + 62), "3h 01m 02s");
    }
}
