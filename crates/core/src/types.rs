use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};

/// Record identifiers are assigned by the record store.
pub type GameId = i64;

/// All timestamps are UTC.
pub type Timestamp = DateTime<Utc>;

/// Naive formats the record store has been seen to emit besides RFC 3339.
const NAIVE_DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Parse a timestamp string stored on a record.
///
/// Accepts RFC 3339 (`2023-01-02T10:00:00.000Z`), naive date-times
/// (interpreted as UTC) and plain dates (`2023-01-02`, midnight UTC).
/// Anything else yields `None` so callers can treat it as absent.
pub fn parse_timestamp(raw: &str) -> Option<Timestamp> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    for fmt in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Format a timestamp the way browsers' `Date.toISOString()` does.
pub fn format_timestamp(ts: &Timestamp) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Current time, formatted for storage on a record.
pub fn now_timestamp() -> String {
    format_timestamp(&Utc::now())
}
