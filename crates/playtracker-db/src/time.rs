use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Parse a timestamp column. SQLite's `CURRENT_TIMESTAMP` produces
/// `YYYY-MM-DD HH:MM:SS`; RFC 3339 is accepted too.
pub(crate) fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").map(|n| n.and_utc()))
        .ok()
}

/// Lenient form of [`parse_timestamp`] for informational columns: missing or
/// unreadable values fall back to now.
pub(crate) fn parse_datetime(value: Option<String>) -> DateTime<Utc> {
    value
        .as_deref()
        .and_then(parse_timestamp)
        .unwrap_or_else(Utc::now)
}

/// Parse a `DATE` column stored as `YYYY-MM-DD`, tolerating a time suffix.
pub(crate) fn parse_date(s: &str) -> Option<NaiveDate> {
    let day = s.get(..10).unwrap_or(s);
    NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
}
