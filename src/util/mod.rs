use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Parses a note `createdAt` value.
///
/// Accepts RFC 3339 (what the API sends), a naive `YYYY-MM-DDTHH:MM:SS[.f]`
/// (read as UTC), or a bare `YYYY-MM-DD` (midnight UTC).
pub(crate) fn parse_created_at(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Human-readable date for note cards. Unparseable input is shown as-is.
pub(crate) fn format_created_at(raw: &str) -> String {
    match parse_created_at(raw) {
        Some(dt) => dt.format("%-d %B %Y").to_string(),
        None => raw.to_string(),
    }
}
