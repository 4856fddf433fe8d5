use chrono::{DateTime, NaiveDateTime, Utc};

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S"];

/// Parse an ISO-8601 instant as the calendar endpoints emit it.
///
/// Accepts RFC 3339 with or without fractional seconds, `Z` or an explicit
/// offset, and naive timestamps which are taken as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn accepts_common_shapes() {
        let expected = Utc.with_ymd_and_hms(2025, 11, 3, 15, 0, 0).unwrap();
        assert_eq!(parse_timestamp("2025-11-03T15:00:00Z"), Some(expected));
        assert_eq!(parse_timestamp("2025-11-03T15:00:00.000Z"), Some(expected));
        assert_eq!(parse_timestamp("2025-11-03T10:00:00-05:00"), Some(expected));
        assert_eq!(parse_timestamp("2025-11-03T15:00:00"), Some(expected));
        assert_eq!(parse_timestamp("2025-11-03T15:00:00.250").map(|t| t.timestamp()), Some(expected.timestamp()));
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(parse_timestamp("tomorrow"), None);
        assert_eq!(parse_timestamp(""), None);
    }
}
