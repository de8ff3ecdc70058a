use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Panel timestamps arrive either as ISO strings or UNIX seconds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Timestamp {
    Unix(i64),
    Text(String),
}

impl Timestamp {
    /// `0`, `"0"` and blank strings mean "not set"
    pub fn is_unset(&self) -> bool {
        match self {
            Timestamp::Unix(secs) => *secs == 0,
            Timestamp::Text(text) => {
                let text = text.trim();
                text.is_empty() || text == "0"
            }
        }
    }

    pub fn to_utc(&self) -> Option<DateTime<Utc>> {
        if self.is_unset() {
            return None;
        }
        match self {
            Timestamp::Unix(secs) => Utc.timestamp_opt(*secs, 0).single(),
            Timestamp::Text(text) => parse_timestamp(text),
        }
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(value: DateTime<Utc>) -> Self {
        Timestamp::Text(value.to_rfc3339())
    }
}

/// Parse an ISO 8601 timestamp. Strings without an offset are read as UTC;
/// all-digit strings are UNIX seconds.
pub fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if text.bytes().all(|b| b.is_ascii_digit()) {
        let secs: i64 = text.parse().ok()?;
        return Utc.timestamp_opt(secs, 0).single();
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }

    const NAIVE_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"];
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_iso_variants() {
        let expected = Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap();
        assert_eq!(parse_timestamp("2025-01-02T03:04:05Z"), Some(expected));
        assert_eq!(parse_timestamp("2025-01-02T06:34:05+03:30"), Some(expected));
        assert_eq!(parse_timestamp("2025-01-02T03:04:05"), Some(expected));
        assert_eq!(parse_timestamp("2025-01-02T03:04:05.000000"), Some(expected));
        assert_eq!(parse_timestamp("2025-01-02 03:04:05"), Some(expected));
        assert_eq!(parse_timestamp("1735787045"), Some(expected));
        assert_eq!(parse_timestamp("yesterday"), None);
    }

    #[test]
    fn test_unset_values() {
        assert!(Timestamp::Unix(0).is_unset());
        assert!(Timestamp::Text("0".into()).is_unset());
        assert!(Timestamp::Text("  ".into()).is_unset());
        assert_eq!(Timestamp::Text(String::new()).to_utc(), None);
        assert!(!Timestamp::Unix(1).is_unset());
    }

    #[test]
    fn test_deserialize_untagged() {
        let unix: Timestamp = serde_json::from_str("1700000000").unwrap();
        assert_eq!(unix, Timestamp::Unix(1_700_000_000));
        let text: Timestamp = serde_json::from_str("\"2025-01-02T03:04:05\"").unwrap();
        assert!(text.to_utc().is_some());
    }
}
