use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Bucket size requested from the usage endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UsagePeriod {
    Hour,
    Day,
}

impl UsagePeriod {
    pub fn as_str(&self) -> &'static str {
        match self {
            UsagePeriod::Hour => "hour",
            UsagePeriod::Day => "day",
        }
    }
}

/// Usage chart window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeRange {
    #[serde(rename = "12h")]
    H12,
    #[serde(rename = "24h")]
    H24,
    #[serde(rename = "7d")]
    D7,
    #[serde(rename = "30d")]
    D30,
    #[serde(rename = "90d")]
    D90,
}

impl TimeRange {
    pub fn all() -> [TimeRange; 5] {
        [
            TimeRange::H12,
            TimeRange::H24,
            TimeRange::D7,
            TimeRange::D30,
            TimeRange::D90,
        ]
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "12h" => Some(TimeRange::H12),
            "24h" => Some(TimeRange::H24),
            "7d" => Some(TimeRange::D7),
            "30d" => Some(TimeRange::D30),
            "90d" => Some(TimeRange::D90),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TimeRange::H12 => "12h",
            TimeRange::H24 => "24h",
            TimeRange::D7 => "7d",
            TimeRange::D30 => "30d",
            TimeRange::D90 => "90d",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            TimeRange::H12 => TimeRange::H24,
            TimeRange::H24 => TimeRange::D7,
            TimeRange::D7 => TimeRange::D30,
            TimeRange::D30 => TimeRange::D90,
            TimeRange::D90 => TimeRange::H12,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            TimeRange::H12 => TimeRange::D90,
            TimeRange::H24 => TimeRange::H12,
            TimeRange::D7 => TimeRange::H24,
            TimeRange::D30 => TimeRange::D7,
            TimeRange::D90 => TimeRange::D30,
        }
    }

    pub fn period(&self) -> UsagePeriod {
        match self {
            TimeRange::H12 | TimeRange::H24 => UsagePeriod::Hour,
            _ => UsagePeriod::Day,
        }
    }

    pub fn span(&self) -> Duration {
        match self {
            TimeRange::H12 => Duration::hours(12),
            TimeRange::H24 => Duration::hours(24),
            TimeRange::D7 => Duration::days(7),
            TimeRange::D30 => Duration::days(30),
            TimeRange::D90 => Duration::days(90),
        }
    }

    /// Request window ending at `now`
    pub fn window(&self, now: DateTime<Utc>) -> (DateTime<Utc>, UsagePeriod) {
        (now - self.span(), self.period())
    }
}

impl Default for TimeRange {
    fn default() -> Self {
        TimeRange::D7
    }
}
