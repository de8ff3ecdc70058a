use chrono::{DateTime, Utc};

use super::timestamp::Timestamp;
use crate::i18n::Translate;

const MINUTE: u64 = 60;
const HOUR: u64 = 60 * MINUTE;
const DAY: u64 = 24 * HOUR;
const MONTH: u64 = 30 * DAY;
const YEAR: u64 = 365 * DAY;

/// Seconds within which a last-online stamp counts as online
const ONLINE_WINDOW_SECS: i64 = 60;

/// A span cut into calendar-ish units (365-day years, 30-day months)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Breakdown {
    pub years: u64,
    pub months: u64,
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl Breakdown {
    pub fn from_seconds(total: u64) -> Self {
        let mut rest = total;
        let years = rest / YEAR;
        rest %= YEAR;
        let months = rest / MONTH;
        rest %= MONTH;
        let days = rest / DAY;
        rest %= DAY;
        let hours = rest / HOUR;
        rest %= HOUR;
        let minutes = rest / MINUTE;
        let seconds = rest % MINUTE;

        Self {
            years,
            months,
            days,
            hours,
            minutes,
            seconds,
        }
    }

    pub fn between(from: DateTime<Utc>, to: DateTime<Utc>) -> Self {
        Self::from_seconds((to - from).num_seconds().unsigned_abs())
    }
}

/// "3 days" / "1 day", units looked up through `t`
fn unit_text<T: Translate + ?Sized>(count: u64, singular: &str, plural: &str, t: &T) -> String {
    let key = if count == 1 { singular } else { plural };
    format!("{} {}", count, t.t(&format!("time.{}", key)))
}

/// Expiry line shown on the status card
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExpiryInfo {
    pub status: String,
    pub time: String,
    pub is_expired: bool,
}

/// Relative expiry: the coarsest whole unit only (years, else months, else
/// days), falling back to hours and then minutes.
pub fn format_relative_expiry<T: Translate + ?Sized>(
    expire: Option<&Timestamp>,
    now: DateTime<Utc>,
    t: &T,
) -> ExpiryInfo {
    let Some(target) = expire.and_then(Timestamp::to_utc) else {
        return ExpiryInfo {
            status: "∞".to_string(),
            time: t.t("userInfo.unlimited"),
            is_expired: false,
        };
    };

    let is_after = target > now;
    let span = Breakdown::between(now, target);
    let mut slots = Vec::new();

    if span.years > 0 {
        slots.push(unit_text(span.years, "year", "years", t));
    } else if span.months > 0 {
        slots.push(unit_text(span.months, "month", "months", t));
    } else if span.days > 0 {
        slots.push(unit_text(span.days, "day", "days", t));
    } else if span.hours > 0 {
        slots.push(unit_text(span.hours, "hour", "hours", t));
    } else if span.minutes > 0 {
        slots.push(unit_text(span.minutes, "min", "mins", t));
    }

    let mut time = slots.join(", ");
    if !is_after {
        time = format!("{} {}", time, t.t("time.ago")).trim().to_string();
    }

    ExpiryInfo {
        status: if is_after { t.t("expires") } else { t.t("expired") },
        time,
        is_expired: !is_after,
    }
}

/// Remaining time of an on-hold subscription
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OnHoldDuration {
    pub days: u64,
    pub hours: u64,
}

impl OnHoldDuration {
    /// `None` for an absent or zero duration
    pub fn from_seconds(seconds: Option<u64>) -> Option<Self> {
        let seconds = seconds.filter(|s| *s > 0)?;
        Some(Self {
            days: seconds / DAY,
            hours: (seconds % DAY) / HOUR,
        })
    }

    /// Days plus hours while under a month, otherwise the coarser unit.
    pub fn long_text<T: Translate + ?Sized>(&self, t: &T) -> String {
        if self.days > 0 {
            let mut text = unit_text(self.days, "day", "days", t);
            if self.hours > 0 && self.days < 30 {
                text.push(' ');
                text.push_str(&unit_text(self.hours, "hour", "hours", t));
            }
            text
        } else if self.hours > 0 {
            unit_text(self.hours, "hour", "hours", t)
        } else {
            String::new()
        }
    }

    /// Coarsest unit only
    pub fn short_text<T: Translate + ?Sized>(&self, t: &T) -> String {
        if self.days > 0 {
            unit_text(self.days, "day", "days", t)
        } else if self.hours > 0 {
            unit_text(self.hours, "hour", "hours", t)
        } else {
            "∞".to_string()
        }
    }
}

/// Short on-hold duration text; `∞` when no duration is set.
pub fn format_on_hold_duration<T: Translate + ?Sized>(seconds: Option<u64>, t: &T) -> String {
    OnHoldDuration::from_seconds(seconds)
        .map(|duration| duration.short_text(t))
        .unwrap_or_else(|| "∞".to_string())
}

/// Expiry line for an on-hold subscription
pub fn on_hold_expiry<T: Translate + ?Sized>(seconds: Option<u64>, t: &T) -> ExpiryInfo {
    ExpiryInfo {
        status: t.t("userInfo.available"),
        time: OnHoldDuration::from_seconds(seconds)
            .map(|duration| duration.long_text(t))
            .unwrap_or_default(),
        is_expired: false,
    }
}

/// Online badge text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LastSeen {
    pub text: String,
    pub is_online: bool,
}

/// "Online" within a minute of `now`, otherwise one unit of elapsed time.
pub fn format_time_ago<T: Translate + ?Sized>(
    online_at: Option<&Timestamp>,
    now: DateTime<Utc>,
    t: &T,
) -> LastSeen {
    let Some(last_online) = online_at.and_then(Timestamp::to_utc) else {
        return LastSeen {
            text: t.t("notConnectedYet"),
            is_online: false,
        };
    };

    if (now - last_online).num_seconds().abs() <= ONLINE_WINDOW_SECS {
        return LastSeen {
            text: t.t("online"),
            is_online: true,
        };
    }

    let span = Breakdown::between(last_online, now);
    let amount = if span.years > 0 {
        unit_text(span.years, "year", "years", t)
    } else if span.months > 0 {
        unit_text(span.months, "month", "months", t)
    } else if span.days > 0 {
        unit_text(span.days, "day", "days", t)
    } else if span.hours > 0 {
        unit_text(span.hours, "hour", "hours", t)
    } else if span.minutes > 0 {
        unit_text(span.minutes, "min", "mins", t)
    } else {
        unit_text(span.seconds, "second", "seconds", t)
    };

    LastSeen {
        text: format!("{} {}", amount, t.t("time.ago")),
        is_online: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::Locale;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    fn at(dt: DateTime<Utc>) -> Timestamp {
        Timestamp::from(dt)
    }

    #[test]
    fn test_breakdown_cascade() {
        let span = Breakdown::from_seconds(400 * DAY + 5 * HOUR);
        assert_eq!(span.years, 1);
        assert_eq!(span.months, 1);
        assert_eq!(span.days, 5);
        assert_eq!(span.hours, 5);
    }

    #[test]
    fn test_expiry_far_future_shows_years_only() {
        let expire = at(now() + Duration::days(400));
        let info = format_relative_expiry(Some(&expire), now(), &Locale::En);

        assert_eq!(info.time, "1 year");
        assert_eq!(info.status, "Expires in");
        assert!(!info.is_expired);
    }

    #[test]
    fn test_expiry_months_and_days() {
        let expire = at(now() + Duration::days(65));
        let info = format_relative_expiry(Some(&expire), now(), &Locale::En);
        assert_eq!(info.time, "2 months");

        let expire = at(now() + Duration::days(1) + Duration::hours(3));
        let info = format_relative_expiry(Some(&expire), now(), &Locale::En);
        assert_eq!(info.time, "1 day");
    }

    #[test]
    fn test_expiry_hours_then_minutes() {
        let expire = at(now() + Duration::hours(5) + Duration::minutes(20));
        let info = format_relative_expiry(Some(&expire), now(), &Locale::En);
        assert_eq!(info.time, "5 hours");

        let expire = at(now() + Duration::minutes(1));
        let info = format_relative_expiry(Some(&expire), now(), &Locale::En);
        assert_eq!(info.time, "1 min");
    }

    #[test]
    fn test_expiry_in_the_past() {
        let expire = at(now() - Duration::hours(2));
        let info = format_relative_expiry(Some(&expire), now(), &Locale::En);

        assert!(info.is_expired);
        assert_eq!(info.status, "Expired");
        assert!(info.time.ends_with("ago"));
        assert_eq!(info.time, "2 hours ago");
    }

    #[test]
    fn test_expiry_unlimited() {
        let info = format_relative_expiry(None, now(), &Locale::En);
        assert_eq!(info.status, "∞");
        assert_eq!(info.time, "Unlimited");
        assert!(!info.is_expired);

        let zero = Timestamp::Unix(0);
        let info = format_relative_expiry(Some(&zero), now(), &Locale::En);
        assert_eq!(info.status, "∞");
    }

    #[test]
    fn test_expiry_uses_supplied_translation() {
        let t = |key: &str| key.to_uppercase();
        let expire = at(now() + Duration::days(3));
        let info = format_relative_expiry(Some(&expire), now(), &t);
        assert_eq!(info.time, "3 TIME.DAYS");
        assert_eq!(info.status, "EXPIRES");
    }

    #[test]
    fn test_on_hold_duration() {
        assert_eq!(OnHoldDuration::from_seconds(None), None);
        assert_eq!(OnHoldDuration::from_seconds(Some(0)), None);

        let short = OnHoldDuration::from_seconds(Some(2 * DAY + 5 * HOUR)).unwrap();
        assert_eq!(short.long_text(&Locale::En), "2 days 5 hours");
        assert_eq!(short.short_text(&Locale::En), "2 days");

        let long = OnHoldDuration::from_seconds(Some(45 * DAY + 5 * HOUR)).unwrap();
        assert_eq!(long.long_text(&Locale::En), "45 days");

        let hours = OnHoldDuration::from_seconds(Some(HOUR + 10)).unwrap();
        assert_eq!(hours.long_text(&Locale::En), "1 hour");

        assert_eq!(format_on_hold_duration(None, &Locale::En), "∞");
        assert_eq!(format_on_hold_duration(Some(DAY), &Locale::En), "1 day");

        let info = on_hold_expiry(Some(3 * DAY), &Locale::En);
        assert_eq!(info.status, "Available");
        assert_eq!(info.time, "3 days");
        assert!(!info.is_expired);
    }

    #[test]
    fn test_time_ago_online_window() {
        let recent = at(now() - Duration::seconds(30));
        let seen = format_time_ago(Some(&recent), now(), &Locale::En);
        assert!(seen.is_online);
        assert_eq!(seen.text, "Online");

        let older = at(now() - Duration::seconds(90));
        let seen = format_time_ago(Some(&older), now(), &Locale::En);
        assert!(!seen.is_online);
        assert_eq!(seen.text, "1 min ago");
    }

    #[test]
    fn test_time_ago_picks_single_unit() {
        let days = at(now() - Duration::days(3) - Duration::hours(4));
        assert_eq!(
            format_time_ago(Some(&days), now(), &Locale::En).text,
            "3 days ago"
        );

        let years = at(now() - Duration::days(800));
        assert_eq!(
            format_time_ago(Some(&years), now(), &Locale::En).text,
            "2 years ago"
        );
    }

    #[test]
    fn test_time_ago_never_connected() {
        let seen = format_time_ago(None, now(), &Locale::En);
        assert!(!seen.is_online);
        assert_eq!(seen.text, "Not connected yet");
    }
}
