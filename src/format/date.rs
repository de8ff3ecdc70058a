use chrono::{DateTime, Datelike, NaiveDateTime, TimeZone, Timelike};

/// How one locale renders wall-clock dates
#[derive(Debug, Clone, Copy)]
pub struct DateStrategy {
    /// Status card dates
    pub full: fn(&NaiveDateTime) -> String,
    /// Chart tooltips and summaries
    pub compact: fn(&NaiveDateTime) -> String,
    /// Chart axis labels for daily buckets
    pub day_label: fn(&NaiveDateTime) -> String,
}

const GENERIC: DateStrategy = DateStrategy {
    full: generic_full,
    compact: generic_compact,
    day_label: generic_day_label,
};

const PERSIAN: DateStrategy = DateStrategy {
    full: persian_full,
    compact: persian_compact,
    day_label: persian_day_label,
};

/// Locale tag → strategy. Tags not listed use the generic pattern.
const DATE_STRATEGIES: &[(&str, DateStrategy)] = &[("fa-IR", PERSIAN), ("fa", PERSIAN)];

pub fn strategy_for(locale_tag: &str) -> DateStrategy {
    DATE_STRATEGIES
        .iter()
        .find(|(tag, _)| *tag == locale_tag)
        .map(|(_, strategy)| *strategy)
        .unwrap_or(GENERIC)
}

/// Absolute date in the viewer's wall-clock time, e.g. `Jan 2, 2025 03:04`.
pub fn format_date<Tz: TimeZone>(when: &DateTime<Tz>, locale_tag: &str) -> String {
    (strategy_for(locale_tag).full)(&when.naive_local())
}

/// Compact date, e.g. `2025/01/02 03:04`.
pub fn format_compact_date<Tz: TimeZone>(when: &DateTime<Tz>, locale_tag: &str) -> String {
    (strategy_for(locale_tag).compact)(&when.naive_local())
}

pub fn format_day_label<Tz: TimeZone>(when: &DateTime<Tz>, locale_tag: &str) -> String {
    (strategy_for(locale_tag).day_label)(&when.naive_local())
}

fn generic_full(dt: &NaiveDateTime) -> String {
    dt.format("%b %-d, %Y %H:%M").to_string()
}

fn generic_compact(dt: &NaiveDateTime) -> String {
    dt.format("%Y/%m/%d %H:%M").to_string()
}

fn generic_day_label(dt: &NaiveDateTime) -> String {
    dt.format("%m/%d").to_string()
}

fn persian_full(dt: &NaiveDateTime) -> String {
    let (jy, jm, jd) = gregorian_to_jalali(dt.year(), dt.month(), dt.day());
    persian_digits(&format!(
        "{:04}/{:02}/{:02}، {:02}:{:02}",
        jy,
        jm,
        jd,
        dt.hour(),
        dt.minute()
    ))
}

fn persian_compact(dt: &NaiveDateTime) -> String {
    let (jy, jm, jd) = gregorian_to_jalali(dt.year(), dt.month(), dt.day());
    persian_digits(&format!(
        "{:04}/{:02}/{:02} {:02}:{:02}",
        jy,
        jm,
        jd,
        dt.hour(),
        dt.minute()
    ))
}

fn persian_day_label(dt: &NaiveDateTime) -> String {
    let (_, jm, jd) = gregorian_to_jalali(dt.year(), dt.month(), dt.day());
    persian_digits(&format!("{:02}/{:02}", jm, jd))
}

/// Solar Hijri date for a proleptic Gregorian date
pub fn gregorian_to_jalali(gy: i32, gm: u32, gd: u32) -> (i32, u32, u32) {
    const DAYS_BEFORE_MONTH: [i64; 12] = [0, 31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334];

    let gy = i64::from(gy);
    let gy2 = if gm > 2 { gy + 1 } else { gy };
    let month_index = (gm.clamp(1, 12) - 1) as usize;
    let mut days = 355_666 + 365 * gy + (gy2 + 3).div_euclid(4) - (gy2 + 99).div_euclid(100)
        + (gy2 + 399).div_euclid(400)
        + i64::from(gd)
        + DAYS_BEFORE_MONTH[month_index];

    let mut jy = -1595 + 33 * days.div_euclid(12_053);
    days = days.rem_euclid(12_053);
    jy += 4 * days.div_euclid(1461);
    days = days.rem_euclid(1461);
    if days > 365 {
        jy += (days - 1) / 365;
        days = (days - 1) % 365;
    }

    let (jm, jd) = if days < 186 {
        (1 + days / 31, 1 + days % 31)
    } else {
        (7 + (days - 186) / 30, 1 + (days - 186) % 30)
    };

    (jy as i32, jm as u32, jd as u32)
}

fn persian_digits(text: &str) -> String {
    text.chars()
        .map(|c| match c.to_digit(10) {
            Some(d) if c.is_ascii_digit() => char::from_u32(0x06F0 + d).unwrap_or(c),
            _ => c,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_generic_format() {
        let when = Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap();
        assert_eq!(format_date(&when, "en"), "Jan 2, 2025 03:04");
        assert_eq!(format_date(&when, "ru"), "Jan 2, 2025 03:04");
        assert_eq!(format_compact_date(&when, "zh"), "2025/01/02 03:04");
        assert_eq!(format_day_label(&when, "en"), "01/02");
    }

    #[test]
    fn test_jalali_conversion() {
        assert_eq!(gregorian_to_jalali(2024, 3, 20), (1403, 1, 1));
        assert_eq!(gregorian_to_jalali(2024, 3, 19), (1402, 12, 29));
        assert_eq!(gregorian_to_jalali(2023, 3, 21), (1402, 1, 1));
        assert_eq!(gregorian_to_jalali(2025, 10, 19), (1404, 7, 27));
    }

    #[test]
    fn test_persian_format() {
        let when = Utc.with_ymd_and_hms(2024, 3, 20, 14, 30, 0).unwrap();
        assert_eq!(format_date(&when, "fa-IR"), "۱۴۰۳/۰۱/۰۱، ۱۴:۳۰");
        assert_eq!(format_compact_date(&when, "fa"), "۱۴۰۳/۰۱/۰۱ ۱۴:۳۰");
        assert_eq!(format_day_label(&when, "fa-IR"), "۰۱/۰۱");
    }
}
