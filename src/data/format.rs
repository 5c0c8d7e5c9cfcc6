//! Number, percentage, duration and timestamp formatting for the cards.

use chrono::{DateTime, Local, TimeZone, Utc};

use super::labels::Locale;

/// Format a value with exactly one decimal place.
///
/// The stored binary value is rounded exactly, so `1.15` (really
/// `1.1499...`) gives `"1.1"`. Only a true tie rounds away from zero:
/// `87.25 -> "87.3"`, where `format!("{:.1}")` alone would round to even.
pub fn format_fixed1(value: f64) -> String {
    let scaled = value * 10.0;
    // True ties only exist for quarter values, and `* 4.0` is exact.
    if (value * 4.0).fract() == 0.0 && scaled.fract().abs() == 0.5 {
        return format!("{:.1}", (scaled.trunc() + scaled.signum()) / 10.0);
    }
    format!("{:.1}", value)
}

/// Format a count with K/M suffixes (e.g., 1500 -> "1.5K", 2500000 -> "2.5M").
pub fn format_number(n: u64) -> String {
    if n >= 1_000_000 {
        format!("{}M", format_fixed1(n as f64 / 1_000_000.0))
    } else if n >= 1_000 {
        format!("{}K", format_fixed1(n as f64 / 1_000.0))
    } else {
        n.to_string()
    }
}

/// Format a percentage with one decimal (e.g., 87.25 -> "87.3%").
pub fn format_percent(value: f64) -> String {
    format!("{}%", format_fixed1(value))
}

/// Format an uptime in seconds as "1h 2m 5s", "2m 5s" or "45s".
pub fn format_duration(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;

    if hours > 0 {
        format!("{}h {}m {}s", hours, minutes, secs)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, secs)
    } else {
        format!("{}s", secs)
    }
}

/// Format a value as-is: integers without a fractional part, others in
/// shortest form (`18.0 -> "18"`, `12.5 -> "12.5"`).
pub fn format_raw(value: f64) -> String {
    format!("{}", value)
}

/// Format a collection timestamp in the local time zone.
pub fn format_timestamp(timestamp: DateTime<Utc>, locale: Locale) -> String {
    format_timestamp_in(timestamp, &Local, locale)
}

/// Format a collection timestamp in the given time zone.
pub fn format_timestamp_in<Tz>(timestamp: DateTime<Utc>, tz: &Tz, locale: Locale) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let local = timestamp.with_timezone(tz);
    let pattern = match locale {
        Locale::En => "%Y-%m-%d %H:%M:%S",
        Locale::ZhCn => "%Y/%-m/%-d %H:%M:%S",
    };
    format!("{}{}", locale.labels().last_updated, local.format(pattern))
}
