//! Label formatting for axes and summaries.

use chrono::{DateTime, Local, TimeZone, Utc};

use crate::engine::LabelZone;

/// Price label: two decimals.
pub fn format_price(price: f64) -> String {
    format!("{price:.2}")
}

/// Volume label: rounded to a whole number with thousands separators.
pub fn format_volume(volume: f64) -> String {
    group_thousands(&format!("{volume:.0}"))
}

/// Insert `,` every three digits into the integer part of a formatted number.
pub fn group_thousands(formatted: &str) -> String {
    let (sign, unsigned) = match formatted.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", formatted),
    };
    let (integer, fraction) = match unsigned.split_once('.') {
        Some((int, frac)) => (int, Some(frac)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (i, ch) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match fraction {
        Some(frac) => format!("{sign}{grouped}.{frac}"),
        None => format!("{sign}{grouped}"),
    }
}

/// `HH:MM` of a unix timestamp.
pub fn format_hhmm(timestamp: i64, zone: LabelZone) -> String {
    format_timestamp(timestamp, zone, "%H:%M")
}

/// `YYYY-MM-DD HH:MM:SS` of a unix timestamp.
pub fn format_datetime(timestamp: i64, zone: LabelZone) -> String {
    format_timestamp(timestamp, zone, "%Y-%m-%d %H:%M:%S")
}

fn format_timestamp(timestamp: i64, zone: LabelZone, pattern: &str) -> String {
    let Some(utc) = DateTime::<Utc>::from_timestamp(timestamp, 0) else {
        return timestamp.to_string();
    };
    match zone {
        LabelZone::Utc => utc.format(pattern).to_string(),
        LabelZone::Local => Local
            .from_utc_datetime(&utc.naive_utc())
            .format(pattern)
            .to_string(),
    }
}
