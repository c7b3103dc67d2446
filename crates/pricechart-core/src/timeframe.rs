//! Timeframe parsing.

use std::fmt;
use std::str::FromStr;

use crate::error::RangeError;

/// Unit suffix of a timeframe string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeUnit {
    Second,
    Minute,
    Hour,
    Day,
}

impl TimeUnit {
    fn from_suffix(c: char) -> Option<Self> {
        match c {
            's' => Some(TimeUnit::Second),
            'm' => Some(TimeUnit::Minute),
            'h' => Some(TimeUnit::Hour),
            'd' => Some(TimeUnit::Day),
            _ => None,
        }
    }

    /// Seconds per unit.
    pub fn seconds(&self) -> i64 {
        match self {
            TimeUnit::Second => 1,
            TimeUnit::Minute => 60,
            TimeUnit::Hour => 60 * 60,
            TimeUnit::Day => 60 * 60 * 24,
        }
    }

    pub fn suffix(&self) -> char {
        match self {
            TimeUnit::Second => 's',
            TimeUnit::Minute => 'm',
            TimeUnit::Hour => 'h',
            TimeUnit::Day => 'd',
        }
    }
}

/// A bucket duration such as `1m` or `4h`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeframe {
    pub count: i64,
    pub unit: TimeUnit,
}

impl Timeframe {
    /// Duration of one bucket in seconds.
    pub fn seconds(&self) -> i64 {
        self.count * self.unit.seconds()
    }

    /// Duration of one bucket in milliseconds, as the stream server expects it.
    pub fn millis(&self) -> i64 {
        self.seconds() * 1000
    }
}

impl FromStr for Timeframe {
    type Err = RangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || RangeError::InvalidTimeframe(s.to_string());

        let unit_char = s.chars().last().ok_or_else(invalid)?;
        let prefix = &s[..s.len() - unit_char.len_utf8()];

        let count: i64 = prefix.parse().map_err(|_| invalid())?;
        let unit = TimeUnit::from_suffix(unit_char).ok_or_else(invalid)?;

        if count <= 0 {
            return Err(invalid());
        }
        // Keeps seconds() and millis() free of overflow.
        count
            .checked_mul(unit.seconds())
            .and_then(|secs| secs.checked_mul(1000))
            .ok_or_else(invalid)?;

        Ok(Self { count, unit })
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.count, self.unit.suffix())
    }
}

/// Convert a timeframe string (`5m`, `1h`, ...) to seconds.
pub fn parse_timeframe(s: &str) -> Result<i64, RangeError> {
    s.parse::<Timeframe>().map(|tf| tf.seconds())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minutes_and_hours() {
        assert_eq!(parse_timeframe("5m"), Ok(300));
        assert_eq!(parse_timeframe("2h"), Ok(7200));
        assert_eq!(parse_timeframe("1d"), Ok(86400));
        assert_eq!(parse_timeframe("30s"), Ok(30));
    }

    #[test]
    fn test_parse_rejects_empty() {
        assert_eq!(
            parse_timeframe(""),
            Err(RangeError::InvalidTimeframe(String::new()))
        );
    }

    #[test]
    fn test_parse_rejects_unknown_unit() {
        assert!(matches!(
            parse_timeframe("5x"),
            Err(RangeError::InvalidTimeframe(_))
        ));
        assert!(matches!(
            parse_timeframe("1w"),
            Err(RangeError::InvalidTimeframe(_))
        ));
    }

    #[test]
    fn test_parse_rejects_bad_prefix() {
        for input in ["m", "xm", "1.5m", " 5m", "5ü"] {
            assert!(
                matches!(parse_timeframe(input), Err(RangeError::InvalidTimeframe(_))),
                "{input} should be rejected"
            );
        }
    }

    #[test]
    fn test_parse_rejects_non_positive() {
        assert!(parse_timeframe("0m").is_err());
        assert!(parse_timeframe("-5m").is_err());
    }

    #[test]
    fn test_parse_rejects_overflowing_count() {
        assert!(matches!(
            parse_timeframe("999999999999999999d"),
            Err(RangeError::InvalidTimeframe(_))
        ));
        assert!(parse_timeframe("9223372036854776s").is_err());
        assert_eq!(parse_timeframe("9223372036854s"), Ok(9_223_372_036_854));
    }

    #[test]
    fn test_display_roundtrip() {
        let tf: Timeframe = "15m".parse().unwrap();
        assert_eq!(tf.to_string(), "15m");
        assert_eq!(tf.millis(), 900_000);
    }
}
