//! Query window resolution.
//!
//! Turns the user's `{timeframe, start?, end?, last?}` into a concrete
//! [`TimeWindow`]. Wall-clock time is only ever read through a [`Clock`],
//! so resolution is deterministic under test.

use crate::error::RangeError;
use crate::timeframe::Timeframe;

/// Source of the current unix time in seconds.
pub trait Clock {
    fn now(&self) -> i64;
}

/// The real wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> i64 {
        chrono::Utc::now().timestamp()
    }
}

impl<F> Clock for F
where
    F: Fn() -> i64,
{
    fn now(&self) -> i64 {
        self()
    }
}

/// A half-open query window `[start_ts, end_ts)` in unix seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    start_ts: i64,
    end_ts: i64,
}

impl TimeWindow {
    /// Build a window, rejecting `start >= end`.
    pub fn new(start_ts: i64, end_ts: i64) -> Result<Self, RangeError> {
        if start_ts >= end_ts {
            return Err(RangeError::InvalidRange {
                start: start_ts,
                end: end_ts,
            });
        }
        Ok(Self { start_ts, end_ts })
    }

    pub fn start_ts(&self) -> i64 {
        self.start_ts
    }

    pub fn end_ts(&self) -> i64 {
        self.end_ts
    }

    pub fn duration_secs(&self) -> i64 {
        self.end_ts - self.start_ts
    }
}

/// Raw time parameters as supplied on the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RangeRequest {
    pub timeframe: String,
    pub start: Option<i64>,
    pub end: Option<i64>,
    pub last: Option<u32>,
}

impl RangeRequest {
    /// Request the last `bars` buckets up to now.
    pub fn last(timeframe: impl Into<String>, bars: u32) -> Self {
        Self {
            timeframe: timeframe.into(),
            last: Some(bars),
            ..Default::default()
        }
    }

    /// Request an explicit range; `end` defaults to now.
    pub fn between(timeframe: impl Into<String>, start: i64, end: Option<i64>) -> Self {
        Self {
            timeframe: timeframe.into(),
            start: Some(start),
            end,
            ..Default::default()
        }
    }
}

/// Resolve a [`RangeRequest`] into a [`TimeWindow`].
///
/// Exactly one of `last` or `start [, end]` must be present. The timeframe is
/// validated in both modes.
pub fn resolve_window(request: &RangeRequest, clock: &dyn Clock) -> Result<TimeWindow, RangeError> {
    // `--last 0` counts as not given.
    let last = request.last.filter(|&bars| bars > 0);

    if last.is_some() && (request.start.is_some() || request.end.is_some()) {
        return Err(RangeError::ArgumentConflict);
    }
    if last.is_none() && request.start.is_none() {
        return Err(RangeError::ArgumentMissing);
    }

    let timeframe: Timeframe = request.timeframe.parse()?;

    match (last, request.start) {
        (Some(bars), _) => {
            let end_ts = clock.now();
            let start_ts = i64::from(bars)
                .checked_mul(timeframe.seconds())
                .and_then(|span| end_ts.checked_sub(span))
                .ok_or(RangeError::InvalidRange {
                    start: i64::MIN,
                    end: end_ts,
                })?;
            TimeWindow::new(start_ts, end_ts)
        }
        (None, Some(start_ts)) => {
            let end_ts = match request.end {
                Some(end) => end,
                None => clock.now(),
            };
            TimeWindow::new(start_ts, end_ts)
        }
        (None, None) => Err(RangeError::ArgumentMissing),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOW: i64 = 1_735_520_400;

    fn fixed() -> impl Fn() -> i64 {
        || NOW
    }

    #[test]
    fn test_last_bars() {
        let window = resolve_window(&RangeRequest::last("1m", 100), &fixed()).unwrap();
        assert_eq!(window.start_ts(), NOW - 6000);
        assert_eq!(window.end_ts(), NOW);
        assert_eq!(window.duration_secs(), 6000);
    }

    #[test]
    fn test_last_span_overflow_is_invalid_range() {
        let req = RangeRequest::last("100000000000d", u32::MAX);
        assert_eq!(
            resolve_window(&req, &fixed()),
            Err(RangeError::InvalidRange {
                start: i64::MIN,
                end: NOW
            })
        );
    }

    #[test]
    fn test_zero_last_counts_as_missing() {
        assert_eq!(
            resolve_window(&RangeRequest::last("1m", 0), &fixed()),
            Err(RangeError::ArgumentMissing)
        );

        let req = RangeRequest {
            timeframe: "1m".into(),
            start: Some(1000),
            end: Some(2000),
            last: Some(0),
        };
        let window = resolve_window(&req, &fixed()).unwrap();
        assert_eq!((window.start_ts(), window.end_ts()), (1000, 2000));
    }

    #[test]
    fn test_explicit_range() {
        let req = RangeRequest::between("5m", 1000, Some(2000));
        let window = resolve_window(&req, &fixed()).unwrap();
        assert_eq!((window.start_ts(), window.end_ts()), (1000, 2000));
    }

    #[test]
    fn test_end_defaults_to_now() {
        let req = RangeRequest::between("1h", 1_735_516_800, None);
        let window = resolve_window(&req, &fixed()).unwrap();
        assert_eq!(window.end_ts(), NOW);
    }

    #[test]
    fn test_inverted_range() {
        let req = RangeRequest::between("1m", 1000, Some(500));
        assert_eq!(
            resolve_window(&req, &fixed()),
            Err(RangeError::InvalidRange {
                start: 1000,
                end: 500
            })
        );
    }

    #[test]
    fn test_empty_range() {
        let req = RangeRequest::between("1m", 1000, Some(1000));
        assert!(matches!(
            resolve_window(&req, &fixed()),
            Err(RangeError::InvalidRange { .. })
        ));
    }

    #[test]
    fn test_start_in_future_without_end() {
        let req = RangeRequest::between("1m", NOW + 60, None);
        assert!(matches!(
            resolve_window(&req, &fixed()),
            Err(RangeError::InvalidRange { .. })
        ));
    }

    #[test]
    fn test_conflict() {
        let req = RangeRequest {
            timeframe: "1m".into(),
            start: Some(1000),
            last: Some(10),
            ..Default::default()
        };
        assert_eq!(resolve_window(&req, &fixed()), Err(RangeError::ArgumentConflict));

        let req = RangeRequest {
            timeframe: "1m".into(),
            end: Some(1000),
            last: Some(10),
            ..Default::default()
        };
        assert_eq!(resolve_window(&req, &fixed()), Err(RangeError::ArgumentConflict));
    }

    #[test]
    fn test_missing() {
        let req = RangeRequest {
            timeframe: "1m".into(),
            ..Default::default()
        };
        assert_eq!(resolve_window(&req, &fixed()), Err(RangeError::ArgumentMissing));

        let end_only = RangeRequest {
            timeframe: "1m".into(),
            end: Some(1000),
            ..Default::default()
        };
        assert_eq!(
            resolve_window(&end_only, &fixed()),
            Err(RangeError::ArgumentMissing)
        );
    }

    #[test]
    fn test_timeframe_checked_in_range_mode() {
        let req = RangeRequest::between("5x", 1000, Some(2000));
        assert!(matches!(
            resolve_window(&req, &fixed()),
            Err(RangeError::InvalidTimeframe(_))
        ));
    }

    #[test]
    fn test_system_clock_is_recent() {
        // 2024-01-01T00:00:00Z
        assert!(SystemClock.now() > 1_704_067_200);
    }
}
