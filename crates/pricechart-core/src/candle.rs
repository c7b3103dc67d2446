//! Candle data structures for OHLCV data.

/// OHLCV candle for one timeframe bucket.
///
/// The usual `low <= min(open, close)` / `high >= max(open, close)` relation is
/// not checked; candles are drawn exactly as the server reports them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candle {
    /// Bucket start, unix seconds.
    pub timestamp: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl Candle {
    pub fn new(timestamp: i64, open: f64, high: f64, low: f64, close: f64, volume: f64) -> Self {
        Self {
            timestamp,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// True when the candle closed at or above its open.
    pub fn is_up(&self) -> bool {
        self.close >= self.open
    }

    pub fn direction(&self) -> Direction {
        if self.is_up() {
            Direction::Up
        } else {
            Direction::Down
        }
    }
}

/// Candle color class. A doji (`close == open`) counts as `Up`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
}
