//! Candle series and derived statistics.

use crate::candle::Candle;

/// An ordered run of candles for one instrument and timeframe.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Series {
    candles: Vec<Candle>,
}

impl Series {
    pub fn new(candles: Vec<Candle>) -> Self {
        Self { candles }
    }

    pub fn len(&self) -> usize {
        self.candles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }

    pub fn candles(&self) -> &[Candle] {
        &self.candles
    }

    pub fn first(&self) -> Option<&Candle> {
        self.candles.first()
    }

    pub fn last(&self) -> Option<&Candle> {
        self.candles.last()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Candle> {
        self.candles.iter()
    }

    /// Aggregate statistics, `None` for an empty series.
    pub fn stats(&self) -> Option<SeriesStats> {
        SeriesStats::from_candles(&self.candles)
    }
}

impl From<Vec<Candle>> for Series {
    fn from(candles: Vec<Candle>) -> Self {
        Self::new(candles)
    }
}

/// Aggregate scalars over a non-empty series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesStats {
    /// Lowest of all opens, highs, lows and closes.
    pub min_price: f64,
    /// Highest of all opens, highs, lows and closes.
    pub max_price: f64,
    /// `max_price - min_price`; zero for a flat series.
    pub price_range: f64,
    pub max_volume: f64,
    pub first: Candle,
    pub last: Candle,
    pub count: usize,
}

impl SeriesStats {
    /// Compute statistics for `candles`. Returns `None` when there are none.
    pub fn from_candles(candles: &[Candle]) -> Option<Self> {
        let first = *candles.first()?;
        let last = *candles.last()?;

        let mut min_price = f64::INFINITY;
        let mut max_price = f64::NEG_INFINITY;
        let mut max_volume = 0.0_f64;

        for c in candles {
            for price in [c.open, c.high, c.low, c.close] {
                min_price = min_price.min(price);
                max_price = max_price.max(price);
            }
            max_volume = max_volume.max(c.volume);
        }

        Some(Self {
            min_price,
            max_price,
            price_range: max_price - min_price,
            max_volume,
            first,
            last,
            count: candles.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_candles() -> Vec<Candle> {
        vec![
            Candle::new(0, 10.0, 12.0, 9.0, 11.0, 100.0),
            Candle::new(60, 11.0, 11.0, 8.0, 8.0, 50.0),
        ]
    }

    #[test]
    fn test_stats_two_candles() {
        let stats = SeriesStats::from_candles(&two_candles()).unwrap();
        assert_eq!(stats.min_price, 8.0);
        assert_eq!(stats.max_price, 12.0);
        assert_eq!(stats.price_range, 4.0);
        assert_eq!(stats.max_volume, 100.0);
        assert_eq!(stats.first.timestamp, 0);
        assert_eq!(stats.last.timestamp, 60);
        assert_eq!(stats.count, 2);
    }

    #[test]
    fn test_stats_empty() {
        assert!(SeriesStats::from_candles(&[]).is_none());
        assert!(Series::default().stats().is_none());
    }

    #[test]
    fn test_stats_flat_series() {
        let candles = vec![Candle::new(0, 5.0, 5.0, 5.0, 5.0, 0.0); 3];
        let stats = SeriesStats::from_candles(&candles).unwrap();
        assert_eq!(stats.price_range, 0.0);
        assert_eq!(stats.max_volume, 0.0);
    }

    #[test]
    fn test_stats_considers_open_and_close() {
        // Malformed candle: open above high. Still counted.
        let candles = vec![Candle::new(0, 20.0, 15.0, 10.0, 12.0, 1.0)];
        let stats = SeriesStats::from_candles(&candles).unwrap();
        assert_eq!(stats.max_price, 20.0);
        assert_eq!(stats.min_price, 10.0);
    }

    #[test]
    fn test_series_accessors() {
        let series = Series::from(two_candles());
        assert_eq!(series.len(), 2);
        assert!(!series.is_empty());
        assert_eq!(series.first().map(|c| c.open), Some(10.0));
        assert_eq!(series.last().map(|c| c.close), Some(8.0));
        assert_eq!(series.iter().count(), 2);
    }
}
