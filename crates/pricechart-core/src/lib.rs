//! Core types for pricechart.
//!
//! This crate provides the data structures shared by every other crate:
//! - `Candle` - OHLCV candle data
//! - `Series` / `SeriesStats` - an ordered candle series and its aggregates
//! - `Timeframe` - bucket duration parsing (`5m`, `1h`, ...)
//! - `TimeWindow` - the resolved query window, built by [`resolve_window`]

pub mod candle;
pub mod error;
pub mod series;
pub mod timeframe;
pub mod window;

pub use candle::{Candle, Direction};
pub use error::RangeError;
pub use series::{Series, SeriesStats};
pub use timeframe::{parse_timeframe, TimeUnit, Timeframe};
pub use window::{resolve_window, Clock, RangeRequest, SystemClock, TimeWindow};
