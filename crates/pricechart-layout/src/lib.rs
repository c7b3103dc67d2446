//! Chart layout for pricechart.
//!
//! Converts a candle series into pixel-space geometry: plot rectangles,
//! candle bodies and wicks, volume bars, gridlines and axis labels. Nothing in
//! here draws; a renderer consumes the resulting [`ChartGeometry`].

pub mod coords;
pub mod engine;
pub mod fmt;
pub mod geometry;

pub use coords::{Margins, PriceScale, Rect, ScreenPos, VolumeScale};
pub use engine::{candle_width, compute_geometry, tick_indices, LabelZone, LayoutConfig, LayoutError};
pub use geometry::{
    Anchor, CandleRecord, ChartGeometry, Gridline, Label, PricePanel, TimeTick, VolumeBar,
    VolumePanel,
};

/// Candle body width bounds, in pixels.
pub const MIN_CANDLE_WIDTH: u32 = 1;
pub const MAX_CANDLE_WIDTH: u32 = 20;

/// Default gridline interval counts.
pub const DEFAULT_PRICE_GRIDLINES: usize = 10;
pub const DEFAULT_VOLUME_GRIDLINES: usize = 5;

/// Default upper bound on time-axis labels.
pub const DEFAULT_MAX_TIME_TICKS: usize = 10;

/// Rotation applied to time-axis labels, in degrees.
pub const TIME_LABEL_ANGLE: f64 = 45.0;
