//! Renderer-facing geometry records.

use pricechart_core::Direction;

use crate::coords::{Rect, ScreenPos};

/// Horizontal text alignment relative to a label's position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Anchor {
    Start,
    #[default]
    Middle,
    End,
}

/// A piece of text placed on a panel.
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub pos: ScreenPos,
    pub text: String,
    pub font_size: f32,
    pub bold: bool,
    pub anchor: Anchor,
    /// Counter-clockwise rotation in degrees.
    pub angle: f64,
}

impl Label {
    pub fn new(pos: ScreenPos, text: impl Into<String>, font_size: f32) -> Self {
        Self {
            pos,
            text: text.into(),
            font_size,
            bold: false,
            anchor: Anchor::Middle,
            angle: 0.0,
        }
    }

    #[must_use]
    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    #[must_use]
    pub fn anchored(mut self, anchor: Anchor) -> Self {
        self.anchor = anchor;
        self
    }

    #[must_use]
    pub fn rotated(mut self, angle: f64) -> Self {
        self.angle = angle;
        self
    }
}

/// A horizontal gridline spanning the plot width, with its axis label.
#[derive(Debug, Clone, PartialEq)]
pub struct Gridline {
    pub y: f64,
    pub value: f64,
    pub label: Label,
}

/// A time-axis tick below the price plot.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeTick {
    /// Index of the candle this tick labels.
    pub index: usize,
    pub x: f64,
    pub timestamp: i64,
    pub label: Label,
}

/// Draw record for one candlestick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CandleRecord {
    pub index: usize,
    /// Left edge of the body.
    pub x: f64,
    /// Horizontal position of the wick.
    pub center_x: f64,
    pub body_top: f64,
    pub body_bottom: f64,
    pub wick_top: f64,
    pub wick_bottom: f64,
    pub direction: Direction,
}

impl CandleRecord {
    #[must_use]
    pub fn body_height(&self) -> f64 {
        self.body_bottom - self.body_top
    }
}

/// Draw record for one volume bar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VolumeBar {
    pub index: usize,
    pub x: f64,
    pub top: f64,
    pub bottom: f64,
    pub direction: Direction,
}

impl VolumeBar {
    #[must_use]
    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }
}

/// The candlestick panel.
#[derive(Debug, Clone, PartialEq)]
pub struct PricePanel {
    pub width: f64,
    pub height: f64,
    pub plot: Rect,
    pub title: Option<Label>,
    pub gridlines: Vec<Gridline>,
    pub time_ticks: Vec<TimeTick>,
    pub candles: Vec<CandleRecord>,
}

/// The volume panel drawn below the candlesticks.
#[derive(Debug, Clone, PartialEq)]
pub struct VolumePanel {
    pub width: f64,
    pub height: f64,
    pub plot: Rect,
    pub title: Label,
    pub gridlines: Vec<Gridline>,
    pub bars: Vec<VolumeBar>,
}

/// Everything a renderer needs to draw one chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartGeometry {
    /// Body width in whole pixels, within `[MIN_CANDLE_WIDTH, MAX_CANDLE_WIDTH]`.
    ///
    /// [`MIN_CANDLE_WIDTH`]: crate::MIN_CANDLE_WIDTH
    /// [`MAX_CANDLE_WIDTH`]: crate::MAX_CANDLE_WIDTH
    pub candle_width: u32,
    /// Distance between consecutive candle left edges.
    pub candle_spacing: f64,
    pub price: PricePanel,
    pub volume: VolumePanel,
    /// One-line OHLC summary of the first and last candles.
    pub stats_line: String,
}

impl ChartGeometry {
    /// Attach a bold title above the price plot, at half the canvas width
    /// shifted right by the left margin.
    #[must_use]
    pub fn titled(mut self, text: impl Into<String>) -> Self {
        let pos = ScreenPos::new(title_x(self.price.width, &self.price.plot), 20.0);
        self.price.title = Some(Label::new(pos, text, 14.0).bold());
        self
    }

    pub fn candle_count(&self) -> usize {
        self.price.candles.len()
    }
}

/// X of a panel title: `floor(canvas_width / 2) + plot.x`.
pub(crate) fn title_x(canvas_width: f64, plot: &Rect) -> f64 {
    (canvas_width / 2.0).floor() + plot.x
}
