//! Pixel coordinates and value scales.
//!
//! Two spaces are involved:
//!
//! - **Screen coordinates** ([`ScreenPos`]): pixels from the top-left of a
//!   panel. X grows to the right, Y grows downward.
//! - **Value space**: prices and volumes. [`PriceScale`] and [`VolumeScale`]
//!   map values onto the Y axis of a plot [`Rect`].
//!
//! Higher values always land at smaller Y.

/// A position in pixels from the top-left corner of a panel.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScreenPos {
    pub x: f64,
    pub y: f64,
}

impl ScreenPos {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<(f64, f64)> for ScreenPos {
    fn from(pos: (f64, f64)) -> Self {
        Self::new(pos.0, pos.1)
    }
}

/// Blank space around a plot area, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Margins {
    pub left: u32,
    pub right: u32,
    pub top: u32,
    pub bottom: u32,
}

impl Margins {
    #[must_use]
    pub const fn new(left: u32, right: u32, top: u32, bottom: u32) -> Self {
        Self {
            left,
            right,
            top,
            bottom,
        }
    }

    #[must_use]
    pub fn horizontal(&self) -> f64 {
        f64::from(self.left) + f64::from(self.right)
    }

    #[must_use]
    pub fn vertical(&self) -> f64 {
        f64::from(self.top) + f64::from(self.bottom)
    }
}

/// Axis-aligned rectangle in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// The plot area left inside a `width` x `height` canvas once `margins`
    /// are removed.
    #[must_use]
    pub fn inset(width: f64, height: f64, margins: Margins) -> Self {
        Self {
            x: f64::from(margins.left),
            y: f64::from(margins.top),
            width: width - margins.horizontal(),
            height: height - margins.vertical(),
        }
    }

    #[must_use]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    #[must_use]
    pub fn center_y(&self) -> f64 {
        self.y + self.height / 2.0
    }
}

/// Linear price to Y mapping over a plot rectangle.
///
/// `min_price` sits on the bottom edge and `min_price + price_range` on the top
/// edge. A flat series (`price_range == 0`) maps every price to the vertical
/// midpoint instead of dividing by zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceScale {
    plot: Rect,
    min_price: f64,
    price_range: f64,
}

impl PriceScale {
    #[must_use]
    pub fn new(plot: Rect, min_price: f64, price_range: f64) -> Self {
        Self {
            plot,
            min_price,
            price_range,
        }
    }

    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.price_range == 0.0
    }

    #[must_use]
    pub fn price_to_y(&self, price: f64) -> f64 {
        if self.is_degenerate() {
            return self.plot.center_y();
        }
        self.plot.bottom() - (price - self.min_price) / self.price_range * self.plot.height
    }
}

/// Volume to bar-height mapping, anchored at zero on the bottom edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VolumeScale {
    plot: Rect,
    max_volume: f64,
}

impl VolumeScale {
    #[must_use]
    pub fn new(plot: Rect, max_volume: f64) -> Self {
        Self { plot, max_volume }
    }

    /// Bar height in pixels; zero when every volume is zero.
    #[must_use]
    pub fn bar_height(&self, volume: f64) -> f64 {
        if self.max_volume > 0.0 {
            volume / self.max_volume * self.plot.height
        } else {
            0.0
        }
    }

    #[must_use]
    pub fn volume_to_y(&self, volume: f64) -> f64 {
        self.plot.bottom() - self.bar_height(volume)
    }
}
