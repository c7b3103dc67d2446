//! The drawing seam between chart rendering and a concrete backend.
//!
//! [`render_chart`](crate::render_chart) only speaks to [`DrawSurface`], so
//! the same geometry can go to an SVG file, a test recorder or a windowed
//! canvas.

use pricechart_layout::{Anchor, Label, Rect, ScreenPos};

use crate::color::Color;

/// How a piece of text is drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub font_size: f32,
    pub bold: bool,
    /// Horizontal alignment relative to the text position.
    pub anchor: Anchor,
    /// Counter-clockwise rotation in degrees around the text position.
    pub angle: f64,
    pub color: Color,
}

impl TextStyle {
    pub fn new(font_size: f32, color: Color) -> Self {
        Self {
            font_size,
            bold: false,
            anchor: Anchor::Middle,
            angle: 0.0,
            color,
        }
    }

    /// Style carried by a layout label.
    pub fn for_label(label: &Label, color: Color) -> Self {
        Self {
            font_size: label.font_size,
            bold: label.bold,
            anchor: label.anchor,
            angle: label.angle,
            color,
        }
    }
}

/// A 2D target the chart is drawn onto.
///
/// The chart is a vertical stack of panels. Each panel starts with
/// [`begin_panel`](DrawSurface::begin_panel); coordinates passed to the
/// drawing calls that follow are local to that panel, with the origin at
/// its top-left corner and y growing downwards.
pub trait DrawSurface {
    /// Start a new panel below the previous one.
    fn begin_panel(&mut self, width: f64, height: f64, background: Color);

    /// Finish the current panel.
    fn end_panel(&mut self) {}

    /// Fill a rectangle, optionally stroking its outline.
    fn fill_rect(&mut self, rect: Rect, fill: Color, outline: Option<Color>);

    /// Draw a straight line segment.
    fn line(&mut self, from: ScreenPos, to: ScreenPos, color: Color, width: f64);

    /// Draw a single line of text.
    fn text(&mut self, pos: ScreenPos, text: &str, style: &TextStyle);

    /// Draw a layout label.
    fn label(&mut self, label: &Label, color: Color) {
        self.text(label.pos, &label.text, &TextStyle::for_label(label, color));
    }
}
