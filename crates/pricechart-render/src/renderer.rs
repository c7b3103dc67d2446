//! Draws a [`ChartGeometry`] onto a [`DrawSurface`].

use pricechart_core::Direction;
use pricechart_layout::{ChartGeometry, Gridline, Rect, ScreenPos};

use crate::color::Color;
use crate::surface::{DrawSurface, TextStyle};
use crate::{STATS_FONT_SIZE, STATS_STRIP_HEIGHT};

/// Colors used by [`render_chart`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub up: Color,
    pub down: Color,
    pub grid: Color,
    pub wick: Color,
    pub background: Color,
    pub text: Color,
    pub stats_background: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            up: Color::rgb(0x26, 0xa6, 0x9a),
            down: Color::rgb(0xef, 0x53, 0x50),
            grid: Color::rgb(0xe0, 0xe0, 0xe0),
            wick: Color::BLACK,
            background: Color::WHITE,
            text: Color::BLACK,
            stats_background: Color::rgb(0xf5, 0xf5, 0xf5),
        }
    }
}

impl Palette {
    pub fn direction(&self, direction: Direction) -> Color {
        match direction {
            Direction::Up => self.up,
            Direction::Down => self.down,
        }
    }
}

/// Render the price panel, the volume panel and the stats strip, in that
/// order, each as its own surface panel.
pub fn render_chart<S: DrawSurface + ?Sized>(
    geometry: &ChartGeometry,
    palette: &Palette,
    surface: &mut S,
) {
    let width = f64::from(geometry.candle_width);

    let price = &geometry.price;
    surface.begin_panel(price.width, price.height, palette.background);
    if let Some(title) = &price.title {
        surface.label(title, palette.text);
    }
    draw_gridlines(surface, &price.gridlines, price.plot, palette);
    for tick in &price.time_ticks {
        surface.label(&tick.label, palette.text);
    }
    for candle in &price.candles {
        surface.line(
            ScreenPos::new(candle.center_x, candle.wick_top),
            ScreenPos::new(candle.center_x, candle.wick_bottom),
            palette.wick,
            1.0,
        );
        let color = palette.direction(candle.direction);
        let body = Rect::new(candle.x, candle.body_top, width, candle.body_height());
        surface.fill_rect(body, color, Some(color));
    }
    surface.end_panel();

    let volume = &geometry.volume;
    surface.begin_panel(volume.width, volume.height, palette.background);
    surface.label(&volume.title, palette.text);
    draw_gridlines(surface, &volume.gridlines, volume.plot, palette);
    for bar in &volume.bars {
        let color = palette.direction(bar.direction);
        surface.fill_rect(Rect::new(bar.x, bar.top, width, bar.height()), color, Some(color));
    }
    surface.end_panel();

    surface.begin_panel(price.width, STATS_STRIP_HEIGHT, palette.stats_background);
    surface.text(
        ScreenPos::new(price.width / 2.0, STATS_STRIP_HEIGHT / 2.0),
        &geometry.stats_line,
        &TextStyle::new(STATS_FONT_SIZE, palette.text),
    );
    surface.end_panel();

    log::debug!(
        "Rendered {} candles, {} volume bars",
        price.candles.len(),
        volume.bars.len()
    );
}

fn draw_gridlines<S: DrawSurface + ?Sized>(
    surface: &mut S,
    gridlines: &[Gridline],
    plot: Rect,
    palette: &Palette,
) {
    for gridline in gridlines {
        surface.line(
            ScreenPos::new(plot.x, gridline.y),
            ScreenPos::new(plot.right(), gridline.y),
            palette.grid,
            1.0,
        );
        surface.label(&gridline.label, palette.text);
    }
}
