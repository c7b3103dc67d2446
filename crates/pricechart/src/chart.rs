//! Glue between a fetched series and the SVG renderer.

use pricechart_config::ColorConfig;
use pricechart_core::Series;
use pricechart_layout::{compute_geometry, LayoutConfig, LayoutError};
use pricechart_render::{render_chart, Color, Palette, RenderError, SvgSurface};

pub fn palette(colors: &ColorConfig) -> Result<Palette, RenderError> {
    Ok(Palette {
        up: Color::from_hex(&colors.up)?,
        down: Color::from_hex(&colors.down)?,
        grid: Color::from_hex(&colors.grid)?,
        wick: Color::from_hex(&colors.wick)?,
        background: Color::from_hex(&colors.background)?,
        text: Color::from_hex(&colors.text)?,
        stats_background: Color::from_hex(&colors.stats_background)?,
    })
}

pub fn title(instrument: &str, timeframe: &str) -> String {
    format!("{instrument} - {timeframe} OHLC Chart")
}

/// Lay out and draw `series` into a fresh SVG surface.
pub fn render_svg(
    series: &Series,
    instrument: &str,
    timeframe: &str,
    layout: &LayoutConfig,
    palette: &Palette,
) -> Result<SvgSurface, LayoutError> {
    let stats = series.stats().ok_or(LayoutError::EmptyData)?;
    let geometry =
        compute_geometry(series.candles(), &stats, layout)?.titled(title(instrument, timeframe));

    let mut surface = SvgSurface::new();
    render_chart(&geometry, palette, &mut surface);
    Ok(surface)
}
