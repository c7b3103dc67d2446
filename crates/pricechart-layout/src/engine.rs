//! The layout engine.
//!
//! [`compute_geometry`] is a pure function of the candles, their statistics
//! and a [`LayoutConfig`]. It produces a [`ChartGeometry`] that any renderer
//! can draw without further arithmetic.

use pricechart_core::{Candle, SeriesStats};
use thiserror::Error;

use crate::coords::{Margins, PriceScale, Rect, ScreenPos, VolumeScale};
use crate::fmt::{format_hhmm, format_price, format_volume};
use crate::geometry::{
    title_x, Anchor, CandleRecord, ChartGeometry, Gridline, Label, PricePanel, TimeTick,
    VolumeBar, VolumePanel,
};
use crate::{
    DEFAULT_MAX_TIME_TICKS, DEFAULT_PRICE_GRIDLINES, DEFAULT_VOLUME_GRIDLINES, MAX_CANDLE_WIDTH,
    MIN_CANDLE_WIDTH, TIME_LABEL_ANGLE,
};

/// Distance between the plot's left edge and the right end of axis labels.
const AXIS_LABEL_GAP: f64 = 10.0;
/// Distance between the price plot's bottom edge and the time labels.
const TIME_LABEL_OFFSET: f64 = 15.0;

/// Layout failures.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    #[error("No data to plot")]
    EmptyData,
    #[error("Canvas too small: {panel} plot area would be {width}x{height}")]
    CanvasTooSmall {
        panel: &'static str,
        width: f64,
        height: f64,
    },
}

/// Time zone used for time-axis labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LabelZone {
    #[default]
    Local,
    Utc,
}

/// Canvas dimensions and layout knobs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutConfig {
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub margins: Margins,
    /// Total height of the volume panel.
    pub volume_height: u32,
    /// Only `top` and `bottom` are used; the volume plot shares the price
    /// plot's horizontal extent.
    pub volume_margins: Margins,
    pub price_gridlines: usize,
    pub volume_gridlines: usize,
    pub max_time_ticks: usize,
    pub label_zone: LabelZone,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            canvas_width: 1150,
            canvas_height: 500,
            margins: Margins::new(80, 20, 40, 40),
            volume_height: 150,
            volume_margins: Margins::new(80, 20, 30, 10),
            price_gridlines: DEFAULT_PRICE_GRIDLINES,
            volume_gridlines: DEFAULT_VOLUME_GRIDLINES,
            max_time_ticks: DEFAULT_MAX_TIME_TICKS,
            label_zone: LabelZone::Local,
        }
    }
}

impl LayoutConfig {
    /// The price plot rectangle.
    pub fn price_plot(&self) -> Rect {
        Rect::inset(
            f64::from(self.canvas_width),
            f64::from(self.canvas_height),
            self.margins,
        )
    }

    /// The volume plot rectangle, horizontally aligned with the price plot.
    pub fn volume_plot(&self) -> Rect {
        let price = self.price_plot();
        let top = f64::from(self.volume_margins.top);
        Rect::new(
            price.x,
            top,
            price.width,
            f64::from(self.volume_height) - self.volume_margins.vertical(),
        )
    }
}

/// Candle body width: `floor(plot_width / n)` clamped to `[1, 20]`.
///
/// Independent of the spacing, so few candles leave visible gaps and many
/// candles collapse to touching 1px bodies.
pub fn candle_width(plot_width: f64, n: usize) -> u32 {
    if n == 0 {
        return MIN_CANDLE_WIDTH;
    }
    let raw = (plot_width / n as f64).floor();
    raw.clamp(f64::from(MIN_CANDLE_WIDTH), f64::from(MAX_CANDLE_WIDTH)) as u32
}

/// Candle indices that receive a time label.
///
/// Picks `min(max_ticks, n)` indices spread evenly by position, not by time.
pub fn tick_indices(n: usize, max_ticks: usize) -> Vec<usize> {
    let ticks = max_ticks.min(n);
    match ticks {
        0 => Vec::new(),
        1 => vec![0],
        _ => (0..ticks)
            .map(|i| ((i * (n - 1)) as f64 / (ticks - 1) as f64).round() as usize)
            .collect(),
    }
}

/// Compute the full chart geometry for a non-empty series.
pub fn compute_geometry(
    candles: &[Candle],
    stats: &SeriesStats,
    config: &LayoutConfig,
) -> Result<ChartGeometry, LayoutError> {
    if candles.is_empty() {
        return Err(LayoutError::EmptyData);
    }

    let plot = config.price_plot();
    check_plot("price", plot)?;
    let volume_plot = config.volume_plot();
    check_plot("volume", volume_plot)?;

    let n = candles.len();
    let spacing = plot.width / n as f64;
    let width = candle_width(plot.width, n);
    let half_width = f64::from(width) / 2.0;

    let scale = PriceScale::new(plot, stats.min_price, stats.price_range);
    let x_at = |i: usize| plot.x + i as f64 * spacing;

    let records = candles
        .iter()
        .enumerate()
        .map(|(i, c)| {
            let x = x_at(i);
            let y_open = scale.price_to_y(c.open);
            let y_close = scale.price_to_y(c.close);
            let body_top = y_open.min(y_close);
            let mut body_bottom = y_open.max(y_close);
            if body_bottom - body_top < 1.0 {
                body_bottom = body_top + 1.0;
            }
            CandleRecord {
                index: i,
                x,
                center_x: x + half_width,
                body_top,
                body_bottom,
                wick_top: scale.price_to_y(c.high),
                wick_bottom: scale.price_to_y(c.low),
                direction: c.direction(),
            }
        })
        .collect();

    let price_gridlines = value_gridlines(
        plot,
        config.price_gridlines,
        stats.max_price,
        stats.price_range,
        9.0,
        format_price,
    );

    let time_ticks = tick_indices(n, config.max_time_ticks)
        .into_iter()
        .map(|idx| {
            let x = x_at(idx);
            let timestamp = candles[idx].timestamp;
            let pos = ScreenPos::new(x, plot.bottom() + TIME_LABEL_OFFSET);
            TimeTick {
                index: idx,
                x,
                timestamp,
                label: Label::new(pos, format_hhmm(timestamp, config.label_zone), 8.0)
                    .rotated(TIME_LABEL_ANGLE),
            }
        })
        .collect();

    let volume_scale = VolumeScale::new(volume_plot, stats.max_volume);
    let bars = candles
        .iter()
        .enumerate()
        .map(|(i, c)| VolumeBar {
            index: i,
            x: x_at(i),
            top: volume_scale.volume_to_y(c.volume),
            bottom: volume_plot.bottom(),
            direction: c.direction(),
        })
        .collect();

    let volume_gridlines = value_gridlines(
        volume_plot,
        config.volume_gridlines,
        stats.max_volume,
        stats.max_volume,
        8.0,
        format_volume,
    );

    let canvas_width = f64::from(config.canvas_width);

    Ok(ChartGeometry {
        candle_width: width,
        candle_spacing: spacing,
        price: PricePanel {
            width: canvas_width,
            height: f64::from(config.canvas_height),
            plot,
            title: None,
            gridlines: price_gridlines,
            time_ticks,
            candles: records,
        },
        volume: VolumePanel {
            width: canvas_width,
            height: f64::from(config.volume_height),
            plot: volume_plot,
            title: Label::new(
                ScreenPos::new(title_x(canvas_width, &volume_plot), 15.0),
                "Volume",
                12.0,
            )
            .bold(),
            gridlines: volume_gridlines,
            bars,
        },
        stats_line: stats_line(stats),
    })
}

fn check_plot(panel: &'static str, plot: Rect) -> Result<(), LayoutError> {
    if plot.width <= 0.0 || plot.height <= 0.0 {
        return Err(LayoutError::CanvasTooSmall {
            panel,
            width: plot.width,
            height: plot.height,
        });
    }
    Ok(())
}

/// `count` equal intervals from `top_value` at the top edge down to
/// `top_value - span` at the bottom edge, i.e. `count + 1` lines.
fn value_gridlines(
    plot: Rect,
    count: usize,
    top_value: f64,
    span: f64,
    font_size: f32,
    format: fn(f64) -> String,
) -> Vec<Gridline> {
    if count == 0 {
        return Vec::new();
    }
    (0..=count)
        .map(|i| {
            let step = i as f64 / count as f64;
            let y = plot.y + step * plot.height;
            let value = top_value - step * span;
            let pos = ScreenPos::new(plot.x - AXIS_LABEL_GAP, y);
            Gridline {
                y,
                value,
                label: Label::new(pos, format(value), font_size).anchored(Anchor::End),
            }
        })
        .collect()
}

fn stats_line(stats: &SeriesStats) -> String {
    let (f, l) = (&stats.first, &stats.last);
    format!(
        "First: O:{:.2} H:{:.2} L:{:.2} C:{:.2} | Last: O:{:.2} H:{:.2} L:{:.2} C:{:.2} | Bars: {}",
        f.open, f.high, f.low, f.close, l.open, l.high, l.low, l.close, stats.count
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pricechart_core::Direction;

    fn utc_config() -> LayoutConfig {
        LayoutConfig {
            label_zone: LabelZone::Utc,
            ..Default::default()
        }
    }

    fn layout(candles: &[Candle]) -> ChartGeometry {
        let stats = SeriesStats::from_candles(candles).unwrap();
        compute_geometry(candles, &stats, &utc_config()).unwrap()
    }

    #[test]
    fn test_candle_width_clamp() {
        assert_eq!(candle_width(1050.0, 1), 20);
        assert_eq!(candle_width(1050.0, 100), 10);
        assert_eq!(candle_width(1050.0, 5000), 1);
        assert_eq!(candle_width(15.0, 1), 15);
        assert_eq!(candle_width(1050.0, 0), 1);
    }

    #[test]
    fn test_tick_indices() {
        assert!(tick_indices(0, 10).is_empty());
        assert_eq!(tick_indices(1, 10), vec![0]);
        assert_eq!(tick_indices(2, 10), vec![0, 1]);
        assert_eq!(tick_indices(3, 10), vec![0, 1, 2]);
        assert_eq!(tick_indices(100, 10), vec![0, 11, 22, 33, 44, 55, 66, 77, 88, 99]);
        assert_eq!(tick_indices(5, 1), vec![0]);
    }

    #[test]
    fn test_tick_indices_round_to_nearest() {
        // 4 ticks over 12 candles: 0, 11/3, 22/3, 11
        assert_eq!(tick_indices(12, 4), vec![0, 4, 7, 11]);
    }

    #[test]
    fn test_empty_series() {
        let stats = SeriesStats::from_candles(&[Candle::new(0, 1.0, 1.0, 1.0, 1.0, 1.0)]).unwrap();
        assert_eq!(
            compute_geometry(&[], &stats, &LayoutConfig::default()),
            Err(LayoutError::EmptyData)
        );
    }

    #[test]
    fn test_canvas_too_small() {
        let candles = [Candle::new(0, 1.0, 2.0, 0.5, 1.5, 1.0)];
        let stats = SeriesStats::from_candles(&candles).unwrap();
        let config = LayoutConfig {
            canvas_width: 90,
            ..Default::default()
        };
        assert!(matches!(
            compute_geometry(&candles, &stats, &config),
            Err(LayoutError::CanvasTooSmall { panel: "price", .. })
        ));
    }

    #[test]
    fn test_two_candle_layout() {
        let candles = [
            Candle::new(0, 10.0, 12.0, 9.0, 11.0, 100.0),
            Candle::new(60, 11.0, 11.0, 8.0, 8.0, 50.0),
        ];
        let geometry = layout(&candles);

        assert_eq!(geometry.candle_width, 20);
        assert_eq!(geometry.candle_spacing, 525.0);

        let c0 = geometry.price.candles[0];
        assert_eq!(c0.x, 80.0);
        assert_eq!(c0.center_x, 90.0);
        assert_eq!(c0.wick_top, 40.0);
        assert_eq!(c0.wick_bottom, 355.0);
        assert_eq!(c0.body_top, 145.0);
        assert_eq!(c0.body_bottom, 250.0);
        assert_eq!(c0.direction, Direction::Up);

        let c1 = geometry.price.candles[1];
        assert_eq!(c1.x, 605.0);
        assert_eq!(c1.body_top, 145.0);
        assert_eq!(c1.body_bottom, 460.0);
        assert_eq!(c1.direction, Direction::Down);

        let bars = &geometry.volume.bars;
        assert_eq!(bars[0].top, 30.0);
        assert_eq!(bars[0].bottom, 140.0);
        assert_eq!(bars[1].height(), 55.0);
        assert_eq!(bars[1].direction, Direction::Down);
    }

    #[test]
    fn test_doji_body_min_height() {
        let candles = [
            Candle::new(0, 10.0, 11.0, 9.0, 10.0, 1.0),
            Candle::new(60, 10.0, 10.0, 10.0, 10.0, 1.0),
        ];
        let geometry = layout(&candles);
        for record in &geometry.price.candles {
            assert_eq!(record.body_height(), 1.0);
            assert_eq!(record.direction, Direction::Up);
        }
    }

    #[test]
    fn test_flat_series_midpoint() {
        let candles = vec![Candle::new(0, 5.0, 5.0, 5.0, 5.0, 0.0); 4];
        let geometry = layout(&candles);
        for record in &geometry.price.candles {
            assert_eq!(record.wick_top, 250.0);
            assert_eq!(record.wick_bottom, 250.0);
            assert_eq!(record.body_top, 250.0);
        }
        // Zero volume everywhere: flat bars on the baseline.
        for bar in &geometry.volume.bars {
            assert_eq!(bar.height(), 0.0);
        }
    }

    #[test]
    fn test_price_gridlines() {
        let candles = [
            Candle::new(0, 10.0, 12.0, 9.0, 11.0, 100.0),
            Candle::new(60, 11.0, 11.0, 8.0, 8.0, 50.0),
        ];
        let geometry = layout(&candles);
        let grid = &geometry.price.gridlines;
        assert_eq!(grid.len(), 11);
        assert_eq!(grid[0].y, 40.0);
        assert_eq!(grid[0].label.text, "12.00");
        assert_eq!(grid[0].label.anchor, Anchor::End);
        assert_eq!(grid[0].label.pos.x, 70.0);
        assert_eq!(grid[10].y, 460.0);
        assert_eq!(grid[10].label.text, "8.00");
        assert_eq!(grid[5].label.text, "10.00");
    }

    #[test]
    fn test_volume_gridlines() {
        let candles = [
            Candle::new(0, 10.0, 12.0, 9.0, 11.0, 12_500.0),
            Candle::new(60, 11.0, 11.0, 8.0, 8.0, 50.0),
        ];
        let geometry = layout(&candles);
        let grid = &geometry.volume.gridlines;
        assert_eq!(grid.len(), 6);
        assert_eq!(grid[0].label.text, "12,500");
        assert_eq!(grid[0].y, 30.0);
        assert_eq!(grid[5].label.text, "0");
        assert_eq!(grid[5].y, 140.0);
    }

    #[test]
    fn test_time_ticks() {
        let candles: Vec<Candle> = (0..3)
            .map(|i| Candle::new(1_735_516_800 + i * 60, 1.0, 2.0, 0.5, 1.5, 1.0))
            .collect();
        let geometry = layout(&candles);
        let ticks = &geometry.price.time_ticks;
        assert_eq!(ticks.len(), 3);
        assert_eq!(ticks[1].label.text, "00:01");
        assert_eq!(ticks[1].x, 80.0 + 350.0);
        assert_eq!(ticks[2].label.angle, TIME_LABEL_ANGLE);
        assert_eq!(ticks[0].label.pos.y, 475.0);
    }

    #[test]
    fn test_stats_line_and_title() {
        let candles = [
            Candle::new(0, 10.0, 12.0, 9.0, 11.0, 100.0),
            Candle::new(60, 11.0, 11.0, 8.0, 8.0, 50.0),
        ];
        let geometry = layout(&candles).titled("BTCUSDT@binance - 1m OHLC Chart");
        assert_eq!(
            geometry.stats_line,
            "First: O:10.00 H:12.00 L:9.00 C:11.00 | Last: O:11.00 H:11.00 L:8.00 C:8.00 | Bars: 2"
        );
        let title = geometry.price.title.unwrap();
        assert!(title.bold);
        assert_eq!(title.pos.x, 655.0);
        assert_eq!(title.pos.y, 20.0);
        assert_eq!(geometry.volume.title.pos.x, 655.0);
        assert_eq!(geometry.volume.title.pos.y, 15.0);
    }
}
