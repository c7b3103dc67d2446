//! Console summary of a fetched series.

use pricechart_core::SeriesStats;
use pricechart_layout::fmt::{format_datetime, format_price, format_volume};
use pricechart_layout::LabelZone;

const RULE_WIDTH: usize = 80;

/// The statistics block printed before rendering.
pub fn summary(instrument: &str, timeframe: &str, stats: &SeriesStats, zone: LabelZone) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    [
        rule.clone(),
        format!("Instrument: {instrument} | Timeframe: {timeframe}"),
        format!("Data points: {}", stats.count),
        format!(
            "Time range: {} to {}",
            format_datetime(stats.first.timestamp, zone),
            format_datetime(stats.last.timestamp, zone)
        ),
        format!(
            "Price range: {} - {}",
            format_price(stats.min_price),
            format_price(stats.max_price)
        ),
        format!("Max volume: {}", format_volume(stats.max_volume)),
        rule,
    ]
    .join("\n")
}
