//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;
use pricechart_core::RangeRequest;

#[derive(Parser, Debug)]
#[command(name = "pricechart")]
#[command(version, about = "Fetch OHLCV history from a price server and chart it")]
pub struct Args {
    /// Instrument symbol (e.g. BTCUSDT@BINANCE)
    #[arg(long)]
    pub instrument: String,

    /// Bar timeframe (e.g. 1m, 5m, 1h, 1d)
    #[arg(long)]
    pub timeframe: String,

    /// Start timestamp in seconds (Unix epoch)
    #[arg(long, allow_hyphen_values = true)]
    pub start: Option<i64>,

    /// End timestamp in seconds (Unix epoch). Defaults to now
    #[arg(long, allow_hyphen_values = true)]
    pub end: Option<i64>,

    /// Fetch the last N bars up to now instead of --start/--end
    #[arg(long)]
    pub last: Option<u32>,

    /// Price server host [default: localhost, or the config value]
    #[arg(long)]
    pub host: Option<String>,

    /// Price server port [default: 8080, or the config value]
    #[arg(long)]
    pub port: Option<u16>,

    /// SVG file to write [default: <instrument>-<timeframe>.svg]
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Print the summary only, do not render a chart
    #[arg(long)]
    pub no_render: bool,

    /// Configuration file to load instead of the default locations
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Args {
    pub fn range_request(&self) -> RangeRequest {
        RangeRequest {
            timeframe: self.timeframe.clone(),
            start: self.start,
            end: self.end,
            last: self.last,
        }
    }

    pub fn output_path(&self) -> PathBuf {
        self.output.clone().unwrap_or_else(|| {
            PathBuf::from(format!(
                "{}-{}.svg",
                file_safe(&self.instrument),
                file_safe(&self.timeframe)
            ))
        })
    }
}

/// Replace characters that are awkward in file names.
fn file_safe(s: &str) -> String {
    s.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect()
}
