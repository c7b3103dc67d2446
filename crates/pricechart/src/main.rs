//! pricechart - fetch OHLCV history from a price server and chart it.

mod chart;
mod cli;
mod report;

use anyhow::{Context, Result};
use clap::Parser;
use pricechart_config::Config;
use pricechart_core::{resolve_window, SystemClock};
use pricechart_data::{ClientConfig, ErrorClass, HistoryClient};

use cli::Args;

fn run() -> Result<()> {
    env_logger::init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => Config::load_default(),
    };

    // Validate everything that can fail before touching the network.
    let window = resolve_window(&args.range_request(), &SystemClock)?;
    log::debug!(
        "Requesting [{}, {}] ({}s)",
        window.start_ts(),
        window.end_ts(),
        window.duration_secs()
    );
    let layout = config.chart.to_layout();
    let palette = chart::palette(&config.colors)?;

    let client_config = ClientConfig::new(
        args.host.clone().unwrap_or_else(|| config.server.host.clone()),
        args.port.unwrap_or(config.server.port),
    )
    .with_timeout(config.server.timeout());
    let client = HistoryClient::new(client_config)?;

    if let Some(bars) = args.last.filter(|&n| n > 0) {
        println!("Fetching last {bars} bars ({}) from now", args.timeframe);
    }
    let url = client.history_url(&args.instrument, &args.timeframe, &window)?;
    println!("Fetching data from {url}");

    let series = client
        .fetch(&args.instrument, &args.timeframe, &window)
        .map_err(|e| match e.class() {
            ErrorClass::Network => anyhow::Error::new(e).context("Error fetching data"),
            ErrorClass::Server => e.into(),
        })?;

    let Some(stats) = series.stats() else {
        eprintln!("No data to plot");
        return Ok(());
    };

    println!();
    println!(
        "{}",
        report::summary(&args.instrument, &args.timeframe, &stats, layout.label_zone)
    );
    println!();

    if args.no_render {
        return Ok(());
    }

    let surface = chart::render_svg(&series, &args.instrument, &args.timeframe, &layout, &palette)?;
    let output = args.output_path();
    surface.write_to(&output)?;
    println!("Chart written to {}", output.display());

    Ok(())
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
