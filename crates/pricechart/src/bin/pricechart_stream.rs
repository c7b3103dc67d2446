//! pricechart-stream - subscribe to live candles and print every message.
//!
//! Usage: pricechart-stream [host] [port] [--subscribe SYMBOL:MILLIS]...
//!
//! Host and port default to `server.host` and `server.stream_port` of the
//! config file.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use pricechart_config::Config;
use pricechart_data::{stream_url, StreamMessage, StreamRelay, Subscription};

#[derive(Parser, Debug)]
#[command(name = "pricechart-stream")]
#[command(about = "Relay live candle updates from the price server stream")]
struct Args {
    /// Stream server host [default: server.host from config]
    host: Option<String>,

    /// Stream server port [default: server.stream_port from config]
    port: Option<u16>,

    /// Subscription as SYMBOL:MILLIS, repeatable [default: BTCUSDT@BINANCE:5000,
    /// ETHUSDT@BINANCE:5000, ETHUSDT@BINANCE:10000]
    #[arg(long, short, value_parser = parse_subscription)]
    subscribe: Vec<Subscription>,

    /// Config file (defaults to the first found in the search paths)
    #[arg(long)]
    config: Option<PathBuf>,
}

impl Args {
    /// Host and port to connect to, command line first.
    fn endpoint(&self, config: &Config) -> (String, u16) {
        (
            self.host.clone().unwrap_or_else(|| config.server.host.clone()),
            self.port.unwrap_or(config.server.stream_port),
        )
    }
}

fn parse_subscription(s: &str) -> Result<Subscription, String> {
    s.parse().map_err(|e: pricechart_data::StreamError| e.to_string())
}

fn timestamp() -> String {
    Local::now().format("%Y-%m-%d %H:%M:%S%.3f").to_string()
}

async fn run(args: Args) -> Result<()> {
    let config = match &args.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => Config::load_default(),
    };
    let (host, port) = args.endpoint(&config);
    let url = stream_url(&host, port);
    println!("[{}] Connecting to {url}...", timestamp());

    let mut relay = StreamRelay::connect(&url)
        .await
        .with_context(|| format!("Connection refused. Is the server running on {url}?"))?;
    println!("[{}] Connected!", timestamp());

    let subscriptions = if args.subscribe.is_empty() {
        Subscription::defaults()
    } else {
        args.subscribe
    };
    for subscription in &subscriptions {
        let sent = relay.subscribe(subscription).await?;
        println!("\n[{}] >>> SENDING:", timestamp());
        println!("{}", serde_json::to_string_pretty(&sent)?);
    }

    println!("\n[{}] Listening for messages (Ctrl+C to exit)...", timestamp());
    println!("{}", "-".repeat(60));

    let mut interrupted = false;
    loop {
        tokio::select! {
            message = relay.next_message() => match message? {
                Some(message) => {
                    let header = if message.is_json() || matches!(message, StreamMessage::Binary(_)) {
                        "<<< RECEIVED:"
                    } else {
                        "<<< RECEIVED (raw):"
                    };
                    println!("\n[{}] {header}", timestamp());
                    println!("{}", message.render());
                }
                None => {
                    println!("\n[{}] Connection closed", timestamp());
                    break;
                }
            },
            _ = tokio::signal::ctrl_c() => {
                interrupted = true;
                break;
            }
        }
    }

    if interrupted {
        println!("\n[{}] Interrupted by user", timestamp());
        if let Err(e) = relay.close().await {
            log::debug!("Close failed: {e}");
        }
    }

    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    env_logger::init();

    println!("Price Server WebSocket Client");
    println!("{}", "=".repeat(60));

    let args = Args::parse();
    if let Err(e) = run(args).await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
