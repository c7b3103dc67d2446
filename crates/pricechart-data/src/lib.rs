//! Clients for the price server.
//!
//! - [`HistoryClient`] - blocking `GET /history` queries returning a [`Series`]
//! - [`StreamRelay`] - WebSocket subscription to live candle updates
//!
//! [`Series`]: pricechart_core::Series

pub mod client;
pub mod config;
pub mod error;
pub mod stream;
pub mod wire;

pub use client::HistoryClient;
pub use config::ClientConfig;
pub use error::{ErrorClass, FetchError, StreamError};
pub use stream::{stream_url, ClientMessage, StreamMessage, StreamRelay, Subscription};
pub use wire::HistoryResponse;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default price server host.
pub const DEFAULT_HOST: &str = "localhost";

/// Default port of the history (query) server.
pub const DEFAULT_HISTORY_PORT: u16 = 8080;

/// History request timeout, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
