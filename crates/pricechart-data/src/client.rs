//! Blocking HTTP client for `GET /history`.

use pricechart_core::{Series, TimeWindow};
use reqwest::blocking::Client;
use reqwest::Url;

use crate::config::ClientConfig;
use crate::error::FetchError;
use crate::wire::HistoryResponse;

/// Client for the history endpoint of the price server.
///
/// Every call opens its own connection and releases it before returning.
#[derive(Debug, Clone)]
pub struct HistoryClient {
    config: ClientConfig,
    http: Client,
}

impl HistoryClient {
    /// Create a new client with the given configuration.
    pub fn new(config: ClientConfig) -> Result<Self, FetchError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .pool_max_idle_per_host(0)
            .build()?;

        Ok(Self { config, http })
    }

    /// Get the configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Full request URL for a history query.
    pub fn history_url(
        &self,
        symbol: &str,
        timeframe: &str,
        window: &TimeWindow,
    ) -> Result<Url, FetchError> {
        let from = window.start_ts().to_string();
        let to = window.end_ts().to_string();
        Url::parse_with_params(
            &format!("{}/history", self.config.base_url()),
            &[
                ("symbol", symbol),
                ("interval", timeframe),
                ("from", from.as_str()),
                ("to", to.as_str()),
            ],
        )
        .map_err(|e| FetchError::InvalidUrl(e.to_string()))
    }

    /// Fetch the candles of `symbol` at `timeframe` inside `window`.
    pub fn fetch(
        &self,
        symbol: &str,
        timeframe: &str,
        window: &TimeWindow,
    ) -> Result<Series, FetchError> {
        let url = self.history_url(symbol, timeframe, window)?;
        log::info!("GET {url}");

        let response = self.http.get(url).send()?;
        let status = response.status();

        if !status.is_success() {
            let reason = status.canonical_reason().unwrap_or("Unknown").to_string();
            log::warn!("History request failed with HTTP {}", status.as_u16());
            return Err(FetchError::Status {
                status: status.as_u16(),
                reason,
            });
        }

        let body = response.text()?;
        log::debug!("Received {} bytes", body.len());
        let parsed: HistoryResponse = serde_json::from_str(&body)?;
        let series = parsed.into_series()?;

        log::debug!(
            "Fetched {} candles for {} ({}) in [{}, {}]",
            series.len(),
            symbol,
            timeframe,
            window.start_ts(),
            window.end_ts()
        );
        Ok(series)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_url() {
        let client = HistoryClient::new(ClientConfig::new("localhost", 8080)).unwrap();
        let window = TimeWindow::new(1_735_516_800, 1_735_520_400).unwrap();
        let url = client.history_url("AAPL", "5m", &window).unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8080/history?symbol=AAPL&interval=5m&from=1735516800&to=1735520400"
        );
    }

    #[test]
    fn test_history_url_encodes_symbol() {
        let client = HistoryClient::new(ClientConfig::default()).unwrap();
        let window = TimeWindow::new(0, 60).unwrap();
        let url = client.history_url("BTC/USD", "1m", &window).unwrap();
        assert!(url.as_str().contains("symbol=BTC%2FUSD"));
    }
}
