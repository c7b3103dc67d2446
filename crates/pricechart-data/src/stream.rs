//! WebSocket relay for live candle updates.

use std::fmt;
use std::str::FromStr;

use futures_util::{SinkExt, StreamExt};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::{self, Message};
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

use crate::error::StreamError;

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// `ws://host:port/stream`
pub fn stream_url(host: &str, port: u16) -> String {
    format!("ws://{host}:{port}/stream")
}

/// One instrument/timeframe pair to subscribe to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subscription {
    pub instrument: String,
    pub timeframe_ms: i64,
}

impl Subscription {
    pub fn new(instrument: impl Into<String>, timeframe_ms: i64) -> Self {
        Self {
            instrument: instrument.into(),
            timeframe_ms,
        }
    }

    /// Subscriptions used when none are requested.
    pub fn defaults() -> Vec<Self> {
        vec![
            Self::new("BTCUSDT@BINANCE", 5_000),
            Self::new("ETHUSDT@BINANCE", 5_000),
            Self::new("ETHUSDT@BINANCE", 10_000),
        ]
    }

    pub fn to_message(&self) -> ClientMessage {
        ClientMessage::Subscribe {
            instrument: self.instrument.clone(),
            timeframe: self.timeframe_ms,
        }
    }
}

/// Parses `SYMBOL:MILLIS`. The split is on the last `:`.
impl FromStr for Subscription {
    type Err = StreamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || StreamError::InvalidSubscription(s.to_string());
        let (instrument, millis) = s.rsplit_once(':').ok_or_else(invalid)?;
        let timeframe_ms: i64 = millis.trim().parse().map_err(|_| invalid())?;
        if instrument.trim().is_empty() || timeframe_ms <= 0 {
            return Err(invalid());
        }
        Ok(Self::new(instrument.trim(), timeframe_ms))
    }
}

impl fmt::Display for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.instrument, self.timeframe_ms)
    }
}

/// Messages sent to the stream server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ClientMessage {
    #[serde(rename = "SUBSCRIBE")]
    Subscribe { instrument: String, timeframe: i64 },
}

/// An inbound message from the stream server.
#[derive(Debug, Clone, PartialEq)]
pub enum StreamMessage {
    /// Text frame holding valid JSON.
    Json(Value),
    /// Text frame that is not JSON.
    Text(String),
    Binary(Vec<u8>),
}

impl StreamMessage {
    pub fn from_text(text: &str) -> Self {
        match serde_json::from_str(text) {
            Ok(value) => StreamMessage::Json(value),
            Err(_) => StreamMessage::Text(text.to_string()),
        }
    }

    pub fn is_json(&self) -> bool {
        matches!(self, StreamMessage::Json(_))
    }

    /// Pretty-printed JSON, or the raw payload.
    pub fn render(&self) -> String {
        match self {
            StreamMessage::Json(value) => {
                serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
            }
            StreamMessage::Text(text) => text.clone(),
            StreamMessage::Binary(bytes) => String::from_utf8_lossy(bytes).into_owned(),
        }
    }
}

/// An open connection to the stream server.
pub struct StreamRelay {
    ws: WsStream,
}

impl StreamRelay {
    /// Connect to `url` (see [`stream_url`]).
    pub async fn connect(url: &str) -> Result<Self, StreamError> {
        let (ws, _) = connect_async(url).await?;
        log::info!("Connected to {url}");
        Ok(Self { ws })
    }

    /// Send a SUBSCRIBE message and return what was sent.
    pub async fn subscribe(&mut self, subscription: &Subscription) -> Result<ClientMessage, StreamError> {
        let message = subscription.to_message();
        let json = serde_json::to_string(&message)?;
        self.ws.send(Message::text(json)).await?;
        log::debug!("Subscribed to {subscription}");
        Ok(message)
    }

    /// Wait for the next data message.
    ///
    /// Returns `Ok(None)` once the server closes the connection.
    pub async fn next_message(&mut self) -> Result<Option<StreamMessage>, StreamError> {
        loop {
            match self.ws.next().await {
                Some(Ok(Message::Text(text))) => {
                    return Ok(Some(StreamMessage::from_text(text.as_str())));
                }
                Some(Ok(Message::Binary(data))) => {
                    return Ok(Some(StreamMessage::Binary(data.to_vec())));
                }
                Some(Ok(Message::Ping(data))) => {
                    self.ws.send(Message::Pong(data)).await?;
                }
                Some(Ok(Message::Pong(_))) | Some(Ok(Message::Frame(_))) => {}
                Some(Ok(Message::Close(frame))) => {
                    log::info!("Stream closed by server: {frame:?}");
                    return Ok(None);
                }
                Some(Err(tungstenite::Error::ConnectionClosed))
                | Some(Err(tungstenite::Error::AlreadyClosed))
                | None => return Ok(None),
                Some(Err(e)) => return Err(e.into()),
            }
        }
    }

    /// Close the connection.
    pub async fn close(&mut self) -> Result<(), StreamError> {
        self.ws.close(None).await?;
        Ok(())
    }
}
