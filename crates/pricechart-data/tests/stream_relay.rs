use futures_util::{SinkExt, StreamExt};
use pricechart_data::{stream_url, StreamMessage, StreamRelay, Subscription};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio_tungstenite::{accept_async, tungstenite::Message};

/// Accepts one client, records the first text frame, pushes two frames and closes.
async fn serve_once(listener: TcpListener) -> Value {
    let (tcp, _) = listener.accept().await.unwrap();
    let mut ws = accept_async(tcp).await.unwrap();

    let first = loop {
        match ws.next().await.unwrap().unwrap() {
            Message::Text(text) => break serde_json::from_str::<Value>(text.as_str()).unwrap(),
            _ => continue,
        }
    };

    ws.send(Message::text(r#"{"instrument":"BTCUSDT@BINANCE","close":42.5}"#))
        .await
        .unwrap();
    ws.send(Message::text("heartbeat")).await.unwrap();
    ws.close(None).await.unwrap();
    first
}

#[tokio::test]
async fn subscribes_and_relays_messages() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    let server = tokio::spawn(serve_once(listener));

    let mut relay = StreamRelay::connect(&stream_url("127.0.0.1", port))
        .await
        .unwrap();
    relay
        .subscribe(&Subscription::new("BTCUSDT@BINANCE", 5_000))
        .await
        .unwrap();

    let first = relay.next_message().await.unwrap().unwrap();
    assert_eq!(
        first,
        StreamMessage::Json(json!({"instrument": "BTCUSDT@BINANCE", "close": 42.5}))
    );

    let second = relay.next_message().await.unwrap().unwrap();
    assert_eq!(second, StreamMessage::Text("heartbeat".into()));

    assert!(relay.next_message().await.unwrap().is_none());

    let received = server.await.unwrap();
    assert_eq!(
        received,
        json!({"type": "SUBSCRIBE", "instrument": "BTCUSDT@BINANCE", "timeframe": 5000})
    );
}

#[tokio::test]
async fn connect_fails_without_server() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    assert!(StreamRelay::connect(&stream_url("127.0.0.1", port)).await.is_err());
}
