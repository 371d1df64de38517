/*
[INPUT]:  Local WebSocket server scripts
[OUTPUT]: Test results for the stream client handshake and dispatch
[POS]:    Integration tests - WebSocket
[UPDATE]: When WebSocket client changes
*/

mod common;

use std::time::Duration;

use coinapi_adapter::{
    CoinApi, CoinApiError, CoinApiStream, DataType, StreamEvent, StreamState, Subscription,
};
use common::{TEST_API_KEY, spawn_stream_server};
use serde_json::json;
use tokio::sync::mpsc;
use tokio::time::timeout;

const WAIT: Duration = Duration::from_secs(5);

async fn next_event(rx: &mut mpsc::Receiver<StreamEvent>) -> Option<StreamEvent> {
    timeout(WAIT, rx.recv()).await.expect("timed out waiting for event")
}

fn trade_json() -> String {
    json!({
        "type": "trade",
        "symbol_id": "BITSTAMP_SPOT_BTC_USD",
        "sequence": 2323346,
        "time_exchange": "2013-09-28T22:40:50.3564434Z",
        "time_coinapi": "2017-03-18T22:42:21.3763342Z",
        "uuid": "770C7A3B-7258-4441-8182-83740F3E2457",
        "price": 770.0,
        "size": 0.05,
        "taker_side": "BUY"
    })
    .to_string()
}

#[test]
fn test_stream_creation() {
    let mut stream = CoinApiStream::new(TEST_API_KEY);
    assert_eq!(stream.state(), StreamState::Idle);
    assert!(stream.take_receiver().is_some());
    assert!(stream.take_receiver().is_none());
}

#[tokio::test]
async fn test_handshake_and_dispatch() {
    let script = vec![
        trade_json(),
        json!({"type": "error", "message": "Invalid symbol"}).to_string(),
        json!({"type": "quote", "symbol_id": "BITSTAMP_SPOT_BTC_USD"}).to_string(),
        json!({
            "type": "book",
            "symbol_id": "BITSTAMP_SPOT_BTC_USD",
            "is_snapshot": false,
            "asks": [{"price": 456.35, "size": 123}],
            "bids": []
        })
        .to_string(),
        json!({"type": "heartbeat"}).to_string(),
    ];
    let (url, server) = spawn_stream_server(script).await;

    let mut stream = CoinApiStream::new(TEST_API_KEY).with_url(url);
    let mut events = stream.take_receiver().expect("receiver");
    stream
        .connect(&[DataType::Trade, DataType::Book, DataType::Heartbeat])
        .await
        .expect("connect");

    match next_event(&mut events).await {
        Some(StreamEvent::Trade(trade)) => {
            assert_eq!(trade.symbol_id.as_deref(), Some("BITSTAMP_SPOT_BTC_USD"));
            assert_eq!(trade.sequence, Some(2_323_346));
            assert_eq!(trade.taker_side.as_deref(), Some("BUY"));
        }
        other => panic!("expected trade, got {other:?}"),
    }
    match next_event(&mut events).await {
        Some(StreamEvent::Book(book)) => {
            assert_eq!(book.is_snapshot, Some(false));
            assert_eq!(book.asks.len(), 1);
        }
        other => panic!("expected book, got {other:?}"),
    }
    assert!(matches!(
        next_event(&mut events).await,
        Some(StreamEvent::Heartbeat(_))
    ));
    assert!(next_event(&mut events).await.is_none());
    assert_eq!(stream.state(), StreamState::Closed);

    let received = timeout(WAIT, server).await.expect("server timeout").expect("server task");
    assert_eq!(received.len(), 1, "exactly one handshake frame: {received:?}");

    let hello: serde_json::Value = serde_json::from_str(&received[0]).expect("hello json");
    assert_eq!(
        hello,
        json!({
            "type": "hello",
            "apikey": TEST_API_KEY,
            "heartbeat": false,
            "subscribe_data_type": ["trade", "book", "heartbeat"],
            "subscribe_filter_symbol_id": []
        })
    );
}

#[tokio::test]
async fn test_custom_subscription_handshake() {
    let (url, server) = spawn_stream_server(Vec::new()).await;

    let stream = CoinApiStream::new(TEST_API_KEY).with_url(url);
    let subscription = Subscription::new([DataType::Trade, DataType::from("book20")])
        .with_heartbeat(true)
        .with_symbol_filter(["BITSTAMP_SPOT_BTC_USD", "KRAKEN"]);
    stream.connect_with(subscription).await.expect("connect");

    let received = timeout(WAIT, server).await.expect("server timeout").expect("server task");
    let hello: serde_json::Value = serde_json::from_str(&received[0]).expect("hello json");
    assert_eq!(hello["heartbeat"], json!(true));
    assert_eq!(hello["subscribe_data_type"], json!(["trade", "book20"]));
    assert_eq!(
        hello["subscribe_filter_symbol_id"],
        json!(["BITSTAMP_SPOT_BTC_USD", "KRAKEN"])
    );
}

#[tokio::test]
async fn test_malformed_message_ends_stream() {
    let (url, _server) = spawn_stream_server(vec!["{not json".to_string(), trade_json()]).await;

    let mut stream = CoinApiStream::new(TEST_API_KEY).with_url(url);
    let mut events = stream.take_receiver().expect("receiver");
    stream.connect(&[DataType::Trade]).await.expect("connect");

    assert!(next_event(&mut events).await.is_none());
    match stream.state() {
        StreamState::Errored(reason) => assert!(reason.contains("malformed")),
        other => panic!("expected errored state, got {other:?}"),
    }
}

#[tokio::test]
async fn test_odd_but_valid_messages_keep_stream_alive() {
    let script = vec![
        json!({"type": "trade", "symbol_id": "ODD", "price": 1e30, "uuid": "abc"}).to_string(),
        json!({"type": "book", "symbol_id": "ODD", "asks": null}).to_string(),
        json!({"type": "error", "message": 5}).to_string(),
        json!({"symbol_id": "NO_TYPE"}).to_string(),
        trade_json(),
    ];
    let (url, _server) = spawn_stream_server(script).await;

    let mut stream = CoinApiStream::new(TEST_API_KEY).with_url(url);
    let mut events = stream.take_receiver().expect("receiver");
    stream
        .connect(&[DataType::Trade, DataType::Book])
        .await
        .expect("connect");

    match next_event(&mut events).await {
        Some(StreamEvent::Trade(trade)) => {
            assert_eq!(trade.symbol_id.as_deref(), Some("ODD"));
            assert!(trade.price.is_none());
            assert_eq!(trade.payload.get("uuid"), Some(&json!("abc")));
        }
        other => panic!("expected odd trade, got {other:?}"),
    }
    match next_event(&mut events).await {
        Some(StreamEvent::Book(book)) => assert!(book.asks.is_empty()),
        other => panic!("expected book, got {other:?}"),
    }
    match next_event(&mut events).await {
        Some(StreamEvent::Trade(trade)) => {
            assert_eq!(trade.symbol_id.as_deref(), Some("BITSTAMP_SPOT_BTC_USD"));
            assert_eq!(trade.price, Some("770".parse().expect("price")));
        }
        other => panic!("expected trade, got {other:?}"),
    }
    assert!(next_event(&mut events).await.is_none());
    assert_eq!(stream.state(), StreamState::Closed);
}

#[tokio::test]
async fn test_state_reaches_closed() {
    let (url, _server) = spawn_stream_server(vec![json!({"type": "heartbeat"}).to_string()]).await;

    let stream = CoinApiStream::new(TEST_API_KEY).with_url(url);
    let mut state = stream.subscribe_state();
    stream.connect(&[DataType::Heartbeat]).await.expect("connect");

    let terminal = timeout(WAIT, state.wait_for(|state| state.is_terminal()))
        .await
        .expect("state timeout")
        .expect("state sender alive")
        .clone();
    assert_eq!(terminal, StreamState::Closed);
}

#[tokio::test]
async fn test_open_failure_is_returned() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
    let url = format!("ws://{}", listener.local_addr().expect("local addr"));
    drop(listener);

    let mut stream = CoinApiStream::new(TEST_API_KEY).with_url(url);
    let mut events = stream.take_receiver().expect("receiver");

    let err = stream.connect(&[DataType::Trade]).await.unwrap_err();
    assert!(matches!(err, CoinApiError::WebSocket(_)));
    assert!(matches!(stream.state(), StreamState::Errored(_)));
    assert!(next_event(&mut events).await.is_none());
}

#[tokio::test]
async fn test_second_connect_is_rejected() {
    let (url, _server) = spawn_stream_server(Vec::new()).await;

    let stream = CoinApiStream::new(TEST_API_KEY).with_url(url);
    stream.connect(&[DataType::Trade]).await.expect("connect");

    let err = stream.connect(&[DataType::Trade]).await.unwrap_err();
    assert!(matches!(err, CoinApiError::Config(_)));
}

#[tokio::test]
async fn test_facade_stream_uses_shared_key() {
    let (url, server) = spawn_stream_server(Vec::new()).await;

    let api = CoinApi::new(TEST_API_KEY).expect("facade").with_stream_url(url);
    api.stream().connect(&[DataType::Book]).await.expect("connect");

    let received = timeout(WAIT, server).await.expect("server timeout").expect("server task");
    let hello: serde_json::Value = serde_json::from_str(&received[0]).expect("hello json");
    assert_eq!(hello["apikey"], json!(TEST_API_KEY));
    assert_eq!(hello["subscribe_data_type"], json!(["book"]));
}
