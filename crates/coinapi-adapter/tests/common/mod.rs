/*
[INPUT]:  Test configuration and mock server requirements
[OUTPUT]: Shared test utilities, fixtures, and mock helpers
[POS]:    Test infrastructure - shared across all test modules
[UPDATE]: When adding new test patterns or fixtures
*/

//! Common test utilities for coinapi-adapter tests

#![allow(dead_code)]

use coinapi_adapter::{ClientConfig, CoinApiClient};
use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tokio_tungstenite::accept_async;
use tokio_tungstenite::tungstenite::Message;
use wiremock::MockServer;

pub const TEST_API_KEY: &str = "73034021-THIS-IS-SAMPLE-KEY";

/// Setup a mock HTTP server for testing
pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

/// REST client pointed at the mock server
pub fn client_for(server: &MockServer, config: ClientConfig) -> CoinApiClient {
    CoinApiClient::with_config_and_base_url(TEST_API_KEY, config, &server.uri())
        .expect("client init")
}

/// Start a one-shot WebSocket server.
///
/// It records the first client frame (the handshake), sends `script` in
/// order, closes, and then records any further text frames the client sent.
pub async fn spawn_stream_server(script: Vec<String>) -> (String, JoinHandle<Vec<String>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");

    let handle = tokio::spawn(async move {
        let (socket, _) = listener.accept().await.expect("accept");
        let mut ws = accept_async(socket).await.expect("ws handshake");
        let mut received = Vec::new();

        if let Some(Ok(Message::Text(text))) = ws.next().await {
            received.push(text.to_string());
        }

        for message in script {
            if ws.send(Message::Text(message.into())).await.is_err() {
                break;
            }
        }
        let _ = ws.close(None).await;

        while let Some(Ok(message)) = ws.next().await {
            if let Message::Text(text) = message {
                received.push(text.to_string());
            }
        }
        received
    });

    (format!("ws://{addr}"), handle)
}
