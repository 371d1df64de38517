/*
[INPUT]:  WebSocket URL, API key and subscribed data types
[OUTPUT]: Trade, book and heartbeat events via a bounded channel + connection state via watch
[POS]:    WebSocket layer - real-time data stream handling
[UPDATE]: When changing the handshake, dispatch rules or connection lifecycle
*/

use std::sync::Arc;

use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::sync::{Mutex, mpsc, watch};
use tokio_tungstenite::tungstenite::Message as WsMessage;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};
use tracing::{debug, info, warn};

use crate::auth::ApiKey;
use crate::http::{CoinApiError, Result};
use crate::types::DataType;
use crate::ws::message::{Hello, InboundMessage, StreamEvent, Subscription};

/// Production streaming endpoint
pub const STREAM_URL: &str = "wss://ws.coinapi.io/v1/";
const DEFAULT_CHANNEL_CAPACITY: usize = 100;

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Stream configuration
#[derive(Debug, Clone)]
pub struct StreamConfig {
    /// Events buffered before the reader stops pulling from the socket
    pub channel_capacity: usize,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
        }
    }
}

/// Connection lifecycle. `Closed` and `Errored` are terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamState {
    Idle,
    Connecting,
    /// Handshake sent, nothing received yet
    Open,
    Receiving,
    Closed,
    Errored(String),
}

impl StreamState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, StreamState::Closed | StreamState::Errored(_))
    }
}

/// Single-connection streaming client.
///
/// Events are delivered in arrival order through one bounded channel. When
/// the channel is full the reader waits, so a slow consumer holds back the
/// socket instead of losing events. Dropping the receiver closes the
/// connection. There is no reconnect: once the state is terminal the client
/// is spent.
#[derive(Debug)]
pub struct CoinApiStream {
    api_key: ApiKey,
    url: String,
    event_tx: Mutex<Option<mpsc::Sender<StreamEvent>>>,
    event_rx: Option<mpsc::Receiver<StreamEvent>>,
    state_tx: Arc<watch::Sender<StreamState>>,
}

impl CoinApiStream {
    /// Create a stream client for the production endpoint
    pub fn new(api_key: impl Into<ApiKey>) -> Self {
        Self::with_config(api_key, StreamConfig::default())
    }

    pub fn with_config(api_key: impl Into<ApiKey>, config: StreamConfig) -> Self {
        let (event_tx, event_rx) = mpsc::channel(config.channel_capacity.max(1));
        let (state_tx, _state_rx) = watch::channel(StreamState::Idle);
        Self {
            api_key: api_key.into(),
            url: STREAM_URL.to_string(),
            event_tx: Mutex::new(Some(event_tx)),
            event_rx: Some(event_rx),
            state_tx: Arc::new(state_tx),
        }
    }

    /// Use a different endpoint (sandbox, local test server)
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into().trim_end().to_string();
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Get the event receiver; only the first call returns it
    pub fn take_receiver(&mut self) -> Option<mpsc::Receiver<StreamEvent>> {
        self.event_rx.take()
    }

    pub fn state(&self) -> StreamState {
        self.state_tx.borrow().clone()
    }

    pub fn subscribe_state(&self) -> watch::Receiver<StreamState> {
        self.state_tx.subscribe()
    }

    /// Open the stream for `data_types` with heartbeats off and no symbol filter
    pub async fn connect(&self, data_types: &[DataType]) -> Result<()> {
        self.connect_with(Subscription::new(data_types.iter().cloned()))
            .await
    }

    /// Open the socket, send the handshake, and start dispatching events.
    ///
    /// Returns once the handshake is written. An open or handshake failure is
    /// returned as-is and leaves the client `Errored`.
    pub async fn connect_with(&self, subscription: Subscription) -> Result<()> {
        let hello = serde_json::to_string(&Hello::new(&self.api_key, &subscription))?;
        let event_tx = self
            .event_tx
            .lock()
            .await
            .take()
            .ok_or_else(|| CoinApiError::Config("stream already connected".to_string()))?;

        self.state_tx.send_replace(StreamState::Connecting);
        debug!(url = %self.url, "coinapi stream connecting");

        let ws_stream = match connect_async(self.url.as_str()).await {
            Ok((ws_stream, _response)) => ws_stream,
            Err(err) => {
                self.state_tx.send_replace(StreamState::Errored(err.to_string()));
                return Err(err.into());
            }
        };
        let (mut write, read) = ws_stream.split();

        if let Err(err) = write.send(WsMessage::Text(hello.into())).await {
            self.state_tx.send_replace(StreamState::Errored(err.to_string()));
            return Err(err.into());
        }

        let data_types: Vec<&str> = subscription.data_types.iter().map(DataType::as_str).collect();
        info!(
            url = %self.url,
            data_types = ?data_types,
            symbols = subscription.symbol_filter.len(),
            heartbeat = subscription.heartbeat,
            "coinapi stream handshake sent"
        );
        self.state_tx.send_replace(StreamState::Open);

        let state_tx = self.state_tx.clone();
        tokio::spawn(async move {
            let final_state = read_events(read, write, &event_tx, &state_tx).await;
            match &final_state {
                StreamState::Errored(reason) => warn!(reason = %reason, "coinapi stream failed"),
                _ => info!("coinapi stream closed"),
            }
            state_tx.send_replace(final_state);
            // Receivers see the channel close only after the terminal state is set.
            drop(event_tx);
        });

        Ok(())
    }
}

async fn read_events(
    mut read: SplitStream<WsStream>,
    mut write: SplitSink<WsStream, WsMessage>,
    event_tx: &mpsc::Sender<StreamEvent>,
    state_tx: &watch::Sender<StreamState>,
) -> StreamState {
    let mut receiving = false;

    loop {
        let incoming = tokio::select! {
            _ = event_tx.closed() => {
                let _ = write.send(WsMessage::Close(None)).await;
                return StreamState::Closed;
            }
            incoming = read.next() => incoming,
        };

        let text = match incoming {
            Some(Ok(WsMessage::Text(text))) => text.to_string(),
            Some(Ok(WsMessage::Binary(bytes))) => match String::from_utf8(bytes.to_vec()) {
                Ok(text) => text,
                Err(err) => return StreamState::Errored(format!("non-utf8 frame: {err}")),
            },
            Some(Ok(WsMessage::Close(frame))) => {
                debug!(frame = ?frame, "coinapi stream close frame");
                let _ = write.send(WsMessage::Close(None)).await;
                return StreamState::Closed;
            }
            Some(Ok(_)) => continue,
            Some(Err(err)) => return StreamState::Errored(err.to_string()),
            None => return StreamState::Closed,
        };

        if !receiving {
            receiving = true;
            state_tx.send_replace(StreamState::Receiving);
        }

        let event = match dispatch(&text) {
            Ok(event) => event,
            Err(err) => {
                let _ = write.send(WsMessage::Close(None)).await;
                return StreamState::Errored(format!("malformed message: {err}"));
            }
        };

        if let Some(event) = event
            && event_tx.send(event).await.is_err()
        {
            let _ = write.send(WsMessage::Close(None)).await;
            return StreamState::Closed;
        }
    }
}

/// Parse one inbound frame and pick the event to forward, if any.
///
/// Only text that is not JSON is an error. Service `error` messages are
/// logged here and never forwarded; unknown types are dropped without a trace.
fn dispatch(text: &str) -> serde_json::Result<Option<StreamEvent>> {
    let message = InboundMessage::parse(text)?;
    if let InboundMessage::Error(error) = &message {
        match error.message.as_deref() {
            Some(service_message) => warn!(service_message, "coinapi stream error message"),
            None => warn!(payload = ?error.payload, "coinapi stream error message"),
        }
    }
    Ok(message.into_event())
}
