/*
[INPUT]:  Subscription settings and raw inbound WebSocket JSON
[OUTPUT]: Hello handshake payload, parsed inbound messages, typed stream events
[POS]:    WebSocket layer - message parsing and handshake format
[UPDATE]: When adding new message types or changing format
*/

use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::auth::ApiKey;
use crate::types::serde_helpers::{lenient, lenient_decimal, lenient_seq};
use crate::types::{BookLevel, DataType};

/// What to request in the `hello` handshake
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Subscription {
    pub data_types: Vec<DataType>,
    /// Ask the service to send heartbeat messages
    pub heartbeat: bool,
    /// Symbol id prefixes; empty means every symbol
    pub symbol_filter: Vec<String>,
}

impl Subscription {
    pub fn new(data_types: impl IntoIterator<Item = DataType>) -> Self {
        Self {
            data_types: data_types.into_iter().collect(),
            heartbeat: false,
            symbol_filter: Vec::new(),
        }
    }

    pub fn with_heartbeat(mut self, heartbeat: bool) -> Self {
        self.heartbeat = heartbeat;
        self
    }

    pub fn with_symbol_filter<S: Into<String>>(mut self, symbols: impl IntoIterator<Item = S>) -> Self {
        self.symbol_filter = symbols.into_iter().map(Into::into).collect();
        self
    }
}

/// Handshake sent once, right after the socket opens
#[derive(Debug, Serialize)]
pub struct Hello<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    apikey: &'a str,
    heartbeat: bool,
    subscribe_data_type: &'a [DataType],
    subscribe_filter_symbol_id: &'a [String],
}

impl<'a> Hello<'a> {
    pub fn new(api_key: &'a ApiKey, subscription: &'a Subscription) -> Self {
        Self {
            kind: "hello",
            apikey: api_key.as_str(),
            heartbeat: subscription.heartbeat,
            subscribe_data_type: &subscription.data_types,
            subscribe_filter_symbol_id: &subscription.symbol_filter,
        }
    }
}

/// Trade event. Fields are a lenient view of `payload`, which holds the
/// message exactly as received.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct TradeMessage {
    #[serde(default, deserialize_with = "lenient")]
    pub symbol_id: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub sequence: Option<u64>,
    #[serde(default, deserialize_with = "lenient")]
    pub time_exchange: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub time_coinapi: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub uuid: Option<Uuid>,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub price: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub size: Option<Decimal>,
    /// `BUY`, `SELL`, `BUY_ESTIMATED`, `SELL_ESTIMATED` or `UNKNOWN`
    #[serde(default, deserialize_with = "lenient")]
    pub taker_side: Option<String>,
    #[serde(skip)]
    pub payload: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct BookMessage {
    #[serde(default, deserialize_with = "lenient")]
    pub symbol_id: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub sequence: Option<u64>,
    #[serde(default, deserialize_with = "lenient")]
    pub time_exchange: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub time_coinapi: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub is_snapshot: Option<bool>,
    #[serde(default, deserialize_with = "lenient_seq")]
    pub asks: Vec<BookLevel>,
    #[serde(default, deserialize_with = "lenient_seq")]
    pub bids: Vec<BookLevel>,
    #[serde(skip)]
    pub payload: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct HeartbeatMessage {
    pub payload: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct ErrorMessage {
    #[serde(default, deserialize_with = "lenient")]
    pub message: Option<String>,
    #[serde(skip)]
    pub payload: Map<String, Value>,
}

/// Inbound stream message, routed by its `type` field
#[derive(Debug, Clone, PartialEq)]
pub enum InboundMessage {
    Error(ErrorMessage),
    Trade(TradeMessage),
    Book(BookMessage),
    Heartbeat(HeartbeatMessage),
    /// Unknown `type`, no `type`, or not a JSON object
    Other,
}

/// Event delivered to stream subscribers
#[derive(Debug, Clone, PartialEq)]
pub enum StreamEvent {
    Trade(TradeMessage),
    Book(BookMessage),
    Heartbeat(HeartbeatMessage),
}

impl StreamEvent {
    pub fn kind(&self) -> &'static str {
        match self {
            StreamEvent::Trade(_) => "trade",
            StreamEvent::Book(_) => "book",
            StreamEvent::Heartbeat(_) => "heartbeat",
        }
    }

    /// The message as received
    pub fn payload(&self) -> &Map<String, Value> {
        match self {
            StreamEvent::Trade(trade) => &trade.payload,
            StreamEvent::Book(book) => &book.payload,
            StreamEvent::Heartbeat(heartbeat) => &heartbeat.payload,
        }
    }
}

impl InboundMessage {
    /// Parse and route one frame. Fails only when `text` is not JSON.
    pub fn parse(text: &str) -> serde_json::Result<Self> {
        let value: Value = serde_json::from_str(text)?;
        let kind = value.get("type").and_then(Value::as_str).unwrap_or_default();

        let message = match kind {
            "error" => InboundMessage::Error(ErrorMessage {
                payload: into_payload(&value),
                ..typed_view(&value)
            }),
            "trade" => InboundMessage::Trade(TradeMessage {
                payload: into_payload(&value),
                ..typed_view(&value)
            }),
            "book" => InboundMessage::Book(BookMessage {
                payload: into_payload(&value),
                ..typed_view(&value)
            }),
            "heartbeat" => InboundMessage::Heartbeat(HeartbeatMessage {
                payload: into_payload(&value),
            }),
            _ => InboundMessage::Other,
        };
        Ok(message)
    }

    /// Public event for this message; `error` and unknown types have none
    pub fn into_event(self) -> Option<StreamEvent> {
        match self {
            InboundMessage::Trade(trade) => Some(StreamEvent::Trade(trade)),
            InboundMessage::Book(book) => Some(StreamEvent::Book(book)),
            InboundMessage::Heartbeat(heartbeat) => Some(StreamEvent::Heartbeat(heartbeat)),
            InboundMessage::Error(_) | InboundMessage::Other => None,
        }
    }
}

// Every field is lenient, so only a non-object could fail here and those
// are routed to `Other` before this is reached.
fn typed_view<T: DeserializeOwned + Default>(value: &Value) -> T {
    T::deserialize(value).unwrap_or_default()
}

fn into_payload(value: &Value) -> Map<String, Value> {
    value.as_object().cloned().unwrap_or_default()
}
