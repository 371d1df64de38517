/*
[INPUT]:  Stream configuration, API key and subscribed data types
[OUTPUT]: Real-time trade, book and heartbeat events
[POS]:    WebSocket layer - real-time data streams
[UPDATE]: When adding new event types or changing connection logic
*/

pub mod client;
pub mod message;

pub use client::{CoinApiStream, STREAM_URL, StreamConfig, StreamState};
pub use message::{
    BookMessage, ErrorMessage, HeartbeatMessage, Hello, InboundMessage, StreamEvent,
    Subscription, TradeMessage,
};
