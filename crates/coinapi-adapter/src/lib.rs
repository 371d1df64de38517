/*
[INPUT]:  Crate modules and public type definitions
[OUTPUT]: Public CoinAPI adapter crate surface
[POS]:    Crate root - module wiring
[UPDATE]: When public modules or exports change
*/

pub mod api;
pub mod auth;
pub mod http;
pub mod types;
pub mod ws;

pub use api::CoinApi;

pub use auth::ApiKey;

// Re-export commonly used types from http
pub use http::{
    ClientConfig,
    CoinApiClient,
    CoinApiError,
    QueryMode,
    QueryParams,
    Result,
};

// Re-export all types
pub use types::*;

// Re-export commonly used types from ws
pub use ws::{
    BookMessage,
    CoinApiStream,
    HeartbeatMessage,
    StreamConfig,
    StreamEvent,
    StreamState,
    Subscription,
    TradeMessage,
};
