/*
[INPUT]:  HTTP client configuration, API key and endpoint parameters
[OUTPUT]: HTTP responses and typed API results
[POS]:    HTTP layer - REST API communication
[UPDATE]: When adding new endpoints or changing client behavior
*/

pub mod client;
pub mod error;
pub mod exchange_rate;
pub mod metadata;
pub mod ohlcv;
pub mod orderbook;
pub mod query;
pub mod quotes;

pub use error::{CoinApiError, Result};
pub use query::{ParamValue, QueryMode, QueryParams};

pub use client::{ClientConfig, CoinApiClient, REST_BASE_URL};
