/*
[INPUT]:  API key and optional HTTP/stream configuration
[OUTPUT]: REST client and stream clients sharing one credential
[POS]:    Facade - single entry point over the HTTP and WebSocket layers
[UPDATE]: When adding new client kinds or shared settings
*/

use crate::auth::ApiKey;
use crate::http::{ClientConfig, CoinApiClient, Result};
use crate::ws::{CoinApiStream, StreamConfig};

/// CoinAPI entry point.
///
/// REST calls go through [`CoinApi::rest`]; each call to [`CoinApi::stream`]
/// builds a fresh, unconnected stream client with the same key.
#[derive(Debug, Clone)]
pub struct CoinApi {
    rest: CoinApiClient,
    stream_config: StreamConfig,
    stream_url: Option<String>,
}

impl CoinApi {
    pub fn new(api_key: impl Into<ApiKey>) -> Result<Self> {
        Self::with_config(api_key, ClientConfig::default())
    }

    pub fn with_config(api_key: impl Into<ApiKey>, config: ClientConfig) -> Result<Self> {
        Ok(Self::from_client(CoinApiClient::with_config(api_key, config)?))
    }

    /// Wrap an already configured REST client
    pub fn from_client(rest: CoinApiClient) -> Self {
        Self {
            rest,
            stream_config: StreamConfig::default(),
            stream_url: None,
        }
    }

    pub fn with_stream_config(mut self, config: StreamConfig) -> Self {
        self.stream_config = config;
        self
    }

    pub fn with_stream_url(mut self, url: impl Into<String>) -> Self {
        self.stream_url = Some(url.into());
        self
    }

    pub fn api_key(&self) -> &ApiKey {
        self.rest.api_key()
    }

    pub fn rest(&self) -> &CoinApiClient {
        &self.rest
    }

    pub fn stream(&self) -> CoinApiStream {
        let stream = CoinApiStream::with_config(self.api_key().clone(), self.stream_config.clone());
        match &self.stream_url {
            Some(url) => stream.with_url(url.clone()),
            None => stream,
        }
    }
}
