/*
[INPUT]:  API key, HTTP configuration (timeouts, query mode), base URL
[OUTPUT]: Configured reqwest client and JSON GET helper used by every endpoint
[POS]:    HTTP layer - core client implementation
[UPDATE]: When adding connection options or changing request/response handling
*/

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName};
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::auth::{API_KEY_HEADER, ApiKey};
use crate::http::query::{QueryMode, QueryParams};
use crate::http::{CoinApiError, Result};

/// Base URL for the CoinAPI REST API
pub const REST_BASE_URL: &str = "https://rest.coinapi.io";

/// HTTP client configuration
///
/// No timeouts are set by default; a hung request is only abandoned when the
/// caller drops its future.
#[derive(Debug, Clone, Default)]
pub struct ClientConfig {
    pub timeout: Option<Duration>,
    pub connect_timeout: Option<Duration>,
    pub query_mode: QueryMode,
}

/// REST client for CoinAPI market data
#[derive(Debug, Clone)]
pub struct CoinApiClient {
    http_client: Client,
    base_url: Url,
    api_key: ApiKey,
    query_mode: QueryMode,
}

impl CoinApiClient {
    /// Create a new client with default configuration
    pub fn new(api_key: impl Into<ApiKey>) -> Result<Self> {
        Self::with_config(api_key, ClientConfig::default())
    }

    /// Create a new client with custom configuration
    pub fn with_config(api_key: impl Into<ApiKey>, config: ClientConfig) -> Result<Self> {
        Self::with_config_and_base_url(api_key, config, REST_BASE_URL)
    }

    /// Create a client against a different base URL (sandbox, proxy, mock server).
    ///
    /// A path prefix on `base_url` is kept: `https://proxy/coinapi` serves
    /// `/v1/assets` from `https://proxy/coinapi/v1/assets`.
    pub fn with_config_and_base_url(
        api_key: impl Into<ApiKey>,
        config: ClientConfig,
        base_url: &str,
    ) -> Result<Self> {
        let api_key = api_key.into();

        let mut headers = HeaderMap::new();
        let header_name = HeaderName::from_bytes(API_KEY_HEADER.as_bytes())
            .map_err(|err| CoinApiError::Config(format!("invalid header name: {err}")))?;
        headers.insert(header_name, api_key.header_value()?);

        let mut builder = Client::builder().default_headers(headers);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(connect_timeout) = config.connect_timeout {
            builder = builder.connect_timeout(connect_timeout);
        }

        let mut base_url = Url::parse(base_url)?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self {
            http_client: builder.build()?,
            base_url,
            api_key,
            query_mode: config.query_mode,
        })
    }

    pub fn api_key(&self) -> &ApiKey {
        &self.api_key
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn query_mode(&self) -> QueryMode {
        self.query_mode
    }

    /// Path plus serialized query string for `params`
    pub(crate) fn endpoint(&self, path: &str, params: &QueryParams) -> String {
        format!("{path}{}", params.to_query_string(self.query_mode))
    }

    /// GET `endpoint` and decode the JSON body.
    ///
    /// Failures are logged once here and returned unchanged.
    pub(crate) async fn get_json<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T> {
        debug!(endpoint = %endpoint, "coinapi request");

        let result = self.fetch_json(endpoint).await;
        if let Err(err) = &result {
            warn!(
                endpoint = %endpoint,
                status = err.status(),
                error = %err,
                "coinapi request failed"
            );
        }
        result
    }

    async fn fetch_json<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T> {
        // Relative join keeps the base path prefix.
        let url = self.base_url.join(endpoint.trim_start_matches('/'))?;
        let response = self.http_client.get(url).send().await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(CoinApiError::api_error(status, body));
        }

        Ok(serde_json::from_str(&body)?)
    }
}
