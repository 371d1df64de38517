/*
[INPUT]:  API key string or environment variable
[OUTPUT]: Immutable credential for REST headers and stream handshakes
[POS]:    Auth layer - static API key credential
[UPDATE]: When credential sources or header names change
*/

use std::fmt;

use reqwest::header::HeaderValue;

use crate::http::{CoinApiError, Result};

/// Header carrying the API key on every REST call
pub const API_KEY_HEADER: &str = "X-CoinAPI-Key";

/// Environment variable read by [`ApiKey::from_env`]
pub const API_KEY_ENV: &str = "COINAPI_KEY";

/// CoinAPI key. The value is redacted from `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Read the key from `COINAPI_KEY`
    pub fn from_env() -> Result<Self> {
        Self::from_env_var(API_KEY_ENV)
    }

    /// Read the key from the given environment variable
    pub fn from_env_var(name: &str) -> Result<Self> {
        match std::env::var(name) {
            Ok(value) if !value.trim().is_empty() => Ok(Self(value.trim().to_string())),
            Ok(_) => Err(CoinApiError::Config(format!("{name} is empty"))),
            Err(err) => Err(CoinApiError::Config(format!("{name}: {err}"))),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Header value marked sensitive so it stays out of reqwest's debug logs
    pub(crate) fn header_value(&self) -> Result<HeaderValue> {
        let mut value = HeaderValue::from_str(&self.0)
            .map_err(|err| CoinApiError::Config(format!("invalid API key: {err}")))?;
        value.set_sensitive(true);
        Ok(value)
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

impl From<&str> for ApiKey {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ApiKey {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}
