/*
[INPUT]:  Base/quote asset ids and optional timestamp
[OUTPUT]: Spot exchange rate or all current rates for a base asset
[POS]:    HTTP layer - exchange rate endpoints
[UPDATE]: When changing rate endpoints or the current-rates time handling
*/

use crate::http::query::{QueryMode, QueryParams};
use crate::http::{CoinApiClient, Result};
use crate::types::{CurrentRates, ExchangeRate};

impl CoinApiClient {
    /// Rate between two assets, optionally at a point in time (ISO 8601)
    ///
    /// GET /v1/exchangerate/{base}/{quote}?time={time}
    pub async fn exchange_rate(
        &self,
        base: &str,
        quote: &str,
        time: Option<&str>,
    ) -> Result<ExchangeRate> {
        let params = QueryParams::new().push("time", time);
        let endpoint = self.endpoint(&format!("/v1/exchangerate/{base}/{quote}"), &params);
        self.get_json(&endpoint).await
    }

    /// Current rates of `base` against every quote asset
    ///
    /// GET /v1/exchangerate/{base}
    ///
    /// Known bug: in [`QueryMode::Legacy`] `time` is accepted but never sent,
    /// so the service always answers with the latest rates. [`QueryMode::Strict`]
    /// forwards it as `?time=`.
    pub async fn current_rates(&self, base: &str, time: Option<&str>) -> Result<CurrentRates> {
        let path = format!("/v1/exchangerate/{base}");
        let endpoint = match self.query_mode() {
            QueryMode::Legacy => path,
            QueryMode::Strict => self.endpoint(&path, &QueryParams::new().push("time", time)),
        };
        self.get_json(&endpoint).await
    }
}
