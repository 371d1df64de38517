/*
[INPUT]:  Symbol id or symbol filter, optional time range and row limit
[OUTPUT]: Current, latest and historical quotes
[POS]:    HTTP layer - quote endpoints
[UPDATE]: When adding quote endpoints or parameters
*/

use crate::http::query::QueryParams;
use crate::http::{CoinApiClient, Result};
use crate::types::Quote;

impl CoinApiClient {
    /// Current quotes for all symbols or those matching the filter
    ///
    /// GET /v1/quotes/current?filter_symbol_id={filter}
    pub async fn quotes_current(&self, filter_symbol_id: Option<&str>) -> Result<Vec<Quote>> {
        let params = QueryParams::new().push("filter_symbol_id", filter_symbol_id);
        let endpoint = self.endpoint("/v1/quotes/current", &params);
        self.get_json(&endpoint).await
    }

    /// Latest quote updates, newest first
    ///
    /// GET /v1/quotes/latest?filter_symbol_id={filter}&limit={limit}
    pub async fn quotes_latest(
        &self,
        filter_symbol_id: Option<&str>,
        limit: Option<u32>,
    ) -> Result<Vec<Quote>> {
        let params = QueryParams::new()
            .push("filter_symbol_id", filter_symbol_id)
            .push("limit", limit);
        let endpoint = self.endpoint("/v1/quotes/latest", &params);
        self.get_json(&endpoint).await
    }

    /// Quote updates for a symbol within a time range, oldest first
    ///
    /// GET /v1/quotes/{symbol_id}/history?time_start=&time_end=&limit=
    pub async fn quotes_historical(
        &self,
        symbol_id: &str,
        time_start: Option<&str>,
        time_end: Option<&str>,
        limit: Option<u32>,
    ) -> Result<Vec<Quote>> {
        let params = QueryParams::new()
            .push("time_start", time_start)
            .push("time_end", time_end)
            .push("limit", limit);
        let endpoint = self.endpoint(&format!("/v1/quotes/{symbol_id}/history"), &params);
        self.get_json(&endpoint).await
    }
}
