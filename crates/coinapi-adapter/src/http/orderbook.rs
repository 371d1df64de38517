/*
[INPUT]:  Symbol id or symbol filter, time range, snapshot and depth limits
[OUTPUT]: Current, latest and historical order book snapshots
[POS]:    HTTP layer - order book endpoints
[UPDATE]: When adding order book endpoints or parameters
*/

use crate::http::query::QueryParams;
use crate::http::{CoinApiClient, Result};
use crate::types::OrderBook;

impl CoinApiClient {
    /// Current order book snapshot for all or matching symbols
    ///
    /// GET /v1/orderbooks/current?filter_symbol_id={filter}&limit_levels={levels}
    pub async fn current_orderbook(
        &self,
        filter_symbol_id: Option<&str>,
        limit_levels: Option<u32>,
    ) -> Result<Vec<OrderBook>> {
        let params = QueryParams::new()
            .push("filter_symbol_id", filter_symbol_id)
            .push("limit_levels", limit_levels);
        let endpoint = self.endpoint("/v1/orderbooks/current", &params);
        self.get_json(&endpoint).await
    }

    /// Latest snapshots for a symbol, newest first
    ///
    /// GET /v1/orderbooks/{symbol_id}/latest?limit={limit}&limit_levels={levels}
    pub async fn latest_orderbook(
        &self,
        symbol_id: &str,
        limit: Option<u32>,
        limit_levels: Option<u32>,
    ) -> Result<Vec<OrderBook>> {
        let params = QueryParams::new()
            .push("limit", limit)
            .push("limit_levels", limit_levels);
        let endpoint = self.endpoint(&format!("/v1/orderbooks/{symbol_id}/latest"), &params);
        self.get_json(&endpoint).await
    }

    /// Snapshots for a symbol within a time range, oldest first
    ///
    /// GET /v1/orderbooks/{symbol_id}/history?time_start=&time_end=&limit=&limit_levels=
    pub async fn historical_orderbook(
        &self,
        symbol_id: &str,
        time_start: Option<&str>,
        time_end: Option<&str>,
        limit: Option<u32>,
        limit_levels: Option<u32>,
    ) -> Result<Vec<OrderBook>> {
        let params = QueryParams::new()
            .push("time_start", time_start)
            .push("time_end", time_end)
            .push("limit", limit)
            .push("limit_levels", limit_levels);
        let endpoint = self.endpoint(&format!("/v1/orderbooks/{symbol_id}/history"), &params);
        self.get_json(&endpoint).await
    }
}
