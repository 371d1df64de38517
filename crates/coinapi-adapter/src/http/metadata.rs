/*
[INPUT]:  Optional symbol filter
[OUTPUT]: Exchange, asset and symbol listings
[POS]:    HTTP layer - metadata endpoints
[UPDATE]: When adding metadata endpoints or filters
*/

use crate::http::query::QueryParams;
use crate::http::{CoinApiClient, Result};
use crate::types::{Asset, Exchange, Symbol};

impl CoinApiClient {
    /// List all exchanges
    ///
    /// GET /v1/exchanges
    pub async fn list_exchanges(&self) -> Result<Vec<Exchange>> {
        self.get_json("/v1/exchanges").await
    }

    /// List all assets
    ///
    /// GET /v1/assets
    pub async fn list_assets(&self) -> Result<Vec<Asset>> {
        self.get_json("/v1/assets").await
    }

    /// List symbols, optionally filtered by a symbol id prefix
    ///
    /// GET /v1/symbols?filter_symbol_id={filter}
    pub async fn list_symbols(&self, filter_symbol_id: Option<&str>) -> Result<Vec<Symbol>> {
        let params = QueryParams::new().push("filter_symbol_id", filter_symbol_id);
        let endpoint = self.endpoint("/v1/symbols", &params);
        self.get_json(&endpoint).await
    }
}
