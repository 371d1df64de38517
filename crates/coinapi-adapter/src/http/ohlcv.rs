/*
[INPUT]:  Symbol id, period id, optional time range and row limit
[OUTPUT]: OHLCV periods and candles
[POS]:    HTTP layer - OHLCV endpoints
[UPDATE]: When adding OHLCV endpoints or parameters
*/

use crate::http::query::QueryParams;
use crate::http::{CoinApiClient, Result};
use crate::types::{Ohlcv, OhlcvPeriod};

impl CoinApiClient {
    /// List supported period granularities
    ///
    /// GET /v1/ohlcv/periods
    pub async fn list_ohlcv_periods(&self) -> Result<Vec<OhlcvPeriod>> {
        self.get_json("/v1/ohlcv/periods").await
    }

    /// Latest candles for a symbol, newest first
    ///
    /// GET /v1/ohlcv/{symbol_id}/latest?period_id={period_id}&limit={limit}
    pub async fn latest_ohlcv(
        &self,
        symbol_id: &str,
        period_id: &str,
        limit: Option<u32>,
    ) -> Result<Vec<Ohlcv>> {
        let params = QueryParams::new()
            .push("period_id", Some(period_id))
            .push("limit", limit);
        let endpoint = self.endpoint(&format!("/v1/ohlcv/{symbol_id}/latest"), &params);
        self.get_json(&endpoint).await
    }

    /// Candles for a symbol within a time range, oldest first
    ///
    /// GET /v1/ohlcv/{symbol_id}/history?period_id=&time_start=&time_end=&limit=
    pub async fn historical_ohlcv(
        &self,
        symbol_id: &str,
        period_id: &str,
        time_start: Option<&str>,
        time_end: Option<&str>,
        limit: Option<u32>,
    ) -> Result<Vec<Ohlcv>> {
        let params = QueryParams::new()
            .push("period_id", Some(period_id))
            .push("time_start", time_start)
            .push("time_end", time_end)
            .push("limit", limit);
        let endpoint = self.endpoint(&format!("/v1/ohlcv/{symbol_id}/history"), &params);
        self.get_json(&endpoint).await
    }
}

#[cfg(test)]
mod tests {
    use crate::http::{ClientConfig, CoinApiClient};
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const CANDLES: &str = r#"[
        {
            "time_period_start": "2020-01-01T00:00:00.0000000Z",
            "time_period_end": "2020-01-01T00:01:00.0000000Z",
            "time_open": "2020-01-01T00:00:01.4530000Z",
            "time_close": "2020-01-01T00:00:58.0000000Z",
            "price_open": 7160.69,
            "price_high": 7164.2,
            "price_low": 7160.69,
            "price_close": 7163.9,
            "volume_traded": 1.52,
            "trades_count": 12
        }
    ]"#;

    fn client_for(server: &MockServer) -> CoinApiClient {
        CoinApiClient::with_config_and_base_url("test-key", ClientConfig::default(), &server.uri())
            .expect("client init")
    }

    #[tokio::test]
    async fn test_list_ohlcv_periods() {
        let server = MockServer::start().await;
        let mock_response = r#"[
            {"period_id": "1SEC", "length_seconds": 1, "length_months": 0, "unit_count": 1, "unit_name": "second", "display_name": "1 Second"},
            {"period_id": "1MTH", "length_seconds": 0, "length_months": 1, "unit_count": 1, "unit_name": "month", "display_name": "1 Month"}
        ]"#;

        Mock::given(method("GET"))
            .and(path("/v1/ohlcv/periods"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(mock_response, "application/json"))
            .expect(1)
            .mount(&server)
            .await;

        let periods = client_for(&server)
            .list_ohlcv_periods()
            .await
            .expect("list_ohlcv_periods failed");

        assert_eq!(periods.len(), 2);
        assert_eq!(periods[0].period_id.as_deref(), Some("1SEC"));
        assert_eq!(periods[1].length_months, Some(1));
        assert_eq!(periods[1].display_name.as_deref(), Some("1 Month"));
    }

    #[tokio::test]
    async fn test_latest_ohlcv() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/ohlcv/BITSTAMP_SPOT_BTC_USD/latest"))
            .and(query_param("period_id", "1MIN"))
            .and(query_param("limit", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(CANDLES, "application/json"))
            .expect(1)
            .mount(&server)
            .await;

        let candles = client_for(&server)
            .latest_ohlcv("BITSTAMP_SPOT_BTC_USD", "1MIN", Some(1))
            .await
            .expect("latest_ohlcv failed");

        assert_eq!(candles.len(), 1);
        assert_eq!(candles[0].price_open, Some("7160.69".parse().expect("price_open")));
        assert_eq!(candles[0].price_close, Some("7163.9".parse().expect("price_close")));
        assert_eq!(candles[0].trades_count, Some(12));
    }

    #[tokio::test]
    async fn test_latest_ohlcv_zero_limit_is_dropped() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/ohlcv/BITSTAMP_SPOT_BTC_USD/latest"))
            .respond_with(ResponseTemplate::new(200).set_body_raw("[]", "application/json"))
            .expect(1)
            .mount(&server)
            .await;

        client_for(&server)
            .latest_ohlcv("BITSTAMP_SPOT_BTC_USD", "1HRS", Some(0))
            .await
            .expect("latest_ohlcv failed");

        let requests = server.received_requests().await.expect("recording enabled");
        assert_eq!(requests[0].url.query(), Some("period_id=1HRS"));
    }

    #[tokio::test]
    async fn test_historical_ohlcv_query_order() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/ohlcv/BITSTAMP_SPOT_BTC_USD/history"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(CANDLES, "application/json"))
            .expect(1)
            .mount(&server)
            .await;

        let candles = client_for(&server)
            .historical_ohlcv(
                "BITSTAMP_SPOT_BTC_USD",
                "1MIN",
                Some("2020-01-01"),
                Some("2020-01-02"),
                Some(100),
            )
            .await
            .expect("historical_ohlcv failed");
        assert_eq!(
            candles[0].time_period_start.as_deref(),
            Some("2020-01-01T00:00:00.0000000Z")
        );

        let requests = server.received_requests().await.expect("recording enabled");
        assert_eq!(
            requests[0].url.query(),
            Some("period_id=1MIN&time_start=2020-01-01&time_end=2020-01-02&limit=100")
        );
    }

    #[tokio::test]
    async fn test_historical_ohlcv_open_range() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/ohlcv/KRAKEN_SPOT_ETH_USD/history"))
            .respond_with(ResponseTemplate::new(200).set_body_raw("[]", "application/json"))
            .expect(1)
            .mount(&server)
            .await;

        client_for(&server)
            .historical_ohlcv("KRAKEN_SPOT_ETH_USD", "1DAY", Some("2021-06-01"), None, None)
            .await
            .expect("historical_ohlcv failed");

        let requests = server.received_requests().await.expect("recording enabled");
        assert_eq!(
            requests[0].url.query(),
            Some("period_id=1DAY&time_start=2021-06-01")
        );
    }
}
