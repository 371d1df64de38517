/*
[INPUT]:  CoinAPI REST response schemas and serde requirements
[OUTPUT]: Typed Rust structs for exchanges, assets, symbols, rates, OHLCV, quotes, order books
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

//! Response models.
//!
//! The service owns these shapes, so every field is optional and decoded
//! leniently: a value the Rust type cannot hold reads as `None` rather than
//! failing the whole response. Fields not modelled here land in `extra`.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::types::serde_helpers::{lenient, lenient_decimal, lenient_seq};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exchange {
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub exchange_id: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub data_start: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub data_end: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub data_quote_start: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub data_quote_end: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub data_orderbook_start: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub data_orderbook_end: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub data_trade_start: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub data_trade_end: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub data_symbols_count: Option<u64>,
    #[serde(default, deserialize_with = "lenient_decimal", skip_serializing_if = "Option::is_none")]
    pub volume_1hrs_usd: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient_decimal", skip_serializing_if = "Option::is_none")]
    pub volume_1day_usd: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient_decimal", skip_serializing_if = "Option::is_none")]
    pub volume_1mth_usd: Option<Decimal>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub asset_id: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// `1` for crypto assets, `0` for fiat
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub type_is_crypto: Option<u8>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub data_start: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub data_end: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub data_symbols_count: Option<u64>,
    #[serde(default, deserialize_with = "lenient_decimal", skip_serializing_if = "Option::is_none")]
    pub volume_1hrs_usd: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient_decimal", skip_serializing_if = "Option::is_none")]
    pub volume_1day_usd: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient_decimal", skip_serializing_if = "Option::is_none")]
    pub volume_1mth_usd: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient_decimal", skip_serializing_if = "Option::is_none")]
    pub price_usd: Option<Decimal>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Asset {
    pub fn is_crypto(&self) -> bool {
        self.type_is_crypto == Some(1)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Symbol {
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub symbol_id: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub exchange_id: Option<String>,
    /// `SPOT`, `FUTURES`, `OPTION`, `PERPETUAL`, `INDEX`, ...
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub symbol_type: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub asset_id_base: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub asset_id_quote: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub data_start: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub data_end: Option<String>,
    #[serde(default, deserialize_with = "lenient_decimal", skip_serializing_if = "Option::is_none")]
    pub volume_1hrs: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient_decimal", skip_serializing_if = "Option::is_none")]
    pub volume_1hrs_usd: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient_decimal", skip_serializing_if = "Option::is_none")]
    pub volume_1day: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient_decimal", skip_serializing_if = "Option::is_none")]
    pub volume_1day_usd: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient_decimal", skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Spot rate between two assets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExchangeRate {
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub asset_id_base: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub asset_id_quote: Option<String>,
    #[serde(default, deserialize_with = "lenient_decimal", skip_serializing_if = "Option::is_none")]
    pub rate: Option<Decimal>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One quote-asset entry of [`CurrentRates`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rate {
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub asset_id_quote: Option<String>,
    #[serde(default, deserialize_with = "lenient_decimal", skip_serializing_if = "Option::is_none")]
    pub rate: Option<Decimal>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// All current rates for a base asset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentRates {
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub asset_id_base: Option<String>,
    #[serde(default, deserialize_with = "lenient_seq")]
    pub rates: Vec<Rate>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// OHLCV period granularity such as `1MIN` or `1DAY`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OhlcvPeriod {
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub period_id: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub length_seconds: Option<u64>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub length_months: Option<u64>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub unit_count: Option<u64>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub unit_name: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ohlcv {
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub time_period_start: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub time_period_end: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub time_open: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub time_close: Option<String>,
    #[serde(default, deserialize_with = "lenient_decimal", skip_serializing_if = "Option::is_none")]
    pub price_open: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient_decimal", skip_serializing_if = "Option::is_none")]
    pub price_high: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient_decimal", skip_serializing_if = "Option::is_none")]
    pub price_low: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient_decimal", skip_serializing_if = "Option::is_none")]
    pub price_close: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient_decimal", skip_serializing_if = "Option::is_none")]
    pub volume_traded: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub trades_count: Option<u64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Last trade attached to a quote
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LastTrade {
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub time_exchange: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub time_coinapi: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub uuid: Option<Uuid>,
    #[serde(default, deserialize_with = "lenient_decimal", skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient_decimal", skip_serializing_if = "Option::is_none")]
    pub size: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub taker_side: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub symbol_id: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub time_exchange: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub time_coinapi: Option<String>,
    #[serde(default, deserialize_with = "lenient_decimal", skip_serializing_if = "Option::is_none")]
    pub ask_price: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient_decimal", skip_serializing_if = "Option::is_none")]
    pub ask_size: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient_decimal", skip_serializing_if = "Option::is_none")]
    pub bid_price: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient_decimal", skip_serializing_if = "Option::is_none")]
    pub bid_size: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub last_trade: Option<LastTrade>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One price level of an order book side
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookLevel {
    #[serde(default, deserialize_with = "lenient_decimal", skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient_decimal", skip_serializing_if = "Option::is_none")]
    pub size: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderBook {
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub symbol_id: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub time_exchange: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub time_coinapi: Option<String>,
    #[serde(default, deserialize_with = "lenient_seq")]
    pub asks: Vec<BookLevel>,
    #[serde(default, deserialize_with = "lenient_seq")]
    pub bids: Vec<BookLevel>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl OrderBook {
    /// Lowest ask and highest bid, if both sides carry a price
    pub fn best_prices(&self) -> Option<(Decimal, Decimal)> {
        let ask = self.asks.iter().filter_map(|level| level.price).min()?;
        let bid = self.bids.iter().filter_map(|level| level.price).max()?;
        Some((ask, bid))
    }
}
