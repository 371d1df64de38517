/*
[INPUT]:  COINAPI_KEY environment variable, RUST_LOG filter
[OUTPUT]: Exchanges, symbols, rates, candles, quotes and order books printed to stdout
[POS]:    Examples - REST market data queries
[UPDATE]: When adding new REST endpoints
*/

use anyhow::{Context, Result, anyhow};
use coinapi_adapter::*;
use tracing_subscriber::EnvFilter;

/// Example: query REST market data
///
/// Run with `COINAPI_KEY=... cargo run --example market_data_example`.
#[tokio::main]
async fn main() -> Result<()> {
    init_tracing()?;

    let api_key = ApiKey::from_env().context("read API key")?;
    let api = CoinApi::new(api_key).context("create client")?;
    let client = api.rest();

    let symbol = "BITSTAMP_SPOT_BTC_USD";

    let exchanges = client.list_exchanges().await?;
    println!("✓ {} exchanges", exchanges.len());

    let symbols = client.list_symbols(Some("BITSTAMP_SPOT_BTC")).await?;
    println!("✓ {} BITSTAMP BTC symbols", symbols.len());

    let rate = client.exchange_rate("BTC", "USD", None).await?;
    println!("✓ BTC/USD rate: {:?}", rate.rate);

    let candles = client
        .historical_ohlcv(symbol, "1HRS", Some("2020-01-01T00:00:00"), None, Some(24))
        .await?;
    for candle in &candles {
        println!(
            "  {} open={:?} close={:?}",
            candle.time_period_start.as_deref().unwrap_or("?"),
            candle.price_open,
            candle.price_close
        );
    }

    let quotes = client.quotes_current(Some(symbol)).await?;
    if let Some(quote) = quotes.first() {
        println!("✓ Quote: bid={:?} ask={:?}", quote.bid_price, quote.ask_price);
    }

    let books = client.current_orderbook(Some(symbol), Some(5)).await?;
    if let Some((ask, bid)) = books.first().and_then(OrderBook::best_prices) {
        println!("✓ Best ask {ask}, best bid {bid}");
    }

    println!("\n✓ Market data example complete");
    Ok(())
}

fn init_tracing() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|err| anyhow!(err))
        .context("initialize tracing subscriber")?;
    Ok(())
}
