/*
[INPUT]:  COINAPI_KEY environment variable, RUST_LOG filter
[OUTPUT]: Real-time trade/book/heartbeat events printed to stdout
[POS]:    Examples - WebSocket stream handling
[UPDATE]: When WebSocket API changes
*/

use anyhow::{Context, Result, anyhow};
use coinapi_adapter::*;
use tracing_subscriber::EnvFilter;

/// Example: stream trades and order book updates
///
/// Stops after 20 events or when the connection ends.
#[tokio::main]
async fn main() -> Result<()> {
    init_tracing()?;

    let api = CoinApi::new(ApiKey::from_env()?)?;
    let mut stream = api.stream();
    let mut events = stream
        .take_receiver()
        .context("receiver already taken")?;

    stream
        .connect(&[DataType::Trade, DataType::Book, DataType::Heartbeat])
        .await
        .context("open stream")?;
    println!("✓ Stream open: {:?}", stream.state());

    let mut seen = 0;
    while let Some(event) = events.recv().await {
        match event {
            StreamEvent::Trade(trade) => println!(
                "trade {} {:?} @ {:?}",
                trade.symbol_id.unwrap_or_default(),
                trade.size,
                trade.price
            ),
            StreamEvent::Book(book) => println!(
                "book {} asks={} bids={}",
                book.symbol_id.unwrap_or_default(),
                book.asks.len(),
                book.bids.len()
            ),
            StreamEvent::Heartbeat(_) => println!("heartbeat"),
        }

        seen += 1;
        if seen >= 20 {
            break;
        }
    }

    println!("\n✓ WebSocket example complete ({seen} events, state {:?})", stream.state());
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
