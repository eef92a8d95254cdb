//! Market data example.
//!
//! Shows the market clock, quotes for a few symbols, the nearest option
//! expiration with its chain, and a week of daily bars.
//!
//! Run with: TRADIER_TOKEN=... cargo run --example market_snapshot [SYMBOL]

use chrono::{Duration, Utc};
use tradier_rs::api::HistoricalQuery;
use tradier_rs::models::HistoryInterval;
use tradier_rs::TradierClient;

#[tokio::main]
async fn main() -> tradier_rs::Result<()> {
    tracing_subscriber::fmt::init();

    let symbol = std::env::args().nth(1).unwrap_or_else(|| "SPY".to_string());
    let client = TradierClient::from_env()?;
    let market = client.market();

    let clock = market.clock().await?;
    println!(
        "Market is {} ({}), next: {} at {}",
        clock.state, clock.description, clock.next_state, clock.next_change
    );

    println!("\n=== Quotes ===");
    let quotes = market.quotes(&[symbol.as_str(), "AAPL", "NOTASYMBOL"], false).await?;
    for quote in &quotes {
        println!(
            "{:<8} last {:?}  bid {:?}  ask {:?}  spread {:?}",
            quote.symbol,
            quote.last,
            quote.bid,
            quote.ask,
            quote.spread()
        );
    }

    println!("\n=== Options on {symbol} ===");
    let expirations = market.option_expirations(&symbol, false).await?;
    let Some(nearest) = expirations.first().copied() else {
        println!("No listed options");
        return Ok(());
    };
    println!("{} expirations, nearest {}", expirations.len(), nearest);

    let strikes = market.option_strikes(&symbol, nearest).await?;
    println!("{} strikes", strikes.len());

    let chain = market.option_chain(&symbol, nearest, true).await?;
    for contract in chain.iter().filter(|c| c.is_call()).take(10) {
        let delta = contract.greeks.as_ref().map(|g| g.delta);
        println!(
            "  {:<22} strike {:>8}  mid {:?}  delta {:?}  OI {}",
            contract.symbol,
            contract.strike,
            contract.mid(),
            delta,
            contract.open_interest
        );
    }

    println!("\n=== Daily bars ===");
    let today = Utc::now().date_naive();
    let query = HistoricalQuery::new()
        .interval(HistoryInterval::Daily)
        .between(today - Duration::days(7), today);
    for bar in market.history(&symbol, query).await? {
        println!(
            "  {}  O {}  H {}  L {}  C {}  V {}",
            bar.date, bar.open, bar.high, bar.low, bar.close, bar.volume
        );
    }

    let calendar = market.calendar(None, None).await?;
    let trading_days = calendar.iter().filter(|d| d.is_trading_day()).count();
    println!("\n{trading_days} trading days this month");

    Ok(())
}
