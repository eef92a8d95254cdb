//! Account overview example.
//!
//! Prints the profile, balances, open positions and the most recent
//! account activity for the configured account.
//!
//! Run with: TRADIER_TOKEN=... TRADIER_ACCOUNT_ID=... cargo run --example account_overview

use futures_util::StreamExt;
use tradier_rs::api::{GainLossQuery, HistoryQuery};
use tradier_rs::client::DEFAULT_PAGE_SIZE;
use tradier_rs::models::BalanceDetails;
use tradier_rs::TradierClient;

#[tokio::main]
async fn main() -> tradier_rs::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let client = TradierClient::from_env()?;

    let profile = client.account().profile().await?;
    println!("Profile: {} ({})", profile.name, profile.id);
    for account in &profile.account {
        println!(
            "  - {} [{} / {}] option level {}",
            account.account_number, account.account_type, account.status, account.option_level
        );
    }

    // Everything below uses TRADIER_ACCOUNT_ID, or the first account on the profile
    let fallback = profile.account.first().map(|a| a.account_number());
    let account = client.default_account().cloned().or(fallback);
    let account = account.as_ref();

    let balances = client.account().balances(account).await?;
    println!("\nBalances for {}:", balances.account_number);
    println!("  Total equity: {}", balances.total_equity);
    println!("  Total cash:   {}", balances.total_cash);
    println!("  Open P/L:     {}", balances.open_pl);
    match balances.details() {
        Some(BalanceDetails::Margin(m)) => {
            println!("  Stock buying power:  {}", m.stock_buying_power)
        }
        Some(BalanceDetails::Cash(c)) => println!("  Cash available: {}", c.cash_available),
        Some(BalanceDetails::Pdt(p)) => {
            println!("  Stock buying power (PDT): {}", p.stock_buying_power)
        }
        None => {}
    }

    let positions = client.account().positions(account).await?;
    println!("\nPositions ({}):", positions.len());
    for position in &positions {
        let side = if position.is_short() { "short" } else { "long" };
        println!(
            "  {:<24} {:>8} {:<5} cost {}",
            position.symbol, position.quantity, side, position.cost_basis
        );
    }

    println!("\nRecent activity:");
    let mut events = client
        .account()
        .history_stream(account, HistoryQuery::new(), DEFAULT_PAGE_SIZE)?
        .take(10);
    while let Some(event) = events.next().await {
        let event = event?;
        println!("  {} {:<12} {}", event.date.date_naive(), event.event_type, event.amount);
    }

    let closed = client.account().gain_loss(account, GainLossQuery::new().limit(10)).await?;
    println!("\nLast closed positions:");
    for position in &closed {
        println!(
            "  {:<24} {:>10} ({}%)",
            position.symbol, position.gain_loss, position.gain_loss_percent
        );
    }

    let orders = client.account().orders(account, true).await?;
    println!("\nOrders ({}):", orders.len());
    for order in &orders {
        println!(
            "  #{} {} {} {} x{} [{}]",
            order.id, order.order_class, order.side, order.symbol, order.quantity, order.status
        );
        for leg in order.legs() {
            println!(
                "      leg {} {} x{}",
                leg.option_symbol.as_deref().unwrap_or(&leg.symbol),
                leg.side,
                leg.quantity
            );
        }
    }

    println!("\nDone!");
    Ok(())
}
