//! Order placement example.
//!
//! Previews an equity limit order and a two-leg call spread. Nothing is
//! placed unless `--live` is passed, and then only the equity order, which
//! is cancelled right away.
//!
//! Run with: TRADIER_TOKEN=... TRADIER_ACCOUNT_ID=... cargo run --example place_order [--live]

use rust_decimal_macros::dec;
use tradier_rs::models::{
    NewOrderBuilder, OrderChanges, OrderDuration, OrderLeg, OrderSide, OrderType,
};
use tradier_rs::TradierClient;

#[tokio::main]
async fn main() -> tradier_rs::Result<()> {
    tracing_subscriber::fmt::init();

    let live = std::env::args().any(|a| a == "--live");
    let client = TradierClient::from_env()?;
    let trading = client.trading();

    // Far below the market so it will not fill
    let equity = NewOrderBuilder::equity("AAPL", OrderSide::Buy, dec!(1))
        .order_type(OrderType::Limit)
        .price(dec!(1.00))
        .duration(OrderDuration::Day)
        .tag("example-equity")
        .build()?;

    let preview = trading.preview(None, &equity).await?;
    println!("Equity preview: status {}, cost {:?}", preview.status, preview.cost);

    let expiration = client
        .market()
        .option_expirations("SPY", false)
        .await?
        .into_iter()
        .next();
    if let Some(expiration) = expiration {
        let strikes = client.market().option_strikes("SPY", expiration).await?;
        let middle = strikes.len() / 2;
        if let (Some(long), Some(short)) = (strikes.get(middle), strikes.get(middle + 1)) {
            let occ = |strike: rust_decimal::Decimal| {
                let thousandths = (strike * dec!(1000)).trunc().normalize();
                format!("SPY{}C{:0>8}", expiration.format("%y%m%d"), thousandths.to_string())
            };

            let spread = NewOrderBuilder::multileg("SPY")
                .order_type(OrderType::Debit)
                .price(dec!(0.50))
                .duration(OrderDuration::Day)
                .add_leg(OrderLeg::buy_to_open(occ(*long), dec!(1)))
                .add_leg(OrderLeg::sell_to_open(occ(*short), dec!(1)))
                .build()?;

            match trading.preview(None, &spread).await {
                Ok(preview) => println!("Spread preview: cost {:?}", preview.cost),
                Err(e) if e.is_order_rejection() => println!("Spread rejected: {e}"),
                Err(e) => return Err(e),
            }
        }
    }

    if !live {
        println!("\n(Nothing placed - pass --live to place and cancel the equity order)");
        return Ok(());
    }

    let ack = trading.place(None, &equity).await?;
    println!("\nPlaced order {} ({})", ack.id, ack.status);

    let ack = trading
        .modify(None, ack.order_id(), &OrderChanges::new().price(dec!(1.01)))
        .await?;
    println!("Modified order {} ({})", ack.id, ack.status);

    let ack = trading.cancel(None, ack.order_id()).await?;
    println!("Cancelled order {} ({})", ack.id, ack.status);

    Ok(())
}
