//! # tradier-rs
//!
//! A typed async Rust client for the Tradier brokerage REST API.
//!
//! The API is inconsistent about how it encodes collections: a list of one
//! may arrive as a bare object, and an empty list as the string `"null"`.
//! Every response goes through [`normalize`] before it is decoded, so the
//! typed models always hand back plain `Vec`s.
//!
//! ## Features
//!
//! - **Account data**: profile, balances, positions, activity history,
//!   gain/loss, orders, with lazy paging streams for the long reports
//! - **Market data**: quotes, option chains, strikes and expirations,
//!   historical bars, time and sales, clock, calendar, symbol search
//! - **Trading**: equity, single-option and multileg orders, previews,
//!   modification and cancellation
//! - **Type Safety**: `Decimal` prices, `chrono` dates, wire enums, and
//!   validation errors that name the offending JSON path
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use tradier_rs::{ClientConfig, Environment, TradierClient};
//!
//! #[tokio::main]
//! async fn main() -> tradier_rs::Result<()> {
//!     let config = ClientConfig::default()
//!         .with_environment(Environment::Sandbox)
//!         .with_default_account("VA000001");
//!     let client = TradierClient::with_config("your-access-token", config)?;
//!
//!     let profile = client.account().profile().await?;
//!     println!("Hello, {}", profile.name);
//!
//!     // Falls back to the default account
//!     let balances = client.account().balances(None).await?;
//!     println!("Total equity: {}", balances.total_equity);
//!
//!     let quotes = client.market().quotes(&["AAPL", "MSFT"], false).await?;
//!     for quote in quotes {
//!         println!("{}: {:?}", quote.symbol, quote.last);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Order Placement
//!
//! ```rust,no_run
//! use tradier_rs::{TradierClient, Environment, AccountNumber};
//! use tradier_rs::models::{NewOrderBuilder, OrderDuration, OrderLeg, OrderType};
//! use rust_decimal_macros::dec;
//!
//! #[tokio::main]
//! async fn main() -> tradier_rs::Result<()> {
//!     let client = TradierClient::new("your-access-token", Environment::Sandbox)?;
//!     let account = AccountNumber::new("VA000001");
//!
//!     // A debit call spread
//!     let order = NewOrderBuilder::multileg("SPY")
//!         .order_type(OrderType::Debit)
//!         .duration(OrderDuration::Day)
//!         .price(dec!(1.05))
//!         .add_leg(OrderLeg::buy_to_open("SPY190621C00280000", dec!(1)))
//!         .add_leg(OrderLeg::sell_to_open("SPY190621C00285000", dec!(1)))
//!         .build()?;
//!
//!     // Preview first to check the cost
//!     let preview = client.trading().preview(Some(&account), &order).await?;
//!     println!("Cost: {:?}", preview.cost);
//!
//!     match client.trading().place(Some(&account), &order).await {
//!         Ok(ack) => println!("Order placed: {}", ack.id),
//!         Err(e) if e.is_order_rejection() => println!("Rejected: {e}"),
//!         Err(e) => return Err(e),
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Logging
//!
//! Requests and responses are reported through `tracing` at `debug` level
//! (method, path and parameter names, never values or the token). Nothing
//! is printed unless the application installs a subscriber.

#![warn(rustdoc::missing_crate_level_docs)]
#![deny(unsafe_code)]

pub mod api;
pub mod client;
pub mod error;
pub mod models;
pub mod normalize;

// Re-export primary types at crate root for convenience
pub use error::{Error, Result};
pub use models::{AccountNumber, Environment, OrderId};
pub use client::{ClientConfig, Params, TradierClient};

/// Prelude module for convenient imports.
///
/// ```rust
/// use tradier_rs::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::models::{
        // Primitives
        AccountNumber, OrderId, Environment,
        // Enums
        OptionType, OrderClass, OrderSide, OrderType, OrderDuration,
        ActivityType, SortDirection, GainLossSortKey, HistoryInterval,
        TimesalesInterval, SessionFilter, SecurityType,
        // Account models
        Profile, Account, Balances, Position, Event, ClosedPosition,
        // Order models
        Order, Leg, OrderDetails, OrderPreview, NewOrder, NewOrderBuilder,
        OrderLeg, OrderTerms, OrderChanges,
        // Market models
        Quote, OptionContract, Greeks, OptionRoot, HistoricQuote,
        TimesalesData, Security, Clock, MarketDay,
    };
    pub use crate::api::{
        AccountService, MarketService, TradingService,
        HistoryQuery, GainLossQuery, HistoricalQuery, TimesalesQuery,
    };
    pub use crate::client::{TradierClient, ClientConfig, PaginatedStream};
}
