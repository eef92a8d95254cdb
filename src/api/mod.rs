//! API service modules for Tradier endpoints.
//!
//! Each service covers one endpoint family and is obtained from
//! [`TradierClient`](crate::TradierClient):
//!
//! - [`AccountService`] via `client.account()`
//! - [`MarketService`] via `client.market()`
//! - [`TradingService`] via `client.trading()`

mod account;
mod market;
mod trading;

pub use account::{AccountService, GainLossQuery, HistoryQuery};
pub use market::{HistoricalQuery, MarketService, TimesalesQuery};
pub use trading::TradingService;
