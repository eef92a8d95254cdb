//! HTTP client and service layer for the Tradier API.
//!
//! This module provides the main entry point [`TradierClient`] for
//! interacting with the Tradier API.
//!
//! # Example
//!
//! ```no_run
//! use tradier_rs::{ClientConfig, Environment, TradierClient};
//!
//! # async fn example() -> tradier_rs::Result<()> {
//! let config = ClientConfig::default()
//!     .with_environment(Environment::Sandbox)
//!     .with_default_account("VA000001");
//! let client = TradierClient::with_config("your-access-token", config)?;
//!
//! // Uses the default account
//! let positions = client.account().positions(None).await?;
//! # Ok(())
//! # }
//! ```

mod config;
mod http;
pub mod paginated;
mod params;

pub use config::ClientConfig;
pub use http::{TradierClient, ACCOUNT_ENV, BASE_URL_ENV, TOKEN_ENV};
pub use paginated::{PaginatedStream, DEFAULT_PAGE_SIZE};
pub use params::{Params, DATETIME_FORMAT, DATE_FORMAT};
pub(crate) use http::ClientInner;
