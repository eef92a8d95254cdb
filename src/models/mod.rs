//! Data models for the Tradier API.
//!
//! Models are organized by domain:
//!
//! - [`primitives`] - Identifiers and the API environment
//! - [`enums`] - Wire vocabularies for orders, history filters and lookups
//! - [`account`] - Profile, balance, position and history records
//! - [`order`] - Order records and order-entry types
//! - [`market_data`] - Quotes, option chains, price history and securities
//! - [`market_time`] - Market clock and calendar
//! - [`envelope`] - Top-level response envelopes and their extractors
//! - [`serde_util`] - Date and time encodings used on the wire

pub mod primitives;
pub mod enums;
pub mod account;
pub mod order;
pub mod market_data;
pub mod market_time;
pub mod envelope;
pub mod serde_util;

// Re-export commonly used types
pub use primitives::*;
pub use enums::*;
pub use account::*;
pub use order::*;
pub use market_data::*;
pub use market_time::*;
pub use envelope::{AccountsApiResponse, MarketsApiResponse, OrderApiResponse};
