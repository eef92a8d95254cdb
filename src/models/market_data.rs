//! Quote, option chain, price history and security models.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::enums::OptionType;
use super::serde_util::{spaced_datetime, timestamp_ms};

/// Snapshot quote for an equity, index, ETF or option.
///
/// Option-only fields are `None` for other security types.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    /// Symbol
    pub symbol: String,
    /// Description
    pub description: String,
    /// Exchange code
    pub exch: String,
    /// Security type (e.g. "stock", "etf", "option", "index")
    #[serde(rename = "type")]
    pub security_type: String,
    /// Last trade price
    #[serde(default)]
    pub last: Option<Decimal>,
    /// Net change from previous close
    #[serde(default)]
    pub change: Option<Decimal>,
    /// Today's volume
    pub volume: i64,
    #[serde(default)]
    pub open: Option<Decimal>,
    #[serde(default)]
    pub high: Option<Decimal>,
    #[serde(default)]
    pub low: Option<Decimal>,
    #[serde(default)]
    pub close: Option<Decimal>,
    /// Best bid
    #[serde(default)]
    pub bid: Option<Decimal>,
    /// Best ask
    #[serde(default)]
    pub ask: Option<Decimal>,
    /// Percent change from previous close
    #[serde(default)]
    pub change_percentage: Option<Decimal>,
    /// Average daily volume
    pub average_volume: i64,
    /// Size of the last trade
    pub last_volume: i64,
    /// Time of the last trade
    #[serde(with = "timestamp_ms")]
    pub trade_date: DateTime<Utc>,
    /// Previous close
    #[serde(default)]
    pub prevclose: Option<Decimal>,
    #[serde(default)]
    pub week_52_high: Option<Decimal>,
    #[serde(default)]
    pub week_52_low: Option<Decimal>,
    /// Bid size
    pub bidsize: i64,
    /// Bid exchange
    #[serde(default)]
    pub bidexch: Option<String>,
    /// Time of the last bid update
    #[serde(with = "timestamp_ms")]
    pub bid_date: DateTime<Utc>,
    /// Ask size
    pub asksize: i64,
    /// Ask exchange
    #[serde(default)]
    pub askexch: Option<String>,
    /// Time of the last ask update
    #[serde(with = "timestamp_ms")]
    pub ask_date: DateTime<Utc>,
    /// Comma-separated option roots, for underlyings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root_symbols: Option<String>,
    /// Underlying symbol, for options
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub underlying: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strike: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub open_interest: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contract_size: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub option_type: Option<OptionType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root_symbol: Option<String>,
    /// Present only when greeks were requested
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub greeks: Option<Greeks>,
}

impl Quote {
    /// Calculate the bid-ask spread.
    pub fn spread(&self) -> Option<Decimal> {
        match (self.bid, self.ask) {
            (Some(bid), Some(ask)) => Some(ask - bid),
            _ => None,
        }
    }

    /// Midpoint between bid and ask.
    pub fn mid(&self) -> Option<Decimal> {
        match (self.bid, self.ask) {
            (Some(bid), Some(ask)) => Some((bid + ask) / Decimal::TWO),
            _ => None,
        }
    }

    /// Returns `true` if this is an option quote.
    pub fn is_option(&self) -> bool {
        self.option_type.is_some()
    }
}

/// Symbols the quotes endpoint could not match.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UnmatchedSymbols {
    #[serde(default)]
    pub symbol: Vec<String>,
}

/// `quotes` container.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Quotes {
    #[serde(default)]
    pub quote: Vec<Quote>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unmatched_symbols: Option<UnmatchedSymbols>,
}

/// Option greeks and implied volatility.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Greeks {
    pub delta: Decimal,
    pub gamma: Decimal,
    pub theta: Decimal,
    pub vega: Decimal,
    pub rho: Decimal,
    pub phi: Decimal,
    /// Implied volatility at the bid
    pub bid_iv: Decimal,
    /// Implied volatility at the mid
    pub mid_iv: Decimal,
    /// Implied volatility at the ask
    pub ask_iv: Decimal,
    /// Smoothed volatility
    pub smv_vol: Decimal,
    /// When the greeks were calculated
    #[serde(with = "spaced_datetime")]
    pub updated_at: NaiveDateTime,
}

/// One contract in an option chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionContract {
    /// OCC option symbol
    pub symbol: String,
    pub description: String,
    pub exch: String,
    #[serde(rename = "type")]
    pub security_type: String,
    #[serde(default)]
    pub last: Option<Decimal>,
    #[serde(default)]
    pub change: Option<Decimal>,
    pub volume: i64,
    #[serde(default)]
    pub open: Option<Decimal>,
    #[serde(default)]
    pub high: Option<Decimal>,
    #[serde(default)]
    pub low: Option<Decimal>,
    #[serde(default)]
    pub close: Option<Decimal>,
    #[serde(default)]
    pub bid: Option<Decimal>,
    #[serde(default)]
    pub ask: Option<Decimal>,
    #[serde(default)]
    pub change_percentage: Option<Decimal>,
    pub average_volume: i64,
    pub last_volume: i64,
    #[serde(with = "timestamp_ms")]
    pub trade_date: DateTime<Utc>,
    #[serde(default)]
    pub prevclose: Option<Decimal>,
    #[serde(default)]
    pub week_52_high: Option<Decimal>,
    #[serde(default)]
    pub week_52_low: Option<Decimal>,
    pub bidsize: i64,
    #[serde(default)]
    pub bidexch: Option<String>,
    #[serde(with = "timestamp_ms")]
    pub bid_date: DateTime<Utc>,
    pub asksize: i64,
    #[serde(default)]
    pub askexch: Option<String>,
    #[serde(with = "timestamp_ms")]
    pub ask_date: DateTime<Utc>,
    /// Underlying symbol
    pub underlying: String,
    /// Strike price
    pub strike: Decimal,
    pub open_interest: i64,
    /// Shares per contract
    pub contract_size: i64,
    pub expiration_date: NaiveDate,
    /// Expiration cycle (e.g. "standard", "weeklys")
    pub expiration_type: String,
    /// Call or put
    pub option_type: OptionType,
    /// Option root
    pub root_symbol: String,
    /// Present only when greeks were requested
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub greeks: Option<Greeks>,
}

impl OptionContract {
    /// Midpoint between bid and ask.
    pub fn mid(&self) -> Option<Decimal> {
        match (self.bid, self.ask) {
            (Some(bid), Some(ask)) => Some((bid + ask) / Decimal::TWO),
            _ => None,
        }
    }

    /// Returns `true` for calls.
    pub fn is_call(&self) -> bool {
        self.option_type.is_call()
    }

    /// Returns `true` for puts.
    pub fn is_put(&self) -> bool {
        self.option_type.is_put()
    }
}

/// `options` container.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Options {
    #[serde(default)]
    pub option: Vec<OptionContract>,
}

/// `strikes` container.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Strikes {
    #[serde(default)]
    pub strike: Vec<Decimal>,
}

/// An expiration date together with its strikes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpirationStrikes {
    pub date: NaiveDate,
    #[serde(default)]
    pub strikes: Strikes,
}

/// `expirations` container.
///
/// Holds `date` for a plain request and `expiration` when strikes were
/// requested as well.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Expirations {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub date: Vec<NaiveDate>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub expiration: Vec<ExpirationStrikes>,
}

/// Option symbols listed under one option root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionRoot {
    /// Root symbol (e.g. "SPY", "SPXW")
    #[serde(rename = "rootSymbol")]
    pub root_symbol: String,
    /// OCC symbols of every listed contract
    #[serde(default)]
    pub options: Vec<String>,
}

/// One bar of historical pricing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricQuote {
    pub date: NaiveDate,
    pub open: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    pub close: Decimal,
    pub volume: i64,
}

/// `history` container for market data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct History {
    #[serde(default)]
    pub day: Vec<HistoricQuote>,
}

/// One time-and-sales point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimesalesData {
    /// Start of the interval, exchange local time
    pub time: NaiveDateTime,
    /// Start of the interval, epoch seconds
    pub timestamp: i64,
    pub price: Decimal,
    pub open: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    pub close: Decimal,
    pub volume: i64,
    /// Volume-weighted average price
    pub vwap: Decimal,
}

/// `series` container.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Series {
    #[serde(default)]
    pub data: Vec<TimesalesData>,
}

/// A security returned by search, lookup or the easy-to-borrow list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Security {
    pub symbol: String,
    pub exchange: String,
    #[serde(rename = "type")]
    pub security_type: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// `securities` container.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Securities {
    #[serde(default)]
    pub security: Vec<Security>,
}
