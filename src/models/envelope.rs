//! Top-level response envelopes.
//!
//! Every endpoint family answers with an object that has exactly one
//! populated field for the call that was made. The envelopes model that as
//! a record of optional fields; the `into_*` extractors pull out the one
//! field a call expects and fail with [`Error::Validation`] when it is
//! absent rather than guessing.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::account::{
    AccountHistory, Balances, ClosedPosition, Event, GainLoss, Position, Positions, Profile,
};
use super::market_data::{
    Expirations, ExpirationStrikes, HistoricQuote, History, OptionContract, OptionRoot, Options,
    Quote, Quotes, Securities, Security, Series, Strikes, TimesalesData,
};
use super::market_time::{Calendar, Clock};
use super::order::{ApiErrors, Order, OrderDetails, Orders};
use crate::error::{Error, Result};

/// Decode a normalized body into `T`, naming the offending field on failure.
pub fn parse<T: DeserializeOwned>(value: Value) -> Result<T> {
    serde_path_to_error::deserialize(value).map_err(Error::from_path_error)
}

fn required<T>(value: Option<T>, field: &str) -> Result<T> {
    value.ok_or_else(|| Error::validation(field, "field to be present"))
}

/// Envelope for `/v1/user/*` and `/v1/accounts/*` reads.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccountsApiResponse {
    pub profile: Option<Profile>,
    pub balances: Option<Balances>,
    pub positions: Option<Positions>,
    pub history: Option<AccountHistory>,
    pub gainloss: Option<GainLoss>,
    pub orders: Option<Orders>,
    pub order: Option<Order>,
}

impl AccountsApiResponse {
    /// The user profile; its account list is never empty.
    pub fn into_profile(self) -> Result<Profile> {
        let profile = required(self.profile, "profile")?;
        if profile.account.is_empty() {
            return Err(Error::validation(
                "profile.account",
                "at least one account",
            ));
        }
        Ok(profile)
    }

    pub fn into_balances(self) -> Result<Balances> {
        required(self.balances, "balances")
    }

    pub fn into_positions(self) -> Result<Vec<Position>> {
        required(self.positions, "positions").map(|p| p.position)
    }

    pub fn into_history(self) -> Result<Vec<Event>> {
        required(self.history, "history").map(|h| h.event)
    }

    pub fn into_gain_loss(self) -> Result<Vec<ClosedPosition>> {
        required(self.gainloss, "gainloss").map(|g| g.closed_position)
    }

    pub fn into_orders(self) -> Result<Vec<Order>> {
        required(self.orders, "orders").map(|o| o.order)
    }

    pub fn into_order(self) -> Result<Order> {
        required(self.order, "order")
    }
}

/// Envelope for `/v1/markets/*` reads.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketsApiResponse {
    pub quotes: Option<Quotes>,
    pub options: Option<Options>,
    pub strikes: Option<Strikes>,
    pub expirations: Option<Expirations>,
    pub symbols: Option<Vec<OptionRoot>>,
    pub history: Option<History>,
    pub series: Option<Series>,
    pub securities: Option<Securities>,
    pub clock: Option<Clock>,
    pub calendar: Option<Calendar>,
}

impl MarketsApiResponse {
    pub fn into_quotes(self) -> Result<Vec<Quote>> {
        required(self.quotes, "quotes").map(|q| q.quote)
    }

    pub fn into_option_chain(self) -> Result<Vec<OptionContract>> {
        required(self.options, "options").map(|o| o.option)
    }

    pub fn into_strikes(self) -> Result<Vec<Decimal>> {
        required(self.strikes, "strikes").map(|s| s.strike)
    }

    pub fn into_expirations(self) -> Result<Vec<NaiveDate>> {
        required(self.expirations, "expirations").map(|e| e.date)
    }

    pub fn into_expiration_strikes(self) -> Result<Vec<ExpirationStrikes>> {
        required(self.expirations, "expirations").map(|e| e.expiration)
    }

    pub fn into_option_roots(self) -> Result<Vec<OptionRoot>> {
        required(self.symbols, "symbols")
    }

    pub fn into_history(self) -> Result<Vec<HistoricQuote>> {
        required(self.history, "history").map(|h| h.day)
    }

    pub fn into_series(self) -> Result<Vec<TimesalesData>> {
        required(self.series, "series").map(|s| s.data)
    }

    pub fn into_securities(self) -> Result<Vec<Security>> {
        required(self.securities, "securities").map(|s| s.security)
    }

    /// Securities, treating an absent container as "no matches".
    ///
    /// Search and lookup omit `securities` entirely when nothing matches.
    pub fn into_matches(self) -> Vec<Security> {
        self.securities.map(|s| s.security).unwrap_or_default()
    }

    pub fn into_clock(self) -> Result<Clock> {
        required(self.clock, "clock")
    }

    pub fn into_calendar(self) -> Result<Calendar> {
        required(self.calendar, "calendar")
    }
}

/// Envelope for order placement, preview, modification and cancellation.
///
/// `T` is [`OrderDetails`] for acknowledgements and
/// [`OrderPreview`](super::order::OrderPreview) for previews.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderApiResponse<T = OrderDetails> {
    pub order: Option<T>,
    pub errors: Option<ApiErrors>,
}

impl<T> OrderApiResponse<T> {
    /// The acknowledgement, or [`Error::OrderRejected`] with the server's
    /// messages when `errors` is populated.
    pub fn into_result(self) -> Result<T> {
        if let Some(errors) = self.errors {
            if !errors.messages.is_empty() || self.order.is_none() {
                return Err(Error::OrderRejected {
                    messages: errors.messages,
                });
            }
        }
        required(self.order, "order")
    }
}
