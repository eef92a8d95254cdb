//! Market data service: quotes, option chains, price history, clock and
//! calendar, symbol search.

use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde_json::Value;

use crate::client::{ClientInner, Params};
use crate::models::envelope::parse;
use crate::models::{
    Clock, ExpirationStrikes, HistoricQuote, HistoryInterval, MarketDay, MarketsApiResponse,
    OptionContract, OptionRoot, Quote, Security, SecurityType, SessionFilter, TimesalesData,
    TimesalesInterval,
};
use crate::normalize::{for_each_item, normalize, normalize_flat, normalize_in_place};
use crate::{Error, Result};

/// Service for market data.
///
/// # Example
///
/// ```no_run
/// use chrono::NaiveDate;
///
/// # async fn example(client: tradier_rs::TradierClient) -> tradier_rs::Result<()> {
/// let market = client.market();
///
/// let expirations = market.option_expirations("SPY", true).await?;
/// if let Some(expiration) = expirations.first() {
///     let chain = market.option_chain("SPY", *expiration, true).await?;
///     for contract in chain.iter().filter(|c| c.is_call()) {
///         println!("{} {:?}", contract.symbol, contract.greeks.as_ref().map(|g| g.delta));
///     }
/// }
/// # Ok(())
/// # }
/// ```
pub struct MarketService {
    inner: Arc<ClientInner>,
}

/// Range and granularity for historical pricing.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct HistoricalQuery {
    /// Bar size; the server defaults to daily
    pub interval: Option<HistoryInterval>,
    /// First date
    pub start: Option<NaiveDate>,
    /// Last date
    pub end: Option<NaiveDate>,
    /// Include extended-hours trading
    pub session_filter: Option<SessionFilter>,
}

impl HistoricalQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn interval(mut self, interval: HistoryInterval) -> Self {
        self.interval = Some(interval);
        self
    }

    /// Restrict to `start..=end`.
    pub fn between(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.start = Some(start);
        self.end = Some(end);
        self
    }

    pub fn session_filter(mut self, filter: SessionFilter) -> Self {
        self.session_filter = Some(filter);
        self
    }

    fn to_params(&self, symbol: &str) -> Params {
        let mut params = Params::new();
        params
            .push("symbol", symbol)
            .push_opt("interval", self.interval)
            .push_date("start", self.start)
            .push_date("end", self.end)
            .push_opt("session_filter", self.session_filter);
        params
    }
}

/// Range and granularity for time and sales.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct TimesalesQuery {
    /// Point spacing
    pub interval: Option<TimesalesInterval>,
    /// Start time, exchange local
    pub start: Option<NaiveDateTime>,
    /// End time, exchange local
    pub end: Option<NaiveDateTime>,
    /// Include extended-hours trading
    pub session_filter: Option<SessionFilter>,
}

impl TimesalesQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn interval(mut self, interval: TimesalesInterval) -> Self {
        self.interval = Some(interval);
        self
    }

    /// Restrict to `start..=end`.
    pub fn between(mut self, start: NaiveDateTime, end: NaiveDateTime) -> Self {
        self.start = Some(start);
        self.end = Some(end);
        self
    }

    pub fn session_filter(mut self, filter: SessionFilter) -> Self {
        self.session_filter = Some(filter);
        self
    }

    fn to_params(&self, symbol: &str) -> Params {
        let mut params = Params::new();
        params
            .push("symbol", symbol)
            .push_opt("interval", self.interval)
            .push_datetime("start", self.start)
            .push_datetime("end", self.end)
            .push_opt("session_filter", self.session_filter);
        params
    }
}

impl MarketService {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    async fn get(&self, path: &str, params: &Params) -> Result<Value> {
        self.inner.get(path, params).await
    }

    /// Get quotes for one or more symbols (equities or OCC option symbols).
    ///
    /// Symbols the server cannot match are left out of the result.
    pub async fn quotes(&self, symbols: &[&str], greeks: bool) -> Result<Vec<Quote>> {
        if symbols.is_empty() {
            return Err(Error::InvalidInput(
                "At least one symbol is required".to_string(),
            ));
        }

        let mut params = Params::new();
        params
            .push("symbols", symbols.join(","))
            .push("greeks", greeks);

        let raw = self.get("/v1/markets/quotes", &params).await?;
        let mut raw = normalize(raw, "quotes", None);
        if let Some(quotes) = raw.get_mut("quotes") {
            normalize_in_place(quotes, "unmatched_symbols", Some("symbol"));
        }
        parse::<MarketsApiResponse>(raw)?.into_quotes()
    }

    /// Get every contract in an option chain for one expiration.
    pub async fn option_chain(
        &self,
        symbol: &str,
        expiration: NaiveDate,
        greeks: bool,
    ) -> Result<Vec<OptionContract>> {
        let mut params = Params::new();
        params
            .push("symbol", symbol)
            .push_date("expiration", Some(expiration))
            .push("greeks", greeks);

        let raw = self.get("/v1/markets/options/chains", &params).await?;
        let raw = normalize(raw, "options", None);
        parse::<MarketsApiResponse>(raw)?.into_option_chain()
    }

    /// Get the strike prices listed for one expiration.
    pub async fn option_strikes(&self, symbol: &str, expiration: NaiveDate) -> Result<Vec<Decimal>> {
        let mut params = Params::new();
        params
            .push("symbol", symbol)
            .push_date("expiration", Some(expiration));

        let raw = self.get("/v1/markets/options/strikes", &params).await?;
        let raw = normalize(raw, "strikes", None);
        parse::<MarketsApiResponse>(raw)?.into_strikes()
    }

    /// Get the expiration dates listed for an underlying.
    ///
    /// Set `include_all_roots` to include secondary roots such as SPXW or
    /// adjusted roots such as AAPL1.
    pub async fn option_expirations(
        &self,
        symbol: &str,
        include_all_roots: bool,
    ) -> Result<Vec<NaiveDate>> {
        let mut params = Params::new();
        params
            .push("symbol", symbol)
            .push("includeAllRoots", include_all_roots);

        let raw = self.get("/v1/markets/options/expirations", &params).await?;
        let raw = normalize(raw, "expirations", Some("date"));
        parse::<MarketsApiResponse>(raw)?.into_expirations()
    }

    /// Get expiration dates together with each date's strikes.
    pub async fn option_expirations_with_strikes(
        &self,
        symbol: &str,
        include_all_roots: bool,
    ) -> Result<Vec<ExpirationStrikes>> {
        let mut params = Params::new();
        params
            .push("symbol", symbol)
            .push("includeAllRoots", include_all_roots)
            .push("strikes", true);

        let raw = self.get("/v1/markets/options/expirations", &params).await?;
        let mut raw = normalize(raw, "expirations", Some("expiration"));
        for_each_item(&mut raw, "expirations", "expiration", |expiration| {
            normalize_in_place(expiration, "strikes", Some("strike"))
        });
        parse::<MarketsApiResponse>(raw)?.into_expiration_strikes()
    }

    /// Get every option symbol for an underlying, grouped by option root.
    pub async fn lookup_options(&self, underlying: &str) -> Result<Vec<OptionRoot>> {
        let mut params = Params::new();
        params.push("underlying", underlying);

        let mut raw = self.get("/v1/markets/options/lookup", &params).await?;
        normalize_flat(&mut raw, "symbols");
        if let Some(Value::Array(roots)) = raw.get_mut("symbols") {
            for root in roots.iter_mut() {
                normalize_flat(root, "options");
            }
        }
        parse::<MarketsApiResponse>(raw)?.into_option_roots()
    }

    /// Get historical pricing, oldest bar first.
    pub async fn history(
        &self,
        symbol: &str,
        query: HistoricalQuery,
    ) -> Result<Vec<HistoricQuote>> {
        let raw = self
            .get("/v1/markets/history", &query.to_params(symbol))
            .await?;
        let raw = normalize(raw, "history", Some("day"));
        parse::<MarketsApiResponse>(raw)?.into_history()
    }

    /// Get intraday time and sales, oldest point first.
    pub async fn time_and_sales(
        &self,
        symbol: &str,
        query: TimesalesQuery,
    ) -> Result<Vec<TimesalesData>> {
        let raw = self
            .get("/v1/markets/timesales", &query.to_params(symbol))
            .await?;
        let raw = normalize(raw, "series", Some("data"));
        parse::<MarketsApiResponse>(raw)?.into_series()
    }

    /// Get the easy-to-borrow list of securities that can be sold short.
    pub async fn etb(&self) -> Result<Vec<Security>> {
        let raw = self.get("/v1/markets/etb", &Params::new()).await?;
        let raw = normalize(raw, "securities", None);
        parse::<MarketsApiResponse>(raw)?.into_securities()
    }

    /// Get the current market state.
    pub async fn clock(&self) -> Result<Clock> {
        let raw = self.get("/v1/markets/clock", &Params::new()).await?;
        parse::<MarketsApiResponse>(raw)?.into_clock()
    }

    /// Get the trading calendar for a month; `None` means the current one.
    pub async fn calendar(&self, month: Option<u32>, year: Option<i32>) -> Result<Vec<MarketDay>> {
        if let Some(month) = month {
            if !(1..=12).contains(&month) {
                return Err(Error::InvalidInput(format!("Invalid month: {month}")));
            }
        }

        let mut params = Params::new();
        params.push_opt("month", month).push_opt("year", year);

        let mut raw = self.get("/v1/markets/calendar", &params).await?;
        if let Some(calendar) = raw.get_mut("calendar") {
            normalize_in_place(calendar, "days", Some("day"));
        }
        parse::<MarketsApiResponse>(raw)?
            .into_calendar()
            .map(|calendar| calendar.days.day)
    }

    /// Search companies by name or description.
    ///
    /// Returns an empty list when nothing matches.
    pub async fn search(&self, query: &str, indexes: bool) -> Result<Vec<Security>> {
        let mut params = Params::new();
        params.push("q", query).push("indexes", indexes);

        let raw = self.get("/v1/markets/search", &params).await?;
        let raw = normalize(raw, "securities", None);
        Ok(parse::<MarketsApiResponse>(raw)?.into_matches())
    }

    /// Look up symbols by prefix, optionally limited to some exchanges and
    /// security types.
    ///
    /// Returns an empty list when nothing matches.
    pub async fn lookup(
        &self,
        query: &str,
        exchanges: &[&str],
        types: &[SecurityType],
    ) -> Result<Vec<Security>> {
        let mut params = Params::new();
        params.push("q", query);
        if !exchanges.is_empty() {
            params.push("exchanges", exchanges.join(","));
        }
        if !types.is_empty() {
            let types: Vec<&str> = types.iter().map(|t| t.as_str()).collect();
            params.push("types", types.join(","));
        }

        let raw = self.get("/v1/markets/lookup", &params).await?;
        let raw = normalize(raw, "securities", None);
        Ok(parse::<MarketsApiResponse>(raw)?.into_matches())
    }
}
