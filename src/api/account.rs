//! Account data service: profile, balances, positions, history and orders.

use std::sync::Arc;

use chrono::NaiveDate;
use serde_json::Value;

use crate::client::paginated::{BoxFuture, PaginatedStream};
use crate::client::{ClientInner, Params};
use crate::models::envelope::parse;
use crate::models::{
    AccountNumber, AccountsApiResponse, ActivityType, Balances, ClosedPosition, Event,
    GainLossSortKey, Order, OrderId, Position, Profile, SortDirection,
};
use crate::normalize::{for_each_item, normalize, normalize_optional};
use crate::Result;

/// Service for account data.
///
/// Every account-scoped method takes an optional account number. `None`
/// falls back to the client's default account and fails with
/// [`Error::MissingAccount`](crate::Error::MissingAccount) if there is none.
/// Passing an account never changes the default.
///
/// # Example
///
/// ```no_run
/// use tradier_rs::AccountNumber;
///
/// # async fn example(client: tradier_rs::TradierClient) -> tradier_rs::Result<()> {
/// let account = AccountNumber::new("VA000001");
///
/// let positions = client.account().positions(Some(&account)).await?;
/// for position in positions {
///     println!("{}: {} @ {}", position.symbol, position.quantity, position.cost_basis);
/// }
/// # Ok(())
/// # }
/// ```
pub struct AccountService {
    inner: Arc<ClientInner>,
}

/// Filters for account history.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct HistoryQuery {
    /// Page number, starting at 1
    pub page: Option<u32>,
    /// Events per page
    pub limit: Option<u32>,
    /// Only this kind of activity
    pub activity_type: Option<ActivityType>,
    /// Events on or after this date
    pub start: Option<NaiveDate>,
    /// Events on or before this date
    pub end: Option<NaiveDate>,
    /// Only events for this symbol
    pub symbol: Option<String>,
    /// Match `symbol` exactly rather than as a prefix
    pub exact_match: Option<bool>,
}

impl HistoryQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn activity_type(mut self, activity_type: ActivityType) -> Self {
        self.activity_type = Some(activity_type);
        self
    }

    /// Restrict to `start..=end`.
    pub fn between(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.start = Some(start);
        self.end = Some(end);
        self
    }

    pub fn symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol = Some(symbol.into());
        self
    }

    pub fn exact_match(mut self, exact: bool) -> Self {
        self.exact_match = Some(exact);
        self
    }

    fn to_params(&self) -> Params {
        let mut params = Params::new();
        params
            .push_opt("page", self.page)
            .push_opt("limit", self.limit)
            .push_opt("type", self.activity_type)
            .push_date("start", self.start)
            .push_date("end", self.end)
            .push_opt("symbol", self.symbol.as_deref())
            .push_opt("exactMatch", self.exact_match);
        params
    }
}

/// Filters and ordering for the gain/loss report.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct GainLossQuery {
    /// Page number, starting at 1
    pub page: Option<u32>,
    /// Closed positions per page
    pub limit: Option<u32>,
    /// Date to sort by
    pub sort_by: Option<GainLossSortKey>,
    /// Sort direction
    pub sort: Option<SortDirection>,
    /// Positions closed on or after this date
    pub start: Option<NaiveDate>,
    /// Positions closed on or before this date
    pub end: Option<NaiveDate>,
    /// Only positions in this symbol
    pub symbol: Option<String>,
}

impl GainLossQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Sort by `key` in `direction`.
    pub fn sorted(mut self, key: GainLossSortKey, direction: SortDirection) -> Self {
        self.sort_by = Some(key);
        self.sort = Some(direction);
        self
    }

    /// Restrict to `start..=end`.
    pub fn between(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.start = Some(start);
        self.end = Some(end);
        self
    }

    pub fn symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol = Some(symbol.into());
        self
    }

    fn to_params(&self) -> Params {
        let mut params = Params::new();
        params
            .push_opt("page", self.page)
            .push_opt("limit", self.limit)
            .push_opt("sortBy", self.sort_by)
            .push_opt("sort", self.sort)
            .push_date("start", self.start)
            .push_date("end", self.end)
            .push_opt("symbol", self.symbol.as_deref());
        params
    }
}

impl AccountService {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// Get the user profile and the accounts it can access.
    pub async fn profile(&self) -> Result<Profile> {
        let raw = self.inner.get("/v1/user/profile", &Params::new()).await?;
        let raw = normalize(raw, "profile", Some("account"));
        parse::<AccountsApiResponse>(raw)?.into_profile()
    }

    /// Get current balances.
    pub async fn balances(&self, account: Option<&AccountNumber>) -> Result<Balances> {
        let account = self.inner.resolve_account(account)?;
        let raw = self
            .inner
            .get(&format!("/v1/accounts/{account}/balances"), &Params::new())
            .await?;
        parse::<AccountsApiResponse>(raw)?.into_balances()
    }

    /// Get current positions. An account with no positions yields an empty list.
    pub async fn positions(&self, account: Option<&AccountNumber>) -> Result<Vec<Position>> {
        let account = self.inner.resolve_account(account)?;
        let raw = self
            .inner
            .get(&format!("/v1/accounts/{account}/positions"), &Params::new())
            .await?;
        let raw = normalize(raw, "positions", None);
        parse::<AccountsApiResponse>(raw)?.into_positions()
    }

    /// Get one page of account activity.
    pub async fn history(
        &self,
        account: Option<&AccountNumber>,
        query: HistoryQuery,
    ) -> Result<Vec<Event>> {
        let account = self.inner.resolve_account(account)?;
        fetch_history(&self.inner, &account, &query.to_params()).await
    }

    /// Stream all account activity matching `query`, `page_size` events per
    /// request, starting at `query.page` (or page 1).
    pub fn history_stream(
        &self,
        account: Option<&AccountNumber>,
        query: HistoryQuery,
        page_size: u32,
    ) -> Result<PaginatedStream<Event>> {
        let account = self.inner.resolve_account(account)?;
        let first_page = query.page.unwrap_or(1);
        let inner = self.inner.clone();

        Ok(PaginatedStream::new(first_page, page_size, move |page| {
            let inner = inner.clone();
            let account = account.clone();
            let params = query.clone().page(page).limit(page_size).to_params();
            Box::pin(async move { fetch_history(&inner, &account, &params).await })
                as BoxFuture<'static, Result<Vec<Event>>>
        }))
    }

    /// Get one page of the realized gain/loss report.
    pub async fn gain_loss(
        &self,
        account: Option<&AccountNumber>,
        query: GainLossQuery,
    ) -> Result<Vec<ClosedPosition>> {
        let account = self.inner.resolve_account(account)?;
        fetch_gain_loss(&self.inner, &account, &query.to_params()).await
    }

    /// Stream every closed position matching `query`, `page_size` per request.
    pub fn gain_loss_stream(
        &self,
        account: Option<&AccountNumber>,
        query: GainLossQuery,
        page_size: u32,
    ) -> Result<PaginatedStream<ClosedPosition>> {
        let account = self.inner.resolve_account(account)?;
        let first_page = query.page.unwrap_or(1);
        let inner = self.inner.clone();

        Ok(PaginatedStream::new(first_page, page_size, move |page| {
            let inner = inner.clone();
            let account = account.clone();
            let params = query.clone().page(page).limit(page_size).to_params();
            Box::pin(async move { fetch_gain_loss(&inner, &account, &params).await })
                as BoxFuture<'static, Result<Vec<ClosedPosition>>>
        }))
    }

    /// List orders. An account with no orders yields an empty list.
    pub async fn orders(
        &self,
        account: Option<&AccountNumber>,
        include_tags: bool,
    ) -> Result<Vec<Order>> {
        let account = self.inner.resolve_account(account)?;
        let mut params = Params::new();
        params.push("includeTags", include_tags);

        let raw = self
            .inner
            .get(&format!("/v1/accounts/{account}/orders"), &params)
            .await?;
        let mut raw = normalize(raw, "orders", None);
        for_each_item(&mut raw, "orders", "order", |order| {
            normalize_optional(order, "leg")
        });
        parse::<AccountsApiResponse>(raw)?.into_orders()
    }

    /// Get a single order.
    pub async fn order(
        &self,
        account: Option<&AccountNumber>,
        order_id: OrderId,
        include_tags: bool,
    ) -> Result<Order> {
        let account = self.inner.resolve_account(account)?;
        let mut params = Params::new();
        params.push("includeTags", include_tags);

        let mut raw = self
            .inner
            .get(&format!("/v1/accounts/{account}/orders/{order_id}"), &params)
            .await?;
        if let Some(order) = raw.get_mut("order") {
            normalize_optional(order, "leg");
        }
        parse::<AccountsApiResponse>(raw)?.into_order()
    }
}

async fn fetch_history(
    inner: &ClientInner,
    account: &AccountNumber,
    params: &Params,
) -> Result<Vec<Event>> {
    let raw: Value = inner
        .get(&format!("/v1/accounts/{account}/history"), params)
        .await?;
    let raw = normalize(raw, "history", Some("event"));
    parse::<AccountsApiResponse>(raw)?.into_history()
}

async fn fetch_gain_loss(
    inner: &ClientInner,
    account: &AccountNumber,
    params: &Params,
) -> Result<Vec<ClosedPosition>> {
    let raw: Value = inner
        .get(&format!("/v1/accounts/{account}/gainloss"), params)
        .await?;
    let raw = normalize(raw, "gainloss", Some("closed_position"));
    parse::<AccountsApiResponse>(raw)?.into_gain_loss()
}
