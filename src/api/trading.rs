//! Trading service: place, preview, modify and cancel orders.

use std::sync::Arc;

use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::client::{ClientInner, Params};
use crate::models::envelope::parse;
use crate::models::{
    AccountNumber, NewOrder, NewOrderBuilder, OrderApiResponse, OrderChanges, OrderDetails,
    OrderId, OrderLeg, OrderPreview, OrderSide, OrderTerms,
};
use crate::normalize::normalize_in_place;
use crate::Result;

/// Service for order entry.
///
/// Every call that gets an order acknowledgement back fails with
/// [`Error::OrderRejected`](crate::Error::OrderRejected) when the server
/// answers with an `errors` list instead.
///
/// # Example
///
/// ```no_run
/// use tradier_rs::models::{OrderDuration, OrderSide, OrderTerms};
/// use rust_decimal_macros::dec;
///
/// # async fn example(client: tradier_rs::TradierClient) -> tradier_rs::Result<()> {
/// let trading = client.trading();
///
/// let ack = trading
///     .place_equity(
///         None,
///         "AAPL",
///         OrderSide::Buy,
///         dec!(10),
///         OrderTerms::limit(dec!(150.00), OrderDuration::Day),
///     )
///     .await?;
///
/// trading.cancel(None, ack.order_id()).await?;
/// # Ok(())
/// # }
/// ```
pub struct TradingService {
    inner: Arc<ClientInner>,
}

impl TradingService {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// Place an order.
    pub async fn place(
        &self,
        account: Option<&AccountNumber>,
        order: &NewOrder,
    ) -> Result<OrderDetails> {
        let account = self.inner.resolve_account(account)?;
        debug!(class = %order.class, symbol = %order.symbol, "Placing order");

        let raw = self
            .inner
            .post(&format!("/v1/accounts/{account}/orders"), &order.to_params())
            .await?;
        order_response(raw)
    }

    /// Preview an order: the server validates it and estimates its cost
    /// without placing it.
    pub async fn preview(
        &self,
        account: Option<&AccountNumber>,
        order: &NewOrder,
    ) -> Result<OrderPreview> {
        let account = self.inner.resolve_account(account)?;
        let mut params = order.to_params();
        params.push("preview", true);

        let raw = self
            .inner
            .post(&format!("/v1/accounts/{account}/orders"), &params)
            .await?;
        order_response(raw)
    }

    /// Place an equity order.
    pub async fn place_equity(
        &self,
        account: Option<&AccountNumber>,
        symbol: &str,
        side: OrderSide,
        quantity: Decimal,
        terms: OrderTerms,
    ) -> Result<OrderDetails> {
        let order = NewOrderBuilder::equity(symbol, side, quantity)
            .terms(terms)
            .build()?;
        self.place(account, &order).await
    }

    /// Place a single-option order on `symbol`'s contract `option_symbol`.
    pub async fn place_option(
        &self,
        account: Option<&AccountNumber>,
        symbol: &str,
        option_symbol: &str,
        side: OrderSide,
        quantity: Decimal,
        terms: OrderTerms,
    ) -> Result<OrderDetails> {
        let order = NewOrderBuilder::option(symbol, option_symbol, side, quantity)
            .terms(terms)
            .build()?;
        self.place(account, &order).await
    }

    /// Place a multileg order with one to four legs.
    pub async fn place_multileg(
        &self,
        account: Option<&AccountNumber>,
        symbol: &str,
        legs: Vec<OrderLeg>,
        terms: OrderTerms,
    ) -> Result<OrderDetails> {
        let order = NewOrderBuilder::multileg(symbol)
            .legs(legs)
            .terms(terms)
            .build()?;
        self.place(account, &order).await
    }

    /// Change an open order. Only the fields set in `changes` are sent.
    pub async fn modify(
        &self,
        account: Option<&AccountNumber>,
        order_id: OrderId,
        changes: &OrderChanges,
    ) -> Result<OrderDetails> {
        let params = changes.to_params()?;
        let account = self.inner.resolve_account(account)?;

        let raw = self
            .inner
            .put(&format!("/v1/accounts/{account}/orders/{order_id}"), &params)
            .await?;
        order_response(raw)
    }

    /// Cancel an open order.
    pub async fn cancel(
        &self,
        account: Option<&AccountNumber>,
        order_id: OrderId,
    ) -> Result<OrderDetails> {
        let account = self.inner.resolve_account(account)?;

        let raw = self
            .inner
            .delete(
                &format!("/v1/accounts/{account}/orders/{order_id}"),
                &Params::new(),
            )
            .await?;
        order_response(raw)
    }
}

/// Decode an order acknowledgement, surfacing server-side rejections.
fn order_response<T: DeserializeOwned>(mut raw: Value) -> Result<T> {
    normalize_in_place(&mut raw, "errors", Some("error"));
    parse::<OrderApiResponse<T>>(raw)?.into_result()
}
