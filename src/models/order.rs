//! Order records and order-entry types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::enums::*;
use super::primitives::OrderId;
use crate::client::Params;

/// Maximum number of legs in a multileg order.
pub const MAX_LEGS: usize = 4;

/// An order as reported by the account orders endpoints.
///
/// `status`, `side`, `order_type` and `order_class` are kept as the
/// server's strings: the lifecycle is server-defined and the client only
/// reports it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// Order ID
    pub id: i64,
    /// Order type (e.g. "market", "limit")
    #[serde(rename = "type")]
    pub order_type: String,
    /// Underlying or equity symbol
    pub symbol: String,
    /// Order side
    pub side: String,
    /// Quantity ordered
    pub quantity: Decimal,
    /// Current status (e.g. "pending", "open", "filled")
    pub status: String,
    /// Duration (e.g. "day", "gtc")
    pub duration: String,
    /// Limit price
    #[serde(default)]
    pub price: Option<Decimal>,
    /// Stop price
    #[serde(default)]
    pub stop_price: Option<Decimal>,
    /// Average fill price
    pub avg_fill_price: Decimal,
    /// Quantity executed so far
    pub exec_quantity: Decimal,
    /// Price of the last fill
    pub last_fill_price: Decimal,
    /// Quantity of the last fill
    pub last_fill_quantity: Decimal,
    /// Quantity left to fill
    pub remaining_quantity: Decimal,
    /// When the order was created
    pub create_date: DateTime<Utc>,
    /// When the order was last updated
    pub transaction_date: DateTime<Utc>,
    /// Order class (e.g. "equity", "option", "multileg")
    #[serde(rename = "class")]
    pub order_class: String,
    /// OCC option symbol, for single-option orders
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub option_symbol: Option<String>,
    /// Number of legs, for multileg orders
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_legs: Option<i64>,
    /// Strategy name, for multileg orders
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strategy: Option<String>,
    /// Client-supplied tag
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    /// Rejection reason, when the server supplies one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason_description: Option<String>,
    /// Legs of a multileg order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub leg: Option<Vec<Leg>>,
}

impl Order {
    /// Get the order ID as a strongly-typed value.
    pub fn order_id(&self) -> OrderId {
        OrderId::new(self.id)
    }

    /// Legs of the order; empty unless it is a multileg order.
    pub fn legs(&self) -> &[Leg] {
        self.leg.as_deref().unwrap_or_default()
    }

    /// Returns `true` if the order is completely filled.
    pub fn is_filled(&self) -> bool {
        self.status == "filled"
    }

    /// Returns `true` if the order can no longer change state.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self.status.as_str(),
            "filled" | "canceled" | "rejected" | "expired" | "error"
        )
    }

    /// Calculate the fill percentage.
    pub fn fill_percentage(&self) -> Option<Decimal> {
        if self.quantity > Decimal::ZERO {
            Some((self.exec_quantity / self.quantity) * Decimal::from(100))
        } else {
            None
        }
    }
}

/// One component of a multileg order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Leg {
    /// Leg ID
    pub id: i64,
    /// Order type
    #[serde(rename = "type")]
    pub order_type: String,
    /// Underlying symbol
    pub symbol: String,
    /// Leg side
    pub side: String,
    /// Quantity ordered
    pub quantity: Decimal,
    /// Leg status
    pub status: String,
    /// Duration
    pub duration: String,
    /// Limit price
    #[serde(default)]
    pub price: Option<Decimal>,
    /// Stop price
    #[serde(default)]
    pub stop_price: Option<Decimal>,
    pub avg_fill_price: Decimal,
    pub exec_quantity: Decimal,
    pub last_fill_price: Decimal,
    pub last_fill_quantity: Decimal,
    pub remaining_quantity: Decimal,
    pub create_date: DateTime<Utc>,
    pub transaction_date: DateTime<Utc>,
    /// Leg class
    #[serde(rename = "class")]
    pub order_class: String,
    /// OCC option symbol
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub option_symbol: Option<String>,
}

/// `orders` container.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Orders {
    /// Orders, as listed by the server
    #[serde(default)]
    pub order: Vec<Order>,
}

/// Acknowledgement returned when an order is placed, modified or cancelled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderDetails {
    /// Order ID
    pub id: i64,
    /// Status reported by the server (usually "ok")
    pub status: String,
    /// Partner identifier
    #[serde(default)]
    pub partner_id: Option<String>,
}

impl OrderDetails {
    /// Get the order ID as a strongly-typed value.
    pub fn order_id(&self) -> OrderId {
        OrderId::new(self.id)
    }
}

/// Cost estimate returned for an order preview.
///
/// The server only fills in what applies to the order class, so almost
/// everything is optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderPreview {
    /// Preview status (usually "ok")
    pub status: String,
    /// Whether the order would be accepted
    #[serde(default)]
    pub result: Option<bool>,
    #[serde(default)]
    pub commission: Option<Decimal>,
    #[serde(default)]
    pub cost: Option<Decimal>,
    #[serde(default)]
    pub fees: Option<Decimal>,
    #[serde(default)]
    pub order_cost: Option<Decimal>,
    #[serde(default)]
    pub margin_change: Option<Decimal>,
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub quantity: Option<Decimal>,
    #[serde(default)]
    pub side: Option<String>,
    #[serde(default, rename = "type")]
    pub order_type: Option<String>,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default, rename = "class")]
    pub order_class: Option<String>,
    #[serde(default)]
    pub strategy: Option<String>,
    #[serde(default)]
    pub day_trades: Option<i64>,
    #[serde(default)]
    pub extended_hours: Option<bool>,
    #[serde(default)]
    pub request_date: Option<String>,
}

/// Error messages returned in place of an order acknowledgement.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiErrors {
    /// Messages, verbatim from the server
    #[serde(rename = "error", default)]
    pub messages: Vec<String>,
}

/// One leg of a multileg order request.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderLeg {
    /// OCC option symbol
    pub option_symbol: String,
    /// Leg side; must be one of the option sides
    pub side: OrderSide,
    /// Contracts
    pub quantity: Decimal,
}

impl OrderLeg {
    /// Create a new order leg.
    pub fn new(option_symbol: impl Into<String>, side: OrderSide, quantity: Decimal) -> Self {
        Self {
            option_symbol: option_symbol.into(),
            side,
            quantity,
        }
    }

    pub fn buy_to_open(option_symbol: impl Into<String>, quantity: Decimal) -> Self {
        Self::new(option_symbol, OrderSide::BuyToOpen, quantity)
    }

    pub fn sell_to_open(option_symbol: impl Into<String>, quantity: Decimal) -> Self {
        Self::new(option_symbol, OrderSide::SellToOpen, quantity)
    }

    pub fn buy_to_close(option_symbol: impl Into<String>, quantity: Decimal) -> Self {
        Self::new(option_symbol, OrderSide::BuyToClose, quantity)
    }

    pub fn sell_to_close(option_symbol: impl Into<String>, quantity: Decimal) -> Self {
        Self::new(option_symbol, OrderSide::SellToClose, quantity)
    }
}

/// Pricing and lifetime terms shared by every order class.
///
/// Used by the `place_equity`, `place_option` and `place_multileg`
/// shortcuts on the trading service.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderTerms {
    pub order_type: OrderType,
    pub duration: OrderDuration,
    pub price: Option<Decimal>,
    pub stop: Option<Decimal>,
    pub tag: Option<String>,
}

impl OrderTerms {
    /// Market order terms.
    pub fn market(duration: OrderDuration) -> Self {
        Self {
            order_type: OrderType::Market,
            duration,
            price: None,
            stop: None,
            tag: None,
        }
    }

    /// Limit order terms.
    pub fn limit(price: Decimal, duration: OrderDuration) -> Self {
        Self {
            order_type: OrderType::Limit,
            price: Some(price),
            ..Self::market(duration)
        }
    }

    /// Stop order terms.
    pub fn stop(stop: Decimal, duration: OrderDuration) -> Self {
        Self {
            order_type: OrderType::Stop,
            stop: Some(stop),
            ..Self::market(duration)
        }
    }

    /// Stop-limit order terms.
    pub fn stop_limit(stop: Decimal, price: Decimal, duration: OrderDuration) -> Self {
        Self {
            order_type: OrderType::StopLimit,
            price: Some(price),
            stop: Some(stop),
            ..Self::market(duration)
        }
    }

    /// Net-priced multileg terms (`debit`, `credit` or `even`).
    pub fn net(order_type: OrderType, price: Option<Decimal>, duration: OrderDuration) -> Self {
        Self {
            order_type,
            price,
            ..Self::market(duration)
        }
    }

    /// Attach a client tag.
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    fn apply(self, builder: NewOrderBuilder) -> NewOrderBuilder {
        let builder = builder
            .order_type(self.order_type)
            .duration(self.duration);
        let builder = match self.price {
            Some(price) => builder.price(price),
            None => builder,
        };
        let builder = match self.stop {
            Some(stop) => builder.stop(stop),
            None => builder,
        };
        match self.tag {
            Some(tag) => builder.tag(tag),
            None => builder,
        }
    }
}

/// A validated order ready to be placed or previewed.
///
/// Build with [`NewOrderBuilder`].
///
/// # Example
///
/// ```
/// use tradier_rs::models::{NewOrderBuilder, OrderDuration, OrderLeg, OrderType};
/// use rust_decimal_macros::dec;
///
/// let order = NewOrderBuilder::multileg("SPY")
///     .order_type(OrderType::Debit)
///     .duration(OrderDuration::Day)
///     .price(dec!(1.05))
///     .add_leg(OrderLeg::buy_to_open("SPY190621C00280000", dec!(1)))
///     .add_leg(OrderLeg::sell_to_open("SPY190621C00285000", dec!(1)))
///     .build()
///     .unwrap();
///
/// let params = order.to_params();
/// assert_eq!(params.get("option_symbol[1]"), Some("SPY190621C00285000"));
/// assert!(!params.contains("option_symbol[2]"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    pub class: OrderClass,
    pub symbol: String,
    /// Set for single-option orders, optional leg 0 of a multileg order
    pub option_symbol: Option<String>,
    /// Required for equity and single-option orders
    pub side: Option<OrderSide>,
    /// Required for equity and single-option orders
    pub quantity: Option<Decimal>,
    pub order_type: OrderType,
    pub duration: OrderDuration,
    pub price: Option<Decimal>,
    pub stop: Option<Decimal>,
    pub tag: Option<String>,
    /// Set for multileg orders only
    pub legs: Vec<OrderLeg>,
}

impl NewOrder {
    /// Request parameters for this order.
    ///
    /// Multileg orders send `option_symbol[i]`, `side[i]` and `quantity[i]`
    /// for each leg present and nothing for the rest. The unindexed
    /// `option_symbol`, `side` and `quantity` go out only when set.
    pub fn to_params(&self) -> Params {
        let mut params = Params::new();
        params
            .push("class", self.class)
            .push("symbol", &self.symbol)
            .push_opt("option_symbol", self.option_symbol.as_deref())
            .push_opt("side", self.side)
            .push_opt("quantity", self.quantity.map(|q| q.normalize()));

        for (i, leg) in self.legs.iter().enumerate() {
            params
                .push(format!("option_symbol[{i}]"), &leg.option_symbol)
                .push(format!("side[{i}]"), leg.side)
                .push(format!("quantity[{i}]"), leg.quantity.normalize());
        }

        params
            .push("type", self.order_type)
            .push("duration", self.duration)
            .push_opt("price", self.price.map(|p| p.normalize()))
            .push_opt("stop", self.stop.map(|p| p.normalize()))
            .push_opt("tag", self.tag.as_deref());
        params
    }
}

/// Builder for [`NewOrder`] with validation.
#[derive(Debug, Clone)]
pub struct NewOrderBuilder {
    class: OrderClass,
    symbol: String,
    option_symbol: Option<String>,
    side: Option<OrderSide>,
    quantity: Option<Decimal>,
    order_type: Option<OrderType>,
    duration: OrderDuration,
    price: Option<Decimal>,
    stop: Option<Decimal>,
    tag: Option<String>,
    legs: Vec<OrderLeg>,
}

impl NewOrderBuilder {
    /// Start an order of the given class. Duration defaults to `day`.
    pub fn new(class: OrderClass, symbol: impl Into<String>) -> Self {
        Self {
            class,
            symbol: symbol.into(),
            option_symbol: None,
            side: None,
            quantity: None,
            order_type: None,
            duration: OrderDuration::Day,
            price: None,
            stop: None,
            tag: None,
            legs: Vec::new(),
        }
    }

    /// Start an equity order.
    pub fn equity(symbol: impl Into<String>, side: OrderSide, quantity: Decimal) -> Self {
        Self::new(OrderClass::Equity, symbol)
            .side(side)
            .quantity(quantity)
    }

    /// Start a single-option order on `symbol`'s contract `option_symbol`.
    pub fn option(
        symbol: impl Into<String>,
        option_symbol: impl Into<String>,
        side: OrderSide,
        quantity: Decimal,
    ) -> Self {
        Self::new(OrderClass::Option, symbol)
            .option_symbol(option_symbol)
            .side(side)
            .quantity(quantity)
    }

    /// Start a multileg order on `symbol`.
    pub fn multileg(symbol: impl Into<String>) -> Self {
        Self::new(OrderClass::Multileg, symbol)
    }

    pub fn option_symbol(mut self, option_symbol: impl Into<String>) -> Self {
        self.option_symbol = Some(option_symbol.into());
        self
    }

    pub fn side(mut self, side: OrderSide) -> Self {
        self.side = Some(side);
        self
    }

    pub fn quantity(mut self, quantity: Decimal) -> Self {
        self.quantity = Some(quantity);
        self
    }

    /// Set the order type.
    pub fn order_type(mut self, order_type: OrderType) -> Self {
        self.order_type = Some(order_type);
        self
    }

    /// Set the duration.
    pub fn duration(mut self, duration: OrderDuration) -> Self {
        self.duration = duration;
        self
    }

    /// Set the limit (or net) price.
    pub fn price(mut self, price: Decimal) -> Self {
        self.price = Some(price);
        self
    }

    /// Set the stop price.
    pub fn stop(mut self, stop: Decimal) -> Self {
        self.stop = Some(stop);
        self
    }

    /// Attach a client tag.
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    /// Add a leg to a multileg order.
    pub fn add_leg(mut self, leg: OrderLeg) -> Self {
        self.legs.push(leg);
        self
    }

    /// Replace all legs of a multileg order.
    pub fn legs(mut self, legs: Vec<OrderLeg>) -> Self {
        self.legs = legs;
        self
    }

    pub(crate) fn terms(self, terms: OrderTerms) -> Self {
        terms.apply(self)
    }

    /// Build the order.
    pub fn build(self) -> crate::Result<NewOrder> {
        let order_type = self
            .order_type
            .ok_or_else(|| crate::Error::InvalidInput("order_type is required".to_string()))?;

        if self.symbol.is_empty() {
            return Err(crate::Error::InvalidInput(
                "symbol is required".to_string(),
            ));
        }

        if order_type.requires_price() && self.price.is_none() {
            return Err(crate::Error::InvalidInput(format!(
                "{order_type} orders require a price"
            )));
        }

        if order_type.requires_stop() && self.stop.is_none() {
            return Err(crate::Error::InvalidInput(format!(
                "{order_type} orders require a stop"
            )));
        }

        match self.class {
            OrderClass::Equity | OrderClass::Option => {
                let side = self
                    .side
                    .ok_or_else(|| crate::Error::InvalidInput("side is required".to_string()))?;
                let quantity = self.quantity.ok_or_else(|| {
                    crate::Error::InvalidInput("quantity is required".to_string())
                })?;
                if quantity <= Decimal::ZERO {
                    return Err(crate::Error::InvalidInput(
                        "quantity must be positive".to_string(),
                    ));
                }
                if !self.legs.is_empty() {
                    return Err(crate::Error::InvalidInput(format!(
                        "{} orders do not take legs",
                        self.class
                    )));
                }

                if self.class == OrderClass::Option {
                    if self.option_symbol.is_none() {
                        return Err(crate::Error::InvalidInput(
                            "Option orders require an option_symbol".to_string(),
                        ));
                    }
                    if !side.is_option_side() {
                        return Err(crate::Error::InvalidInput(format!(
                            "{side} is not an option side"
                        )));
                    }
                } else if side.is_option_side() {
                    return Err(crate::Error::InvalidInput(format!(
                        "{side} is not an equity side"
                    )));
                }
            }
            OrderClass::Multileg => {
                if self.legs.is_empty() || self.legs.len() > MAX_LEGS {
                    return Err(crate::Error::InvalidInput(format!(
                        "Multileg orders take 1 to {MAX_LEGS} legs, got {}",
                        self.legs.len()
                    )));
                }
                if let Some(leg) = self.legs.iter().find(|l| !l.side.is_option_side()) {
                    return Err(crate::Error::InvalidInput(format!(
                        "Leg {} has non-option side {}",
                        leg.option_symbol, leg.side
                    )));
                }
                if self.legs.iter().any(|l| l.quantity <= Decimal::ZERO) {
                    return Err(crate::Error::InvalidInput(
                        "Leg quantities must be positive".to_string(),
                    ));
                }
                if let Some(side) = self.side.filter(|s| !s.is_option_side()) {
                    return Err(crate::Error::InvalidInput(format!(
                        "{side} is not an option side"
                    )));
                }
            }
            OrderClass::Combo => {
                return Err(crate::Error::InvalidInput(
                    "Combo orders are not supported".to_string(),
                ));
            }
        }

        Ok(NewOrder {
            class: self.class,
            symbol: self.symbol,
            option_symbol: self.option_symbol.filter(|_| self.class != OrderClass::Equity),
            side: self.side,
            quantity: self.quantity,
            order_type,
            duration: self.duration,
            price: self.price,
            stop: self.stop,
            tag: self.tag,
            legs: self.legs,
        })
    }
}

/// Sparse changes to an open order.
///
/// Only the fields that are set are sent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderChanges {
    pub order_type: Option<OrderType>,
    pub duration: Option<OrderDuration>,
    pub price: Option<Decimal>,
    pub stop: Option<Decimal>,
}

impl OrderChanges {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn order_type(mut self, order_type: OrderType) -> Self {
        self.order_type = Some(order_type);
        self
    }

    pub fn duration(mut self, duration: OrderDuration) -> Self {
        self.duration = Some(duration);
        self
    }

    pub fn price(mut self, price: Decimal) -> Self {
        self.price = Some(price);
        self
    }

    pub fn stop(mut self, stop: Decimal) -> Self {
        self.stop = Some(stop);
        self
    }

    /// Returns `true` if nothing would be changed.
    pub fn is_empty(&self) -> bool {
        self.order_type.is_none()
            && self.duration.is_none()
            && self.price.is_none()
            && self.stop.is_none()
    }

    /// Request parameters for the set fields. Fails on an empty patch.
    pub fn to_params(&self) -> crate::Result<Params> {
        if self.is_empty() {
            return Err(crate::Error::InvalidInput(
                "Order modification must change at least one field".to_string(),
            ));
        }
        let mut params = Params::new();
        params
            .push_opt("type", self.order_type)
            .push_opt("duration", self.duration)
            .push_opt("price", self.price.map(|p| p.normalize()))
            .push_opt("stop", self.stop.map(|p| p.normalize()));
        Ok(params)
    }
}
