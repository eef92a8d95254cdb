//! Enumeration types for the Tradier API.
//!
//! Request-side enums carry the exact wire names the API expects as form
//! or query values (see `as_str`). Response-side enums are only used where
//! the set of values is closed; open-ended server strings such as order
//! status stay `String` on the records.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! wire_enum_display {
    ($($ty:ty),* $(,)?) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.as_str())
                }
            }
        )*
    };
}

/// Option right. Only `"call"` and `"put"` are accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionType {
    /// Call option
    Call,
    /// Put option
    Put,
}

impl OptionType {
    /// Wire name of the option type.
    pub fn as_str(&self) -> &'static str {
        match self {
            OptionType::Call => "call",
            OptionType::Put => "put",
        }
    }

    /// Returns `true` if this is a call option.
    pub fn is_call(&self) -> bool {
        matches!(self, OptionType::Call)
    }

    /// Returns `true` if this is a put option.
    pub fn is_put(&self) -> bool {
        matches!(self, OptionType::Put)
    }
}

/// Kind of option event in account history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OptionEventType {
    /// Contract expired
    #[serde(rename = "optexp", alias = "OPTEXP")]
    Expiration,
    /// Short contract was assigned
    #[serde(rename = "assignment", alias = "ASSIGNMENT")]
    Assignment,
    /// Long contract was exercised
    #[serde(rename = "exercise", alias = "EXERCISE")]
    Exercise,
    /// Unknown event (forward-compatibility)
    #[serde(other)]
    Unknown,
}

/// Order class selecting how placement parameters are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderClass {
    /// Stock or ETF order
    Equity,
    /// Single-leg option order
    Option,
    /// Option order with up to four legs
    Multileg,
    /// Equity leg combined with option legs
    Combo,
}

impl OrderClass {
    /// Wire name of the order class.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderClass::Equity => "equity",
            OrderClass::Option => "option",
            OrderClass::Multileg => "multileg",
            OrderClass::Combo => "combo",
        }
    }
}

/// Side of an order or order leg.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderSide {
    /// Buy equity
    Buy,
    /// Buy equity to close a short position
    BuyToCover,
    /// Sell equity
    Sell,
    /// Sell equity short
    SellShort,
    /// Buy to open an option position
    BuyToOpen,
    /// Buy to close a short option position
    BuyToClose,
    /// Sell to open a short option position
    SellToOpen,
    /// Sell to close a long option position
    SellToClose,
}

impl OrderSide {
    /// Wire name of the side.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderSide::Buy => "buy",
            OrderSide::BuyToCover => "buy_to_cover",
            OrderSide::Sell => "sell",
            OrderSide::SellShort => "sell_short",
            OrderSide::BuyToOpen => "buy_to_open",
            OrderSide::BuyToClose => "buy_to_close",
            OrderSide::SellToOpen => "sell_to_open",
            OrderSide::SellToClose => "sell_to_close",
        }
    }

    /// Returns `true` if this side applies to option legs.
    pub fn is_option_side(&self) -> bool {
        matches!(
            self,
            OrderSide::BuyToOpen
                | OrderSide::BuyToClose
                | OrderSide::SellToOpen
                | OrderSide::SellToClose
        )
    }

    /// Returns `true` if this is a buy side.
    pub fn is_buy(&self) -> bool {
        matches!(
            self,
            OrderSide::Buy | OrderSide::BuyToCover | OrderSide::BuyToOpen | OrderSide::BuyToClose
        )
    }
}

/// Order type specifying how the order should be executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderType {
    /// Execute immediately at the market
    Market,
    /// Execute at the limit price or better
    Limit,
    /// Market order once the stop price trades
    Stop,
    /// Limit order once the stop price trades
    StopLimit,
    /// Multileg net debit
    Debit,
    /// Multileg net credit
    Credit,
    /// Multileg at even money
    Even,
}

impl OrderType {
    /// Wire name of the order type.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderType::Market => "market",
            OrderType::Limit => "limit",
            OrderType::Stop => "stop",
            OrderType::StopLimit => "stop_limit",
            OrderType::Debit => "debit",
            OrderType::Credit => "credit",
            OrderType::Even => "even",
        }
    }

    /// Returns `true` if the order type needs a `price`.
    pub fn requires_price(&self) -> bool {
        matches!(
            self,
            OrderType::Limit | OrderType::StopLimit | OrderType::Debit | OrderType::Credit
        )
    }

    /// Returns `true` if the order type needs a `stop`.
    pub fn requires_stop(&self) -> bool {
        matches!(self, OrderType::Stop | OrderType::StopLimit)
    }
}

/// How long an order remains active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderDuration {
    /// Expires at the end of the regular session
    Day,
    /// Good till cancelled
    Gtc,
    /// Pre-market session only
    Pre,
    /// Post-market session only
    Post,
}

impl OrderDuration {
    /// Wire name of the duration.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderDuration::Day => "day",
            OrderDuration::Gtc => "gtc",
            OrderDuration::Pre => "pre",
            OrderDuration::Post => "post",
        }
    }
}

/// Sort direction for gain/loss reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Ascending
    Asc,
    /// Descending
    Desc,
}

impl SortDirection {
    /// Wire name of the direction.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

/// Sort key for gain/loss reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GainLossSortKey {
    /// Sort by open date
    OpenDate,
    /// Sort by close date
    CloseDate,
}

impl GainLossSortKey {
    /// Wire name of the sort key.
    pub fn as_str(&self) -> &'static str {
        match self {
            GainLossSortKey::OpenDate => "openDate",
            GainLossSortKey::CloseDate => "closeDate",
        }
    }
}

/// Activity type filter for account history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityType {
    /// Trade executions
    Trade,
    /// Option expirations, assignments and exercises
    Option,
    /// ACH transfers
    Ach,
    /// Wire transfers
    Wire,
    /// Dividends
    Dividend,
    /// Fees
    Fee,
    /// Taxes
    Tax,
    /// Journal entries
    Journal,
    /// Checks
    Check,
    /// Account transfers
    Transfer,
    /// Adjustments
    Adjustment,
    /// Interest
    Interest,
}

impl ActivityType {
    /// Wire name of the activity type.
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityType::Trade => "trade",
            ActivityType::Option => "option",
            ActivityType::Ach => "ach",
            ActivityType::Wire => "wire",
            ActivityType::Dividend => "dividend",
            ActivityType::Fee => "fee",
            ActivityType::Tax => "tax",
            ActivityType::Journal => "journal",
            ActivityType::Check => "check",
            ActivityType::Transfer => "transfer",
            ActivityType::Adjustment => "adjustment",
            ActivityType::Interest => "interest",
        }
    }
}

/// Bar size for historical quotes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryInterval {
    /// One bar per trading day
    Daily,
    /// One bar per week
    Weekly,
    /// One bar per month
    Monthly,
}

impl HistoryInterval {
    /// Wire name of the interval.
    pub fn as_str(&self) -> &'static str {
        match self {
            HistoryInterval::Daily => "daily",
            HistoryInterval::Weekly => "weekly",
            HistoryInterval::Monthly => "monthly",
        }
    }
}

/// Bucket size for time and sales.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimesalesInterval {
    /// Every print
    #[serde(rename = "tick")]
    Tick,
    /// One-minute buckets
    #[serde(rename = "1min")]
    OneMinute,
    /// Five-minute buckets
    #[serde(rename = "5min")]
    FiveMinutes,
    /// Fifteen-minute buckets
    #[serde(rename = "15min")]
    FifteenMinutes,
}

impl TimesalesInterval {
    /// Wire name of the interval.
    pub fn as_str(&self) -> &'static str {
        match self {
            TimesalesInterval::Tick => "tick",
            TimesalesInterval::OneMinute => "1min",
            TimesalesInterval::FiveMinutes => "5min",
            TimesalesInterval::FifteenMinutes => "15min",
        }
    }
}

/// Trading session filter for time and sales.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionFilter {
    /// Include pre- and post-market data
    All,
    /// Regular session only
    Open,
}

impl SessionFilter {
    /// Wire name of the filter.
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionFilter::All => "all",
            SessionFilter::Open => "open",
        }
    }
}

/// Security type filter for symbol lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SecurityType {
    /// Common stock
    Stock,
    /// Option contract
    Option,
    /// Exchange-traded fund
    Etf,
    /// Index
    Index,
}

impl SecurityType {
    /// Wire name of the security type.
    pub fn as_str(&self) -> &'static str {
        match self {
            SecurityType::Stock => "stock",
            SecurityType::Option => "option",
            SecurityType::Etf => "etf",
            SecurityType::Index => "index",
        }
    }
}

wire_enum_display!(
    OptionType,
    OrderClass,
    OrderSide,
    OrderType,
    OrderDuration,
    SortDirection,
    GainLossSortKey,
    ActivityType,
    HistoryInterval,
    TimesalesInterval,
    SessionFilter,
    SecurityType,
);
