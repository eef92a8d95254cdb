//! User profile, account, balance, position and history models.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::enums::OptionEventType;
use super::primitives::AccountNumber;

/// The authenticated user and the accounts they can access.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    /// User identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Accounts, in the order the server lists them. Never empty.
    pub account: Vec<Account>,
}

/// Brokerage account summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    /// Account number, used by every account-scoped call
    pub account_number: String,
    /// Account classification (e.g. "individual", "entity")
    pub classification: String,
    /// When the account was opened
    pub date_created: DateTime<Utc>,
    /// Pattern day trader flag
    pub day_trader: bool,
    /// Option approval level
    pub option_level: i64,
    /// Account status (e.g. "active", "closed")
    pub status: String,
    /// Account type (e.g. "cash", "margin")
    #[serde(rename = "type")]
    pub account_type: String,
    /// When the account was last updated
    pub last_update_date: DateTime<Utc>,
}

impl Account {
    /// Get the account number as a strongly-typed value.
    pub fn account_number(&self) -> AccountNumber {
        AccountNumber::new(&self.account_number)
    }
}

/// Point-in-time balance snapshot.
///
/// Exactly one of [`margin`](Self::margin), [`cash`](Self::cash) or
/// [`pdt`](Self::pdt) is present, depending on the account type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Balances {
    /// Account number
    pub account_number: String,
    /// Account type: "margin", "cash" or "pdt"
    pub account_type: String,
    /// Total account equity
    pub total_equity: Decimal,
    /// Equity value
    pub equity: Decimal,
    /// Total cash
    pub total_cash: Decimal,
    /// Market value of all positions
    pub market_value: Decimal,
    /// Market value of long positions
    pub long_market_value: Decimal,
    /// Market value of short positions
    pub short_market_value: Decimal,
    /// Long stock value
    pub stock_long_value: Decimal,
    /// Long option value
    pub option_long_value: Decimal,
    /// Short option value
    pub option_short_value: Decimal,
    /// Option requirement
    pub option_requirement: Decimal,
    /// Current requirement
    pub current_requirement: Decimal,
    /// Realized P/L for the day
    pub close_pl: Decimal,
    /// Unrealized P/L
    pub open_pl: Decimal,
    /// Number of pending orders
    pub pending_orders_count: i64,
    /// Pending cash
    #[serde(default)]
    pub pending_cash: Option<Decimal>,
    /// Uncleared funds
    #[serde(default)]
    pub uncleared_funds: Option<Decimal>,
    /// Margin account details
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub margin: Option<Margin>,
    /// Cash account details
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cash: Option<Cash>,
    /// Pattern day trader account details
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pdt: Option<Pdt>,
}

/// Account-type specific balance details.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BalanceDetails<'a> {
    /// Margin account
    Margin(&'a Margin),
    /// Cash account
    Cash(&'a Cash),
    /// Pattern day trader account
    Pdt(&'a Pdt),
}

impl Balances {
    /// The populated account-type section, if any.
    pub fn details(&self) -> Option<BalanceDetails<'_>> {
        if let Some(margin) = &self.margin {
            Some(BalanceDetails::Margin(margin))
        } else if let Some(cash) = &self.cash {
            Some(BalanceDetails::Cash(cash))
        } else {
            self.pdt.as_ref().map(BalanceDetails::Pdt)
        }
    }
}

/// Balance details for margin accounts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Margin {
    /// Federal call amount
    pub fed_call: Decimal,
    /// Maintenance call amount
    pub maintenance_call: Decimal,
    /// Option buying power
    pub option_buying_power: Decimal,
    /// Stock buying power
    pub stock_buying_power: Decimal,
    /// Short stock value
    pub stock_short_value: Decimal,
    /// Sweep amount
    pub sweep: Decimal,
}

/// Balance details for cash accounts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cash {
    /// Cash available for trading
    pub cash_available: Decimal,
    /// Sweep amount
    pub sweep: Decimal,
    /// Funds not yet settled
    pub unsettled_funds: Decimal,
}

/// Balance details for pattern day trader accounts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pdt {
    /// Federal call amount
    pub fed_call: Decimal,
    /// Maintenance call amount
    pub maintenance_call: Decimal,
    /// Option buying power
    pub option_buying_power: Decimal,
    /// Stock buying power
    pub stock_buying_power: Decimal,
    /// Short stock value
    pub stock_short_value: Decimal,
}

/// A position held in an account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// Position identifier, unique within the account
    pub id: i64,
    /// Equity or OCC option symbol
    pub symbol: String,
    /// Signed quantity; negative for short positions
    pub quantity: Decimal,
    /// Total cost basis
    pub cost_basis: Decimal,
    /// When the position was opened
    pub date_acquired: DateTime<Utc>,
}

impl Position {
    /// Returns `true` for short positions.
    pub fn is_short(&self) -> bool {
        self.quantity.is_sign_negative() && !self.quantity.is_zero()
    }
}

/// `positions` container.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Positions {
    /// Positions held
    #[serde(default)]
    pub position: Vec<Position>,
}

/// A single account activity entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Cash amount of the event
    pub amount: Decimal,
    /// When the event occurred
    pub date: DateTime<Utc>,
    /// Activity type (e.g. "trade", "dividend", "journal")
    #[serde(rename = "type")]
    pub event_type: String,
    /// Trade details
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trade: Option<TradeEvent>,
    /// Adjustment details
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adjustment: Option<AdjustmentEvent>,
    /// Option expiration/assignment/exercise details
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub option: Option<OptionEvent>,
    /// Journal details
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub journal: Option<JournalEvent>,
}

/// Trade execution details in account history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeEvent {
    /// Commission charged
    pub commission: Decimal,
    /// Description
    pub description: String,
    /// Execution price
    pub price: Decimal,
    /// Signed quantity
    pub quantity: Decimal,
    /// Symbol traded
    pub symbol: String,
    /// Trade type (e.g. "Equity", "Option")
    pub trade_type: String,
}

/// Adjustment details in account history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdjustmentEvent {
    /// Description
    pub description: String,
    /// Quantity adjusted
    pub quantity: Decimal,
}

/// Option lifecycle details in account history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionEvent {
    /// What happened to the contract
    pub option_type: OptionEventType,
    /// Description
    pub description: String,
    /// Quantity affected
    pub quantity: Decimal,
}

/// Journal details in account history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalEvent {
    /// Description
    pub description: String,
    /// Quantity journaled
    pub quantity: Decimal,
}

/// `history` container.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AccountHistory {
    /// Events, newest first as returned by the server
    #[serde(default)]
    pub event: Vec<Event>,
}

/// A closed position in the gain/loss report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClosedPosition {
    /// Symbol
    pub symbol: String,
    /// Quantity closed
    pub quantity: Decimal,
    /// Total cost
    pub cost: Decimal,
    /// Total proceeds
    pub proceeds: Decimal,
    /// Realized gain or loss
    pub gain_loss: Decimal,
    /// Realized gain or loss in percent
    pub gain_loss_percent: Decimal,
    /// When the position was opened
    pub open_date: DateTime<Utc>,
    /// When the position was closed
    pub close_date: DateTime<Utc>,
    /// Holding period in days
    pub term: i64,
}

/// `gainloss` container.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GainLoss {
    /// Closed positions
    #[serde(default)]
    pub closed_position: Vec<ClosedPosition>,
}
