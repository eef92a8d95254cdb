//! Market clock and trading calendar models.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use super::serde_util::{hour_minute, timestamp_secs};

/// Intraday market status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Clock {
    /// Trading date
    pub date: NaiveDate,
    /// Human-readable status
    pub description: String,
    /// Current state: "premarket", "open", "postmarket" or "closed"
    pub state: String,
    /// Server time
    #[serde(with = "timestamp_secs")]
    pub timestamp: DateTime<Utc>,
    /// Time of the next state change, exchange local time
    #[serde(with = "hour_minute")]
    pub next_change: NaiveTime,
    /// State after the next change
    pub next_state: String,
}

impl Clock {
    /// Returns `true` during the regular session.
    pub fn is_open(&self) -> bool {
        self.state == "open"
    }
}

/// Start and end of a session, exchange local time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionHours {
    #[serde(with = "hour_minute")]
    pub start: NaiveTime,
    #[serde(with = "hour_minute")]
    pub end: NaiveTime,
}

impl SessionHours {
    /// Returns `true` if `time` falls inside the session.
    pub fn contains(&self, time: NaiveTime) -> bool {
        time >= self.start && time < self.end
    }
}

/// One day of the trading calendar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketDay {
    pub date: NaiveDate,
    /// "open" or "closed"
    pub status: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub premarket: Option<SessionHours>,
    /// Regular session
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub open: Option<SessionHours>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postmarket: Option<SessionHours>,
}

impl MarketDay {
    /// Returns `true` if the market trades on this day.
    pub fn is_trading_day(&self) -> bool {
        self.status == "open"
    }
}

/// `days` container.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Days {
    #[serde(default)]
    pub day: Vec<MarketDay>,
}

/// Trading calendar for one month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Calendar {
    pub month: u32,
    pub year: i32,
    pub days: Days,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock() {
        let json = r#"{
            "date": "2019-05-06",
            "description": "Market is open from 09:30 to 16:00",
            "state": "open",
            "timestamp": 1557156988,
            "next_change": "16:00",
            "next_state": "postmarket"
        }"#;
        let clock: Clock = serde_json::from_str(json).unwrap();
        assert!(clock.is_open());
        assert_eq!(clock.next_change, NaiveTime::from_hms_opt(16, 0, 0).unwrap());
        assert_eq!(serde_json::to_value(&clock).unwrap()["next_change"], "16:00");
    }

    #[test]
    fn test_market_day() {
        let json = r#"{
            "date": "2019-05-01",
            "status": "open",
            "description": "Market is open",
            "premarket": { "start": "07:00", "end": "09:24" },
            "open": { "start": "09:30", "end": "16:00" },
            "postmarket": { "start": "16:00", "end": "19:55" }
        }"#;
        let day: MarketDay = serde_json::from_str(json).unwrap();
        assert!(day.is_trading_day());
        let open = day.open.unwrap();
        assert!(open.contains(NaiveTime::from_hms_opt(9, 30, 0).unwrap()));
        assert!(!open.contains(NaiveTime::from_hms_opt(16, 0, 0).unwrap()));

        let closed: MarketDay = serde_json::from_str(
            r#"{"date": "2019-05-04", "status": "closed", "description": "Market is closed"}"#,
        )
        .unwrap();
        assert!(!closed.is_trading_day());
        assert!(closed.open.is_none());
    }
}
