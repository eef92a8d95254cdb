//! Request parameter assembly.

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};

/// Wire format for date-only parameters.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Wire format for intraday datetime parameters (time and sales).
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Ordered request parameters.
///
/// Sent as the query string for GET and DELETE and as a form-encoded body
/// for POST and PUT. Absent values are never added, so nothing is ever
/// transmitted as an empty or `null` value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params(Vec<(String, String)>);

impl Params {
    /// Create an empty parameter list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a parameter.
    pub fn push(&mut self, name: impl Into<String>, value: impl fmt::Display) -> &mut Self {
        self.0.push((name.into(), value.to_string()));
        self
    }

    /// Append a parameter if `value` is `Some`.
    pub fn push_opt<T: fmt::Display>(
        &mut self,
        name: impl Into<String>,
        value: Option<T>,
    ) -> &mut Self {
        if let Some(value) = value {
            self.push(name, value);
        }
        self
    }

    /// Append a date parameter as `YYYY-MM-DD`.
    pub fn push_date(&mut self, name: impl Into<String>, date: Option<NaiveDate>) -> &mut Self {
        self.push_opt(name, date.map(|d| d.format(DATE_FORMAT)))
    }

    /// Append an intraday datetime parameter as `YYYY-MM-DD HH:MM`.
    pub fn push_datetime(
        &mut self,
        name: impl Into<String>,
        datetime: Option<NaiveDateTime>,
    ) -> &mut Self {
        self.push_opt(name, datetime.map(|d| d.format(DATETIME_FORMAT)))
    }

    /// Value of the first parameter called `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Returns `true` if a parameter called `name` is present.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Parameter names, in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(n, _)| n.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub(crate) fn as_slice(&self) -> &[(String, String)] {
        &self.0
    }
}
