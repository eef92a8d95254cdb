//! Error types for the Tradier API client.
//!
//! Failures fall into three families that callers usually want to tell
//! apart:
//!
//! - **transport**: the request never produced a usable body
//!   ([`Error::Api`], [`Error::Http`], [`Error::Json`])
//! - **validation**: the body arrived but does not have the expected shape
//!   ([`Error::Validation`])
//! - **business**: the brokerage understood the order and refused it
//!   ([`Error::OrderRejected`])

use thiserror::Error;

/// A specialized `Result` type for Tradier operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for all Tradier API operations.
#[derive(Error, Debug)]
pub enum Error {
    /// The server answered with a non-2xx status.
    #[error("API error: status={status}, body={body}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Raw response body
        body: String,
    },

    /// HTTP request failed before a response was received
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body was not valid JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Response JSON did not match the expected record types.
    #[error("invalid response field `{field}`: {expected}")]
    Validation {
        /// Path of the offending value, e.g. `orders.order[0].price`
        field: String,
        /// What the decoder required at that path
        expected: String,
    },

    /// The brokerage refused the order.
    #[error("Order rejected: {}", messages.join("; "))]
    OrderRejected {
        /// Rejection reasons exactly as reported by the server
        messages: Vec<String>,
    },

    /// An account-scoped call was made without an account number and the
    /// client has no default account.
    #[error("No account number given and no default account configured")]
    MissingAccount,

    /// Invalid input provided to a function
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// URL parsing error
    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Returns `true` for failures at the HTTP/transport level.
    pub fn is_transport_error(&self) -> bool {
        matches!(self, Error::Api { .. } | Error::Http(_) | Error::Json(_))
    }

    /// Returns `true` if the response body did not match the expected shape.
    pub fn is_validation_error(&self) -> bool {
        matches!(self, Error::Validation { .. })
    }

    /// Returns `true` if the server rejected an order.
    ///
    /// # Example
    ///
    /// ```
    /// use tradier_rs::Error;
    ///
    /// let err = Error::OrderRejected { messages: vec!["Insufficient buying power".into()] };
    /// assert!(err.is_order_rejection());
    /// assert!(!err.is_transport_error());
    /// ```
    pub fn is_order_rejection(&self) -> bool {
        matches!(self, Error::OrderRejected { .. })
    }

    /// Returns `true` if this error indicates a client-side issue
    /// (invalid input, bad request, etc.).
    pub fn is_client_error(&self) -> bool {
        match self {
            Error::Api { status, .. } => (400..500).contains(status),
            Error::InvalidInput(_) | Error::MissingAccount | Error::Config(_) => true,
            _ => false,
        }
    }

    /// Returns `true` if this error indicates a server-side issue.
    pub fn is_server_error(&self) -> bool {
        match self {
            Error::Api { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// The HTTP status code, for errors that carry one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Api { status, .. } => Some(*status),
            Error::Http(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub(crate) fn validation(field: impl Into<String>, expected: impl Into<String>) -> Self {
        Error::Validation {
            field: field.into(),
            expected: expected.into(),
        }
    }

    pub(crate) fn from_path_error(err: serde_path_to_error::Error<serde_json::Error>) -> Self {
        let path = err.path().to_string();
        let field = if path == "." { "<root>".to_string() } else { path };
        Error::Validation {
            field,
            expected: err.into_inner().to_string(),
        }
    }
}
