//! Client configuration options.

use std::time::Duration;

use crate::{AccountNumber, Environment};

/// Configuration for the Tradier client.
///
/// # Example
///
/// ```
/// use tradier_rs::{ClientConfig, Environment};
/// use std::time::Duration;
///
/// let config = ClientConfig::default()
///     .with_environment(Environment::Production)
///     .with_default_account("6YA05708")
///     .with_timeout(Duration::from_secs(60))
///     .with_user_agent("my-app/1.0");
///
/// assert_eq!(config.base_url(), "https://api.tradier.com/");
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API environment
    pub environment: Environment,
    /// Base URL override; takes precedence over `environment`
    pub base_url: Option<String>,
    /// Account used when an account-scoped call is made without one
    pub default_account: Option<AccountNumber>,
    /// Request timeout
    pub timeout: Duration,
    /// User-Agent header value
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            environment: Environment::default(),
            base_url: None,
            default_account: None,
            timeout: Duration::from_secs(30),
            user_agent: format!("tradier-rs/{} (Rust)", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ClientConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the API environment.
    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    /// Point the client at a different base URL (e.g. a local mock).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Set the default account.
    pub fn with_default_account(mut self, account: impl Into<AccountNumber>) -> Self {
        self.default_account = Some(account.into());
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the User-Agent header.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// The base URL requests are resolved against.
    pub fn base_url(&self) -> &str {
        self.base_url
            .as_deref()
            .unwrap_or_else(|| self.environment.api_base_url())
    }
}
