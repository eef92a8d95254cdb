//! HTTP client implementation for the Tradier API.

use std::sync::Arc;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::Method;
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use tracing::{debug, trace};
use url::Url;

use crate::api::{AccountService, MarketService, TradingService};
use crate::{AccountNumber, Environment, Error, Result};

use super::config::ClientConfig;
use super::params::Params;

/// Environment variable holding the bearer token.
pub const TOKEN_ENV: &str = "TRADIER_TOKEN";
/// Environment variable holding the default account number.
pub const ACCOUNT_ENV: &str = "TRADIER_ACCOUNT_ID";
/// Environment variable holding a base URL override.
pub const BASE_URL_ENV: &str = "TRADIER_BASE_URL";

/// The main client for interacting with the Tradier API.
///
/// The client is cheap to clone and safe to share between tasks: every
/// clone points at the same immutable connection context (headers, base
/// URL, default account) and the same `reqwest` connection pool. Each
/// service method issues exactly one request; nothing is retried.
///
/// # Example
///
/// ```no_run
/// use tradier_rs::{TradierClient, Environment};
///
/// # async fn example() -> tradier_rs::Result<()> {
/// let client = TradierClient::new("your-access-token", Environment::Sandbox)?;
///
/// let profile = client.account().profile().await?;
/// for account in &profile.account {
///     let balances = client.account().balances(Some(&account.account_number())).await?;
///     println!("{}: {}", account.account_number, balances.total_equity);
/// }
///
/// let quotes = client.market().quotes(&["AAPL", "MSFT"], false).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct TradierClient {
    pub(crate) inner: Arc<ClientInner>,
}

pub(crate) struct ClientInner {
    pub(crate) http: reqwest::Client,
    pub(crate) base_url: Url,
    pub(crate) config: ClientConfig,
}

impl TradierClient {
    /// Create a client for `environment` with default settings.
    pub fn new(token: impl Into<String>, environment: Environment) -> Result<Self> {
        Self::with_config(token, ClientConfig::default().with_environment(environment))
    }

    /// Create a client with custom configuration.
    ///
    /// Fails with [`Error::Config`] if the token is empty or not a valid
    /// header value, or if the base URL does not parse.
    pub fn with_config(token: impl Into<String>, config: ClientConfig) -> Result<Self> {
        let token = SecretString::from(token.into());
        if token.expose_secret().trim().is_empty() {
            return Err(Error::Config("Access token is empty".to_string()));
        }

        let mut auth = HeaderValue::from_str(&format!("Bearer {}", token.expose_secret()))
            .map_err(|_| Error::Config("Invalid token format".to_string()))?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let base_url = Url::parse(config.base_url())
            .map_err(|e| Error::Config(format!("Invalid base URL {}: {e}", config.base_url())))?;

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .default_headers(headers)
            .build()?;

        debug!(base_url = %base_url, "Created Tradier client");

        Ok(Self {
            inner: Arc::new(ClientInner {
                http,
                base_url,
                config,
            }),
        })
    }

    /// Create a client from `TRADIER_TOKEN`, `TRADIER_ACCOUNT_ID` and
    /// `TRADIER_BASE_URL`.
    ///
    /// Only the token is required. Without a base URL the sandbox is used.
    pub fn from_env() -> Result<Self> {
        let token = std::env::var(TOKEN_ENV)
            .map_err(|_| Error::Config(format!("{TOKEN_ENV} is not set")))?;

        let mut config = ClientConfig::default();
        if let Ok(account) = std::env::var(ACCOUNT_ENV) {
            if !account.is_empty() {
                config = config.with_default_account(account);
            }
        }
        if let Ok(base_url) = std::env::var(BASE_URL_ENV) {
            if !base_url.is_empty() {
                config = config.with_base_url(base_url);
            }
        }

        Self::with_config(token, config)
    }

    /// Get the account data service.
    pub fn account(&self) -> AccountService {
        AccountService::new(self.inner.clone())
    }

    /// Get the market data service.
    pub fn market(&self) -> MarketService {
        MarketService::new(self.inner.clone())
    }

    /// Get the trading service.
    pub fn trading(&self) -> TradingService {
        TradingService::new(self.inner.clone())
    }

    /// The account used when an account-scoped call omits one.
    pub fn default_account(&self) -> Option<&AccountNumber> {
        self.inner.config.default_account.as_ref()
    }

    /// The base URL requests are resolved against.
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// The configuration this client was built with.
    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }
}

impl ClientInner {
    /// Resolve an optional account number against the configured default.
    pub(crate) fn resolve_account(&self, account: Option<&AccountNumber>) -> Result<AccountNumber> {
        account
            .or(self.config.default_account.as_ref())
            .cloned()
            .ok_or(Error::MissingAccount)
    }

    /// Issue one request and decode the JSON body.
    ///
    /// `path` is joined onto the base URL, so an absolute path replaces the
    /// base's path. GET and DELETE send `params` as the query string, POST
    /// and PUT as a form body. Any non-2xx status becomes [`Error::Api`].
    pub(crate) async fn execute(&self, method: Method, path: &str, params: &Params) -> Result<Value> {
        let url = self.base_url.join(path)?;

        debug!(
            method = %method,
            path,
            params = ?params.names().collect::<Vec<_>>(),
            "Sending request"
        );

        let request = self.http.request(method.clone(), url);
        let request = if method == Method::GET || method == Method::DELETE {
            request.query(params.as_slice())
        } else {
            request.form(params.as_slice())
        };

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        debug!(method = %method, path, status = status.as_u16(), "Received response");

        if !status.is_success() {
            return Err(Error::Api {
                status: status.as_u16(),
                body,
            });
        }

        trace!(path, bytes = body.len(), "Decoding response body");
        Ok(serde_json::from_str(&body)?)
    }

    /// Make a GET request.
    pub(crate) async fn get(&self, path: &str, params: &Params) -> Result<Value> {
        self.execute(Method::GET, path, params).await
    }

    /// Make a POST request.
    pub(crate) async fn post(&self, path: &str, params: &Params) -> Result<Value> {
        self.execute(Method::POST, path, params).await
    }

    /// Make a PUT request.
    pub(crate) async fn put(&self, path: &str, params: &Params) -> Result<Value> {
        self.execute(Method::PUT, path, params).await
    }

    /// Make a DELETE request.
    pub(crate) async fn delete(&self, path: &str, params: &Params) -> Result<Value> {
        self.execute(Method::DELETE, path, params).await
    }
}

impl std::fmt::Debug for TradierClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TradierClient")
            .field("base_url", &self.inner.base_url.as_str())
            .field("config", &self.inner.config)
            .finish()
    }
}
