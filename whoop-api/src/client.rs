//! WHOOP Rust API Client
//!
//! # Creating new api client
//!
//! - [with_access_token](WhoopClient::with_access_token) - client sending a bearer token
//! - [with_http_client](WhoopClient::with_http_client) - client using an already-authenticated `reqwest::Client`
//! - [with_client](WhoopClient::with_client) - client built from a customized `reqwest::ClientBuilder`
//!
//! # Configuration
//!
//! - [get_config](WhoopClient::get_config) - returns configuration
//! - [api_version](WhoopClient::api_version) - returns the api version path segment
//! - [rate_limit](WhoopClient::rate_limit) - last known rate limit
//! - [http_metrics](WhoopClient::http_metrics) - request counters
//!
//! # Services
//!
//! - [cycles](WhoopClient::cycles), [recovery](WhoopClient::recovery),
//!   [sleep](WhoopClient::sleep), [workouts](WhoopClient::workouts), [user](WhoopClient::user)
//!

use std::sync::Arc;

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use snafu::prelude::*;
use tracing::debug;
use zeroize::Zeroizing;

use crate::{
    Result, WHOOP_API_VERSION, WHOOP_BASE_URL,
    config::WHOOP_URL_ENV,
    error::{HttpSnafu, WhoopError},
    http_client::{HttpClient, HttpMetricsSnapshot},
    rate_limit::{Clock, Rate, SystemClock},
};

/// Configuration for the WHOOP client. Defines endpoint url, api version, and time source.
///
/// ```rust
/// use whoop::prelude::*;
/// let config = ClientConfig::default().base_url("http://127.0.0.1:8080/developer/");
/// assert_eq!(config.api_version, "v1");
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base url for all WHOOP HTTP/REST api requests.
    /// If not provided in config, url is determined by:
    /// * The environment variable `WHOOP_URL`, if defined, or
    /// * "<https://api.prod.whoop.com/developer/>" `whoop::WHOOP_BASE_URL`
    pub base_url: String,

    /// Version segment appended to the base url, "v1" by default.
    pub api_version: String,

    /// Time source used for rate limit bookkeeping.
    pub clock: Arc<dyn Clock>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            base_url: std::env::var(WHOOP_URL_ENV).unwrap_or(WHOOP_BASE_URL.to_string()),
            api_version: WHOOP_API_VERSION.to_string(),
            clock: Arc::new(SystemClock),
        }
    }
}

impl ClientConfig {
    /// Sets the base url.
    pub fn base_url(self, base_url: impl Into<String>) -> Self {
        ClientConfig {
            base_url: base_url.into(),
            ..self
        }
    }

    /// Sets the api version segment.
    pub fn api_version(self, api_version: impl Into<String>) -> Self {
        ClientConfig {
            api_version: api_version.into(),
            ..self
        }
    }

    /// Replaces the time source.
    pub fn clock(self, clock: Arc<dyn Clock>) -> Self {
        ClientConfig { clock, ..self }
    }
}

/// A typed WHOOP API client.
///
/// Cloning is cheap; clones share the same connection pool and rate limit state.
#[derive(Clone)]
pub struct WhoopClient {
    pub(crate) client: Arc<HttpClient>,
    pub(crate) config: ClientConfig,
}

impl std::fmt::Debug for WhoopClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WhoopClient")
            .field("config", &self.config)
            .field("rate", &self.client.rate_limit())
            .finish()
    }
}

impl WhoopClient {
    /// Creates a client that sends `access_token` as a bearer token on every request.
    /// Obtaining and refreshing the token is up to the caller.
    ///
    /// # Example
    /// ```rust,no_run
    /// use whoop::prelude::*;
    /// # fn create_client() -> Result<WhoopClient, WhoopError> {
    /// let token = std::env::var("WHOOP_ACCESS_TOKEN").unwrap_or_default();
    /// let client = WhoopClient::with_access_token(token, ClientConfig::default())?;
    /// # Ok(client)
    /// # }
    /// ```
    pub fn with_access_token(
        access_token: impl Into<String>,
        config: ClientConfig,
    ) -> Result<Self> {
        let token = Zeroizing::new(access_token.into());
        let bearer = Zeroizing::new(format!("Bearer {}", token.as_str()));
        let mut value = HeaderValue::from_str(&bearer).map_err(|_| WhoopError::Other {
            message: "access token contains characters not allowed in a header".to_string(),
        })?;
        value.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, value);
        Self::with_client(reqwest::Client::builder().default_headers(headers), config)
    }

    /// Creates a client from a `reqwest::ClientBuilder` and configuration.
    /// ClientBuilder can be customized with timeouts, proxies, default headers, user_agent, etc.
    ///
    /// # Example
    /// ```rust,no_run
    /// use whoop::prelude::*;
    /// # fn create_client() -> Result<WhoopClient, WhoopError> {
    /// let builder = reqwest::Client::builder().timeout(std::time::Duration::from_secs(10));
    /// let client = WhoopClient::with_client(builder, ClientConfig::default())?;
    /// # Ok(client)
    /// # }
    /// ```
    pub fn with_client(builder: reqwest::ClientBuilder, config: ClientConfig) -> Result<Self> {
        let client = builder.build().context(HttpSnafu {
            method: "client-init",
            url: "",
        })?;
        Self::with_http_client(client, config)
    }

    /// Creates a client that sends requests through `client`.
    /// The client is expected to take care of authentication, for example with default headers.
    pub fn with_http_client(client: reqwest::Client, config: ClientConfig) -> Result<Self> {
        debug!(url=?config.base_url, version=%config.api_version, "new client");
        let client = HttpClient::new(
            client,
            &config.base_url,
            &config.api_version,
            config.clock.clone(),
        )?;
        Ok(Self {
            client: Arc::new(client),
            config,
        })
    }

    /// Returns the configuration.
    pub fn get_config(&self) -> &ClientConfig {
        &self.config
    }

    /// Returns the api version segment, for example: "v1".
    pub fn api_version(&self) -> &str {
        &self.config.api_version
    }

    /// Returns the rate limit reported by the most recent response.
    ///
    /// Before the first response this is `Rate::default()` (nothing known, nothing blocked).
    pub fn rate_limit(&self) -> Rate {
        self.client.rate_limit()
    }

    /// Returns a snapshot of current HTTP metrics.
    ///
    /// - `total_requests`: Number of HTTP requests sent
    /// - `successful_responses`: Number of successful (2xx) responses
    /// - `errors`: Number of error responses (excluding rate limit errors)
    /// - `rate_limit_errors`: Number of 429 responses received
    /// - `rate_limit_refusals`: Number of calls refused locally because the limit was spent
    /// - `bytes_received`: Total bytes received in response bodies
    pub fn http_metrics(&self) -> HttpMetricsSnapshot {
        self.client.metrics_snapshot()
    }
}

impl WhoopClient {
    // accessor to support rate limit tests
    #[doc(hidden)]
    pub fn set_rate_limit(&self, rate: Rate) {
        self.client.limiter().set(rate);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder() {
        let config = ClientConfig::default()
            .base_url("http://localhost:1234/")
            .api_version("v2");
        assert_eq!(config.base_url, "http://localhost:1234/");
        assert_eq!(config.api_version, "v2");
    }

    #[test]
    fn test_new_clients_have_separate_rate_state() {
        let config = ClientConfig::default().base_url(WHOOP_BASE_URL);
        let first = WhoopClient::with_http_client(reqwest::Client::new(), config.clone()).unwrap();
        let second = WhoopClient::with_http_client(reqwest::Client::new(), config).unwrap();

        first.set_rate_limit(Rate {
            remaining: 7,
            reset: None,
        });
        assert_eq!(first.rate_limit().remaining, 7);
        assert_eq!(second.rate_limit(), Rate::default());

        // clones share state
        let clone = first.clone();
        assert_eq!(clone.rate_limit().remaining, 7);
    }

    #[test]
    fn test_bad_access_token() {
        let err = WhoopClient::with_access_token("bad\ntoken", ClientConfig::default())
            .expect_err("newline not allowed");
        assert!(matches!(err, WhoopError::Other { .. }), "{err:?}");
    }
}
