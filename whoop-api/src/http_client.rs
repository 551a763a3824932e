//! HttpClient middleware used by WhoopClient
//!
//! Responsible for
//!  - building requests against the versioned base url
//!  - rate limit pre-check and tracking
//!  - mapping http status codes into `WhoopError`s
//!  - json decoding
//!  - logging/tracing and metrics

use std::{
    fmt,
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
};

use bytes::Bytes;
use reqwest::{
    Method, StatusCode,
    header::{ACCEPT, CONTENT_TYPE, HeaderValue},
};
use serde::{Serialize, de::DeserializeOwned};
use snafu::prelude::*;
use tracing::{debug, trace};
use url::Url;

use crate::{
    Result,
    error::{HttpSnafu, InvalidUrlSnafu, SerializationSnafu, WhoopError},
    paged::{PagedResult, Record},
    params::{RequestParams, encode_path},
    rate_limit::{Clock, Rate, RateLimiter},
};

const JSON_CONTENT_TYPE: &str = "application/json";

/// HTTP metrics tracked using atomic counters for thread-safe access.
/// These counters are cumulative and never reset during the client's lifetime.
#[derive(Debug, Default)]
pub struct HttpMetrics {
    /// Total number of HTTP requests sent to the server
    total_requests: AtomicU64,
    /// Total number of successful responses (2xx status codes)
    successful_responses: AtomicU64,
    /// Total number of error responses (non-2xx status codes, excluding 429)
    errors: AtomicU64,
    /// Total number of 429 responses
    rate_limit_errors: AtomicU64,
    /// Calls refused locally because the rate limit was spent
    rate_limit_refusals: AtomicU64,
    /// Total bytes received in response bodies
    bytes_received: AtomicU64,
}

impl HttpMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of current metrics as plain u64 values
    pub fn snapshot(&self) -> HttpMetricsSnapshot {
        HttpMetricsSnapshot {
            total_requests: self.total_requests.load(Ordering::Relaxed),
            successful_responses: self.successful_responses.load(Ordering::Relaxed),
            errors: self.errors.load(Ordering::Relaxed),
            rate_limit_errors: self.rate_limit_errors.load(Ordering::Relaxed),
            rate_limit_refusals: self.rate_limit_refusals.load(Ordering::Relaxed),
            bytes_received: self.bytes_received.load(Ordering::Relaxed),
        }
    }

    fn increment_requests(&self) {
        self.total_requests.fetch_add(1, Ordering::Relaxed);
    }

    fn increment_success(&self) {
        self.successful_responses.fetch_add(1, Ordering::Relaxed);
    }

    fn increment_errors(&self) {
        self.errors.fetch_add(1, Ordering::Relaxed);
    }

    fn increment_rate_limit_errors(&self) {
        self.rate_limit_errors.fetch_add(1, Ordering::Relaxed);
    }

    fn increment_rate_limit_refusals(&self) {
        self.rate_limit_refusals.fetch_add(1, Ordering::Relaxed);
    }

    fn add_bytes_received(&self, bytes: u64) {
        self.bytes_received.fetch_add(bytes, Ordering::Relaxed);
    }
}

/// A point-in-time snapshot of HTTP metrics with plain u64 values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HttpMetricsSnapshot {
    /// Total number of HTTP requests sent to the server
    pub total_requests: u64,
    /// Total number of successful responses (2xx status codes)
    pub successful_responses: u64,
    /// Total number of error responses (non-2xx status codes, excluding 429)
    pub errors: u64,
    /// Total number of 429 responses
    pub rate_limit_errors: u64,
    /// Calls refused locally, without a request, because the rate limit was spent
    pub rate_limit_refusals: u64,
    /// Total bytes received in response bodies
    pub bytes_received: u64,
}

impl fmt::Display for HttpMetricsSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "requests={} success={} errors={} rate_limit={} refused={} recv={}",
            self.total_requests,
            self.successful_responses,
            self.errors,
            self.rate_limit_errors,
            self.rate_limit_refusals,
            format_bytes(self.bytes_received),
        )
    }
}

fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{bytes}B")
    } else if bytes < 1024 * 1024 {
        format!("{:.1}KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1}MB", bytes as f64 / (1024.0 * 1024.0))
    }
}

pub(crate) struct HttpClient {
    pub client: reqwest::Client,

    /// Base URL for API requests, with trailing slash (e.g., "https://api.prod.whoop.com/developer/")
    base_url: Url,

    /// Version path segment placed between base url and resource path (e.g., "v1")
    api_version: String,

    limiter: RateLimiter,

    clock: Arc<dyn Clock>,

    /// HTTP request/response metrics
    pub metrics: HttpMetrics,
}

impl fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpClient")
            .field("base_url", &self.base_url.as_str())
            .field("api_version", &self.api_version)
            .field("rate", &self.limiter.snapshot())
            .field("clock", &self.clock)
            .finish()
    }
}

impl HttpClient {
    pub fn new(
        client: reqwest::Client,
        base_url: &str,
        api_version: &str,
        clock: Arc<dyn Clock>,
    ) -> Result<Self> {
        // Url::join replaces the last segment unless the base ends with '/'
        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };
        let base_url = Url::parse(&normalized).context(InvalidUrlSnafu { url: base_url })?;
        Ok(HttpClient {
            client,
            base_url,
            api_version: api_version.trim_matches('/').to_string(),
            limiter: RateLimiter::new(),
            clock,
            metrics: HttpMetrics::new(),
        })
    }

    /// Returns a snapshot of current HTTP metrics
    pub fn metrics_snapshot(&self) -> HttpMetricsSnapshot {
        self.metrics.snapshot()
    }

    /// Returns the last known rate limit
    pub fn rate_limit(&self) -> Rate {
        self.limiter.snapshot()
    }

    pub fn limiter(&self) -> &RateLimiter {
        &self.limiter
    }

    /// Resolves an api path, e.g. "/cycle/1", to an absolute url under the version segment.
    /// `path` may include a query string.
    pub fn url_for(&self, path: &str) -> Result<Url> {
        // relative to the base url; a leading '/' would drop the base path
        let path = path.trim_start_matches('/');
        let relative = if self.api_version.is_empty() {
            path.to_string()
        } else {
            format!("{}/{path}", self.api_version)
        };
        self.base_url
            .join(&relative)
            .context(InvalidUrlSnafu { url: relative })
    }

    /// Builds a request for `path`. A body, if provided, is sent as json.
    pub fn build_request<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<reqwest::Request> {
        let url = self.url_for(path)?;
        let mut request = reqwest::Request::new(method, url);
        request
            .headers_mut()
            .insert(ACCEPT, HeaderValue::from_static(JSON_CONTENT_TYPE));
        if let Some(body) = body {
            let data = serde_json::to_vec(body).context(SerializationSnafu)?;
            request
                .headers_mut()
                .insert(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));
            *request.body_mut() = Some(data.into());
        }
        Ok(request)
    }

    /// Makes a GET request and decodes the json response.
    pub async fn get_request<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let request = self.build_request::<()>(Method::GET, path, None)?;
        self.send(request).await
    }

    /// Makes a GET request for a single record and fills in client-side fields.
    pub async fn get_record<T: Record>(&self, path: &str) -> Result<T> {
        let mut record: T = self.get_request(path).await?;
        record.resolve();
        Ok(record)
    }

    /// This function handles all whoop rest api requests
    /// - refuses the call locally if the last known rate limit is spent
    /// - records rate limit headers from every response, success or failure
    /// - maps http error codes into `WhoopError`s
    /// - deserializes json response body into return type T
    pub async fn send<T: DeserializeOwned>(&self, request: reqwest::Request) -> Result<T> {
        let method = request.method().to_string();
        let url = request.url().to_string();

        let reservation = match self.limiter.acquire(self.clock.now(), &method, &url) {
            Ok(reservation) => reservation,
            Err(e) => {
                self.metrics.increment_rate_limit_refusals();
                return Err(e);
            }
        };

        log_request(&request);
        self.metrics.increment_requests();

        let response = match self.client.execute(request).await {
            Ok(response) => response,
            Err(source) => {
                // no response, so no headers to replace the provisional count
                self.limiter.release(reservation);
                return Err(source).context(HttpSnafu {
                    method: &method,
                    url: &url,
                });
            }
        };

        let status = response.status();
        let rate = self.limiter.update(response.headers(), self.clock.now());
        debug!(%method, %url, %status, remaining = rate.remaining, "response");

        let body = response.bytes().await;
        match check_response(status, rate, body, &method, &url) {
            Ok(body) => {
                self.metrics.increment_success();
                self.metrics.add_bytes_received(body.len() as u64);
                log_response(&url, &body);
                // deserialization failure is returned to the caller as-is
                deserialize_json(&body)
            }
            Err(e) => {
                if e.is_rate_limited() {
                    self.metrics.increment_rate_limit_errors();
                } else {
                    self.metrics.increment_errors();
                }
                Err(e)
            }
        }
    }
}

/// Classifies a completed response.
///
/// - 2xx: returns the body
/// - 429: `RateLimitExceeded` with the rate limit parsed from the response headers
/// - anything else: `ApiError` with the body text as message. If the body could not be read,
///   the error is reported as a 500 with a placeholder message.
fn check_response(
    status: StatusCode,
    rate: Rate,
    body: reqwest::Result<Bytes>,
    method: &str,
    url: &str,
) -> Result<Bytes> {
    if status.is_success() {
        return body.context(HttpSnafu { method, url });
    }
    if status == StatusCode::TOO_MANY_REQUESTS {
        return Err(WhoopError::RateLimitExceeded {
            rate,
            method: method.to_string(),
            url: url.to_string(),
            message: rate.message(),
        });
    }
    let err = match body {
        Ok(body) => WhoopError::ApiError {
            code: status.as_u16(),
            method: method.to_string(),
            url: url.to_string(),
            message: String::from_utf8_lossy(&body).into_owned(),
        },
        Err(_) => WhoopError::ApiError {
            code: StatusCode::INTERNAL_SERVER_ERROR.as_u16(),
            method: method.to_string(),
            url: url.to_string(),
            message: "could not decode error".to_string(),
        },
    };
    debug!(%status, error = %err, "http");
    Err(err)
}

/// Pagination support for list endpoints.
// The purpose of this trait is to define methods for Arc<HttpClient>
pub(crate) trait GetPaged {
    async fn get_request_paged<T: Record>(
        &self,
        base_path: &str,
        params: Option<&RequestParams>,
    ) -> Result<PagedResult<T>>;
}

impl GetPaged for Arc<HttpClient> {
    /// Makes a GET request for one page of records, returning a `PagedResult` that can fetch
    /// the following pages.
    async fn get_request_paged<T: Record>(
        &self,
        base_path: &str,
        params: Option<&RequestParams>,
    ) -> Result<PagedResult<T>> {
        let path = encode_path(base_path, params)?;
        let mut page: crate::paged::Page<T> = self.get_request(&path).await?;
        page.records.iter_mut().for_each(Record::resolve);
        Ok(PagedResult::new(
            page,
            self.clone(),
            base_path,
            params.cloned().unwrap_or_default(),
        ))
    }
}

// dump request
// requires RUST_LOG=whoop::http_json=trace
fn log_request(request: &reqwest::Request) {
    if tracing::enabled!(target: "whoop::http_json", tracing::Level::TRACE) {
        // don't log headers so we don't leak the access token
        trace!(target: "whoop::http_json", "{} url={}", request.method(), request.url());
    }
}

// dump json response, for debugging
fn log_response(url: &str, body: &Bytes) {
    if tracing::enabled!(target: "whoop::http_json", tracing::Level::TRACE) {
        trace!(target: "whoop::http_json", "Response url={url} body={}",
            String::from_utf8_lossy(body)
        );
    }
}

// deserialize, reporting errors with 'serde_path_to_error', which provides
// detailed json path to the error
fn deserialize_json<T: DeserializeOwned>(body: &[u8]) -> Result<T> {
    let mut deserializer = serde_json::Deserializer::from_slice(body);
    match serde_path_to_error::deserialize(&mut deserializer) {
        Ok(value) => Ok(value),
        Err(err) => {
            debug!("Deserialization failed at {}: {}", err.path(), err);
            Err(WhoopError::Deserialization {
                source: err.into_inner(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::*;
    use crate::{WHOOP_API_VERSION, WHOOP_BASE_URL, rate_limit::SystemClock};

    fn test_client(base_url: &str) -> HttpClient {
        HttpClient::new(
            reqwest::Client::new(),
            base_url,
            WHOOP_API_VERSION,
            Arc::new(SystemClock),
        )
        .expect("client")
    }

    #[test]
    fn test_build_request() {
        let client = test_client(WHOOP_BASE_URL);
        let req = client
            .build_request::<()>(Method::GET, "/test", None)
            .unwrap();
        assert_eq!(
            req.url().as_str(),
            "https://api.prod.whoop.com/developer/v1/test"
        );
        assert!(req.body().is_none());
        assert_eq!(req.headers().get(ACCEPT).unwrap(), "application/json");
        assert!(req.headers().get(CONTENT_TYPE).is_none());
    }

    #[test]
    fn test_build_request_with_body() {
        #[derive(Serialize)]
        struct Body {
            name: &'static str,
        }
        let client = test_client(WHOOP_BASE_URL);
        let req = client
            .build_request(Method::POST, "/test", Some(&Body { name: "x" }))
            .unwrap();
        assert_eq!(req.headers().get(CONTENT_TYPE).unwrap(), "application/json");
        let body = req.body().and_then(|b| b.as_bytes()).unwrap();
        assert_eq!(body, br#"{"name":"x"}"#);
    }

    #[test]
    fn test_build_request_keeps_query() {
        let client = test_client("http://127.0.0.1:9999/base");
        let req = client
            .build_request::<()>(Method::GET, "/cycle?limit=5", None)
            .unwrap();
        assert_eq!(req.url().as_str(), "http://127.0.0.1:9999/base/v1/cycle?limit=5");
    }

    #[test]
    fn test_empty_api_version_keeps_base_path() {
        let client = HttpClient::new(
            reqwest::Client::new(),
            WHOOP_BASE_URL,
            "",
            Arc::new(SystemClock),
        )
        .expect("client");
        let url = client.url_for("/cycle/1").unwrap();
        assert_eq!(url.as_str(), "https://api.prod.whoop.com/developer/cycle/1");

        let client = HttpClient::new(
            reqwest::Client::new(),
            WHOOP_BASE_URL,
            "/v2/",
            Arc::new(SystemClock),
        )
        .expect("client");
        let url = client.url_for("/cycle?limit=5").unwrap();
        assert_eq!(url.as_str(), "https://api.prod.whoop.com/developer/v2/cycle?limit=5");
    }

    #[test]
    fn test_invalid_base_url() {
        let err = HttpClient::new(
            reqwest::Client::new(),
            "not a url",
            WHOOP_API_VERSION,
            Arc::new(SystemClock),
        )
        .expect_err("invalid");
        assert!(matches!(err, WhoopError::InvalidUrl { .. }), "{err:?}");
    }

    #[test]
    fn test_check_response() {
        let cases = [
            (200, "", None),
            (204, "", None),
            (100, "test error", Some(100)),
            (300, "test error", Some(300)),
            (400, "test error", Some(400)),
            (500, "test error", Some(500)),
        ];
        for (code, body, want) in cases {
            let status = StatusCode::from_u16(code).unwrap();
            let got = check_response(
                status,
                Rate::default(),
                Ok(Bytes::from_static(body.as_bytes())),
                "GET",
                "/test",
            );
            match (got, want) {
                (Ok(_), None) => {}
                (Err(WhoopError::ApiError { code, message, .. }), Some(want)) => {
                    assert_eq!(code, want);
                    assert_eq!(message, "test error");
                }
                (other, _) => panic!("status {code}: unexpected {other:?}"),
            }
        }
    }

    #[test]
    fn test_check_response_too_many_requests() {
        let rate = Rate {
            remaining: 0,
            reset: None,
        };
        let got = check_response(
            StatusCode::TOO_MANY_REQUESTS,
            rate,
            Ok(Bytes::from_static(b"too many requests error")),
            "GET",
            "/test",
        );
        assert!(
            matches!(&got, Err(WhoopError::RateLimitExceeded { rate: r, .. }) if *r == rate),
            "{got:?}"
        );
    }

    #[test]
    fn test_deserialize_json_error() {
        #[derive(Debug, Deserialize)]
        #[allow(dead_code)]
        struct Data {
            id: i64,
        }
        let err = deserialize_json::<Data>(br#"{"id":"one"}"#).expect_err("type mismatch");
        assert!(matches!(err, WhoopError::Deserialization { .. }));
    }

    #[test]
    fn test_metrics_display() {
        let snapshot = HttpMetricsSnapshot {
            total_requests: 3,
            successful_responses: 2,
            errors: 1,
            rate_limit_errors: 0,
            rate_limit_refusals: 4,
            bytes_received: 2048,
        };
        assert_eq!(
            snapshot.to_string(),
            "requests=3 success=2 errors=1 rate_limit=0 refused=4 recv=2.0KB"
        );
    }
}
