//! Query parameters for list endpoints.
//!
//! All collection endpoints accept the same four parameters:
//!
//! | key         | meaning                                        |
//! |-------------|------------------------------------------------|
//! | `start`     | only records starting after this time          |
//! | `end`       | only records starting before this time         |
//! | `nextToken` | cursor returned by the previous page           |
//! | `limit`     | max records per page (server caps it at 25)    |
//!
//! Unset fields are left out of the query string, and keys are always emitted in the
//! same (alphabetical) order so the resulting urls are deterministic.

use chrono::{DateTime, SecondsFormat, Utc};
use snafu::prelude::*;
use url::Url;

use crate::{Result, error::InvalidUrlSnafu};

// relative paths are resolved against this to reuse Url's parser
const PATH_PARSE_BASE: &str = "http://localhost/";

/// Filters and cursor for a list request.
///
/// ```rust
/// use chrono::{TimeZone, Utc};
/// use whoop::prelude::*;
///
/// let params = RequestParams::new()
///     .start(Utc.with_ymd_and_hms(2022, 1, 1, 0, 0, 0).unwrap())
///     .limit(10);
/// assert_eq!(
///     params.encode_path("/cycle").unwrap(),
///     "/cycle?limit=10&start=2022-01-01T00%3A00%3A00Z"
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestParams {
    /// Start time filter
    pub start: Option<DateTime<Utc>>,
    /// End time filter
    pub end: Option<DateTime<Utc>>,
    /// Token of the page to fetch
    pub next_token: Option<String>,
    /// Maximum number of records returned
    pub limit: Option<u32>,
}

impl RequestParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the start time filter.
    pub fn start(mut self, start: DateTime<Utc>) -> Self {
        self.start = Some(start);
        self
    }

    /// Sets the end time filter.
    pub fn end(mut self, end: DateTime<Utc>) -> Self {
        self.end = Some(end);
        self
    }

    /// Sets the pagination cursor.
    pub fn next_token(mut self, token: impl Into<String>) -> Self {
        self.next_token = Some(token.into());
        self
    }

    /// Sets the page size.
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Query pairs in the order they are sent: `end`, `limit`, `nextToken`, `start`.
    /// Empty tokens and a zero limit count as unset.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::with_capacity(4);
        if let Some(end) = self.end {
            pairs.push(("end", format_time(end)));
        }
        if let Some(limit) = self.limit.filter(|limit| *limit > 0) {
            pairs.push(("limit", limit.to_string()));
        }
        if let Some(token) = self.next_token.as_deref().filter(|token| !token.is_empty()) {
            pairs.push(("nextToken", token.to_string()));
        }
        if let Some(start) = self.start {
            pairs.push(("start", format_time(start)));
        }
        pairs
    }

    /// Returns true if no parameter would be sent.
    pub fn is_empty(&self) -> bool {
        self.query_pairs().is_empty()
    }

    /// Appends these parameters to `base_path` as a query string.
    pub fn encode_path(&self, base_path: &str) -> Result<String> {
        encode_path(base_path, Some(self))
    }
}

// RFC 3339, whole seconds, 'Z' suffix
fn format_time(time: DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Appends `params` to `base_path` as a url-encoded query string.
///
/// Returns `base_path` unchanged if `params` is `None` or has no fields set.
/// Any query already present on `base_path` is replaced.
pub fn encode_path(base_path: &str, params: Option<&RequestParams>) -> Result<String> {
    let Some(params) = params else {
        return Ok(base_path.to_string());
    };

    let mut url = Url::parse(PATH_PARSE_BASE)
        .and_then(|base| base.join(base_path))
        .context(InvalidUrlSnafu { url: base_path })?;

    let pairs = params.query_pairs();
    if pairs.is_empty() {
        return Ok(base_path.to_string());
    }
    url.query_pairs_mut().clear().extend_pairs(pairs);

    Ok(match url.query() {
        Some(query) => format!("{}?{query}", url.path()),
        None => url.path().to_string(),
    })
}
