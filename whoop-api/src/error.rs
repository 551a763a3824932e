//! Errors returned by `WhoopClient`
//!
use snafu::prelude::*;

use crate::rate_limit::Rate;

/// Errors returned by whoop crate
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum WhoopError {
    /// The base url, or a path joined onto it, is not a valid url.
    #[snafu(display("Invalid url {url}: {source}"))]
    InvalidUrl {
        url: String,
        source: url::ParseError,
    },

    // Http connection or timeout error
    #[snafu(display("HTTP error {method} url:{url}"))]
    Http {
        method: String,
        url: String,
        source: reqwest::Error,
    },

    /// WHOOP server responded with a non-2xx status other than 429.
    /// `message` is the raw response body.
    #[snafu(display("{code} error. {method} {url}: {message}"))]
    ApiError {
        code: u16,
        method: String,
        url: String,
        message: String,
    },

    /// The rate limit has been reached or exceeded.
    ///
    /// Returned either for a 429 response from the server, or without any network call
    /// when the last known rate limit says no requests remain before `rate.reset`.
    /// The client never retries; the caller decides when to try again.
    #[snafu(display("{method} {url}: 429 {message}"))]
    RateLimitExceeded {
        rate: Rate,
        method: String,
        url: String,
        message: String,
    },

    /// Deserialization error. The response body did not match the expected json shape.
    #[snafu(display("Deserialization: {source}"))]
    Deserialization { source: serde_json::Error },

    /// Serialization error. Request body could not be encoded as json.
    #[snafu(display("Serialization: {source}"))]
    Serialization { source: serde_json::Error },

    /// Some other error occurred
    #[snafu(display("{message}"))]
    Other { message: String },
}

impl WhoopError {
    /// Returns the http status associated with this error, if any.
    /// Locally refused calls report 429, the same as a server rate limit response.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::ApiError { code, .. } => Some(*code),
            Self::RateLimitExceeded { .. } => Some(429),
            Self::Http { source, .. } => source.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Returns true for rate limit errors, whether synthesized locally or from a 429.
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Self::RateLimitExceeded { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display() {
        let err = WhoopError::ApiError {
            code: 400,
            method: "GET".into(),
            url: "/v1/cycle".into(),
            message: "bad input".into(),
        };
        assert_eq!(err.to_string(), "400 error. GET /v1/cycle: bad input");
        assert_eq!(err.status(), Some(400));
        assert!(!err.is_rate_limited());
    }

    #[test]
    fn test_rate_limit_status() {
        let err = WhoopError::RateLimitExceeded {
            rate: Rate::default(),
            method: "GET".into(),
            url: "/v1/cycle".into(),
            message: "slow down".into(),
        };
        assert_eq!(err.status(), Some(429));
        assert!(err.is_rate_limited());
        assert_eq!(err.to_string(), "GET /v1/cycle: 429 slow down");
    }
}
