//! Client-side rate limit tracking.
//!
//! WHOOP reports the caller's remaining quota on every response:
//!
//! - `X-RateLimit-Remaining`: requests left in the current window
//! - `X-RateLimit-Reset`: seconds until the window resets
//!
//! [`RateLimiter`] keeps the most recent values as a [`Rate`] snapshot. Each client owns its
//! own limiter, so two clients in one process never share quota state. Before a request is
//! sent the limiter is consulted; if no requests remain and the reset time is still ahead,
//! the call fails with [`WhoopError::RateLimitExceeded`](crate::error::WhoopError) and no
//! network request is made.
//!
//! Time comes from a [`Clock`], so tests can pin "now" instead of waiting for real time.

use std::fmt;

use chrono::{DateTime, TimeDelta, Utc};
use parking_lot::Mutex;
use reqwest::header::HeaderMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    Result,
    config::{HEADER_RATE_REMAINING, HEADER_RATE_RESET, RATE_RESET_FORMAT},
    error::WhoopError,
};

/// Source of the current time.
pub trait Clock: fmt::Debug + Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Rate limit state, as reported by the most recent API response.
///
/// The default value (`remaining: 0, reset: None`) means nothing is known yet,
/// and does not block requests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rate {
    /// The number of requests the client can still make in the current window.
    pub remaining: i64,

    /// The time at which the current window resets.
    pub reset: Option<DateTime<Utc>>,
}

impl Rate {
    /// Parses the rate limit headers of a response.
    /// Missing or unparsable values fall back to `remaining: 0` and `reset: None`.
    pub fn from_headers(headers: &HeaderMap, now: DateTime<Utc>) -> Self {
        let remaining = header_i64(headers, HEADER_RATE_REMAINING).unwrap_or(0);
        let reset = header_i64(headers, HEADER_RATE_RESET)
            .and_then(TimeDelta::try_seconds)
            .and_then(|delta| now.checked_add_signed(delta));
        Rate { remaining, reset }
    }

    /// Returns true if no requests remain and the window has not reset yet.
    pub fn is_exhausted(&self, now: DateTime<Utc>) -> bool {
        matches!(self.reset, Some(reset) if self.remaining <= 0 && now < reset)
    }

    /// Human-readable explanation used in `RateLimitExceeded` errors.
    pub fn message(&self) -> String {
        match self.reset {
            Some(reset) => format!(
                "API rate limit has been reached or exceeded. Please try again after {}",
                reset.format(RATE_RESET_FORMAT)
            ),
            None => "API rate limit has been reached or exceeded. Please try again later".into(),
        }
    }
}

fn header_i64(headers: &HeaderMap, name: &str) -> Option<i64> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim().parse::<i64>().ok())
}

/// A request counted against the current window by [`RateLimiter::acquire`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub struct Reservation {
    // reset time of the window the request was taken from
    window: Option<DateTime<Utc>>,
}

/// Holds the last known [`Rate`] for one client.
#[derive(Debug, Default)]
pub struct RateLimiter {
    rate: Mutex<Rate>,
}

impl RateLimiter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the current rate limit state.
    pub fn snapshot(&self) -> Rate {
        *self.rate.lock()
    }

    /// Replaces the current state. Intended for tests and for restoring a known state.
    pub fn set(&self, rate: Rate) {
        *self.rate.lock() = rate;
    }

    /// Checks whether a request may be sent now.
    ///
    /// Fails with `RateLimitExceeded` when the quota is spent and the window is still open.
    /// While a window is open, a permitted call also decrements `remaining`, so concurrent
    /// callers sharing the client cannot all pass on the last remaining request.
    /// The next response's headers overwrite the provisional count. If no response arrives,
    /// hand the returned [`Reservation`] to [`release`](Self::release).
    pub fn acquire(&self, now: DateTime<Utc>, method: &str, url: &str) -> Result<Reservation> {
        let mut rate = self.rate.lock();
        if rate.is_exhausted(now) {
            debug!(remaining = rate.remaining, reset = ?rate.reset, "rate limit: refusing call locally");
            return Err(WhoopError::RateLimitExceeded {
                rate: *rate,
                method: method.to_string(),
                url: url.to_string(),
                message: rate.message(),
            });
        }
        match rate.reset {
            Some(reset) if now < reset => {
                rate.remaining = rate.remaining.saturating_sub(1).max(0);
                Ok(Reservation { window: Some(reset) })
            }
            _ => Ok(Reservation { window: None }),
        }
    }

    /// Returns a reserved request to the count, for calls that never got a response.
    ///
    /// Has no effect if a response has since replaced the window the reservation was taken from.
    pub fn release(&self, reservation: Reservation) {
        let Some(window) = reservation.window else {
            return;
        };
        let mut rate = self.rate.lock();
        if rate.reset == Some(window) {
            rate.remaining = rate.remaining.saturating_add(1);
        }
    }

    /// Records the rate limit headers of a completed response and returns the new state.
    pub fn update(&self, headers: &HeaderMap, now: DateTime<Utc>) -> Rate {
        let parsed = Rate::from_headers(headers, now);
        *self.rate.lock() = parsed;
        parsed
    }
}
