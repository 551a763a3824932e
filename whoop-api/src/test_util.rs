//! Test utilities
//!
//! Helper functions used to test the `whoop` library.
//! These are not part of the supported api and are subject to change.
//!
#![doc(hidden)]

use std::sync::Arc;

use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use parking_lot::Mutex;
use snafu::prelude::*;

use crate::prelude::{ClientConfig, Clock, WhoopClient, WhoopError};

// =============================================================================
// TestError
// =============================================================================

#[doc(hidden)]
pub type TestResult<T> = std::result::Result<T, TestError>;

#[doc(hidden)]
#[derive(Debug, Snafu)]
pub enum TestError {
    #[snafu(display("API error: {source}"))]
    Api { source: WhoopError },

    #[snafu(display("Test assertion failed: {message}"))]
    Assertion { message: String },
}

impl From<WhoopError> for TestError {
    fn from(source: WhoopError) -> Self {
        TestError::Api { source }
    }
}

// =============================================================================
// ManualClock
// =============================================================================

/// A clock that only moves when told to.
#[doc(hidden)]
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    /// Clock fixed at 2022-04-24T12:00:00Z
    pub fn fixed() -> Self {
        Self::new(fixed_time())
    }

    pub fn set(&self, now: DateTime<Utc>) {
        *self.now.lock() = now;
    }

    pub fn advance(&self, delta: TimeDelta) {
        let mut now = self.now.lock();
        *now += delta;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock()
    }
}

/// The time used by `ManualClock::fixed`
#[doc(hidden)]
pub fn fixed_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2022, 4, 24, 12, 0, 0)
        .single()
        .unwrap_or_default()
}

// =============================================================================
// Functions
// =============================================================================

/// Creates a client for a mock server. Requests are not authenticated.
#[doc(hidden)]
pub fn mock_client(base_url: &str, clock: Arc<dyn Clock>) -> TestResult<WhoopClient> {
    let config = ClientConfig::default().base_url(base_url).clock(clock);
    Ok(WhoopClient::with_http_client(reqwest::Client::new(), config)?)
}
