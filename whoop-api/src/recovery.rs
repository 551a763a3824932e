//! # WHOOP Recovery
//!
//! A recovery score reflects how prepared the member's body is to take on strain.
//! Each recovery belongs to a cycle and the sleep that ended it.
//!
//! ## Recovery methods on WhoopClient
//!
//! - [recovery](WhoopClient::recovery) - returns the [`RecoveryService`]
//!
//! ```rust,no_run
//! use whoop::prelude::*;
//!
//! # async fn example(client: &WhoopClient) -> Result<(), WhoopError> {
//! let latest = client.recovery().list_all(Some(&RequestParams::new().limit(1))).await?;
//! let for_cycle = client.recovery().get_for_cycle(93845).await?;
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    Result,
    client::WhoopClient,
    cycles::CYCLE_PATH,
    http_client::{GetPaged, HttpClient},
    paged::{PagedResult, Record},
    params::RequestParams,
    score::ScoreState,
};

const RECOVERY_PATH: &str = "/recovery";

/// A member's recovery score for a physiological cycle.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct Recovery {
    /// The cycle this recovery belongs to
    pub cycle_id: i64,

    /// The sleep that produced this recovery
    pub sleep_id: i64,

    /// The WHOOP user for the recovery
    pub user_id: i64,

    /// The time the recovery was recorded in WHOOP
    pub created_at: Option<DateTime<Utc>>,

    /// The time the recovery was last updated in WHOOP
    pub updated_at: Option<DateTime<Utc>>,

    pub score_state: Option<ScoreState>,

    /// Only present if the score state is `Scored`
    pub score: Option<RecoveryScore>,
}

impl Record for Recovery {}

/// WHOOP's measurements and evaluation of a recovery.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct RecoveryScore {
    /// True while WHOOP does not yet have enough data to calibrate the user
    pub user_calibrating: bool,

    /// Recovery percentage, 0-100
    pub recovery_score: f64,

    pub resting_heart_rate: f64,

    /// Heart rate variability (RMSSD), in milliseconds
    pub hrv_rmssd_milli: f64,

    /// Blood oxygen percentage. Only reported by 4.0 hardware or newer.
    pub spo2_percentage: Option<f64>,

    /// Skin temperature in Celsius. Only reported by 4.0 hardware or newer.
    pub skin_temp_celsius: Option<f64>,
}

/// Recovery endpoints.
///
/// Obtained via [`WhoopClient::recovery`].
#[derive(Debug, Clone)]
pub struct RecoveryService {
    client: Arc<HttpClient>,
}

impl RecoveryService {
    pub(crate) fn new(client: Arc<HttpClient>) -> Self {
        Self { client }
    }

    /// Gets the recovery for a cycle.
    pub async fn get_for_cycle(&self, cycle_id: i64) -> Result<Recovery> {
        self.client
            .get_record(&format!("{CYCLE_PATH}/{cycle_id}{RECOVERY_PATH}"))
            .await
    }

    /// Lists recoveries for the authenticated user.
    /// Results are paginated and sorted by start time in descending order.
    pub async fn list_all(
        &self,
        params: Option<&RequestParams>,
    ) -> Result<PagedResult<Recovery>> {
        self.client.get_request_paged(RECOVERY_PATH, params).await
    }
}

impl WhoopClient {
    /// Returns the service for recovery endpoints.
    pub fn recovery(&self) -> RecoveryService {
        RecoveryService::new(self.client.clone())
    }
}
