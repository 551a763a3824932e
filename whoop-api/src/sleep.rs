//! # WHOOP Sleep
//!
//! ## Sleep methods on WhoopClient
//!
//! - [sleep](WhoopClient::sleep) - returns the [`SleepService`]

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    Result,
    client::WhoopClient,
    http_client::{GetPaged, HttpClient},
    paged::{PagedResult, Record},
    params::RequestParams,
    score::ScoreState,
};

const SLEEP_PATH: &str = "/activity/sleep";

/// A sleep activity (including naps).
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct Sleep {
    /// Unique identifier for the sleep activity
    pub id: i64,

    /// User who performed the sleep activity
    pub user_id: i64,

    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,

    /// Timezone offset when the sleep was recorded
    pub timezone_offset: Option<String>,

    /// If true, this sleep activity was a nap
    #[serde(default)]
    pub nap: bool,

    pub score_state: Option<ScoreState>,

    /// Only present if the score state is `Scored`
    pub score: Option<SleepScore>,
}

impl Record for Sleep {}

/// WHOOP's measurements and evaluation of a sleep.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct SleepScore {
    pub stage_summary: SleepStageSummary,
    pub sleep_needed: SleepNeeded,
    /// Respiratory rate during the sleep
    pub respiratory_rate: Option<f64>,
    /// Time asleep over sleep needed, as a percentage
    pub sleep_performance_percentage: Option<f64>,
    /// How similar the sleep and wake times were to the previous day, as a percentage
    pub sleep_consistency_percentage: Option<f64>,
    /// Time asleep over time in bed, as a percentage
    pub sleep_efficiency_percentage: Option<f64>,
}

/// Time spent in each sleep stage, in milliseconds.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct SleepStageSummary {
    pub total_in_bed_time_milli: i64,
    pub total_awake_time_milli: i64,
    pub total_no_data_time_milli: i64,
    pub total_light_sleep_time_milli: i64,
    pub total_slow_wave_sleep_time_milli: i64,
    pub total_rem_sleep_time_milli: i64,
    pub sleep_cycle_count: i32,
    pub disturbance_count: i32,
}

impl SleepStageSummary {
    /// Light + slow wave + REM sleep, in milliseconds.
    pub fn total_sleep_time_milli(&self) -> i64 {
        self.total_light_sleep_time_milli
            + self.total_slow_wave_sleep_time_milli
            + self.total_rem_sleep_time_milli
    }
}

/// Breakdown of the sleep the user needed, in milliseconds.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct SleepNeeded {
    /// Sleep needed based on historical trends
    pub baseline_milli: i64,
    pub need_from_sleep_debt_milli: i64,
    pub need_from_recent_strain_milli: i64,
    /// Reduction from recent naps (zero or negative)
    pub need_from_recent_nap_milli: i64,
}

/// Sleep endpoints.
///
/// Obtained via [`WhoopClient::sleep`].
#[derive(Debug, Clone)]
pub struct SleepService {
    client: Arc<HttpClient>,
}

impl SleepService {
    pub(crate) fn new(client: Arc<HttpClient>) -> Self {
        Self { client }
    }

    /// Gets a single sleep activity by id.
    pub async fn get_one(&self, id: i64) -> Result<Sleep> {
        self.client
            .get_record(&format!("{SLEEP_PATH}/{id}"))
            .await
    }

    /// Lists sleep activities for the authenticated user.
    /// Results are paginated and sorted by start time in descending order.
    pub async fn list_all(&self, params: Option<&RequestParams>) -> Result<PagedResult<Sleep>> {
        self.client.get_request_paged(SLEEP_PATH, params).await
    }
}

impl WhoopClient {
    /// Returns the service for sleep endpoints.
    pub fn sleep(&self) -> SleepService {
        SleepService::new(self.client.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_sleep_time() {
        let summary = SleepStageSummary {
            total_in_bed_time_milli: 18542807,
            total_awake_time_milli: 1678969,
            total_light_sleep_time_milli: 9644306,
            total_slow_wave_sleep_time_milli: 3003326,
            total_rem_sleep_time_milli: 4216206,
            ..Default::default()
        };
        assert_eq!(summary.total_sleep_time_milli(), 16863838);
    }
}
