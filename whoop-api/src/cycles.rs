//! # WHOOP Physiological Cycles
//!
//! A cycle is WHOOP's unit of a physiological day: it starts when the member wakes
//! (or at the end of the previous cycle) and ends at the next sleep.
//!
//! ## Cycle methods on WhoopClient
//!
//! - [cycles](WhoopClient::cycles) - returns the [`CycleService`]
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use whoop::prelude::*;
//!
//! # async fn example(client: &WhoopClient) -> Result<(), WhoopError> {
//! // List the latest cycles
//! let cycles = client.cycles().list_all(None).await?;
//!
//! // Get a specific cycle
//! let cycle = client.cycles().get_one(93845).await?;
//! # Ok(())
//! # }
//! ```

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

pub(crate) const CYCLE_PATH: &str = "/cycle";

/// A member's activity in the context of a physiological cycle.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct Cycle {
    /// Unique identifier for the physiological cycle
    pub id: i64,

    /// The WHOOP user for the physiological cycle
    pub user_id: i64,

    /// The time the cycle was recorded in WHOOP
    pub created_at: Option<DateTime<Utc>>,

    /// The time the cycle was last updated in WHOOP
    pub updated_at: Option<DateTime<Utc>>,

    /// Start time bound of the cycle
    pub start: Option<DateTime<Utc>>,

    /// End time bound of the cycle. If not present, the user is currently in this cycle.
    pub end: Option<DateTime<Utc>>,

    /// The user's timezone offset when the cycle was recorded: '+hh:mm', '-hh:mm', or 'Z'
    pub timezone_offset: Option<String>,

    pub score_state: Option<ScoreState>,

    /// Only present if the score state is `Scored`
    pub score: Option<CycleScore>,
}

impl Cycle {
    /// Returns true if the member is still in this cycle.
    pub fn is_open(&self) -> bool {
        self.end.is_none()
    }
}

impl Record for Cycle {}

/// WHOOP's measurements and evaluation of a cycle.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct CycleScore {
    /// Cardiovascular load, on a scale from 0 to 21
    pub strain: f64,

    /// Kilojoules expended during the cycle
    pub kilojoule: f64,

    /// Average heart rate during the cycle
    pub average_heart_rate: i32,

    /// Max heart rate during the cycle
    pub max_heart_rate: i32,
}

/// Cycle endpoints.
///
/// Obtained via [`WhoopClient::cycles`].
#[derive(Debug, Clone)]
pub struct CycleService {
    client: Arc<HttpClient>,
}

impl CycleService {
    pub(crate) fn new(client: Arc<HttpClient>) -> Self {
        Self { client }
    }

    /// Gets a single physiological cycle by id.
    pub async fn get_one(&self, id: i64) -> Result<Cycle> {
        self.client
            .get_record(&format!("{CYCLE_PATH}/{id}"))
            .await
    }

    /// Lists physiological cycles for the authenticated user.
    /// Results are paginated and sorted by start time in descending order.
    pub async fn list_all(&self, params: Option<&RequestParams>) -> Result<PagedResult<Cycle>> {
        self.client.get_request_paged(CYCLE_PATH, params).await
    }
}

impl WhoopClient {
    /// Returns the service for cycle endpoints.
    pub fn cycles(&self) -> CycleService {
        CycleService::new(self.client.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_cycle() {
        let cycle: Cycle = serde_json::from_str(
            r#"{
                "id": 93845,
                "user_id": 10129,
                "created_at": "2022-04-24T11:25:44.774Z",
                "updated_at": "2022-04-24T14:25:44.774Z",
                "start": "2022-04-24T02:25:44.774Z",
                "end": "2022-04-24T10:25:44.774Z",
                "timezone_offset": "-05:00",
                "score_state": "SCORED",
                "score": {
                    "strain": 5.2951527,
                    "kilojoule": 8288.297,
                    "average_heart_rate": 68,
                    "max_heart_rate": 141
                }
            }"#,
        )
        .unwrap();
        assert_eq!(cycle.id, 93845);
        assert_eq!(cycle.score_state, Some(ScoreState::Scored));
        assert_eq!(cycle.score.as_ref().unwrap().max_heart_rate, 141);
        assert!(!cycle.is_open());
    }

    #[test]
    fn test_decode_pending_cycle() {
        let cycle: Cycle = serde_json::from_str(
            r#"{"id": 1, "user_id": 1, "start": "2022-04-24T02:25:44.774Z", "score_state": "PENDING_SCORE"}"#,
        )
        .unwrap();
        assert!(cycle.is_open());
        assert!(cycle.score.is_none());
        assert_eq!(cycle.score_state, Some(ScoreState::PendingScore));
    }
}
