//! # WHOOP Workouts
//!
//! ## Workout methods on WhoopClient
//!
//! - [workouts](WhoopClient::workouts) - returns the [`WorkoutService`]
//!
//! Workouts carry a numeric `sport_id`. Every workout returned by the service has
//! `sport_name` filled in from [`sport_name`](crate::sports::sport_name) when the id is known.
//!
//! ```rust,no_run
//! use whoop::prelude::*;
//!
//! # async fn example(client: &WhoopClient) -> Result<(), WhoopError> {
//! let workout = client.workouts().get_one(1043).await?;
//! println!("{}", workout.sport_name.as_deref().unwrap_or("unknown sport"));
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
    sports::sport_name,
};

const WORKOUT_PATH: &str = "/activity/workout";

/// A workout activity.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct Workout {
    /// Unique identifier for the workout activity
    pub id: i64,

    /// User who performed the workout
    pub user_id: i64,

    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
    pub timezone_offset: Option<String>,

    /// WHOOP sport id
    pub sport_id: i32,

    /// Display name for `sport_id`. Not sent by the server; set by this client.
    #[serde(default)]
    pub sport_name: Option<String>,

    pub score_state: Option<ScoreState>,

    /// Only present if the score state is `Scored`
    pub score: Option<WorkoutScore>,
}

impl Record for Workout {
    fn resolve(&mut self) {
        self.sport_name = sport_name(self.sport_id).map(str::to_string);
    }
}

/// WHOOP's measurements and evaluation of a workout.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct WorkoutScore {
    /// Cardiovascular load, on a scale from 0 to 21
    pub strain: f64,
    pub average_heart_rate: i32,
    pub max_heart_rate: i32,
    /// Kilojoules expended during the workout
    pub kilojoule: f64,
    /// Percentage of the workout with heart rate data
    pub percent_recorded: f64,
    pub distance_meter: Option<f64>,
    pub altitude_gain_meter: Option<f64>,
    pub altitude_change_meter: Option<f64>,
    pub zone_duration: ZoneDuration,
}

/// Time spent in each heart rate zone, in milliseconds.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct ZoneDuration {
    pub zone_zero_milli: i64,
    pub zone_one_milli: i64,
    pub zone_two_milli: i64,
    pub zone_three_milli: i64,
    pub zone_four_milli: i64,
    pub zone_five_milli: i64,
}

impl ZoneDuration {
    /// Sum of all zones, in milliseconds
    pub fn total_milli(&self) -> i64 {
        self.zone_zero_milli
            + self.zone_one_milli
            + self.zone_two_milli
            + self.zone_three_milli
            + self.zone_four_milli
            + self.zone_five_milli
    }
}

/// Workout endpoints.
///
/// Obtained via [`WhoopClient::workouts`].
#[derive(Debug, Clone)]
pub struct WorkoutService {
    client: Arc<HttpClient>,
}

impl WorkoutService {
    pub(crate) fn new(client: Arc<HttpClient>) -> Self {
        Self { client }
    }

    /// Gets a single workout by id.
    pub async fn get_one(&self, id: i64) -> Result<Workout> {
        self.client
            .get_record(&format!("{WORKOUT_PATH}/{id}"))
            .await
    }

    /// Lists workouts for the authenticated user.
    /// Results are paginated and sorted by start time in descending order.
    pub async fn list_all(&self, params: Option<&RequestParams>) -> Result<PagedResult<Workout>> {
        self.client.get_request_paged(WORKOUT_PATH, params).await
    }
}

impl WhoopClient {
    /// Returns the service for workout endpoints.
    pub fn workouts(&self) -> WorkoutService {
        WorkoutService::new(self.client.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn workout(sport_id: i32) -> Workout {
        serde_json::from_value(serde_json::json!({
            "id": 1,
            "user_id": 1,
            "sport_id": sport_id,
            "score_state": "SCORED",
        }))
        .unwrap()
    }

    #[test]
    fn test_resolve_sport_name() {
        let mut rugby = workout(27);
        assert_eq!(rugby.sport_name, None);
        rugby.resolve();
        assert_eq!(rugby.sport_name.as_deref(), Some("Rugby"));

        let mut unknown = workout(5000);
        unknown.resolve();
        assert_eq!(unknown.sport_name, None);
    }

    #[test]
    fn test_zone_total() {
        let zones = ZoneDuration {
            zone_zero_milli: 1,
            zone_one_milli: 2,
            zone_two_milli: 3,
            zone_three_milli: 4,
            zone_four_milli: 5,
            zone_five_milli: 6,
        };
        assert_eq!(zones.total_milli(), 21);
    }
}
