//! # WHOOP User
//!
//! ## User methods on WhoopClient
//!
//! - [user](WhoopClient::user) - returns the [`UserService`]
//!
//! Both endpoints describe the authenticated member and are not paginated.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::{Result, client::WhoopClient, http_client::HttpClient, paged::Record};

const PROFILE_PATH: &str = "/user/profile/basic";
const BODY_MEASUREMENT_PATH: &str = "/user/measurement/body";

/// Basic profile of the authenticated member.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct UserProfile {
    pub user_id: i64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

impl Record for UserProfile {}

/// Body measurements of the authenticated member.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct BodyMeasurement {
    pub height_meter: f64,
    pub weight_kilogram: f64,
    /// Max heart rate calculated by WHOOP
    pub max_heart_rate: i32,
}

impl Record for BodyMeasurement {}

/// User endpoints.
///
/// Obtained via [`WhoopClient::user`].
#[derive(Debug, Clone)]
pub struct UserService {
    client: Arc<HttpClient>,
}

impl UserService {
    pub(crate) fn new(client: Arc<HttpClient>) -> Self {
        Self { client }
    }

    /// Gets the member's basic profile.
    pub async fn profile(&self) -> Result<UserProfile> {
        self.client.get_record(PROFILE_PATH).await
    }

    /// Gets the member's body measurements.
    pub async fn body_measurement(&self) -> Result<BodyMeasurement> {
        self.client.get_record(BODY_MEASUREMENT_PATH).await
    }
}

impl WhoopClient {
    /// Returns the service for user endpoints.
    pub fn user(&self) -> UserService {
        UserService::new(self.client.clone())
    }
}
