/*
 * WHOOP rust api client
 *
 * SPDX-License-Identifier: Apache-2.0
 */
//! # WHOOP Rust API Client
//!
//! A typed client for the WHOOP developer API.
//!
//! ## Features
//!
//! - supports WHOOP API v1 read endpoints: cycles, recovery, sleep, workouts, user
//! - cursor-paginated responses and async Streams
//! - client-side rate limit tracking (calls are refused locally once the quota is spent)
//! - workout sport names resolved from the sport id
//! - http metrics
//! - companion cli tool (`whoopr`)
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use whoop::prelude::*;
//! # async fn example() -> Result<(), WhoopError> {
//!
//! // The access token comes from your own OAuth flow.
//! let client = WhoopClient::with_access_token("access-token", ClientConfig::default())?;
//!
//! // Most recent cycles, newest first
//! let cycles = client.cycles().list_all(Some(&RequestParams::new().limit(10))).await?;
//! for cycle in cycles.iter() {
//!     println!("{} strain={:?}", cycle.id, cycle.score.as_ref().map(|s| s.strain));
//! }
//!
//! // Every workout in the account, across all pages
//! let workouts = client.workouts().list_all(None).await?.collect_all().await?;
//! for workout in &workouts {
//!     println!("{}", workout.sport_name.as_deref().unwrap_or("(unknown sport)"));
//! }
//!
//! // Single records
//! let recovery = client.recovery().get_for_cycle(93845).await?;
//! let profile = client.user().profile().await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Rate limits
//!
//! Every response carries `X-RateLimit-Remaining` and `X-RateLimit-Reset` headers.
//! The client records them after each call (successful or not). Once the remaining count
//! reaches zero, further calls fail with [`WhoopError::RateLimitExceeded`] without touching
//! the network until the reset time passes. Nothing is retried automatically.
//!
//! ```rust,no_run
//! use whoop::prelude::*;
//! # async fn example(client: &WhoopClient) -> Result<(), WhoopError> {
//! match client.sleep().get_one(12).await {
//!     Err(WhoopError::RateLimitExceeded { rate, .. }) => {
//!         println!("quota spent, resets at {:?}", rate.reset);
//!     }
//!     other => println!("{:?}", other?),
//! }
//! println!("remaining: {}", client.rate_limit().remaining);
//! # Ok(())
//! # }
//! ```
//!
#![allow(clippy::missing_errors_doc)] // pedantic
#![allow(clippy::missing_const_for_fn)] //  nursery function
#![allow(clippy::must_use_candidate)] // pedantic
#![warn(clippy::default_trait_access)]
#![warn(clippy::doc_markdown)]
#![warn(clippy::explicit_iter_loop)]
#![warn(clippy::future_not_send)]
#![warn(clippy::implicit_clone)]
#![warn(clippy::match_same_arms)]
#![warn(clippy::needless_raw_strings)]
#![warn(clippy::option_if_let_else)]
#![warn(clippy::redundant_clone)]
#![warn(clippy::ref_option)]
#![warn(clippy::redundant_closure)]
#![warn(clippy::uninlined_format_args)]
#![warn(clippy::unnecessary_wraps)]
#![warn(clippy::unused_async)]

pub mod client;
pub mod cycles;
pub mod error;
mod http_client;
pub mod paged;
pub mod params;
pub mod rate_limit;
pub mod recovery;
pub mod score;
pub mod sleep;
pub mod sports;
pub mod user;
pub mod workouts;

pub mod test_util;

/// Result type alias using `WhoopError` as the default error.
pub type Result<T, E = crate::error::WhoopError> = std::result::Result<T, E>;

/// Prelude module - import the common types with `use whoop::prelude::*;`
pub mod prelude {
    pub use super::{WHOOP_API_VERSION, WHOOP_BASE_URL};
    // Error types
    pub use crate::error::*;
    pub use crate::{
        client::{ClientConfig, WhoopClient},
        // Cycles
        cycles::{Cycle, CycleScore, CycleService},
        // HTTP metrics
        http_client::HttpMetricsSnapshot,
        // Pagination
        paged::{Page, PagedResult},
        params::RequestParams,
        // Rate limits
        rate_limit::{Clock, Rate, SystemClock},
        // Recovery
        recovery::{Recovery, RecoveryScore, RecoveryService},
        score::ScoreState,
        // Sleep
        sleep::{Sleep, SleepNeeded, SleepScore, SleepService, SleepStageSummary},
        sports::sport_name,
        // User
        user::{BodyMeasurement, UserProfile, UserService},
        // Workouts
        workouts::{Workout, WorkoutScore, WorkoutService, ZoneDuration},
    };
}

// ============================================================================
// CONSTANTS
// ============================================================================

/// API version path segment
pub const WHOOP_API_VERSION: &str = "v1";

/// Production API endpoint
pub const WHOOP_BASE_URL: &str = "https://api.prod.whoop.com/developer/";

pub(crate) mod config {
    /// Environment variable for default endpoint URL
    pub const WHOOP_URL_ENV: &str = "WHOOP_URL";

    /// Requests left in the current window
    pub const HEADER_RATE_REMAINING: &str = "x-ratelimit-remaining";

    /// Seconds until the current window resets
    pub const HEADER_RATE_RESET: &str = "x-ratelimit-reset";

    /// Format used for reset times in rate limit messages
    pub const RATE_RESET_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";
}
