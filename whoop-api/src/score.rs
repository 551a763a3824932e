//! Scoring state shared by cycles, recovery, sleep, and workouts.

use serde::{Deserialize, Serialize};

/// Whether WHOOP has finished scoring an activity.
///
/// The `score` of a record is only present when the state is `Scored`.
#[derive(
    Debug,
    Deserialize,
    Serialize,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ScoreState {
    /// Scored; measurement values are present
    Scored,
    /// WHOOP is still evaluating the activity
    PendingScore,
    /// The activity could not be scored
    Unscorable,
    /// A state this client does not know about
    #[serde(other)]
    Unknown,
}

impl ScoreState {
    pub fn is_scored(&self) -> bool {
        *self == ScoreState::Scored
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn test_score_state_serde() {
        let state: ScoreState = serde_json::from_str("\"PENDING_SCORE\"").unwrap();
        assert_eq!(state, ScoreState::PendingScore);
        assert_eq!(
            serde_json::to_string(&ScoreState::Unscorable).unwrap(),
            "\"UNSCORABLE\""
        );
        let state: ScoreState = serde_json::from_str("\"SOMETHING_NEW\"").unwrap();
        assert_eq!(state, ScoreState::Unknown);
    }

    #[test]
    fn test_score_state_strum() {
        assert_eq!(ScoreState::Scored.to_string(), "SCORED");
        assert_eq!(
            ScoreState::from_str("PENDING_SCORE").unwrap(),
            ScoreState::PendingScore
        );
        assert!(ScoreState::Scored.is_scored());
        assert!(!ScoreState::Unscorable.is_scored());
    }
}
