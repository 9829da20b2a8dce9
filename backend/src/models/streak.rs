use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::contribution::ContributionDay;

/// Streak summary for one user, recomputed per request (subject to caching)
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreakStats {
    pub username: String,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub total_contributions: u64,
    pub first_contribution: Option<NaiveDate>,
    pub current_streak_start: Option<NaiveDate>,
    pub current_streak_end: Option<NaiveDate>,
    pub longest_streak_start: Option<NaiveDate>,
    pub longest_streak_end: Option<NaiveDate>,
}

impl StreakStats {
    /// Zeroed stats for a user with no contribution history
    pub fn empty(username: &str) -> Self {
        Self {
            username: username.to_string(),
            ..Default::default()
        }
    }
}

/// Streak stats together with the days they were computed from,
/// so the renderer can draw the contribution graph without refetching
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakReport {
    pub stats: StreakStats,
    pub contributions: Vec<ContributionDay>,
    /// True when the contributions are synthetic fallback data
    pub placeholder: bool,
}
