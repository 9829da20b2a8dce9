use serde::{Deserialize, Serialize};
use std::fmt;

/// Tiered classification derived from a weighted activity score
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rank {
    #[serde(rename = "S")]
    S,
    #[serde(rename = "A+")]
    APlus,
    #[serde(rename = "A")]
    A,
    #[serde(rename = "B+")]
    BPlus,
    #[serde(rename = "B")]
    B,
    #[serde(rename = "C")]
    C,
}

impl Rank {
    /// score = stars*2 + commits*0.5 + prs*3 + issues
    pub fn score(stars: u64, commits: u64, prs: u64, issues: u64) -> f64 {
        stars as f64 * 2.0 + commits as f64 * 0.5 + prs as f64 * 3.0 + issues as f64
    }

    pub fn from_score(score: f64) -> Self {
        match score {
            s if s >= 1000.0 => Rank::S,
            s if s >= 500.0 => Rank::APlus,
            s if s >= 200.0 => Rank::A,
            s if s >= 100.0 => Rank::BPlus,
            s if s >= 50.0 => Rank::B,
            _ => Rank::C,
        }
    }

    pub fn calculate(stars: u64, commits: u64, prs: u64, issues: u64) -> Self {
        Self::from_score(Self::score(stars, commits, prs, issues))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Rank::S => "S",
            Rank::APlus => "A+",
            Rank::A => "A",
            Rank::BPlus => "B+",
            Rank::B => "B",
            Rank::C => "C",
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    pub username: String,
    pub name: String,
    pub total_stars: u64,
    pub total_commits: u64,
    #[serde(rename = "totalPRs")]
    pub total_prs: u64,
    pub total_issues: u64,
    pub contributed_to: u64,
    pub rank: Rank,
}
