pub mod contribution;
pub mod languages;
pub mod streak;
pub mod user_stats;

pub use contribution::{ContributionDay, ContributionSeries};
pub use languages::{LanguageStat, TopLanguages};
pub use streak::{StreakReport, StreakStats};
pub use user_stats::{Rank, UserStats};
