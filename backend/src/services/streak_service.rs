use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::cache::{self, Cache};
use crate::errors::BadgeError;
use crate::models::{ContributionDay, ContributionSeries, StreakReport, StreakStats};
use crate::services::contribution_fetcher::{year_windows, ContributionFetcher};
use crate::services::contribution_normalizer::normalize;
use crate::services::placeholder::generate_placeholder_contributions;
use crate::services::streak_calculator::calculate_streaks;

pub struct StreakService {
    fetcher: ContributionFetcher,
    cache: Arc<dyn Cache>,
    cache_ttl_ms: u64,
    allow_placeholder_data: bool,
}

impl StreakService {
    pub fn new(
        fetcher: ContributionFetcher,
        cache: Arc<dyn Cache>,
        cache_ttl_ms: u64,
        allow_placeholder_data: bool,
    ) -> Self {
        Self {
            fetcher,
            cache,
            cache_ttl_ms,
            allow_placeholder_data,
        }
    }

    /// Number of calendar years covered by a fresh fetch
    pub fn history_years(&self, now: DateTime<Utc>) -> usize {
        year_windows(self.fetcher.start_year(), now).len()
    }

    pub async fn get_streak_report(
        &self,
        username: &str,
        refresh: bool,
    ) -> Result<StreakReport, BadgeError> {
        self.get_streak_report_at(username, refresh, Utc::now()).await
    }

    /// Streak stats plus the days behind them, as of `now`.
    ///
    /// `refresh` skips cache reads; results are still written back.
    pub async fn get_streak_report_at(
        &self,
        username: &str,
        refresh: bool,
        now: DateTime<Utc>,
    ) -> Result<StreakReport, BadgeError> {
        let stats_key = cache::streak_stats_key(username);

        if !refresh {
            let stats = cache::get_json::<StreakStats>(self.cache.as_ref(), &stats_key).await;
            let contributions = cache::get_json::<Vec<ContributionDay>>(
                self.cache.as_ref(),
                &cache::contributions_key(username),
            )
            .await;

            if let (Some(stats), Some(contributions)) = (stats, contributions) {
                log::debug!("Cache hit for {}", stats_key);
                return Ok(StreakReport {
                    stats,
                    contributions,
                    placeholder: false,
                });
            }
        }

        let today = now.date_naive();

        let (series, placeholder) = match self.load_series(username, refresh, now).await {
            Ok(series) => (series, false),
            Err(BadgeError::UpstreamUnavailable(reason)) if self.allow_placeholder_data => {
                log::warn!(
                    "⚠️  Contribution fetch for {} failed ({}), serving placeholder data",
                    username,
                    reason
                );
                let days = generate_placeholder_contributions(today, &mut rand::thread_rng());
                (ContributionSeries::from(days), true)
            }
            Err(e) => return Err(e),
        };

        let stats = calculate_streaks(username, &series, today);

        log::info!(
            "🔥 {}: current streak {}, longest {}, {} total contributions",
            username,
            stats.current_streak,
            stats.longest_streak,
            stats.total_contributions
        );

        // Synthetic data must not outlive the outage
        if !placeholder {
            cache::set_json(self.cache.as_ref(), &stats_key, &stats, self.cache_ttl_ms).await;
        }

        Ok(StreakReport {
            stats,
            contributions: series.to_days(),
            placeholder,
        })
    }

    async fn load_series(
        &self,
        username: &str,
        refresh: bool,
        now: DateTime<Utc>,
    ) -> Result<ContributionSeries, BadgeError> {
        let key = cache::contributions_key(username);

        if !refresh {
            if let Some(series) =
                cache::get_json::<ContributionSeries>(self.cache.as_ref(), &key).await
            {
                return Ok(series);
            }
        }

        let years = self.fetcher.fetch_yearly(username, now).await?;
        let series = normalize(years);

        cache::set_json(self.cache.as_ref(), &key, &series, self.cache_ttl_ms).await;

        Ok(series)
    }
}
