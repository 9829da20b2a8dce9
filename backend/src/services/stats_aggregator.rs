use serde::Deserialize;
use std::sync::Arc;

use crate::cache::{self, Cache};
use crate::errors::BadgeError;
use crate::models::{Rank, UserStats};
use crate::services::github::repos::list_user_repos;
use crate::services::github::GitHubTransport;

/// Commit search still needs the preview media type on some GitHub deployments
const COMMIT_SEARCH_ACCEPT: &str = "application/vnd.github.cloak-preview";

pub struct StatsAggregator {
    transport: Arc<dyn GitHubTransport>,
    cache: Arc<dyn Cache>,
    cache_ttl_ms: u64,
}

impl StatsAggregator {
    pub fn new(
        transport: Arc<dyn GitHubTransport>,
        cache: Arc<dyn Cache>,
        cache_ttl_ms: u64,
    ) -> Self {
        Self {
            transport,
            cache,
            cache_ttl_ms,
        }
    }

    /// Profile totals and rank for the stats card
    pub async fn get_user_stats(
        &self,
        username: &str,
        refresh: bool,
    ) -> Result<UserStats, BadgeError> {
        let key = cache::user_stats_key(username);

        if !refresh {
            if let Some(stats) = cache::get_json::<UserStats>(self.cache.as_ref(), &key).await {
                return Ok(stats);
            }
        }

        let user = self.fetch_user(username).await?;
        let repos = list_user_repos(self.transport.as_ref(), username).await?;

        let total_stars: u64 = repos.iter().map(|repo| repo.stargazers_count).sum();

        let (total_commits, total_prs, total_issues) = tokio::join!(
            self.search_count(
                "search/commits",
                format!("author:{}", username),
                Some(COMMIT_SEARCH_ACCEPT)
            ),
            self.search_count("search/issues", format!("author:{} type:pr", username), None),
            self.search_count("search/issues", format!("author:{} type:issue", username), None),
        );

        let stats = UserStats {
            name: user.name.filter(|name| !name.is_empty()).unwrap_or_else(|| user.login.clone()),
            username: user.login,
            total_stars,
            total_commits,
            total_prs,
            total_issues,
            contributed_to: repos.len() as u64,
            rank: Rank::calculate(total_stars, total_commits, total_prs, total_issues),
        };

        log::info!(
            "⭐ {}: {} stars, {} commits, {} PRs, {} issues, rank {}",
            stats.username,
            stats.total_stars,
            stats.total_commits,
            stats.total_prs,
            stats.total_issues,
            stats.rank
        );

        cache::set_json(self.cache.as_ref(), &key, &stats, self.cache_ttl_ms).await;

        Ok(stats)
    }

    async fn fetch_user(&self, username: &str) -> Result<GitHubUser, BadgeError> {
        let body = self
            .transport
            .get(&format!("users/{}", username), &[], None)
            .await
            .map_err(|e| BadgeError::from_lookup(username, e))?;

        serde_json::from_value(body)
            .map_err(|e| BadgeError::UpstreamUnavailable(format!("Invalid user response: {}", e)))
    }

    /// `total_count` of a search query. Search failures count as zero.
    async fn search_count(&self, path: &str, query: String, accept: Option<&str>) -> u64 {
        let params = [("q", query), ("per_page", "1".to_string())];

        let result = self
            .transport
            .get(path, &params, accept)
            .await
            .map_err(|e| e.to_string())
            .and_then(|body| {
                serde_json::from_value::<SearchCount>(body).map_err(|e| e.to_string())
            });

        match result {
            Ok(count) => count.total_count,
            Err(e) => {
                log::warn!("Search {} ({}) failed, counting 0: {}", path, params[0].1, e);
                0
            }
        }
    }
}

// GitHub REST API response types

#[derive(Debug, Deserialize)]
struct GitHubUser {
    login: String,
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SearchCount {
    #[serde(default)]
    total_count: u64,
}
