use futures_util::future::join_all;
use std::collections::HashMap;
use std::sync::Arc;

use crate::cache::{self, Cache};
use crate::errors::BadgeError;
use crate::models::{LanguageStat, TopLanguages};
use crate::services::github::repos::list_user_repos;
use crate::services::github::GitHubTransport;

pub const DEFAULT_LANGUAGE_COUNT: usize = 6;
pub const MAX_LANGUAGE_COUNT: usize = 10;

const FALLBACK_COLOR: &str = "#858585";

/// Linguist colors for the languages we expect to see most
const LANGUAGE_COLORS: &[(&str, &str)] = &[
    ("JavaScript", "#f1e05a"),
    ("TypeScript", "#2b7489"),
    ("Python", "#3572A5"),
    ("Java", "#b07219"),
    ("C++", "#f34b7d"),
    ("C#", "#178600"),
    ("PHP", "#4F5D95"),
    ("Ruby", "#701516"),
    ("Go", "#00ADD8"),
    ("Rust", "#dea584"),
    ("Swift", "#ffac45"),
    ("Kotlin", "#F18E33"),
    ("Dart", "#00B4AB"),
    ("HTML", "#e34c26"),
    ("CSS", "#563d7c"),
    ("Shell", "#89e051"),
    ("Vue", "#41b883"),
    ("C", "#555555"),
    ("Objective-C", "#438eff"),
    ("Scala", "#c22d40"),
];

pub fn language_color(name: &str) -> &'static str {
    LANGUAGE_COLORS
        .iter()
        .find(|(language, _)| *language == name)
        .map(|(_, color)| *color)
        .unwrap_or(FALLBACK_COLOR)
}

pub struct LanguagesAggregator {
    transport: Arc<dyn GitHubTransport>,
    cache: Arc<dyn Cache>,
    cache_ttl_ms: u64,
}

impl LanguagesAggregator {
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

    /// Byte share per language across the user's own (non-fork) repositories.
    ///
    /// `limit` is clamped to `1..=10`.
    pub async fn get_top_languages(
        &self,
        username: &str,
        refresh: bool,
        limit: usize,
    ) -> Result<TopLanguages, BadgeError> {
        let limit = limit.clamp(1, MAX_LANGUAGE_COUNT);
        let key = cache::top_languages_key(username);

        if !refresh {
            if let Some(cached) = cache::get_json::<TopLanguages>(self.cache.as_ref(), &key).await {
                return Ok(truncate(cached, limit));
            }
        }

        let repos = list_user_repos(self.transport.as_ref(), username).await?;

        let lookups = repos.iter().filter(|repo| !repo.fork).map(|repo| async move {
            let path = format!("repos/{}/{}/languages", username, repo.name);
            let result = self
                .transport
                .get(&path, &[], None)
                .await
                .map_err(|e| e.to_string())
                .and_then(|body| {
                    serde_json::from_value::<HashMap<String, u64>>(body).map_err(|e| e.to_string())
                });

            match result {
                Ok(languages) => Some(languages),
                Err(e) => {
                    log::warn!("Skipping languages for {}/{}: {}", username, repo.name, e);
                    None
                }
            }
        });

        let mut totals: HashMap<String, u64> = HashMap::new();
        for languages in join_all(lookups).await.into_iter().flatten() {
            for (language, bytes) in languages {
                *totals.entry(language).or_insert(0) += bytes;
            }
        }

        let result = TopLanguages {
            username: username.to_string(),
            languages: rank_languages(totals),
        };

        log::info!(
            "🗂️  {}: {} languages across {} repositories",
            username,
            result.languages.len(),
            repos.len()
        );

        cache::set_json(self.cache.as_ref(), &key, &result, self.cache_ttl_ms).await;

        Ok(truncate(result, limit))
    }
}

/// Percentages of the grand total, largest first. Ties break on name.
fn rank_languages(totals: HashMap<String, u64>) -> Vec<LanguageStat> {
    let total_bytes: u64 = totals.values().sum();

    let mut languages: Vec<LanguageStat> = totals
        .into_iter()
        .map(|(name, bytes)| LanguageStat {
            percentage: if total_bytes == 0 {
                0.0
            } else {
                bytes as f64 / total_bytes as f64 * 100.0
            },
            color: language_color(&name).to_string(),
            name,
            bytes,
        })
        .collect();

    languages.sort_by(|a, b| b.bytes.cmp(&a.bytes).then_with(|| a.name.cmp(&b.name)));
    languages
}

fn truncate(mut top: TopLanguages, limit: usize) -> TopLanguages {
    top.languages.truncate(limit);
    top
}
