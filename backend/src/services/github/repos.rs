use serde::Deserialize;

use super::GitHubTransport;
use crate::errors::BadgeError;

/// Repository fields used by the stats and languages cards
#[derive(Debug, Clone, Deserialize)]
pub struct GitHubRepo {
    pub name: String,
    #[serde(default)]
    pub stargazers_count: u64,
    #[serde(default)]
    pub fork: bool,
}

/// First page (up to 100) of a user's repositories, most recently updated first
pub async fn list_user_repos(
    transport: &dyn GitHubTransport,
    username: &str,
) -> Result<Vec<GitHubRepo>, BadgeError> {
    let body = transport
        .get(
            &format!("users/{}/repos", username),
            &[("per_page", "100".to_string()), ("sort", "updated".to_string())],
            None,
        )
        .await
        .map_err(|e| BadgeError::from_lookup(username, e))?;

    let repos: Vec<GitHubRepo> = serde_json::from_value(body)
        .map_err(|e| BadgeError::UpstreamUnavailable(format!("Invalid repository list: {}", e)))?;

    log::info!("📦 {} has {} repositories on the first page", username, repos.len());

    Ok(repos)
}
