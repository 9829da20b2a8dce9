use anyhow::{Context, Result};
use std::env;

use crate::utils::validators::validate_url;

const DEFAULT_ALLOWED_ORIGINS: &[&str] = &[
    "http://localhost:5173",
    "http://localhost:5174",
    "https://activitycard.fly.dev",
    "https://ojitxslml.github.io",
];

#[derive(Clone, Debug)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub github_token: Option<String>,
    pub github_api_url: String,
    pub github_graphql_url: String,
    pub contribution_start_year: i32,
    pub cache_ttl_ms: u64,
    pub allow_placeholder_data: bool,
    pub http_timeout_secs: u64,
    pub allowed_origins: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            host: "0.0.0.0".to_string(),
            port: 3000,
            github_token: None,
            github_api_url: "https://api.github.com".to_string(),
            github_graphql_url: "https://api.github.com/graphql".to_string(),
            contribution_start_year: 2020,
            cache_ttl_ms: crate::cache::DEFAULT_TTL_MS,
            allow_placeholder_data: false,
            http_timeout_secs: 30,
            allowed_origins: DEFAULT_ALLOWED_ORIGINS.iter().map(|o| o.to_string()).collect(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build from any variable source. Unset or blank variables take defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let defaults = Config::default();

        let github_api_url = match var("GITHUB_API_URL") {
            Some(url) => {
                validate_url(&url).context("GITHUB_API_URL is not a valid URL")?;
                url.trim_end_matches('/').to_string()
            }
            None => defaults.github_api_url,
        };

        let github_graphql_url = match var("GITHUB_GRAPHQL_URL") {
            Some(url) => {
                validate_url(&url).context("GITHUB_GRAPHQL_URL is not a valid URL")?;
                url
            }
            None => format!("{}/graphql", github_api_url),
        };

        Ok(Config {
            host: var("HOST").unwrap_or(defaults.host),
            port: match var("PORT") {
                Some(port) => port.parse().context("PORT must be a number")?,
                None => defaults.port,
            },
            github_token: var("GITHUB_TOKEN"),
            github_api_url,
            github_graphql_url,
            contribution_start_year: match var("CONTRIBUTION_START_YEAR") {
                Some(year) => year.parse().context("CONTRIBUTION_START_YEAR must be a year")?,
                None => defaults.contribution_start_year,
            },
            cache_ttl_ms: match var("CACHE_TTL_MS") {
                Some(ttl) => ttl.parse().context("CACHE_TTL_MS must be a number of milliseconds")?,
                None => defaults.cache_ttl_ms,
            },
            allow_placeholder_data: match var("ALLOW_PLACEHOLDER_DATA") {
                Some(flag) => flag
                    .to_lowercase()
                    .parse()
                    .context("ALLOW_PLACEHOLDER_DATA must be true or false")?,
                None => defaults.allow_placeholder_data,
            },
            http_timeout_secs: match var("HTTP_TIMEOUT_SECS") {
                Some(secs) => secs.parse().context("HTTP_TIMEOUT_SECS must be a number")?,
                None => defaults.http_timeout_secs,
            },
            allowed_origins: match var("CORS_ALLOWED_ORIGINS") {
                Some(origins) => origins
                    .split(',')
                    .map(|o| o.trim().to_string())
                    .filter(|o| !o.is_empty())
                    .collect(),
                None => defaults.allowed_origins,
            },
        })
    }
}
