pub mod client;
pub mod repos;
#[cfg(test)]
pub mod fake;

use async_trait::async_trait;
use thiserror::Error;

pub use client::GitHubClient;

/// Failure talking to the GitHub API, before any domain interpretation
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("resource not found")]
    NotFound,

    #[error("GitHub API request failed with status {0}: {1}")]
    Status(u16, String),

    #[error("network error: {0}")]
    Network(String),

    #[error("invalid response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            TransportError::Decode(e.to_string())
        } else {
            TransportError::Network(e.to_string())
        }
    }
}

/// Authenticated access to the GitHub REST and GraphQL endpoints
#[async_trait]
pub trait GitHubTransport: Send + Sync {
    /// POST a GraphQL document with variables and return the raw response body.
    /// GraphQL-level `errors` are left for the caller to interpret.
    async fn graphql(
        &self,
        query: &str,
        variables: serde_json::Value,
    ) -> Result<serde_json::Value, TransportError>;

    /// GET a REST path (relative to the API base) with query parameters
    async fn get(
        &self,
        path: &str,
        params: &[(&str, String)],
        accept: Option<&str>,
    ) -> Result<serde_json::Value, TransportError>;
}
