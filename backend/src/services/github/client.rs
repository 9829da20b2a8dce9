use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde_json::json;

use super::{GitHubTransport, TransportError};
use crate::utils::config::Config;
use crate::utils::http_client::{create_http_client, USER_AGENT};

/// reqwest-backed GitHub API client shared by all services
pub struct GitHubClient {
    http: Client,
    api_base_url: String,
    graphql_url: String,
    token: Option<String>,
}

impl GitHubClient {
    pub fn new(http: Client, api_base_url: &str, graphql_url: &str, token: Option<String>) -> Self {
        Self {
            http,
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
            graphql_url: graphql_url.to_string(),
            token,
        }
    }

    pub fn from_config(config: &Config) -> reqwest::Result<Self> {
        let http = create_http_client(config.http_timeout_secs)?;
        Ok(Self::new(
            http,
            &config.github_api_url,
            &config.github_graphql_url,
            config.github_token.clone(),
        ))
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        let request = request.header("User-Agent", USER_AGENT);
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn read_json(response: Response) -> Result<serde_json::Value, TransportError> {
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(TransportError::NotFound);
        }

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(TransportError::Status(status.as_u16(), error_text));
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl GitHubTransport for GitHubClient {
    async fn graphql(
        &self,
        query: &str,
        variables: serde_json::Value,
    ) -> Result<serde_json::Value, TransportError> {
        let response = self
            .authorize(self.http.post(&self.graphql_url))
            .json(&json!({
                "query": query,
                "variables": variables,
            }))
            .send()
            .await?;

        Self::read_json(response).await
    }

    async fn get(
        &self,
        path: &str,
        params: &[(&str, String)],
        accept: Option<&str>,
    ) -> Result<serde_json::Value, TransportError> {
        let url = format!("{}/{}", self.api_base_url, path.trim_start_matches('/'));

        let mut request = self.authorize(self.http.get(&url)).query(params);
        if let Some(accept) = accept {
            request = request.header("Accept", accept);
        }

        let response = request.send().await?;
        Self::read_json(response).await
    }
}
