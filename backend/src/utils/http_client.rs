use reqwest::{Client, ClientBuilder};
use std::time::Duration;

pub const USER_AGENT: &str = concat!("activitycard/", env!("CARGO_PKG_VERSION"));

/// Create the HTTP client used for all GitHub API requests
pub fn create_http_client(timeout_secs: u64) -> reqwest::Result<Client> {
    ClientBuilder::new()
        .timeout(Duration::from_secs(timeout_secs))
        .user_agent(USER_AGENT)
        .build()
}
