use actix_web::http::StatusCode;
use thiserror::Error;

use crate::services::github::TransportError;

/// Errors surfaced by the badge services to the HTTP layer
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BadgeError {
    /// A required query parameter was absent or blank
    #[error("{0} is required")]
    MissingParameter(&'static str),

    /// GitHub confirmed the account does not exist
    #[error("GitHub user not found: {0}")]
    UserNotFound(String),

    /// Network, decode or unexpected upstream failure
    #[error("Failed to fetch GitHub data: {0}")]
    UpstreamUnavailable(String),
}

impl BadgeError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            BadgeError::MissingParameter(_) | BadgeError::UserNotFound(_) => StatusCode::NOT_FOUND,
            BadgeError::UpstreamUnavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message shown on the rendered error card
    pub fn user_message(&self) -> String {
        match self {
            BadgeError::MissingParameter(param) => format!("{} is required", capitalize(param)),
            BadgeError::UserNotFound(_) => {
                "GitHub user not found. Please check the username.".to_string()
            }
            BadgeError::UpstreamUnavailable(_) => {
                "Failed to fetch GitHub data. Please try again later.".to_string()
            }
        }
    }

    /// Map a transport failure for a lookup keyed by `username`.
    /// A 404 means the account does not exist.
    pub fn from_lookup(username: &str, err: TransportError) -> Self {
        match err {
            TransportError::NotFound => BadgeError::UserNotFound(username.to_string()),
            other => BadgeError::UpstreamUnavailable(other.to_string()),
        }
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
