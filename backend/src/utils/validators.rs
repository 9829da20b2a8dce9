use anyhow::{anyhow, Result};
use url::Url;

use crate::errors::BadgeError;
use crate::services::languages::{DEFAULT_LANGUAGE_COUNT, MAX_LANGUAGE_COUNT};

/// Validate that a string is a valid URL with http or https scheme
pub fn validate_url(url_str: &str) -> Result<Url> {
    let url = Url::parse(url_str).map_err(|e| anyhow!("Invalid URL format: {}", e))?;

    // Only allow http and https schemes
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(anyhow!(
            "URL must use http or https scheme, got: {}",
            url.scheme()
        ));
    }

    // Must have a host
    if url.host_str().is_none() {
        return Err(anyhow!("URL must have a host"));
    }

    Ok(url)
}

/// Validate username (alphanumeric, hyphens, underscores, 1-39 chars for GitHub compatibility)
pub fn validate_username(username: &str) -> Result<()> {
    if username.is_empty() || username.len() > 39 {
        return Err(anyhow!("Username must be between 1 and 39 characters"));
    }

    if !username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(anyhow!(
            "Username can only contain alphanumeric characters, hyphens, and underscores"
        ));
    }

    Ok(())
}

/// The `username` query parameter, trimmed.
///
/// Blank is a missing parameter. A value GitHub could never accept as a
/// login is reported as an unknown user without calling the API.
pub fn require_username(value: Option<&str>) -> Result<String, BadgeError> {
    let username = value.map(str::trim).unwrap_or_default();

    if username.is_empty() {
        return Err(BadgeError::MissingParameter("username"));
    }

    if let Err(e) = validate_username(username) {
        log::debug!("Rejecting username {:?}: {}", username, e);
        return Err(BadgeError::UserNotFound(username.to_string()));
    }

    Ok(username.to_string())
}

/// Query flags are on only for the literal `true`, in any case
pub fn parse_flag(value: Option<&str>) -> bool {
    parse_flag_or(value, false)
}

pub fn parse_flag_or(value: Option<&str>, default: bool) -> bool {
    match value {
        Some(v) => v.trim().eq_ignore_ascii_case("true"),
        None => default,
    }
}

/// Years of graph history; anything missing, unparsable or below 1 means 1
pub fn parse_date_range_years(value: Option<&str>) -> usize {
    value
        .and_then(|v| v.trim().parse::<i64>().ok())
        .filter(|&years| years >= 1)
        .map_or(1, |years| usize::try_from(years).unwrap_or(usize::MAX))
}

/// Number of languages to show, clamped to `1..=10`
pub fn parse_langs_count(value: Option<&str>) -> usize {
    value
        .and_then(|v| v.trim().parse::<i64>().ok())
        .map_or(DEFAULT_LANGUAGE_COUNT, |count| {
            count.clamp(1, MAX_LANGUAGE_COUNT as i64) as usize
        })
}

/// Comma separated list, blanks dropped
pub fn parse_list(value: Option<&str>) -> Vec<String> {
    value
        .map(|v| {
            v.split(',')
                .map(|item| item.trim().to_string())
                .filter(|item| !item.is_empty())
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("https://api.github.com").is_ok());
        assert!(validate_url("http://localhost:3000").is_ok());
        assert!(validate_url("ftp://example.com").is_err());
        assert!(validate_url("not-a-url").is_err());
    }

    #[test]
    fn test_validate_username() {
        assert!(validate_username("octocat").is_ok());
        assert!(validate_username("my-user_123").is_ok());
        assert!(validate_username("").is_err());
        assert!(validate_username(&"a".repeat(40)).is_err());
        assert!(validate_username("user@example").is_err());
        assert!(validate_username("../repos").is_err());
    }

    #[test]
    fn test_require_username() {
        assert_eq!(require_username(Some(" octocat ")), Ok("octocat".to_string()));
        assert_eq!(require_username(None), Err(BadgeError::MissingParameter("username")));
        assert_eq!(require_username(Some("   ")), Err(BadgeError::MissingParameter("username")));
        assert_eq!(
            require_username(Some("a/b")),
            Err(BadgeError::UserNotFound("a/b".to_string()))
        );
    }

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag(Some("true")));
        assert!(parse_flag(Some("TRUE")));
        assert!(!parse_flag(Some("1")));
        assert!(!parse_flag(Some("yes")));
        assert!(!parse_flag(None));
        assert!(parse_flag_or(None, true));
        assert!(!parse_flag_or(Some("false"), true));
    }

    #[test]
    fn test_parse_date_range_years() {
        assert_eq!(parse_date_range_years(None), 1);
        assert_eq!(parse_date_range_years(Some("3")), 3);
        assert_eq!(parse_date_range_years(Some("0")), 1);
        assert_eq!(parse_date_range_years(Some("-2")), 1);
        assert_eq!(parse_date_range_years(Some("abc")), 1);
    }

    #[test]
    fn test_parse_langs_count() {
        assert_eq!(parse_langs_count(None), 6);
        assert_eq!(parse_langs_count(Some("4")), 4);
        assert_eq!(parse_langs_count(Some("0")), 1);
        assert_eq!(parse_langs_count(Some("25")), 10);
        assert_eq!(parse_langs_count(Some("many")), 6);
    }

    #[test]
    fn test_parse_list() {
        assert_eq!(parse_list(Some("stars, prs,,")), vec!["stars", "prs"]);
        assert!(parse_list(None).is_empty());
    }
}
