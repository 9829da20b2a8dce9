use chrono::{DateTime, Datelike, NaiveDate, SecondsFormat, Utc};
use futures_util::future::join_all;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

use crate::errors::BadgeError;
use crate::models::ContributionDay;
use crate::services::github::GitHubTransport;

/// GitHub limits a contributions collection to one year, so the history is
/// requested one calendar year at a time.
const CONTRIBUTION_CALENDAR_QUERY: &str = r#"
    query($username: String!, $from: DateTime!, $to: DateTime!) {
        user(login: $username) {
            contributionsCollection(from: $from, to: $to) {
                contributionCalendar {
                    totalContributions
                    weeks {
                        contributionDays {
                            date
                            contributionCount
                        }
                    }
                }
            }
        }
    }
"#;

/// Requested time range for one year of contributions
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct YearWindow {
    pub year: i32,
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

/// Windows from `start_year` through the year of `now`.
/// Past years cover Jan 1 to Dec 31; the current year stops at `now`.
pub fn year_windows(start_year: i32, now: DateTime<Utc>) -> Vec<YearWindow> {
    let current_year = now.year();

    (start_year.min(current_year)..=current_year)
        .filter_map(|year| {
            let from = NaiveDate::from_ymd_opt(year, 1, 1)?
                .and_hms_opt(0, 0, 0)?
                .and_utc();
            let to = if year == current_year {
                now
            } else {
                NaiveDate::from_ymd_opt(year, 12, 31)?
                    .and_hms_opt(23, 59, 59)?
                    .and_utc()
            };
            Some(YearWindow { year, from, to })
        })
        .collect()
}

pub struct ContributionFetcher {
    transport: Arc<dyn GitHubTransport>,
    start_year: i32,
}

impl ContributionFetcher {
    pub fn new(transport: Arc<dyn GitHubTransport>, start_year: i32) -> Self {
        Self {
            transport,
            start_year,
        }
    }

    pub fn start_year(&self) -> i32 {
        self.start_year
    }

    /// Fetch every year's calendar concurrently and return one flat day list per year,
    /// in ascending year order.
    pub async fn fetch_yearly(
        &self,
        username: &str,
        now: DateTime<Utc>,
    ) -> Result<Vec<Vec<ContributionDay>>, BadgeError> {
        let windows = year_windows(self.start_year, now);

        log::info!(
            "📥 Fetching contribution calendars for {} ({} years: {}..={})",
            username,
            windows.len(),
            windows.first().map(|w| w.year).unwrap_or_default(),
            now.year()
        );

        let results = join_all(
            windows
                .iter()
                .map(|window| self.fetch_year(username, window)),
        )
        .await;

        let years = collect_year_results(results)?;

        let day_count: usize = years.iter().map(Vec::len).sum();
        log::info!("📊 Collected {} calendar days for {}", day_count, username);

        Ok(years)
    }

    async fn fetch_year(
        &self,
        username: &str,
        window: &YearWindow,
    ) -> Result<Vec<ContributionDay>, BadgeError> {
        let variables = json!({
            "username": username,
            "from": window.from.to_rfc3339_opts(SecondsFormat::Secs, true),
            "to": window.to.to_rfc3339_opts(SecondsFormat::Secs, true),
        });

        let body = self
            .transport
            .graphql(CONTRIBUTION_CALENDAR_QUERY, variables)
            .await
            .map_err(|e| {
                log::error!("Contribution query for {} ({}) failed: {}", username, window.year, e);
                BadgeError::UpstreamUnavailable(e.to_string())
            })?;

        parse_calendar(username, body)
    }
}

/// Join per-year outcomes. A missing user in any year wins over other failures.
fn collect_year_results(
    results: Vec<Result<Vec<ContributionDay>, BadgeError>>,
) -> Result<Vec<Vec<ContributionDay>>, BadgeError> {
    let mut years = Vec::with_capacity(results.len());
    let mut first_failure = None;

    for result in results {
        match result {
            Ok(days) => years.push(days),
            Err(e @ BadgeError::UserNotFound(_)) => return Err(e),
            Err(e) => {
                first_failure.get_or_insert(e);
            }
        }
    }

    match first_failure {
        Some(e) => Err(e),
        None => Ok(years),
    }
}

/// Flatten a calendar response's weeks into days
fn parse_calendar(
    username: &str,
    body: serde_json::Value,
) -> Result<Vec<ContributionDay>, BadgeError> {
    let response: CalendarResponse = serde_json::from_value(body)
        .map_err(|e| BadgeError::UpstreamUnavailable(format!("Invalid calendar response: {}", e)))?;

    if let Some(errors) = response.errors.filter(|errors| !errors.is_empty()) {
        if errors
            .iter()
            .any(|e| e.error_type.as_deref() == Some("NOT_FOUND"))
        {
            return Err(BadgeError::UserNotFound(username.to_string()));
        }
        let messages: Vec<&str> = errors.iter().map(|e| e.message.as_str()).collect();
        return Err(BadgeError::UpstreamUnavailable(format!(
            "GitHub GraphQL errors: {}",
            messages.join("; ")
        )));
    }

    let data = response
        .data
        .ok_or_else(|| BadgeError::UpstreamUnavailable("No data in GitHub response".to_string()))?;

    let user = data
        .user
        .ok_or_else(|| BadgeError::UserNotFound(username.to_string()))?;

    Ok(user
        .contributions_collection
        .contribution_calendar
        .weeks
        .into_iter()
        .flat_map(|week| week.contribution_days)
        .map(|day| ContributionDay::new(day.date, day.contribution_count))
        .collect())
}

// GitHub GraphQL response types

#[derive(Debug, Deserialize)]
struct CalendarResponse {
    data: Option<CalendarData>,
    errors: Option<Vec<GraphQLError>>,
}

#[derive(Debug, Deserialize)]
struct GraphQLError {
    #[serde(rename = "type")]
    error_type: Option<String>,
    message: String,
}

#[derive(Debug, Deserialize)]
struct CalendarData {
    user: Option<CalendarUser>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CalendarUser {
    contributions_collection: ContributionsCollection,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ContributionsCollection {
    contribution_calendar: ContributionCalendar,
}

#[derive(Debug, Deserialize)]
struct ContributionCalendar {
    weeks: Vec<CalendarWeek>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CalendarWeek {
    contribution_days: Vec<CalendarDay>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CalendarDay {
    date: NaiveDate,
    contribution_count: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::github::fake::{
        calendar_response, missing_user_response, requested_year, FakeTransport,
    };
    use crate::services::github::TransportError;
    use async_trait::async_trait;
    use chrono::TimeZone;
    use std::time::Duration;
    use tokio::sync::Barrier;
    use tokio::time::timeout;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 13, 45, 0).unwrap()
    }

    #[test]
    fn test_year_windows() {
        let windows = year_windows(2022, now());

        assert_eq!(windows.len(), 3);
        assert_eq!(windows[0].year, 2022);
        assert_eq!(windows[0].from, Utc.with_ymd_and_hms(2022, 1, 1, 0, 0, 0).unwrap());
        assert_eq!(windows[0].to, Utc.with_ymd_and_hms(2022, 12, 31, 23, 59, 59).unwrap());
        // Current year stops at the current instant, not at end of day
        assert_eq!(windows[2].year, 2024);
        assert_eq!(windows[2].to, now());
    }

    #[test]
    fn test_year_windows_future_start_year() {
        let windows = year_windows(2030, now());
        assert_eq!(windows.len(), 1);
        assert_eq!(windows[0].year, 2024);
    }

    #[tokio::test]
    async fn test_fetch_yearly_flattens_each_year() {
        let transport = Arc::new(FakeTransport::new().with_graphql(|vars| {
            assert_eq!(vars["username"], "octocat");
            let year = requested_year(vars);
            Ok(calendar_response(&[
                (date(year, 1, 1), 1),
                (date(year, 1, 2), 0),
                (date(year, 3, 5), 4),
            ]))
        }));
        let fetcher = ContributionFetcher::new(transport.clone(), 2023);

        let years = fetcher.fetch_yearly("octocat", now()).await.unwrap();

        assert_eq!(transport.graphql_calls(), 2);
        assert_eq!(years.len(), 2);
        assert_eq!(years[0][0], ContributionDay::new(date(2023, 1, 1), 1));
        assert_eq!(years[1][2], ContributionDay::new(date(2024, 3, 5), 4));
    }

    #[test]
    fn test_calendar_split_across_weeks() {
        let days: Vec<(NaiveDate, u32)> = (1..=10).map(|d| (date(2024, 1, d), d)).collect();
        let body = calendar_response(&days);

        let parsed = parse_calendar("octocat", body).unwrap();

        assert_eq!(parsed.len(), 10);
        assert_eq!(parsed[9], ContributionDay::new(date(2024, 1, 10), 10));
    }

    #[tokio::test]
    async fn test_missing_user_in_any_year_fails() {
        let transport = Arc::new(FakeTransport::new().with_graphql(|vars| {
            match requested_year(vars) {
                2022 => Err(TransportError::Network("reset by peer".into())),
                2023 => Ok(missing_user_response()),
                year => Ok(calendar_response(&[(date(year, 1, 1), 1)])),
            }
        }));
        let fetcher = ContributionFetcher::new(transport, 2022);

        let err = fetcher.fetch_yearly("ghost", now()).await.unwrap_err();

        assert_eq!(err, BadgeError::UserNotFound("ghost".into()));
    }

    /// Holds every GraphQL call until all years have been requested
    struct BarrierTransport {
        barrier: Barrier,
    }

    #[async_trait]
    impl GitHubTransport for BarrierTransport {
        async fn graphql(
            &self,
            _query: &str,
            variables: serde_json::Value,
        ) -> Result<serde_json::Value, TransportError> {
            self.barrier.wait().await;
            let year = requested_year(&variables);
            Ok(calendar_response(&[(date(year, 2, 1), 2)]))
        }

        async fn get(
            &self,
            _path: &str,
            _params: &[(&str, String)],
            _accept: Option<&str>,
        ) -> Result<serde_json::Value, TransportError> {
            Err(TransportError::NotFound)
        }
    }

    #[tokio::test]
    async fn test_years_are_requested_concurrently() {
        let transport = Arc::new(BarrierTransport {
            barrier: Barrier::new(5),
        });
        let fetcher = ContributionFetcher::new(transport, 2020);

        let years = timeout(Duration::from_secs(3), fetcher.fetch_yearly("octocat", now()))
            .await
            .expect("year queries were not in flight together")
            .unwrap();

        assert_eq!(years.len(), 5);
        assert_eq!(years[0][0], ContributionDay::new(date(2020, 2, 1), 2));
        assert_eq!(years[4][0], ContributionDay::new(date(2024, 2, 1), 2));
    }

    #[test]
    fn test_null_user_without_errors_is_not_found() {
        let body = json!({ "data": { "user": null } });
        assert_eq!(
            parse_calendar("ghost", body).unwrap_err(),
            BadgeError::UserNotFound("ghost".into())
        );
    }

    #[tokio::test]
    async fn test_network_failure_is_upstream_unavailable() {
        let transport = Arc::new(
            FakeTransport::new()
                .with_graphql(|_| Err(TransportError::Network("timed out".into()))),
        );
        let fetcher = ContributionFetcher::new(transport.clone(), 2024);

        let err = fetcher.fetch_yearly("octocat", now()).await.unwrap_err();

        assert!(matches!(err, BadgeError::UpstreamUnavailable(_)));
        // No retries
        assert_eq!(transport.graphql_calls(), 1);
    }

    #[test]
    fn test_graphql_errors_and_malformed_bodies() {
        let rate_limited = json!({
            "data": null,
            "errors": [{ "type": "RATE_LIMITED", "message": "API rate limit exceeded" }]
        });
        assert!(matches!(
            parse_calendar("octocat", rate_limited),
            Err(BadgeError::UpstreamUnavailable(msg)) if msg.contains("rate limit")
        ));

        let malformed = json!({ "data": { "user": { "contributionsCollection": {} } } });
        assert!(matches!(
            parse_calendar("octocat", malformed),
            Err(BadgeError::UpstreamUnavailable(_))
        ));
    }
}
