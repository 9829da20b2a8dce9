//! In-memory `GitHubTransport` used by service and handler tests.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::{GitHubTransport, TransportError};

type GraphqlHandler = Box<dyn Fn(&Value) -> Result<Value, TransportError> + Send + Sync>;

#[derive(Clone)]
enum RestReply {
    Json(Value),
    NotFound,
    Failure,
}

pub struct FakeTransport {
    graphql_handler: GraphqlHandler,
    routes: HashMap<String, RestReply>,
    graphql_calls: AtomicUsize,
    rest_calls: AtomicUsize,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self {
            graphql_handler: Box::new(|_| {
                Err(TransportError::Network("connection refused".into()))
            }),
            routes: HashMap::new(),
            graphql_calls: AtomicUsize::new(0),
            rest_calls: AtomicUsize::new(0),
        }
    }

    /// Answer GraphQL requests with `handler(variables)`
    pub fn with_graphql<F>(mut self, handler: F) -> Self
    where
        F: Fn(&Value) -> Result<Value, TransportError> + Send + Sync + 'static,
    {
        self.graphql_handler = Box::new(handler);
        self
    }

    /// Route keys are the path, or `path?q=<query>` for search endpoints
    pub fn with_route(mut self, key: &str, body: Value) -> Self {
        self.routes.insert(key.to_string(), RestReply::Json(body));
        self
    }

    pub fn with_not_found(mut self, key: &str) -> Self {
        self.routes.insert(key.to_string(), RestReply::NotFound);
        self
    }

    pub fn with_failure(mut self, key: &str) -> Self {
        self.routes.insert(key.to_string(), RestReply::Failure);
        self
    }

    pub fn graphql_calls(&self) -> usize {
        self.graphql_calls.load(Ordering::SeqCst)
    }

    pub fn rest_calls(&self) -> usize {
        self.rest_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl GitHubTransport for FakeTransport {
    async fn graphql(&self, _query: &str, variables: Value) -> Result<Value, TransportError> {
        self.graphql_calls.fetch_add(1, Ordering::SeqCst);
        (self.graphql_handler)(&variables)
    }

    async fn get(
        &self,
        path: &str,
        params: &[(&str, String)],
        _accept: Option<&str>,
    ) -> Result<Value, TransportError> {
        self.rest_calls.fetch_add(1, Ordering::SeqCst);

        let search_key = params
            .iter()
            .find(|(name, _)| *name == "q")
            .map(|(_, q)| format!("{}?q={}", path, q));

        let reply = search_key
            .and_then(|key| self.routes.get(&key))
            .or_else(|| self.routes.get(path))
            .cloned();

        match reply {
            Some(RestReply::Json(body)) => Ok(body),
            Some(RestReply::NotFound) => Err(TransportError::NotFound),
            Some(RestReply::Failure) | None => {
                Err(TransportError::Status(500, format!("no route for {}", path)))
            }
        }
    }
}

/// GraphQL body for a contribution calendar, split into weeks of seven days
pub fn calendar_response(days: &[(NaiveDate, u32)]) -> Value {
    let weeks: Vec<Value> = days
        .chunks(7)
        .map(|week| {
            let contribution_days: Vec<Value> = week
                .iter()
                .map(|(date, count)| {
                    json!({
                        "date": date.format("%Y-%m-%d").to_string(),
                        "contributionCount": count,
                    })
                })
                .collect();
            json!({ "contributionDays": contribution_days })
        })
        .collect();

    let total: u32 = days.iter().map(|(_, count)| count).sum();

    json!({
        "data": {
            "user": {
                "contributionsCollection": {
                    "contributionCalendar": {
                        "totalContributions": total,
                        "weeks": weeks,
                    }
                }
            }
        }
    })
}

/// GraphQL body GitHub returns for an unknown login
pub fn missing_user_response() -> Value {
    json!({
        "data": { "user": null },
        "errors": [{
            "type": "NOT_FOUND",
            "path": ["user"],
            "message": "Could not resolve to a User with the login of 'ghost'."
        }]
    })
}

/// Parse the `from` variable of a calendar query back into its year
pub fn requested_year(variables: &Value) -> i32 {
    variables["from"]
        .as_str()
        .and_then(|from| from.get(0..4))
        .and_then(|year| year.parse().ok())
        .unwrap_or_default()
}
