//! Jira HTTP client with rate limiting and retry.
//!
//! Wraps the Jira Server REST API v2, providing the operations the
//! workflows need: issue lookup, paginated JQL search, transition lookup
//! and execution, and field updates. Authentication is HTTP basic auth.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tokio::sync::Mutex;

use crate::adapters::error::ApiError;
use crate::adapters::rate_limiter::RateLimiter;
use crate::adapters::retry::RetryPolicy;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{
    find_transition, IssueKey, IssueSnapshot, Transition, TransitionRequest,
};
use crate::domain::ports::IssueTracker;

use super::models::{
    CommentUpdate, JiraIssue, SearchRequest, SearchResponse, TransitionId, TransitionPayload,
    TransitionsResponse, UpdatePayload,
};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);
const SEARCH_PATH: &str = "/rest/api/2/search";

/// Basic-auth credentials.
#[derive(Clone)]
pub struct JiraCredentials {
    pub username: String,
    pub password: String,
}

impl JiraCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for JiraCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JiraCredentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// HTTP client for the Jira REST API v2.
///
/// All port methods return [`DomainResult`]; HTTP failures become
/// [`DomainError::TrackerRequest`], 401/403 become
/// [`DomainError::Authentication`] and a 404 on an issue becomes
/// [`DomainError::IssueNotFound`].
#[derive(Debug, Clone)]
pub struct JiraClient {
    http: Client,
    base_url: String,
    credentials: JiraCredentials,
    page_size: u32,
    rate_limiter: Arc<Mutex<RateLimiter>>,
    retry: RetryPolicy,
}

impl JiraClient {
    /// Create a client for the server at `base_url`.
    pub fn new(base_url: &str, credentials: JiraCredentials) -> DomainResult<Self> {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| DomainError::TrackerRequest(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            credentials,
            page_size: 100,
            rate_limiter: Arc::new(Mutex::new(RateLimiter::new(
                "jira",
                100,
                Duration::from_secs(60),
            ))),
            retry: RetryPolicy::default(),
        })
    }

    #[must_use]
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    #[must_use]
    pub fn with_rate_limit(mut self, capacity: u32, window: Duration) -> Self {
        self.rate_limiter = Arc::new(Mutex::new(RateLimiter::new("jira", capacity, window)));
        self
    }

    #[must_use]
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Retries for a request. Search is sent as a POST but only reads.
    fn retry_for(&self, method: &Method, path: &str) -> RetryPolicy {
        if path == SEARCH_PATH {
            self.retry.clone()
        } else {
            self.retry.for_method(method)
        }
    }

    /// Send one request and return the raw body. Only repeatable requests
    /// are retried.
    async fn send(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&Value>,
    ) -> Result<String, ApiError> {
        let retry = self.retry_for(&method, path);
        let url = format!("{}{}", self.base_url, path);
        let url = &url;
        let method = &method;

        retry
            .execute(|| async move {
                self.rate_limiter.lock().await.acquire().await;

                let mut req = self
                    .http
                    .request(method.clone(), url)
                    .basic_auth(&self.credentials.username, Some(&self.credentials.password))
                    .header("Accept", "application/json");
                if !query.is_empty() {
                    req = req.query(query);
                }
                if let Some(body) = body {
                    req = req.json(body);
                }

                let resp = req.send().await?;
                let status = resp.status();
                let text = resp.text().await?;
                if status.is_success() {
                    Ok(text)
                } else {
                    Err(ApiError::Status { status, body: text })
                }
            })
            .await
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&Value>,
    ) -> Result<T, ApiError> {
        let text = self.send(method, path, query, body).await?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Resolve a transition name to its id for `key`.
    async fn transition_id(&self, key: &IssueKey, name: &str) -> DomainResult<String> {
        let available = self.transitions(key).await?;
        find_transition(&available, name)
            .map(|t| t.id.clone())
            .ok_or_else(|| DomainError::TransitionNotFound {
                key: key.to_string(),
                transition: name.to_string(),
            })
    }
}

/// Map an HTTP failure to a domain error.
fn tracker_error(operation: &str, err: ApiError) -> DomainError {
    match err.status() {
        Some(StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) => {
            DomainError::Authentication(format!("Jira {operation}: {err}"))
        }
        _ => DomainError::TrackerRequest(format!("Jira {operation}: {err}")),
    }
}

fn issue_path(key: &IssueKey) -> String {
    format!("/rest/api/2/issue/{key}")
}

#[async_trait]
impl IssueTracker for JiraClient {
    async fn get_issue(&self, key: &IssueKey, fields: &[String]) -> DomainResult<IssueSnapshot> {
        let query = if fields.is_empty() {
            vec![]
        } else {
            vec![("fields", fields.join(","))]
        };

        match self
            .send_json::<JiraIssue>(Method::GET, &issue_path(key), &query, None)
            .await
        {
            Ok(issue) => Ok(issue.into()),
            Err(err) if err.status() == Some(StatusCode::NOT_FOUND) => {
                Err(DomainError::IssueNotFound(key.to_string()))
            }
            Err(err) => Err(tracker_error("get_issue", err)),
        }
    }

    async fn search(&self, jql: &str, fields: &[String]) -> DomainResult<Vec<IssueSnapshot>> {
        let mut issues = Vec::new();
        let mut start_at = 0;

        loop {
            let body = serde_json::to_value(SearchRequest {
                jql,
                start_at,
                max_results: self.page_size,
                fields,
            })?;
            let page: SearchResponse = self
                .send_json(Method::POST, SEARCH_PATH, &[], Some(&body))
                .await
                .map_err(|e| tracker_error("search", e))?;

            let received = u32::try_from(page.issues.len()).unwrap_or(u32::MAX);
            tracing::debug!(
                start_at,
                received,
                total = page.total,
                "Jira: search page received"
            );
            issues.extend(page.issues.into_iter().map(IssueSnapshot::from));

            start_at = start_at.saturating_add(received);
            if received == 0 || start_at >= page.total {
                break;
            }
        }

        Ok(issues)
    }

    async fn transitions(&self, key: &IssueKey) -> DomainResult<Vec<Transition>> {
        let path = format!("{}/transitions", issue_path(key));
        let resp: TransitionsResponse = self
            .send_json(Method::GET, &path, &[], None)
            .await
            .map_err(|e| tracker_error("transitions", e))?;
        Ok(resp.transitions.into_iter().map(Transition::from).collect())
    }

    async fn transition(&self, key: &IssueKey, request: &TransitionRequest) -> DomainResult<()> {
        let id = self.transition_id(key, &request.transition).await?;

        let body = serde_json::to_value(TransitionPayload {
            transition: TransitionId { id: &id },
            fields: request.fields.as_ref(),
            update: request.comment.as_deref().map(CommentUpdate::add),
        })?;

        let path = format!("{}/transitions", issue_path(key));
        self.send(Method::POST, &path, &[], Some(&body))
            .await
            .map_err(|e| tracker_error("transition", e))?;

        tracing::info!(
            issue = %key,
            transition = %request.transition,
            transition_id = %id,
            "Jira: issue transitioned"
        );
        Ok(())
    }

    async fn update_fields(&self, key: &IssueKey, fields: &Map<String, Value>) -> DomainResult<()> {
        let body = serde_json::to_value(UpdatePayload { fields })?;
        self.send(Method::PUT, &issue_path(key), &[], Some(&body))
            .await
            .map_err(|e| tracker_error("update_fields", e))?;

        tracing::info!(issue = %key, field_count = fields.len(), "Jira: fields updated");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_trims_trailing_slash() {
        let client =
            JiraClient::new("https://jira.example.com/", JiraCredentials::new("u", "p")).unwrap();
        assert_eq!(client.base_url(), "https://jira.example.com");
    }

    #[test]
    fn test_credentials_debug_hides_password() {
        let creds = JiraCredentials::new("ops", "hunter2");
        let debug = format!("{creds:?}");
        assert!(debug.contains("ops"));
        assert!(!debug.contains("hunter2"));
    }

    #[test]
    fn test_page_size_is_at_least_one() {
        let client = JiraClient::new("https://jira.example.com", JiraCredentials::new("u", "p"))
            .unwrap()
            .with_page_size(0);
        assert_eq!(client.page_size, 1);
    }

    #[test]
    fn test_tracker_error_maps_auth_failures() {
        let err = tracker_error(
            "search",
            ApiError::Status {
                status: StatusCode::UNAUTHORIZED,
                body: String::new(),
            },
        );
        assert!(matches!(err, DomainError::Authentication(_)));

        let err = tracker_error("search", ApiError::Network("reset".into()));
        assert!(matches!(err, DomainError::TrackerRequest(_)));
    }
}
