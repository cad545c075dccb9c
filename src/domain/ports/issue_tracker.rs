//! Issue tracker port.
//!
//! The workflows reach the tracker exclusively through this trait, which
//! keeps them testable without a live Jira server.

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::domain::errors::DomainResult;
use crate::domain::models::{IssueKey, IssueSnapshot, Transition, TransitionRequest};

/// Port for the issue tracking system.
#[async_trait]
pub trait IssueTracker: Send + Sync {
    /// Fetch one issue with the requested fields.
    async fn get_issue(&self, key: &IssueKey, fields: &[String]) -> DomainResult<IssueSnapshot>;

    /// Run a JQL search and return every matching issue (all pages).
    async fn search(&self, jql: &str, fields: &[String]) -> DomainResult<Vec<IssueSnapshot>>;

    /// List the transitions currently available on an issue.
    async fn transitions(&self, key: &IssueKey) -> DomainResult<Vec<Transition>>;

    /// Apply a transition, resolving its name to an id.
    async fn transition(&self, key: &IssueKey, request: &TransitionRequest) -> DomainResult<()>;

    /// Update fields without changing the workflow state.
    async fn update_fields(&self, key: &IssueKey, fields: &Map<String, Value>) -> DomainResult<()>;
}
