//! Jira REST API v2 request and response models.
//!
//! Only the payload shapes used by the client are modelled; issue fields
//! stay as raw JSON because custom fields vary per instance.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::models::{IssueSnapshot, Transition};

/// Body of `POST /rest/api/2/search`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest<'a> {
    pub jql: &'a str,
    pub start_at: u32,
    pub max_results: u32,
    pub fields: &'a [String],
}

/// One page of search results.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    #[serde(default)]
    pub start_at: u32,
    #[serde(default)]
    pub max_results: u32,
    #[serde(default)]
    pub total: u32,
    #[serde(default)]
    pub issues: Vec<JiraIssue>,
}

/// An issue as returned by the issue and search endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct JiraIssue {
    pub key: String,
    #[serde(default)]
    pub fields: Map<String, Value>,
}

impl From<JiraIssue> for IssueSnapshot {
    fn from(issue: JiraIssue) -> Self {
        Self {
            key: issue.key,
            fields: issue.fields,
        }
    }
}

/// Response of `GET /rest/api/2/issue/{key}/transitions`.
#[derive(Debug, Clone, Deserialize)]
pub struct TransitionsResponse {
    #[serde(default)]
    pub transitions: Vec<JiraTransition>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JiraTransition {
    pub id: String,
    pub name: String,
}

impl From<JiraTransition> for Transition {
    fn from(t: JiraTransition) -> Self {
        Self {
            id: t.id,
            name: t.name,
        }
    }
}

/// Body of `POST /rest/api/2/issue/{key}/transitions`.
#[derive(Debug, Clone, Serialize)]
pub struct TransitionPayload<'a> {
    pub transition: TransitionId<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<&'a Map<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub update: Option<CommentUpdate<'a>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TransitionId<'a> {
    pub id: &'a str,
}

/// `update.comment[].add.body`
#[derive(Debug, Clone, Serialize)]
pub struct CommentUpdate<'a> {
    pub comment: Vec<CommentOperation<'a>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CommentOperation<'a> {
    pub add: CommentBody<'a>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CommentBody<'a> {
    pub body: &'a str,
}

impl<'a> CommentUpdate<'a> {
    pub fn add(body: &'a str) -> Self {
        Self {
            comment: vec![CommentOperation {
                add: CommentBody { body },
            }],
        }
    }
}

/// Body of `PUT /rest/api/2/issue/{key}`.
#[derive(Debug, Clone, Serialize)]
pub struct UpdatePayload<'a> {
    pub fields: &'a Map<String, Value>,
}
