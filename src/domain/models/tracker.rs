//! Tracker-side value types shared by the port and its adapters.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A workflow transition available on an issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    pub id: String,
    pub name: String,
}

/// Find a transition by name, ignoring case.
pub fn find_transition<'a>(transitions: &'a [Transition], name: &str) -> Option<&'a Transition> {
    let wanted = name.to_lowercase();
    transitions.iter().find(|t| t.name.to_lowercase() == wanted)
}

/// A transition to apply, with optional field updates and comment.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TransitionRequest {
    pub transition: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<Map<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl TransitionRequest {
    pub fn new(transition: impl Into<String>) -> Self {
        Self {
            transition: transition.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_fields(mut self, fields: Map<String, Value>) -> Self {
        self.fields = Some(fields);
        self
    }

    #[must_use]
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }
}
