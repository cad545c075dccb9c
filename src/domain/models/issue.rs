//! Issue keys and issue snapshots.
//!
//! Dashboard cells hold candidate keys wrapped in parentheses, e.g.
//! `Pending (NVR-1, NVR-2)`. The helpers here pull those candidates out
//! and recognise keys belonging to the configured project.

use std::collections::HashSet;
use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::domain::errors::{DomainError, DomainResult};

/// A tracker issue key such as `NVR-1234`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IssueKey(String);

impl IssueKey {
    /// Parse a key of the form `PROJECT-123`.
    pub fn parse(raw: &str) -> DomainResult<Self> {
        static KEY: OnceLock<Regex> = OnceLock::new();
        let re = KEY.get_or_init(|| Regex::new(r"^[A-Z][A-Z0-9_]*-\d+$").expect("static regex"));
        let trimmed = raw.trim();
        if re.is_match(trimmed) {
            Ok(Self(trimmed.to_string()))
        } else {
            Err(DomainError::ValidationFailed(format!(
                "'{raw}' is not an issue key"
            )))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IssueKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for IssueKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Which parenthesised groups of a dashboard cell carry candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellScope {
    /// Every `( ... )` group in the cell.
    All,
    /// Only the first `( ... )` group.
    First,
}

/// Extract candidate keys from a dashboard cell.
///
/// Each group's contents are split on commas and trimmed; empty entries are
/// dropped. A cell without parentheses yields no candidates.
pub fn extract_candidates(cell: &str, scope: CellScope) -> Vec<String> {
    static GROUP: OnceLock<Regex> = OnceLock::new();
    let re = GROUP.get_or_init(|| Regex::new(r"\((.*?)\)").expect("static regex"));

    let groups = re.captures_iter(cell).filter_map(|caps| caps.get(1));
    let groups: Vec<&str> = match scope {
        CellScope::All => groups.map(|m| m.as_str()).collect(),
        CellScope::First => groups.take(1).map(|m| m.as_str()).collect(),
    };

    groups
        .into_iter()
        .flat_map(|group| group.split(','))
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Matcher for the keys of a single project (`NVR-\d+`).
#[derive(Debug, Clone)]
pub struct IssueKeyPattern {
    project: String,
    regex: Regex,
}

impl IssueKeyPattern {
    pub fn new(project: &str) -> DomainResult<Self> {
        let project = project.trim();
        if project.is_empty() {
            return Err(DomainError::ValidationFailed(
                "project key cannot be empty".to_string(),
            ));
        }
        let regex = Regex::new(&format!(r"{}-\d+", regex::escape(project)))
            .map_err(|e| DomainError::ValidationFailed(format!("bad project key: {e}")))?;
        Ok(Self {
            project: project.to_string(),
            regex,
        })
    }

    pub fn project(&self) -> &str {
        &self.project
    }

    /// Every key occurrence in `text`, in order, without duplicates.
    pub fn find_all(&self, text: &str) -> Vec<IssueKey> {
        let mut seen = HashSet::new();
        self.regex
            .find_iter(text)
            .map(|m| m.as_str())
            .filter(|k| seen.insert(*k))
            .map(|k| IssueKey(k.to_string()))
            .collect()
    }

    /// Keys found in any of the candidates, in candidate order.
    pub fn filter<'a, I>(&self, candidates: I) -> Vec<IssueKey>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let joined = candidates.into_iter().collect::<Vec<_>>().join(" , ");
        self.find_all(&joined)
    }
}

/// The fields of one issue as returned by the tracker.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IssueSnapshot {
    pub key: String,
    #[serde(default)]
    pub fields: serde_json::Map<String, serde_json::Value>,
}

impl IssueSnapshot {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            fields: serde_json::Map::new(),
        }
    }

    pub fn with_field(mut self, id: impl Into<String>, value: serde_json::Value) -> Self {
        self.fields.insert(id.into(), value);
        self
    }

    /// Render a field as text.
    ///
    /// Plain strings are returned as is; select-list options
    /// (`{"value": "..."}`) yield their `value`. `null`, missing fields and
    /// other shapes yield `None`.
    pub fn text_field(&self, id: &str) -> Option<String> {
        match self.fields.get(id)? {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Object(obj) => obj
                .get("value")
                .and_then(serde_json::Value::as_str)
                .map(str::to_string),
            serde_json::Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_issue_key_parse() {
        assert_eq!(IssueKey::parse(" NVR-12 ").unwrap().as_str(), "NVR-12");
        assert!(IssueKey::parse("nvr-12").is_err());
        assert!(IssueKey::parse("NVR12").is_err());
    }

    #[test]
    fn test_extract_all_groups() {
        let cell = "Ready (NVR-1) and (NVR-2, NVR-3 )";
        assert_eq!(
            extract_candidates(cell, CellScope::All),
            vec!["NVR-1", "NVR-2", "NVR-3"]
        );
    }

    #[test]
    fn test_extract_first_group_only() {
        let cell = "(NVR-1, NVR-2) (NVR-9)";
        assert_eq!(
            extract_candidates(cell, CellScope::First),
            vec!["NVR-1", "NVR-2"]
        );
    }

    #[test]
    fn test_extract_without_parentheses() {
        assert!(extract_candidates("NVR-1, NVR-2", CellScope::All).is_empty());
        assert!(extract_candidates("()", CellScope::First).is_empty());
    }

    #[test]
    fn test_pattern_find_all_dedups() {
        let pattern = IssueKeyPattern::new("NVR").unwrap();
        let keys = pattern.find_all("NVR-1 , NVR-22 , ABC-3 , NVR-1");
        let keys: Vec<&str> = keys.iter().map(IssueKey::as_str).collect();
        assert_eq!(keys, vec!["NVR-1", "NVR-22"]);
    }

    #[test]
    fn test_pattern_filter_drops_foreign_keys() {
        let pattern = IssueKeyPattern::new("NVR").unwrap();
        let keys = pattern.filter(["OPS-4", "NVR-5"]);
        assert_eq!(keys, vec![IssueKey::parse("NVR-5").unwrap()]);
    }

    #[test]
    fn test_pattern_rejects_empty_project() {
        assert!(IssueKeyPattern::new("  ").is_err());
    }

    #[test]
    fn test_text_field_shapes() {
        let issue = IssueSnapshot::new("NVR-1")
            .with_field("customfield_10800", json!("تهران"))
            .with_field("customfield_20802", json!({"value": "شمال, ونک", "id": "1"}))
            .with_field("customfield_1", json!(null))
            .with_field("customfield_2", json!(["a"]));

        assert_eq!(issue.text_field("customfield_10800").as_deref(), Some("تهران"));
        assert_eq!(
            issue.text_field("customfield_20802").as_deref(),
            Some("شمال, ونک")
        );
        assert!(issue.text_field("customfield_1").is_none());
        assert!(issue.text_field("customfield_2").is_none());
        assert!(issue.text_field("missing").is_none());
    }
}
