//! Common test utilities for integration tests
//!
//! In-memory implementations of the tracker and spreadsheet ports, plus a
//! configuration builder pointing at them.

#![allow(dead_code)]

use std::collections::HashMap;
use std::io::Write;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{json, Map, Value};
use tempfile::NamedTempFile;

use lpo_sync::domain::errors::{DomainError, DomainResult};
use lpo_sync::domain::models::{
    Config, IssueKey, IssueSnapshot, SpreadsheetHandle, Transition, TransitionRequest,
    WorksheetRef,
};
use lpo_sync::domain::ports::{IssueTracker, SpreadsheetService};

pub const TEHRAN: &str = "تهران";
pub const KARAJ: &str = "کرج";

type JqlMatcher = Box<dyn Fn(&str) -> bool + Send + Sync>;

struct SearchRule {
    matches: JqlMatcher,
    result: Result<Vec<String>, String>,
}

/// Issue tracker backed by maps. Searches are answered by the first
/// registered rule whose matcher accepts the JQL; unmatched searches
/// return nothing.
#[derive(Default)]
pub struct FakeTracker {
    issues: HashMap<String, IssueSnapshot>,
    search_rules: Vec<SearchRule>,
    failing_issues: Vec<String>,
    failing_transitions: Vec<String>,
    failing_updates: Vec<String>,
    pub searches: Mutex<Vec<String>>,
    pub transitioned: Mutex<Vec<(String, TransitionRequest)>>,
    pub updated: Mutex<Vec<(String, Map<String, Value>)>>,
}

impl FakeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an issue with its city and marketing-area values.
    pub fn with_issue(mut self, key: &str, city: Option<&str>, area: Option<&str>) -> Self {
        let fields = lpo_sync::domain::models::FieldsConfig::default();
        let snapshot = IssueSnapshot::new(key)
            .with_field(fields.city, city.map_or(Value::Null, |c| json!(c)))
            .with_field(
                fields.marketing_area,
                area.map_or(Value::Null, |a| json!(a)),
            );
        self.issues.insert(key.to_string(), snapshot);
        self
    }

    pub fn failing_fetch(mut self, key: &str) -> Self {
        self.failing_issues.push(key.to_string());
        self
    }

    pub fn failing_transition(mut self, key: &str) -> Self {
        self.failing_transitions.push(key.to_string());
        self
    }

    pub fn failing_update(mut self, key: &str) -> Self {
        self.failing_updates.push(key.to_string());
        self
    }

    /// Answer searches whose JQL contains `needle`.
    pub fn search_containing(mut self, needle: &str, keys: &[&str]) -> Self {
        let needle = needle.to_string();
        self.search_rules.push(SearchRule {
            matches: Box::new(move |jql| jql.contains(&needle)),
            result: Ok(keys.iter().map(|k| (*k).to_string()).collect()),
        });
        self
    }

    /// Answer searches whose JQL has no city condition.
    pub fn search_without_city(mut self, keys: &[&str]) -> Self {
        self.search_rules.push(SearchRule {
            matches: Box::new(|jql| !jql.contains("City")),
            result: Ok(keys.iter().map(|k| (*k).to_string()).collect()),
        });
        self
    }

    /// Fail searches whose JQL contains `needle`.
    pub fn search_failing(mut self, needle: &str) -> Self {
        let needle = needle.to_string();
        self.search_rules.push(SearchRule {
            matches: Box::new(move |jql| jql.contains(&needle)),
            result: Err("search rejected".to_string()),
        });
        self
    }

    pub fn transitioned_keys(&self) -> Vec<(String, String)> {
        self.transitioned
            .lock()
            .unwrap()
            .iter()
            .map(|(key, req)| (key.clone(), req.transition.clone()))
            .collect()
    }
}

#[async_trait]
impl IssueTracker for FakeTracker {
    async fn get_issue(&self, key: &IssueKey, _fields: &[String]) -> DomainResult<IssueSnapshot> {
        if self.failing_issues.iter().any(|k| k == key.as_str()) {
            return Err(DomainError::TrackerRequest("connection reset".to_string()));
        }
        self.issues
            .get(key.as_str())
            .cloned()
            .ok_or_else(|| DomainError::IssueNotFound(key.to_string()))
    }

    async fn search(&self, jql: &str, _fields: &[String]) -> DomainResult<Vec<IssueSnapshot>> {
        self.searches.lock().unwrap().push(jql.to_string());
        match self.search_rules.iter().find(|rule| (rule.matches)(jql)) {
            Some(rule) => match &rule.result {
                Ok(keys) => Ok(keys.iter().map(IssueSnapshot::new).collect()),
                Err(msg) => Err(DomainError::TrackerRequest(msg.clone())),
            },
            None => Ok(Vec::new()),
        }
    }

    async fn transitions(&self, _key: &IssueKey) -> DomainResult<Vec<Transition>> {
        Ok(vec![
            Transition { id: "11".into(), name: "LC Pool".into() },
            Transition { id: "21".into(), name: "NVR Linked Issue".into() },
            Transition { id: "31".into(), name: "Return Admin Check".into() },
        ])
    }

    async fn transition(&self, key: &IssueKey, request: &TransitionRequest) -> DomainResult<()> {
        if self.failing_transitions.iter().any(|k| k == key.as_str()) {
            return Err(DomainError::TransitionNotFound {
                key: key.to_string(),
                transition: request.transition.clone(),
            });
        }
        self.transitioned
            .lock()
            .unwrap()
            .push((key.to_string(), request.clone()));
        Ok(())
    }

    async fn update_fields(&self, key: &IssueKey, fields: &Map<String, Value>) -> DomainResult<()> {
        if self.failing_updates.iter().any(|k| k == key.as_str()) {
            return Err(DomainError::TrackerRequest("field is read-only".to_string()));
        }
        self.updated
            .lock()
            .unwrap()
            .push((key.to_string(), fields.clone()));
        Ok(())
    }
}

/// Spreadsheet service backed by maps. Spreadsheet ids are ignored;
/// cells and columns are addressed by worksheet title.
#[derive(Default)]
pub struct FakeSheets {
    cells: HashMap<(String, u32, u32), String>,
    columns: HashMap<String, Vec<String>>,
    fail_appends: bool,
    pub spreadsheets_opened: Mutex<Vec<String>>,
    pub worksheets: Mutex<Vec<String>>,
    pub appended: Mutex<Vec<(String, Vec<String>)>>,
}

impl FakeSheets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cell(mut self, worksheet: &str, row: u32, column: u32, value: &str) -> Self {
        self.cells
            .insert((worksheet.to_string(), row, column), value.to_string());
        self
    }

    pub fn with_column(mut self, worksheet: &str, values: &[&str]) -> Self {
        self.columns.insert(
            worksheet.to_string(),
            values.iter().map(|v| (*v).to_string()).collect(),
        );
        self
    }

    pub fn with_worksheet(self, title: &str) -> Self {
        self.worksheets.lock().unwrap().push(title.to_string());
        self
    }

    pub fn failing_appends(mut self) -> Self {
        self.fail_appends = true;
        self
    }

    pub fn rows(&self, worksheet: &str) -> Vec<Vec<String>> {
        self.appended
            .lock()
            .unwrap()
            .iter()
            .filter(|(ws, _)| ws == worksheet)
            .map(|(_, row)| row.clone())
            .collect()
    }
}

#[async_trait]
impl SpreadsheetService for FakeSheets {
    async fn read_cell(
        &self,
        _spreadsheet_id: &str,
        worksheet: &str,
        row: u32,
        column: u32,
    ) -> DomainResult<Option<String>> {
        Ok(self
            .cells
            .get(&(worksheet.to_string(), row, column))
            .cloned())
    }

    async fn column_values(
        &self,
        _spreadsheet_id: &str,
        worksheet: &str,
        _column: u32,
    ) -> DomainResult<Vec<String>> {
        Ok(self.columns.get(worksheet).cloned().unwrap_or_default())
    }

    async fn open_or_create_spreadsheet(&self, title: &str) -> DomainResult<SpreadsheetHandle> {
        self.spreadsheets_opened
            .lock()
            .unwrap()
            .push(title.to_string());
        Ok(SpreadsheetHandle {
            id: "log-sheet".to_string(),
            title: title.to_string(),
            created: false,
        })
    }

    async fn find_worksheet(
        &self,
        _spreadsheet_id: &str,
        title: &str,
    ) -> DomainResult<Option<WorksheetRef>> {
        let worksheets = self.worksheets.lock().unwrap();
        Ok(worksheets
            .iter()
            .position(|ws| ws == title)
            .map(|index| WorksheetRef {
                sheet_id: index as i64,
                title: title.to_string(),
            }))
    }

    async fn add_worksheet(
        &self,
        _spreadsheet_id: &str,
        title: &str,
        _rows: u32,
        _columns: u32,
    ) -> DomainResult<WorksheetRef> {
        let mut worksheets = self.worksheets.lock().unwrap();
        worksheets.push(title.to_string());
        Ok(WorksheetRef {
            sheet_id: (worksheets.len() - 1) as i64,
            title: title.to_string(),
        })
    }

    async fn append_row(
        &self,
        _spreadsheet_id: &str,
        worksheet: &str,
        values: &[String],
    ) -> DomainResult<()> {
        if self.fail_appends {
            return Err(DomainError::SpreadsheetRequest("quota exceeded".to_string()));
        }
        self.appended
            .lock()
            .unwrap()
            .push((worksheet.to_string(), values.to_vec()));
        Ok(())
    }
}

/// Default configuration with a cities file on disk.
///
/// Keep the returned file alive for as long as the config is used.
pub fn test_config(two_part_cities: &[&str]) -> (Config, NamedTempFile) {
    let mut file = NamedTempFile::new().expect("Failed to create cities file");
    let body = json!({ "cities_with_two_parts": two_part_cities });
    write!(file, "{body}").expect("Failed to write cities file");

    let mut config = Config::default();
    config.cities.two_part_cities_path = file.path().to_path_buf();
    config.jira.concurrency = 2;
    (config, file)
}

pub fn shared<T>(value: T) -> Arc<T> {
    Arc::new(value)
}
