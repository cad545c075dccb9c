//! Bulk field update and transition workflows.
//!
//! Both workflows share the same shape: validate the dashboard candidates,
//! keep the keys of the configured project, run one search per routing
//! rule, transition every hit, and log the successful transitions to a
//! worksheet of the log spreadsheet. Individual issue failures are
//! recorded and skipped.

use std::sync::Arc;

use chrono::NaiveDate;
use futures::stream::{self, StreamExt};
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{info, info_span, warn, Instrument};

use crate::domain::errors::DomainResult;
use crate::domain::models::{
    build_field_plan, AssignMonth, CityGroup, Config, FieldMode, IssueKey, IssueKeyPattern,
    LogEntry, TransitionRequest,
};
use crate::domain::ports::{IssueTracker, SpreadsheetService};

use super::jql;
use super::sheet_log::{lead_collection_worksheet, not_touch_worksheet, SheetLog};
use super::validation::{ValidationProfile, ValidationReport, ValidationService};

/// The two synchronisation workflows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Workflow {
    LeadCollection,
    NotTouch,
}

impl Workflow {
    pub const fn label(self) -> &'static str {
        match self {
            Self::LeadCollection => "lead collection",
            Self::NotTouch => "not touch",
        }
    }

    const fn profile(self) -> ValidationProfile {
        match self {
            Self::LeadCollection => ValidationProfile::LeadCollection,
            Self::NotTouch => ValidationProfile::NotTouch,
        }
    }
}

/// One search-and-transition step of a run.
#[derive(Debug, Clone)]
struct StepPlan {
    label: String,
    group: Option<CityGroup>,
    jql: String,
    transition: String,
    comment: Option<String>,
    fields: Option<Map<String, Value>>,
    mode: FieldMode,
}

/// An issue the tracker refused to update or transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedIssue {
    pub key: String,
    pub error: String,
}

/// Result of one step.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepReport {
    pub label: String,
    pub group: Option<CityGroup>,
    pub jql: String,
    pub transition: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<Map<String, Value>>,
    pub matched: Vec<String>,
    pub succeeded: Vec<IssueKey>,
    pub failed: Vec<FailedIssue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_error: Option<String>,
}

/// Result of a whole run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SyncReport {
    pub workflow: Workflow,
    pub dry_run: bool,
    pub assign_month: String,
    pub validation: ValidationReport,
    /// Valid keys belonging to the configured project.
    pub keys: Vec<IssueKey>,
    pub steps: Vec<StepReport>,
    /// Why the run ended before any search, if it did.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stopped: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub worksheet: Option<String>,
    pub logged: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_error: Option<String>,
}

impl SyncReport {
    pub fn transitioned(&self) -> usize {
        self.steps.iter().map(|s| s.succeeded.len()).sum()
    }

    pub fn failed(&self) -> usize {
        self.steps.iter().map(|s| s.failed.len()).sum()
    }
}

/// Runs the lead-collection and not-touch workflows.
pub struct SyncService<T: IssueTracker, S: SpreadsheetService> {
    tracker: Arc<T>,
    config: Arc<Config>,
    validation: ValidationService<T, S>,
    sheet_log: SheetLog<S>,
}

impl<T: IssueTracker, S: SpreadsheetService> SyncService<T, S> {
    pub fn new(tracker: Arc<T>, sheets: Arc<S>, config: Arc<Config>) -> Self {
        let validation =
            ValidationService::new(Arc::clone(&tracker), Arc::clone(&sheets), Arc::clone(&config));
        let sheet_log = SheetLog::new(sheets, config.sheets.log_spreadsheet_title.clone());
        Self {
            tracker,
            config,
            validation,
            sheet_log,
        }
    }

    /// Move validated lead-collection issues to the pool, then link them.
    pub async fn run_lead_collection(
        &self,
        month: &AssignMonth,
        dry_run: bool,
    ) -> DomainResult<SyncReport> {
        let workflow = &self.config.workflows.lead_collection;
        let mut report = self.prepare(Workflow::LeadCollection, month, dry_run).await?;
        if report.stopped.is_some() {
            return Ok(report);
        }

        let mut plans = self.routing_plans(
            &report.keys,
            month,
            Some(workflow.excluded_status.as_str()),
            &workflow.pool_transition,
            &workflow.pool_comment,
            workflow.field_mode,
        );
        plans.push(StepPlan {
            label: format!("All keys → {}", workflow.linked_transition),
            group: None,
            jql: jql::issue_key_clause(&report.keys),
            transition: workflow.linked_transition.clone(),
            comment: Some(workflow.linked_comment.clone()),
            fields: None,
            mode: workflow.field_mode,
        });

        let title = lead_collection_worksheet(&workflow.worksheet_prefix, month);
        self.execute(&mut report, plans, title).await;
        Ok(report)
    }

    /// Update routed fields on validated not-touch issues and return them to
    /// admin check. The log worksheet is named after the Jalali month of
    /// `today`.
    pub async fn run_not_touch(
        &self,
        month: &AssignMonth,
        dry_run: bool,
        today: NaiveDate,
    ) -> DomainResult<SyncReport> {
        let workflow = &self.config.workflows.not_touch;
        let mut report = self.prepare(Workflow::NotTouch, month, dry_run).await?;
        if report.stopped.is_some() {
            return Ok(report);
        }

        let plans = self.routing_plans(
            &report.keys,
            month,
            None,
            &workflow.transition,
            &workflow.comment,
            workflow.field_mode,
        );

        let title = not_touch_worksheet(&workflow.worksheet_prefix, today);
        self.execute(&mut report, plans, title).await;
        Ok(report)
    }

    /// Validate and filter the candidates. Sets `stopped` when nothing is
    /// left to process.
    async fn prepare(
        &self,
        workflow: Workflow,
        month: &AssignMonth,
        dry_run: bool,
    ) -> DomainResult<SyncReport> {
        let validation = self.validation.validate(workflow.profile()).await?;
        let pattern = IssueKeyPattern::new(&self.config.jira.project_key)?;
        let keys = pattern.filter(validation.valid.iter().map(IssueKey::as_str));

        let stopped = if validation.has_no_candidates() {
            Some("no issue keys found inside parentheses in the dashboard cell".to_string())
        } else if validation.valid.is_empty() {
            Some("no valid issues found".to_string())
        } else if keys.is_empty() {
            Some(format!(
                "no valid issue keys match project {}",
                pattern.project()
            ))
        } else {
            None
        };
        if let Some(reason) = &stopped {
            warn!(workflow = workflow.label(), %reason, "nothing to process");
        }

        Ok(SyncReport {
            workflow,
            dry_run,
            assign_month: month.to_string(),
            validation,
            keys,
            steps: Vec::new(),
            stopped,
            worksheet: None,
            logged: 0,
            log_error: None,
        })
    }

    fn routing_plans(
        &self,
        keys: &[IssueKey],
        month: &AssignMonth,
        exclude_status: Option<&str>,
        transition: &str,
        comment: &str,
        mode: FieldMode,
    ) -> Vec<StepPlan> {
        let cities = &self.config.cities;
        build_field_plan(&self.config.fields, month)
            .into_iter()
            .map(|rule| StepPlan {
                label: format!("{} → {transition}", rule.group.label()),
                group: Some(rule.group),
                jql: jql::routing_query(
                    keys,
                    rule.group,
                    &cities.tehran,
                    &cities.suburbs,
                    exclude_status,
                ),
                transition: transition.to_string(),
                comment: Some(comment.to_string()),
                fields: Some(rule.fields),
                mode,
            })
            .collect()
    }

    async fn execute(&self, report: &mut SyncReport, plans: Vec<StepPlan>, worksheet: String) {
        let mut entries = Vec::new();
        for plan in plans {
            let span = info_span!("step", label = %plan.label);
            let step = self
                .run_step(plan, report.dry_run, &mut entries)
                .instrument(span)
                .await;
            report.steps.push(step);
        }

        info!(
            workflow = report.workflow.label(),
            transitioned = report.transitioned(),
            failed = report.failed(),
            dry_run = report.dry_run,
            "workflow steps finished"
        );

        if !report.dry_run {
            match self.write_log(&worksheet, &entries).await {
                Ok(logged) => report.logged = logged,
                Err(e) => {
                    warn!(%worksheet, error = %e, "failed to log processed issues");
                    report.log_error = Some(e.to_string());
                }
            }
        }
        report.worksheet = Some(worksheet);
    }

    async fn write_log(&self, title: &str, entries: &[LogEntry]) -> DomainResult<usize> {
        let target = self.sheet_log.ensure_worksheet(title).await?;
        self.sheet_log.append_entries(&target, entries).await
    }

    async fn run_step(
        &self,
        plan: StepPlan,
        dry_run: bool,
        entries: &mut Vec<LogEntry>,
    ) -> StepReport {
        let mut step = StepReport {
            label: plan.label.clone(),
            group: plan.group,
            jql: plan.jql.clone(),
            transition: plan.transition.clone(),
            fields: plan.fields.clone(),
            matched: Vec::new(),
            succeeded: Vec::new(),
            failed: Vec::new(),
            search_error: None,
        };

        let search_fields = vec![self.config.fields.city.clone()];
        let hits = match self.tracker.search(&plan.jql, &search_fields).await {
            Ok(hits) => hits,
            Err(e) => {
                warn!(jql = %plan.jql, error = %e, "search failed");
                step.search_error = Some(e.to_string());
                return step;
            }
        };
        step.matched = hits.into_iter().map(|issue| issue.key).collect();
        info!(jql = %plan.jql, matched = step.matched.len(), "search finished");

        if dry_run {
            return step;
        }

        let plan = &plan;
        let outcomes: Vec<(String, DomainResult<LogEntry>)> = stream::iter(step.matched.iter())
            .map(|raw| async move {
                let result = match IssueKey::parse(raw) {
                    Ok(key) => self.apply(&key, plan).await.map(|()| LogEntry::now(key)),
                    Err(e) => Err(e),
                };
                (raw.clone(), result)
            })
            .buffered(self.config.jira.concurrency.max(1))
            .collect()
            .await;

        for (raw, outcome) in outcomes {
            match outcome {
                Ok(entry) => {
                    step.succeeded.push(entry.key.clone());
                    entries.push(entry);
                }
                Err(e) => {
                    warn!(issue = %raw, transition = %plan.transition, error = %e, "issue skipped");
                    step.failed.push(FailedIssue {
                        key: raw,
                        error: e.to_string(),
                    });
                }
            }
        }
        step
    }

    /// Apply the plan's fields and transition to one issue.
    async fn apply(&self, key: &IssueKey, plan: &StepPlan) -> DomainResult<()> {
        let mut request = TransitionRequest::new(plan.transition.clone());
        if let Some(comment) = &plan.comment {
            request = request.with_comment(comment.clone());
        }
        if let Some(fields) = &plan.fields {
            match plan.mode {
                FieldMode::OnTransition => request = request.with_fields(fields.clone()),
                FieldMode::BeforeTransition => {
                    self.tracker.update_fields(key, fields).await?;
                }
            }
        }
        self.tracker.transition(key, &request).await
    }
}
