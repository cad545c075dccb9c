//! `lead-collection` and `not-touch` commands.

use std::path::Path;

use anyhow::{bail, Context, Result};
use chrono::Local;
use clap::Args;
use colored::Colorize;
use serde::Serialize;

use crate::cli::commands::validate::render_report;
use crate::cli::context::{load_config, AppContext};
use crate::cli::display::{check_mark, cross_mark, list_table};
use crate::cli::output::progress::create_spinner_with_message;
use crate::cli::output::{output, CommandOutput};
use crate::cli::prompt;
use crate::services::{SyncReport, Workflow};

#[derive(Args, Debug)]
pub struct SyncArgs {
    /// Manual assign date, e.g. "aban 1403"; prompted for when omitted
    #[arg(short, long)]
    pub month: Option<String>,

    /// Show queries and matches without transitioning or logging
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct SyncOutput(pub SyncReport);

impl CommandOutput for SyncOutput {
    fn to_human(&self) -> String {
        let report = &self.0;
        let mode = if report.dry_run { " (dry run)" } else { "" };
        let mut lines = vec![
            format!(
                "{}{mode}: assign month {}",
                capitalize(report.workflow.label()).bold(),
                report.assign_month
            ),
            render_report(&report.validation),
        ];

        if let Some(reason) = &report.stopped {
            lines.push(format!("Stopped: {reason}."));
            return lines.join("\n");
        }

        let keys: Vec<&str> = report.keys.iter().map(|k| k.as_str()).collect();
        lines.push(format!("Processing {} key(s): {}", keys.len(), keys.join(", ")));
        lines.push(String::new());

        let mut table = list_table(&["step", "matched", "transitioned", "failed"]);
        for step in &report.steps {
            let matched = match &step.search_error {
                Some(_) => "search failed".red().to_string(),
                None => step.matched.len().to_string(),
            };
            table.add_row(vec![
                step.label.clone(),
                matched,
                step.succeeded.len().to_string(),
                step.failed.len().to_string(),
            ]);
        }
        lines.push(table.to_string());

        if report.dry_run {
            for step in &report.steps {
                lines.push(String::new());
                lines.push(format!("{}", step.label.bold()));
                lines.push(format!("  JQL: {}", step.jql));
                if !step.matched.is_empty() {
                    lines.push(format!("  Matches: {}", step.matched.join(", ")));
                }
                if let Some(fields) = &step.fields {
                    for (id, value) in fields {
                        let shown = value
                            .get("value")
                            .and_then(|v| v.as_str())
                            .map_or_else(|| value.to_string(), ToString::to_string);
                        lines.push(format!("  {id} = {shown}"));
                    }
                }
            }
        }

        for step in &report.steps {
            if let Some(error) = &step.search_error {
                lines.push(format!("{} {}: {error}", cross_mark(), step.label));
            }
            for failed in &step.failed {
                lines.push(format!("{} {}: {}", cross_mark(), failed.key, failed.error));
            }
        }

        lines.push(String::new());
        match (&report.worksheet, report.dry_run, &report.log_error) {
            (Some(sheet), true, _) => {
                lines.push(format!("Would log to worksheet '{sheet}'."));
            }
            (Some(sheet), false, None) => lines.push(format!(
                "{} {} transitioned, {} failed, {} row(s) logged to '{sheet}'.",
                check_mark(),
                report.transitioned(),
                report.failed(),
                report.logged
            )),
            (Some(sheet), false, Some(error)) => lines.push(format!(
                "{} logging to '{sheet}' failed: {error}",
                cross_mark()
            )),
            (None, _, _) => {}
        }
        lines.join("\n")
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub async fn execute(
    workflow: Workflow,
    args: SyncArgs,
    config_path: Option<&Path>,
    json_mode: bool,
) -> Result<()> {
    let config = load_config(config_path)?;
    let month = prompt::assign_month(args.month.as_deref())?;
    let context = AppContext::connect(config)?;
    let service = context.sync_service();

    let spinner = create_spinner_with_message(
        format!("Running {} workflow...", workflow.label()),
        json_mode,
    );
    let report = match workflow {
        Workflow::LeadCollection => service.run_lead_collection(&month, args.dry_run).await,
        Workflow::NotTouch => {
            service
                .run_not_touch(&month, args.dry_run, Local::now().date_naive())
                .await
        }
    }
    .with_context(|| format!("{} workflow failed", workflow.label()));
    spinner.finish_and_clear();

    let report = report?;
    let log_error = report.log_error.clone();
    output(&SyncOutput(report), json_mode);

    if let Some(error) = log_error {
        bail!("issues were transitioned but could not be logged: {error}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("lead collection"), "Lead collection");
        assert_eq!(capitalize(""), "");
    }
}
