//! `validate` command: check dashboard candidates without changing anything.

use std::path::Path;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use serde::Serialize;

use crate::cli::context::{load_config, AppContext};
use crate::cli::display::{check_mark, colorize_outcome, cross_mark, list_table, render_list};
use crate::cli::output::progress::create_spinner_with_message;
use crate::cli::output::{output, truncate, CommandOutput};
use crate::services::{ValidationProfile, ValidationReport};

#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Which dashboard to validate
    #[arg(value_enum)]
    pub target: ValidateTarget,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValidateTarget {
    LeadCollection,
    NotTouch,
}

impl From<ValidateTarget> for ValidationProfile {
    fn from(target: ValidateTarget) -> Self {
        match target {
            ValidateTarget::LeadCollection => Self::LeadCollection,
            ValidateTarget::NotTouch => Self::NotTouch,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct ValidationOutput(pub ValidationReport);

/// Table of every candidate with its verdict.
pub fn render_report(report: &ValidationReport) -> String {
    if report.has_no_candidates() {
        return "No issue keys found inside parentheses in the selected cell.".to_string();
    }

    let mut table = list_table(&["", "key", "result", "reason"]);
    for key in &report.valid {
        table.add_row(vec![
            check_mark().to_string(),
            key.to_string(),
            colorize_outcome("valid").to_string(),
            String::new(),
        ]);
    }
    for invalid in &report.invalid {
        table.add_row(vec![
            cross_mark().to_string(),
            invalid.key.clone(),
            colorize_outcome("invalid").to_string(),
            truncate(&invalid.reason, 80),
        ]);
    }

    let mut lines = vec![
        format!("Validation ({})", report.profile.label()),
        render_list("candidate", &table, report.candidates.len()),
    ];
    if report.valid.is_empty() {
        lines.push("No valid issues found with correctly filled Marketing Area field.".to_string());
    } else {
        let keys: Vec<&str> = report.valid.iter().map(|k| k.as_str()).collect();
        lines.push(format!("Valid issue keys: {}", keys.join(" , ")));
    }
    lines.join("\n")
}

impl CommandOutput for ValidationOutput {
    fn to_human(&self) -> String {
        render_report(&self.0)
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub async fn execute(args: ValidateArgs, config_path: Option<&Path>, json_mode: bool) -> Result<()> {
    let config = load_config(config_path)?;
    let context = AppContext::connect(config)?;
    let profile = ValidationProfile::from(args.target);

    let spinner = create_spinner_with_message(
        format!("Validating {} candidates...", profile.label()),
        json_mode,
    );
    let report = context
        .validation_service()
        .validate(profile)
        .await
        .with_context(|| format!("{} validation failed", profile.label()));
    spinner.finish_and_clear();

    output(&ValidationOutput(report?), json_mode);
    Ok(())
}
