//! `config` commands.

use std::path::Path;

use anyhow::Result;
use clap::{Args, Subcommand};
use serde::Serialize;

use crate::cli::context::load_config;
use crate::cli::output::{output, CommandOutput};
use crate::domain::models::Config;

const REDACTED: &str = "[REDACTED]";

#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print the effective configuration with secrets redacted
    Show,
}

#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct ConfigOutput(pub Config);

impl ConfigOutput {
    pub fn redacted(mut config: Config) -> Self {
        if config.jira.password.is_some() {
            config.jira.password = Some(REDACTED.to_string());
        }
        Self(config)
    }
}

impl CommandOutput for ConfigOutput {
    fn to_human(&self) -> String {
        render_human(&self.0)
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

/// YAML when it serializes, pretty JSON otherwise, the error as a last resort.
fn render_human<T: Serialize>(value: &T) -> String {
    match serde_yaml::to_string(value) {
        Ok(yaml) => yaml,
        Err(yaml_err) => {
            tracing::warn!(error = %yaml_err, "YAML rendering failed, falling back to JSON");
            serde_json::to_string_pretty(value)
                .unwrap_or_else(|_| format!("failed to render configuration: {yaml_err}"))
        }
    }
}

pub fn execute(args: &ConfigArgs, config_path: Option<&Path>, json_mode: bool) -> Result<()> {
    match args.command {
        ConfigCommands::Show => {
            let config = load_config(config_path)?;
            output(&ConfigOutput::redacted(config), json_mode);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_is_redacted() {
        let mut config = Config::default();
        config.jira.username = Some("ops".to_string());
        config.jira.password = Some("hunter2".to_string());

        let out = ConfigOutput::redacted(config);
        let human = out.to_human();
        assert!(human.contains("ops"));
        assert!(!human.contains("hunter2"));
        assert_eq!(out.to_json()["jira"]["password"], REDACTED);
    }

    #[test]
    fn test_missing_password_stays_empty() {
        let out = ConfigOutput::redacted(Config::default());
        assert!(out.to_json()["jira"]["password"].is_null());
    }

    struct Unrenderable;

    impl Serialize for Unrenderable {
        fn serialize<S: serde::Serializer>(&self, _: S) -> Result<S::Ok, S::Error> {
            Err(serde::ser::Error::custom("no representation"))
        }
    }

    #[test]
    fn test_render_failure_is_reported() {
        let human = render_human(&Unrenderable);
        assert!(human.starts_with("failed to render configuration"));
        assert!(human.contains("no representation"));
    }
}
