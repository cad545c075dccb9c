//! Interactive prompts for values not supplied on the command line.

use anyhow::{bail, Context, Result};
use colored::Colorize;
use dialoguer::{theme::ColorfulTheme, Input, Password};

use crate::adapters::jira::JiraCredentials;
use crate::domain::models::{AssignMonth, JiraConfig};

pub const INVALID_MONTH_MESSAGE: &str =
    "Invalid format! Please enter in the format 'month year' (e.g., aban 1403).";

fn ensure_interactive(what: &str) -> Result<()> {
    if !console::user_attended() {
        bail!("{what} is required but stdin is not a terminal; pass it explicitly");
    }
    Ok(())
}

/// Parse `--month`, or ask until a valid value is entered.
pub fn assign_month(arg: Option<&str>) -> Result<AssignMonth> {
    if let Some(raw) = arg {
        return AssignMonth::parse(raw).with_context(|| INVALID_MONTH_MESSAGE.to_string());
    }

    ensure_interactive("--month")?;
    let theme = ColorfulTheme::default();
    loop {
        let raw: String = Input::with_theme(&theme)
            .with_prompt("Enter Manual Assign Date (e.g., aban 1403)")
            .interact_text()?;
        match AssignMonth::parse(&raw) {
            Ok(month) => return Ok(month),
            Err(_) => eprintln!("{}", INVALID_MONTH_MESSAGE.yellow()),
        }
    }
}

/// Jira credentials from config or environment, prompting for what is missing.
pub fn jira_credentials(config: &JiraConfig) -> Result<JiraCredentials> {
    let theme = ColorfulTheme::default();

    let username = match config.username.as_deref().filter(|u| !u.is_empty()) {
        Some(username) => username.to_string(),
        None => {
            ensure_interactive("Jira username")?;
            Input::with_theme(&theme)
                .with_prompt(format!("Jira username for {}", config.host))
                .interact_text()?
        }
    };

    let password = match config.password.as_deref().filter(|p| !p.is_empty()) {
        Some(password) => password.to_string(),
        None => {
            ensure_interactive("Jira password")?;
            Password::with_theme(&theme)
                .with_prompt("Jira password")
                .interact()?
        }
    };

    Ok(JiraCredentials::new(username, password))
}
