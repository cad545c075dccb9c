//! Wiring of configuration into clients and services for one command.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::adapters::jira::{JiraClient, JiraCredentials};
use crate::adapters::retry::RetryPolicy;
use crate::adapters::sheets::{ServiceAccountKey, SheetsClient, TokenProvider, SHEETS_SCOPES};
use crate::cli::prompt;
use crate::domain::models::Config;
use crate::infrastructure::config::ConfigLoader;
use crate::services::{SyncService, ValidationService};

/// Load the effective configuration.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    ConfigLoader::load_with(path)
}

/// Live clients for a command that talks to both systems.
pub struct AppContext {
    pub config: Arc<Config>,
    pub jira: Arc<JiraClient>,
    pub sheets: Arc<SheetsClient>,
}

impl AppContext {
    /// Build both clients. Prompts for Jira credentials that are not
    /// configured.
    pub fn connect(config: Config) -> Result<Self> {
        let sheets = sheets_client(&config)?;
        let credentials = prompt::jira_credentials(&config.jira)?;
        let jira = jira_client(&config, credentials)?;
        Ok(Self {
            config: Arc::new(config),
            jira: Arc::new(jira),
            sheets: Arc::new(sheets),
        })
    }

    pub fn validation_service(&self) -> ValidationService<JiraClient, SheetsClient> {
        ValidationService::new(
            Arc::clone(&self.jira),
            Arc::clone(&self.sheets),
            Arc::clone(&self.config),
        )
    }

    pub fn sync_service(&self) -> SyncService<JiraClient, SheetsClient> {
        SyncService::new(
            Arc::clone(&self.jira),
            Arc::clone(&self.sheets),
            Arc::clone(&self.config),
        )
    }
}

fn retry_policy(config: &Config) -> RetryPolicy {
    RetryPolicy::from(&config.retry)
}

pub fn jira_client(config: &Config, credentials: JiraCredentials) -> Result<JiraClient> {
    let client = JiraClient::new(&config.jira.host, credentials)
        .context("failed to create Jira client")?
        .with_page_size(config.jira.page_size)
        .with_rate_limit(
            config.rate_limit.requests_per_window,
            Duration::from_secs(config.rate_limit.window_secs),
        )
        .with_retry_policy(retry_policy(config));
    Ok(client)
}

pub fn sheets_client(config: &Config) -> Result<SheetsClient> {
    let path = &config.sheets.credentials_path;
    let key = ServiceAccountKey::from_file(path)
        .with_context(|| format!("failed to load Google credentials from {}", path.display()))?;
    let auth = TokenProvider::new(key, &SHEETS_SCOPES).context("invalid Google credentials")?;
    tracing::debug!(client_email = auth.client_email(), "Google service account loaded");

    let client = SheetsClient::new(auth)
        .context("failed to create Sheets client")?
        .with_base_urls(&config.sheets.sheets_base_url, &config.sheets.drive_base_url)
        .with_retry_policy(retry_policy(config));
    Ok(client)
}
