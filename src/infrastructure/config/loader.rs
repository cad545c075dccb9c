use std::path::Path;

use anyhow::{Context, Result};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use thiserror::Error;

use crate::domain::models::config::{CellLocation, Config};

/// Project configuration file, relative to the working directory.
pub const PROJECT_CONFIG: &str = ".lpo/config.yaml";
/// Uncommitted local overrides.
pub const LOCAL_CONFIG: &str = ".lpo/local.yaml";
/// Prefix of environment overrides; `__` separates nested keys.
pub const ENV_PREFIX: &str = "LPO_";

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid Jira host: '{0}'. Must be an http(s) URL")]
    InvalidJiraHost(String),

    #[error("Jira project key cannot be empty")]
    EmptyProjectKey,

    #[error("Invalid page_size: {0}. Must be between 1 and 1000")]
    InvalidPageSize(u32),

    #[error("Invalid concurrency: {0}. Must be at least 1")]
    InvalidConcurrency(usize),

    #[error("Invalid rate limit: {0} requests per {1}s. Both must be positive")]
    InvalidRateLimit(u32, u64),

    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid log format: {0}. Must be one of: json, pretty")]
    InvalidLogFormat(String),

    #[error("Invalid log rotation: {0}. Must be one of: daily, hourly, never")]
    InvalidRotation(String),

    #[error("Invalid max_retries: {0}. Cannot be 0")]
    InvalidMaxRetries(u32),

    #[error(
        "Invalid backoff configuration: initial_backoff_ms ({0}) must be less than max_backoff_ms ({1})"
    )]
    InvalidBackoff(u64, u64),

    #[error("Invalid cell '{0}': spreadsheet id and worksheet must be set, row and column start at 1")]
    InvalidCell(&'static str),

    #[error("cities.suburbs must list at least one city and no blank entries")]
    EmptySuburbs,

    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. .lpo/config.yaml (project config)
    /// 3. .lpo/local.yaml (local overrides, optional)
    /// 4. Environment variables (LPO_* prefix, highest priority)
    pub fn load() -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(PROJECT_CONFIG))
            .merge(Yaml::file(LOCAL_CONFIG))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .context("Failed to extract configuration from figment")?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific file instead of the project files.
    /// Environment overrides still apply.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Config> {
        let path = path.as_ref();
        if !path.exists() {
            anyhow::bail!("Config file not found: {}", path.display());
        }

        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(path))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .with_context(|| format!("Failed to load config from {}", path.display()))?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// `--config <path>` when given, the project files otherwise.
    pub fn load_with(path: Option<&Path>) -> Result<Config> {
        match path {
            Some(path) => Self::load_from_file(path),
            None => Self::load(),
        }
    }

    /// Validate configuration after loading
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        let host = config.jira.host.trim();
        if !(host.starts_with("http://") || host.starts_with("https://")) {
            return Err(ConfigError::InvalidJiraHost(config.jira.host.clone()));
        }

        if config.jira.project_key.trim().is_empty() {
            return Err(ConfigError::EmptyProjectKey);
        }

        if config.jira.page_size == 0 || config.jira.page_size > 1000 {
            return Err(ConfigError::InvalidPageSize(config.jira.page_size));
        }

        if config.jira.concurrency == 0 {
            return Err(ConfigError::InvalidConcurrency(config.jira.concurrency));
        }

        let sheets = &config.sheets;
        validate_cell("lead_collection_cell", &sheets.lead_collection_cell)?;
        validate_cell("not_touch_cell", &sheets.not_touch_cell)?;
        if sheets.log_spreadsheet_title.trim().is_empty() {
            return Err(ConfigError::ValidationFailed(
                "sheets.log_spreadsheet_title cannot be empty".to_string(),
            ));
        }
        if sheets.area_spreadsheet_id.trim().is_empty()
            || sheets.area_worksheet.trim().is_empty()
            || sheets.no_area_worksheet.trim().is_empty()
        {
            return Err(ConfigError::ValidationFailed(
                "sheets.area_spreadsheet_id, area_worksheet and no_area_worksheet must be set"
                    .to_string(),
            ));
        }

        if config.cities.tehran.trim().is_empty() {
            return Err(ConfigError::ValidationFailed(
                "cities.tehran cannot be empty".to_string(),
            ));
        }
        if config.cities.suburbs.is_empty()
            || config.cities.suburbs.iter().any(|c| c.trim().is_empty())
        {
            return Err(ConfigError::EmptySuburbs);
        }

        // Validate logging config
        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        let valid_log_formats = ["json", "pretty"];
        if !valid_log_formats.contains(&config.logging.format.as_str()) {
            return Err(ConfigError::InvalidLogFormat(config.logging.format.clone()));
        }

        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&config.logging.rotation.as_str()) {
            return Err(ConfigError::InvalidRotation(config.logging.rotation.clone()));
        }

        if config.rate_limit.requests_per_window == 0 || config.rate_limit.window_secs == 0 {
            return Err(ConfigError::InvalidRateLimit(
                config.rate_limit.requests_per_window,
                config.rate_limit.window_secs,
            ));
        }

        // Validate retry config
        if config.retry.max_retries == 0 {
            return Err(ConfigError::InvalidMaxRetries(config.retry.max_retries));
        }

        if config.retry.initial_backoff_ms >= config.retry.max_backoff_ms {
            return Err(ConfigError::InvalidBackoff(
                config.retry.initial_backoff_ms,
                config.retry.max_backoff_ms,
            ));
        }

        Ok(())
    }
}

fn validate_cell(name: &'static str, cell: &CellLocation) -> Result<(), ConfigError> {
    if cell.spreadsheet_id.trim().is_empty()
        || cell.worksheet.trim().is_empty()
        || cell.row == 0
        || cell.column == 0
    {
        return Err(ConfigError::InvalidCell(name));
    }
    Ok(())
}
