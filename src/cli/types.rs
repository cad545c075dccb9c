//! CLI type definitions
//!
//! This module contains clap command structures that define the CLI interface.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::cli::commands::config::ConfigArgs;
use crate::cli::commands::month::MonthArgs;
use crate::cli::commands::sync::SyncArgs;
use crate::cli::commands::validate::ValidateArgs;

#[derive(Parser, Debug)]
#[command(name = "lpo-sync")]
#[command(about = "Monthly LPO updates between Jira and Google Sheets", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Configuration file to use instead of .lpo/config.yaml and .lpo/local.yaml
    #[arg(short, long, global = true, env = "LPO_CONFIG")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate dashboard candidates without changing anything
    Validate(ValidateArgs),

    /// Route validated lead-collection issues to LC Pool and link them
    LeadCollection(SyncArgs),

    /// Update validated not-touch issues and return them to admin check
    NotTouch(SyncArgs),

    /// Preview the assign-month value for an input such as "aban 1403"
    Month(MonthArgs),

    /// Configuration commands
    Config(ConfigArgs),
}
