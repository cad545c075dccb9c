//! lpo-sync - monthly LPO updates between Jira and Google Sheets
//!
//! Reads candidate issue keys from dashboard cells, validates their
//! marketing-area field against city reference data, routes field updates
//! by city through generated JQL, transitions the issues and logs the
//! results to per-month worksheets.
//!
//! # Architecture
//!
//! - **Domain Layer** (`domain`): models, validation predicates and ports
//! - **Adapters** (`adapters`): Jira REST and Google Sheets/Drive clients
//! - **Service Layer** (`services`): JQL generation, validation, workflows
//! - **Infrastructure Layer** (`infrastructure`): configuration and logging
//! - **CLI Layer** (`cli`): command-line interface

pub mod adapters;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

pub use domain::errors::{DomainError, DomainResult};
pub use domain::models::{AssignMonth, Config, IssueKey};
pub use domain::ports::{IssueTracker, SpreadsheetService};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use services::{SyncService, ValidationService};
