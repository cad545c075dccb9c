//! Configuration management infrastructure
//!
//! Hierarchical configuration using figment:
//! - YAML file loading (`.lpo/config.yaml`, `.lpo/local.yaml` or `--config`)
//! - Environment variable overrides (`LPO_*`)
//! - Configuration validation

pub mod loader;

pub use loader::{ConfigError, ConfigLoader};
