//! Command handlers. Each returns `anyhow::Result` and prints its own output.

pub mod config;
pub mod month;
pub mod sync;
pub mod validate;
