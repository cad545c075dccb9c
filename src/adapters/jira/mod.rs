//! Jira Server adapter.

pub mod client;
pub mod models;

pub use client::{JiraClient, JiraCredentials};
