//! Google Sheets adapter.

pub mod auth;
pub mod client;
pub mod models;

pub use auth::{ServiceAccountKey, TokenProvider, SHEETS_SCOPES};
pub use client::SheetsClient;
