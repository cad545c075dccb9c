//! Domain layer for lpo-sync
//!
//! Pure models, validation rules and the port traits the workflows talk to.

pub mod errors;
pub mod models;
pub mod ports;

pub use errors::{DomainError, DomainResult};
