//! Adapters for the remote systems the workflows talk to.

pub mod error;
pub mod jira;
pub mod rate_limiter;
pub mod retry;
pub mod sheets;

pub use error::ApiError;
pub use rate_limiter::RateLimiter;
pub use retry::RetryPolicy;
