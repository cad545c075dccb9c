//! Port trait definitions (Hexagonal Architecture)
//!
//! - IssueTracker: search, read, update and transition issues
//! - SpreadsheetService: read cells and append log rows

pub mod issue_tracker;
pub mod spreadsheet;

pub use issue_tracker::IssueTracker;
pub use spreadsheet::SpreadsheetService;
