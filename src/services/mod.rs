//! Workflow services built on the tracker and spreadsheet ports.

pub mod jql;
pub mod sheet_log;
pub mod sync;
pub mod validation;

pub use sheet_log::{LogTarget, SheetLog};
pub use sync::{FailedIssue, StepReport, SyncReport, SyncService, Workflow};
pub use validation::{
    InvalidCandidate, ReferenceCities, ValidationProfile, ValidationReport, ValidationService,
};
