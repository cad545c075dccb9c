pub mod config;
pub mod issue;
pub mod marketing_area;
pub mod month;
pub mod routing;
pub mod sheet;
pub mod tracker;

pub use config::{
    CellLocation, CitiesConfig, Config, FieldMode, FieldsConfig, GroupFields, JiraConfig,
    LeadCollectionWorkflow, LoggingConfig, NotTouchWorkflow, RateLimitConfig, RetryConfig,
    SheetsConfig, WorkflowsConfig,
};
pub use issue::{extract_candidates, CellScope, IssueKey, IssueKeyPattern, IssueSnapshot};
pub use marketing_area::{validate_area_fill, validate_two_part_hyphen, AreaVerdict};
pub use month::{AssignMonth, JalaliDate, PersianMonth};
pub use routing::{build_field_plan, CityGroup, RoutingRule};
pub use sheet::{LogEntry, SpreadsheetHandle, WorksheetRef, LOG_HEADER, UPDATE_TIME_FORMAT};
pub use tracker::{find_transition, Transition, TransitionRequest};
