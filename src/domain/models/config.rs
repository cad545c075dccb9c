use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Main configuration structure for lpo-sync
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// Jira connection
    #[serde(default)]
    pub jira: JiraConfig,

    /// Google Sheets locations and credentials
    #[serde(default)]
    pub sheets: SheetsConfig,

    /// City reference data used for routing and validation
    #[serde(default)]
    pub cities: CitiesConfig,

    /// Custom-field ids and option values
    #[serde(default)]
    pub fields: FieldsConfig,

    /// Workflow transition names and comments
    #[serde(default)]
    pub workflows: WorkflowsConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Rate limiting configuration
    #[serde(default)]
    pub rate_limit: RateLimitConfig,

    /// Retry policy configuration
    #[serde(default)]
    pub retry: RetryConfig,
}

/// Jira configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct JiraConfig {
    /// Base URL of the Jira server
    #[serde(default = "default_jira_host")]
    pub host: String,

    /// Username for basic auth; prompted when absent
    #[serde(default)]
    pub username: Option<String>,

    /// Password for basic auth; prompted when absent
    #[serde(default)]
    pub password: Option<String>,

    /// Project whose keys are processed (`NVR` in `NVR-1234`)
    #[serde(default = "default_project_key")]
    pub project_key: String,

    /// Search page size
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Issues fetched concurrently during validation
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
}

fn default_jira_host() -> String {
    "https://jira.snappfood.ir".to_string()
}

fn default_project_key() -> String {
    "NVR".to_string()
}

const fn default_page_size() -> u32 {
    100
}

const fn default_concurrency() -> usize {
    4
}

impl Default for JiraConfig {
    fn default() -> Self {
        Self {
            host: default_jira_host(),
            username: None,
            password: None,
            project_key: default_project_key(),
            page_size: default_page_size(),
            concurrency: default_concurrency(),
        }
    }
}

/// A single cell on a dashboard worksheet
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct CellLocation {
    pub spreadsheet_id: String,
    #[serde(default = "default_dashboard_sheet")]
    pub worksheet: String,
    pub row: u32,
    pub column: u32,
}

fn default_dashboard_sheet() -> String {
    "Dashboard".to_string()
}

/// Google Sheets configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SheetsConfig {
    /// Service-account key file
    #[serde(default = "default_credentials_path")]
    pub credentials_path: PathBuf,

    /// Spreadsheet that receives the per-month log tabs
    #[serde(default = "default_log_spreadsheet_title")]
    pub log_spreadsheet_title: String,

    /// Cell holding lead-collection candidates
    #[serde(default = "default_lead_collection_cell")]
    pub lead_collection_cell: CellLocation,

    /// Cell holding not-touch candidates
    #[serde(default = "default_not_touch_cell")]
    pub not_touch_cell: CellLocation,

    /// Spreadsheet with the area / no-area city tabs
    #[serde(default = "default_area_spreadsheet_id")]
    pub area_spreadsheet_id: String,

    /// Tab listing cities whose marketing area has two parts
    #[serde(default = "default_area_worksheet")]
    pub area_worksheet: String,

    /// Tab listing cities whose marketing area has one part
    #[serde(default = "default_no_area_worksheet")]
    pub no_area_worksheet: String,

    /// Sheets API base URL
    #[serde(default = "default_sheets_base_url")]
    pub sheets_base_url: String,

    /// Drive API base URL
    #[serde(default = "default_drive_base_url")]
    pub drive_base_url: String,
}

fn default_credentials_path() -> PathBuf {
    PathBuf::from(".lpo/service-account.json")
}

fn default_log_spreadsheet_title() -> String {
    "Monthly Update LPO".to_string()
}

fn default_lead_collection_cell() -> CellLocation {
    CellLocation {
        spreadsheet_id: "1UIhTjvrmNtP4MkJFV_mYSiu-M1JEFE36MQnhzyc3AkM".to_string(),
        worksheet: default_dashboard_sheet(),
        row: 97,
        column: 2,
    }
}

fn default_not_touch_cell() -> CellLocation {
    CellLocation {
        spreadsheet_id: "1Go5WNUGmiXf0IAiwraAcYoz5NLsNBWEa5tUlDyo22CE".to_string(),
        worksheet: default_dashboard_sheet(),
        row: 2,
        column: 98,
    }
}

fn default_area_spreadsheet_id() -> String {
    "1UIhTjvrmNtP4MkJFV_mYSiu-M1JEFE36MQnhzyc3AkM".to_string()
}

fn default_area_worksheet() -> String {
    "area id".to_string()
}

fn default_no_area_worksheet() -> String {
    "no area id".to_string()
}

fn default_sheets_base_url() -> String {
    "https://sheets.googleapis.com".to_string()
}

fn default_drive_base_url() -> String {
    "https://www.googleapis.com".to_string()
}

impl Default for SheetsConfig {
    fn default() -> Self {
        Self {
            credentials_path: default_credentials_path(),
            log_spreadsheet_title: default_log_spreadsheet_title(),
            lead_collection_cell: default_lead_collection_cell(),
            not_touch_cell: default_not_touch_cell(),
            area_spreadsheet_id: default_area_spreadsheet_id(),
            area_worksheet: default_area_worksheet(),
            no_area_worksheet: default_no_area_worksheet(),
            sheets_base_url: default_sheets_base_url(),
            drive_base_url: default_drive_base_url(),
        }
    }
}

/// City reference configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct CitiesConfig {
    /// The capital, routed to the Tehran sales team
    #[serde(default = "default_tehran")]
    pub tehran: String,

    /// Towns around Tehran, also handled by the Tehran sales team
    #[serde(default = "default_suburbs")]
    pub suburbs: Vec<String>,

    /// JSON file with `{"cities_with_two_parts": [...]}`
    #[serde(default = "default_two_part_cities_path")]
    pub two_part_cities_path: PathBuf,
}

fn default_tehran() -> String {
    "تهران".to_string()
}

fn default_suburbs() -> Vec<String> {
    [
        "اسلامشهر",
        "ورامین",
        "رباط کریم",
        "پاکدشت",
        "قرچک",
        "بومهن",
        "لواسان",
        "رودهن",
        "جاجرود",
        "پرند",
        "دماوند",
    ]
    .iter()
    .map(|s| (*s).to_string())
    .collect()
}

fn default_two_part_cities_path() -> PathBuf {
    PathBuf::from(".lpo/cities.json")
}

impl Default for CitiesConfig {
    fn default() -> Self {
        Self {
            tehran: default_tehran(),
            suburbs: default_suburbs(),
            two_part_cities_path: default_two_part_cities_path(),
        }
    }
}

/// Option values written for one routing group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct GroupFields {
    pub sales_team: String,
    pub region: String,
}

/// Custom-field configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct FieldsConfig {
    /// Two-part marketing area
    #[serde(default = "default_marketing_area_field")]
    pub marketing_area: String,

    /// City text field
    #[serde(default = "default_city_field")]
    pub city: String,

    /// Manual Assign Date
    #[serde(default = "default_assign_month_field")]
    pub assign_month: String,

    /// Sales team select list
    #[serde(default = "default_sales_team_field")]
    pub sales_team: String,

    /// Region select list
    #[serde(default = "default_region_field")]
    pub region: String,

    /// Fields set to the same option on every updated issue
    #[serde(default = "default_common_fields")]
    pub common: BTreeMap<String, String>,

    #[serde(default = "default_tehran_fields")]
    pub tehran: GroupFields,

    #[serde(default = "default_suburb_fields")]
    pub suburbs: GroupFields,

    #[serde(default = "default_other_fields")]
    pub other_cities: GroupFields,
}

fn default_marketing_area_field() -> String {
    "customfield_20802".to_string()
}

fn default_city_field() -> String {
    "customfield_10800".to_string()
}

fn default_assign_month_field() -> String {
    "customfield_22304".to_string()
}

fn default_sales_team_field() -> String {
    "customfield_14314".to_string()
}

fn default_region_field() -> String {
    "customfield_11100".to_string()
}

fn default_common_fields() -> BTreeMap<String, String> {
    [
        ("customfield_22631", "No"),
        ("customfield_22632", "No"),
        ("customfield_18602", "No"),
        ("customfield_11003", "E"),
        ("customfield_10804", "Lead Collection"),
    ]
    .iter()
    .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
    .collect()
}

fn default_tehran_fields() -> GroupFields {
    GroupFields {
        sales_team: "Tehran Sales".to_string(),
        region: "Tehran".to_string(),
    }
}

fn default_suburb_fields() -> GroupFields {
    GroupFields {
        sales_team: "Tehran Sales".to_string(),
        region: "Other Cities".to_string(),
    }
}

fn default_other_fields() -> GroupFields {
    GroupFields {
        sales_team: "Other Cities Sales".to_string(),
        region: "Other Cities".to_string(),
    }
}

impl Default for FieldsConfig {
    fn default() -> Self {
        Self {
            marketing_area: default_marketing_area_field(),
            city: default_city_field(),
            assign_month: default_assign_month_field(),
            sales_team: default_sales_team_field(),
            region: default_region_field(),
            common: default_common_fields(),
            tehran: default_tehran_fields(),
            suburbs: default_suburb_fields(),
            other_cities: default_other_fields(),
        }
    }
}

/// How routed field values reach the issue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldMode {
    /// Send the fields inside the transition request
    OnTransition,
    /// Update the fields first, then transition
    BeforeTransition,
}

/// Lead-collection workflow settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LeadCollectionWorkflow {
    #[serde(default = "default_pool_transition")]
    pub pool_transition: String,

    #[serde(default = "default_pool_comment")]
    pub pool_comment: String,

    /// Issues already in this status are skipped by the routing queries
    #[serde(default = "default_pool_transition")]
    pub excluded_status: String,

    #[serde(default = "default_linked_transition")]
    pub linked_transition: String,

    #[serde(default = "default_linked_comment")]
    pub linked_comment: String,

    #[serde(default = "default_lead_field_mode")]
    pub field_mode: FieldMode,

    #[serde(default = "default_lead_worksheet_prefix")]
    pub worksheet_prefix: String,
}

fn default_pool_transition() -> String {
    "LC Pool".to_string()
}

fn default_pool_comment() -> String {
    "Updated and transitioned to LC Pool by script.".to_string()
}

fn default_linked_transition() -> String {
    "NVR Linked Issue".to_string()
}

fn default_linked_comment() -> String {
    "Transitioned to NVR Linked Issue by script.".to_string()
}

const fn default_lead_field_mode() -> FieldMode {
    FieldMode::OnTransition
}

fn default_lead_worksheet_prefix() -> String {
    "Lead Collection".to_string()
}

impl Default for LeadCollectionWorkflow {
    fn default() -> Self {
        Self {
            pool_transition: default_pool_transition(),
            pool_comment: default_pool_comment(),
            excluded_status: default_pool_transition(),
            linked_transition: default_linked_transition(),
            linked_comment: default_linked_comment(),
            field_mode: default_lead_field_mode(),
            worksheet_prefix: default_lead_worksheet_prefix(),
        }
    }
}

/// Not-touch workflow settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct NotTouchWorkflow {
    #[serde(default = "default_return_transition")]
    pub transition: String,

    #[serde(default = "default_return_comment")]
    pub comment: String,

    #[serde(default = "default_not_touch_field_mode")]
    pub field_mode: FieldMode,

    #[serde(default = "default_not_touch_worksheet_prefix")]
    pub worksheet_prefix: String,
}

fn default_return_transition() -> String {
    "Return Admin Check".to_string()
}

fn default_return_comment() -> String {
    "Updated and transitioned by script.".to_string()
}

const fn default_not_touch_field_mode() -> FieldMode {
    FieldMode::OnTransition
}

fn default_not_touch_worksheet_prefix() -> String {
    "Not Touch".to_string()
}

impl Default for NotTouchWorkflow {
    fn default() -> Self {
        Self {
            transition: default_return_transition(),
            comment: default_return_comment(),
            field_mode: default_not_touch_field_mode(),
            worksheet_prefix: default_not_touch_worksheet_prefix(),
        }
    }
}

/// Workflow configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct WorkflowsConfig {
    #[serde(default)]
    pub lead_collection: LeadCollectionWorkflow,

    #[serde(default)]
    pub not_touch: NotTouchWorkflow,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: json or pretty
    #[serde(default = "default_log_format")]
    pub format: String,

    /// Directory for rolling log files; stderr only when unset
    #[serde(default)]
    pub log_dir: Option<PathBuf>,

    /// Rotation of file logs: daily, hourly, never
    #[serde(default = "default_rotation")]
    pub rotation: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_rotation() -> String {
    "daily".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            log_dir: None,
            rotation: default_rotation(),
        }
    }
}

/// Rate limiting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RateLimitConfig {
    /// Requests allowed per window
    #[serde(default = "default_requests_per_window")]
    pub requests_per_window: u32,

    /// Window length in seconds
    #[serde(default = "default_window_secs")]
    pub window_secs: u64,
}

const fn default_requests_per_window() -> u32 {
    100
}

const fn default_window_secs() -> u64 {
    60
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            requests_per_window: default_requests_per_window(),
            window_secs: default_window_secs(),
        }
    }
}

/// Retry policy configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RetryConfig {
    /// Maximum number of retry attempts
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Initial backoff delay in milliseconds
    #[serde(default = "default_initial_backoff_ms")]
    pub initial_backoff_ms: u64,

    /// Maximum backoff delay in milliseconds
    #[serde(default = "default_max_backoff_ms")]
    pub max_backoff_ms: u64,
}

const fn default_max_retries() -> u32 {
    3
}

const fn default_initial_backoff_ms() -> u64 {
    1000
}

const fn default_max_backoff_ms() -> u64 {
    30_000
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            initial_backoff_ms: default_initial_backoff_ms(),
            max_backoff_ms: default_max_backoff_ms(),
        }
    }
}
