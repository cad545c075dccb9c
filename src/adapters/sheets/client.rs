//! Google Sheets HTTP client with rate limiting and retry.
//!
//! Reads dashboard cells and reference columns through the Sheets v4
//! values API, finds spreadsheets by title through Drive v3, and appends
//! log rows. Requests carry a bearer token from [`TokenProvider`].

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::sync::Mutex;

use crate::adapters::error::ApiError;
use crate::adapters::rate_limiter::RateLimiter;
use crate::adapters::retry::RetryPolicy;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{SpreadsheetHandle, WorksheetRef};
use crate::domain::ports::SpreadsheetService;

use super::auth::TokenProvider;
use super::models::{
    AddSheetBatch, AppendRequest, BatchUpdateResponse, CreateSpreadsheetRequest, DriveFileList,
    SpreadsheetTitle, Spreadsheet, ValueRange,
};

const SPREADSHEET_MIME_TYPE: &str = "application/vnd.google-apps.spreadsheet";

/// Column number (1-based) to A1 letters: 1 → `A`, 27 → `AA`, 98 → `CT`.
pub fn column_letters(column: u32) -> String {
    let mut n = column;
    let mut letters = Vec::new();
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push(char::from(b'A' + rem as u8));
        n = (n - 1) / 26;
    }
    letters.iter().rev().collect()
}

/// Quote a worksheet title for use in an A1 range.
pub fn quote_sheet(title: &str) -> String {
    format!("'{}'", title.replace('\'', "''"))
}

/// A1 reference of one cell, e.g. `'Dashboard'!B97`.
pub fn cell_range(worksheet: &str, row: u32, column: u32) -> String {
    format!("{}!{}{}", quote_sheet(worksheet), column_letters(column), row)
}

/// A1 reference of a whole column, e.g. `'area id'!A:A`.
pub fn column_range(worksheet: &str, column: u32) -> String {
    let letters = column_letters(column);
    format!("{}!{letters}:{letters}", quote_sheet(worksheet))
}

/// HTTP client for Google Sheets and Drive.
#[derive(Debug, Clone)]
pub struct SheetsClient {
    http: Client,
    sheets_base: String,
    drive_base: String,
    auth: Arc<TokenProvider>,
    rate_limiter: Arc<Mutex<RateLimiter>>,
    retry: RetryPolicy,
}

impl SheetsClient {
    pub fn new(auth: TokenProvider) -> DomainResult<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .map_err(|e| {
                DomainError::SpreadsheetRequest(format!("failed to build HTTP client: {e}"))
            })?;
        Ok(Self {
            http,
            sheets_base: "https://sheets.googleapis.com".to_string(),
            drive_base: "https://www.googleapis.com".to_string(),
            auth: Arc::new(auth),
            // Sheets allows 60 requests per minute per user.
            rate_limiter: Arc::new(Mutex::new(RateLimiter::new(
                "sheets",
                60,
                Duration::from_secs(60),
            ))),
            retry: RetryPolicy::default(),
        })
    }

    #[must_use]
    pub fn with_base_urls(mut self, sheets_base: &str, drive_base: &str) -> Self {
        self.sheets_base = sheets_base.trim_end_matches('/').to_string();
        self.drive_base = drive_base.trim_end_matches('/').to_string();
        self
    }

    #[must_use]
    pub fn with_rate_limit(mut self, capacity: u32, window: Duration) -> Self {
        self.rate_limiter = Arc::new(Mutex::new(RateLimiter::new("sheets", capacity, window)));
        self
    }

    #[must_use]
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    fn url(base: &str, segments: &[&str]) -> DomainResult<Url> {
        let mut url = Url::parse(base)
            .map_err(|e| DomainError::SpreadsheetRequest(format!("bad base URL {base}: {e}")))?;
        url.path_segments_mut()
            .map_err(|()| DomainError::SpreadsheetRequest(format!("bad base URL {base}")))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn sheets_url(&self, segments: &[&str]) -> DomainResult<Url> {
        Self::url(&self.sheets_base, segments)
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        operation: &str,
        method: Method,
        url: Url,
        query: &[(&str, &str)],
        body: Option<&Value>,
    ) -> DomainResult<T> {
        let retry = self.retry.for_method(&method);
        let token = self.auth.access_token().await?;
        let token = &token;
        let url = &url;
        let method = &method;

        let text = retry
            .execute(|| async move {
                self.rate_limiter.lock().await.acquire().await;

                let mut req = self
                    .http
                    .request(method.clone(), url.clone())
                    .bearer_auth(token);
                if !query.is_empty() {
                    req = req.query(query);
                }
                if let Some(body) = body {
                    req = req.json(body);
                }

                let resp = req.send().await?;
                let status = resp.status();
                let text = resp.text().await?;
                if status.is_success() {
                    Ok(text)
                } else {
                    Err(ApiError::Status { status, body: text })
                }
            })
            .await
            .map_err(|e| sheets_error(operation, e))?;

        serde_json::from_str(&text).map_err(|e| {
            DomainError::SpreadsheetRequest(format!("Sheets {operation} parse failed: {e}"))
        })
    }

    async fn get_values(
        &self,
        operation: &str,
        spreadsheet_id: &str,
        range: &str,
        query: &[(&str, &str)],
    ) -> DomainResult<ValueRange> {
        let url = self.sheets_url(&["v4", "spreadsheets", spreadsheet_id, "values", range])?;
        self.send_json(operation, Method::GET, url, query, None).await
    }
}

fn sheets_error(operation: &str, err: ApiError) -> DomainError {
    match err.status() {
        Some(StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) => {
            DomainError::Authentication(format!("Sheets {operation}: {err}"))
        }
        _ => DomainError::SpreadsheetRequest(format!("Sheets {operation}: {err}")),
    }
}

/// Escape a value for a Drive query string literal.
fn drive_literal(value: &str) -> String {
    value.replace('\\', "\\\\").replace('\'', "\\'")
}

#[async_trait]
impl SpreadsheetService for SheetsClient {
    async fn read_cell(
        &self,
        spreadsheet_id: &str,
        worksheet: &str,
        row: u32,
        column: u32,
    ) -> DomainResult<Option<String>> {
        let range = cell_range(worksheet, row, column);
        let values = self
            .get_values("read_cell", spreadsheet_id, &range, &[])
            .await?;
        tracing::debug!(%range, "Sheets: cell read");
        Ok(values.first_cell().filter(|v| !v.trim().is_empty()))
    }

    async fn column_values(
        &self,
        spreadsheet_id: &str,
        worksheet: &str,
        column: u32,
    ) -> DomainResult<Vec<String>> {
        let range = column_range(worksheet, column);
        let values = self
            .get_values(
                "column_values",
                spreadsheet_id,
                &range,
                &[("majorDimension", "COLUMNS")],
            )
            .await?;
        let column: Vec<String> = values
            .first_line()
            .into_iter()
            .filter(|v| !v.trim().is_empty())
            .collect();
        tracing::debug!(%range, count = column.len(), "Sheets: column read");
        Ok(column)
    }

    async fn open_or_create_spreadsheet(&self, title: &str) -> DomainResult<SpreadsheetHandle> {
        let q = format!(
            "name = '{}' and mimeType = '{SPREADSHEET_MIME_TYPE}' and trashed = false",
            drive_literal(title)
        );
        let url = Self::url(&self.drive_base, &["drive", "v3", "files"])?;
        let found: DriveFileList = self
            .send_json(
                "find_spreadsheet",
                Method::GET,
                url,
                &[("q", q.as_str()), ("fields", "files(id,name)")],
                None,
            )
            .await?;

        if let Some(file) = found.files.into_iter().next() {
            tracing::info!(spreadsheet = %title, id = %file.id, "Sheets: spreadsheet already exists");
            return Ok(SpreadsheetHandle {
                id: file.id,
                title: title.to_string(),
                created: false,
            });
        }

        let body = serde_json::to_value(CreateSpreadsheetRequest {
            properties: SpreadsheetTitle { title },
        })?;
        let url = self.sheets_url(&["v4", "spreadsheets"])?;
        let created: Spreadsheet = self
            .send_json("create_spreadsheet", Method::POST, url, &[], Some(&body))
            .await?;

        tracing::info!(spreadsheet = %title, id = %created.spreadsheet_id, "Sheets: spreadsheet created");
        Ok(SpreadsheetHandle {
            id: created.spreadsheet_id,
            title: title.to_string(),
            created: true,
        })
    }

    async fn find_worksheet(
        &self,
        spreadsheet_id: &str,
        title: &str,
    ) -> DomainResult<Option<WorksheetRef>> {
        let url = self.sheets_url(&["v4", "spreadsheets", spreadsheet_id])?;
        let spreadsheet: Spreadsheet = self
            .send_json(
                "find_worksheet",
                Method::GET,
                url,
                &[("fields", "spreadsheetId,sheets.properties")],
                None,
            )
            .await?;

        Ok(spreadsheet
            .sheets
            .into_iter()
            .map(|s| s.properties)
            .find(|p| p.title == title)
            .map(|p| WorksheetRef {
                sheet_id: p.sheet_id,
                title: p.title,
            }))
    }

    async fn add_worksheet(
        &self,
        spreadsheet_id: &str,
        title: &str,
        rows: u32,
        columns: u32,
    ) -> DomainResult<WorksheetRef> {
        let body = serde_json::to_value(AddSheetBatch::new(title, rows, columns))?;
        let url = self.sheets_url(&["v4", "spreadsheets", &format!("{spreadsheet_id}:batchUpdate")])?;
        let resp: BatchUpdateResponse = self
            .send_json("add_worksheet", Method::POST, url, &[], Some(&body))
            .await?;

        let props = resp
            .replies
            .into_iter()
            .find_map(|r| r.add_sheet)
            .map(|s| s.properties)
            .ok_or_else(|| {
                DomainError::SpreadsheetRequest(format!(
                    "Sheets add_worksheet: no addSheet reply for '{title}'"
                ))
            })?;

        tracing::info!(worksheet = %title, sheet_id = props.sheet_id, "Sheets: worksheet created");
        Ok(WorksheetRef {
            sheet_id: props.sheet_id,
            title: props.title,
        })
    }

    async fn append_row(
        &self,
        spreadsheet_id: &str,
        worksheet: &str,
        values: &[String],
    ) -> DomainResult<()> {
        let range = format!("{}!A1", quote_sheet(worksheet));
        let body = serde_json::to_value(AppendRequest { values: [values] })?;
        let url = self.sheets_url(&[
            "v4",
            "spreadsheets",
            spreadsheet_id,
            "values",
            &format!("{range}:append"),
        ])?;
        let _: Value = self
            .send_json(
                "append_row",
                Method::POST,
                url,
                &[("valueInputOption", "RAW"), ("insertDataOption", "INSERT_ROWS")],
                Some(&body),
            )
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_letters() {
        assert_eq!(column_letters(1), "A");
        assert_eq!(column_letters(2), "B");
        assert_eq!(column_letters(26), "Z");
        assert_eq!(column_letters(27), "AA");
        assert_eq!(column_letters(98), "CT");
        assert_eq!(column_letters(702), "ZZ");
        assert_eq!(column_letters(703), "AAA");
    }

    #[test]
    fn test_ranges() {
        assert_eq!(cell_range("Dashboard", 97, 2), "'Dashboard'!B97");
        assert_eq!(cell_range("Dashboard", 2, 98), "'Dashboard'!CT2");
        assert_eq!(column_range("area id", 1), "'area id'!A:A");
        assert_eq!(quote_sheet("Bob's"), "'Bob''s'");
    }

    #[test]
    fn test_drive_literal_escapes_quotes() {
        assert_eq!(drive_literal("Monthly Update LPO"), "Monthly Update LPO");
        assert_eq!(drive_literal("it's"), "it\\'s");
    }

    #[test]
    fn test_url_building() {
        let url = SheetsClient::url("http://127.0.0.1:1234", &["v4", "spreadsheets", "abc"]).unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:1234/v4/spreadsheets/abc");
    }
}
