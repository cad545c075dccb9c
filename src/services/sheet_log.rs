//! Per-month worksheet logging of processed issues.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::info;

use crate::domain::errors::DomainResult;
use crate::domain::models::{
    AssignMonth, JalaliDate, LogEntry, SpreadsheetHandle, WorksheetRef, LOG_HEADER,
};
use crate::domain::ports::SpreadsheetService;

const NEW_WORKSHEET_ROWS: u32 = 1000;
const NEW_WORKSHEET_COLUMNS: u32 = 2;

/// `Lead Collection آبان 1403`
pub fn lead_collection_worksheet(prefix: &str, month: &AssignMonth) -> String {
    format!("{prefix} {month}")
}

/// `Not Touch آبان`, named after the Jalali month containing `today`.
pub fn not_touch_worksheet(prefix: &str, today: NaiveDate) -> String {
    let month = JalaliDate::from_gregorian(today).persian_month();
    format!("{prefix} {}", month.persian_name())
}

/// Where log rows are appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogTarget {
    pub spreadsheet: SpreadsheetHandle,
    pub worksheet: WorksheetRef,
    /// Whether the worksheet was created by this run.
    pub created: bool,
}

/// Appends processed issue keys to worksheets of the log spreadsheet.
pub struct SheetLog<S: SpreadsheetService> {
    sheets: Arc<S>,
    spreadsheet_title: String,
}

impl<S: SpreadsheetService> SheetLog<S> {
    pub fn new(sheets: Arc<S>, spreadsheet_title: impl Into<String>) -> Self {
        Self {
            sheets,
            spreadsheet_title: spreadsheet_title.into(),
        }
    }

    /// Open the log spreadsheet and the named worksheet, creating either
    /// when missing. A new worksheet gets the header row.
    pub async fn ensure_worksheet(&self, title: &str) -> DomainResult<LogTarget> {
        let spreadsheet = self
            .sheets
            .open_or_create_spreadsheet(&self.spreadsheet_title)
            .await?;

        if let Some(worksheet) = self.sheets.find_worksheet(&spreadsheet.id, title).await? {
            return Ok(LogTarget {
                spreadsheet,
                worksheet,
                created: false,
            });
        }

        let worksheet = self
            .sheets
            .add_worksheet(
                &spreadsheet.id,
                title,
                NEW_WORKSHEET_ROWS,
                NEW_WORKSHEET_COLUMNS,
            )
            .await?;
        let header: Vec<String> = LOG_HEADER.iter().map(|h| (*h).to_string()).collect();
        self.sheets
            .append_row(&spreadsheet.id, &worksheet.title, &header)
            .await?;

        info!(
            spreadsheet = %spreadsheet.title,
            worksheet = %worksheet.title,
            "log worksheet created"
        );
        Ok(LogTarget {
            spreadsheet,
            worksheet,
            created: true,
        })
    }

    /// Append one row per entry, in order. Returns the number of rows written.
    pub async fn append_entries(
        &self,
        target: &LogTarget,
        entries: &[LogEntry],
    ) -> DomainResult<usize> {
        for entry in entries {
            self.sheets
                .append_row(&target.spreadsheet.id, &target.worksheet.title, &entry.row())
                .await?;
        }
        info!(
            worksheet = %target.worksheet.title,
            rows = entries.len(),
            "issues logged"
        );
        Ok(entries.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lead_collection_worksheet_name() {
        let month = AssignMonth::parse("aban 1403").unwrap();
        assert_eq!(
            lead_collection_worksheet("Lead Collection", &month),
            "Lead Collection آبان 1403"
        );
    }

    #[test]
    fn test_not_touch_worksheet_uses_jalali_month() {
        let today = NaiveDate::from_ymd_opt(2024, 10, 22).unwrap();
        assert_eq!(not_touch_worksheet("Not Touch", today), "Not Touch آبان");

        let nowruz = NaiveDate::from_ymd_opt(2024, 3, 20).unwrap();
        assert_eq!(not_touch_worksheet("Not Touch", nowruz), "Not Touch فروردین");
    }
}
