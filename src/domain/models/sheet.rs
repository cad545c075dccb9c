//! Spreadsheet handles and log rows.

use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::issue::IssueKey;

/// Timestamp layout of the "Update Time" column.
pub const UPDATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Header row written to a freshly created log worksheet.
pub const LOG_HEADER: [&str; 2] = ["Issue Key", "Update Time"];

/// A spreadsheet opened or created by title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpreadsheetHandle {
    pub id: String,
    pub title: String,
    /// Whether the spreadsheet had to be created.
    pub created: bool,
}

/// A worksheet (tab) inside a spreadsheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorksheetRef {
    pub sheet_id: i64,
    pub title: String,
}

/// One processed issue, as logged to the month worksheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogEntry {
    pub key: IssueKey,
    pub updated_at: NaiveDateTime,
}

impl LogEntry {
    pub fn new(key: IssueKey, updated_at: NaiveDateTime) -> Self {
        Self { key, updated_at }
    }

    /// Stamp an entry with the local wall-clock time.
    pub fn now(key: IssueKey) -> Self {
        Self::new(key, Local::now().naive_local())
    }

    pub fn row(&self) -> Vec<String> {
        vec![
            self.key.to_string(),
            self.updated_at.format(UPDATE_TIME_FORMAT).to_string(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_log_entry_row() {
        let at = NaiveDate::from_ymd_opt(2024, 10, 22)
            .unwrap()
            .and_hms_opt(9, 5, 7)
            .unwrap();
        let entry = LogEntry::new(IssueKey::parse("NVR-42").unwrap(), at);
        assert_eq!(entry.row(), vec!["NVR-42", "2024-10-22 09:05:07"]);
    }
}
