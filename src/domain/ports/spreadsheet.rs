//! Spreadsheet port.

use async_trait::async_trait;

use crate::domain::errors::DomainResult;
use crate::domain::models::{SpreadsheetHandle, WorksheetRef};

/// Port for the remote spreadsheet service.
///
/// Rows and columns are 1-based, as shown in the spreadsheet UI.
#[async_trait]
pub trait SpreadsheetService: Send + Sync {
    /// Read a single cell. An empty cell yields `None`.
    async fn read_cell(
        &self,
        spreadsheet_id: &str,
        worksheet: &str,
        row: u32,
        column: u32,
    ) -> DomainResult<Option<String>>;

    /// Read the non-blank values of a column, top to bottom.
    async fn column_values(
        &self,
        spreadsheet_id: &str,
        worksheet: &str,
        column: u32,
    ) -> DomainResult<Vec<String>>;

    /// Open a spreadsheet by title, creating it when none exists.
    async fn open_or_create_spreadsheet(&self, title: &str) -> DomainResult<SpreadsheetHandle>;

    /// Look a worksheet up by title.
    async fn find_worksheet(
        &self,
        spreadsheet_id: &str,
        title: &str,
    ) -> DomainResult<Option<WorksheetRef>>;

    /// Add a worksheet with the given grid size.
    async fn add_worksheet(
        &self,
        spreadsheet_id: &str,
        title: &str,
        rows: u32,
        columns: u32,
    ) -> DomainResult<WorksheetRef>;

    /// Append one row after the last filled row of a worksheet.
    async fn append_row(
        &self,
        spreadsheet_id: &str,
        worksheet: &str,
        values: &[String],
    ) -> DomainResult<()>;
}
