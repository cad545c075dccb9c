//! Google Sheets v4 and Drive v3 payloads.

use serde::{Deserialize, Serialize};

/// A block of cell values (`spreadsheets.values.get`).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueRange {
    #[serde(default)]
    pub range: Option<String>,
    #[serde(default)]
    pub values: Vec<Vec<serde_json::Value>>,
}

impl ValueRange {
    /// Render the first cell as text.
    pub fn first_cell(&self) -> Option<String> {
        self.values.first()?.first().and_then(cell_text)
    }

    /// Render the first row (or column, for `majorDimension=COLUMNS`).
    pub fn first_line(&self) -> Vec<String> {
        self.values
            .first()
            .map(|line| line.iter().filter_map(cell_text).collect())
            .unwrap_or_default()
    }
}

fn cell_text(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        serde_json::Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Body of `values:append`.
#[derive(Debug, Clone, Serialize)]
pub struct AppendRequest<'a> {
    pub values: [&'a [String]; 1],
}

/// Drive `files.list` response.
#[derive(Debug, Clone, Deserialize)]
pub struct DriveFileList {
    #[serde(default)]
    pub files: Vec<DriveFile>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DriveFile {
    pub id: String,
    #[serde(default)]
    pub name: String,
}

/// Body of `spreadsheets.create`.
#[derive(Debug, Clone, Serialize)]
pub struct CreateSpreadsheetRequest<'a> {
    pub properties: SpreadsheetTitle<'a>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SpreadsheetTitle<'a> {
    pub title: &'a str,
}

/// A spreadsheet resource, reduced to the parts read here.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Spreadsheet {
    #[serde(default)]
    pub spreadsheet_id: String,
    #[serde(default)]
    pub sheets: Vec<Sheet>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Sheet {
    pub properties: SheetProperties,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetProperties {
    #[serde(default)]
    pub sheet_id: i64,
    pub title: String,
}

/// Body of `spreadsheets.batchUpdate` with a single `addSheet` request.
#[derive(Debug, Clone, Serialize)]
pub struct AddSheetBatch<'a> {
    pub requests: [AddSheetRequest<'a>; 1],
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddSheetRequest<'a> {
    pub add_sheet: AddSheet<'a>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AddSheet<'a> {
    pub properties: NewSheetProperties<'a>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSheetProperties<'a> {
    pub title: &'a str,
    pub grid_properties: GridProperties,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GridProperties {
    pub row_count: u32,
    pub column_count: u32,
}

impl<'a> AddSheetBatch<'a> {
    pub fn new(title: &'a str, rows: u32, columns: u32) -> Self {
        Self {
            requests: [AddSheetRequest {
                add_sheet: AddSheet {
                    properties: NewSheetProperties {
                        title,
                        grid_properties: GridProperties {
                            row_count: rows,
                            column_count: columns,
                        },
                    },
                },
            }],
        }
    }
}

/// `spreadsheets.batchUpdate` response.
#[derive(Debug, Clone, Deserialize)]
pub struct BatchUpdateResponse {
    #[serde(default)]
    pub replies: Vec<BatchReply>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchReply {
    #[serde(default)]
    pub add_sheet: Option<Sheet>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_value_range_first_cell() {
        let range: ValueRange = serde_json::from_value(json!({
            "range": "Dashboard!B97",
            "majorDimension": "ROWS",
            "values": [["(NVR-1, NVR-2)"]]
        }))
        .unwrap();
        assert_eq!(range.first_cell().as_deref(), Some("(NVR-1, NVR-2)"));
    }

    #[test]
    fn test_value_range_empty_cell() {
        let range: ValueRange =
            serde_json::from_value(json!({ "range": "Dashboard!B97" })).unwrap();
        assert!(range.first_cell().is_none());
        assert!(range.first_line().is_empty());
    }

    #[test]
    fn test_add_sheet_batch_shape() {
        let value = serde_json::to_value(AddSheetBatch::new("Not Touch آبان", 1000, 2)).unwrap();
        assert_eq!(
            value,
            json!({
                "requests": [{
                    "addSheet": {
                        "properties": {
                            "title": "Not Touch آبان",
                            "gridProperties": { "rowCount": 1000, "columnCount": 2 }
                        }
                    }
                }]
            })
        );
    }

    #[test]
    fn test_append_request_shape() {
        let row = vec!["NVR-1".to_string(), "2024-10-22 10:00:00".to_string()];
        let value = serde_json::to_value(AppendRequest { values: [&row] }).unwrap();
        assert_eq!(value, json!({ "values": [["NVR-1", "2024-10-22 10:00:00"]] }));
    }
}
