//! # Sheets REST Client
//!
//! Thin HTTP boundary over the Google Sheets v4 values endpoints and the
//! Drive v3 file listing used to resolve the document by name. Bearer
//! token auth; the token is minted out of band.
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0

use anyhow::Result;
use serde_json::{json, Value};

const SHEETS_BASE: &str = "https://sheets.googleapis.com/v4/spreadsheets";
const DRIVE_FILES_URL: &str = "https://www.googleapis.com/drive/v3/files";

/// HTTP client for the spreadsheet service.
pub struct SheetsClient {
    http: reqwest::Client,
    token: String,
}

impl SheetsClient {
    /// Create a client with the given bearer token.
    pub fn new(token: &str) -> Self {
        SheetsClient {
            http: reqwest::Client::new(),
            token: token.to_string(),
        }
    }

    /// Resolve a spreadsheet id by document name via the Drive file listing.
    ///
    /// Returns `Ok(None)` when no spreadsheet with that name exists.
    pub async fn find_spreadsheet_id(&self, document_name: &str) -> Result<Option<String>> {
        // Drive query syntax quotes values with single quotes, escaped by doubling
        let query = format!(
            "name = '{}' and mimeType = 'application/vnd.google-apps.spreadsheet' and trashed = false",
            document_name.replace('\'', "\\'")
        );

        let response = self
            .http
            .get(DRIVE_FILES_URL)
            .bearer_auth(&self.token)
            .query(&[
                ("q", query.as_str()),
                ("fields", "files(id,name)"),
                ("pageSize", "1"),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(anyhow::anyhow!(
                "Drive file lookup for '{document_name}' failed with {status}"
            ));
        }

        let body: Value = response.json().await?;
        let id = body["files"]
            .as_array()
            .and_then(|files| files.first())
            .and_then(|file| file["id"].as_str())
            .map(|id| id.to_string());

        Ok(id)
    }

    /// Read all values of a range. Returns an empty list for an empty sheet.
    pub async fn values_get(&self, spreadsheet_id: &str, range: &str) -> Result<Vec<Vec<String>>> {
        let url = format!("{SHEETS_BASE}/{spreadsheet_id}/values/{range}");
        let response = self.http.get(&url).bearer_auth(&self.token).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(anyhow::anyhow!(
                "Sheets read of range {range} failed with {status}"
            ));
        }

        let body: Value = response.json().await?;
        Ok(rows_from_response(&body))
    }

    /// Append rows after the last row of the range.
    pub async fn values_append(
        &self,
        spreadsheet_id: &str,
        range: &str,
        rows: &[Vec<String>],
    ) -> Result<()> {
        let url = format!("{SHEETS_BASE}/{spreadsheet_id}/values/{range}:append");
        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.token)
            .query(&[
                ("valueInputOption", "USER_ENTERED"),
                ("insertDataOption", "INSERT_ROWS"),
            ])
            .json(&json!({ "values": rows }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(anyhow::anyhow!(
                "Sheets append to range {range} failed with {status}"
            ));
        }
        Ok(())
    }

    /// Clear all values of a range.
    pub async fn values_clear(&self, spreadsheet_id: &str, range: &str) -> Result<()> {
        let url = format!("{SHEETS_BASE}/{spreadsheet_id}/values/{range}:clear");
        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.token)
            .json(&json!({}))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(anyhow::anyhow!(
                "Sheets clear of range {range} failed with {status}"
            ));
        }
        Ok(())
    }

    /// Overwrite a range with the given rows.
    pub async fn values_update(
        &self,
        spreadsheet_id: &str,
        range: &str,
        rows: &[Vec<String>],
    ) -> Result<()> {
        let url = format!("{SHEETS_BASE}/{spreadsheet_id}/values/{range}");
        let response = self
            .http
            .put(&url)
            .bearer_auth(&self.token)
            .query(&[("valueInputOption", "USER_ENTERED")])
            .json(&json!({ "range": range, "values": rows }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(anyhow::anyhow!(
                "Sheets update of range {range} failed with {status}"
            ));
        }
        Ok(())
    }
}

/// Extract the `values` grid from a values.get response.
///
/// Cells arrive as formatted strings, but numbers are stringified
/// defensively in case a caller requested a different render option.
fn rows_from_response(body: &Value) -> Vec<Vec<String>> {
    body["values"]
        .as_array()
        .map(|rows| {
            rows.iter()
                .map(|row| {
                    row.as_array()
                        .map(|cells| cells.iter().map(cell_to_string).collect())
                        .unwrap_or_default()
                })
                .collect()
        })
        .unwrap_or_default()
}

fn cell_to_string(cell: &Value) -> String {
    match cell {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_from_response_strings() {
        let body = json!({
            "range": "Sayfa1!A1:E3",
            "values": [
                ["Pet İsmi", "Aşı Tipi"],
                ["Max", "Kuduz"]
            ]
        });
        let rows = rows_from_response(&body);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1], vec!["Max", "Kuduz"]);
    }

    #[test]
    fn test_rows_from_response_mixed_types() {
        let body = json!({ "values": [["Max", 12.5, true]] });
        let rows = rows_from_response(&body);
        assert_eq!(rows[0], vec!["Max", "12.5", "true"]);
    }

    #[test]
    fn test_rows_from_response_empty_sheet() {
        // values.get omits the key entirely for an empty sheet
        let body = json!({ "range": "Sayfa1!A1:E1" });
        assert!(rows_from_response(&body).is_empty());
    }
}
