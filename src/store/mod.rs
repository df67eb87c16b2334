//! # Record Store Accessor
//!
//! Reads and writes treatment records against the shared spreadsheet.
//! Deletion is delete-by-rewrite: the full collection is replaced with a
//! filtered copy. A concurrent append during a rewrite is silently lost;
//! the design assumes a single logical writer at a time.
//!
//! - **Version**: 1.2.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.2.0: Read path degrades to an empty record set on store failure
//! - 1.1.0: Header row written on first append, matching the legacy sheet
//! - 1.0.0: Initial creation over the Sheets REST client

pub mod client;

pub use client::SheetsClient;

use crate::core::TreatmentRecord;
use anyhow::Result;
use log::{info, warn};
use tokio::sync::OnceCell;

/// Fixed document name of the backing spreadsheet.
pub const DOCUMENT_NAME: &str = "PatiLog_DB";

/// Column headers, in fixed order, wire-compatible with the original sheet.
pub const SHEET_HEADER: [&str; 5] = [
    "Pet İsmi",
    "Aşı Tipi",
    "Uygulama Tarihi",
    "Sonraki Tarih",
    "Kilo (kg)",
];

/// The five data columns of the first worksheet.
const VALUES_RANGE: &str = "A:E";

/// Spreadsheet-backed store of treatment records.
pub struct SheetStore {
    client: SheetsClient,
    document_name: String,
    spreadsheet_id: OnceCell<Option<String>>,
}

impl SheetStore {
    /// Create a store over the fixed document name.
    pub fn new(client: SheetsClient) -> Self {
        Self::with_document(client, DOCUMENT_NAME)
    }

    /// Create a store over an explicit document name (used by tests against
    /// fixture sheets).
    pub fn with_document(client: SheetsClient, document_name: &str) -> Self {
        SheetStore {
            client,
            document_name: document_name.to_string(),
            spreadsheet_id: OnceCell::new(),
        }
    }

    /// Load all records.
    ///
    /// Any failure connecting to or reading the store yields an empty set:
    /// callers accept that "empty" is ambiguous between "no records" and
    /// "store unreachable".
    pub async fn load_records(&self) -> Vec<TreatmentRecord> {
        match self.try_load().await {
            Ok(records) => records,
            Err(e) => {
                warn!("Record store unreachable, treating as empty: {e}");
                Vec::new()
            }
        }
    }

    async fn try_load(&self) -> Result<Vec<TreatmentRecord>> {
        let Some(id) = self.spreadsheet_id().await? else {
            info!(
                "Document '{}' not found, treating as empty record set",
                self.document_name
            );
            return Ok(Vec::new());
        };
        let rows = self.client.values_get(&id, VALUES_RANGE).await?;
        Ok(records_from_rows(rows))
    }

    /// Append one record, writing the header row first on an empty sheet.
    ///
    /// Write failures are surfaced to the caller; there is no retry.
    pub async fn append_record(&self, record: &TreatmentRecord) -> Result<()> {
        let id = self.require_spreadsheet_id().await?;

        let existing = self.client.values_get(&id, VALUES_RANGE).await?;
        if existing.is_empty() {
            self.client
                .values_append(&id, VALUES_RANGE, &[header_row()])
                .await?;
        }

        self.client
            .values_append(&id, VALUES_RANGE, &[record_to_row(record)])
            .await?;
        info!(
            "Appended record for {} ({})",
            record.subject_name, record.treatment_type
        );
        Ok(())
    }

    /// Replace the entire collection with the given records.
    ///
    /// This is the deletion primitive: callers filter the loaded set and
    /// write back what remains.
    pub async fn replace_all(&self, records: &[TreatmentRecord]) -> Result<()> {
        let id = self.require_spreadsheet_id().await?;

        let mut rows = Vec::with_capacity(records.len() + 1);
        rows.push(header_row());
        rows.extend(records.iter().map(record_to_row));

        self.client.values_clear(&id, VALUES_RANGE).await?;
        self.client.values_update(&id, VALUES_RANGE, &rows).await?;
        info!("Rewrote record store with {} records", records.len());
        Ok(())
    }

    /// Resolve the spreadsheet id once and cache it for the process lifetime.
    async fn spreadsheet_id(&self) -> Result<&Option<String>> {
        self.spreadsheet_id
            .get_or_try_init(|| self.client.find_spreadsheet_id(&self.document_name))
            .await
    }

    async fn require_spreadsheet_id(&self) -> Result<String> {
        match self.spreadsheet_id().await? {
            Some(id) => Ok(id.clone()),
            None => Err(anyhow::anyhow!(
                "Document '{}' not found in the record store",
                self.document_name
            )),
        }
    }
}

/// Map raw sheet rows to typed records, skipping the header row when present.
fn records_from_rows(rows: Vec<Vec<String>>) -> Vec<TreatmentRecord> {
    let mut iter = rows.into_iter();

    let mut records = Vec::new();
    if let Some(first) = iter.next() {
        // Row 1 is the header on any sheet the editor has written; tolerate
        // a headerless legacy sheet by keeping a data-looking first row.
        if first.first().map(String::as_str) != Some(SHEET_HEADER[0]) {
            records.push(record_from_row(first));
        }
    }
    records.extend(iter.map(record_from_row));
    records
}

fn record_from_row(row: Vec<String>) -> TreatmentRecord {
    let cell = |i: usize| row.get(i).cloned().unwrap_or_default();

    TreatmentRecord {
        subject_name: cell(0),
        treatment_type: cell(1),
        applied_date: cell(2),
        next_due_date: cell(3),
        weight_kg: parse_weight(&cell(4)),
    }
}

fn record_to_row(record: &TreatmentRecord) -> Vec<String> {
    vec![
        record.subject_name.clone(),
        record.treatment_type.clone(),
        record.applied_date.clone(),
        record.next_due_date.clone(),
        record
            .weight_kg
            .map(|kg| format!("{kg:.1}"))
            .unwrap_or_default(),
    ]
}

fn header_row() -> Vec<String> {
    SHEET_HEADER.iter().map(|h| h.to_string()).collect()
}

/// Parse a weight cell, accepting both decimal separators the sheet has
/// accumulated over time.
fn parse_weight(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    raw.replace(',', ".").parse::<f64>().ok()
}
