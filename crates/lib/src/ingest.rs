//! # CSV Ingestion
//!
//! Loads a CSV object (delivered by a bucket-upload event) into a warehouse
//! table. The event collaborator downloads the object; this module parses
//! it, cleans the header names, and streams the rows into the table as
//! strings.

use crate::{errors::NlqError, providers::db::storage::Storage};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::info;

/// The object name this pipeline ingests; other uploads are ignored.
pub const DEFAULT_OBJECT_NAME: &str = "titanic.csv";

/// The payload of a bucket-upload event.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct StorageEvent {
    pub bucket: String,
    pub name: String,
}

/// The outcome of handling one storage event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IngestOutcome {
    /// The event did not reference the expected object and was ignored.
    Skipped { reason: String },
    /// The CSV was parsed and loaded.
    Loaded { rows_loaded: usize, columns: usize },
}

/// Normalizes a CSV header into a warehouse-safe column name: spaces and
/// slashes become underscores, everything is lowercased.
pub fn clean_column_name(raw: &str) -> String {
    raw.replace([' ', '/'], "_").to_lowercase()
}

/// Parses CSV text into cleaned headers and one string-valued row map per
/// record, preserving column order.
pub fn parse_csv(csv_text: &str) -> Result<(Vec<String>, Vec<Map<String, Value>>), NlqError> {
    let mut reader = csv::Reader::from_reader(csv_text.as_bytes());
    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(clean_column_name)
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let mut row = Map::new();
        for (header, value) in headers.iter().zip(record.iter()) {
            // Every column loads as a string; typed reads happen via SQL casts.
            row.insert(header.clone(), Value::String(value.to_string()));
        }
        rows.push(row);
    }

    Ok((headers, rows))
}

/// Handles a bucket-upload event by loading the object's CSV content into
/// `dataset_id.table_id`.
pub async fn load_csv_event(
    storage: &dyn Storage,
    event: &StorageEvent,
    expected_object: &str,
    dataset_id: &str,
    table_id: &str,
    csv_text: &str,
) -> Result<IngestOutcome, NlqError> {
    info!(
        "Processing file: {} from bucket: {}",
        event.name, event.bucket
    );

    if event.name != expected_object {
        let reason = format!("Ignoring file {}, not {expected_object}", event.name);
        info!("{reason}");
        return Ok(IngestOutcome::Skipped { reason });
    }

    let (headers, rows) = parse_csv(csv_text)?;
    info!(
        "Read CSV with {} rows and {} columns",
        rows.len(),
        headers.len()
    );

    let rows_loaded = storage.load_rows(dataset_id, table_id, rows).await?;

    Ok(IngestOutcome::Loaded {
        rows_loaded,
        columns: headers.len(),
    })
}
