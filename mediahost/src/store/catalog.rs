//! Catalog reader
//!
//! Lists every metadata record in the storage directory, newest first.
//! A corrupt record never fails the listing: it is logged and left out.

use std::cmp::Reverse;
use std::path::Path;

use thiserror::Error;
use tokio::fs;
use tracing::{debug, error, warn};

use super::{MediaStore, MetadataRecord, METADATA_SUFFIX};

/// Why a single catalog entry was skipped
#[derive(Debug, Error)]
enum EntryError {
    #[error("read failed: {0}")]
    Read(#[from] std::io::Error),

    #[error("invalid record: {0}")]
    Parse(#[from] serde_json::Error),
}

impl MediaStore {
    /// Read all metadata records, sorted by descending `upload_time`
    ///
    /// Records without `upload_time` come last. An unreadable storage
    /// directory is logged and yields an empty catalog.
    pub async fn list_records(&self) -> Vec<MetadataRecord> {
        let mut entries = match fs::read_dir(self.root()).await {
            Ok(entries) => entries,
            Err(e) => {
                error!(
                    "Failed to read storage directory {}: {}",
                    self.root().display(),
                    e
                );
                return Vec::new();
            }
        };

        let mut records = Vec::new();
        loop {
            let entry = match entries.next_entry().await {
                Ok(Some(entry)) => entry,
                Ok(None) => break,
                Err(e) => {
                    error!("Directory listing aborted: {}", e);
                    break;
                }
            };

            let file_name = entry.file_name();
            // Names we write are always UTF-8
            let Some(name) = file_name.to_str() else {
                continue;
            };
            if !name.ends_with(METADATA_SUFFIX) {
                continue;
            }

            match read_record(&entry.path()).await {
                Ok(record) => records.push(record),
                Err(e) => warn!("Skipping catalog entry {}: {}", name, e),
            }
        }

        sort_newest_first(&mut records);
        debug!(count = records.len(), "Catalog read");
        records
    }
}

async fn read_record(path: &Path) -> Result<MetadataRecord, EntryError> {
    let bytes = fs::read(path).await?;
    Ok(MetadataRecord::from_json_slice(&bytes)?)
}

/// Order records by descending upload time; ties keep no particular order
pub fn sort_newest_first(records: &mut [MetadataRecord]) {
    records.sort_by_key(|record| Reverse(record.recency_key()));
}
