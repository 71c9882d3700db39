//! Upload handler: persist one audio file and its enriched metadata
//!
//! Audio bytes are streamed into a hidden staging file while the request
//! body is read. Only after the metadata parses and the declared name
//! checks out is the staging file renamed to `<declared-name>`; the record
//! is then written to `.meta-<uuid>.tmp` and renamed to `<id>.json`.
//! Temporary names never depend on the id, so any name that fits on disk as
//! `<id>.json` can be written.
//!
//! The two renames are independent. If the metadata write fails the audio
//! file stays in place with no record pointing at it.

use std::io;
use std::path::{Path, PathBuf};

use mediahost_common::time;
use thiserror::Error;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::naming::{derive_id, sanitize_file_name, split_extension};
use super::{MediaStore, MetadataRecord};

/// Upload failure
///
/// Every variant is reported to the client the same way; the text carries
/// the underlying cause.
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("Missing form field: {0}")]
    MissingField(&'static str),

    #[error("Invalid metadata: {0}")]
    MalformedMetadata(#[from] serde_json::Error),

    #[error("Audio file name is missing")]
    MissingFilename,

    #[error("Invalid audio file name: {0}")]
    InvalidFilename(String),

    #[error("{0}")]
    Io(#[from] io::Error),
}

/// Result of a successful upload
#[derive(Debug, Clone)]
pub struct UploadReceipt {
    pub id: String,
    pub filename: String,
    pub upload_time: i64,
}

/// Audio bytes received so far, held in a hidden file in the storage
/// directory
///
/// Dropping a staged upload that was never committed deletes the file.
#[derive(Debug)]
pub struct StagedAudio {
    path: PathBuf,
    file: Option<fs::File>,
    bytes_written: u64,
    committed: bool,
}

impl StagedAudio {
    /// Append a chunk of the request body
    pub async fn write_chunk(&mut self, chunk: &[u8]) -> io::Result<()> {
        let file = self
            .file
            .as_mut()
            .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "staged audio already closed"))?;
        file.write_all(chunk).await?;
        self.bytes_written += chunk.len() as u64;
        Ok(())
    }

    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    /// Move the staged bytes to `target`, replacing any existing file
    async fn commit_to(mut self, target: &Path) -> io::Result<u64> {
        if let Some(mut file) = self.file.take() {
            file.flush().await?;
        }
        fs::rename(&self.path, target).await?;
        self.committed = true;
        Ok(self.bytes_written)
    }
}

impl Drop for StagedAudio {
    fn drop(&mut self) {
        if self.committed {
            return;
        }
        drop(self.file.take());
        // Drop cannot await; a single blocking unlink on the worker thread
        match std::fs::remove_file(&self.path) {
            Ok(()) => debug!("Discarded staged upload {}", self.path.display()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => warn!(
                "Failed to remove staged upload {}: {}",
                self.path.display(),
                e
            ),
        }
    }
}

impl MediaStore {
    /// Open a new staging file for incoming audio bytes
    pub async fn stage_audio(&self) -> io::Result<StagedAudio> {
        let path = self.root().join(format!(".upload-{}.part", Uuid::new_v4()));
        let file = fs::File::create(&path).await?;
        Ok(StagedAudio {
            path,
            file: Some(file),
            bytes_written: 0,
            committed: false,
        })
    }

    /// Persist a staged upload under its declared name with enriched metadata
    ///
    /// Steps run in a fixed order: parse metadata, validate the name, move
    /// the audio into place, stamp server fields, write the record. A failure
    /// in either of the first two leaves the storage directory untouched.
    pub async fn commit_upload(
        &self,
        metadata: &str,
        declared_name: Option<&str>,
        audio: StagedAudio,
    ) -> Result<UploadReceipt, UploadError> {
        let mut record = MetadataRecord::from_json_str(metadata)?;

        let filename = declared_name
            .and_then(sanitize_file_name)
            .ok_or(UploadError::MissingFilename)?;
        if matches!(split_extension(filename).1, Some(ext) if ext.eq_ignore_ascii_case("json")) {
            // The audio file would be overwritten by its own metadata
            return Err(UploadError::InvalidFilename(filename.to_string()));
        }
        let id = derive_id(filename);

        let bytes = audio.commit_to(&self.root().join(filename)).await?;

        let upload_time = time::unix_timestamp();
        record.stamp(id, filename, upload_time);
        self.write_record(id, &record).await?;

        info!(id, filename, bytes, "Stored upload");
        Ok(UploadReceipt {
            id: id.to_string(),
            filename: filename.to_string(),
            upload_time,
        })
    }

    /// Write `<id>.json` via a temporary file so readers never see a partial
    /// record
    async fn write_record(&self, id: &str, record: &MetadataRecord) -> io::Result<()> {
        let bytes = record.to_json_vec().map_err(io::Error::from)?;
        let tmp = self.root().join(format!(".meta-{}.tmp", Uuid::new_v4()));

        let result = async {
            fs::write(&tmp, &bytes).await?;
            fs::rename(&tmp, self.metadata_path(id)).await
        }
        .await;

        if result.is_err() {
            let _ = fs::remove_file(&tmp).await;
        }
        result
    }
}
