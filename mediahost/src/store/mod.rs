//! Storage directory access
//!
//! The storage directory is flat: each upload is a pair of files,
//! `<id>.<ext>` (audio) and `<id>.json` (metadata). There is no index and no
//! locking; the directory listing is the catalog. In-progress files are
//! hidden (leading `.`) and never end in `.json`.

mod catalog;
pub mod naming;
pub mod record;
mod upload;

pub use catalog::sort_newest_first;
pub use record::MetadataRecord;
pub use upload::{StagedAudio, UploadError, UploadReceipt};

use std::path::{Path, PathBuf};

/// Suffix identifying metadata files
pub const METADATA_SUFFIX: &str = ".json";

/// Handle on the storage directory
///
/// Cheap to clone; holds only the directory path.
#[derive(Debug, Clone)]
pub struct MediaStore {
    root: PathBuf,
}

impl MediaStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of a stored file requested for direct download
    ///
    /// Returns `None` when `filename` is not a single plain path segment.
    pub fn media_path(&self, filename: &str) -> Option<PathBuf> {
        naming::is_plain_file_name(filename).then(|| self.root.join(filename))
    }

    /// Path of the metadata file for `id`
    pub fn metadata_path(&self, id: &str) -> PathBuf {
        self.root.join(format!("{id}{METADATA_SUFFIX}"))
    }
}
