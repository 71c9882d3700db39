//! Upload endpoint
//!
//! Expects a multipart form with:
//! - `audio`: the audio file, named `<hash>:<n>.<ext>` by the client
//! - `metadata`: a JSON object as text

use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::Serialize;
use tracing::{debug, error};

use crate::error::ApiResult;
use crate::store::{StagedAudio, UploadError, UploadReceipt};
use crate::AppState;

/// Form field carrying the audio file
pub const AUDIO_FIELD: &str = "audio";
/// Form field carrying the metadata JSON
pub const METADATA_FIELD: &str = "metadata";

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub message: String,
    pub id: String,
}

/// POST /upload
pub async fn upload(
    State(state): State<AppState>,
    multipart: Multipart,
) -> ApiResult<Json<UploadResponse>> {
    match receive_upload(&state, multipart).await {
        Ok(receipt) => Ok(Json(UploadResponse {
            message: "Upload success".to_string(),
            id: receipt.id,
        })),
        Err(e) => {
            error!("Upload failed: {}", e);
            Err(e)
        }
    }
}

async fn receive_upload(state: &AppState, mut multipart: Multipart) -> ApiResult<UploadReceipt> {
    let mut metadata: Option<String> = None;
    let mut audio: Option<(Option<String>, StagedAudio)> = None;

    while let Some(mut field) = multipart.next_field().await? {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some(METADATA_FIELD) => metadata = Some(field.text().await?),
            Some(AUDIO_FIELD) => {
                let declared = field.file_name().map(str::to_owned);
                let mut staged = state.store.stage_audio().await.map_err(UploadError::from)?;
                while let Some(chunk) = field.chunk().await? {
                    staged.write_chunk(&chunk).await.map_err(UploadError::from)?;
                }
                debug!(
                    bytes = staged.bytes_written(),
                    "Received audio field {:?}",
                    declared
                );
                // A repeated field replaces the earlier one, whose staging
                // file is removed on drop
                audio = Some((declared, staged));
            }
            other => debug!("Ignoring form field {:?}", other),
        }
    }

    let metadata = metadata.ok_or(UploadError::MissingField(METADATA_FIELD))?;
    let (declared, staged) = audio.ok_or(UploadError::MissingField(AUDIO_FIELD))?;

    let receipt = state
        .store
        .commit_upload(&metadata, declared.as_deref(), staged)
        .await?;
    Ok(receipt)
}
