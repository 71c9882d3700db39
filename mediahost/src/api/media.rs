//! Direct download of stored audio files

use axum::{
    extract::{Path, Request, State},
    response::{IntoResponse, Response},
};
use tokio::fs;
use tower::ServiceExt;
use tower_http::services::ServeFile;
use tracing::debug;

use crate::error::{ApiError, ApiResult};
use crate::AppState;

fn file_not_found() -> ApiError {
    ApiError::NotFound("File not found".to_string())
}

/// GET /resources/media/:filename
///
/// Streams the stored file with a content type guessed from its extension.
/// Range requests are honored so players can seek.
pub async fn serve_media(
    State(state): State<AppState>,
    Path(filename): Path<String>,
    request: Request,
) -> ApiResult<Response> {
    let path = state.store.media_path(&filename).ok_or_else(file_not_found)?;

    let is_file = match fs::metadata(&path).await {
        Ok(meta) => meta.is_file(),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => false,
        Err(e) => return Err(e.into()),
    };
    if !is_file {
        debug!("Requested media not found: {}", filename);
        return Err(file_not_found());
    }

    match ServeFile::new(&path).oneshot(request).await {
        Ok(response) => Ok(response.into_response()),
        Err(never) => match never {},
    }
}
