//! Catalog listing endpoint

use axum::{extract::State, Json};

use crate::store::MetadataRecord;
use crate::AppState;

/// GET /api/list
///
/// Every metadata record in the storage directory, newest first. Records
/// that fail to parse are absent from the list rather than failing it.
pub async fn list_catalog(State(state): State<AppState>) -> Json<Vec<MetadataRecord>> {
    Json(state.store.list_records().await)
}
