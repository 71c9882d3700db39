//! mediahost - audio upload and catalog service
//!
//! Stores uploaded audio files with JSON metadata sidecars in one flat
//! directory and serves the catalog plus direct downloads over HTTP.

pub mod api;
pub mod config;
pub mod error;
pub mod store;

pub use crate::config::Config;
pub use crate::error::{ApiError, ApiResult};

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderName, HeaderValue},
    routing::{get, post},
    Router,
};
use chrono::{DateTime, Utc};
use tower_http::{services::ServeDir, set_header::SetResponseHeaderLayer, trace::TraceLayer};
use tracing::warn;

use crate::store::MediaStore;

/// Cross-origin isolation headers added to every response
///
/// The client page uses `SharedArrayBuffer`, which browsers only expose to
/// cross-origin isolated documents.
pub const CROSS_ORIGIN_HEADERS: [(&str, &str); 2] = [
    ("cross-origin-opener-policy", "same-origin"),
    ("cross-origin-embedder-policy", "require-corp"),
];

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Storage directory handle
    pub store: MediaStore,
    pub config: Arc<Config>,
    /// Service startup timestamp for uptime tracking
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            store: MediaStore::new(config.storage_dir.clone()),
            config: Arc::new(config),
            startup_time: mediahost_common::time::now(),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    let body_limit = match state.config.max_upload_bytes {
        Some(bytes) => DefaultBodyLimit::max(bytes),
        None => DefaultBodyLimit::disable(),
    };

    let mut router = Router::new()
        .route("/", get(api::serve_index))
        .route("/resources/media/:filename", get(api::serve_media))
        .route("/api/list", get(api::list_catalog))
        .route("/upload", post(api::upload).layer(body_limit))
        .merge(api::health_routes());

    match &state.config.static_dir {
        Some(dir) if dir.is_dir() => {
            router = router.nest_service("/static", ServeDir::new(dir));
        }
        Some(dir) => warn!("Static directory {} not found, /static disabled", dir.display()),
        None => {}
    }

    let [(coop_name, coop_value), (coep_name, coep_value)] = CROSS_ORIGIN_HEADERS;

    router
        .fallback(api::fallback)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static(coop_name),
            HeaderValue::from_static(coop_value),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static(coep_name),
            HeaderValue::from_static(coep_value),
        ))
}
