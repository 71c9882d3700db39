//! Entry page and fallback

use axum::response::Html;

use crate::error::ApiError;

const INDEX_HTML: &str = include_str!("../../ui/index.html");

/// GET /
///
/// Serves the client application's entry page
pub async fn serve_index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// Any route not matched above
pub async fn fallback() -> ApiError {
    ApiError::NotFound("Not found".to_string())
}
