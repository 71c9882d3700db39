//! HTTP API handlers for mediahost

pub mod catalog;
pub mod health;
pub mod media;
pub mod ui;
pub mod upload;

pub use catalog::list_catalog;
pub use health::health_routes;
pub use media::serve_media;
pub use ui::{fallback, serve_index};
pub use upload::upload;
