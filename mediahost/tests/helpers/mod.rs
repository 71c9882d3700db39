//! Shared helpers for mediahost integration tests
#![allow(dead_code)]

use axum::body::Body;
use axum::http::{header, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use mediahost::{build_router, AppState, Config};
use serde_json::Value;
use std::path::Path;
use tempfile::TempDir;
use tower::ServiceExt; // for `oneshot`

pub const BOUNDARY: &str = "----mediahost-test-boundary";

/// Router over a fresh temporary storage directory
pub struct TestApp {
    pub dir: TempDir,
    pub router: Router,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_config(|_| {})
    }

    pub fn with_config(adjust: impl FnOnce(&mut Config)) -> Self {
        let dir = TempDir::new().unwrap();
        let mut config = Config::new(dir.path());
        adjust(&mut config);
        let router = build_router(AppState::new(config));
        Self { dir, router }
    }

    pub fn storage(&self) -> &Path {
        self.dir.path()
    }

    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router.clone().oneshot(request).await.unwrap()
    }

    pub async fn get(&self, uri: &str) -> Response<Body> {
        self.send(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
    }

    pub async fn upload(&self, parts: &[Part<'_>]) -> Response<Body> {
        self.send(upload_request(parts)).await
    }

    /// Upload `bytes` as `filename` with the given metadata and expect success
    pub async fn upload_ok(&self, filename: &str, bytes: &[u8], metadata: &str) -> Value {
        let response = self
            .upload(&[
                Part::file("audio", Some(filename), bytes),
                Part::text("metadata", metadata),
            ])
            .await;
        assert!(response.status().is_success(), "upload failed: {}", response.status());
        json_body(response).await
    }

    /// Sorted file names in the storage directory
    pub fn stored_files(&self) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(self.storage())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }
}

/// One multipart form part
pub enum Part<'a> {
    File {
        name: &'a str,
        filename: Option<&'a str>,
        bytes: &'a [u8],
    },
    Text {
        name: &'a str,
        value: &'a str,
    },
}

impl<'a> Part<'a> {
    pub fn file(name: &'a str, filename: Option<&'a str>, bytes: &'a [u8]) -> Self {
        Part::File { name, filename, bytes }
    }

    pub fn text(name: &'a str, value: &'a str) -> Self {
        Part::Text { name, value }
    }
}

pub fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match part {
            Part::File { name, filename, bytes } => {
                let disposition = match filename {
                    Some(filename) => format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\n"
                    ),
                    None => format!("Content-Disposition: form-data; name=\"{name}\"\r\n"),
                };
                body.extend_from_slice(disposition.as_bytes());
                body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
                body.extend_from_slice(bytes);
            }
            Part::Text { name, value } => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
                );
                body.extend_from_slice(value.as_bytes());
            }
        }
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

pub fn upload_request(parts: &[Part<'_>]) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/upload")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(multipart_body(parts)))
        .unwrap()
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .expect("Should read body")
        .to_bytes()
        .to_vec()
}

pub async fn json_body(response: Response<Body>) -> Value {
    serde_json::from_slice(&body_bytes(response).await).expect("Should parse JSON")
}
