use super::*;
use crate::routes::{create_router, AppState};
use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
};
use imagefit_core::SourceMetadata;
use imagefit_imaging::{ImageEngine, ImagingError, ImagingResult};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

/// Engine stub that reports a fixed source size and echoes back the
/// dimensions it was asked to resize to
struct MockEngine {
    source: Option<SourceMetadata>,
}

impl MockEngine {
    fn with_source(width: u32, height: u32) -> Self {
        Self {
            source: Some(SourceMetadata { width, height }),
        }
    }

    fn failing() -> Self {
        Self { source: None }
    }
}

impl ImageEngine for MockEngine {
    fn probe(&self, _data: &[u8]) -> ImagingResult<SourceMetadata> {
        self.source.ok_or(ImagingError::UnsupportedFormat)
    }

    fn resize(&self, _data: &[u8], width: u32, height: u32) -> ImagingResult<Vec<u8>> {
        Ok(format!("{}x{}", width, height).into_bytes())
    }
}

fn test_app(engine: MockEngine) -> axum::Router {
    create_router(AppState {
        engine: Arc::new(engine),
    })
}

const BOUNDARY: &str = "test-boundary";

/// Build a multipart POST to /resize. `filename` marks a part as binary.
fn multipart_request(parts: &[(&str, Option<&str>, &[u8])]) -> Request<Body> {
    let mut body = Vec::new();
    for (name, filename, content) in parts {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        match filename {
            Some(filename) => body.extend_from_slice(
                format!(
                    "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: application/octet-stream\r\n\r\n",
                    name, filename
                )
                .as_bytes(),
            ),
            None => body.extend_from_slice(
                format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", name).as_bytes(),
            ),
        }
        body.extend_from_slice(content);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());

    Request::builder()
        .method("POST")
        .uri("/resize")
        .header(
            "content-type",
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap()
}

async fn error_message(response: axum::response::Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json: Value = serde_json::from_slice(&bytes).unwrap();
    json["error"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn wide_source_gets_height_recomputed() {
    let app = test_app(MockEngine::with_source(4000, 2000));
    let request = multipart_request(&[
        ("file", Some("photo.png"), b"fake image bytes".as_slice()),
        ("width", None, b"500".as_slice()),
        ("height", None, b"500".as_slice()),
    ]);

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    assert_eq!(
        response.headers()["content-type"].to_str().unwrap(),
        "image/png"
    );
    assert_eq!(
        response.headers()["content-disposition"].to_str().unwrap(),
        "attachment; filename=\"resized_image.png\""
    );

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&bytes[..], b"500x250");
}

#[tokio::test]
async fn tall_source_gets_width_recomputed() {
    let app = test_app(MockEngine::with_source(1000, 2000));
    let request = multipart_request(&[
        ("file", Some("photo.png"), b"fake image bytes".as_slice()),
        ("width", None, b"800".as_slice()),
        ("height", None, b"800".as_slice()),
    ]);

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&bytes[..], b"400x800");
}

#[tokio::test]
async fn oversized_request_is_clamped() {
    let app = test_app(MockEngine::with_source(100, 100));
    let request = multipart_request(&[
        ("file", Some("photo.png"), b"fake image bytes".as_slice()),
        ("width", None, b"20000".as_slice()),
        ("height", None, b"20000".as_slice()),
    ]);

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&bytes[..], b"10000x10000");
}

#[tokio::test]
async fn missing_file_is_rejected() {
    let app = test_app(MockEngine::with_source(100, 100));
    let request = multipart_request(&[
        ("width", None, b"500".as_slice()),
        ("height", None, b"500".as_slice()),
    ]);

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(error_message(response).await, "No file provided");
}

#[tokio::test]
async fn empty_file_counts_as_missing() {
    let app = test_app(MockEngine::with_source(100, 100));
    let request = multipart_request(&[
        ("file", Some("photo.png"), b"".as_slice()),
        ("width", None, b"500".as_slice()),
        ("height", None, b"500".as_slice()),
    ]);

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(error_message(response).await, "No file provided");
}

#[tokio::test]
async fn missing_file_wins_over_invalid_dimensions() {
    let app = test_app(MockEngine::with_source(100, 100));
    let request = multipart_request(&[
        ("width", None, b"abc".as_slice()),
        ("height", None, b"-3".as_slice()),
    ]);

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(error_message(response).await, "No file provided");
}

#[tokio::test]
async fn invalid_dimensions_are_rejected() {
    for (width, height) in [
        (b"0".as_slice(), b"5".as_slice()),
        (b"-3".as_slice(), b"500".as_slice()),
        (b"abc".as_slice(), b"500".as_slice()),
        (b"500".as_slice(), b"2.5".as_slice()),
        (b"".as_slice(), b"500".as_slice()),
    ] {
        let app = test_app(MockEngine::with_source(100, 100));
        let request = multipart_request(&[
            ("file", Some("photo.png"), b"fake image bytes".as_slice()),
            ("width", None, width),
            ("height", None, height),
        ]);

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(
            response.status(),
            StatusCode::BAD_REQUEST,
            "width={:?} height={:?}",
            width,
            height
        );
        assert_eq!(error_message(response).await, "Invalid width or height");
    }
}

#[tokio::test]
async fn absent_dimension_fields_are_rejected() {
    let app = test_app(MockEngine::with_source(100, 100));
    let request =
        multipart_request(&[("file", Some("photo.png"), b"fake image bytes".as_slice())]);

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(error_message(response).await, "Invalid width or height");
}

#[tokio::test]
async fn engine_failure_reports_generic_processing_error() {
    let app = test_app(MockEngine::failing());
    let request = multipart_request(&[
        ("file", Some("photo.png"), b"not actually an image".as_slice()),
        ("width", None, b"500".as_slice()),
        ("height", None, b"500".as_slice()),
    ]);

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(error_message(response).await, "Failed to process image");
}

#[test]
fn parse_dimension_accepts_positive_integers() {
    assert_eq!(parse_dimension(Some("500")).unwrap(), 500);
    assert_eq!(parse_dimension(Some(" 42 ")).unwrap(), 42);
    assert_eq!(parse_dimension(Some("1")).unwrap(), 1);
}

#[test]
fn parse_dimension_rejects_everything_else() {
    assert!(parse_dimension(None).is_err());
    assert!(parse_dimension(Some("")).is_err());
    assert!(parse_dimension(Some("0")).is_err());
    assert!(parse_dimension(Some("-3")).is_err());
    assert!(parse_dimension(Some("abc")).is_err());
    assert!(parse_dimension(Some("2.5")).is_err());
    assert!(parse_dimension(Some("500px")).is_err());
}
