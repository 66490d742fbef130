use std::sync::Arc;

use axum::{
    extract::State,
    http::{StatusCode, Uri},
    response::{Html, Json, Response},
    routing::{get, post},
    Router,
};
use imagefit_core::MAX_DIMENSION;
use imagefit_imaging::ImageEngine;
use serde_json::{json, Value};

use crate::{error::ServerError, resize::resize_image};

/// Application state containing shared services
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<dyn ImageEngine>,
}

pub fn create_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/health", get(health_check))
        .route("/healthz", get(health_check))
        .route("/readyz", get(readiness_check));

    Router::new()
        .route("/", get(serve_form_index))
        .route("/ui/*path", get(serve_form_static))
        .route("/resize", post(resize_image))
        .nest("/api", api_routes)
        .with_state(state)
}

/// Basic health check endpoint
async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": "imagefit",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Readiness check that exercises the image engine on a known-good probe
async fn readiness_check(State(state): State<AppState>) -> Json<Value> {
    let engine_ready = state.engine.probe(PROBE_PNG).is_ok();

    Json(json!({
        "status": if engine_ready { "ready" } else { "not_ready" },
        "checks": {
            "engine": if engine_ready { "healthy" } else { "unhealthy" },
        }
    }))
}

// 1x1 transparent PNG used to verify the engine can probe at all
const PROBE_PNG: &[u8] = &[
    0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44,
    0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00, 0x1F,
    0x15, 0xC4, 0x89, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x44, 0x41, 0x54, 0x78, 0xDA, 0x63, 0x64,
    0x60, 0xF8, 0x5F, 0x0F, 0x00, 0x02, 0x87, 0x01, 0x80, 0xEB, 0x47, 0xBA, 0x92, 0x00, 0x00,
    0x00, 0x00, 0x49, 0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
];

/// Serve the resize form page.
///
/// The dimension ceiling is interpolated from [`MAX_DIMENSION`] at serve
/// time so the client-side limits can never drift from the server's.
async fn serve_form_index() -> Html<String> {
    let html = include_str!("../ui/index.html")
        .replace("__MAX_DIMENSION__", &MAX_DIMENSION.to_string());
    Html(html)
}

/// Serve form static files (CSS, JS)
async fn serve_form_static(uri: Uri) -> Result<Response, ServerError> {
    let path = uri.path();

    match path {
        "/ui/styles.css" => {
            let css_content = include_str!("../ui/styles.css");
            Ok(Response::builder()
                .status(StatusCode::OK)
                .header("content-type", "text/css")
                .body(css_content.into())
                .unwrap())
        }
        "/ui/app.js" => {
            let js_content = include_str!("../ui/app.js")
                .replace("__MAX_DIMENSION__", &MAX_DIMENSION.to_string());
            Ok(Response::builder()
                .status(StatusCode::OK)
                .header("content-type", "application/javascript")
                .body(js_content.into())
                .unwrap())
        }
        _ => Err(ServerError::NotFound("Static file not found".to_string())),
    }
}
