use axum::{
    body::Bytes,
    extract::{Multipart, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use imagefit_core::dimensions;
use tracing::debug;

use crate::{
    error::{ServerError, ServerResult},
    routes::AppState,
};

/// Suggested filename attached to every successful response
pub const OUTPUT_FILENAME: &str = "resized_image.png";

/// Handle one resize request end to end.
///
/// Expects a multipart body with a binary `file` field and numeric `width`
/// and `height` fields. Validation order is fixed: file presence first, then
/// dimension validity. The probe/resolve/resize pipeline runs on a blocking
/// thread and is all-or-nothing; any engine failure surfaces as a generic
/// processing error.
pub async fn resize_image(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> ServerResult<Response> {
    let mut file_data: Option<Bytes> = None;
    let mut width_raw: Option<String> = None;
    let mut height_raw: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ServerError::BadRequest(format!("Invalid multipart data: {}", e)))?
    {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        match name.as_str() {
            "file" => {
                file_data = Some(field.bytes().await.map_err(|e| {
                    ServerError::BadRequest(format!("Failed to read file data: {}", e))
                })?);
            }
            "width" => {
                width_raw = Some(field.text().await.map_err(|e| {
                    ServerError::BadRequest(format!("Failed to read width field: {}", e))
                })?);
            }
            "height" => {
                height_raw = Some(field.text().await.map_err(|e| {
                    ServerError::BadRequest(format!("Failed to read height field: {}", e))
                })?);
            }
            _ => {}
        }
    }

    let data = match file_data {
        Some(data) if !data.is_empty() => data,
        _ => return Err(ServerError::MissingFile),
    };

    let width = parse_dimension(width_raw.as_deref())?;
    let height = parse_dimension(height_raw.as_deref())?;

    // Decode/resize/encode is CPU-bound; keep it off the async runtime
    let engine = state.engine.clone();
    let output = tokio::task::spawn_blocking(move || -> ServerResult<Vec<u8>> {
        let source = engine.probe(&data)?;
        let target = dimensions::resolve(width, height, source)?;

        debug!(
            source_width = source.width,
            source_height = source.height,
            target_width = target.width,
            target_height = target.height,
            "resolved target dimensions"
        );

        Ok(engine.resize(&data, target.width, target.height)?)
    })
    .await
    .map_err(|e| ServerError::Internal(format!("Resize task failed: {}", e)))??;

    let mut headers = HeaderMap::new();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("image/png"));
    headers.insert(
        header::CONTENT_LENGTH,
        output.len().to_string().parse().unwrap(),
    );

    let disposition = format!("attachment; filename=\"{}\"", OUTPUT_FILENAME);
    headers.insert(header::CONTENT_DISPOSITION, disposition.parse().unwrap());

    Ok((StatusCode::OK, headers, output).into_response())
}

/// Parse a raw multipart text field as a positive pixel dimension
fn parse_dimension(raw: Option<&str>) -> ServerResult<u32> {
    raw.and_then(|value| value.trim().parse::<u32>().ok())
        .filter(|&value| value > 0)
        .ok_or(ServerError::InvalidDimensions)
}

#[cfg(test)]
#[path = "resize_test.rs"]
mod tests;
