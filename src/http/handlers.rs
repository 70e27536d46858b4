//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the
//! service layer for business logic.

use axum::{
    extract::{Path, Query, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Local;

use super::dto::{Camera, CaptureQuery, HealthResponse, ImageMeasurement, SeriesPoint};
use super::error::AppError;
use super::state::AppState;
use crate::services::captures;
use crate::services::recent_images::find_recent_images;

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
///
/// Health check endpoint to verify the service is running and database is accessible.
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let db_status = match state.repository.health_check().await {
        Ok(true) => "connected".to_string(),
        Ok(false) => "disconnected".to_string(),
        Err(e) => format!("error: {}", e),
    };

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: "v1".to_string(),
        database: db_status,
    }))
}

// =============================================================================
// Capture Metadata
// =============================================================================

/// GET /v1/cameras
///
/// List all cameras known to the capture system.
pub async fn list_cameras(State(state): State<AppState>) -> HandlerResult<Vec<Camera>> {
    let cameras = state.repository.list_cameras().await?;
    Ok(Json(cameras))
}

/// GET /v1/cameras/{camera_id}/images
///
/// Most recent images for one camera as `{file, measurement}` rows in
/// chronological order. Rows whose file is gone from disk are dropped.
pub async fn camera_images(
    State(state): State<AppState>,
    Path(camera_id): Path<i64>,
    Query(query): Query<CaptureQuery>,
) -> HandlerResult<Vec<ImageMeasurement>> {
    let limit = captures::clamp_limit(query.limit, state.config.query.default_limit);
    let rows = captures::latest_images(
        state.repository.as_ref(),
        &state.config.archive,
        camera_id,
        limit,
    )
    .await?;
    Ok(Json(rows))
}

/// GET /v1/cameras/{camera_id}/sqm
///
/// Sky-quality time series for one camera as `{x, y}` chart points in
/// chronological order, optionally bounded by `from`/`to` (unix seconds).
pub async fn camera_sqm(
    State(state): State<AppState>,
    Path(camera_id): Path<i64>,
    Query(query): Query<CaptureQuery>,
) -> HandlerResult<Vec<SeriesPoint>> {
    let limit = captures::clamp_limit(query.limit, state.config.query.default_limit);
    let points = captures::sqm_series(
        state.repository.as_ref(),
        camera_id,
        limit,
        query.from,
        query.to,
    )
    .await?;
    Ok(Json(points))
}

// =============================================================================
// Recent-Image Finder
// =============================================================================

/// GET /v1/recent-images
///
/// JSON array of web-visible paths of images captured in the four recent
/// day/night hour buckets, sorted ascending by modification time.
pub async fn recent_images(State(state): State<AppState>) -> HandlerResult<Vec<String>> {
    let paths = scan_recent(&state).await?;
    Ok(Json(paths))
}

/// GET /v1/recent-images.js
///
/// The same list wrapped in the `getImages` JavaScript snippet the legacy
/// front-end viewer loads with a script tag.
pub async fn recent_images_script(State(state): State<AppState>) -> Result<Response, AppError> {
    let paths = scan_recent(&state).await?;
    let body = render_get_images_script(&paths);
    Ok(([(header::CONTENT_TYPE, "application/javascript")], body).into_response())
}

/// Run the archive scan off the async runtime and rewrite results to their
/// web-visible form.
async fn scan_recent(state: &AppState) -> Result<Vec<String>, AppError> {
    let scan = state.config.archive.scan_config();
    let paths = tokio::task::spawn_blocking(move || {
        let reference = Local::now().naive_local();
        find_recent_images(&scan, reference)
    })
    .await
    .map_err(|e| AppError::Internal(format!("Task join error: {}", e)))?;

    let archive = &state.config.archive;
    Ok(paths
        .iter()
        .map(|p| captures::rewrite_path(&p.to_string_lossy(), &archive.rewrite_from, &archive.rewrite_to))
        .collect())
}

/// Render the image list as the `getImages(maxImages)` snippet. The cap is
/// applied client-side by slicing from the front of the array, keeping the
/// newest entries.
fn render_get_images_script(paths: &[String]) -> String {
    let array = serde_json::to_string(paths).unwrap_or_else(|_| "[]".to_string());
    format!(
        "function getImages(maxImages) {{\n  \
           var image_list = {array};\n  \
           if (maxImages && image_list.length > maxImages) {{\n    \
             image_list = image_list.slice(image_list.length - maxImages);\n  \
           }}\n  \
           return image_list;\n\
         }}\n"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_images_script_embeds_json_array() {
        let script = render_get_images_script(&[
            "/images/a.jpg".to_string(),
            "/images/b.jpg".to_string(),
        ]);
        assert!(script.starts_with("function getImages(maxImages)"));
        assert!(script.contains(r#"var image_list = ["/images/a.jpg","/images/b.jpg"];"#));
        assert!(script.contains("image_list.slice(image_list.length - maxImages)"));
        assert!(script.trim_end().ends_with("}"));
    }

    #[test]
    fn test_get_images_script_empty_list() {
        let script = render_get_images_script(&[]);
        assert!(script.contains("var image_list = [];"));
    }
}
