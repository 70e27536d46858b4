//! Post-processing for capture-database query results.
//!
//! The repository returns raw rows newest-first; the dashboard wants
//! chronological order, web-visible paths, and no entries for files the
//! retention job has already deleted. Those three transformations, plus the
//! lenient handling of the caller-supplied `limit`, live here.

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

use crate::config::ArchiveSettings;
use crate::db::{CaptureRepository, RepositoryResult};

/// Smallest accepted `limit` value.
pub const MIN_LIMIT: i64 = 1;
/// Largest accepted `limit` value.
pub const MAX_LIMIT: i64 = 100;

/// One image row for the front-end viewer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageMeasurement {
    /// Web-visible path of the image file.
    pub file: String,
    /// Sky-quality reading taken with the capture, if any.
    pub measurement: Option<f64>,
}

/// One chart point: capture time (unix seconds) on x, magnitude on y.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub x: i64,
    pub y: f64,
}

/// Resolve the effective row limit for a request.
///
/// Supplied values are clamped into `[MIN_LIMIT, MAX_LIMIT]`; an absent (or
/// unparseable, which the DTO layer maps to absent) value falls back to the
/// configured default. Never an error.
pub fn clamp_limit(requested: Option<i64>, default: i64) -> i64 {
    match requested {
        Some(n) => n.clamp(MIN_LIMIT, MAX_LIMIT),
        None => default,
    }
}

/// Rewrite an archive path to its web-visible form by prefix substitution.
/// Paths outside the configured prefix pass through unchanged.
pub fn rewrite_path(path: &str, from: &str, to: &str) -> String {
    if !from.is_empty() && path.starts_with(from) {
        format!("{}{}", to, &path[from.len()..])
    } else {
        path.to_string()
    }
}

/// Most recent images for one camera as `{file, measurement}` rows.
///
/// Rows whose file no longer exists on disk are silently dropped, paths are
/// rewritten to the web prefix, and the list is reversed to chronological
/// (oldest-first) order.
pub async fn latest_images(
    repo: &dyn CaptureRepository,
    archive: &ArchiveSettings,
    camera_id: i64,
    limit: i64,
) -> RepositoryResult<Vec<ImageMeasurement>> {
    let rows = repo.latest_images(camera_id, limit).await?;

    let mut out = Vec::with_capacity(rows.len());
    for row in rows {
        if !Path::new(&row.filename).exists() {
            debug!(file = %row.filename, "capture file missing on disk, dropped from response");
            continue;
        }
        out.push(ImageMeasurement {
            file: rewrite_path(&row.filename, &archive.rewrite_from, &archive.rewrite_to),
            measurement: row.sqm,
        });
    }
    // Rows arrive newest-first; the viewer wants chronological order.
    out.reverse();
    Ok(out)
}

/// Sky-quality time series for one camera as `{x, y}` chart points in
/// chronological order.
pub async fn sqm_series(
    repo: &dyn CaptureRepository,
    camera_id: i64,
    limit: i64,
    from: Option<i64>,
    to: Option<i64>,
) -> RepositoryResult<Vec<SeriesPoint>> {
    let mut rows = repo.sqm_series(camera_id, limit, from, to).await?;
    rows.reverse();
    Ok(rows
        .into_iter()
        .map(|p| SeriesPoint {
            x: p.captured_at,
            y: p.sqm,
        })
        .collect())
}
