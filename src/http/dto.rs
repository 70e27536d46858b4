//! Data Transfer Objects for the HTTP API.
//!
//! The response row types already live next to their business logic and are
//! re-exported here; this module adds the request-side query types.

use serde::{Deserialize, Deserializer, Serialize};

// Re-export existing DTOs that are already serializable
pub use crate::db::models::Camera;
pub use crate::services::captures::{ImageMeasurement, SeriesPoint};

/// Query parameters for the capture-metadata endpoints.
///
/// All fields are parsed leniently: a missing, non-numeric, or otherwise
/// mangled value becomes `None` and the handler substitutes its default.
/// Malformed caller input is never an HTTP error.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CaptureQuery {
    /// Row limit, clamped server-side into `[1, 100]`
    #[serde(default, deserialize_with = "lenient_i64")]
    pub limit: Option<i64>,
    /// Inclusive window start (unix seconds)
    #[serde(default, deserialize_with = "lenient_i64")]
    pub from: Option<i64>,
    /// Inclusive window end (unix seconds)
    #[serde(default, deserialize_with = "lenient_i64")]
    pub to: Option<i64>,
}

fn lenient_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|s| s.trim().parse().ok()))
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,
    /// Version of the API
    pub version: String,
    /// Database connection status
    pub database: String,
}
