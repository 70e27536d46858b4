//! Row types for the capture database.
//!
//! The schema is owned by the capture daemon; these structs only mirror the
//! columns this backend reads.

use serde::{Deserialize, Serialize};

/// One camera known to the capture system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub id: i64,
    pub name: String,
}

/// One captured image row: where the file landed, when it was taken, and the
/// sky-quality-meter reading recorded alongside it (if any).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptureImage {
    pub id: i64,
    pub camera_id: i64,
    /// Capture time as unix seconds.
    pub captured_at: i64,
    /// Absolute path of the image file as written by the capture daemon.
    pub filename: String,
    /// Sky-quality-meter magnitude, NULL when the sensor had no reading.
    pub sqm: Option<f64>,
}

/// One point of the sky-quality time series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SqmPoint {
    pub captured_at: i64,
    pub sqm: f64,
}
