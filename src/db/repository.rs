//! Repository trait and error types for capture-database access.

use async_trait::async_trait;

use super::models::{Camera, CaptureImage, SqmPoint};

/// Result type for repository operations.
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Error type for repository operations.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// Database file could not be opened or the connection dropped.
    #[error("Connection error: {0}")]
    Connection(String),

    /// SQL query execution errors.
    #[error("Query error: {0}")]
    Query(String),
}

/// Read-only queries against the capture-metadata store.
///
/// Every method filters by camera identity and/or a time window and returns
/// rows newest-first; presentation-order concerns (reversal to chronological
/// order, path rewriting, existence filtering) live in the service layer.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to work with async Rust.
#[async_trait]
pub trait CaptureRepository: Send + Sync {
    /// Check that the underlying store is reachable.
    async fn health_check(&self) -> RepositoryResult<bool>;

    /// List all cameras known to the capture system.
    async fn list_cameras(&self) -> RepositoryResult<Vec<Camera>>;

    /// The most recent `limit` images for one camera, newest first.
    ///
    /// An unknown camera id yields an empty list, not an error.
    async fn latest_images(&self, camera_id: i64, limit: i64) -> RepositoryResult<Vec<CaptureImage>>;

    /// Sky-quality readings for one camera, newest first, capped at `limit`
    /// rows. `from`/`to` bound the capture time inclusively when present.
    /// Rows without a reading are excluded.
    async fn sqm_series(
        &self,
        camera_id: i64,
        limit: i64,
        from: Option<i64>,
        to: Option<i64>,
    ) -> RepositoryResult<Vec<SqmPoint>>;
}
