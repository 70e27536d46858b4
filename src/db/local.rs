//! In-memory capture repository for unit testing and local development.

use async_trait::async_trait;
use parking_lot::RwLock;

use super::models::{Camera, CaptureImage, SqmPoint};
use super::repository::{CaptureRepository, RepositoryResult};

/// In-memory implementation of [`CaptureRepository`].
///
/// Rows are held in plain vectors; queries sort on demand, which is fine at
/// test scale.
#[derive(Default)]
pub struct LocalRepository {
    cameras: RwLock<Vec<Camera>>,
    images: RwLock<Vec<CaptureImage>>,
}

impl LocalRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a camera row.
    pub fn insert_camera(&self, camera: Camera) {
        self.cameras.write().push(camera);
    }

    /// Seed an image row.
    pub fn insert_image(&self, image: CaptureImage) {
        self.images.write().push(image);
    }
}

#[async_trait]
impl CaptureRepository for LocalRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(true)
    }

    async fn list_cameras(&self) -> RepositoryResult<Vec<Camera>> {
        let mut cameras = self.cameras.read().clone();
        cameras.sort_by_key(|c| c.id);
        Ok(cameras)
    }

    async fn latest_images(&self, camera_id: i64, limit: i64) -> RepositoryResult<Vec<CaptureImage>> {
        let mut rows: Vec<CaptureImage> = self
            .images
            .read()
            .iter()
            .filter(|img| img.camera_id == camera_id)
            .cloned()
            .collect();
        rows.sort_by_key(|img| std::cmp::Reverse(img.captured_at));
        rows.truncate(limit.max(0) as usize);
        Ok(rows)
    }

    async fn sqm_series(
        &self,
        camera_id: i64,
        limit: i64,
        from: Option<i64>,
        to: Option<i64>,
    ) -> RepositoryResult<Vec<SqmPoint>> {
        let mut rows: Vec<SqmPoint> = self
            .images
            .read()
            .iter()
            .filter(|img| img.camera_id == camera_id)
            .filter(|img| from.map_or(true, |f| img.captured_at >= f))
            .filter(|img| to.map_or(true, |t| img.captured_at <= t))
            .filter_map(|img| {
                img.sqm.map(|sqm| SqmPoint {
                    captured_at: img.captured_at,
                    sqm,
                })
            })
            .collect();
        rows.sort_by_key(|p| std::cmp::Reverse(p.captured_at));
        rows.truncate(limit.max(0) as usize);
        Ok(rows)
    }
}
