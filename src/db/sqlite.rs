//! SQLite implementation of the capture repository.
//!
//! Opens the capture daemon's database read-only. `rusqlite::Connection` is
//! not `Sync`, so the connection sits behind a `parking_lot::Mutex`; the
//! queries are small single-statement reads, so holding the lock across one
//! query is fine.

use async_trait::async_trait;
use parking_lot::Mutex;
use rusqlite::{Connection, OpenFlags};
use std::path::Path;
use tracing::info;

use super::models::{Camera, CaptureImage, SqmPoint};
use super::repository::{CaptureRepository, RepositoryError, RepositoryResult};

/// Capture repository backed by the daemon's SQLite database.
pub struct SqliteRepository {
    conn: Mutex<Connection>,
}

impl SqliteRepository {
    /// Open the capture database read-only.
    pub fn open<P: AsRef<Path>>(path: P) -> RepositoryResult<Self> {
        let conn = Connection::open_with_flags(
            path.as_ref(),
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(|e| RepositoryError::Connection(e.to_string()))?;

        info!(database = %path.as_ref().display(), "capture database opened");
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }
}

fn query_error(e: rusqlite::Error) -> RepositoryError {
    RepositoryError::Query(e.to_string())
}

#[async_trait]
impl CaptureRepository for SqliteRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        let conn = self.conn.lock();
        let one: i64 = conn
            .query_row("SELECT 1", [], |row| row.get(0))
            .map_err(query_error)?;
        Ok(one == 1)
    }

    async fn list_cameras(&self) -> RepositoryResult<Vec<Camera>> {
        let conn = self.conn.lock();
        let mut stmt = conn
            .prepare("SELECT id, name FROM camera ORDER BY id")
            .map_err(query_error)?;
        let rows = stmt
            .query_map([], |row| {
                Ok(Camera {
                    id: row.get(0)?,
                    name: row.get(1)?,
                })
            })
            .map_err(query_error)?;

        rows.collect::<Result<Vec<_>, _>>().map_err(query_error)
    }

    async fn latest_images(&self, camera_id: i64, limit: i64) -> RepositoryResult<Vec<CaptureImage>> {
        let conn = self.conn.lock();
        let mut stmt = conn
            .prepare(
                "SELECT id, camera_id, captured_at, filename, sqm
                   FROM image
                  WHERE camera_id = ?1
                  ORDER BY captured_at DESC
                  LIMIT ?2",
            )
            .map_err(query_error)?;
        let rows = stmt
            .query_map(rusqlite::params![camera_id, limit], |row| {
                Ok(CaptureImage {
                    id: row.get(0)?,
                    camera_id: row.get(1)?,
                    captured_at: row.get(2)?,
                    filename: row.get(3)?,
                    sqm: row.get(4)?,
                })
            })
            .map_err(query_error)?;

        rows.collect::<Result<Vec<_>, _>>().map_err(query_error)
    }

    async fn sqm_series(
        &self,
        camera_id: i64,
        limit: i64,
        from: Option<i64>,
        to: Option<i64>,
    ) -> RepositoryResult<Vec<SqmPoint>> {
        let conn = self.conn.lock();
        let mut stmt = conn
            .prepare(
                "SELECT captured_at, sqm
                   FROM image
                  WHERE camera_id = ?1
                    AND sqm IS NOT NULL
                    AND (?2 IS NULL OR captured_at >= ?2)
                    AND (?3 IS NULL OR captured_at <= ?3)
                  ORDER BY captured_at DESC
                  LIMIT ?4",
            )
            .map_err(query_error)?;
        let rows = stmt
            .query_map(rusqlite::params![camera_id, from, to, limit], |row| {
                Ok(SqmPoint {
                    captured_at: row.get(0)?,
                    sqm: row.get(1)?,
                })
            })
            .map_err(query_error)?;

        rows.collect::<Result<Vec<_>, _>>().map_err(query_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // The read-only sqlite backend is exercised against a fixture database
    // in tests/sqlite_repository_tests.rs; here we only pin the open-failure
    // path, which must not create the file.
    #[test]
    fn test_open_missing_database_is_a_connection_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("does-not-exist.db");

        let result = SqliteRepository::open(&path);
        assert!(matches!(result, Err(RepositoryError::Connection(_))));
        assert!(!path.exists());
    }
}
