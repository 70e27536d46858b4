//! Database module for capture-metadata access.
//!
//! This module provides abstractions for the capture database via the
//! Repository pattern, allowing different storage backends to be swapped
//! easily:
//!
//! - `repository`: Trait definition for read-only capture queries
//! - `sqlite`: SQLite implementation over the capture daemon's database
//! - `local`: In-memory implementation for unit testing and local development
//!
//! The database is owned by the upstream capture daemon; every operation
//! here is read-only.

pub mod local;
pub mod models;
pub mod repository;
pub mod sqlite;

pub use local::LocalRepository;
pub use models::{Camera, CaptureImage, SqmPoint};
pub use repository::{CaptureRepository, RepositoryError, RepositoryResult};
pub use sqlite::SqliteRepository;
