//! # Sky-Camera Dashboard Backend
//!
//! Backend for an all-sky astronomy-camera dashboard. It reads a capture
//! database (images, timestamps, sky-quality-meter readings) and a filesystem
//! image archive, and exposes the results as JSON (and one JavaScript snippet)
//! over a REST API consumed by the front-end chart and image viewer.
//!
//! ## Architecture
//!
//! The crate is organized into several logical modules:
//!
//! - [`config`]: TOML configuration with environment overrides
//! - [`db`]: Repository pattern over the SQLite capture database
//! - [`services`]: Business logic — the recent-image scan and capture-row
//!   post-processing (path rewriting, existence filtering, reordering)
//! - [`http`]: Axum-based HTTP server and request handlers
//!
//! The image archive itself is produced by an unrelated capture daemon; this
//! backend only ever reads filesystem metadata and never writes to the
//! database or the archive.

pub mod config;
pub mod db;
pub mod http;
pub mod services;
