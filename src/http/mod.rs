//! HTTP server module for the sky-camera dashboard backend.
//!
//! This module provides an axum-based HTTP server that exposes the capture
//! database and the image archive as a REST API. It reuses the service
//! layer and repository pattern from the core library.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  HTTP Layer (axum handlers)                               │
//! │  - Request parsing, lenient query handling                │
//! │  - JSON / JavaScript-snippet serialization                │
//! │  - CORS, compression, trace middleware                    │
//! └───────────────────┬──────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼──────────────────────────────────────┐
//! │  Service Layer (services/)                                │
//! │  - Recent-image bucket scan                               │
//! │  - Path rewriting, existence filtering, reordering        │
//! └───────────────────┬──────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼──────────────────────────────────────┐
//! │  Repository Layer (db/)                                   │
//! │  - SqliteRepository / LocalRepository                     │
//! └──────────────────────────────────────────────────────────┘
//! ```

pub mod dto;
pub mod error;
pub mod handlers;
pub mod router;
pub mod state;

pub use router::create_router;
pub use state::AppState;
