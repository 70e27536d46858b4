//! Business logic for the dashboard endpoints.
//!
//! - [`recent_images`]: the date/hour-bucketed archive scan
//! - [`captures`]: post-processing of capture-database rows (limit clamping,
//!   path rewriting, existence filtering, reordering)

pub mod captures;
pub mod recent_images;
