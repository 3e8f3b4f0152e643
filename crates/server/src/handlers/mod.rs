//! # API Route Handlers
//!
//! Organizes the Axum route handlers for the `pubmeta-server`.

pub mod metadata;

pub use metadata::*;
