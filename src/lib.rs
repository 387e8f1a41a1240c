// src/lib.rs
//! GPS Path Tools Library
//!
//! Geodesic metrics over tracks of timestamped GPS fixes, plus a streaming
//! decoder and a minimal writer for GPX track files.

pub mod config;
pub mod display;
pub mod error;
pub mod geo;
pub mod path;
pub mod time;
pub mod track;

// Re-export main types for convenience
pub use error::{Result, TrackError};
pub use geo::{BoundingBox, Location, PathSummary, PathTime, PathValue, Track, TrackPoint};
pub use track::{load_track, save_track};
