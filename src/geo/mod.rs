// src/geo/mod.rs
//! Locations, track points and spherical geodesy

pub mod data;
pub mod math;

pub use data::{BoundingBox, Location, PathSummary, PathTime, PathValue, Track, TrackPoint};
pub use math::{cardinal_direction, distance, distance_gc, distance_vec, heading, speed};
