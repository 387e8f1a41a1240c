// src/path/mod.rs
//! Analytics over ranges of track points
//!
//! Every function takes a slice, so a sub-range is analysed by slicing.
//! Inputs are never modified. Ranges too small for an operation give an
//! empty or zeroed result rather than an error.

pub mod filters;
pub mod metrics;
pub mod search;

pub use filters::{first_central_difference, first_forward_difference, smooth};
pub use metrics::{
    axis_aligned_bounding_box, generate_path_summary, path_cumulative_distance, path_distance,
    path_heading, path_speed,
};
pub use search::{
    find_closest_path_point, find_closest_path_point_mut, find_closest_path_point_time,
    find_farthest_point, find_stationary_points,
};
