// src/path/metrics.rs
//! Per-pair series and aggregate figures over a point range

use crate::geo::math::{distance, heading, mps_to_kph, speed};
use crate::geo::{BoundingBox, Location, PathSummary, PathValue, TrackPoint};
use crate::time::{duration_seconds, format_utc, seconds_between};

/// Piece-wise length of the path in metres.
///
/// Pairs whose distance is NaN are skipped.
pub fn path_distance(points: &[TrackPoint]) -> f64 {
    points
        .windows(2)
        .map(|pair| distance(&pair[0].location, &pair[1].location))
        .filter(|d| !d.is_nan())
        .sum()
}

/// Heading from each point to the next, tagged with the earlier point's time.
pub fn path_heading(points: &[TrackPoint]) -> Vec<PathValue> {
    points
        .windows(2)
        .map(|pair| PathValue::new(heading(&pair[0].location, &pair[1].location), pair[0].timestamp))
        .collect()
}

/// Speed in m/s between consecutive points, tagged with the earlier point's time.
///
/// Pairs with the same timestamp give an infinite speed.
pub fn path_speed(points: &[TrackPoint]) -> Vec<PathValue> {
    points
        .windows(2)
        .map(|pair| {
            let seconds = seconds_between(&pair[0].timestamp, &pair[1].timestamp);
            PathValue::new(speed(&pair[0].location, &pair[1].location, seconds), pair[0].timestamp)
        })
        .collect()
}

/// Running distance along the path, tagged with the later point's time.
pub fn path_cumulative_distance(points: &[TrackPoint]) -> Vec<PathValue> {
    let mut total = 0.0;

    points
        .windows(2)
        .map(|pair| {
            total += distance(&pair[0].location, &pair[1].location);
            PathValue::new(total, pair[1].timestamp)
        })
        .collect()
}

/// Latitude/longitude extremes of the range as NW, NE, SE, SW corners.
///
/// An empty range gives a zeroed box. Corner elevations are left at 0.
pub fn axis_aligned_bounding_box(points: &[TrackPoint]) -> BoundingBox {
    let Some(first) = points.first() else {
        return BoundingBox::default();
    };

    let mut min_lat = first.location.latitude;
    let mut max_lat = first.location.latitude;
    let mut min_lon = first.location.longitude;
    let mut max_lon = first.location.longitude;

    for point in points {
        min_lat = min_lat.min(point.location.latitude);
        max_lat = max_lat.max(point.location.latitude);
        min_lon = min_lon.min(point.location.longitude);
        max_lon = max_lon.max(point.location.longitude);
    }

    BoundingBox {
        nw: Location::new(max_lat, min_lon),
        ne: Location::new(max_lat, max_lon),
        se: Location::new(min_lat, max_lon),
        sw: Location::new(min_lat, min_lon),
    }
}

/// Summarise a range. Fewer than two points gives a zeroed summary
/// carrying only the point count.
pub fn generate_path_summary(points: &[TrackPoint]) -> PathSummary {
    let mut summary = PathSummary {
        points: points.len(),
        ..PathSummary::default()
    };

    if points.len() < 2 {
        return summary;
    }
    let first = &points[0];
    let last = &points[points.len() - 1];

    let seconds = duration_seconds(&first.timestamp, &last.timestamp) as f64;

    summary.start_time = format_utc(&first.timestamp);
    summary.end_time = format_utc(&last.timestamp);
    summary.duration_s = seconds;
    summary.distance_m = path_distance(points);

    let mean_speed = if seconds > 0.0 {
        summary.distance_m / seconds
    } else {
        0.0
    };
    summary.mean_speed_kph = mps_to_kph(mean_speed);

    summary
}
