// src/path/search.rs
//! Linear searches over a point range
//!
//! Results are indices into the slice that was searched. `None` stands for
//! the end of the range, i.e. nothing found.

use crate::geo::math::distance;
use crate::geo::{Location, PathTime, TrackPoint};
use chrono::Duration;

/// Time-based closest point search.
///
/// Every candidate's delta is measured from the *first* point's timestamp,
/// not the candidate's, so no later point can beat the first one and a
/// non-empty range always yields `Some(0)`.
pub fn find_closest_path_point_time(points: &[TrackPoint], target: &PathTime) -> Option<usize> {
    let first = points.first()?;

    let mut closest = 0;
    let mut smallest_delta = first.timestamp - *target;

    for (index, _) in points.iter().enumerate() {
        let delta = first.timestamp - *target;
        if delta < smallest_delta {
            smallest_delta = delta;
            closest = index;
        }
    }

    Some(closest)
}

/// Index of the point nearest to `target`; ties keep the earliest point.
pub fn find_closest_path_point(points: &[TrackPoint], target: &Location) -> Option<usize> {
    let first = points.first()?;

    let mut closest = 0;
    let mut smallest_delta = distance(&first.location, target);

    for (index, point) in points.iter().enumerate() {
        let delta = distance(&point.location, target);
        if delta < smallest_delta {
            smallest_delta = delta;
            closest = index;
        }
    }

    Some(closest)
}

/// Mutable access to the point nearest to `target`.
pub fn find_closest_path_point_mut<'a>(
    points: &'a mut [TrackPoint],
    target: &Location,
) -> Option<&'a mut TrackPoint> {
    let index = find_closest_path_point(points, target)?;
    points.get_mut(index)
}

/// Index of the point farthest from `reference`; ties keep the earliest point.
pub fn find_farthest_point(points: &[TrackPoint], reference: &Location) -> Option<usize> {
    let first = points.first()?;

    let mut farthest = 0;
    let mut largest_delta = distance(&first.location, reference);

    for (index, point) in points.iter().enumerate() {
        let delta = distance(&point.location, reference);
        if delta > largest_delta {
            largest_delta = delta;
            farthest = index;
        }
    }

    Some(farthest)
}

/// First segment where the traveller stayed within `radius_m` of where the
/// segment started for longer than `min_duration_s`.
///
/// Single forward scan: each step checks the next point against the
/// segment start. While it stays inside the radius and the current point is
/// more than `min_duration_s` after the start, the segment qualifies. When
/// the next point leaves the radius, a qualified segment is returned as
/// `(start, current)`; otherwise the segment restarts at the current point.
/// A segment still open when the range ends is not reported. Durations
/// beyond what a timestamp difference can hold never (or, if negative,
/// always) count as exceeded.
pub fn find_stationary_points(
    points: &[TrackPoint],
    radius_m: f64,
    min_duration_s: i64,
) -> Option<(usize, usize)> {
    if points.len() < 2 {
        return None;
    }

    let min_duration = Duration::try_seconds(min_duration_s);
    let exceeds_min_duration = |elapsed: Duration| match min_duration {
        Some(min_duration) => elapsed > min_duration,
        None => min_duration_s < 0,
    };
    let mut start = 0;
    let mut time_ok = false;

    for current in 0..points.len() - 1 {
        let next = &points[current + 1];
        let delta = distance(&points[start].location, &next.location);

        if delta < radius_m {
            if exceeds_min_duration(points[current].timestamp - points[start].timestamp) {
                time_ok = true;
            }
        } else {
            if time_ok {
                return Some((start, current));
            }
            start = current;
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::test_support::{point, timed_point};
    use crate::time::parse_utc;

    fn loop_points() -> Vec<TrackPoint> {
        vec![
            point(52.988201, -6.413192),
            point(52.988222, -6.413189),
            point(52.98821, -6.413156),
            point(52.988189, -6.413176),
            point(52.988171, -6.413184),
            point(52.988148, -6.413189),
            point(52.988109, -6.413218),
        ]
    }

    #[test]
    fn test_closest_point_by_distance() {
        let points = loop_points();

        assert_eq!(find_closest_path_point(&[], &Location::new(52.988201, -6.413192)), None);
        assert_eq!(find_closest_path_point(&points, &Location::new(52.988201, -6.413192)), Some(0));
        assert_eq!(find_closest_path_point(&points, &Location::new(52.988189, -6.413176)), Some(3));
        assert_eq!(find_closest_path_point(&points, &Location::new(52.988179, -6.413166)), Some(3));
        assert_eq!(find_closest_path_point(&points, &Location::new(52.988119, -6.413208)), Some(6));
    }

    #[test]
    fn test_closest_point_ties_keep_first() {
        let points = [point(1.0, 1.0), point(2.0, 2.0), point(1.0, 1.0)];
        assert_eq!(find_closest_path_point(&points, &Location::new(1.0, 1.0)), Some(0));
    }

    #[test]
    fn test_closest_point_in_sub_range_is_relative() {
        let points = loop_points();
        let found = find_closest_path_point(&points[2..], &Location::new(52.988189, -6.413176));
        assert_eq!(found, Some(1));
    }

    #[test]
    fn test_closest_point_mut() {
        let mut points = loop_points();
        if let Some(p) = find_closest_path_point_mut(&mut points, &Location::new(52.988119, -6.413208)) {
            p.location.elevation = 99.0;
        }
        assert_eq!(points[6].location.elevation, 99.0);
        assert!(find_closest_path_point_mut(&mut [], &Location::new(0.0, 0.0)).is_none());
    }

    #[test]
    fn test_closest_point_by_time_stays_on_first() {
        let points = [
            timed_point(52.0, -6.0, "2022-05-07T10:00:00Z"),
            timed_point(52.0, -6.0, "2022-05-07T10:00:10Z"),
            timed_point(52.0, -6.0, "2022-05-07T10:00:20Z"),
        ];
        let target = parse_utc("2022-05-07T10:00:19Z").unwrap();

        assert_eq!(find_closest_path_point_time(&points, &target), Some(0));
        assert_eq!(find_closest_path_point_time(&points[1..], &target), Some(0));
        assert_eq!(find_closest_path_point_time(&[], &target), None);
    }

    #[test]
    fn test_farthest_point() {
        let points = loop_points();
        assert_eq!(find_farthest_point(&points, &points[0].location), Some(6));
        assert_eq!(find_farthest_point(&[], &points[0].location), None);

        let ties = [point(0.0, 0.0), point(0.0, 1.0), point(0.0, -1.0)];
        assert_eq!(find_farthest_point(&ties, &Location::new(0.0, 0.0)), Some(1));
    }

    #[test]
    fn test_stationary_segment_found() {
        // Moving, then ~5 minutes parked within a few metres, then moving again.
        let points = [
            timed_point(52.9800, -6.0400, "2022-05-07T10:00:00Z"),
            timed_point(52.9810, -6.0400, "2022-05-07T10:01:00Z"),
            timed_point(52.98101, -6.0400, "2022-05-07T10:02:00Z"),
            timed_point(52.98102, -6.0400, "2022-05-07T10:04:00Z"),
            timed_point(52.98101, -6.04001, "2022-05-07T10:06:00Z"),
            timed_point(52.9820, -6.0400, "2022-05-07T10:07:00Z"),
            timed_point(52.9830, -6.0400, "2022-05-07T10:08:00Z"),
        ];

        assert_eq!(find_stationary_points(&points, 10.0, 120), Some((1, 4)));
    }

    #[test]
    fn test_stationary_segment_needs_time() {
        let points = [
            timed_point(52.9800, -6.0400, "2022-05-07T10:00:00Z"),
            timed_point(52.9810, -6.0400, "2022-05-07T10:01:00Z"),
            timed_point(52.98101, -6.0400, "2022-05-07T10:01:30Z"),
            timed_point(52.9820, -6.0400, "2022-05-07T10:02:00Z"),
        ];

        assert_eq!(find_stationary_points(&points, 10.0, 120), None);
    }

    #[test]
    fn test_stationary_no_stop() {
        let points: Vec<TrackPoint> = (0..10)
            .map(|i| {
                let mut p = timed_point(52.98 + i as f64 * 0.001, -6.04, "2022-05-07T10:00:00Z");
                p.timestamp += Duration::minutes(i);
                p
            })
            .collect();

        assert_eq!(find_stationary_points(&points, 10.0, 60), None);
        assert_eq!(find_stationary_points(&[], 10.0, 60), None);
        assert_eq!(find_stationary_points(&points[..1], 10.0, 60), None);
    }

    #[test]
    fn test_stationary_elapsed_must_exceed_minimum() {
        let points = [
            timed_point(52.98101, -6.0400, "2022-05-07T10:00:00Z"),
            timed_point(52.98102, -6.0400, "2022-05-07T10:01:00Z"),
            timed_point(52.98101, -6.04001, "2022-05-07T10:02:00Z"),
            timed_point(52.98102, -6.04001, "2022-05-07T10:03:00Z"),
            timed_point(52.9820, -6.0400, "2022-05-07T10:04:00Z"),
        ];

        // Point 2 is the last one time-checked, exactly 120s after the start.
        assert_eq!(find_stationary_points(&points, 10.0, 120), None);
        assert_eq!(find_stationary_points(&points, 10.0, 119), Some((0, 3)));
    }

    #[test]
    fn test_stationary_extreme_durations() {
        let points = [
            timed_point(52.98101, -6.0400, "2022-05-07T10:00:00Z"),
            timed_point(52.98101, -6.0400, "2022-05-07T10:00:10Z"),
            timed_point(52.98101, -6.0400, "2022-05-07T10:00:20Z"),
            timed_point(52.9820, -6.0400, "2022-05-07T10:00:30Z"),
        ];

        assert_eq!(find_stationary_points(&points[..2], 10.0, i64::MAX), None);
        assert_eq!(find_stationary_points(&points, 10.0, i64::MAX), None);
        assert_eq!(find_stationary_points(&points, 10.0, i64::MIN), Some((0, 2)));
    }
}
