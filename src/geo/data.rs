// src/geo/data.rs
//! Track data structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// UTC instant with microsecond resolution.
pub type PathTime = DateTime<Utc>;

/// A position in decimal degrees with an elevation in metres.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
    pub elevation: f64,
}

impl Location {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            elevation: 0.0,
        }
    }

    pub fn with_elevation(latitude: f64, longitude: f64, elevation: f64) -> Self {
        Self {
            latitude,
            longitude,
            elevation,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.6}, {:.6})", self.latitude, self.longitude)
    }
}

/// A single fix on a track.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrackPoint {
    pub location: Location,
    pub timestamp: PathTime,
    pub sequence: usize,
}

impl TrackPoint {
    pub fn new(location: Location, timestamp: PathTime, sequence: usize) -> Self {
        Self {
            location,
            timestamp,
            sequence,
        }
    }

    /// A point stamped at the Unix epoch, mostly useful for building paths by hand.
    pub fn at(location: Location) -> Self {
        Self::new(location, DateTime::<Utc>::UNIX_EPOCH, 0)
    }
}

/// Ordered sequence of track points, oldest first.
pub type Track = Vec<TrackPoint>;

/// A value derived from a path (heading, speed, ...) tagged with a time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PathValue {
    pub value: f64,
    pub timestamp: PathTime,
}

impl PathValue {
    pub fn new(value: f64, timestamp: PathTime) -> Self {
        Self { value, timestamp }
    }
}

/// Aggregate figures for a path range, see `path::generate_path_summary`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PathSummary {
    pub points: usize,
    pub start_time: String,
    pub end_time: String,
    pub duration_s: f64,
    pub distance_m: f64,
    pub mean_speed_kph: f64,
}

/// Corners of an axis-aligned latitude/longitude box.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub nw: Location,
    pub ne: Location,
    pub se: Location,
    pub sw: Location,
}

impl BoundingBox {
    /// Closed outline NW, NE, SE, SW, NW.
    pub fn outline(&self) -> [Location; 5] {
        [self.nw, self.ne, self.se, self.sw, self.nw]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_display() {
        let loc = Location::new(52.9827588546699, -6.040081945988319);
        assert_eq!(loc.to_string(), "(52.982759, -6.040082)");
    }

    #[test]
    fn test_point_at_epoch() {
        let point = TrackPoint::at(Location::with_elevation(1.0, 2.0, 3.0));
        assert_eq!(point.timestamp.timestamp(), 0);
        assert_eq!(point.sequence, 0);
        assert_eq!(point.location.elevation, 3.0);
    }

    #[test]
    fn test_outline_is_closed() {
        let bbox = BoundingBox {
            nw: Location::new(2.0, 0.0),
            ne: Location::new(2.0, 1.0),
            se: Location::new(1.0, 1.0),
            sw: Location::new(1.0, 0.0),
        };
        let outline = bbox.outline();
        assert_eq!(outline[0], outline[4]);
    }
}
