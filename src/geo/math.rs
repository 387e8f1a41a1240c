// src/geo/math.rs
//! Spherical-earth geodesy: distances, bearings and unit helpers

use super::data::Location;

/// Mean radius of the geoid in metres, used by the haversine `distance`.
pub const GEOID_RADIUS_M: f64 = 6_371_009.0;

/// Radius used by the dot-product great-circle variants.
pub const GREAT_CIRCLE_RADIUS_M: f64 = 6_378_100.0;

const CARDINALS: [(f64, &str); 9] = [
    (0.0, "N"),
    (45.0, "NE"),
    (90.0, "E"),
    (135.0, "SE"),
    (190.0, "S"),
    (225.0, "SW"),
    (270.0, "W"),
    (315.0, "NW"),
    (360.0, "N"),
];

/// Haversine of an angle in radians
pub fn hav(theta: f64) -> f64 {
    let s = (theta / 2.0).sin();
    s * s
}

/// Inverse haversine
pub fn ahav(h: f64) -> f64 {
    2.0 * h.sqrt().asin()
}

/// Great-circle distance in metres using the haversine formula.
pub fn distance(a: &Location, b: &Location) -> f64 {
    let lat1 = a.latitude.to_radians();
    let lon1 = a.longitude.to_radians();
    let lat2 = b.latitude.to_radians();
    let lon2 = b.longitude.to_radians();

    let dlat = lat2 - lat1;
    let dlon = lon2 - lon1;

    GEOID_RADIUS_M * ahav(hav(dlat) + lat1.cos() * lat2.cos() * hav(dlon))
}

/// Great-circle distance in metres from the angle between the two
/// positions' unit vectors.
pub fn distance_vec(a: &Location, b: &Location) -> f64 {
    let lat1 = a.latitude.to_radians();
    let lon1 = a.longitude.to_radians();
    let lat2 = b.latitude.to_radians();
    let lon2 = b.longitude.to_radians();

    // Radius cancels out of the unit vectors, it only scales the angle.
    let rho1 = lat1.cos();
    let (x1, y1, z1) = (rho1 * lon1.cos(), rho1 * lon1.sin(), lat1.sin());

    let rho2 = lat2.cos();
    let (x2, y2, z2) = (rho2 * lon2.cos(), rho2 * lon2.sin(), lat2.sin());

    let cos_theta = (x1 * x2 + y1 * y2 + z1 * z2).clamp(-1.0, 1.0);

    GREAT_CIRCLE_RADIUS_M * cos_theta.acos()
}

/// Great-circle distance in metres using the spherical law of cosines.
pub fn distance_gc(a: &Location, b: &Location) -> f64 {
    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();
    let dlon = (b.longitude - a.longitude).to_radians();

    let cos_theta = (lat1.sin() * lat2.sin() + lat1.cos() * lat2.cos() * dlon.cos()).clamp(-1.0, 1.0);

    GREAT_CIRCLE_RADIUS_M * cos_theta.acos()
}

/// Initial bearing from `a` towards `b` in degrees, in [0, 360).
///
/// Coincident points give 0.
pub fn heading(a: &Location, b: &Location) -> f64 {
    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();
    let dlon = (b.longitude - a.longitude).to_radians();

    let x = lat2.cos() * dlon.sin();
    let y = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * dlon.cos();

    let h = x.atan2(y).to_degrees();

    if h < 0.0 {
        (360.0 + h) % 360.0
    } else {
        h
    }
}

/// Speed in metres per second over `seconds`; a zero duration gives infinity.
pub fn speed(a: &Location, b: &Location, seconds: f64) -> f64 {
    distance(a, b) / seconds
}

/// Name of the compass point nearest to `bearing` (degrees).
///
/// Deltas are compared in whole degrees and the first anchor wins a tie.
/// South sits at 190 degrees.
pub fn cardinal_direction(bearing: f64) -> &'static str {
    let mut bearing = bearing % 360.0;
    if bearing < 0.0 {
        bearing += 360.0;
    }

    let mut closest = 0;
    let mut closest_delta = (CARDINALS[0].0 - bearing).abs() as i64;

    for (index, (angle, _)) in CARDINALS.iter().enumerate() {
        let delta = (angle - bearing).abs() as i64;
        if delta < closest_delta {
            closest_delta = delta;
            closest = index;
        }
    }

    CARDINALS[closest].1
}

/// Degrees-and-decimal-minutes (DDDMM.mmmm) to decimal degrees
pub fn ddm_to_dd(ddm: f64) -> f64 {
    let degrees = (ddm / 100.0).floor();
    let minutes = ddm - degrees * 100.0;
    degrees + minutes / 60.0
}

/// Decimal degrees to degrees-and-decimal-minutes (DDDMM.mmmm)
pub fn dd_to_ddm(dd: f64) -> f64 {
    let whole_degrees = dd.floor();
    let minutes = (dd - whole_degrees) * 60.0;
    whole_degrees * 100.0 + minutes
}

pub fn mps_to_kph(mps: f64) -> f64 {
    mps * 3.6
}

pub fn kph_to_mps(kph: f64) -> f64 {
    kph / 3.6
}
