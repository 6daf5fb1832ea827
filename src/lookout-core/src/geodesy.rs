//! Navigation math on a spherical earth.
//!
//! Positions are `geo::Point`s where `x` is longitude and `y` is latitude, both in degrees.
//! Distances are nautical miles and bearings are degrees true (0 = north, 90 = east).

use geo::{Point, point};

/// Earth's radius in nautical miles.
pub const EARTH_RADIUS_NM: f64 = 3440.065;

/// Destination point reached from `start` after travelling `distance_nm` along the
/// great circle leaving at `bearing_degrees`.
///
/// The returned longitude is normalized into `[-180, 180]`.
pub fn destination(start: Point<f64>, bearing_degrees: f64, distance_nm: f64) -> Point<f64> {
    let lat1 = start.y().to_radians();
    let lon1 = start.x().to_radians();
    let bearing = bearing_degrees.to_radians();
    let angular_distance = distance_nm / EARTH_RADIUS_NM;

    let (sin_lat1, cos_lat1) = lat1.sin_cos();
    let (sin_d, cos_d) = angular_distance.sin_cos();

    let lat2 = (sin_lat1 * cos_d + cos_lat1 * sin_d * bearing.cos()).asin();
    let lon2 = lon1 + (bearing.sin() * sin_d * cos_lat1).atan2(cos_d - sin_lat1 * lat2.sin());

    point!(x: normalize_longitude(lon2.to_degrees()), y: lat2.to_degrees())
}

/// Great-circle distance between two points (haversine).
#[cfg(any(test, feature = "test"))]
pub fn distance_nm(from: Point<f64>, to: Point<f64>) -> f64 {
    let lat1 = from.y().to_radians();
    let lat2 = to.y().to_radians();
    let delta_lat = (to.y() - from.y()).to_radians();
    let delta_lon = (to.x() - from.x()).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lon / 2.0).sin().powi(2);

    EARTH_RADIUS_NM * 2.0 * a.sqrt().asin()
}

/// Initial bearing (forward azimuth) from one point towards another, in `[0, 360)`.
#[cfg(any(test, feature = "test"))]
pub fn initial_bearing(from: Point<f64>, to: Point<f64>) -> f64 {
    let lat1 = from.y().to_radians();
    let lat2 = to.y().to_radians();
    let delta_lon = (to.x() - from.x()).to_radians();

    let y = delta_lon.sin() * lat2.cos();
    let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * delta_lon.cos();

    y.atan2(x).to_degrees().rem_euclid(360.0)
}

pub fn normalize_longitude(longitude: f64) -> f64 {
    if (-180.0..=180.0).contains(&longitude) {
        longitude
    } else {
        (longitude + 180.0).rem_euclid(360.0) - 180.0
    }
}
