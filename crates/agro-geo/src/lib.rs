#![deny(warnings)]

//! Acreage helpers for user-drawn plot outlines.
//!
//! Flat-earth approximations good enough for field-sized shapes; no
//! projection library involved.

use serde::{Deserialize, Serialize};

/// Mean Earth radius in meters.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;
/// Meters per degree of latitude.
pub const METERS_PER_DEGREE: f64 = 111_320.0;
/// Square meters in one acre.
pub const SQ_M_PER_ACRE: f64 = 4046.86;

/// WGS84 coordinate in degrees.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// South-west and north-east corners.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub south_west: GeoPoint,
    pub north_east: GeoPoint,
}

/// Measured square plot, all values rounded to whole meters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SquareArea {
    pub m2: u64,
    pub width_m: u64,
    pub height_m: u64,
}

/// Great-circle distance in meters.
pub fn haversine_m(a: GeoPoint, b: GeoPoint) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();
    let h = (d_lat / 2.0).sin().powi(2)
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (d_lng / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_M * h.sqrt().atan2((1.0 - h).sqrt())
}

/// Area of a polygon in square meters.
///
/// Vertices are projected onto a plane at the polygon's mean latitude and
/// measured with the shoelace formula. Fewer than three points is zero.
pub fn polygon_area_m2(points: &[GeoPoint]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    let mean_lat = points.iter().map(|p| p.lat).sum::<f64>() / points.len() as f64;
    let scale = EARTH_RADIUS_M * std::f64::consts::PI / 180.0;
    let cos_lat = mean_lat.to_radians().cos();
    let xy: Vec<(f64, f64)> = points
        .iter()
        .map(|p| (p.lng * cos_lat * scale, p.lat * scale))
        .collect();
    let twice: f64 = xy
        .iter()
        .zip(xy.iter().cycle().skip(1))
        .map(|(&(x1, y1), &(x2, y2))| x1 * y2 - x2 * y1)
        .sum();
    twice.abs() / 2.0
}

/// Bounds of a square of `side_m` meters centered on `center`.
pub fn square_bounds(center: GeoPoint, side_m: f64) -> Bounds {
    let half = side_m / 2.0;
    let d_lat = half / METERS_PER_DEGREE;
    let d_lng = half / (METERS_PER_DEGREE * center.lat.to_radians().cos());
    Bounds {
        south_west: GeoPoint::new(center.lat - d_lat, center.lng - d_lng),
        north_east: GeoPoint::new(center.lat + d_lat, center.lng + d_lng),
    }
}

/// Measure the square drawn around `center`.
pub fn square_area(center: GeoPoint, side_m: f64) -> SquareArea {
    let b = square_bounds(center, side_m);
    let sw = b.south_west;
    let ne = b.north_east;
    let height = haversine_m(sw, GeoPoint::new(ne.lat, sw.lng));
    let width = haversine_m(sw, GeoPoint::new(sw.lat, ne.lng));
    SquareArea {
        m2: (width * height).round() as u64,
        width_m: width.round() as u64,
        height_m: height.round() as u64,
    }
}

/// Square meters to acres, rounded to two decimals.
pub fn m2_to_acres(m2: f64) -> f64 {
    (m2 / SQ_M_PER_ACRE * 100.0).round() / 100.0
}
