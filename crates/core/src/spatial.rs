//! Planar geometry and point-set statistics.
//!
//! Pure and total: empty inputs yield zero-valued results instead of errors.

use crate::point::SurveyPoint;
use crate::report::BoundingBox;

/// Length of a planar vector.
pub fn magnitude(delta_e: f64, delta_n: f64) -> f64 {
    delta_e.hypot(delta_n)
}

/// Horizontal distance between two points.
pub fn distance(p1: &SurveyPoint, p2: &SurveyPoint) -> f64 {
    magnitude(p2.easting - p1.easting, p2.northing - p1.northing)
}

/// Slope distance; falls back to the horizontal distance when either height is missing.
pub fn distance_3d(p1: &SurveyPoint, p2: &SurveyPoint) -> f64 {
    match (p1.height, p2.height) {
        (Some(h1), Some(h2)) => {
            let de = p2.easting - p1.easting;
            let dn = p2.northing - p1.northing;
            let dh = h2 - h1;
            (de * de + dn * dn + dh * dh).sqrt()
        }
        _ => distance(p1, p2),
    }
}

/// Whole-circle bearing of a coordinate delta, clockwise from north in `[0, 360)`.
///
/// Note the `atan2(east, north)` argument order.
pub fn bearing_from_delta(delta_e: f64, delta_n: f64) -> f64 {
    let bearing = delta_e.atan2(delta_n).to_degrees();
    if bearing < 0.0 {
        bearing + 360.0
    } else {
        bearing
    }
}

/// Bearing from `p1` to `p2`.
pub fn bearing(p1: &SurveyPoint, p2: &SurveyPoint) -> f64 {
    bearing_from_delta(p2.easting - p1.easting, p2.northing - p1.northing)
}

/// Absolute angle between two bearings, folded into `[0, 180]`.
pub fn bearing_difference(b1: f64, b2: f64) -> f64 {
    let diff = (b1 - b2).abs();
    if diff > 180.0 {
        360.0 - diff
    } else {
        diff
    }
}

/// Mean easting and northing. `(0, 0)` for an empty set.
pub fn centroid(points: &[SurveyPoint]) -> (f64, f64) {
    if points.is_empty() {
        return (0.0, 0.0);
    }
    let n = points.len() as f64;
    let (sum_e, sum_n) = points
        .iter()
        .fold((0.0, 0.0), |(e, n), p| (e + p.easting, n + p.northing));
    (sum_e / n, sum_n / n)
}

/// RMS radial distance of the points from `(centre_e, centre_n)`. 0 for an empty set.
pub fn standard_deviation(points: &[SurveyPoint], centre_e: f64, centre_n: f64) -> f64 {
    if points.is_empty() {
        return 0.0;
    }
    let sum: f64 = points
        .iter()
        .map(|p| {
            let de = p.easting - centre_e;
            let dn = p.northing - centre_n;
            de * de + dn * dn
        })
        .sum();
    (sum / points.len() as f64).sqrt()
}

/// Single-pass min/max extent. Zero box for an empty set.
pub fn bounding_box(points: &[SurveyPoint]) -> BoundingBox {
    let Some(first) = points.first() else {
        return BoundingBox::default();
    };
    let seed = BoundingBox {
        min_easting: first.easting,
        max_easting: first.easting,
        min_northing: first.northing,
        max_northing: first.northing,
    };
    points[1..].iter().fold(seed, |bbox, p| BoundingBox {
        min_easting: bbox.min_easting.min(p.easting),
        max_easting: bbox.max_easting.max(p.easting),
        min_northing: bbox.min_northing.min(p.northing),
        max_northing: bbox.max_northing.max(p.northing),
    })
}
